//! Turns the outputs of a Terraform deployment into an Ansible inventory.
//!
//! The Terraform root module is expected to export `primary_ec2_public_ips` and
//! `secondary_ec2_public_ips`, each a list of addresses. They become the `[primary]` and
//! `[secondary]` host groups of an INI inventory:
//!
//! ```rust
//! use tf_inventory::inventory::AnsibleInventory;
//! use tf_inventory::terraform::OutputDocument;
//!
//! let raw = br#"{"primary_ec2_public_ips": {"value": ["10.0.0.1"]}}"#;
//! let document = OutputDocument::from_slice(raw).unwrap();
//! let inventory = AnsibleInventory::from_document(&document);
//!
//! assert_eq!(inventory.render(), "[primary]\n10.0.0.1\n\n[secondary]\n");
//! ```
pub mod cli;
pub mod errors;
pub mod inventory;
pub mod paths;
pub mod terraform;

use errors::InventoryResult;
use inventory::AnsibleInventory;
use log::debug;
use terraform::{OutputDocument, OutputSource};

/// Fetches the Terraform outputs from `source` and extracts the inventory from them. Nothing is
/// written to disk here.
pub fn generate(source: &dyn OutputSource) -> InventoryResult<AnsibleInventory> {
    let raw = source.fetch()?;
    let document = OutputDocument::from_slice(&raw)?;
    debug!(
        "Outputs available: {}",
        document.output_names().collect::<Vec<_>>().join(", ")
    );
    Ok(AnsibleInventory::from_document(&document))
}
