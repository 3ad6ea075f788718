//! The Ansible inventory produced from the Terraform outputs: two flat host groups in INI form,
//! with hosts listed in the order Terraform reported them.
use crate::errors::{InventoryError, InventoryResult};
use crate::terraform::{OutputDocument, PRIMARY_IPS_OUTPUT, SECONDARY_IPS_OUTPUT};
use log::info;
use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

pub const PRIMARY_GROUP: &str = "primary";
pub const SECONDARY_GROUP: &str = "secondary";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnsibleInventory {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

impl AnsibleInventory {
    pub fn from_document(document: &OutputDocument) -> Self {
        let inventory = Self {
            primary: document.addresses(PRIMARY_IPS_OUTPUT),
            secondary: document.addresses(SECONDARY_IPS_OUTPUT),
        };
        info!(
            "Inventory has {} primary and {} secondary hosts",
            inventory.primary.len(),
            inventory.secondary.len()
        );
        inventory
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Replaces whatever is at `path` with the rendered inventory. The parent directory must
    /// already exist.
    pub fn write_to_file(&self, path: &Path) -> InventoryResult<()> {
        fs::write(path, self.render())
            .map_err(|e| InventoryError::io("writing inventory", path, e))?;
        info!("Wrote inventory to {:?}", path);
        Ok(())
    }
}

impl Display for AnsibleInventory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[{}]", PRIMARY_GROUP)?;
        for host in self.primary.iter() {
            writeln!(f, "{}", host)?;
        }
        writeln!(f)?;
        writeln!(f, "[{}]", SECONDARY_GROUP)?;
        for host in self.secondary.iter() {
            writeln!(f, "{}", host)?;
        }
        Ok(())
    }
}
