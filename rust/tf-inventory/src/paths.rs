use crate::errors::{InventoryError, InventoryResult};
use log::debug;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

pub const DEFAULT_TERRAFORM_DIR: &str = "terraform";
pub const DEFAULT_INVENTORY_PATH: &str = "ansible/inventory.ini";

/// Where Terraform is run from and where the inventory is written, both anchored to a base
/// directory (normally the current working directory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryPaths {
    pub terraform_dir: PathBuf,
    pub inventory_file: PathBuf,
}

impl InventoryPaths {
    /// Relative paths are joined onto `base`; absolute ones are kept as given.
    pub fn resolve(base: &Path, terraform_dir: &Path, inventory_file: &Path) -> Self {
        let paths = Self {
            terraform_dir: base.join(terraform_dir),
            inventory_file: base.join(inventory_file),
        };
        debug!(
            "Terraform directory {:?}, inventory file {:?}",
            paths.terraform_dir, paths.inventory_file
        );
        paths
    }

    pub fn with_defaults(base: &Path) -> Self {
        Self::resolve(
            base,
            Path::new(DEFAULT_TERRAFORM_DIR),
            Path::new(DEFAULT_INVENTORY_PATH),
        )
    }

    /// Creates the inventory file's parent directory if it does not exist yet.
    pub fn ensure_inventory_dir(&self) -> InventoryResult<()> {
        if let Some(parent) = self.inventory_file.parent() {
            create_dir_all(parent)
                .map_err(|e| InventoryError::io("creating directory", parent, e))?;
        }
        Ok(())
    }
}
