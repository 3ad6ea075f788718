use crate::paths::{InventoryPaths, DEFAULT_INVENTORY_PATH, DEFAULT_TERRAFORM_DIR};
use crate::terraform::{OutputSource, SavedOutput, TerraformCli};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Clap Derive definition of the `tf-inventory` command line. Every option has a default, so
/// running the binary bare from the project root reads `./terraform` and writes
/// `./ansible/inventory.ini`.
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = "Generate an Ansible inventory of primary and secondary hosts from `terraform output -json`"
)]
pub struct Args {
    #[arg(
        long,
        help = "directory to run terraform in",
        default_value = DEFAULT_TERRAFORM_DIR
    )]
    pub terraform_dir: PathBuf,

    #[arg(
        long,
        short,
        help = "inventory file to (over)write",
        default_value = DEFAULT_INVENTORY_PATH
    )]
    pub output: PathBuf,

    #[arg(long, help = "terraform executable to invoke", default_value = "terraform")]
    pub terraform_bin: String,

    #[arg(
        long,
        help = "read a saved `terraform output -json` dump instead of running terraform"
    )]
    pub from_file: Option<PathBuf>,

    #[arg(
        long,
        help = "print the inventory to stdout instead of writing the file",
        default_value_t = false
    )]
    pub stdout: bool,
}

impl Args {
    pub fn paths(&self, base: &Path) -> InventoryPaths {
        InventoryPaths::resolve(base, &self.terraform_dir, &self.output)
    }

    /// A saved dump given with `--from-file` takes precedence over running Terraform.
    pub fn output_source(&self, base: &Path) -> Box<dyn OutputSource> {
        match &self.from_file {
            Some(saved) => Box::new(SavedOutput::new(base.join(saved))),
            None => Box::new(TerraformCli::new(
                self.terraform_bin.as_str(),
                base.join(&self.terraform_dir),
            )),
        }
    }
}
