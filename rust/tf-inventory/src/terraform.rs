//! Access to the outputs of a Terraform root module. The outputs are normally fetched live by
//! running `terraform output -json`, but a previously saved dump of the same command can be
//! used instead.
use crate::errors::{InventoryError, InventoryResult};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Output holding the public addresses of the primary EC2 instances.
pub const PRIMARY_IPS_OUTPUT: &str = "primary_ec2_public_ips";
/// Output holding the public addresses of the secondary EC2 instances.
pub const SECONDARY_IPS_OUTPUT: &str = "secondary_ec2_public_ips";

/// Somewhere the raw JSON of `terraform output -json` can be read from.
pub trait OutputSource {
    /// Human readable description, used in log and status lines.
    fn describe(&self) -> String;

    fn fetch(&self) -> InventoryResult<Vec<u8>>;
}

/// Runs the Terraform CLI. The call blocks until Terraform exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct TerraformCli {
    program: String,
    working_dir: PathBuf,
}

impl TerraformCli {
    pub const OUTPUT_ARGS: [&'static str; 2] = ["output", "-json"];

    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn command_line(&self) -> String {
        format!("{} {}", self.program, Self::OUTPUT_ARGS.join(" "))
    }

    fn check_output(&self, output: Output) -> InventoryResult<Vec<u8>> {
        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let reason = if stderr.is_empty() {
            output.status.to_string()
        } else {
            format!("{}: {}", output.status, stderr)
        };
        Err(InventoryError::UpstreamCommand {
            command: self.command_line(),
            reason,
        })
    }
}

impl OutputSource for TerraformCli {
    fn describe(&self) -> String {
        format!("`{}` in {:?}", self.command_line(), self.working_dir)
    }

    fn fetch(&self) -> InventoryResult<Vec<u8>> {
        debug!("Running {}", self.describe());
        let output = Command::new(&self.program)
            .args(Self::OUTPUT_ARGS)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|source| InventoryError::UpstreamSpawn {
                command: self.command_line(),
                source,
            })?;
        let stdout = self.check_output(output)?;
        info!("Terraform returned {} bytes of output", stdout.len());
        Ok(stdout)
    }
}

/// A file containing the captured stdout of an earlier `terraform output -json` run.
#[derive(Debug, Clone)]
pub struct SavedOutput {
    path: PathBuf,
}

impl SavedOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSource for SavedOutput {
    fn describe(&self) -> String {
        format!("saved output {:?}", self.path)
    }

    fn fetch(&self) -> InventoryResult<Vec<u8>> {
        debug!("Reading {}", self.describe());
        fs::read(&self.path)
            .map_err(|e| InventoryError::io("reading saved Terraform output", &self.path, e))
    }
}

/// The decoded top-level object of `terraform output -json`: output names mapped to descriptors
/// of the form `{"sensitive": .., "type": .., "value": ..}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputDocument {
    outputs: Map<String, Value>,
}

impl OutputDocument {
    pub fn from_slice(raw: &[u8]) -> InventoryResult<Self> {
        let outputs: Map<String, Value> = serde_json::from_slice(raw)
            .map_err(|source| InventoryError::MalformedOutput { source })?;
        debug!("Decoded {} Terraform outputs", outputs.len());
        Ok(Self { outputs })
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    /// The addresses held in the `value` of the named output, in document order. A missing
    /// output or a missing `value` gives an empty list. A scalar `value` counts as a single
    /// address, and non-string elements are kept as their JSON text.
    pub fn addresses(&self, name: &str) -> Vec<String> {
        let Some(descriptor) = self.outputs.get(name) else {
            warn!("Terraform output '{}' not found, using an empty list", name);
            return vec![];
        };

        match descriptor.get("value") {
            None | Some(Value::Null) => {
                warn!("Terraform output '{}' has no value, using an empty list", name);
                vec![]
            }
            Some(Value::Array(items)) => items.iter().map(address_text).collect(),
            Some(other) => {
                warn!("Terraform output '{}' is not a list, using it as one address", name);
                vec![address_text(other)]
            }
        }
    }
}

fn address_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
