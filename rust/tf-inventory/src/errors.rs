use std::path::PathBuf;

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Everything that can stop an inventory from being generated. A missing output key is not an
/// error; it simply yields an empty host group.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Command '{command}' failed: {reason}")]
    UpstreamCommand { command: String, reason: String },

    #[error("Command '{command}' could not be started")]
    UpstreamSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Terraform output is not a JSON object")]
    MalformedOutput {
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O operation failed: {operation} {path:?}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InventoryError {
    pub(crate) fn io(operation: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.to_string(),
            path: path.into(),
            source,
        }
    }

    /// True when the Terraform outputs could not be obtained at all.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            InventoryError::UpstreamCommand { .. } | InventoryError::UpstreamSpawn { .. }
        )
    }

    /// Process exit code reported by the `tf-inventory` binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            InventoryError::UpstreamCommand { .. } | InventoryError::UpstreamSpawn { .. } => 1,
            InventoryError::MalformedOutput { .. } => 2,
            InventoryError::Io { .. } => 3,
        }
    }
}
