/// Error types for provisioning
use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the provider's REST API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        /// Provider error code such as `NOT_FOUND`, when the body carried one
        code: Option<String>,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Every way a provisioning run can fail. All of them are fatal.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("error opening file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error decoding JSON in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read SSH public key {}: {source}", path.display())]
    SshKeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Credential or HTTP client setup failed
    #[error("failed to build provider client: {0}")]
    Client(String),

    #[error("failed to resolve image family '{family}' in folder '{folder_id}': {source}")]
    ImageResolution {
        family: String,
        folder_id: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to submit instance creation request: {0}")]
    Submit(#[source] ApiError),

    #[error("failed waiting for operation {operation_id}: {source}")]
    Wait {
        operation_id: String,
        #[source]
        source: ApiError,
    },

    /// The operation finished, but with an error status
    #[error("operation {operation_id} failed with code {code}: {message}")]
    OperationFailed {
        operation_id: String,
        code: i32,
        message: String,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
