//! Error types for genesis block construction.

use thiserror::Error;

/// Result type alias for genesis operations.
pub type Result<T> = std::result::Result<T, GenesisError>;

/// Errors raised while validating input or encoding genesis data.
///
/// Every variant except `Io`/`Json` describes bad input and is reported
/// before any proof-of-work search begins.
#[derive(Error, Debug)]
pub enum GenesisError {
    /// A network profile string did not match `name:time:bits[:nonce]`.
    #[error("Invalid network spec '{spec}': {reason}. Expected format name:time:bits[:nonce]")]
    InvalidProfile { spec: String, reason: String },

    /// A numeric field was not decimal or 0x-prefixed hex, or did not fit.
    #[error("Invalid {field} value '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// The reward public key was not valid hex or was empty.
    #[error("Invalid public key: {0}")]
    InvalidPubkey(String),

    /// The reward amount could not be converted to base units.
    #[error("Invalid reward amount: {0}")]
    InvalidAmount(String),

    /// A required input was absent from both flags and config.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A script push larger than the 4-byte length prefix can describe.
    #[error("Push payload of {0} bytes exceeds the maximum script push size")]
    PayloadTooLarge(usize),

    /// The compact bits decode to a value wider than 256 bits.
    #[error("Compact bits {bits:#010x} decode to a target wider than 256 bits")]
    TargetOverflow { bits: u32 },

    /// CompactSize input ended before the value was complete.
    #[error("Truncated CompactSize encoding")]
    TruncatedCompactSize,

    /// CompactSize value used a wider form than its magnitude requires.
    #[error("Non-minimal CompactSize encoding of {0}")]
    NonMinimalCompactSize(u64),

    /// Configuration file contents were invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON configuration parsing errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenesisError {
    /// Create a profile error for the given spec string.
    pub fn profile(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
