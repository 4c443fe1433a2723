use pocket_config::ConfigError;
use pocket_core::CoreError;
use thiserror::Error;

/// Error type for session-level failures.
#[derive(Debug, Error)]
pub enum PocketError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PocketError {
    /// Whether the ledger refused the operation (as opposed to an I/O failure).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            PocketError::Core(
                CoreError::InsufficientFunds(_)
                    | CoreError::InvalidInput(_)
                    | CoreError::InUse(..)
                    | CoreError::NotFound(..)
                    | CoreError::NotEditable(..)
                    | CoreError::NoActiveProfile
            )
        )
    }
}

pub type Result<T> = std::result::Result<T, PocketError>;
