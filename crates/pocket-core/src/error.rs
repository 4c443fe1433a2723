use std::io;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} is still in use: {1}")]
    InUse(&'static str, String),
    #[error("{0} not found: {1}")]
    NotFound(&'static str, Uuid),
    #[error("Transaction {0} is linked ({1}) and cannot be edited")]
    NotEditable(Uuid, &'static str),
    #[error("No active profile")]
    NoActiveProfile,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Returns `true` for errors that stem from a rejected balance check.
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds(_))
    }
}

pub type ServiceResult<T> = Result<T, CoreError>;
