//! Error types for market-core

use thiserror::Error;

use crate::config::ConfigError;
use crate::directory::DirectoryError;
use crate::models::RecordError;
use crate::submit::FormError;

/// Result type alias using market-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in market-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote directory (auth or document store) error
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// A stored document could not be converted into a record
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Form input could not be turned into a record
    #[error(transparent)]
    Form(#[from] FormError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
