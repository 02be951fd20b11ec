//! Error types for the sitecmd system

use thiserror::Error;

use crate::types::TenantId;

/// Core error type for sitecmd operations
#[derive(Error, Debug)]
pub enum SiteCmdError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors raised by the host application (enumeration, bootstrap)
    #[error("Host error: {0}")]
    Host(String),

    /// Tenant is not known to the host application
    #[error("Tenant not found: {0}")]
    TenantNotFound(TenantId),

    /// A command resolved to no name at all
    #[error("Command has no name: {0}")]
    UnnamedCommand(String),

    /// Two commands resolved to the same qualified name
    #[error("Duplicate command name: {0}")]
    DuplicateCommand(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for sitecmd operations
pub type Result<T> = std::result::Result<T, SiteCmdError>;
