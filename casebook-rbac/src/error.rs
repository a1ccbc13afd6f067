//! Error types for loading permission configuration.
//!
//! Checks themselves never fail; these errors only arise when a role table
//! is parsed from configuration at startup.

use thiserror::Error;

/// Role table and permission parsing errors.
#[derive(Debug, Error)]
pub enum RbacError {
    /// Token is not part of the permission taxonomy
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// Role name is not one of the known roles
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Role appears more than once in a role table document
    #[error("Role listed more than once: {0}")]
    DuplicateRole(String),

    /// Role table document could not be parsed
    #[error("Invalid role table: {0}")]
    InvalidRoleTable(#[from] serde_json::Error),
}

/// Result type for RBAC configuration operations.
pub type RbacResult<T> = Result<T, RbacError>;
