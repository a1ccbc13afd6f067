//! Error types for authorization
//!
//! A denied check becomes [`AuthError::Forbidden`], which the HTTP boundary
//! renders as a 403 with a [`DenialBody`]. The remaining variants only occur
//! while building a resolver from configuration.

use casebook_rbac::{Permission, RbacError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message carried in every denial body.
pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions";

/// Authorization error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identity does not hold the required permission
    #[error("Insufficient permissions: {required} is required")]
    Forbidden {
        /// The permission the route required.
        required: Permission,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Role table could not be loaded
    #[error("Role table error: {0}")]
    RoleTable(#[from] RbacError),
}

/// Result type for authorization operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Denial for a missing permission.
    pub fn forbidden(required: Permission) -> Self {
        AuthError::Forbidden { required }
    }

    /// Check if this error should be logged at error level.
    ///
    /// Denials are expected outcomes and are not server errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AuthError::Config(_) | AuthError::RoleTable(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Forbidden { .. } => 403,
            AuthError::Config(_) | AuthError::RoleTable(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Forbidden { .. } => "FORBIDDEN",
            AuthError::Config(_) => "CONFIG_ERROR",
            AuthError::RoleTable(_) => "ROLE_TABLE_ERROR",
        }
    }

    /// The permission a denial names, if this is a denial.
    pub fn required(&self) -> Option<Permission> {
        match self {
            AuthError::Forbidden { required } => Some(*required),
            _ => None,
        }
    }

    /// JSON body for the HTTP response.
    ///
    /// A denial names only the permission that was required. Server errors
    /// get a generic message so configuration details stay in the logs.
    pub fn to_body(&self) -> DenialBody {
        match self {
            AuthError::Forbidden { required } => DenialBody {
                error: INSUFFICIENT_PERMISSIONS.to_string(),
                required: Some(*required),
            },
            _ => DenialBody {
                error: "Internal server error".to_string(),
                required: None,
            },
        }
    }
}

/// Response body sent when a request is rejected.
///
/// ```json
/// { "error": "Insufficient permissions", "required": "user:manage" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DenialBody {
    /// Error classification
    pub error: String,

    /// Permission that was required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Permission>,
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "Authorization setup failed");
        }
        let status = axum::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_body() {
        let err = AuthError::forbidden(Permission::UserManage);
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
        assert!(!err.is_server_error());
        assert_eq!(err.required(), Some(Permission::UserManage));

        let body = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "Insufficient permissions", "required": "user:manage"})
        );
    }

    #[test]
    fn test_forbidden_message() {
        let err = AuthError::forbidden(Permission::CaseWrite);
        assert_eq!(
            err.to_string(),
            "Insufficient permissions: case:write is required"
        );
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let err = AuthError::Config("missing file".to_string());
        assert_eq!(err.status_code(), 500);
        assert!(err.is_server_error());
        assert_eq!(err.required(), None);

        let body = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    }

    #[test]
    fn test_role_table_error_conversion() {
        let err: AuthError = RbacError::UnknownRole("OWNER".to_string()).into();
        assert_eq!(err.error_code(), "ROLE_TABLE_ERROR");
        assert_eq!(err.to_string(), "Role table error: Unknown role: OWNER");
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AuthError::forbidden(Permission::UserManage).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);

        let response = AuthError::Config("bad".to_string()).into_response();
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
