//! # Casebook Authorization
//!
//! Request-level authorization for the Casebook CMS, shared by the admin
//! CMS routes and the public JSON API.
//!
//! ## Overview
//!
//! The casebook-auth crate handles:
//! - **Identities**: The evidence a request carries (user role, resolved permissions, API key)
//! - **Resolution**: Deciding whether an identity holds a required permission
//! - **Denials**: The 403 body naming the missing permission
//! - **Configuration**: Optional role table override from the environment
//!
//! Authentication itself (sessions, password checks, API-key lookup) happens
//! upstream; this crate only reads the identity it produced.
//!
//! ## Features
//!
//! - `axum`: `IntoResponse` for [`AuthError`], rendering the denial body
//!
//! ## Usage
//!
//! ```rust
//! use casebook_auth::{PermissionResolver, RequestAuth};
//! use casebook_rbac::Permission;
//!
//! let resolver = PermissionResolver::new();
//!
//! let auth = RequestAuth {
//!     api_key: Some(casebook_auth::ApiKeyGrant {
//!         id: "key-7".to_string(),
//!         permissions: vec!["read:cases".to_string()],
//!     }),
//!     ..Default::default()
//! };
//!
//! let err = resolver
//!     .authorize(&auth.into_identity(), Permission::UserManage)
//!     .unwrap_err();
//! assert_eq!(err.status_code(), 403);
//! assert_eq!(err.to_body().required, Some(Permission::UserManage));
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod resolver;

// Re-export main types
pub use config::AuthzConfig;
pub use error::{AuthError, AuthResult, DenialBody, INSUFFICIENT_PERMISSIONS};
pub use identity::{ApiKeyGrant, Identity, IdentitySource, RequestAuth, UserIdentity};
pub use resolver::{is_authorized, Decision, PermissionResolver};
