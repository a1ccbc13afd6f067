//! # Casebook RBAC (Role-Based Access Control)
//!
//! Permission taxonomy and role tables for the Casebook CMS: the database
//! of recorded statements, persons, organizations and cases.
//!
//! ## Overview
//!
//! The casebook-rbac crate handles:
//! - **Resources**: Content and administration resource types
//! - **Actions**: Operations that can be performed on resources
//! - **Permissions**: The closed set of `resource:action` tokens
//! - **Permission Sets**: Exact-match collections of permissions
//! - **Roles**: `ADMIN`, `EDITOR`, `VIEWER` and the table mapping them to permissions
//!
//! ## Architecture
//!
//! ```text
//! Permission = Resource + Action   (closed enumeration)
//!
//! Examples:
//!   "case:write"       - Create or edit cases
//!   "statement:publish" - Publish statements to the public site
//!   "user:manage"      - Administer CMS accounts
//! ```
//!
//! Matching is exact token equality. No action implies another and there
//! is no wildcard token at this layer.
//!
//! ## Usage
//!
//! ```rust
//! use casebook_rbac::{expand_role, Permission, PermissionSet};
//!
//! // Expand a role from the built-in table
//! let admin = expand_role("ADMIN");
//! assert!(admin.has(Permission::CaseWrite));
//!
//! // Unknown roles fail closed
//! assert!(expand_role("SUPERUSER").is_empty());
//!
//! // Build a narrower set by hand
//! let scoped = PermissionSet::from_strings(["case:read"]);
//! assert!(!scoped.has(Permission::CaseWrite));
//! ```

pub mod actions;
pub mod error;
pub mod permissions;
pub mod resources;
pub mod roles;

// Re-export main types for convenience
pub use actions::Action;
pub use error::{RbacError, RbacResult};
pub use permissions::{Permission, PermissionSet};
pub use resources::{Area, ResourceType};
pub use roles::{expand_role, Role, RoleTable};
