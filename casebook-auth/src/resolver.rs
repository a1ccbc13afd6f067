//! Request authorization
//!
//! [`PermissionResolver`] answers one question per protected route: may this
//! identity perform this permission? Checks are pure, in-memory and
//! synchronous. A resolver is immutable once built and can be shared across
//! request handlers by cloning.
//!
//! # Evaluation
//!
//! | Identity | Granted when |
//! |---|---|
//! | `Resolved(set)` | `set` holds the permission (an empty set grants nothing) |
//! | `User { role }` | the role table entry for `role` holds the permission |
//! | `ApiKey { permissions }` | the grant holds `"*"` or the exact token |
//! | `Anonymous` | never |
//!
//! # Example
//!
//! ```
//! use casebook_auth::{Identity, PermissionResolver};
//! use casebook_rbac::Permission;
//!
//! let resolver = PermissionResolver::new();
//!
//! let editor = Identity::user("u-42", "EDITOR");
//! assert!(resolver.is_authorized(&editor, Permission::CaseWrite));
//!
//! let err = resolver.authorize(&editor, Permission::UserManage).unwrap_err();
//! assert_eq!(err.status_code(), 403);
//! ```

use casebook_rbac::{Permission, PermissionSet, RoleTable};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AuthzConfig;
use crate::error::{AuthError, AuthResult};
use crate::identity::{Identity, IdentitySource};

/// Outcome of a single check, with the evidence that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The identity holds the permission.
    Granted(IdentitySource),
    /// The identity does not hold the permission.
    Denied(IdentitySource),
}

impl Decision {
    /// Check if the permission was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted(_))
    }

    /// The kind of evidence the decision was based on.
    pub fn source(&self) -> IdentitySource {
        match self {
            Decision::Granted(source) | Decision::Denied(source) => *source,
        }
    }
}

#[derive(Debug, Clone)]
enum Roles {
    Builtin,
    Custom(Arc<RoleTable>),
}

impl Roles {
    fn table(&self) -> &RoleTable {
        match self {
            Roles::Builtin => RoleTable::builtin(),
            Roles::Custom(table) => table,
        }
    }
}

/// Decides whether request identities hold required permissions.
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    roles: Roles,
    log_denials: bool,
}

impl Default for PermissionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionResolver {
    /// Resolver over the built-in role table.
    pub fn new() -> Self {
        Self {
            roles: Roles::Builtin,
            log_denials: true,
        }
    }

    /// Resolver over a custom role table.
    pub fn with_role_table(table: RoleTable) -> Self {
        Self {
            roles: Roles::Custom(Arc::new(table)),
            log_denials: true,
        }
    }

    /// Build a resolver from configuration, reading the role table file if
    /// one is configured.
    pub fn from_config(config: &AuthzConfig) -> AuthResult<Self> {
        let resolver = match config.load_role_table()? {
            Some(table) => {
                info!(
                    path = ?config.role_table_path,
                    roles = table.roles().len(),
                    "Loaded custom role table"
                );
                Self::with_role_table(table)
            }
            None => Self::new(),
        };
        Ok(resolver.log_denials(config.log_denials))
    }

    /// Enable or disable logging of denied checks.
    pub fn log_denials(mut self, enabled: bool) -> Self {
        self.log_denials = enabled;
        self
    }

    /// The role table this resolver expands roles with.
    pub fn role_table(&self) -> &RoleTable {
        self.roles.table()
    }

    /// Check a permission and report which evidence decided it.
    pub fn decide(&self, identity: &Identity, required: Permission) -> Decision {
        let granted = match identity {
            Identity::Resolved(set) => set.has(required),
            Identity::User(user) => self.role_table().grants(&user.role, required),
            Identity::ApiKey(grant) => grant.allows(required),
            Identity::Anonymous => false,
        };

        let source = identity.source();
        if granted {
            debug!(permission = %required, source = %source, "Permission granted");
            Decision::Granted(source)
        } else {
            if self.log_denials {
                info!(permission = %required, source = %source, "Permission denied");
            }
            Decision::Denied(source)
        }
    }

    /// Check whether the identity holds a permission.
    pub fn is_authorized(&self, identity: &Identity, required: Permission) -> bool {
        self.decide(identity, required).is_granted()
    }

    /// Require a permission, failing with [`AuthError::Forbidden`].
    pub fn authorize(&self, identity: &Identity, required: Permission) -> AuthResult<()> {
        if self.is_authorized(identity, required) {
            Ok(())
        } else {
            Err(AuthError::forbidden(required))
        }
    }

    /// Require every listed permission.
    ///
    /// The error names the first missing permission in list order. An empty
    /// list requires nothing.
    pub fn authorize_all(&self, identity: &Identity, required: &[Permission]) -> AuthResult<()> {
        required
            .iter()
            .try_for_each(|permission| self.authorize(identity, *permission))
    }

    /// The concrete permissions an identity holds, under the same rules as
    /// [`decide`](Self::decide).
    pub fn effective_permissions(&self, identity: &Identity) -> PermissionSet {
        match identity {
            Identity::Resolved(set) => set.clone(),
            Identity::User(user) => self.role_table().expand(&user.role),
            Identity::ApiKey(grant) => grant.permission_set(),
            Identity::Anonymous => PermissionSet::new(),
        }
    }
}

/// Check a permission against the built-in role table.
pub fn is_authorized(identity: &Identity, required: Permission) -> bool {
    PermissionResolver::new().is_authorized(identity, required)
}
