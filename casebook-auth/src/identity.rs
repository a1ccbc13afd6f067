//! Request identities
//!
//! An inbound request proves who it is in one of three ways: a signed-in
//! CMS user with a role, a permission list that was already resolved
//! upstream, or an API key carrying its own grant list. The authentication
//! layer builds one [`Identity`] per request; the resolver only reads it.
//!
//! # Precedence
//!
//! The request shape seen at the HTTP boundary ([`RequestAuth`]) exposes all
//! three as optional fields. Converting it into an [`Identity`] keeps exactly
//! one of them:
//!
//! 1. A resolved permission list, when present, even if it is empty
//! 2. Otherwise the user and role
//! 3. Otherwise the API-key grant
//! 4. Otherwise [`Identity::Anonymous`]
//!
//! A resolved list is how a caller hands out a narrower scope than the
//! user's role (delegated or temporary access), so it is never widened again
//! by a role lookup.

use casebook_rbac::{Permission, PermissionSet};
use serde::{Deserialize, Deserializer, Serialize};

/// The single authoritative piece of identity evidence for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Permissions already resolved upstream. An empty set grants nothing.
    Resolved(PermissionSet),

    /// A signed-in CMS user, authorized through their role.
    User(UserIdentity),

    /// An API key, authorized through its own grant list.
    ApiKey(ApiKeyGrant),

    /// No evidence at all.
    Anonymous,
}

impl Identity {
    /// Identity for a signed-in user.
    pub fn user(id: impl Into<String>, role: impl Into<String>) -> Self {
        Identity::User(UserIdentity {
            id: id.into(),
            role: role.into(),
        })
    }

    /// Identity for an API key.
    pub fn api_key<I, S>(id: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Identity::ApiKey(ApiKeyGrant {
            id: id.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        })
    }

    /// Identity holding an already-resolved permission set.
    pub fn resolved(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Identity::Resolved(permissions.into_iter().collect())
    }

    /// Which kind of evidence this is.
    pub fn source(&self) -> IdentitySource {
        match self {
            Identity::Resolved(_) => IdentitySource::ResolvedPermissions,
            Identity::User(_) => IdentitySource::UserRole,
            Identity::ApiKey(_) => IdentitySource::ApiKey,
            Identity::Anonymous => IdentitySource::Anonymous,
        }
    }

    /// Check if the request carried no evidence.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}

impl Default for Identity {
    fn default() -> Self {
        Identity::Anonymous
    }
}

/// Kind of identity evidence, used in decisions and log fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// Pre-resolved permission list
    ResolvedPermissions,
    /// User role
    UserRole,
    /// API-key grant
    ApiKey,
    /// No evidence
    Anonymous,
}

impl IdentitySource {
    /// Get the string representation used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentitySource::ResolvedPermissions => "resolved_permissions",
            IdentitySource::UserRole => "user_role",
            IdentitySource::ApiKey => "api_key",
            IdentitySource::Anonymous => "anonymous",
        }
    }
}

impl std::fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed-in CMS user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    /// User account ID
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Role name as stored on the account (e.g., `"EDITOR"`).
    ///
    /// Kept as the raw stored string; names that are not known roles
    /// grant nothing. A missing or null role reads as `""`, which is not
    /// a role.
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

/// Permissions granted to an API key.
///
/// Grant entries are raw strings compared against the required token. The
/// literal `"*"` grants every permission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKeyGrant {
    /// API key ID
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Granted permission strings. Missing or null means no grants.
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
}

/// Reads an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApiKeyGrant {
    /// Grant entry meaning "every permission".
    pub const WILDCARD: &'static str = "*";

    /// Check if the grant list contains the wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.permissions.iter().any(|p| p == Self::WILDCARD)
    }

    /// Check if this key may perform `required`.
    ///
    /// True when the grant holds the wildcard or the exact token. No other
    /// pattern matching is done: `"case:*"` is just an unknown string.
    pub fn allows(&self, required: Permission) -> bool {
        self.permissions
            .iter()
            .any(|p| p == Self::WILDCARD || p == required.as_str())
    }

    /// The concrete permissions this key holds.
    ///
    /// The wildcard expands to the whole taxonomy; strings outside the
    /// taxonomy are ignored.
    pub fn permission_set(&self) -> PermissionSet {
        if self.is_wildcard() {
            PermissionSet::everything()
        } else {
            PermissionSet::from_strings(&self.permissions)
        }
    }
}

/// Identity evidence as attached to a request by the authentication layer.
///
/// Each field is optional; [`RequestAuth::into_identity`] applies the
/// precedence rule to pick the authoritative one.
///
/// # Example
///
/// ```
/// use casebook_auth::{Identity, RequestAuth};
///
/// let auth = RequestAuth {
///     permissions: Some(vec![]),
///     user: Some(casebook_auth::UserIdentity { id: "u1".into(), role: "ADMIN".into() }),
///     api_key: None,
/// };
///
/// // An explicit, empty list still wins over the role.
/// assert!(matches!(auth.into_identity(), Identity::Resolved(set) if set.is_empty()));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestAuth {
    /// Permissions resolved upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,

    /// Signed-in user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,

    /// API-key grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKeyGrant>,
}

impl RequestAuth {
    /// Pick the authoritative identity.
    ///
    /// Tokens in a resolved list that are outside the taxonomy are dropped;
    /// they could never match a required permission.
    pub fn into_identity(self) -> Identity {
        if let Some(tokens) = self.permissions {
            return Identity::Resolved(PermissionSet::from_strings(tokens));
        }
        if let Some(user) = self.user {
            return Identity::User(user);
        }
        if let Some(grant) = self.api_key {
            return Identity::ApiKey(grant);
        }
        Identity::Anonymous
    }
}

impl From<RequestAuth> for Identity {
    fn from(auth: RequestAuth) -> Self {
        auth.into_identity()
    }
}
