//! # Permissions
//!
//! The closed permission taxonomy and permission sets.
//! A permission is an opaque token such as `case:write`; matching is
//! always exact token equality.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::str::FromStr;

use crate::actions::Action;
use crate::error::RbacError;
use crate::resources::ResourceType;

/// A single capability token from the fixed taxonomy.
///
/// Every permission has a `resource:action` token form. The token is what
/// gets stored in role tables, API-key grants and denial responses.
///
/// # Example
///
/// ```
/// use casebook_rbac::permissions::Permission;
/// use casebook_rbac::resources::ResourceType;
/// use casebook_rbac::actions::Action;
///
/// let perm = Permission::CaseWrite;
/// assert_eq!(perm.as_str(), "case:write");
/// assert_eq!(perm.resource(), ResourceType::Case);
/// assert_eq!(perm.action(), Action::Write);
/// assert_eq!(Permission::parse("case:write"), Some(Permission::CaseWrite));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    /// `statement:read`
    StatementRead,
    /// `statement:write`
    StatementWrite,
    /// `statement:delete`
    StatementDelete,
    /// `statement:publish`
    StatementPublish,
    /// `person:read`
    PersonRead,
    /// `person:write`
    PersonWrite,
    /// `person:delete`
    PersonDelete,
    /// `organization:read`
    OrganizationRead,
    /// `organization:write`
    OrganizationWrite,
    /// `organization:delete`
    OrganizationDelete,
    /// `case:read`
    CaseRead,
    /// `case:write`
    CaseWrite,
    /// `case:delete`
    CaseDelete,
    /// `case:publish`
    CasePublish,
    /// `user:read`
    UserRead,
    /// `user:manage`
    UserManage,
    /// `api_key:manage`
    ApiKeyManage,
    /// `audit_log:read`
    AuditLogRead,
}

impl Permission {
    /// Get the token form (e.g., `"case:write"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::StatementRead => "statement:read",
            Permission::StatementWrite => "statement:write",
            Permission::StatementDelete => "statement:delete",
            Permission::StatementPublish => "statement:publish",
            Permission::PersonRead => "person:read",
            Permission::PersonWrite => "person:write",
            Permission::PersonDelete => "person:delete",
            Permission::OrganizationRead => "organization:read",
            Permission::OrganizationWrite => "organization:write",
            Permission::OrganizationDelete => "organization:delete",
            Permission::CaseRead => "case:read",
            Permission::CaseWrite => "case:write",
            Permission::CaseDelete => "case:delete",
            Permission::CasePublish => "case:publish",
            Permission::UserRead => "user:read",
            Permission::UserManage => "user:manage",
            Permission::ApiKeyManage => "api_key:manage",
            Permission::AuditLogRead => "audit_log:read",
        }
    }

    /// Get the resource and action this permission combines.
    pub fn parts(&self) -> (ResourceType, Action) {
        use Action::*;
        use ResourceType::*;

        match self {
            Permission::StatementRead => (Statement, Read),
            Permission::StatementWrite => (Statement, Write),
            Permission::StatementDelete => (Statement, Delete),
            Permission::StatementPublish => (Statement, Publish),
            Permission::PersonRead => (Person, Read),
            Permission::PersonWrite => (Person, Write),
            Permission::PersonDelete => (Person, Delete),
            Permission::OrganizationRead => (Organization, Read),
            Permission::OrganizationWrite => (Organization, Write),
            Permission::OrganizationDelete => (Organization, Delete),
            Permission::CaseRead => (Case, Read),
            Permission::CaseWrite => (Case, Write),
            Permission::CaseDelete => (Case, Delete),
            Permission::CasePublish => (Case, Publish),
            Permission::UserRead => (User, Read),
            Permission::UserManage => (User, Manage),
            Permission::ApiKeyManage => (ApiKey, Manage),
            Permission::AuditLogRead => (AuditLog, Read),
        }
    }

    /// The resource half of the token.
    pub fn resource(&self) -> ResourceType {
        self.parts().0
    }

    /// The action half of the token.
    pub fn action(&self) -> Action {
        self.parts().1
    }

    /// Look up the permission for a resource/action pair.
    ///
    /// Returns `None` for combinations outside the taxonomy
    /// (e.g., `user:delete`).
    pub fn from_parts(resource: ResourceType, action: Action) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|p| p.parts() == (resource, action))
    }

    /// Parse a token.
    ///
    /// Parsing is exact and case-sensitive. The API-key wildcard `"*"` is
    /// not a permission and parses to `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.as_str() == s)
    }

    /// Get every permission in the taxonomy.
    pub fn all() -> Vec<Self> {
        vec![
            Permission::StatementRead,
            Permission::StatementWrite,
            Permission::StatementDelete,
            Permission::StatementPublish,
            Permission::PersonRead,
            Permission::PersonWrite,
            Permission::PersonDelete,
            Permission::OrganizationRead,
            Permission::OrganizationWrite,
            Permission::OrganizationDelete,
            Permission::CaseRead,
            Permission::CaseWrite,
            Permission::CaseDelete,
            Permission::CasePublish,
            Permission::UserRead,
            Permission::UserManage,
            Permission::ApiKeyManage,
            Permission::AuditLogRead,
        ]
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RbacError::UnknownPermission(s.to_string()))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// A set of permissions held by a role or an identity.
///
/// Membership is exact: a set holding `case:write` does not hold
/// `case:read`, and there is no wildcard entry.
///
/// # Example
///
/// ```
/// use casebook_rbac::permissions::{Permission, PermissionSet};
///
/// let mut set = PermissionSet::new();
/// set.add(Permission::CaseRead);
/// set.add(Permission::CaseWrite);
///
/// assert!(set.has(Permission::CaseWrite));
/// assert!(!set.has(Permission::CaseDelete));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: HashSet<Permission>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: HashSet::new(),
        }
    }

    /// A set holding every permission in the taxonomy.
    pub fn everything() -> Self {
        Permission::all().into_iter().collect()
    }

    /// Add a permission. Returns `false` if it was already present.
    pub fn add(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Remove a permission. Returns `true` if it was present.
    pub fn remove(&mut self, permission: Permission) -> bool {
        self.permissions.remove(&permission)
    }

    /// Check if the set contains a permission (exact match only).
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Get all permissions in the set, sorted in taxonomy order.
    pub fn all(&self) -> Vec<Permission> {
        let mut perms: Vec<_> = self.permissions.iter().copied().collect();
        perms.sort();
        perms
    }

    /// Iterate over the permissions in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions.iter().copied()
    }

    /// Merge another permission set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        self.permissions.extend(other.permissions.iter().copied());
    }

    /// Create from permission tokens, dropping any token outside the taxonomy.
    ///
    /// Unknown tokens can never match a required permission, so dropping
    /// them does not change any membership answer.
    ///
    /// # Example
    ///
    /// ```
    /// use casebook_rbac::permissions::{Permission, PermissionSet};
    ///
    /// let set = PermissionSet::from_strings(["case:read", "case:write", "read:cases"]);
    /// assert_eq!(set.len(), 2);
    /// assert!(set.has(Permission::CaseRead));
    /// ```
    pub fn from_strings<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter_map(|t| Permission::parse(t.as_ref()))
            .collect()
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Check if this set contains every permission of another set.
    pub fn contains_all(&self, other: &PermissionSet) -> bool {
        other.permissions.is_subset(&self.permissions)
    }

    /// Check if this set contains at least one permission of another set.
    pub fn contains_any(&self, other: &PermissionSet) -> bool {
        !self.permissions.is_disjoint(&other.permissions)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<T: IntoIterator<Item = Permission>>(&mut self, iter: T) {
        self.permissions.extend(iter);
    }
}
