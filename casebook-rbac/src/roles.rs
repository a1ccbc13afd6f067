//! Roles and the role-to-permission table
//!
//! A role is a named bundle of permissions assigned to a CMS user account.
//! The mapping from roles to permissions is static configuration: the
//! built-in table is built once per process, and a replacement table can be
//! parsed from JSON at startup.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::actions::Action;
use crate::error::{RbacError, RbacResult};
use crate::permissions::{Permission, PermissionSet};
use crate::resources::{Area, ResourceType};

/// User role within the CMS.
///
/// Role names are exact upper-case tokens as stored on user accounts.
///
/// - **Viewer**: Read access to statements, persons, organizations and cases
/// - **Editor**: Can also write and publish content, but not delete it
/// - **Admin**: Every permission, including user and API-key management
///
/// # Examples
///
/// ```
/// use casebook_rbac::Role;
///
/// assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
/// assert_eq!(Role::parse("admin"), None);
/// assert_eq!(Role::Editor.as_str(), "EDITOR");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Read-only access to content
    Viewer = 1,

    /// Can create, edit and publish content
    Editor = 2,

    /// Full control
    Admin = 3,
}

impl Role {
    /// Parse a role name. Matching is exact and case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "VIEWER" => Some(Self::Viewer),
            "EDITOR" => Some(Self::Editor),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Get the stored name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Editor => "EDITOR",
            Self::Admin => "ADMIN",
        }
    }

    /// Get all roles.
    pub fn all() -> Vec<Self> {
        vec![Self::Viewer, Self::Editor, Self::Admin]
    }

    /// The permissions this role holds in the built-in table.
    fn builtin_permissions(&self) -> PermissionSet {
        match self {
            Self::Admin => PermissionSet::everything(),
            Self::Editor => content_permissions(|a| !a.is_destructive() && a != Action::Manage),
            Self::Viewer => content_permissions(|a| a.is_read_only()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn content_permissions(include: impl Fn(Action) -> bool) -> PermissionSet {
    let actions: Vec<Action> = Action::all().into_iter().filter(|a| include(*a)).collect();
    let actions = &actions;

    ResourceType::for_area(Area::Content)
        .into_iter()
        .flat_map(move |resource| {
            actions
                .iter()
                .filter_map(move |action| Permission::from_parts(resource, *action))
        })
        .collect()
}

static BUILTIN: LazyLock<RoleTable> = LazyLock::new(|| {
    Role::all()
        .into_iter()
        .fold(RoleTable::new(), |table, role| {
            table.with_role(role, role.builtin_permissions())
        })
});

/// Immutable lookup from role to permission set.
///
/// Roles absent from the table grant nothing, as do role names that are
/// not roles at all.
///
/// # Example
///
/// ```
/// use casebook_rbac::{Permission, Role, RoleTable};
///
/// let table = RoleTable::builtin();
/// assert!(table.grants("ADMIN", Permission::CaseWrite));
/// assert!(!table.grants("VIEWER", Permission::CaseWrite));
/// assert!(table.expand("SUPERUSER").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTable {
    roles: HashMap<Role, PermissionSet>,
}

impl RoleTable {
    /// Create an empty table. Every role grants nothing.
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// The built-in table, built on first use.
    pub fn builtin() -> &'static RoleTable {
        &BUILTIN
    }

    /// Set the permissions for a role, replacing any previous entry.
    pub fn with_role(mut self, role: Role, permissions: PermissionSet) -> Self {
        self.roles.insert(role, permissions);
        self
    }

    /// Parse a table from a JSON object of role name to permission tokens.
    ///
    /// Unlike request-time checks, loading is strict: an unknown role name,
    /// a role listed twice, or an unknown permission token is a
    /// configuration error.
    ///
    /// # Example
    ///
    /// ```
    /// use casebook_rbac::{Permission, Role, RoleTable};
    ///
    /// let table = RoleTable::from_json(r#"{"EDITOR": ["case:read"]}"#).unwrap();
    /// assert!(table.permissions_for(Role::Editor).has(Permission::CaseRead));
    /// assert!(table.permissions_for(Role::Admin).is_empty());
    /// ```
    pub fn from_json(json: &str) -> RbacResult<Self> {
        let RawTable(entries) = serde_json::from_str(json)?;

        let mut table = Self::new();
        for (name, tokens) in entries {
            let role = Role::parse(&name).ok_or(RbacError::UnknownRole(name))?;
            if table.roles.contains_key(&role) {
                return Err(RbacError::DuplicateRole(role.as_str().to_string()));
            }
            let permissions = tokens
                .iter()
                .map(|t| t.parse::<Permission>())
                .collect::<RbacResult<PermissionSet>>()?;
            table = table.with_role(role, permissions);
        }
        Ok(table)
    }

    /// Get the permissions held by a role.
    pub fn permissions_for(&self, role: Role) -> PermissionSet {
        self.roles.get(&role).cloned().unwrap_or_default()
    }

    /// Expand a stored role name into its permission set.
    ///
    /// Unknown names expand to the empty set.
    pub fn expand(&self, role_name: &str) -> PermissionSet {
        self.lookup(role_name).cloned().unwrap_or_default()
    }

    /// Check whether a stored role name holds a permission, without cloning
    /// the role's set.
    pub fn grants(&self, role_name: &str, permission: Permission) -> bool {
        self.lookup(role_name)
            .is_some_and(|set| set.has(permission))
    }

    /// Roles with an entry in this table, in hierarchy order.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<_> = self.roles.keys().copied().collect();
        roles.sort();
        roles
    }

    fn lookup(&self, role_name: &str) -> Option<&PermissionSet> {
        let Some(role) = Role::parse(role_name) else {
            tracing::warn!(role = %role_name, "Unknown role; granting no permissions");
            return None;
        };
        self.roles.get(&role)
    }
}

/// Role table document entries in file order, duplicates kept.
struct RawTable(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawTableVisitor;

        impl<'de> Visitor<'de> for RawTableVisitor {
            type Value = RawTable;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object of role name to permission tokens")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawTable, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(RawTable(entries))
            }
        }

        deserializer.deserialize_map(RawTableVisitor)
    }
}

/// Expand a role name using the built-in table.
///
/// # Example
///
/// ```
/// use casebook_rbac::{expand_role, Permission};
///
/// assert!(expand_role("ADMIN").has(Permission::CaseWrite));
/// assert!(expand_role("GHOST").is_empty());
/// ```
pub fn expand_role(role_name: &str) -> PermissionSet {
    RoleTable::builtin().expand(role_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(Role::Admin > Role::Editor);
        assert!(Role::Editor > Role::Viewer);
    }

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("EDITOR"), Some(Role::Editor));
        assert_eq!(Role::parse("VIEWER"), Some(Role::Viewer));
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("OWNER"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_serde_uses_stored_names() {
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"EDITOR\"");
        let role: Role = serde_json::from_str("\"VIEWER\"").unwrap();
        assert_eq!(role, Role::Viewer);
    }

    #[test]
    fn test_builtin_admin_holds_everything() {
        let admin = expand_role("ADMIN");
        assert_eq!(admin, PermissionSet::everything());
        assert!(admin.has(Permission::CaseWrite));
        assert!(admin.has(Permission::UserManage));
    }

    #[test]
    fn test_builtin_editor() {
        let editor = expand_role("EDITOR");
        assert!(editor.has(Permission::CaseRead));
        assert!(editor.has(Permission::CaseWrite));
        assert!(editor.has(Permission::CasePublish));
        assert!(editor.has(Permission::StatementPublish));
        assert!(editor.has(Permission::PersonWrite));

        assert!(!editor.has(Permission::CaseDelete));
        assert!(!editor.has(Permission::UserRead));
        assert!(!editor.has(Permission::UserManage));
        assert!(!editor.has(Permission::ApiKeyManage));
        assert!(!editor.has(Permission::AuditLogRead));
        assert_eq!(editor.len(), 10);
    }

    #[test]
    fn test_builtin_viewer() {
        let viewer = expand_role("VIEWER");
        assert_eq!(
            viewer.all(),
            vec![
                Permission::StatementRead,
                Permission::PersonRead,
                Permission::OrganizationRead,
                Permission::CaseRead,
            ]
        );
    }

    #[test]
    fn test_roles_are_nested() {
        let viewer = expand_role("VIEWER");
        let editor = expand_role("EDITOR");
        let admin = expand_role("ADMIN");
        assert!(editor.contains_all(&viewer));
        assert!(admin.contains_all(&editor));
    }

    #[test]
    fn test_unknown_role_expands_to_nothing() {
        for name in ["SUPERUSER", "admin", "", "ADMIN "] {
            let set = expand_role(name);
            assert!(set.is_empty(), "{name:?}");
            for perm in Permission::all() {
                assert!(!RoleTable::builtin().grants(name, perm));
            }
        }
    }

    #[test]
    fn test_table_from_json() {
        let table = RoleTable::from_json(
            r#"{"EDITOR": ["case:read", "case:write"], "VIEWER": []}"#,
        )
        .unwrap();

        assert_eq!(table.roles(), vec![Role::Viewer, Role::Editor]);
        assert!(table.grants("EDITOR", Permission::CaseWrite));
        assert!(!table.grants("EDITOR", Permission::CasePublish));
        assert!(table.expand("VIEWER").is_empty());
        // Absent from the document.
        assert!(!table.grants("ADMIN", Permission::CaseRead));
    }

    #[test]
    fn test_table_from_json_rejects_unknown_names() {
        let err = RoleTable::from_json(r#"{"OWNER": ["case:read"]}"#).unwrap_err();
        assert!(matches!(err, RbacError::UnknownRole(ref name) if name == "OWNER"));

        let err = RoleTable::from_json(r#"{"ADMIN": ["case:*"]}"#).unwrap_err();
        assert!(matches!(err, RbacError::UnknownPermission(ref token) if token == "case:*"));

        let err = RoleTable::from_json("[]").unwrap_err();
        assert!(matches!(err, RbacError::InvalidRoleTable(_)));
    }

    #[test]
    fn test_table_from_json_rejects_duplicate_roles() {
        let err = RoleTable::from_json(
            r#"{"VIEWER": ["case:read"], "ADMIN": [], "VIEWER": ["user:manage"]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RbacError::DuplicateRole(ref name) if name == "VIEWER"));
        assert_eq!(err.to_string(), "Role listed more than once: VIEWER");
    }

    #[test]
    fn test_builtin_table_is_shared() {
        assert!(std::ptr::eq(RoleTable::builtin(), RoleTable::builtin()));
    }
}
