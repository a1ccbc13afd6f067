//! Authorization configuration.
//!
//! Loaded from environment variables at process start, with defaults that
//! use the built-in role table.

use casebook_rbac::RoleTable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AuthError, AuthResult};

/// Environment variable naming a JSON role table file.
pub const ROLE_TABLE_ENV: &str = "CASEBOOK_ROLE_TABLE";

/// Environment variable toggling denial logging.
pub const LOG_DENIALS_ENV: &str = "CASEBOOK_AUTHZ_LOG_DENIALS";

/// Settings for building a [`PermissionResolver`](crate::PermissionResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// JSON role table replacing the built-in one. `None` keeps the built-in table.
    pub role_table_path: Option<PathBuf>,

    /// Whether denied checks are logged.
    pub log_denials: bool,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            role_table_path: None,
            log_denials: true,
        }
    }
}

impl AuthzConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CASEBOOK_ROLE_TABLE`: path to a JSON role table (default: built-in table)
    /// - `CASEBOOK_AUTHZ_LOG_DENIALS`: whether to log denials (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        Self {
            role_table_path: lookup(ROLE_TABLE_ENV)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            log_denials: lookup(LOG_DENIALS_ENV)
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.log_denials),
        }
    }

    /// Read the configured role table, if one is configured.
    pub fn load_role_table(&self) -> AuthResult<Option<RoleTable>> {
        let Some(path) = &self.role_table_path else {
            return Ok(None);
        };

        let json = std::fs::read_to_string(path).map_err(|e| {
            AuthError::Config(format!("cannot read role table {}: {e}", path.display()))
        })?;
        Ok(Some(RoleTable::from_json(&json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_rbac::{Permission, Role};
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthzConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AuthzConfig::default());
        assert!(config.log_denials);
        assert!(config.load_role_table().unwrap().is_none());
    }

    #[test]
    fn test_from_lookup() {
        let config = AuthzConfig::from_lookup(lookup(&[
            (ROLE_TABLE_ENV, "/etc/casebook/roles.json"),
            (LOG_DENIALS_ENV, "false"),
        ]));
        assert_eq!(
            config.role_table_path,
            Some(PathBuf::from("/etc/casebook/roles.json"))
        );
        assert!(!config.log_denials);

        let config = AuthzConfig::from_lookup(lookup(&[(LOG_DENIALS_ENV, "0")]));
        assert!(!config.log_denials);

        let config = AuthzConfig::from_lookup(lookup(&[(LOG_DENIALS_ENV, "yes")]));
        assert!(config.log_denials);
    }

    #[test]
    fn test_blank_path_is_ignored() {
        let config = AuthzConfig::from_lookup(lookup(&[(ROLE_TABLE_ENV, "  ")]));
        assert!(config.role_table_path.is_none());
    }

    #[test]
    fn test_load_role_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"VIEWER": ["case:read", "statement:read"]}}"#).unwrap();

        let config = AuthzConfig {
            role_table_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let table = config.load_role_table().unwrap().unwrap();
        assert_eq!(table.roles(), vec![Role::Viewer]);
        assert!(table.permissions_for(Role::Viewer).has(Permission::StatementRead));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = AuthzConfig {
            role_table_path: Some(dir.path().join("missing.json")),
            ..Default::default()
        };

        let err = config.load_role_table().unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_invalid_table_is_role_table_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ADMIN": ["everything"]}}"#).unwrap();

        let config = AuthzConfig {
            role_table_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            config.load_role_table().unwrap_err(),
            AuthError::RoleTable(_)
        ));
    }
}
