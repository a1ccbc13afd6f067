//! # Actions
//!
//! Operations that can be performed on CMS resources. An action is the
//! second half of a permission token (`case:write`).

use serde::{Deserialize, Serialize};

/// Actions that can be performed on resources.
///
/// - **Read**: View records, including unpublished drafts in the CMS
/// - **Write**: Create and edit records
/// - **Delete**: Permanently remove records
/// - **Publish**: Make records visible on the public site
/// - **Manage**: Administer accounts and credentials
///
/// Actions never imply each other. `case:write` does not grant `case:read`;
/// a role that should read and write lists both tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read/view resource.
    Read,
    /// Create or edit resource.
    Write,
    /// Delete resource.
    Delete,
    /// Publish resource to the public site.
    Publish,
    /// Administer resource.
    Manage,
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Delete => "delete",
            Action::Publish => "publish",
            Action::Manage => "manage",
        }
    }

    /// Parse an action from its token form.
    ///
    /// Matching is exact and case-sensitive; there are no aliases.
    ///
    /// # Example
    ///
    /// ```
    /// use casebook_rbac::actions::Action;
    ///
    /// assert_eq!(Action::parse("write"), Some(Action::Write));
    /// assert_eq!(Action::parse("WRITE"), None);
    /// assert_eq!(Action::parse("edit"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|a| a.as_str() == s)
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::Read,
            Action::Write,
            Action::Delete,
            Action::Publish,
            Action::Manage,
        ]
    }

    /// Check if this action leaves resources unchanged.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Action::Read)
    }

    /// Check if this action permanently removes data.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Action::Delete)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(Action::parse("read"), Some(Action::Read));
        assert_eq!(Action::parse("write"), Some(Action::Write));
        assert_eq!(Action::parse("delete"), Some(Action::Delete));
        assert_eq!(Action::parse("publish"), Some(Action::Publish));
        assert_eq!(Action::parse("manage"), Some(Action::Manage));

        assert_eq!(Action::parse("Read"), None);
        assert_eq!(Action::parse("view"), None);
        assert_eq!(Action::parse("*"), None);
    }

    #[test]
    fn test_action_round_trips_through_as_str() {
        for action in Action::all() {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_action_classification() {
        assert!(Action::Read.is_read_only());
        assert!(!Action::Write.is_read_only());
        assert!(!Action::Publish.is_read_only());

        assert!(Action::Delete.is_destructive());
        assert!(!Action::Write.is_destructive());
        assert!(!Action::Manage.is_destructive());
    }
}
