//! # Resource Types
//!
//! Defines the resource types the CMS guards with permissions.
//! Resources are grouped by the area of the CMS that owns them.

use serde::{Deserialize, Serialize};

/// Area of the CMS that owns a resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    /// Published database content: statements, persons, organizations, cases.
    Content,
    /// Back-office resources: user accounts, API keys, audit trail.
    Administration,
}

/// Resource types that can have permissions assigned.
///
/// - **Content**: Statement, Person, Organization, Case
/// - **Administration**: User, ApiKey, AuditLog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    // Content
    /// A recorded statement attributed to a person or organization.
    Statement,
    /// A person profile.
    Person,
    /// An organization profile.
    Organization,
    /// An incident or case file linking statements, persons and organizations.
    Case,

    // Administration
    /// CMS user accounts.
    User,
    /// API keys issued to integrations.
    ApiKey,
    /// The audit trail of CMS changes.
    AuditLog,
}

impl ResourceType {
    /// Get the string representation used as the first half of a permission token.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Statement => "statement",
            ResourceType::Person => "person",
            ResourceType::Organization => "organization",
            ResourceType::Case => "case",
            ResourceType::User => "user",
            ResourceType::ApiKey => "api_key",
            ResourceType::AuditLog => "audit_log",
        }
    }

    /// Get the area that owns this resource type.
    ///
    /// # Example
    ///
    /// ```
    /// use casebook_rbac::resources::{Area, ResourceType};
    ///
    /// assert_eq!(ResourceType::Case.area(), Area::Content);
    /// assert_eq!(ResourceType::ApiKey.area(), Area::Administration);
    /// ```
    pub fn area(&self) -> Area {
        match self {
            ResourceType::Statement
            | ResourceType::Person
            | ResourceType::Organization
            | ResourceType::Case => Area::Content,
            ResourceType::User | ResourceType::ApiKey | ResourceType::AuditLog => {
                Area::Administration
            }
        }
    }

    /// Parse a resource type from its token form.
    ///
    /// Matching is exact: `"Case"` and `"cases"` are not resource tokens.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|r| r.as_str() == s)
    }

    /// Get all resource types.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceType::Statement,
            ResourceType::Person,
            ResourceType::Organization,
            ResourceType::Case,
            ResourceType::User,
            ResourceType::ApiKey,
            ResourceType::AuditLog,
        ]
    }

    /// Get all resource types owned by an area.
    pub fn for_area(area: Area) -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|r| r.area() == area)
            .collect()
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
