//! Records exchanged between the directory, the breach lookup and the report.

use serde::{Deserialize, Serialize};

/// A directory group as returned by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    /// Opaque, stable group identifier.
    pub id: String,
    /// Human-readable group name.
    pub display_name: String,
}

/// Type of a direct group member as reported by the directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    /// A user account.
    User,
    /// A nested group.
    Group,
    /// Anything else (service principal, device, contact, ...), with its raw tag.
    Other(String),
}

/// One edge of the membership graph: a direct member of some group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryMember {
    /// Object id of the member.
    pub id: String,
    /// What kind of object the member is.
    pub member_type: MemberType,
}

/// Full user details as returned by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Object id.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Sign-in name.
    #[serde(default)]
    pub user_principal_name: Option<String>,
    /// Primary mail address.
    #[serde(default)]
    pub mail: Option<String>,
    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Whether the account can sign in.
    #[serde(default)]
    pub account_enabled: Option<bool>,
}

/// Kind of node discovered during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    /// A user account.
    User,
    /// A nested group.
    Group,
}

/// One node discovered while walking the membership graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// User or group.
    pub kind: MemberKind,
    /// Display name of the member.
    pub display_name: String,
    /// Mail address; `None` for groups and for users without mail.
    pub email: Option<String>,
    /// Directory object id.
    pub object_id: String,
    /// Job title (users only).
    pub job_title: Option<String>,
    /// Department (users only).
    pub department: Option<String>,
    /// Account enabled flag (users only).
    pub account_enabled: Option<bool>,
    /// Id of the immediately containing group.
    pub parent_group_id: String,
    /// Display name of the immediately containing group.
    pub parent_group_name: String,
    /// Depth below the seed group (0 = direct member of the seed).
    pub nesting_level: u32,
}

impl MemberRecord {
    /// Builds a user record from resolved directory details.
    #[must_use]
    pub fn user(user: DirectoryUser, parent: &GroupRef, nesting_level: u32) -> Self {
        Self {
            kind: MemberKind::User,
            display_name: user.display_name,
            email: user.mail.filter(|mail| !mail.trim().is_empty()),
            object_id: user.id,
            job_title: user.job_title,
            department: user.department,
            account_enabled: user.account_enabled,
            parent_group_id: parent.id.clone(),
            parent_group_name: parent.display_name.clone(),
            nesting_level,
        }
    }

    /// Builds a group record for a nested group edge.
    #[must_use]
    pub fn group(group: &GroupRef, parent: &GroupRef, nesting_level: u32) -> Self {
        Self {
            kind: MemberKind::Group,
            display_name: group.display_name.clone(),
            email: None,
            object_id: group.id.clone(),
            job_title: None,
            department: None,
            account_enabled: None,
            parent_group_id: parent.id.clone(),
            parent_group_name: parent.display_name.clone(),
            nesting_level,
        }
    }

    /// Returns `true` for user records.
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.kind == MemberKind::User
    }
}

/// A user handed to the breach verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToCheck {
    /// Mail address to look up.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Department, if known.
    pub department: Option<String>,
    /// Name of the group the user was found in.
    pub parent_group: String,
}

/// A raw breach entry as returned by the breach lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BreachRecord {
    /// Breach name.
    #[serde(default)]
    pub name: Option<String>,
    /// Date of the breach, as reported.
    #[serde(default)]
    pub breach_date: Option<String>,
    /// Kinds of data exposed.
    #[serde(default)]
    pub data_classes: Option<Vec<String>>,
}

/// Classification of a single verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreachStatus {
    /// Checked, no named breaches.
    Clean,
    /// Checked, at least one named breach.
    Breached,
    /// The lookup failed.
    Error,
}

impl BreachStatus {
    /// Label used in logs and the report.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::Breached => "Breached",
            Self::Error => "Error",
        }
    }
}

/// A normalized breach entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachEntry {
    /// Breach name (never empty).
    pub name: String,
    /// Breach date or `"Unknown"`.
    pub date: String,
    /// Comma-joined data classes or `"Not specified"`.
    pub data_exposed: String,
}

/// Outcome of checking one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachOutcome {
    /// Mail address checked.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Department, if known.
    pub department: Option<String>,
    /// Group the user was found in.
    pub parent_group: String,
    /// Classification.
    pub status: BreachStatus,
    /// Always equal to `breaches.len()`.
    pub breach_count: usize,
    /// Named breaches in lookup order.
    pub breaches: Vec<BreachEntry>,
    /// Lookup failure message, set only for [`BreachStatus::Error`].
    pub error: Option<String>,
}
