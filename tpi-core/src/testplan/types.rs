//! Parsed test plan item model

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// A validated test plan item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTestPlanItem {
    /// Byte range of the header (everything before the horizontal rule)
    pub header_range: Range<usize>,
    /// Issues listed on the `Refs:` line, left to right
    pub issue_refs: Vec<IssueRef>,
    /// Complexity between 1 and 5 (defaults to 3)
    pub complexity: u8,
    /// One entry per recognized checkbox, in scan order
    pub assignments: Vec<PlatformAssignment>,
    /// Issue author first, then `Authors:` handles, without duplicates
    pub authors: Vec<String>,
    /// Recognized tester roles; `None` when the field is absent or empty
    pub roles: Option<Vec<TesterRole>>,
}

impl ParsedTestPlanItem {
    /// Number of assignments targeting `platform`
    pub fn assignment_count(&self, platform: Platform) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.platform == platform)
            .count()
    }

    /// Whether every assignment has been checked off by its assignee
    pub fn is_complete(&self) -> bool {
        self.assignments.iter().all(|a| a.checked)
    }
}

/// One platform checkbox line in the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformAssignment {
    pub platform: Platform,
    /// `[x]` with an attached user
    pub checked: bool,
    /// Assignee handle without the leading `@`
    pub user: Option<String>,
    /// Span of `@user` (plus trailing whitespace), or an empty span where a
    /// user would be inserted
    pub user_range: Range<usize>,
    /// Whole line containing the checkbox, excluding the line ending
    pub range: Range<usize>,
}

/// Reference to another issue from the `Refs:` field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssueRef {
    /// `#123` in the same repository
    Number(u64),
    /// Full `https://github.com/<owner>/<repo>/issues/<n>` URL
    Url(String),
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueRef::Number(n) => write!(f, "#{}", n),
            IssueRef::Url(url) => f.write_str(url),
        }
    }
}

/// Tester roles that can be requested on the `Roles:` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TesterRole {
    #[serde(rename = "Content Developer")]
    ContentDeveloper,
    #[serde(rename = "Developer")]
    Developer,
    #[serde(rename = "Designer")]
    Designer,
    #[serde(rename = "Engineering Manager")]
    EngineeringManager,
    #[serde(rename = "Program Manager")]
    ProgramManager,
}

impl TesterRole {
    pub const ALL: [TesterRole; 5] = [
        TesterRole::ContentDeveloper,
        TesterRole::Developer,
        TesterRole::Designer,
        TesterRole::EngineeringManager,
        TesterRole::ProgramManager,
    ];

    /// Display name as written in issue bodies
    pub fn name(&self) -> &'static str {
        match self {
            TesterRole::ContentDeveloper => "Content Developer",
            TesterRole::Developer => "Developer",
            TesterRole::Designer => "Designer",
            TesterRole::EngineeringManager => "Engineering Manager",
            TesterRole::ProgramManager => "Program Manager",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TesterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
