//! Status enums for datviz entities.
//!
//! All enums use `snake_case` serialization so they match the remote service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a server-side project.
///
/// ```text
/// active ⇄ archived → deleted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
    Deleted,
}

impl ProjectStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Archived, Self::Deleted],
            Self::Archived => &[Self::Active, Self::Deleted],
            Self::Deleted => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            "deleted" => Ok(Self::Deleted),
            other => Err(CoreError::Validation(format!(
                "unknown project status '{other}' (expected active, archived, or deleted)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ReportKind
// ---------------------------------------------------------------------------

/// The two downloadable artifacts of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Binary spreadsheet listing every detected issue.
    Issues,
    /// Structured JSON digest of the run.
    Summary,
}

impl ReportKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::Summary => "summary",
        }
    }

    /// Filename used when the server does not send `Content-Disposition`.
    #[must_use]
    pub const fn fallback_filename(self) -> &'static str {
        match self {
            Self::Issues => "data_issues.xlsx",
            Self::Summary => "data_issues.json",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "issues" | "xlsx" => Ok(Self::Issues),
            "summary" | "issues-summary" | "json" => Ok(Self::Summary),
            other => Err(CoreError::Validation(format!(
                "unknown report '{other}' (expected issues or summary)"
            ))),
        }
    }
}
