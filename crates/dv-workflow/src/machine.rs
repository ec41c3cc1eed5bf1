//! Section navigation and unlock rules.
//!
//! ```text
//! NoProject --select--> ProjectSelected(Upload)
//! ProjectSelected(*) --select(new)--> ProjectSelected(Upload)   [resets readiness]
//! ProjectSelected(*) --navigate(s)--> ProjectSelected(s)        [if s is unlocked]
//! any --logout--> NoProject
//! ```
//!
//! The machine never moves between sections by itself; events only unlock
//! or lock sections and download actions.

use std::fmt;
use std::str::FromStr;

use dv_core::enums::ReportKind;
use serde::Serialize;

use crate::error::WorkflowError;
use crate::readiness::WorkflowReadiness;

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// One stage of the pipeline a user can visit once a project is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Upload,
    Configure,
    RunChecks,
    Download,
}

impl Section {
    pub const ALL: [Self; 4] = [Self::Upload, Self::Configure, Self::RunChecks, Self::Download];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Configure => "configure",
            Self::RunChecks => "run-checks",
            Self::Download => "download",
        }
    }

    /// Whether the section needs an uploaded dataset.
    #[must_use]
    pub const fn requires_columns(self) -> bool {
        !matches!(self, Self::Upload)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upload" => Ok(Self::Upload),
            "configure" | "config" => Ok(Self::Configure),
            "run-checks" | "run_checks" | "run" => Ok(Self::RunChecks),
            "download" | "downloads" => Ok(Self::Download),
            other => Err(format!(
                "unknown section '{other}' (expected upload, configure, run-checks, or download)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "section", rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    NoProject,
    ProjectSelected(Section),
}

// ---------------------------------------------------------------------------
// WorkflowStateMachine
// ---------------------------------------------------------------------------

/// Active section plus readiness for the current project session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowStateMachine {
    state: WorkflowState,
    readiness: WorkflowReadiness,
}

impl WorkflowStateMachine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: WorkflowState::NoProject,
            readiness: WorkflowReadiness::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> WorkflowState {
        self.state
    }

    #[must_use]
    pub const fn readiness(&self) -> WorkflowReadiness {
        self.readiness
    }

    /// The active section, if a project is selected.
    #[must_use]
    pub const fn section(&self) -> Option<Section> {
        match self.state {
            WorkflowState::NoProject => None,
            WorkflowState::ProjectSelected(section) => Some(section),
        }
    }

    /// Enter a (new) project session at `Upload` with cleared readiness.
    pub const fn select_project(&mut self) {
        self.state = WorkflowState::ProjectSelected(Section::Upload);
        self.readiness.reset();
    }

    /// Return to the unauthenticated, project-less state.
    pub const fn logout(&mut self) {
        self.state = WorkflowState::NoProject;
        self.readiness.reset();
    }

    /// Whether `section` may be entered now.
    #[must_use]
    pub const fn is_unlocked(&self, section: Section) -> bool {
        match self.state {
            WorkflowState::NoProject => false,
            WorkflowState::ProjectSelected(_) => {
                !section.requires_columns() || self.readiness.has_columns()
            }
        }
    }

    /// Move to `section`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NoProject`] without a project and
    /// [`WorkflowError::Locked`] before a successful upload.
    pub fn navigate(&mut self, section: Section) -> Result<Section, WorkflowError> {
        if self.state == WorkflowState::NoProject {
            return Err(WorkflowError::NoProject);
        }
        if !self.is_unlocked(section) {
            return Err(WorkflowError::Locked {
                section,
                reason: "upload a dataset first",
            });
        }
        self.state = WorkflowState::ProjectSelected(section);
        Ok(section)
    }

    /// Whether the download action for `kind` is enabled.
    #[must_use]
    pub const fn download_enabled(&self, kind: ReportKind) -> bool {
        if !self.is_unlocked(Section::Download) {
            return false;
        }
        match kind {
            ReportKind::Issues => self.readiness.issues_ready(),
            ReportKind::Summary => self.readiness.summary_ready(),
        }
    }

    /// Require `section` to be unlocked without moving to it.
    ///
    /// # Errors
    ///
    /// As [`navigate`](Self::navigate).
    pub fn require(&self, section: Section) -> Result<(), WorkflowError> {
        let mut probe = *self;
        probe.navigate(section).map(|_| ())
    }

    pub const fn upload_succeeded(&mut self) {
        self.readiness.mark_uploaded();
    }

    pub const fn run_succeeded(&mut self, issues_report: bool) -> bool {
        self.readiness.mark_run_completed(issues_report)
    }

    pub const fn summary_loaded(&mut self) -> bool {
        self.readiness.mark_summary_ready()
    }
}
