//! Readiness flags for one project session.

use serde::Serialize;

/// Which pipeline outputs are available.
///
/// `issues_ready` and `summary_ready` need a completed check run, which
/// needs columns. A new upload clears every run output; a new run clears
/// the summary until that run's summary is fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowReadiness {
    has_columns: bool,
    issues_ready: bool,
    summary_ready: bool,
    #[serde(skip)]
    run_completed: bool,
}

impl WorkflowReadiness {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            has_columns: false,
            issues_ready: false,
            summary_ready: false,
            run_completed: false,
        }
    }

    /// Upload succeeded.
    #[must_use]
    pub const fn has_columns(self) -> bool {
        self.has_columns
    }

    /// A check run completed and produced the issues report.
    #[must_use]
    pub const fn issues_ready(self) -> bool {
        self.issues_ready
    }

    /// The run's summary payload was fetched and parsed.
    #[must_use]
    pub const fn summary_ready(self) -> bool {
        self.summary_ready
    }

    /// A check run completed, whether or not it produced the issues report.
    #[must_use]
    pub const fn run_completed(self) -> bool {
        self.run_completed
    }

    /// Clear every flag.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// A new dataset was uploaded: earlier run outputs no longer apply.
    pub const fn mark_uploaded(&mut self) {
        self.reset();
        self.has_columns = true;
    }

    /// Record a completed run. Ignored without columns.
    ///
    /// The previous run's summary no longer describes the data on the
    /// server, so `summary_ready` drops until the new summary arrives.
    pub const fn mark_run_completed(&mut self, issues_report: bool) -> bool {
        if !self.has_columns {
            return false;
        }
        self.run_completed = true;
        self.issues_ready = self.issues_ready || issues_report;
        self.summary_ready = false;
        true
    }

    /// Record a parsed summary. Ignored before a completed run.
    pub const fn mark_summary_ready(&mut self) -> bool {
        if !self.run_completed {
            return false;
        }
        self.summary_ready = true;
        true
    }
}
