//! # dv-workflow
//!
//! Client-side orchestration of the datviz pipeline:
//! upload → configure checks → run checks → review → download reports.
//!
//! - [`WorkflowReadiness`] holds the three readiness flags and only resets
//!   as a unit.
//! - [`WorkflowStateMachine`] tracks the active [`Section`] and which
//!   sections and downloads are unlocked. It never advances on its own.
//! - [`ProjectContext`] scopes all session state to the selected project and
//!   issues [`SessionTag`]s so late responses from a superseded session are
//!   discarded.
//! - [`SummaryView`] derives dashboard aggregates from a summary payload.
//! - [`Workbench`] ties these together around remote calls made by the caller.

mod error;
mod machine;
mod notify;
mod project;
mod readiness;
mod summary;
mod upload;
mod workbench;

pub use error::WorkflowError;
pub use machine::{Section, WorkflowState, WorkflowStateMachine};
pub use notify::{Notification, Notifications, Severity};
pub use project::{ProjectContext, SessionTag};
pub use readiness::WorkflowReadiness;
pub use summary::{SummaryRow, SummaryView, bar_widths};
pub use upload::{SUPPORTED_EXTENSIONS, check_upload};
pub use workbench::Workbench;
