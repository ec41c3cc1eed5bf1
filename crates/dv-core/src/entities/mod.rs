//! Entity and payload structs for all datviz domain objects.

mod admin;
mod dataset;
mod project;
mod summary;
mod user;

pub use admin::{ActivityLog, AdminStats};
pub use dataset::{ColumnSet, DataPreview, PreviewRow, UploadResult};
pub use project::{Project, ProjectCreate, ProjectUpdate};
pub use summary::{CheckIssueCount, SummaryPayload};
pub use user::{User, UserCreate};
