//! The selected project and the session tags that scope in-flight requests.

use dv_core::entities::Project;
use serde::Serialize;

/// Identifies the project session a remote call was issued in.
///
/// A response is applied only if its tag still matches the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionTag(u64);

impl SessionTag {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// At most one selected project, plus a generation counter bumped on every
/// change of session.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    project: Option<Project>,
    generation: u64,
}

impl ProjectContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            project: None,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Make `project` the selected one and start a new session.
    ///
    /// Re-selecting the current project also starts a new session.
    pub fn select(&mut self, project: Project) -> SessionTag {
        tracing::debug!(project_id = project.id, name = %project.name, "project selected");
        self.project = Some(project);
        self.bump()
    }

    /// Drop the selection, invalidating every outstanding tag.
    pub fn clear(&mut self) -> SessionTag {
        self.project = None;
        self.bump()
    }

    /// Start a new session for the same project, invalidating every
    /// outstanding tag. Used when a new dataset replaces the old one.
    pub fn renew(&mut self) -> SessionTag {
        tracing::debug!(generation = self.generation, "session renewed");
        self.bump()
    }

    /// Tag for a request issued now.
    #[must_use]
    pub const fn tag(&self) -> SessionTag {
        SessionTag(self.generation)
    }

    #[must_use]
    pub const fn is_current(&self, tag: SessionTag) -> bool {
        tag.0 == self.generation
    }

    const fn bump(&mut self) -> SessionTag {
        self.generation = self.generation.wrapping_add(1);
        SessionTag(self.generation)
    }
}
