//! Session façade over the workflow pieces.
//!
//! The caller performs every remote call itself. Each call is split in two:
//! `begin_*` checks the guards and returns the [`SessionTag`] to carry along,
//! `finish_*` takes the tag back with the call's result and applies it only
//! if the session is still current.

use dv_checks::{
    CheckConfigModel, CheckSchemaRegistry, ConfigForm, FieldEdit, FieldPath, FieldView,
    WireConfig,
};
use dv_client::ClientError;
use dv_core::entities::{ColumnSet, PreviewRow, Project, SummaryPayload, UploadResult, User};
use dv_core::enums::ReportKind;
use dv_core::responses::{MessageResponse, ReportFile, RunChecksResponse};

use crate::error::WorkflowError;
use crate::machine::{Section, WorkflowStateMachine};
use crate::notify::{Notification, Notifications};
use crate::project::{ProjectContext, SessionTag};
use crate::readiness::WorkflowReadiness;
use crate::summary::SummaryView;
use crate::upload::check_upload;

const SUMMARY_FALLBACK: &str = "Checks completed. Go to Download to get the reports.";

/// All client session state for one signed-in user.
#[derive(Debug, Default)]
pub struct Workbench {
    user: Option<User>,
    context: ProjectContext,
    machine: WorkflowStateMachine,
    registry: CheckSchemaRegistry,
    columns: ColumnSet,
    preview: Vec<PreviewRow>,
    model: CheckConfigModel,
    summary: Option<SummaryPayload>,
    notifications: Notifications,
}

impl Workbench {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- accessors ----------------------------------------------------------

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn project(&self) -> Option<&Project> {
        self.context.project()
    }

    #[must_use]
    pub const fn section(&self) -> Option<Section> {
        self.machine.section()
    }

    #[must_use]
    pub const fn machine(&self) -> &WorkflowStateMachine {
        &self.machine
    }

    #[must_use]
    pub const fn readiness(&self) -> WorkflowReadiness {
        self.machine.readiness()
    }

    #[must_use]
    pub const fn registry(&self) -> &CheckSchemaRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    #[must_use]
    pub fn preview(&self) -> &[PreviewRow] {
        &self.preview
    }

    #[must_use]
    pub const fn model(&self) -> &CheckConfigModel {
        &self.model
    }

    #[must_use]
    pub const fn summary(&self) -> Option<&SummaryPayload> {
        self.summary.as_ref()
    }

    #[must_use]
    pub const fn download_enabled(&self, kind: ReportKind) -> bool {
        self.machine.download_enabled(kind)
    }

    /// Whether the admin views should be offered.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    /// Pending notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // -- session ------------------------------------------------------------

    pub fn signed_in(&mut self, user: User) {
        tracing::info!(user = %user.username, admin = user.is_admin, "signed in");
        self.user = Some(user);
    }

    /// Install the check catalog fetched for this session.
    pub fn set_registry(&mut self, registry: CheckSchemaRegistry) {
        if registry.is_empty() {
            self.notifications.info("No checks available.");
        }
        self.registry = registry;
    }

    /// Select `project`, discarding every piece of the previous session.
    pub fn select_project(&mut self, project: Project) -> SessionTag {
        let tag = self.context.select(project);
        self.machine.select_project();
        self.clear_session_data();
        tag
    }

    /// Return to the signed-out state.
    ///
    /// The stored credential is owned by the caller and must be removed there.
    pub fn logout(&mut self) {
        self.context.clear();
        self.machine.logout();
        self.clear_session_data();
        self.user = None;
        self.registry = CheckSchemaRegistry::empty();
    }

    /// Move to `section` if it is unlocked.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NoProject`] or [`WorkflowError::Locked`].
    pub fn navigate(&mut self, section: Section) -> Result<Section, WorkflowError> {
        self.machine.navigate(section)
    }

    // -- upload -------------------------------------------------------------

    /// Guard an upload of `len` bytes named `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NoProject`] or a client-side file rejection.
    pub fn begin_upload(&self, filename: &str, len: usize) -> Result<SessionTag, WorkflowError> {
        self.machine.require(Section::Upload)?;
        check_upload(filename, len)?;
        Ok(self.context.tag())
    }

    /// Apply an upload result. A failure leaves readiness unchanged; a
    /// success starts a new session, so responses to calls issued against
    /// the previous dataset are discarded as stale.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StaleResponse`], [`WorkflowError::AuthLost`],
    /// or the upload failure.
    pub fn finish_upload(
        &mut self,
        tag: SessionTag,
        result: Result<UploadResult, ClientError>,
    ) -> Result<(), WorkflowError> {
        self.ensure_current(tag)?;
        let upload = self.remote(result, "File upload failed")?;
        let columns = match ColumnSet::new(upload.columns) {
            Ok(columns) => columns,
            Err(error) => {
                self.notifications.error(format!("File upload failed: {error}"));
                return Err(error.into());
            }
        };

        tracing::info!(columns = columns.len(), "dataset uploaded");
        // Runs and summaries still in flight describe the previous dataset.
        self.context.renew();
        self.columns = columns;
        self.preview = upload.preview.unwrap_or_default();
        self.summary = None;
        self.machine.upload_succeeded();
        let message = if upload.message.is_empty() {
            "File uploaded successfully.".to_string()
        } else {
            upload.message
        };
        self.notifications.success(message);
        Ok(())
    }

    // -- configuration ------------------------------------------------------

    /// Apply one validated edit. A rejected edit leaves the model untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Locked`] before an upload, or
    /// [`WorkflowError::Field`] if the edit does not fit its field.
    pub fn edit(&mut self, edit: &FieldEdit) -> Result<(), WorkflowError> {
        self.machine.require(Section::Configure)?;
        let form = ConfigForm::new(&self.registry, &self.columns);
        match form.apply(&self.model, edit) {
            Ok(model) => {
                self.model = model;
                Ok(())
            }
            Err(error) => {
                self.notifications.error(error.to_string());
                Err(error.into())
            }
        }
    }

    /// Parse `text` for the field at `path` and store it.
    ///
    /// # Errors
    ///
    /// As [`edit`](Self::edit), plus parse failures.
    pub fn edit_text(&mut self, path: &FieldPath, text: &str) -> Result<(), WorkflowError> {
        self.machine.require(Section::Configure)?;
        let value = ConfigForm::new(&self.registry, &self.columns)
            .parse(path, text)
            .inspect_err(|error| self.notifications.error(error.to_string()))?;
        let edit = match path {
            FieldPath::Top(key) => FieldEdit::SetScalar {
                key: key.clone(),
                value,
            },
            FieldPath::Nested { group, child } => FieldEdit::SetNested {
                group: group.clone(),
                child: child.clone(),
                value,
            },
        };
        self.edit(&edit)
    }

    /// Guard a fetch of the service's default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Locked`] before an upload.
    pub fn begin_defaults(&self) -> Result<SessionTag, WorkflowError> {
        self.machine.require(Section::Configure)?;
        Ok(self.context.tag())
    }

    /// Replace the model with the service's default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StaleResponse`], [`WorkflowError::AuthLost`],
    /// or the fetch failure. The model is unchanged on error.
    pub fn finish_defaults(
        &mut self,
        tag: SessionTag,
        result: Result<WireConfig, ClientError>,
    ) -> Result<(), WorkflowError> {
        self.ensure_current(tag)?;
        let defaults = self.remote(result, "Failed to load default configuration")?;
        self.model = CheckConfigModel::from_wire_format(&defaults);
        self.notifications.info("Default configuration loaded.");
        Ok(())
    }

    /// Configuration views for the current model and columns.
    #[must_use]
    pub fn render_form(&self) -> Vec<FieldView> {
        self.model.render(&self.registry, &self.columns)
    }

    /// Guard a configuration submission and produce its body.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Locked`] before an upload.
    pub fn begin_submit(&self) -> Result<(SessionTag, WireConfig), WorkflowError> {
        self.machine.require(Section::Configure)?;
        Ok((self.context.tag(), self.model.to_wire_format(&self.registry)))
    }

    /// Record a submission result. The local model is kept either way.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StaleResponse`], [`WorkflowError::AuthLost`],
    /// or the submission failure.
    pub fn finish_submit(
        &mut self,
        tag: SessionTag,
        result: Result<MessageResponse, ClientError>,
    ) -> Result<(), WorkflowError> {
        self.ensure_current(tag)?;
        let response = self.remote(result, "Failed to save configuration")?;
        if !response.success {
            self.notifications
                .error(format!("Failed to save configuration: {}", response.message));
            return Err(WorkflowError::Remote(ClientError::Api {
                status: 200,
                detail: response.message,
            }));
        }
        self.notifications.success(if response.message.is_empty() {
            "Configuration saved.".to_string()
        } else {
            response.message
        });
        Ok(())
    }

    // -- checks -------------------------------------------------------------

    /// Guard a check run.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Locked`] until an upload has succeeded.
    pub fn begin_run(&self) -> Result<SessionTag, WorkflowError> {
        self.machine.require(Section::RunChecks)?;
        Ok(self.context.tag())
    }

    /// Record a check run. A failed run leaves the issues report locked.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StaleResponse`], [`WorkflowError::AuthLost`],
    /// or the run failure.
    pub fn finish_run(
        &mut self,
        tag: SessionTag,
        result: Result<RunChecksResponse, ClientError>,
    ) -> Result<(), WorkflowError> {
        self.ensure_current(tag)?;
        let response = self.remote(result, "Issue detection failed")?;
        self.summary = None;
        if !self.machine.run_succeeded(response.issues_report) {
            tracing::warn!("run finished without an uploaded dataset; ignored");
            return Err(WorkflowError::Locked {
                section: Section::RunChecks,
                reason: "upload a dataset first",
            });
        }
        tracing::info!(issues_report = response.issues_report, "checks completed");
        self.notifications.success(if response.message.is_empty() {
            "Issues identified successfully.".to_string()
        } else {
            response.message
        });
        Ok(())
    }

    /// Guard the summary fetch that follows a run.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::ReportUnavailable`] before a completed run.
    pub fn begin_summary(&self) -> Result<SessionTag, WorkflowError> {
        self.machine.require(Section::Download)?;
        if !self.readiness().run_completed() {
            return Err(WorkflowError::ReportUnavailable(ReportKind::Summary));
        }
        Ok(self.context.tag())
    }

    /// Store the run summary. On failure the dashboard stays empty and the
    /// textual "see Download" path is offered instead.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StaleResponse`], [`WorkflowError::AuthLost`],
    /// or the fetch failure.
    pub fn finish_summary(
        &mut self,
        tag: SessionTag,
        result: Result<SummaryPayload, ClientError>,
    ) -> Result<(), WorkflowError> {
        self.ensure_current(tag)?;
        let payload = match result {
            Ok(payload) => payload,
            Err(error) if error.is_auth_failure() => return Err(self.auth_lost(&error)),
            Err(error) => {
                tracing::warn!(%error, "summary fetch failed");
                self.notifications.info(SUMMARY_FALLBACK);
                return Err(error.into());
            }
        };
        if self.machine.summary_loaded() {
            self.summary = Some(payload);
        }
        Ok(())
    }

    /// Dashboard aggregates for the current summary.
    #[must_use]
    pub fn summary_view(&self) -> Option<SummaryView> {
        self.summary
            .as_ref()
            .map(|payload| SummaryView::derive(payload, self.preview.len()))
    }

    // -- downloads ----------------------------------------------------------

    /// Guard a report download.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::ReportUnavailable`] while the action is disabled.
    pub fn begin_download(&self, kind: ReportKind) -> Result<SessionTag, WorkflowError> {
        self.machine.require(Section::Download)?;
        if !self.machine.download_enabled(kind) {
            return Err(WorkflowError::ReportUnavailable(kind));
        }
        Ok(self.context.tag())
    }

    /// Hand back a downloaded report. Never changes readiness.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StaleResponse`], [`WorkflowError::AuthLost`],
    /// or the download failure.
    pub fn finish_download(
        &mut self,
        tag: SessionTag,
        result: Result<ReportFile, ClientError>,
    ) -> Result<ReportFile, WorkflowError> {
        self.ensure_current(tag)?;
        let file = self.remote(result, "Download failed")?;
        self.notifications
            .success(format!("Downloaded {}", file.filename));
        Ok(file)
    }

    // -- internals ----------------------------------------------------------

    fn clear_session_data(&mut self) {
        self.columns = ColumnSet::empty();
        self.preview.clear();
        self.model = CheckConfigModel::new();
        self.summary = None;
    }

    fn ensure_current(&self, tag: SessionTag) -> Result<(), WorkflowError> {
        if self.context.is_current(tag) {
            return Ok(());
        }
        tracing::warn!(
            response_generation = tag.generation(),
            current_generation = self.context.tag().generation(),
            "discarding response from a superseded session"
        );
        Err(WorkflowError::StaleResponse)
    }

    /// Unwrap a remote result, turning failures into notifications.
    fn remote<T>(&mut self, result: Result<T, ClientError>, prefix: &str) -> Result<T, WorkflowError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) if error.is_auth_failure() => Err(self.auth_lost(&error)),
            Err(error) => {
                tracing::warn!(%error, "{prefix}");
                self.notifications.error(format!("{prefix}: {}", error.detail()));
                Err(error.into())
            }
        }
    }

    fn auth_lost(&mut self, error: &ClientError) -> WorkflowError {
        tracing::warn!(%error, "token rejected; signing out");
        self.logout();
        self.notifications
            .error("Your session has expired. Please log in again.");
        WorkflowError::AuthLost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dv_core::enums::ProjectStatus;
    use dv_core::responses::CheckCatalogEntry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::notify::Severity;

    fn project(id: i64) -> Project {
        Project {
            id,
            name: format!("project-{id}"),
            description: None,
            status: ProjectStatus::Active,
            created_at: NaiveDate::from_ymd_opt(2025, 2, 1)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
                .unwrap(),
            config: None,
            project_uuid: None,
            owner_id: Some(1),
            updated_at: None,
        }
    }

    fn uploaded_bench() -> (Workbench, SessionTag) {
        let mut bench = Workbench::new();
        bench.set_registry(CheckSchemaRegistry::from_catalog(vec![CheckCatalogEntry {
            name: "MandatoryColumnsChecker".into(),
            description: String::new(),
            config_fields: vec!["mandatory_columns".into()],
        }]));
        bench.select_project(project(1));
        let tag = bench.begin_upload("data.csv", 12).unwrap();
        bench
            .finish_upload(
                tag,
                Ok(UploadResult {
                    message: String::new(),
                    columns: vec!["id".into(), "name".into()],
                    preview: None,
                }),
            )
            .unwrap();
        bench.drain_notifications();
        let tag = bench.context.tag();
        (bench, tag)
    }

    fn server_error() -> ClientError {
        ClientError::Api {
            status: 500,
            detail: "boom".into(),
        }
    }

    #[test]
    fn defaults_replace_the_model() {
        let (mut bench, _) = uploaded_bench();
        bench
            .edit_text(&FieldPath::top("mandatory_columns"), "name")
            .unwrap();
        let tag = bench.begin_defaults().unwrap();
        let mut defaults = WireConfig::new();
        defaults.insert("mandatory_columns".into(), json!(["id"]));
        defaults.insert("case_standardization".into(), json!("upper"));
        bench.finish_defaults(tag, Ok(defaults)).unwrap();
        assert_eq!(bench.model().get("mandatory_columns"), Some(&json!(["id"])));
        assert_eq!(bench.model().len(), 2);
    }

    #[test]
    fn failed_upload_keeps_readiness_and_notifies() {
        let mut bench = Workbench::new();
        bench.select_project(project(1));
        let tag = bench.begin_upload("data.csv", 3).unwrap();
        assert!(bench.finish_upload(tag, Err(server_error())).is_err());
        assert_eq!(bench.readiness(), WorkflowReadiness::new());
        assert_eq!(
            bench.drain_notifications(),
            vec![Notification {
                severity: Severity::Error,
                message: "File upload failed: boom".into()
            }]
        );
    }

    #[test]
    fn duplicate_columns_are_an_upload_failure() {
        let mut bench = Workbench::new();
        bench.select_project(project(1));
        let tag = bench.begin_upload("data.csv", 3).unwrap();
        let result = bench.finish_upload(
            tag,
            Ok(UploadResult {
                columns: vec!["a".into(), "a".into()],
                ..UploadResult::default()
            }),
        );
        assert!(matches!(result, Err(WorkflowError::Core(_))));
        assert!(!bench.readiness().has_columns());
    }

    #[test]
    fn failed_submission_keeps_the_model() {
        let (mut bench, _) = uploaded_bench();
        bench
            .edit(&FieldEdit::ToggleColumn {
                path: FieldPath::top("mandatory_columns"),
                column: "id".into(),
                included: true,
            })
            .unwrap();
        let (tag, wire) = bench.begin_submit().unwrap();
        assert_eq!(wire["mandatory_columns"], json!(["id"]));

        assert!(bench.finish_submit(tag, Err(server_error())).is_err());
        assert_eq!(bench.model().get("mandatory_columns"), Some(&json!(["id"])));
    }

    #[test]
    fn rejected_edit_notifies_and_keeps_model() {
        let (mut bench, _) = uploaded_bench();
        let result = bench.edit(&FieldEdit::ToggleColumn {
            path: FieldPath::top("mandatory_columns"),
            column: "zip".into(),
            included: true,
        });
        assert!(matches!(result, Err(WorkflowError::Field(_))));
        assert!(bench.model().is_empty());
        assert_eq!(bench.drain_notifications()[0].severity, Severity::Error);
    }

    #[test]
    fn failed_run_leaves_downloads_disabled() {
        let (mut bench, _) = uploaded_bench();
        let tag = bench.begin_run().unwrap();
        assert!(bench.finish_run(tag, Err(server_error())).is_err());
        assert!(!bench.download_enabled(ReportKind::Issues));
        assert_eq!(
            bench.drain_notifications()[0].message,
            "Issue detection failed: boom"
        );
    }

    #[test]
    fn summary_failure_offers_the_textual_path() {
        let (mut bench, _) = uploaded_bench();
        let tag = bench.begin_run().unwrap();
        bench.finish_run(tag, Ok(RunChecksResponse::default())).unwrap();
        let tag = bench.begin_summary().unwrap();
        assert!(bench.finish_summary(tag, Err(server_error())).is_err());

        assert!(bench.download_enabled(ReportKind::Issues));
        assert!(!bench.download_enabled(ReportKind::Summary));
        assert!(bench.summary_view().is_none());
        let notes = bench.drain_notifications();
        assert_eq!(notes.last().map(|n| n.message.as_str()), Some(SUMMARY_FALLBACK));
    }

    #[test]
    fn failed_summary_after_a_rerun_disables_the_old_summary() {
        let (mut bench, _) = uploaded_bench();
        let tag = bench.begin_run().unwrap();
        bench.finish_run(tag, Ok(RunChecksResponse::default())).unwrap();
        let tag = bench.begin_summary().unwrap();
        bench.finish_summary(tag, Ok(SummaryPayload::default())).unwrap();
        assert!(bench.download_enabled(ReportKind::Summary));

        let tag = bench.begin_run().unwrap();
        bench.finish_run(tag, Ok(RunChecksResponse::default())).unwrap();
        assert!(!bench.download_enabled(ReportKind::Summary));
        let tag = bench.begin_summary().unwrap();
        assert!(bench.finish_summary(tag, Err(server_error())).is_err());

        assert!(bench.download_enabled(ReportKind::Issues));
        assert!(!bench.download_enabled(ReportKind::Summary));
        assert!(bench.summary_view().is_none());
    }

    #[test]
    fn download_failure_does_not_touch_readiness() {
        let (mut bench, _) = uploaded_bench();
        let tag = bench.begin_run().unwrap();
        bench.finish_run(tag, Ok(RunChecksResponse::default())).unwrap();
        let before = bench.readiness();

        let tag = bench.begin_download(ReportKind::Issues).unwrap();
        assert!(bench.finish_download(tag, Err(server_error())).is_err());
        assert_eq!(bench.readiness(), before);
        assert!(matches!(
            bench.begin_download(ReportKind::Summary),
            Err(WorkflowError::ReportUnavailable(ReportKind::Summary))
        ));
    }

    #[test]
    fn auth_failure_signs_out() {
        let (mut bench, _) = uploaded_bench();
        let tag = bench.begin_run().unwrap();
        let result = bench.finish_run(
            tag,
            Err(ClientError::Unauthorized {
                status: 401,
                detail: "Could not validate credentials".into(),
            }),
        );
        assert!(matches!(result, Err(WorkflowError::AuthLost)));
        assert!(bench.project().is_none());
        assert!(bench.section().is_none());
        assert!(bench.columns().is_empty());
        assert!(bench.registry().is_empty());
    }

    #[test]
    fn locked_actions_are_refused_before_upload() {
        let mut bench = Workbench::new();
        assert!(matches!(bench.begin_upload("a.csv", 1), Err(WorkflowError::NoProject)));
        bench.select_project(project(1));
        assert!(matches!(bench.begin_run(), Err(WorkflowError::Locked { .. })));
        assert!(matches!(bench.begin_defaults(), Err(WorkflowError::Locked { .. })));
    }
}
