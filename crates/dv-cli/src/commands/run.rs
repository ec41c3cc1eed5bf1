//! `dvz run`: one pass through the whole workflow.

use std::path::PathBuf;

use anyhow::Context;
use dv_checks::FieldEdit;
use dv_client::ApiClient;
use dv_config::DatvizConfig;
use dv_core::enums::ReportKind;
use dv_workflow::{Section, SummaryView, Workbench, WorkflowError};
use serde::Serialize;

use crate::cli::root_commands::RunArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared;
use crate::context;
use crate::output::{self, dashboard, output};
use crate::progress::with_spinner;

#[derive(Serialize)]
struct RunReport {
    project: String,
    columns: Vec<String>,
    issues_ready: bool,
    summary_ready: bool,
    summary: Option<SummaryView>,
    downloads: Vec<PathBuf>,
}

pub async fn handle(args: &RunArgs, config: &DatvizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = context::authenticated_client(config)?;
    let mut bench = Workbench::new();
    bench.signed_in(context::current_user(&client).await?);
    bench.set_registry(shared::load_registry(&client).await);

    let project = client
        .project(args.project)
        .await
        .with_context(|| format!("project {} is not available", args.project))?;
    bench.select_project(project);

    let result = drive(&client, &mut bench, args, config, flags).await;
    output::notifications(&bench.drain_notifications(), flags.quiet);
    if matches!(
        result.as_ref().err().and_then(|e| e.downcast_ref::<WorkflowError>()),
        Some(WorkflowError::AuthLost)
    ) {
        dv_auth::logout()?;
    }
    let report = result?;

    if flags.format == OutputFormat::Table {
        if let Some(view) = &report.summary {
            print!("{}", dashboard::render(view));
        }
        for path in &report.downloads {
            println!("saved {}", path.display());
        }
        return Ok(());
    }
    output(&report, flags.format)
}

async fn drive(
    client: &ApiClient,
    bench: &mut Workbench,
    args: &RunArgs,
    config: &DatvizConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<RunReport> {
    let (filename, bytes) = shared::read_dataset(&args.file)?;
    let tag = bench.begin_upload(&filename, bytes.len())?;
    let uploaded = with_spinner(&format!("Uploading {filename}"), client.upload(&filename, bytes)).await;
    bench.finish_upload(tag, uploaded)?;
    if flags.format == OutputFormat::Table && !flags.quiet {
        let shown = bench.preview().len().min(config.general.preview_rows);
        output(&bench.preview()[..shown], flags.format)?;
    }

    bench.navigate(Section::Configure)?;
    if args.defaults {
        let tag = bench.begin_defaults()?;
        bench.finish_defaults(tag, client.default_config().await)?;
    }
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let values: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a JSON object", path.display()))?;
        for (key, value) in values {
            bench.edit(&FieldEdit::SetScalar { key, value })?;
        }
    }
    for assignment in &args.set {
        let (path, value) = shared::parse_assignment(assignment)?;
        bench.edit_text(&path, value)?;
    }

    let (tag, wire) = bench.begin_submit()?;
    tracing::debug!(fields = wire.len(), "submitting configuration");
    bench.finish_submit(tag, client.configure_checks(&wire).await)?;

    bench.navigate(Section::RunChecks)?;
    let tag = bench.begin_run()?;
    let ran = with_spinner("Running checks", client.identify_issues()).await;
    bench.finish_run(tag, ran)?;

    bench.navigate(Section::Download)?;
    let tag = bench.begin_summary()?;
    match bench.finish_summary(tag, client.summary().await) {
        Ok(()) | Err(WorkflowError::Remote(_)) => {}
        Err(error) => return Err(error.into()),
    }

    let dir = args
        .download_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.general.download_dir));
    let mut downloads = Vec::new();
    for kind in [ReportKind::Issues, ReportKind::Summary] {
        if !bench.download_enabled(kind) {
            continue;
        }
        let tag = bench.begin_download(kind)?;
        match bench.finish_download(tag, client.download_report(kind).await) {
            Ok(file) => downloads.push(shared::save_report(&dir, &file)?),
            Err(WorkflowError::Remote(error)) => {
                tracing::warn!(%kind, %error, "report download failed");
            }
            Err(error) => return Err(error.into()),
        }
    }

    let readiness = bench.readiness();
    Ok(RunReport {
        project: bench.project().map(|p| p.name.clone()).unwrap_or_default(),
        columns: bench.columns().to_vec(),
        issues_ready: readiness.issues_ready(),
        summary_ready: readiness.summary_ready(),
        summary: bench.summary_view(),
        downloads,
    })
}
