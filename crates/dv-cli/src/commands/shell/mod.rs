//! `dvz shell`: an interactive workflow session.
//!
//! Input lines and completed service calls are multiplexed in one
//! `tokio::select!` loop. Remote calls run on spawned tasks and report back
//! over a channel tagged with the session they were started in, so a
//! `select` or `logout` issued while a call is in flight turns its response
//! stale instead of blocking the prompt.

mod parse;

use std::future::Future;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use dv_checks::{FieldEdit, WireConfig};
use dv_client::{ApiClient, ClientError};
use dv_config::DatvizConfig;
use dv_core::entities::{Project, SummaryPayload, UploadResult};
use dv_core::responses::{MessageResponse, ReportFile, RunChecksResponse};
use dv_workflow::{Section, SessionTag, Workbench, WorkflowError};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared;
use crate::context;
use crate::output::{self, dashboard, form, output};

use self::parse::{HELP, ShellCommand};

/// A finished service call, tagged with the session that issued it.
enum Outcome {
    Projects(Result<Vec<Project>, ClientError>),
    Upload(SessionTag, Result<UploadResult, ClientError>),
    Defaults(SessionTag, Result<WireConfig, ClientError>),
    Submit(SessionTag, Result<MessageResponse, ClientError>),
    Run(SessionTag, Result<RunChecksResponse, ClientError>),
    Summary(SessionTag, Result<SummaryPayload, ClientError>),
    Download(SessionTag, Result<ReportFile, ClientError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
    SignedOut,
}

#[derive(Serialize)]
struct Status<'a> {
    user: Option<&'a str>,
    project: Option<&'a str>,
    section: Option<Section>,
    columns: usize,
    has_columns: bool,
    issues_ready: bool,
    summary_ready: bool,
}

struct Shell {
    client: ApiClient,
    bench: Workbench,
    projects: Vec<Project>,
    outcomes: mpsc::Sender<Outcome>,
    download_dir: PathBuf,
    preview_rows: usize,
    format: OutputFormat,
    quiet: bool,
}

pub async fn handle(config: &DatvizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = context::authenticated_client(config)?;
    let mut bench = Workbench::new();
    bench.signed_in(context::current_user(&client).await?);
    bench.set_registry(shared::load_registry(&client).await);

    let (tx, mut rx) = mpsc::channel(16);
    let mut shell = Shell {
        client,
        bench,
        projects: Vec::new(),
        outcomes: tx,
        download_dir: PathBuf::from(&config.general.download_dir),
        preview_rows: config.general.preview_rows,
        format: flags.format,
        quiet: flags.quiet,
    };
    shell.fetch_projects();
    shell.flush();
    if !flags.quiet {
        println!("type 'help' for commands");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        shell.prompt();
        let flow = tokio::select! {
            line = lines.next_line() => match line.context("failed to read input")? {
                Some(line) => shell.command(&line),
                None => Flow::Quit,
            },
            Some(outcome) = rx.recv() => shell.outcome(outcome),
        };
        shell.flush();

        match flow {
            Flow::Continue => {}
            Flow::Quit => break,
            Flow::SignedOut => {
                dv_auth::logout()?;
                println!("signed out");
                break;
            }
        }
    }
    Ok(())
}

impl Shell {
    fn prompt(&self) {
        let label = match (self.bench.project(), self.bench.section()) {
            (Some(project), Some(section)) => format!("{}:{section}", project.name),
            _ => "no project".to_string(),
        };
        print!("dvz [{label}]> ");
        if let Err(error) = std::io::stdout().flush() {
            tracing::debug!(%error, "failed to flush prompt");
        }
    }

    fn flush(&mut self) {
        output::notifications(&self.bench.drain_notifications(), self.quiet);
    }

    fn command(&mut self, line: &str) -> Flow {
        match parse::parse(line) {
            Ok(Some(command)) => {
                let result = self.execute(command);
                settle(result)
            }
            Ok(None) => Flow::Continue,
            Err(message) => {
                eprintln!("{message}");
                Flow::Continue
            }
        }
    }

    fn execute(&mut self, command: ShellCommand) -> anyhow::Result<Flow> {
        match command {
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Projects => self.fetch_projects(),
            ShellCommand::Select(id) => {
                let project = self
                    .projects
                    .iter()
                    .find(|p| p.id == id)
                    .cloned()
                    .with_context(|| format!("no project {id}; run 'projects' to refresh"))?;
                println!("selected {}", project.name);
                self.bench.select_project(project);
            }
            ShellCommand::Upload(path) => {
                let (filename, bytes) = shared::read_dataset(&path)?;
                let tag = self.bench.begin_upload(&filename, bytes.len())?;
                println!("uploading {filename}");
                let client = self.client.clone();
                self.spawn(async move { Outcome::Upload(tag, client.upload(&filename, bytes).await) });
            }
            ShellCommand::Goto(section) => {
                self.bench.navigate(section)?;
                match section {
                    Section::Configure => self.show_form(),
                    Section::Download => self.show_dashboard(),
                    Section::Upload | Section::RunChecks => {}
                }
            }
            ShellCommand::Show => self.show_form(),
            ShellCommand::Set { path, value } => self.bench.edit_text(&path, &value)?,
            ShellCommand::Toggle {
                path,
                column,
                included,
            } => self.bench.edit(&FieldEdit::ToggleColumn {
                path,
                column,
                included,
            })?,
            ShellCommand::All(path) => self.bench.edit(&FieldEdit::SelectAll { path })?,
            ShellCommand::None(path) => self.bench.edit(&FieldEdit::SelectNone { path })?,
            ShellCommand::Defaults => {
                let tag = self.bench.begin_defaults()?;
                let client = self.client.clone();
                self.spawn(async move { Outcome::Defaults(tag, client.default_config().await) });
            }
            ShellCommand::Save => {
                let (tag, wire) = self.bench.begin_submit()?;
                tracing::debug!(fields = wire.len(), "submitting configuration");
                let client = self.client.clone();
                self.spawn(async move { Outcome::Submit(tag, client.configure_checks(&wire).await) });
            }
            ShellCommand::Run => {
                let tag = self.bench.begin_run()?;
                println!("running checks");
                let client = self.client.clone();
                self.spawn(async move { Outcome::Run(tag, client.identify_issues().await) });
            }
            ShellCommand::Dashboard => self.show_dashboard(),
            ShellCommand::Download(kind) => {
                let tag = self.bench.begin_download(kind)?;
                let client = self.client.clone();
                self.spawn(async move { Outcome::Download(tag, client.download_report(kind).await) });
            }
            ShellCommand::Status => self.show_status()?,
            ShellCommand::Logout => {
                self.bench.logout();
                self.client.clear_token();
                return Ok(Flow::SignedOut);
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn outcome(&mut self, outcome: Outcome) -> Flow {
        let result = match outcome {
            Outcome::Projects(result) => self.projects_loaded(result),
            Outcome::Upload(tag, result) => self
                .bench
                .finish_upload(tag, result)
                .map_err(Into::into)
                .and_then(|()| self.show_preview()),
            Outcome::Defaults(tag, result) => {
                self.bench.finish_defaults(tag, result).map_err(Into::into)
            }
            Outcome::Submit(tag, result) => {
                self.bench.finish_submit(tag, result).map_err(Into::into)
            }
            Outcome::Run(tag, result) => self
                .bench
                .finish_run(tag, result)
                .map_err(Into::into)
                .and_then(|()| self.fetch_summary()),
            Outcome::Summary(tag, result) => self
                .bench
                .finish_summary(tag, result)
                .map(|()| self.show_dashboard())
                .map_err(Into::into),
            Outcome::Download(tag, result) => self
                .bench
                .finish_download(tag, result)
                .map_err(Into::into)
                .and_then(|file| shared::save_report(&self.download_dir, &file))
                .map(|path| println!("saved {}", path.display())),
        };
        settle(result.map(|()| Flow::Continue))
    }

    fn spawn<F>(&self, call: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            if outcomes.send(call.await).await.is_err() {
                tracing::debug!("shell closed before a response arrived");
            }
        });
    }

    fn fetch_projects(&self) {
        let client = self.client.clone();
        self.spawn(async move { Outcome::Projects(client.list_projects().await) });
    }

    fn fetch_summary(&self) -> anyhow::Result<()> {
        let tag = self.bench.begin_summary()?;
        let client = self.client.clone();
        self.spawn(async move { Outcome::Summary(tag, client.summary().await) });
        Ok(())
    }

    fn projects_loaded(&mut self, result: Result<Vec<Project>, ClientError>) -> anyhow::Result<()> {
        match result {
            Ok(projects) => {
                self.projects = projects;
                if self.projects.is_empty() {
                    println!("no projects yet; create one with `dvz project create`");
                    return Ok(());
                }
                output(&self.projects, self.format)
            }
            Err(error) if error.is_auth_failure() => {
                self.bench.logout();
                eprintln!("Your session has expired. Please log in again.");
                Err(WorkflowError::AuthLost.into())
            }
            Err(error) => Err(error).context("failed to list projects"),
        }
    }

    fn show_form(&self) {
        print!("{}", form::render(&self.bench.render_form()));
    }

    fn show_dashboard(&self) {
        match self.bench.summary_view() {
            Some(view) => print!("{}", dashboard::render(&view)),
            None => println!("no summary loaded; run the checks first"),
        }
    }

    fn show_preview(&self) -> anyhow::Result<()> {
        if self.quiet || self.format != OutputFormat::Table {
            return Ok(());
        }
        let preview = self.bench.preview();
        output(&preview[..preview.len().min(self.preview_rows)], self.format)
    }

    fn show_status(&self) -> anyhow::Result<()> {
        let readiness = self.bench.readiness();
        output(
            &Status {
                user: self.bench.user().map(|u| u.username.as_str()),
                project: self.bench.project().map(|p| p.name.as_str()),
                section: self.bench.section(),
                columns: self.bench.columns().len(),
                has_columns: readiness.has_columns(),
                issues_ready: readiness.issues_ready(),
                summary_ready: readiness.summary_ready(),
            },
            self.format,
        )
    }
}

/// Turn a command or response failure into the next loop step.
fn settle(result: anyhow::Result<Flow>) -> Flow {
    let error = match result {
        Ok(flow) => return flow,
        Err(error) => error,
    };
    match error.downcast_ref::<WorkflowError>() {
        Some(WorkflowError::AuthLost) => Flow::SignedOut,
        Some(WorkflowError::StaleResponse) => {
            tracing::debug!("dropped a response from a previous session");
            Flow::Continue
        }
        // Already reported through a notification.
        Some(WorkflowError::Remote(_) | WorkflowError::Field(_)) => Flow::Continue,
        _ => {
            eprintln!("{error:#}");
            Flow::Continue
        }
    }
}
