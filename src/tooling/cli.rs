//! CLI Tooling
//!
//! `folio show` mirrors a directory into a workspace and prints the tree;
//! `folio replay` runs an operation script against a workspace.

use crate::config::{ConfigLoader, FolioConfig};
use crate::error::ApiError;
use crate::ingest::{ingest_directory, FsContentReader, IngestReport};
use crate::logging::LoggingConfig;
use crate::presentation::{render_json, render_table, render_text, rows};
use crate::script::{ReplayReport, Script};
use crate::workspace::Workspace;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;

/// Folio CLI - project file tree
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Inspect and script an in-memory project file tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a directory as a workspace and print its tree
    Show {
        /// Directory to mirror
        dir: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Open every folder before printing
        #[arg(long)]
        expand: bool,
        /// Disable colored text output
        #[arg(long)]
        no_color: bool,
    },
    /// Replay an operation script (yaml, json or toml)
    Replay {
        /// Script file
        script: PathBuf,
        /// Directory to load before replaying
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// Fold the logging flags into the loaded configuration.
    pub fn apply_logging_overrides(&self, logging: &mut LoggingConfig) {
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

/// CLI context for command execution
pub struct CliContext {
    config: FolioConfig,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self { config })
    }

    pub fn from_config(config: FolioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut FolioConfig {
        &mut self.config
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        match command {
            Commands::Show {
                dir,
                format,
                expand,
                no_color,
            } => {
                let color = !no_color && std::io::stdout().is_terminal();
                runtime.block_on(self.handle_show(dir, *format, *expand, color))
            }
            Commands::Replay {
                script,
                dir,
                format,
            } => runtime.block_on(self.handle_replay(script, dir.as_deref(), *format)),
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::Serialization(e.to_string())),
        }
    }

    async fn handle_show(
        &self,
        dir: &Path,
        format: OutputFormat,
        expand: bool,
        color: bool,
    ) -> Result<String, ApiError> {
        let (mut workspace, report) = self.load_directory(dir).await?;
        if expand {
            workspace.expand_all();
        }
        let body = match format {
            OutputFormat::Json => render_json(&workspace.store().to_views())?,
            OutputFormat::Table => render_table(&rows(&workspace)),
            OutputFormat::Text => render_text(&rows(&workspace), color),
        };
        Ok(with_ingest_summary(body, &report, format))
    }

    async fn handle_replay(
        &self,
        script_path: &Path,
        dir: Option<&Path>,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let script = Script::load(script_path)?;
        let mut workspace = match dir {
            Some(dir) => self.load_directory(dir).await?.0,
            None => Workspace::new(&self.config),
        };
        let report = script.run(&mut workspace).await;

        match format {
            OutputFormat::Json => {
                let out = json!({
                    "applied": report.applied,
                    "failures": report.failures,
                    "selected": workspace.selection().id(),
                    "tree": workspace.store().to_views(),
                });
                Ok(serde_json::to_string_pretty(&out)?)
            }
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                render_table(&rows(&workspace)),
                replay_summary(&report)
            )),
            OutputFormat::Text => Ok(format!(
                "{}{}",
                render_text(&rows(&workspace), false),
                replay_summary(&report)
            )),
        }
    }

    async fn load_directory(&self, dir: &Path) -> Result<(Workspace, IngestReport), ApiError> {
        if !dir.is_dir() {
            return Err(ApiError::PathNotFound(dir.display().to_string()));
        }
        let mut workspace = Workspace::new(&self.config);
        let report = ingest_directory(&mut workspace, &FsContentReader, dir, None).await?;
        info!(
            dir = %dir.display(),
            files = report.inserted.len(),
            failed = report.failure_count(),
            "Loaded directory"
        );
        // Treat the mirrored tree as the initial load so the default selection applies.
        let store = workspace.store().clone();
        workspace.load(store);
        Ok((workspace, report))
    }
}

fn with_ingest_summary(body: String, report: &IngestReport, format: OutputFormat) -> String {
    if format == OutputFormat::Json || report.failures.is_empty() {
        return body;
    }
    let mut out = body;
    out.push_str(&format!("\n{} file(s) could not be read:\n", report.failure_count()));
    for failure in &report.failures {
        out.push_str(&format!("  {}: {}\n", failure.name, failure.reason));
    }
    out
}

fn replay_summary(report: &ReplayReport) -> String {
    let mut out = format!(
        "\nApplied {} step(s), {} rejected\n",
        report.applied,
        report.failures.len()
    );
    for failure in &report.failures {
        out.push_str(&format!(
            "  step {} ({}): {}\n",
            failure.index + 1,
            failure.op,
            failure.reason
        ));
    }
    out
}
