//! Scripted replay
//!
//! A script is a list of workspace operations addressed by slash-separated
//! path rather than id. Steps run in order; a rejected step is recorded and
//! the run continues with the next one.

use crate::error::{ApiError, TreeError};
use crate::ingest::{MemoryContentReader, Upload};
use crate::types::NodeId;
use crate::workspace::{Key, Workspace};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// One replayable operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateFile {
        name: String,
        #[serde(default)]
        parent: Option<String>,
    },
    CreateFolder {
        name: String,
        #[serde(default)]
        parent: Option<String>,
    },
    Rename {
        path: String,
        name: String,
    },
    Delete {
        path: String,
    },
    Move {
        path: String,
        into: String,
    },
    Select {
        path: String,
        #[serde(default)]
        focus: bool,
    },
    Toggle {
        path: String,
    },
    ExpandAll,
    CollapseAll,
    Key {
        key: Key,
    },
    Ingest {
        #[serde(default)]
        parent: Option<String>,
        files: Vec<InlineFile>,
    },
}

/// Upload carried inline in the script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineFile {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Rejected step and why
#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    pub index: usize,
    pub op: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub failures: Vec<StepFailure>,
}

impl Script {
    /// Parse by extension: `.yaml`/`.yml`, `.json` or `.toml`.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml(&text),
            "json" => Ok(serde_json::from_str(&text)?),
            "toml" => Ok(toml::from_str(&text)?),
            other => Err(ApiError::Serialization(format!(
                "Unsupported script format '{}' for {}",
                other,
                path.display()
            ))),
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self, ApiError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply every step to `workspace`.
    pub async fn run(&self, workspace: &mut Workspace) -> ReplayReport {
        let mut report = ReplayReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            match apply_step(workspace, step).await {
                Ok(()) => report.applied += 1,
                Err(e) => {
                    warn!(index, op = step.op_name(), error = %e, "Script step rejected");
                    report.failures.push(StepFailure {
                        index,
                        op: step.op_name(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        info!(
            applied = report.applied,
            failed = report.failures.len(),
            "Script replay finished"
        );
        report
    }
}

impl Step {
    pub fn op_name(&self) -> &'static str {
        match self {
            Step::CreateFile { .. } => "create_file",
            Step::CreateFolder { .. } => "create_folder",
            Step::Rename { .. } => "rename",
            Step::Delete { .. } => "delete",
            Step::Move { .. } => "move",
            Step::Select { .. } => "select",
            Step::Toggle { .. } => "toggle",
            Step::ExpandAll => "expand_all",
            Step::CollapseAll => "collapse_all",
            Step::Key { .. } => "key",
            Step::Ingest { .. } => "ingest",
        }
    }
}

async fn apply_step(workspace: &mut Workspace, step: &Step) -> Result<(), ApiError> {
    match step {
        Step::CreateFile { name, parent } => {
            let parent = resolve_parent(workspace, parent.as_deref())?;
            workspace.create_file(name, parent.as_ref())?;
        }
        Step::CreateFolder { name, parent } => {
            let parent = resolve_parent(workspace, parent.as_deref())?;
            workspace.create_folder(name, parent.as_ref())?;
        }
        Step::Rename { path, name } => {
            let id = resolve(workspace, path)?;
            workspace.rename(&id, name)?;
        }
        Step::Delete { path } => {
            let id = resolve(workspace, path)?;
            workspace.delete(&id)?;
        }
        Step::Move { path, into } => {
            let id = resolve(workspace, path)?;
            let target = resolve(workspace, into)?;
            workspace.move_node(&id, &target)?;
        }
        Step::Select { path, focus } => {
            let id = resolve(workspace, path)?;
            workspace.select(&id, *focus)?;
        }
        Step::Toggle { path } => {
            let id = resolve(workspace, path)?;
            workspace.toggle_folder(&id)?;
        }
        Step::ExpandAll => workspace.expand_all(),
        Step::CollapseAll => workspace.collapse_all(),
        Step::Key { key } => {
            workspace.navigate(*key);
        }
        Step::Ingest { parent, files } => {
            let parent = resolve_parent(workspace, parent.as_deref())?;
            let uploads: Vec<Upload> = files
                .iter()
                .map(|f| Upload::from_bytes(f.name.clone(), f.content.as_bytes()))
                .collect();
            let report = workspace
                .upload(&MemoryContentReader, &uploads, parent.as_ref())
                .await?;
            if let Some(first) = report.failures.first() {
                return Err(ApiError::Serialization(format!(
                    "{} of {} upload(s) failed, first: {}",
                    report.failure_count(),
                    files.len(),
                    first.reason
                )));
            }
        }
    }
    Ok(())
}

fn resolve(workspace: &Workspace, path: &str) -> Result<NodeId, ApiError> {
    workspace
        .store()
        .find_by_path(path)
        .map(|n| n.id().clone())
        .ok_or_else(|| ApiError::PathNotFound(path.to_string()))
}

/// Empty or absent parent means the root level.
fn resolve_parent(workspace: &Workspace, path: Option<&str>) -> Result<Option<NodeId>, ApiError> {
    match path.map(str::trim).filter(|p| !p.is_empty() && *p != "/") {
        Some(p) => match workspace.store().find_by_path(p) {
            Some(node) if node.is_folder() => Ok(Some(node.id().clone())),
            Some(node) => Err(TreeError::ParentNotFolder(node.id().clone()).into()),
            None => Err(ApiError::PathNotFound(p.to_string())),
        },
        None => Ok(None),
    }
}
