//! Upload ingestion
//!
//! Reading is the only asynchronous step. All items of a batch are read to
//! completion before the tree is touched, then inserted in a single commit.
//! A failed read skips that item and is counted in the report.

use crate::error::{ApiError, IngestError, TreeError};
use crate::tree::names;
use crate::types::{NodeId, Timestamp};
use crate::workspace::Workspace;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Handle to an external file awaiting ingestion
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub source: UploadSource,
}

#[derive(Debug, Clone)]
pub enum UploadSource {
    Path(PathBuf),
    Bytes {
        data: Vec<u8>,
        last_modified: Option<Timestamp>,
    },
}

impl Upload {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            source: UploadSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: UploadSource::Bytes {
                data: data.into(),
                last_modified: None,
            },
        }
    }
}

/// Decoded upload
#[derive(Debug, Clone, PartialEq)]
pub struct ReadFile {
    pub name: String,
    pub content: String,
    pub last_modified: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of reading every item in a batch
#[derive(Debug, Clone, Default)]
pub struct ReadBatch {
    pub files: Vec<ReadFile>,
    pub failures: Vec<IngestFailure>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub inserted: Vec<NodeId>,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Folders and read files ready to insert in one commit.
#[derive(Debug, Default)]
pub(crate) struct MirrorPlan {
    /// In walk order, so a folder's parent always comes before it.
    pub(crate) folders: Vec<PlannedFolder>,
    /// Each file with the index of its planned folder; `None` is the target itself.
    pub(crate) files: Vec<(Option<usize>, ReadFile)>,
    pub(crate) failures: Vec<IngestFailure>,
}

#[derive(Debug)]
pub(crate) struct PlannedFolder {
    pub(crate) name: String,
    pub(crate) parent: Option<usize>,
}

impl From<ReadBatch> for MirrorPlan {
    fn from(batch: ReadBatch) -> Self {
        Self {
            folders: Vec::new(),
            files: batch.files.into_iter().map(|f| (None, f)).collect(),
            failures: batch.failures,
        }
    }
}

/// External text-extraction collaborator.
#[async_trait]
pub trait ContentReader: Send + Sync {
    async fn read(&self, upload: &Upload) -> Result<ReadFile, IngestError>;
}

/// Reads from the local filesystem; in-memory bytes are decoded directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsContentReader;

#[async_trait]
impl ContentReader for FsContentReader {
    async fn read(&self, upload: &Upload) -> Result<ReadFile, IngestError> {
        match &upload.source {
            UploadSource::Path(path) => {
                let io_err = |source| IngestError::Io {
                    name: upload.name.clone(),
                    source,
                };
                let data = tokio::fs::read(path).await.map_err(io_err)?;
                let last_modified = tokio::fs::metadata(path)
                    .await
                    .ok()
                    .and_then(|m| m.modified().ok())
                    .map(DateTime::<Utc>::from);
                Ok(decode(&upload.name, &data, last_modified))
            }
            UploadSource::Bytes {
                data,
                last_modified,
            } => Ok(decode(&upload.name, data, *last_modified)),
        }
    }
}

/// Reads only in-memory uploads; path uploads are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryContentReader;

#[async_trait]
impl ContentReader for MemoryContentReader {
    async fn read(&self, upload: &Upload) -> Result<ReadFile, IngestError> {
        match &upload.source {
            UploadSource::Bytes {
                data,
                last_modified,
            } => Ok(decode(&upload.name, data, *last_modified)),
            UploadSource::Path(path) => Err(IngestError::Rejected {
                name: upload.name.clone(),
                reason: format!("filesystem access disabled ({})", path.display()),
            }),
        }
    }
}

/// Lossy UTF-8: invalid sequences become U+FFFD rather than failing the item.
fn decode(name: &str, data: &[u8], last_modified: Option<Timestamp>) -> ReadFile {
    ReadFile {
        name: name.to_string(),
        content: String::from_utf8_lossy(data).into_owned(),
        last_modified,
    }
}

/// Read every upload concurrently and wait for all of them.
pub async fn read_batch(reader: &dyn ContentReader, uploads: &[Upload]) -> ReadBatch {
    let results = join_all(uploads.iter().map(|u| reader.read(u))).await;
    let mut batch = ReadBatch::default();
    for (upload, result) in uploads.iter().zip(results) {
        match result {
            Ok(file) => batch.files.push(file),
            Err(e) => {
                warn!(name = %upload.name, error = %e, "Upload read failed");
                batch.failures.push(IngestFailure {
                    name: upload.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    batch
}

impl Workspace {
    /// Read a batch of uploads and insert them under `parent` in one commit.
    pub async fn upload(
        &mut self,
        reader: &dyn ContentReader,
        uploads: &[Upload],
        parent: Option<&NodeId>,
    ) -> Result<IngestReport, TreeError> {
        // Unusable target: reject without reading anything.
        if !self.accepts_children(parent) {
            return self.apply_ingest(ReadBatch::default(), parent);
        }
        let batch = read_batch(reader, uploads).await;
        self.apply_ingest(batch, parent)
    }

    fn accepts_children(&self, parent: Option<&NodeId>) -> bool {
        parent.map_or(true, |pid| self.find(pid).map_or(false, |n| n.is_folder()))
    }
}

/// Mirror a directory on disk into the workspace under `parent`.
///
/// Subdirectories become folders and every file is read before the tree
/// changes; the whole mirror lands as a single commit. Hidden entries
/// (leading '.') are skipped. A directory with an unusable name is counted
/// as a failure and its subtree is left out.
pub async fn ingest_directory(
    workspace: &mut Workspace,
    reader: &dyn ContentReader,
    root: &Path,
    parent: Option<&NodeId>,
) -> Result<IngestReport, ApiError> {
    if !workspace.accepts_children(parent) {
        return Ok(workspace.apply_ingest(ReadBatch::default(), parent)?);
    }

    let mut plan = MirrorPlan::default();
    // Planned folder index per mirrored directory; the root maps to the target.
    let mut slots: HashMap<PathBuf, Option<usize>> = HashMap::new();
    slots.insert(root.to_path_buf(), None);
    let mut files_by_slot: Vec<(Option<usize>, Vec<Upload>)> = Vec::new();

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e.file_name()));
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(ApiError::Io(e.into())),
            Err(e) => {
                let name = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                warn!(name = %name, error = %e, "Skipping unreadable entry");
                plan.failures.push(IngestFailure {
                    name,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let dir = entry.path().parent().unwrap_or(root);
        let slot = match slots.get(dir) {
            Some(slot) => *slot,
            None => continue,
        };

        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Err(e) = names::normalize_name(&name) {
                warn!(path = %entry.path().display(), error = %e, "Skipping directory");
                plan.failures.push(IngestFailure {
                    name,
                    reason: e.to_string(),
                });
                walker.skip_current_dir();
                continue;
            }
            debug!(path = %entry.path().display(), "Mirroring directory");
            plan.folders.push(PlannedFolder { name, parent: slot });
            slots.insert(entry.path().to_path_buf(), Some(plan.folders.len() - 1));
        } else if entry.file_type().is_file() {
            let upload = Upload::from_path(entry.path());
            match files_by_slot.iter_mut().find(|(s, _)| *s == slot) {
                Some((_, uploads)) => uploads.push(upload),
                None => files_by_slot.push((slot, vec![upload])),
            }
        }
    }

    for (slot, uploads) in files_by_slot {
        let batch = read_batch(reader, &uploads).await;
        plan.files.extend(batch.files.into_iter().map(|f| (slot, f)));
        plan.failures.extend(batch.failures);
    }
    Ok(workspace.apply_mirror(plan, parent)?)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
