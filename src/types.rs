//! Core types for the Folio workspace tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: opaque identifier of a file or folder, unique within a tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(raw: impl Into<String>) -> Self {
        NodeId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        NodeId(raw.to_string())
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        NodeId(raw)
    }
}

/// Timestamp: last-modified time reported for uploaded files
pub type Timestamp = DateTime<Utc>;

/// File type tag derived from the name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Tex,
    Bib,
    Pdf,
    Jpg,
    Png,
    Txt,
    Md,
    Csv,
    Json,
    Unknown,
}

impl FileKind {
    /// Map a bare extension (no dot) to a kind. Matching is case-insensitive.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "tex" => FileKind::Tex,
            "bib" => FileKind::Bib,
            "pdf" => FileKind::Pdf,
            "jpg" | "jpeg" => FileKind::Jpg,
            "png" => FileKind::Png,
            "txt" => FileKind::Txt,
            "md" => FileKind::Md,
            "csv" => FileKind::Csv,
            "json" => FileKind::Json,
            _ => FileKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Tex => "tex",
            FileKind::Bib => "bib",
            FileKind::Pdf => "pdf",
            FileKind::Jpg => "jpg",
            FileKind::Png => "png",
            FileKind::Txt => "txt",
            FileKind::Md => "md",
            FileKind::Csv => "csv",
            FileKind::Json => "json",
            FileKind::Unknown => "unknown",
        }
    }

    /// Whether the kind holds binary data in a real filesystem
    pub fn is_binary(&self) -> bool {
        matches!(self, FileKind::Pdf | FileKind::Jpg | FileKind::Png)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
