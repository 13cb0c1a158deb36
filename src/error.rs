//! Error types
//!
//! `TreeError` covers structural rejections: the operation did not happen and the
//! tree is unchanged. Its `Display` text is what the user sees.

use crate::types::NodeId;
use thiserror::Error;

/// Rejection raised by a tree primitive or mutation operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("No file or folder with id {0}")]
    NotFound(NodeId),

    #[error("Drop target {0} is not a folder")]
    TargetNotFolder(NodeId),

    #[error("Cannot move a folder into itself")]
    SelfParent,

    #[error("Cannot move folder {dragged} into its own subfolder {target}")]
    Cycle { dragged: NodeId, target: NodeId },

    #[error("Target folder {0} no longer exists")]
    ParentMissing(NodeId),

    #[error("Parent {0} is a file, not a folder")]
    ParentNotFolder(NodeId),

    #[error("Node id {0} is already in use")]
    DuplicateId(NodeId),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("{0} is a folder; only files can be selected")]
    NotAFile(NodeId),

    #[error("No drag in progress")]
    NotDragging,
}

/// Failure reading one uploaded item; the rest of the batch proceeds
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload {name} rejected: {reason}")]
    Rejected { name: String, reason: String },
}

/// Invariant violation found by `TreeStore::check_invariants`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Node {0} is listed in more than one place")]
    MultipleLocations(NodeId),

    #[error("Node {node} points at parent {parent:?} but is listed under {listed_under:?}")]
    ParentMismatch {
        node: NodeId,
        parent: Option<NodeId>,
        listed_under: Option<NodeId>,
    },

    #[error("Node {0} is stored but not reachable from the root sequence")]
    Unreachable(NodeId),

    #[error("Child reference {0} does not resolve to a stored node")]
    DanglingChild(NodeId),

    #[error("Folder {0} is its own ancestor")]
    Cycle(NodeId),

    #[error("Node stored under key {key} carries id {actual}")]
    KeyMismatch { key: NodeId, actual: NodeId },
}

/// Top-level error for configuration, logging and command surfaces
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Path not found in workspace: {0}")]
    PathNotFound(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(err: serde_yaml::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}
