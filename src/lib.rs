//! Folio: in-memory project file tree
//!
//! A workspace of files and folders for document projects. Nodes live in a
//! persistent arena keyed by id; every mutation builds the next tree value and
//! commits it whole, so readers never observe a half-applied change.

pub mod config;
pub mod content;
pub mod error;
pub mod identity;
pub mod ingest;
pub mod logging;
pub mod presentation;
pub mod script;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod workspace;

pub use error::{ApiError, TreeError};
pub use tree::{Node, TreeStore};
pub use types::{FileKind, NodeId};
pub use workspace::Workspace;
