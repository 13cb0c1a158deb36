//! Workspace Tree
//!
//! In-memory forest of files and folders. Nodes live in an arena keyed by id;
//! folders keep an ordered list of child ids and every node keeps a parent
//! back-reference. The two are kept in lock-step by the store primitives.

pub mod names;
pub mod node;
pub mod store;
pub mod view;
pub mod walk;

pub use node::{FileNode, FolderNode, Node};
pub use store::TreeStore;
pub use view::NodeView;
pub use walk::{DepthFirst, VisibleEntry};
