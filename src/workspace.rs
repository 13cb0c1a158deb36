//! Workspace: the tree host, its mutation operations, selection and gestures.

pub mod drag;
pub mod events;
mod host;
pub mod selection;

pub use drag::DragState;
pub use events::{EventLog, Notice, NoticeLevel, RecordedEvent, WorkspaceObserver};
pub use host::Workspace;
pub use selection::{Key, Selection};
