//! Observer hooks consumed by the editing surface and the presentation layer.

use crate::tree::Node;
use crate::types::NodeId;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// User-visible message produced by an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub operation: &'static str,
    pub message: String,
}

impl Notice {
    pub fn info(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            operation,
            message: message.into(),
        }
    }

    pub fn warning(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            operation,
            message: message.into(),
        }
    }
}

/// Callbacks fired by the workspace. All methods default to no-ops.
pub trait WorkspaceObserver: Send + Sync {
    /// Selection moved to `node`; its content is already resolved.
    fn on_select(&self, _node: &Node, _focus_editor: bool) {}

    /// No file is left to select.
    fn on_selection_cleared(&self) {}

    fn on_notice(&self, _notice: &Notice) {}

    /// A new tree value was committed.
    fn on_change(&self, _revision: u64) {}
}

/// Recorded observer event
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    Selected { id: NodeId, focus_editor: bool },
    SelectionCleared,
    Notice(Notice),
    Changed(u64),
}

/// Observer that appends every event to a shared log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    /// Id of the most recent selection event.
    pub fn last_selected(&self) -> Option<NodeId> {
        self.events.lock().iter().rev().find_map(|e| match e {
            RecordedEvent::Selected { id, .. } => Some(id.clone()),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl WorkspaceObserver for EventLog {
    fn on_select(&self, node: &Node, focus_editor: bool) {
        self.events.lock().push(RecordedEvent::Selected {
            id: node.id().clone(),
            focus_editor,
        });
    }

    fn on_selection_cleared(&self) {
        self.events.lock().push(RecordedEvent::SelectionCleared);
    }

    fn on_notice(&self, notice: &Notice) {
        self.events.lock().push(RecordedEvent::Notice(notice.clone()));
    }

    fn on_change(&self, revision: u64) {
        self.events.lock().push(RecordedEvent::Changed(revision));
    }
}
