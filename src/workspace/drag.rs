//! Drag-and-drop gesture state.
//!
//! Only the dragged id is captured at drag start. The drop re-resolves it
//! against the tree as it is then.

use crate::types::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        node: NodeId,
        /// Folder currently hovered; visual feedback only
        over: Option<NodeId>,
    },
}

impl DragState {
    /// Begin dragging `node`, replacing any unfinished drag.
    pub fn start(&mut self, node: NodeId) {
        *self = DragState::Dragging { node, over: None };
    }

    pub fn hover(&mut self, target: NodeId) {
        if let DragState::Dragging { over, .. } = self {
            *over = Some(target);
        }
    }

    pub fn leave(&mut self) {
        if let DragState::Dragging { over, .. } = self {
            *over = None;
        }
    }

    /// End the gesture, returning the dragged id if one was in flight.
    pub fn finish(&mut self) -> Option<NodeId> {
        match std::mem::take(self) {
            DragState::Dragging { node, .. } => Some(node),
            DragState::Idle => None,
        }
    }

    pub fn dragged(&self) -> Option<&NodeId> {
        match self {
            DragState::Dragging { node, .. } => Some(node),
            DragState::Idle => None,
        }
    }

    pub fn drop_target(&self) -> Option<&NodeId> {
        match self {
            DragState::Dragging { over, .. } => over.as_ref(),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}
