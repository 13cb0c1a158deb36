//! Selection & navigation rules.
//!
//! The selection is a bare id held outside the arena and validated against it
//! after every commit.

use crate::tree::TreeStore;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Keyboard traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Next,
    Previous,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NodeId>,
    focus_editor: bool,
}

impl Selection {
    pub fn id(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn focus_editor(&self) -> bool {
        self.focus_editor
    }

    pub fn is(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub(crate) fn set(&mut self, id: NodeId, focus_editor: bool) {
        self.selected = Some(id);
        self.focus_editor = focus_editor;
    }

    pub(crate) fn clear(&mut self) {
        self.selected = None;
        self.focus_editor = false;
    }

    /// True when nothing is selected or the selected id still resolves.
    pub fn is_valid_in(&self, store: &TreeStore) -> bool {
        match &self.selected {
            Some(id) => store.contains(id),
            None => true,
        }
    }
}

/// First file in depth-first, children-before-siblings order.
pub fn default_selection(store: &TreeStore) -> Option<NodeId> {
    store.first_file().map(|n| n.id().clone())
}

/// Root-level file named `main_document`, else the default selection.
pub fn fallback_after_delete(store: &TreeStore, main_document: &str) -> Option<NodeId> {
    store
        .children_of(None)
        .unwrap_or_default()
        .into_iter()
        .find(|n| n.is_file() && n.name() == main_document)
        .map(|n| n.id().clone())
        .or_else(|| default_selection(store))
}

/// Next or previous file in visible order, relative to `current`.
///
/// Folders are stepped over. When `current` is not visible, `Next` starts from
/// the top and `Previous` from the bottom. Returns `None` at either end.
pub fn step(store: &TreeStore, current: Option<&NodeId>, key: Key) -> Option<NodeId> {
    let visible = store.visible_order();
    let position = current.and_then(|c| visible.iter().position(|e| &e.id == c));
    let is_file = |id: &NodeId| store.find(id).map(|n| n.is_file()).unwrap_or(false);

    match key {
        Key::Next => {
            let start = position.map(|p| p + 1).unwrap_or(0);
            visible
                .iter()
                .skip(start)
                .find(|e| is_file(&e.id))
                .map(|e| e.id.clone())
        }
        Key::Previous => {
            let end = position.unwrap_or(visible.len());
            visible[..end]
                .iter()
                .rev()
                .find(|e| is_file(&e.id))
                .map(|e| e.id.clone())
        }
    }
}
