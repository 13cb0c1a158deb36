//! Nested, serializable rendition of the forest.
//!
//! Used for JSON/YAML export, presentation and building fixtures. The arena
//! stays the source of truth; views are snapshots.

use crate::error::TreeError;
use crate::tree::node::Node;
use crate::tree::store::TreeStore;
use crate::types::{FileKind, NodeId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeView {
    File {
        id: NodeId,
        name: String,
        #[serde(default, skip_deserializing)]
        kind: Option<FileKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        last_modified: Option<Timestamp>,
    },
    Folder {
        id: NodeId,
        name: String,
        #[serde(default)]
        is_open: bool,
        #[serde(default)]
        children: Vec<NodeView>,
    },
}

impl NodeView {
    pub fn id(&self) -> &NodeId {
        match self {
            NodeView::File { id, .. } | NodeView::Folder { id, .. } => id,
        }
    }
}

impl TreeStore {
    /// Snapshot the whole forest as nested views.
    pub fn to_views(&self) -> Vec<NodeView> {
        self.roots.iter().filter_map(|id| self.view_of(id)).collect()
    }

    /// Snapshot the subtree rooted at `id`.
    pub fn view_of(&self, id: &NodeId) -> Option<NodeView> {
        let view = match self.find(id)? {
            Node::File(file) => NodeView::File {
                id: file.id.clone(),
                name: file.name.clone(),
                kind: Some(file.kind),
                content: file.content.clone(),
                last_modified: file.last_modified,
            },
            Node::Folder(folder) => NodeView::Folder {
                id: folder.id.clone(),
                name: folder.name.clone(),
                is_open: folder.is_open,
                children: folder
                    .children
                    .iter()
                    .filter_map(|child| self.view_of(child))
                    .collect(),
            },
        };
        Some(view)
    }

    /// Build a store from nested views. File kinds are re-derived from names.
    ///
    /// Open state is taken from the views rather than from insertion side effects.
    pub fn from_views(views: &[NodeView]) -> Result<TreeStore, TreeError> {
        let mut store = TreeStore::new();
        let mut pending: Vec<(Option<NodeId>, &NodeView)> =
            views.iter().rev().map(|v| (None, v)).collect();
        while let Some((parent, view)) = pending.pop() {
            let node = match view {
                NodeView::File {
                    id,
                    name,
                    content,
                    last_modified,
                    ..
                } => {
                    let mut node = Node::new_file(id.clone(), name.clone())
                        .with_last_modified(*last_modified);
                    if let Some(content) = content {
                        node = node.with_content(content.clone());
                    }
                    node
                }
                NodeView::Folder { id, name, children, .. } => {
                    pending.extend(children.iter().rev().map(|c| (Some(id.clone()), c)));
                    Node::new_folder(id.clone(), name.clone())
                }
            };
            store = store.insert_into(parent.as_ref(), node)?;
        }
        for view in views.iter().flat_map(flatten) {
            if let NodeView::Folder { id, is_open, .. } = view {
                let open = *is_open;
                store = store.update(id, |n| n.set_open(open));
            }
        }
        Ok(store)
    }
}

fn flatten(view: &NodeView) -> Vec<&NodeView> {
    let mut out = vec![view];
    if let NodeView::Folder { children, .. } = view {
        for child in children {
            out.extend(flatten(child));
        }
    }
    out
}
