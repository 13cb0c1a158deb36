//! Traversal over the store: depth-first order, ancestry, visible order.

use crate::tree::node::Node;
use crate::tree::store::TreeStore;
use crate::types::NodeId;
use serde::Serialize;

/// One row of the flattened visible order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleEntry {
    pub id: NodeId,
    pub depth: usize,
}

/// Pre-order iterator: a folder, then its children, then its next sibling.
pub struct DepthFirst<'a> {
    store: &'a TreeStore,
    stack: Vec<&'a NodeId>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            let Some(node) = self.store.find(id) else {
                continue;
            };
            if let Some(children) = node.child_ids() {
                self.stack.extend(children.iter().rev());
            }
            return Some(node);
        }
    }
}

impl TreeStore {
    /// Every node, children before later siblings.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            store: self,
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// First file in depth-first order.
    pub fn first_file(&self) -> Option<&Node> {
        self.depth_first().find(|n| n.is_file())
    }

    /// `id` followed by all of its descendants; empty if `id` is unknown.
    pub fn subtree_ids(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.find(current) else {
                continue;
            };
            out.push(current.clone());
            if let Some(children) = node.child_ids() {
                stack.extend(children.iter().rev());
            }
        }
        out
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    ///
    /// Walks parent pointers upward, bounded by the store size.
    pub fn is_ancestor(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut cursor = self.find(node).and_then(|n| n.parent_id());
        let mut steps = 0;
        while let Some(pid) = cursor {
            if pid == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.len() {
                return false;
            }
            cursor = self.find(pid).and_then(|n| n.parent_id());
        }
        false
    }

    /// Nodes in display order. Closed folders contribute only themselves.
    pub fn visible_order(&self) -> Vec<VisibleEntry> {
        let mut out = Vec::new();
        let mut stack: Vec<(&NodeId, usize)> = self.roots.iter().rev().map(|id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.find(id) else {
                continue;
            };
            out.push(VisibleEntry {
                id: id.clone(),
                depth,
            });
            if let Node::Folder(folder) = node {
                if folder.is_open() {
                    stack.extend(folder.children.iter().rev().map(|c| (c, depth + 1)));
                }
            }
        }
        out
    }
}
