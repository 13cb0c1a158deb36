//! Tree Store
//!
//! Arena of nodes keyed by id plus the ordered root sequence. Every primitive
//! takes `&self` and returns a new store; the receiver is never modified. The
//! arena uses persistent collections so a new value shares structure with the
//! old one and only the touched nodes are copied.

use crate::error::{InvariantViolation, TreeError};
use crate::tree::node::Node;
use crate::types::NodeId;
use im::{HashMap, Vector};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStore {
    pub(super) nodes: HashMap<NodeId, Node>,
    pub(super) roots: Vector<NodeId>,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root-level ids, in display order.
    pub fn roots(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.roots.iter()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Ordered child ids of `parent`, or the root sequence for `None`.
    ///
    /// Returns `None` when `parent` is not a folder.
    pub fn children_of(&self, parent: Option<&NodeId>) -> Option<Vec<&Node>> {
        let ids = match parent {
            None => &self.roots,
            Some(id) => self.nodes.get(id)?.child_ids()?,
        };
        Some(ids.iter().filter_map(|id| self.nodes.get(id)).collect())
    }

    /// Rebuild the forest applying `transform` to every node matching `predicate`.
    ///
    /// Sibling order and structure are preserved; the transform can only reach
    /// the public setters on `Node`.
    pub fn replace<P, T>(&self, predicate: P, mut transform: T) -> TreeStore
    where
        P: Fn(&Node) -> bool,
        T: FnMut(&mut Node),
    {
        let mut next = self.clone();
        let matching: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| predicate(node))
            .map(|(id, _)| id.clone())
            .collect();
        for id in matching {
            if let Some(node) = next.nodes.get_mut(&id) {
                transform(node);
            }
        }
        next
    }

    /// Apply `transform` to the node with `id`, if present.
    pub fn update<T>(&self, id: &NodeId, transform: T) -> TreeStore
    where
        T: FnMut(&mut Node),
    {
        self.replace(|node| node.id() == id, transform)
    }

    /// Remove `id` and every descendant. Unknown ids yield an unchanged copy.
    pub fn remove(&self, id: &NodeId) -> TreeStore {
        let mut next = self.clone();
        if !next.nodes.contains_key(id) {
            return next;
        }
        next.unlink(id);
        for doomed in self.subtree_ids(id) {
            next.nodes.remove(&doomed);
        }
        next
    }

    /// Append `node` under `parent` (or at root level for `None`).
    ///
    /// The parent folder is opened as a side effect. The node is inserted as a
    /// leaf: any children listed on the value are discarded. Fails, leaving the
    /// receiver untouched, when the parent does not resolve to a folder or the
    /// id is already present.
    pub fn insert_into(
        &self,
        parent: Option<&NodeId>,
        mut node: Node,
    ) -> Result<TreeStore, TreeError> {
        if self.nodes.contains_key(node.id()) {
            return Err(TreeError::DuplicateId(node.id().clone()));
        }
        self.check_parent(parent)?;

        if let Some(children) = node.children_mut() {
            children.clear();
        }
        let id = node.id().clone();
        node.set_parent(None);

        let mut next = self.clone();
        next.nodes.insert(id.clone(), node);
        next.link(parent, &id);
        Ok(next)
    }

    /// Reparent `id` (with its whole subtree) under `target`, appending it last.
    ///
    /// Unlink and relink happen on one working copy. Only the destination folder
    /// is opened. Callers are responsible for the cycle check.
    pub fn move_into(
        &self,
        id: &NodeId,
        target: Option<&NodeId>,
    ) -> Result<TreeStore, TreeError> {
        if !self.nodes.contains_key(id) {
            return Err(TreeError::NotFound(id.clone()));
        }
        self.check_parent(target)?;

        let mut next = self.clone();
        next.unlink(id);
        next.link(target, id);
        Ok(next)
    }

    fn check_parent(&self, parent: Option<&NodeId>) -> Result<(), TreeError> {
        if let Some(pid) = parent {
            match self.nodes.get(pid) {
                None => return Err(TreeError::ParentMissing(pid.clone())),
                Some(n) if !n.is_folder() => return Err(TreeError::ParentNotFolder(pid.clone())),
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Drop `id` from whatever list holds it and clear its parent pointer.
    fn unlink(&mut self, id: &NodeId) {
        let parent = self.nodes.get(id).and_then(|n| n.parent_id().cloned());
        let list = match &parent {
            None => Some(&mut self.roots),
            Some(pid) => self.nodes.get_mut(pid).and_then(|p| p.children_mut()),
        };
        if let Some(list) = list {
            if let Some(pos) = list.index_of(id) {
                list.remove(pos);
            }
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.set_parent(None);
        }
    }

    /// Append `id` to `parent`'s children (or the roots) and point it back.
    fn link(&mut self, parent: Option<&NodeId>, id: &NodeId) {
        match parent {
            None => self.roots.push_back(id.clone()),
            Some(pid) => {
                if let Some(folder) = self.nodes.get_mut(pid) {
                    folder.set_open(true);
                    if let Some(children) = folder.children_mut() {
                        children.push_back(id.clone());
                    }
                }
            }
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.set_parent(parent.cloned());
        }
    }

    /// Resolve a `/`-separated path of display names, e.g. `chapters/intro.tex`.
    pub fn find_by_path(&self, path: &str) -> Option<&Node> {
        let mut siblings: Option<&Vector<NodeId>> = Some(&self.roots);
        let mut found: Option<&Node> = None;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let node = siblings?
                .iter()
                .filter_map(|id| self.nodes.get(id))
                .find(|n| n.name() == segment)?;
            found = Some(node);
            siblings = node.child_ids();
        }
        found
    }

    /// Display path of `id`, root first.
    pub fn path_of(&self, id: &NodeId) -> Option<String> {
        let mut segments = Vec::new();
        let mut cursor = self.nodes.get(id);
        while let Some(node) = cursor {
            segments.push(node.name().to_string());
            cursor = node.parent_id().and_then(|pid| self.nodes.get(pid));
            if segments.len() > self.nodes.len() {
                return None;
            }
        }
        if segments.is_empty() {
            return None;
        }
        segments.reverse();
        Some(segments.join("/"))
    }

    /// Check uniqueness, single location, parent consistency, reachability and acyclicity.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (key, node) in self.nodes.iter() {
            if key != node.id() {
                return Err(InvariantViolation::KeyMismatch {
                    key: key.clone(),
                    actual: node.id().clone(),
                });
            }
        }

        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut stack: Vec<(Option<NodeId>, NodeId)> =
            self.roots.iter().rev().map(|id| (None, id.clone())).collect();
        while let Some((listed_under, id)) = stack.pop() {
            if seen.contains(&id) {
                // Revisiting through a child list means a node sits in two lists
                // or a folder contains one of its ancestors.
                return match self.is_ancestor(&id, &id) {
                    true => Err(InvariantViolation::Cycle(id)),
                    false => Err(InvariantViolation::MultipleLocations(id)),
                };
            }
            let node = self
                .nodes
                .get(&id)
                .ok_or_else(|| InvariantViolation::DanglingChild(id.clone()))?;
            if node.parent_id() != listed_under.as_ref() {
                return Err(InvariantViolation::ParentMismatch {
                    node: id.clone(),
                    parent: node.parent_id().cloned(),
                    listed_under,
                });
            }
            seen.insert(id.clone());
            if let Some(children) = node.child_ids() {
                for child in children.iter().rev() {
                    stack.push((Some(id.clone()), child.clone()));
                }
            }
        }

        if let Some(orphan) = self.nodes.keys().find(|id| !seen.contains(*id)) {
            return Err(InvariantViolation::Unreachable(orphan.clone()));
        }
        Ok(())
    }
}
