//! Workspace host
//!
//! Owns the tree value, the selection and the drag gesture, and exposes the
//! mutation operations. Each operation checks its preconditions, builds the
//! next tree value from the current one and commits it in one step; a
//! rejected operation leaves everything as it was.

use crate::config::{FolioConfig, WorkspaceSettings};
use crate::content::ContentResolver;
use crate::error::TreeError;
use crate::identity::{IdSource, UuidIdSource};
use crate::ingest::{IngestFailure, IngestReport, MirrorPlan, ReadBatch};
use crate::tree::names;
use crate::tree::{Node, TreeStore};
use crate::types::NodeId;
use crate::workspace::drag::DragState;
use crate::workspace::events::{Notice, WorkspaceObserver};
use crate::workspace::selection::{self, Key, Selection};
use tracing::{debug, info, warn};

pub struct Workspace {
    store: TreeStore,
    selection: Selection,
    drag: DragState,
    resolver: ContentResolver,
    settings: WorkspaceSettings,
    ids: Box<dyn IdSource>,
    observers: Vec<Box<dyn WorkspaceObserver>>,
    revision: u64,
}

impl Workspace {
    /// Empty workspace with random ids.
    pub fn new(config: &FolioConfig) -> Self {
        Self {
            store: TreeStore::new(),
            selection: Selection::default(),
            drag: DragState::default(),
            resolver: ContentResolver::new(&config.templates),
            settings: config.workspace.clone(),
            ids: Box::new(UuidIdSource),
            observers: Vec::new(),
            revision: 0,
        }
    }

    pub fn with_id_source(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn WorkspaceObserver>) {
        self.observers.push(observer);
    }

    /// Replace the whole tree, as on initial load, and apply the default selection.
    pub fn load(&mut self, store: TreeStore) {
        self.selection.clear();
        self.drag = DragState::Idle;
        self.commit(store);
        if self.settings.auto_select {
            self.apply_default_selection(false);
        }
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    pub fn resolver(&self) -> &ContentResolver {
        &self.resolver
    }

    /// Number of commits since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.store.find(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<&Node> {
        self.selection.id().and_then(|id| self.store.find(id))
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    // --- Mutation operations ---

    /// Create an empty file. A name without extension gets the default one.
    pub fn create_file(
        &mut self,
        name: &str,
        parent: Option<&NodeId>,
    ) -> Result<NodeId, TreeError> {
        let result = names::normalize_name(name).and_then(|name| {
            let name = names::with_default_extension(name, &self.settings.default_extension);
            let node = Node::new_file(self.ids.next_id(), name).with_content(String::new());
            let id = node.id().clone();
            let next = self.store.insert_into(parent, node)?;
            Ok((id, next))
        });
        let (id, next) = self.reject_on_err("create_file", result)?;
        debug!(node_id = %id, parent = ?parent, "Created file");
        self.commit(next);
        Ok(id)
    }

    /// Create an empty, closed folder.
    pub fn create_folder(
        &mut self,
        name: &str,
        parent: Option<&NodeId>,
    ) -> Result<NodeId, TreeError> {
        let result = names::normalize_name(name).and_then(|name| {
            let node = Node::new_folder(self.ids.next_id(), name);
            let id = node.id().clone();
            let next = self.store.insert_into(parent, node)?;
            Ok((id, next))
        });
        let (id, next) = self.reject_on_err("create_folder", result)?;
        debug!(node_id = %id, parent = ?parent, "Created folder");
        self.commit(next);
        Ok(id)
    }

    /// Rename a node. Files keep their old extension when the new name has none.
    pub fn rename(&mut self, id: &NodeId, new_name: &str) -> Result<(), TreeError> {
        let result = self.require(id).and_then(|node| {
            let name = names::normalize_name(new_name)?;
            if node.is_file() {
                Ok(names::rename_preserving_extension(node.name(), name))
            } else {
                Ok(name)
            }
        });
        let name = self.reject_on_err("rename", result)?;
        debug!(node_id = %id, name = %name, "Renamed node");
        let next = self.store.update(id, |n| n.set_name(name.clone()));
        self.commit(next);
        Ok(())
    }

    /// Delete a node and its whole subtree.
    ///
    /// If the selection was inside the removed subtree it falls back to the
    /// root-level main document, else to the first file.
    pub fn delete(&mut self, id: &NodeId) -> Result<(), TreeError> {
        let result = self.require(id).map(|_| ());
        self.reject_on_err("delete", result)?;

        let selection_removed = self
            .selection
            .id()
            .map(|sel| sel == id || self.store.is_ancestor(id, sel))
            .unwrap_or(false);
        if selection_removed {
            self.selection.clear();
        }
        let next = self.store.remove(id);
        debug!(node_id = %id, removed = self.store.len() - next.len(), "Deleted subtree");
        self.commit(next);

        if selection_removed {
            match selection::fallback_after_delete(&self.store, &self.settings.main_document) {
                Some(fallback) => self.select_internal(&fallback, false),
                None => self.notify_cleared(),
            }
        }
        Ok(())
    }

    /// Reparent `dragged` under the folder `target`.
    ///
    /// Checked in order: target is a folder, not self-parenting, dragged still
    /// exists, target is not inside the dragged subtree.
    pub fn move_node(&mut self, dragged: &NodeId, target: &NodeId) -> Result<(), TreeError> {
        let result = self.check_move(dragged, target);
        self.reject_on_err("move", result)?;
        let next = self.store.move_into(dragged, Some(target));
        let next = self.reject_on_err("move", next)?;
        debug!(node_id = %dragged, target = %target, "Moved node");
        self.commit(next);
        Ok(())
    }

    fn check_move(&self, dragged: &NodeId, target: &NodeId) -> Result<(), TreeError> {
        match self.store.find(target) {
            Some(node) if node.is_folder() => {}
            Some(_) => return Err(TreeError::TargetNotFolder(target.clone())),
            None => return Err(TreeError::ParentMissing(target.clone())),
        }
        if dragged == target {
            return Err(TreeError::SelfParent);
        }
        let node = self.require(dragged)?;
        if node.is_folder() && self.store.is_ancestor(dragged, target) {
            return Err(TreeError::Cycle {
                dragged: dragged.clone(),
                target: target.clone(),
            });
        }
        Ok(())
    }

    /// Insert already-read files under one parent as a single commit.
    ///
    /// Items with unusable names are reported as failures; a vanished parent
    /// rejects the whole batch.
    pub fn apply_ingest(
        &mut self,
        batch: ReadBatch,
        parent: Option<&NodeId>,
    ) -> Result<IngestReport, TreeError> {
        self.apply_mirror(MirrorPlan::from(batch), parent)
    }

    /// Insert planned folders, then files, under `parent` as a single commit.
    ///
    /// Unusable names become failures. Anything planned below a skipped
    /// folder is dropped with it.
    pub(crate) fn apply_mirror(
        &mut self,
        plan: MirrorPlan,
        parent: Option<&NodeId>,
    ) -> Result<IngestReport, TreeError> {
        let parent_check = match parent {
            Some(pid) => match self.store.find(pid) {
                Some(node) if node.is_folder() => Ok(()),
                Some(_) => Err(TreeError::ParentNotFolder(pid.clone())),
                None => Err(TreeError::ParentMissing(pid.clone())),
            },
            None => Ok(()),
        };
        self.reject_on_err("ingest", parent_check)?;

        let mut failures = plan.failures;
        let mut inserted = Vec::new();
        let mut next = self.store.clone();
        // Node id per planned folder, None when it was skipped.
        let mut slots: Vec<Option<NodeId>> = Vec::with_capacity(plan.folders.len());
        let target_of = |slots: &[Option<NodeId>], slot: Option<usize>| match slot {
            None => Some(parent.cloned()),
            Some(i) => slots.get(i).cloned().flatten().map(Some),
        };

        for folder in plan.folders {
            let target = match target_of(slots.as_slice(), folder.parent) {
                Some(target) => target,
                None => {
                    slots.push(None);
                    continue;
                }
            };
            match names::normalize_name(&folder.name) {
                Ok(name) => {
                    let node = Node::new_folder(self.ids.next_id(), name);
                    let id = node.id().clone();
                    next = self.reject_on_err("ingest", next.insert_into(target.as_ref(), node))?;
                    slots.push(Some(id));
                }
                Err(e) => {
                    warn!(name = %folder.name, error = %e, "Skipping folder");
                    failures.push(IngestFailure {
                        name: folder.name,
                        reason: e.to_string(),
                    });
                    slots.push(None);
                }
            }
        }
        let folders = slots.iter().flatten().count();

        for (slot, file) in plan.files {
            let target = match target_of(slots.as_slice(), slot) {
                Some(target) => target,
                None => continue,
            };
            let name = match names::normalize_name(&file.name) {
                Ok(name) => name,
                Err(e) => {
                    warn!(name = %file.name, error = %e, "Skipping upload");
                    failures.push(IngestFailure {
                        name: file.name,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let node = Node::new_file(self.ids.next_id(), name)
                .with_content(file.content)
                .with_last_modified(file.last_modified);
            let id = node.id().clone();
            next = self.reject_on_err("ingest", next.insert_into(target.as_ref(), node))?;
            inserted.push(id);
        }

        if folders > 0 || !inserted.is_empty() {
            self.commit(next);
        }
        let report = IngestReport { inserted, failures };
        info!(
            folders,
            inserted = report.inserted.len(),
            failed = report.failures.len(),
            "Ingested upload batch"
        );
        let notice = if report.failures.is_empty() {
            Notice::info("ingest", format!("Uploaded {} file(s)", report.inserted.len()))
        } else {
            Notice::warning(
                "ingest",
                format!(
                    "Uploaded {} file(s), {} failed",
                    report.inserted.len(),
                    report.failures.len()
                ),
            )
        };
        self.notify(&notice);
        Ok(report)
    }

    pub fn toggle_folder(&mut self, id: &NodeId) -> Result<(), TreeError> {
        let result = self.require_folder(id).map(|n| n.is_open());
        let open = self.reject_on_err("toggle", result)?;
        self.set_folder_open(id, !open)
    }

    pub fn set_folder_open(&mut self, id: &NodeId, open: bool) -> Result<(), TreeError> {
        let result = self.require_folder(id).map(|_| ());
        self.reject_on_err("toggle", result)?;
        let next = self.store.update(id, |n| n.set_open(open));
        self.commit(next);
        Ok(())
    }

    pub fn expand_all(&mut self) {
        let next = self.store.replace(|n| n.is_folder(), |n| n.set_open(true));
        self.commit(next);
    }

    pub fn collapse_all(&mut self) {
        let next = self.store.replace(|n| n.is_folder(), |n| n.set_open(false));
        self.commit(next);
    }

    // --- Selection & navigation ---

    /// Select a file, resolving and persisting default content first.
    pub fn select(&mut self, id: &NodeId, focus_editor: bool) -> Result<(), TreeError> {
        let result = self.require(id).and_then(|node| match node {
            Node::File(_) => Ok(()),
            Node::Folder(_) => Err(TreeError::NotAFile(id.clone())),
        });
        self.reject_on_err("select", result)?;
        self.select_internal(id, focus_editor);
        Ok(())
    }

    /// Move the selection to the next/previous file in visible order.
    ///
    /// Returns the newly selected id, or `None` at the end of the list.
    pub fn navigate(&mut self, key: Key) -> Option<NodeId> {
        let target = selection::step(&self.store, self.selection.id(), key)?;
        self.select_internal(&target, false);
        Some(target)
    }

    /// Folders toggle; files are selected with editor focus.
    pub fn activate(&mut self, id: &NodeId) -> Result<(), TreeError> {
        let result = self.require(id).map(|n| n.is_folder());
        if self.reject_on_err("activate", result)? {
            self.toggle_folder(id)
        } else {
            self.select(id, true)
        }
    }

    // --- Drag and drop ---

    pub fn drag_start(&mut self, id: &NodeId) -> Result<(), TreeError> {
        let result = self.require(id).map(|_| ());
        self.reject_on_err("drag", result)?;
        self.drag.start(id.clone());
        Ok(())
    }

    pub fn drag_over(&mut self, target: &NodeId) {
        self.drag.hover(target.clone());
    }

    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    pub fn cancel_drag(&mut self) {
        self.drag.finish();
    }

    /// Complete the gesture by moving the dragged node into `target`.
    ///
    /// The dragged id is looked up again here; the tree may have changed since
    /// the drag started.
    pub fn drop_on(&mut self, target: &NodeId) -> Result<(), TreeError> {
        let dragged = self.drag.finish().ok_or(TreeError::NotDragging);
        let dragged = self.reject_on_err("drop", dragged)?;
        self.move_node(&dragged, target)
    }

    // --- Internals ---

    fn require(&self, id: &NodeId) -> Result<&Node, TreeError> {
        self.store
            .find(id)
            .ok_or_else(|| TreeError::NotFound(id.clone()))
    }

    fn require_folder(&self, id: &NodeId) -> Result<&Node, TreeError> {
        let node = self.require(id)?;
        if node.is_folder() {
            Ok(node)
        } else {
            Err(TreeError::TargetNotFolder(id.clone()))
        }
    }

    /// Log and broadcast a rejection, passing the result through.
    fn reject_on_err<T>(
        &self,
        operation: &'static str,
        result: Result<T, TreeError>,
    ) -> Result<T, TreeError> {
        if let Err(e) = &result {
            warn!(operation, error = %e, "Operation rejected");
            self.notify(&Notice::warning(operation, e.to_string()));
        }
        result
    }

    fn commit(&mut self, next: TreeStore) {
        debug_assert!(
            next.check_invariants().is_ok(),
            "invariant violated: {:?}",
            next.check_invariants()
        );
        self.store = next;
        self.revision += 1;
        for observer in &self.observers {
            observer.on_change(self.revision);
        }
        if !self.selection.is_valid_in(&self.store) {
            self.selection.clear();
            self.apply_default_selection(false);
        }
    }

    fn apply_default_selection(&mut self, focus_editor: bool) {
        match selection::default_selection(&self.store) {
            Some(id) => self.select_internal(&id, focus_editor),
            None => self.notify_cleared(),
        }
    }

    /// Resolve content if missing, persist it, then expose the selection.
    fn select_internal(&mut self, id: &NodeId, focus_editor: bool) {
        let needs_content = self
            .store
            .find(id)
            .and_then(|n| n.as_file())
            .map(|f| f.content().is_none())
            .unwrap_or(false);
        if needs_content {
            if let Some(node) = self.store.find(id) {
                let content = self.resolver.resolve(node);
                let next = self.store.update(id, |n| n.set_content(content.clone()));
                self.commit(next);
            }
        }

        self.selection.set(id.clone(), focus_editor);
        if let Some(node) = self.store.find(id) {
            for observer in &self.observers {
                observer.on_select(node, focus_editor);
            }
        }
    }

    fn notify_cleared(&self) {
        for observer in &self.observers {
            observer.on_selection_cleared();
        }
    }

    fn notify(&self, notice: &Notice) {
        for observer in &self.observers {
            observer.on_notice(notice);
        }
    }
}
