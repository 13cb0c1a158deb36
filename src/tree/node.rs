//! Workspace node types
//!
//! Structural fields (id, parent, children) are only writable from inside the
//! `tree` module, so callers outside the store cannot break parent/child lock-step.

use crate::tree::names;
use crate::types::{FileKind, NodeId, Timestamp};
use im::Vector;

/// File node representation
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    pub(super) id: NodeId,
    pub(super) parent: Option<NodeId>,
    pub(super) name: String,
    pub(super) kind: FileKind,
    pub(super) content: Option<String>,
    pub(super) last_modified: Option<Timestamp>,
}

/// Folder node representation
#[derive(Debug, Clone, PartialEq)]
pub struct FolderNode {
    pub(super) id: NodeId,
    pub(super) parent: Option<NodeId>,
    pub(super) name: String,
    pub(super) is_open: bool,
    pub(super) children: Vector<NodeId>,
}

/// Workspace node type
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl FileNode {
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn last_modified(&self) -> Option<Timestamp> {
        self.last_modified
    }
}

impl FolderNode {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn children(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.children.iter()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl Node {
    /// A detached file; `parent` is assigned when the store inserts it.
    pub fn new_file(id: NodeId, name: impl Into<String>) -> Self {
        let name = name.into();
        Node::File(FileNode {
            id,
            parent: None,
            kind: names::kind_for_name(&name),
            name,
            content: None,
            last_modified: None,
        })
    }

    /// A detached, closed, empty folder.
    pub fn new_folder(id: NodeId, name: impl Into<String>) -> Self {
        Node::Folder(FolderNode {
            id,
            parent: None,
            name: name.into(),
            is_open: false,
            children: Vector::new(),
        })
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        if let Node::File(file) = &mut self {
            file.content = Some(content.into());
        }
        self
    }

    pub fn with_last_modified(mut self, at: Option<Timestamp>) -> Self {
        if let Node::File(file) = &mut self {
            file.last_modified = at;
        }
        self
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Node::File(f) => &f.id,
            Node::Folder(d) => &d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Folder(d) => &d.name,
        }
    }

    pub fn parent_id(&self) -> Option<&NodeId> {
        match self {
            Node::File(f) => f.parent.as_ref(),
            Node::Folder(d) => d.parent.as_ref(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(f) => Some(f),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Node::Folder(d) => Some(d),
            Node::File(_) => None,
        }
    }

    /// Open state; always false for files.
    pub fn is_open(&self) -> bool {
        matches!(self, Node::Folder(d) if d.is_open)
    }

    /// Set the display name. For files the kind follows the new name.
    pub fn set_name(&mut self, name: String) {
        match self {
            Node::File(f) => {
                f.kind = names::kind_for_name(&name);
                f.name = name;
            }
            Node::Folder(d) => d.name = name,
        }
    }

    /// No-op on files.
    pub fn set_open(&mut self, open: bool) {
        if let Node::Folder(d) = self {
            d.is_open = open;
        }
    }

    /// No-op on folders.
    pub fn set_content(&mut self, content: String) {
        if let Node::File(f) = self {
            f.content = Some(content);
        }
    }

    pub(super) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::File(f) => f.parent = parent,
            Node::Folder(d) => d.parent = parent,
        }
    }

    pub(super) fn children_mut(&mut self) -> Option<&mut Vector<NodeId>> {
        match self {
            Node::Folder(d) => Some(&mut d.children),
            Node::File(_) => None,
        }
    }

    pub(super) fn child_ids(&self) -> Option<&Vector<NodeId>> {
        match self {
            Node::Folder(d) => Some(&d.children),
            Node::File(_) => None,
        }
    }
}
