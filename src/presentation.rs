//! Presentation Adapter
//!
//! Turns the tree into render rows and forwards user gestures to workspace
//! operations. Holds no state of its own.

use crate::error::TreeError;
use crate::tree::{Node, NodeView};
use crate::types::NodeId;
use crate::workspace::{Key, Workspace};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde::Serialize;

/// One visible row of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub id: NodeId,
    pub name: String,
    pub depth: usize,
    pub is_folder: bool,
    pub is_open: bool,
    pub is_selected: bool,
    pub is_drop_target: bool,
    pub kind: Option<String>,
}

/// Rows in visible order. Closed folders hide their descendants.
pub fn rows(workspace: &Workspace) -> Vec<TreeRow> {
    let store = workspace.store();
    let drop_target = workspace.drag_state().drop_target();
    store
        .visible_order()
        .into_iter()
        .filter_map(|entry| {
            let node = store.find(&entry.id)?;
            Some(TreeRow {
                is_selected: workspace.selection().is(&entry.id),
                is_drop_target: drop_target == Some(&entry.id),
                name: node.name().to_string(),
                depth: entry.depth,
                is_folder: node.is_folder(),
                is_open: node.is_open(),
                kind: node.as_file().map(|f| f.kind().to_string()),
                id: entry.id,
            })
        })
        .collect()
}

/// Context-menu actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextAction {
    NewFile { name: String },
    NewFolder { name: String },
    Rename { name: String },
    Delete,
}

/// Pointer and keyboard input from the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Click(NodeId),
    DoubleClick(NodeId),
    DragStart(NodeId),
    DragOver(NodeId),
    DragLeave,
    Drop(NodeId),
    DragEnd,
    Key(Key),
    Context {
        /// Row the menu was opened on; `None` for the empty area (root level)
        target: Option<NodeId>,
        action: ContextAction,
    },
}

/// Route a gesture to the matching workspace operation.
pub fn dispatch(workspace: &mut Workspace, gesture: Gesture) -> Result<(), TreeError> {
    match gesture {
        Gesture::Click(id) => match workspace.find(&id) {
            Some(Node::Folder(_)) => workspace.toggle_folder(&id),
            Some(Node::File(_)) => workspace.select(&id, false),
            None => Err(TreeError::NotFound(id)),
        },
        Gesture::DoubleClick(id) => workspace.activate(&id),
        Gesture::DragStart(id) => workspace.drag_start(&id),
        Gesture::DragOver(id) => {
            workspace.drag_over(&id);
            Ok(())
        }
        Gesture::DragLeave => {
            workspace.drag_leave();
            Ok(())
        }
        Gesture::Drop(target) => workspace.drop_on(&target),
        Gesture::DragEnd => {
            workspace.cancel_drag();
            Ok(())
        }
        Gesture::Key(key) => {
            workspace.navigate(key);
            Ok(())
        }
        Gesture::Context { target, action } => {
            run_context_action(workspace, target.as_ref(), action)
        }
    }
}

fn run_context_action(
    workspace: &mut Workspace,
    target: Option<&NodeId>,
    action: ContextAction,
) -> Result<(), TreeError> {
    // New entries opened on a file go next to it, in the file's folder.
    let parent_for_new = |ws: &Workspace| -> Option<NodeId> {
        let id = target?;
        let node = ws.find(id)?;
        if node.is_folder() {
            Some(id.clone())
        } else {
            node.parent_id().cloned()
        }
    };

    match action {
        ContextAction::NewFile { name } => {
            let parent = parent_for_new(workspace);
            workspace.create_file(&name, parent.as_ref()).map(|_| ())
        }
        ContextAction::NewFolder { name } => {
            let parent = parent_for_new(workspace);
            workspace.create_folder(&name, parent.as_ref()).map(|_| ())
        }
        // Rename and delete need a row; on the empty area they do nothing.
        ContextAction::Rename { name } => match target {
            Some(id) => workspace.rename(id, &name),
            None => Ok(()),
        },
        ContextAction::Delete => match target {
            Some(id) => workspace.delete(id),
            None => Ok(()),
        },
    }
}

/// Indented plain-text rendering; `color` highlights the selected row.
pub fn render_text(rows: &[TreeRow], color: bool) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = match (row.is_folder, row.is_open) {
            (true, true) => "v ",
            (true, false) => "> ",
            (false, _) => "  ",
        };
        let label = if row.is_folder {
            format!("{}/", row.name)
        } else {
            row.name.clone()
        };
        let line = format!("{}{}{}", "  ".repeat(row.depth), marker, label);
        match (row.is_selected, color) {
            (true, true) => out.push_str(&format!("{}", line.bold().green())),
            (true, false) => out.push_str(&format!("{} *", line)),
            (false, _) => out.push_str(&line),
        }
        out.push('\n');
    }
    out
}

pub fn render_table(rows: &[TreeRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Kind", "Depth", "Open", "Selected", "Id"]);
    for row in rows {
        table.add_row(vec![
            format!("{}{}", "  ".repeat(row.depth), row.name),
            row.kind.clone().unwrap_or_else(|| "folder".to_string()),
            row.depth.to_string(),
            if row.is_folder { row.is_open.to_string() } else { "-".to_string() },
            if row.is_selected { "*".to_string() } else { String::new() },
            row.id.to_string(),
        ]);
    }
    table.to_string()
}

/// Pretty JSON of the nested forest.
pub fn render_json(views: &[NodeView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(views)
}
