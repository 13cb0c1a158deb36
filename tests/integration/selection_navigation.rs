use super::fixtures::{id_at, workspace};
use folio::presentation::{dispatch, Gesture};
use folio::tree::NodeView;
use folio::workspace::Key;
use folio::{NodeId, TreeStore};

// main.tex
// figures/ (closed)
//   plot.png
// chapters/ (open)
//   intro.tex
//   notes/ (open)
//     todo.md
// refs.bib
fn project() -> TreeStore {
    let json = r#"[
        {"type": "file", "id": "main", "name": "main.tex"},
        {"type": "folder", "id": "figures", "name": "figures", "children": [
            {"type": "file", "id": "plot", "name": "plot.png"}
        ]},
        {"type": "folder", "id": "chapters", "name": "chapters", "is_open": true, "children": [
            {"type": "file", "id": "intro", "name": "intro.tex"},
            {"type": "folder", "id": "notes", "name": "notes", "is_open": true, "children": [
                {"type": "file", "id": "todo", "name": "todo.md", "content": "- [ ] write"}
            ]}
        ]},
        {"type": "file", "id": "refs", "name": "refs.bib"}
    ]"#;
    let views: Vec<NodeView> = serde_json::from_str(json).unwrap();
    TreeStore::from_views(&views).unwrap()
}

fn id(raw: &str) -> NodeId {
    NodeId::from(raw)
}

#[test]
fn test_load_selects_first_file_depth_first() {
    let (mut ws, log) = workspace();
    ws.load(project());
    assert!(ws.selection().is(&id("main")));
    assert_eq!(log.last_selected(), Some(id("main")));
}

#[test]
fn test_default_selection_descends_into_folders_first() {
    let (mut ws, _) = workspace();
    let views: Vec<NodeView> = serde_json::from_str(
        r#"[
            {"type": "folder", "id": "d", "name": "d", "children": [
                {"type": "file", "id": "deep", "name": "deep.tex"}
            ]},
            {"type": "file", "id": "top", "name": "top.tex"}
        ]"#,
    )
    .unwrap();
    ws.load(TreeStore::from_views(&views).unwrap());
    assert!(ws.selection().is(&id("deep")));
}

#[test]
fn test_empty_forest_has_no_selection() {
    let (mut ws, log) = workspace();
    ws.load(TreeStore::new());
    assert!(ws.selection().id().is_none());
    assert!(log
        .events()
        .contains(&folio::workspace::RecordedEvent::SelectionCleared));
}

#[test]
fn test_visible_order_hides_closed_folders() {
    let store = project();
    let order: Vec<String> = store
        .visible_order()
        .into_iter()
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(
        order,
        vec!["main", "figures", "chapters", "intro", "notes", "todo", "refs"]
    );
}

#[test]
fn test_next_and_previous_walk_visible_files() {
    let (mut ws, _) = workspace();
    ws.load(project());

    let mut visited = Vec::new();
    while let Some(next) = ws.navigate(Key::Next) {
        visited.push(next.to_string());
    }
    assert_eq!(visited, vec!["intro", "todo", "refs"]);
    assert!(ws.selection().is(&id("refs")));

    assert_eq!(ws.navigate(Key::Previous), Some(id("todo")));
    assert_eq!(ws.navigate(Key::Previous), Some(id("intro")));
    assert_eq!(ws.navigate(Key::Previous), Some(id("main")));
    assert_eq!(ws.navigate(Key::Previous), None);
}

#[test]
fn test_opening_folder_extends_navigation() {
    let (mut ws, _) = workspace();
    ws.load(project());
    dispatch(&mut ws, Gesture::DoubleClick(id("figures"))).unwrap();
    assert_eq!(ws.navigate(Key::Next), Some(id("plot")));
}

#[test]
fn test_selection_resolves_template_content() {
    let (mut ws, _) = workspace();
    ws.load(project());
    ws.select(&id("refs"), true).unwrap();
    let content = ws.selected().unwrap().as_file().unwrap().content().unwrap();
    assert!(content.starts_with("@article"));

    // Existing content is left alone.
    ws.select(&id("todo"), false).unwrap();
    let todo = ws.selected().unwrap().as_file().unwrap().content();
    assert_eq!(todo, Some("- [ ] write"));
}

#[test]
fn test_collapse_all_then_navigate_skips_hidden_files() {
    let (mut ws, _) = workspace();
    ws.load(project());
    ws.collapse_all();
    assert_eq!(ws.navigate(Key::Next), Some(id("refs")));
    ws.expand_all();
    assert_eq!(id_at(&ws, "figures/plot.png"), id("plot"));
    assert!(ws.find(&id("figures")).unwrap().is_open());
}
