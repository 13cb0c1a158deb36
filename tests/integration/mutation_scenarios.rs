use super::fixtures::{id_at, workspace};
use folio::content::ContentResolver;
use folio::workspace::NoticeLevel;
use folio::{Node, NodeId, TreeError};

#[test]
fn test_create_inside_folder_reveals_it() {
    let (mut ws, _) = workspace();
    let images = ws.create_folder("images", None).unwrap();
    assert!(!ws.find(&images).unwrap().is_open());

    let diagram = ws.create_file("diagram.png", Some(&images)).unwrap();

    assert!(ws.find(&images).unwrap().is_open());
    assert_eq!(ws.find(&diagram).unwrap().parent_id(), Some(&images));
}

#[test]
fn test_move_root_file_into_folder() {
    let (mut ws, _) = workspace();
    let images = ws.create_folder("images", None).unwrap();
    let file_x = ws.create_file("x.tex", None).unwrap();

    ws.move_node(&file_x, &images).unwrap();

    let store = ws.store();
    assert!(!store.roots().any(|r| r == &file_x));
    let children: Vec<&NodeId> = store
        .find(&images)
        .and_then(Node::as_folder)
        .unwrap()
        .children()
        .collect();
    assert_eq!(children, vec![&file_x]);
    assert_eq!(store.find(&file_x).unwrap().parent_id(), Some(&images));
    assert!(store.find(&images).unwrap().is_open());
}

#[test]
fn test_move_only_opens_destination() {
    let (mut ws, _) = workspace();
    let src = ws.create_folder("src", None).unwrap();
    let dst = ws.create_folder("dst", None).unwrap();
    let file = ws.create_file("a.tex", Some(&src)).unwrap();
    ws.set_folder_open(&src, false).unwrap();

    ws.move_node(&file, &dst).unwrap();

    assert!(!ws.find(&src).unwrap().is_open());
    assert!(ws.find(&dst).unwrap().is_open());
}

#[test]
fn test_move_into_descendant_leaves_tree_unchanged() {
    let (mut ws, log) = workspace();
    let a = ws.create_folder("a", None).unwrap();
    let b = ws.create_folder("b", Some(&a)).unwrap();
    let c = ws.create_folder("c", Some(&b)).unwrap();
    let before = ws.store().clone();
    let revision = ws.revision();

    let err = ws.move_node(&a, &c).unwrap_err();

    assert_eq!(
        err,
        TreeError::Cycle {
            dragged: a.clone(),
            target: c.clone()
        }
    );
    assert_eq!(ws.store(), &before);
    assert_eq!(ws.revision(), revision);
    let notices = log.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(notices[0].operation, "move");
}

#[test]
fn test_move_preconditions_are_checked_in_order() {
    let (mut ws, _) = workspace();
    let dir = ws.create_folder("dir", None).unwrap();
    let file = ws.create_file("a.tex", None).unwrap();

    assert_eq!(
        ws.move_node(&dir, &file),
        Err(TreeError::TargetNotFolder(file.clone()))
    );
    assert_eq!(ws.move_node(&dir, &dir), Err(TreeError::SelfParent));
    let gone = NodeId::from("gone");
    assert_eq!(ws.move_node(&gone, &dir), Err(TreeError::NotFound(gone)));
}

#[test]
fn test_move_into_current_parent_appends() {
    let (mut ws, _) = workspace();
    let dir = ws.create_folder("dir", None).unwrap();
    let first = ws.create_file("1.tex", Some(&dir)).unwrap();
    let second = ws.create_file("2.tex", Some(&dir)).unwrap();

    ws.move_node(&first, &dir).unwrap();

    let order: Vec<NodeId> = ws
        .store()
        .find(&dir)
        .and_then(Node::as_folder)
        .unwrap()
        .children()
        .cloned()
        .collect();
    assert_eq!(order, vec![second, first]);
}

#[test]
fn test_rename_preserves_extension() {
    let (mut ws, _) = workspace();
    let x = ws.create_file("x.tex", None).unwrap();
    ws.rename(&x, "y").unwrap();
    assert_eq!(ws.find(&x).unwrap().name(), "y.tex");

    ws.rename(&x, "refs.bib").unwrap();
    let node = ws.find(&x).unwrap();
    assert_eq!(node.name(), "refs.bib");
    assert_eq!(node.as_file().unwrap().kind().as_str(), "bib");
}

#[test]
fn test_delete_cascades_to_descendants() {
    let (mut ws, _) = workspace();
    let top = ws.create_folder("top", None).unwrap();
    let mid = ws.create_folder("mid", Some(&top)).unwrap();
    let leaf_a = ws.create_file("a.tex", Some(&mid)).unwrap();
    let leaf_b = ws.create_file("b.png", Some(&top)).unwrap();
    let keep = ws.create_file("keep.tex", None).unwrap();

    ws.delete(&top).unwrap();

    for gone in [&top, &mid, &leaf_a, &leaf_b] {
        assert!(ws.find(gone).is_none());
    }
    assert_eq!(ws.store().len(), 1);
    assert!(ws.find(&keep).is_some());
    assert!(ws.store().check_invariants().is_ok());
}

#[test]
fn test_delete_selected_falls_back_to_main_document() {
    let (mut ws, log) = workspace();
    ws.create_folder("empty", None).unwrap();
    let main = ws.create_file("main.tex", None).unwrap();
    let other = ws.create_file("chapter.tex", None).unwrap();
    ws.select(&other, true).unwrap();

    ws.delete(&other).unwrap();

    assert!(ws.selection().is(&main));
    assert!(!ws.selection().focus_editor());
    assert_eq!(log.last_selected(), Some(main));
}

#[test]
fn test_delete_unselected_keeps_selection() {
    let (mut ws, _) = workspace();
    let a = ws.create_file("a.tex", None).unwrap();
    let b = ws.create_file("b.tex", None).unwrap();
    ws.select(&a, false).unwrap();
    ws.delete(&b).unwrap();
    assert!(ws.selection().is(&a));
}

#[test]
fn test_delete_last_file_clears_selection() {
    let (mut ws, log) = workspace();
    let only = ws.create_file("only.tex", None).unwrap();
    ws.select(&only, false).unwrap();
    ws.delete(&only).unwrap();
    assert!(ws.selection().id().is_none());
    assert!(log
        .events()
        .contains(&folio::workspace::RecordedEvent::SelectionCleared));
}

#[test]
fn test_content_resolution_is_idempotent() {
    let (mut ws, _) = workspace();
    let store = folio::TreeStore::new()
        .insert_into(None, Node::new_file(NodeId::from("p"), "paper.tex"))
        .unwrap();
    let resolver = ContentResolver::default();
    let first = resolver.resolve(store.find(&NodeId::from("p")).unwrap());
    let second = resolver.resolve(store.find(&NodeId::from("p")).unwrap());
    assert_eq!(first, second);

    ws.load(store);
    let persisted = ws
        .find(&NodeId::from("p"))
        .and_then(Node::as_file)
        .and_then(|f| f.content())
        .map(str::to_string);
    assert_eq!(persisted, Some(first));
}

#[test]
fn test_path_addressing_after_moves() {
    let (mut ws, _) = workspace();
    let chapters = ws.create_folder("chapters", None).unwrap();
    ws.create_file("intro", None).unwrap();
    let intro = id_at(&ws, "intro.tex");
    ws.move_node(&intro, &chapters).unwrap();
    assert_eq!(ws.store().path_of(&intro).as_deref(), Some("chapters/intro.tex"));
    assert!(ws.store().find_by_path("intro.tex").is_none());
}
