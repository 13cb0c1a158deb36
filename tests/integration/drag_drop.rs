use super::fixtures::workspace;
use folio::presentation::{dispatch, rows, Gesture};
use folio::TreeError;

#[test]
fn test_drag_over_and_leave_do_not_touch_tree() {
    let (mut ws, _) = workspace();
    let dir = ws.create_folder("dir", None).unwrap();
    let file = ws.create_file("a.tex", None).unwrap();
    let before = ws.store().clone();

    dispatch(&mut ws, Gesture::DragStart(file.clone())).unwrap();
    dispatch(&mut ws, Gesture::DragOver(dir.clone())).unwrap();
    assert_eq!(ws.drag_state().drop_target(), Some(&dir));
    dispatch(&mut ws, Gesture::DragLeave).unwrap();
    assert_eq!(ws.drag_state().drop_target(), None);
    assert_eq!(ws.drag_state().dragged(), Some(&file));

    assert_eq!(ws.store(), &before);
}

#[test]
fn test_drop_revalidates_dragged_node() {
    let (mut ws, _) = workspace();
    let dir = ws.create_folder("dir", None).unwrap();
    let file = ws.create_file("a.tex", None).unwrap();

    ws.drag_start(&file).unwrap();
    // The tree changes between drag start and drop.
    ws.delete(&file).unwrap();
    let before = ws.store().clone();

    assert_eq!(ws.drop_on(&dir), Err(TreeError::NotFound(file)));
    assert_eq!(ws.store(), &before);
    assert!(!ws.drag_state().is_dragging());
}

#[test]
fn test_drop_uses_current_subtree() {
    let (mut ws, _) = workspace();
    let target = ws.create_folder("target", None).unwrap();
    let moving = ws.create_folder("moving", None).unwrap();

    ws.drag_start(&moving).unwrap();
    // Added after the drag began; still travels with the folder.
    let late = ws.create_file("late.tex", Some(&moving)).unwrap();
    ws.drop_on(&target).unwrap();

    assert_eq!(ws.store().path_of(&late).as_deref(), Some("target/moving/late.tex"));
}

#[test]
fn test_drop_on_file_is_rejected() {
    let (mut ws, log) = workspace();
    let a = ws.create_file("a.tex", None).unwrap();
    let b = ws.create_file("b.tex", None).unwrap();

    dispatch(&mut ws, Gesture::DragStart(a.clone())).unwrap();
    let err = dispatch(&mut ws, Gesture::Drop(b.clone())).unwrap_err();

    assert_eq!(err, TreeError::TargetNotFolder(b));
    assert_eq!(ws.find(&a).unwrap().parent_id(), None);
    assert_eq!(log.notices().len(), 1);
    assert!(rows(&ws).iter().all(|r| !r.is_drop_target));
}

#[test]
fn test_drag_end_cancels() {
    let (mut ws, _) = workspace();
    let dir = ws.create_folder("dir", None).unwrap();
    let file = ws.create_file("a.tex", None).unwrap();
    dispatch(&mut ws, Gesture::DragStart(file.clone())).unwrap();
    dispatch(&mut ws, Gesture::DragEnd).unwrap();
    assert_eq!(ws.drop_on(&dir), Err(TreeError::NotDragging));
    assert_eq!(ws.find(&file).unwrap().parent_id(), None);
}
