use super::fixtures::{all_ids, workspace};
use folio::workspace::{Key, Workspace};
use folio::{NodeId, TreeStore};
use proptest::prelude::*;
use std::collections::HashSet;

/// Operation over node positions; indices are taken modulo the current node count.
#[derive(Debug, Clone)]
enum Op {
    CreateFile { parent: Option<usize> },
    CreateFolder { parent: Option<usize> },
    Rename { node: usize },
    Delete { node: usize },
    Move { node: usize, target: usize },
    Toggle { node: usize },
    Select { node: usize },
    Navigate(bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        proptest::option::of(0usize..64).prop_map(|parent| Op::CreateFile { parent }),
        proptest::option::of(0usize..64).prop_map(|parent| Op::CreateFolder { parent }),
        (0usize..64).prop_map(|node| Op::Rename { node }),
        (0usize..64).prop_map(|node| Op::Delete { node }),
        (0usize..64, 0usize..64).prop_map(|(node, target)| Op::Move { node, target }),
        (0usize..64).prop_map(|node| Op::Toggle { node }),
        (0usize..64).prop_map(|node| Op::Select { node }),
        any::<bool>().prop_map(Op::Navigate),
    ]
}

fn pick(ids: &[NodeId], index: usize) -> Option<NodeId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].clone())
    }
}

/// Apply one operation; rejections are expected and ignored.
fn apply(ws: &mut Workspace, op: &Op, counter: usize) {
    let ids = all_ids(ws.store());
    let _ = match op {
        Op::CreateFile { parent } => {
            let parent = parent.and_then(|p| pick(&ids, p));
            ws.create_file(&format!("f{}", counter), parent.as_ref()).map(|_| ())
        }
        Op::CreateFolder { parent } => {
            let parent = parent.and_then(|p| pick(&ids, p));
            ws.create_folder(&format!("d{}", counter), parent.as_ref()).map(|_| ())
        }
        Op::Rename { node } => match pick(&ids, *node) {
            Some(id) => ws.rename(&id, &format!("r{}", counter)),
            None => Ok(()),
        },
        Op::Delete { node } => match pick(&ids, *node) {
            Some(id) => ws.delete(&id),
            None => Ok(()),
        },
        Op::Move { node, target } => match (pick(&ids, *node), pick(&ids, *target)) {
            (Some(id), Some(target)) => ws.move_node(&id, &target),
            _ => Ok(()),
        },
        Op::Toggle { node } => match pick(&ids, *node) {
            Some(id) => ws.toggle_folder(&id),
            None => Ok(()),
        },
        Op::Select { node } => match pick(&ids, *node) {
            Some(id) => ws.select(&id, false),
            None => Ok(()),
        },
        Op::Navigate(forward) => {
            ws.navigate(if *forward { Key::Next } else { Key::Previous });
            Ok(())
        }
    };
}

fn assert_structure(store: &TreeStore) {
    assert_eq!(store.check_invariants(), Ok(()));

    // Uniqueness: depth-first visits every stored node exactly once.
    let ids = all_ids(store);
    let unique: HashSet<&NodeId> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids.len(), store.len());

    for id in &ids {
        let node = store.find(id).unwrap();
        // Parent consistency.
        match node.parent_id() {
            None => assert!(store.roots().any(|r| r == id)),
            Some(pid) => {
                let parent = store.find(pid).and_then(|p| p.as_folder()).unwrap();
                assert!(parent.children().any(|c| c == id));
            }
        }
        // Acyclicity.
        if node.is_folder() {
            assert!(!store.subtree_ids(id).iter().skip(1).any(|d| d == id));
            assert!(!store.is_ancestor(id, id));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_random_operations_preserve_structure(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let (mut ws, _) = workspace();
        for (counter, op) in ops.iter().enumerate() {
            apply(&mut ws, op, counter);
            assert_structure(ws.store());
            prop_assert!(ws.selection().is_valid_in(ws.store()));
            if let Some(selected) = ws.selected() {
                prop_assert!(selected.is_file());
            }
        }
    }

    #[test]
    fn prop_rejected_move_leaves_store_equal(ops in proptest::collection::vec(op_strategy(), 1..40), node in 0usize..64, target in 0usize..64) {
        let (mut ws, _) = workspace();
        for (counter, op) in ops.iter().enumerate() {
            apply(&mut ws, op, counter);
        }
        let ids = all_ids(ws.store());
        if let (Some(id), Some(target)) = (pick(&ids, node), pick(&ids, target)) {
            let before = ws.store().clone();
            if ws.move_node(&id, &target).is_err() {
                prop_assert_eq!(ws.store(), &before);
            } else {
                prop_assert_eq!(ws.find(&id).unwrap().parent_id(), Some(&target));
            }
        }
    }
}
