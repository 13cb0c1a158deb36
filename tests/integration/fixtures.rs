use folio::config::FolioConfig;
use folio::identity::SequentialIdSource;
use folio::workspace::{EventLog, Workspace};
use folio::{NodeId, TreeStore};

/// Workspace with predictable ids ("t-1", "t-2", ...) and an attached event log.
pub fn workspace() -> (Workspace, EventLog) {
    let log = EventLog::new();
    let mut ws = Workspace::new(&FolioConfig::default())
        .with_id_source(Box::new(SequentialIdSource::new("t")));
    ws.add_observer(Box::new(log.clone()));
    (ws, log)
}

pub fn id_at(ws: &Workspace, path: &str) -> NodeId {
    ws.store()
        .find_by_path(path)
        .unwrap_or_else(|| panic!("no node at {}", path))
        .id()
        .clone()
}

/// Ids of every node in the store, depth-first.
pub fn all_ids(store: &TreeStore) -> Vec<NodeId> {
    store.depth_first().map(|n| n.id().clone()).collect()
}
