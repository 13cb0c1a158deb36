//! Node identity generation
//!
//! Ids are opaque strings unique within a process lifetime. They are not secrets.

use crate::types::NodeId;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh node ids
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> NodeId;
}

/// Random v4 UUIDs, simple (hyphen-free) form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&self) -> NodeId {
        NodeId::new(Uuid::new_v4().simple().to_string())
    }
}

/// Monotonic counter ids (`<prefix>-1`, `<prefix>-2`, ...). Deterministic, for tests and scripts.
#[derive(Debug)]
pub struct SequentialIdSource {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIdSource {
    fn default() -> Self {
        Self::new("node")
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&self) -> NodeId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        NodeId::new(format!("{}-{}", self.prefix, n))
    }
}
