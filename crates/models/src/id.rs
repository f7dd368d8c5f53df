//! Identifier generation for new option records.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::Serialize;
use uuid::Uuid;

use crate::option::RecordId;

/// How a kind assigns ids to new records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    Uuid,
    Sequential,
}

/// Source of fresh record ids. Injected into each service.
pub trait IdGenerator: Send + Sync {
    fn next(&self) -> RecordId;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next(&self) -> RecordId { RecordId::new(Uuid::new_v4().to_string()) }
}

/// Monotonic decimal ids, continuing after the highest id already stored.
#[derive(Debug)]
pub struct SequentialGenerator {
    last: AtomicU64,
}

impl SequentialGenerator {
    pub fn starting_after(last: u64) -> Self { Self { last: AtomicU64::new(last) } }
}

impl IdGenerator for SequentialGenerator {
    fn next(&self) -> RecordId {
        let n = self.last.fetch_add(1, Ordering::SeqCst) + 1;
        RecordId::new(n.to_string())
    }
}

/// Highest numeric id among `ids`; non-numeric ids are ignored.
pub fn max_numeric<'a>(ids: impl IntoIterator<Item = &'a RecordId>) -> u64 {
    ids.into_iter().filter_map(|id| id.as_str().parse::<u64>().ok()).max().unwrap_or(0)
}

pub fn generator_for(strategy: IdStrategy, last_numeric: u64) -> Arc<dyn IdGenerator> {
    match strategy {
        IdStrategy::Uuid => Arc::new(UuidGenerator),
        IdStrategy::Sequential => Arc::new(SequentialGenerator::starting_after(last_numeric)),
    }
}
