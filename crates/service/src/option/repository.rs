use async_trait::async_trait;
use models::option::{OptionRecord, RecordId};

use crate::errors::ServiceError;

/// Persistence gateway for one option table.
///
/// Bulk writes are atomic: either every record is written/removed or none is.
#[async_trait]
pub trait OptionRepository: Send + Sync {
    /// Insert or overwrite by id.
    async fn save(&self, record: OptionRecord) -> Result<OptionRecord, ServiceError>;
    async fn save_all(&self, records: Vec<OptionRecord>) -> Result<Vec<OptionRecord>, ServiceError>;

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<OptionRecord>, ServiceError>;
    /// Missing ids are silently omitted.
    async fn find_all_by_id(&self, ids: &[RecordId]) -> Result<Vec<OptionRecord>, ServiceError>;
    async fn find_by_deleted_at_is_null(&self) -> Result<Vec<OptionRecord>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<OptionRecord>, ServiceError>;

    /// Only active records count.
    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError>;
    async fn exists_by_id(&self, id: &RecordId) -> Result<bool, ServiceError>;

    async fn delete_by_id(&self, id: &RecordId) -> Result<bool, ServiceError>;
    async fn delete_all_by_id(&self, ids: &[RecordId]) -> Result<u64, ServiceError>;
    async fn delete_all(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory repository for tests and local runs
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct InMemoryOptionRepository {
        rows: Mutex<BTreeMap<RecordId, OptionRecord>>,
    }

    impl InMemoryOptionRepository {
        fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<RecordId, OptionRecord>>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("in-memory store poisoned".into()))
        }

        /// Same ordering as the SQL repository: creation time, then id.
        fn sorted<'a>(records: impl Iterator<Item = &'a OptionRecord>) -> Vec<OptionRecord> {
            let mut out: Vec<OptionRecord> = records.cloned().collect();
            out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
            out
        }
    }

    #[async_trait]
    impl OptionRepository for InMemoryOptionRepository {
        async fn save(&self, record: OptionRecord) -> Result<OptionRecord, ServiceError> {
            self.rows()?.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        async fn save_all(&self, records: Vec<OptionRecord>) -> Result<Vec<OptionRecord>, ServiceError> {
            let mut rows = self.rows()?;
            for record in &records {
                rows.insert(record.id.clone(), record.clone());
            }
            Ok(records)
        }

        async fn find_by_id(&self, id: &RecordId) -> Result<Option<OptionRecord>, ServiceError> {
            Ok(self.rows()?.get(id).cloned())
        }

        async fn find_all_by_id(&self, ids: &[RecordId]) -> Result<Vec<OptionRecord>, ServiceError> {
            let rows = self.rows()?;
            Ok(Self::sorted(rows.values().filter(|r| ids.contains(&r.id))))
        }

        async fn find_by_deleted_at_is_null(&self) -> Result<Vec<OptionRecord>, ServiceError> {
            let rows = self.rows()?;
            Ok(Self::sorted(rows.values().filter(|r| r.is_active())))
        }

        async fn find_all(&self) -> Result<Vec<OptionRecord>, ServiceError> {
            let rows = self.rows()?;
            Ok(Self::sorted(rows.values()))
        }

        async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
            Ok(self.rows()?.values().any(|r| r.is_active() && r.name == name))
        }

        async fn exists_by_id(&self, id: &RecordId) -> Result<bool, ServiceError> {
            Ok(self.rows()?.contains_key(id))
        }

        async fn delete_by_id(&self, id: &RecordId) -> Result<bool, ServiceError> {
            Ok(self.rows()?.remove(id).is_some())
        }

        async fn delete_all_by_id(&self, ids: &[RecordId]) -> Result<u64, ServiceError> {
            let mut rows = self.rows()?;
            let removed = ids.iter().filter(|id| rows.remove(*id).is_some()).count();
            Ok(removed as u64)
        }

        async fn delete_all(&self) -> Result<u64, ServiceError> {
            let mut rows = self.rows()?;
            let n = rows.len() as u64;
            rows.clear();
            Ok(n)
        }
    }
}
