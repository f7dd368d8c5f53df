use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument};

use models::catalog::OptionKind;
use models::id::IdGenerator;
use models::option::{self as model, OptionRecord, RecordId};

use crate::errors::ServiceError;
use crate::option::domain::{NewOption, OptionUpdate};
use crate::option::repository::OptionRepository;

/// Tunable rules that differ between deployments.
#[derive(Clone, Copy, Debug)]
pub struct ServicePolicy {
    /// Reject a bulk create that repeats a name inside its own payload.
    pub reject_batch_duplicates: bool,
}

impl Default for ServicePolicy {
    fn default() -> Self { Self { reject_batch_duplicates: true } }
}

/// Which records an update may touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    ActiveOnly,
    AnyState,
}

/// CRUD + soft-delete rules for one option kind.
///
/// Bulk operations validate the whole batch before the single repository
/// write, so a rejected batch persists nothing.
pub struct OptionService<R: OptionRepository> {
    repo: Arc<R>,
    ids: Arc<dyn IdGenerator>,
    kind: &'static OptionKind,
    policy: ServicePolicy,
}

impl<R: OptionRepository> OptionService<R> {
    pub fn new(repo: Arc<R>, ids: Arc<dyn IdGenerator>, kind: &'static OptionKind, policy: ServicePolicy) -> Self {
        Self { repo, ids, kind, policy }
    }

    pub fn kind(&self) -> &'static OptionKind { self.kind }

    pub fn repository(&self) -> &Arc<R> { &self.repo }

    fn entity(&self) -> &'static str { self.kind.title }

    fn build(&self, input: NewOption, now: DateTime<Utc>) -> Result<OptionRecord, ServiceError> {
        let name = model::validate_name(&input.name)?;
        let description = model::validate_description(self.kind, input.description.as_deref())?;
        Ok(OptionRecord::new(self.ids.next(), name, description, now))
    }

    fn apply(&self, mut existing: OptionRecord, update: &OptionUpdate, now: DateTime<Utc>) -> Result<OptionRecord, ServiceError> {
        existing.name = model::validate_name(&update.name)?;
        existing.description = model::validate_description(self.kind, update.description.as_deref())?;
        existing.updated_at = now;
        Ok(existing)
    }

    /// Requested ids absent from `found`, sorted and de-duplicated.
    fn missing_ids(requested: &[RecordId], found: &[OptionRecord]) -> Vec<RecordId> {
        let present: HashSet<&RecordId> = found.iter().map(|r| &r.id).collect();
        let mut missing: Vec<RecordId> = requested.iter().filter(|id| !present.contains(id)).cloned().collect();
        missing.sort();
        missing.dedup();
        missing
    }

    fn require_ids(&self, ids: &[RecordId]) -> Result<(), ServiceError> {
        if ids.is_empty() {
            return Err(ServiceError::NullInput(format!("{} id list is required", self.entity())));
        }
        Ok(())
    }

    /// Create one record; the name must be free among active records.
    #[instrument(skip(self, input), fields(kind = %self.kind.slug))]
    pub async fn save(&self, input: NewOption) -> Result<OptionRecord, ServiceError> {
        let record = self.build(input, Utc::now())?;
        if self.repo.exists_by_name(&record.name).await? {
            return Err(ServiceError::AlreadyExists(format!("{} with name {} already exists", self.entity(), record.name)));
        }
        let saved = self.repo.save(record).await?;
        info!(id = %saved.id, name = %saved.name, "option_created");
        Ok(saved)
    }

    /// Create many records atomically.
    #[instrument(skip(self, inputs), fields(kind = %self.kind.slug, count = inputs.len()))]
    pub async fn save_many(&self, inputs: Vec<NewOption>) -> Result<Vec<OptionRecord>, ServiceError> {
        if inputs.is_empty() {
            return Err(ServiceError::InvalidInput(format!("{} list must not be empty", self.entity())));
        }
        // one microsecond apart so listings keep the request order
        let now = Utc::now();
        let records = inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| self.build(input, now + Duration::microseconds(i as i64)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.name.as_str()) && self.policy.reject_batch_duplicates {
                return Err(ServiceError::AlreadyExists(format!("{} name {} repeated in request", self.entity(), record.name)));
            }
            if self.repo.exists_by_name(&record.name).await? {
                return Err(ServiceError::AlreadyExists(format!("{} with name {} already exists", self.entity(), record.name)));
            }
        }

        let saved = self.repo.save_all(records).await?;
        info!(count = saved.len(), "options_created");
        Ok(saved)
    }

    #[instrument(skip(self), fields(kind = %self.kind.slug))]
    pub async fn read_one(&self, id: &RecordId) -> Result<OptionRecord, ServiceError> {
        match self.repo.find_by_id(id).await? {
            Some(record) if record.is_active() => Ok(record),
            _ => Err(ServiceError::not_found(self.entity(), id)),
        }
    }

    /// Active records among `ids`, in request order. Unknown or deleted ids
    /// are skipped without error.
    #[instrument(skip(self, ids), fields(kind = %self.kind.slug, count = ids.len()))]
    pub async fn read_many(&self, ids: &[RecordId]) -> Result<Vec<OptionRecord>, ServiceError> {
        self.require_ids(ids)?;
        let mut found: HashMap<RecordId, OptionRecord> = self
            .repo
            .find_all_by_id(ids)
            .await?
            .into_iter()
            .filter(|r| r.is_active())
            .map(|r| (r.id.clone(), r))
            .collect();
        let out: Vec<OptionRecord> = ids.iter().filter_map(|id| found.remove(id)).collect();
        debug!(requested = ids.len(), returned = out.len(), "read_many");
        Ok(out)
    }

    pub async fn read_all(&self) -> Result<Vec<OptionRecord>, ServiceError> {
        self.repo.find_by_deleted_at_is_null().await
    }

    pub async fn hard_read_all(&self) -> Result<Vec<OptionRecord>, ServiceError> {
        self.repo.find_all().await
    }

    async fn update_in(&self, update: OptionUpdate, scope: Scope) -> Result<OptionRecord, ServiceError> {
        let existing = match self.repo.find_by_id(&update.id).await? {
            Some(r) if scope == Scope::AnyState || r.is_active() => r,
            _ => return Err(ServiceError::not_found(self.entity(), &update.id)),
        };
        let updated = self.apply(existing, &update, Utc::now())?;
        let saved = self.repo.save(updated).await?;
        info!(id = %saved.id, ?scope, "option_updated");
        Ok(saved)
    }

    async fn update_all_in(&self, updates: Vec<OptionUpdate>, scope: Scope) -> Result<Vec<OptionRecord>, ServiceError> {
        if updates.is_empty() {
            return Err(ServiceError::InvalidInput(format!("{} list must not be empty", self.entity())));
        }
        let ids: Vec<RecordId> = updates.iter().map(|u| u.id.clone()).collect();
        let eligible: Vec<OptionRecord> = self
            .repo
            .find_all_by_id(&ids)
            .await?
            .into_iter()
            .filter(|r| scope == Scope::AnyState || r.is_active())
            .collect();
        let missing = Self::missing_ids(&ids, &eligible);
        if !missing.is_empty() {
            return Err(ServiceError::missing(self.entity(), &missing));
        }

        // Repeated ids apply in order on top of each other
        let now = Utc::now();
        let mut staged: HashMap<RecordId, OptionRecord> = eligible.into_iter().map(|r| (r.id.clone(), r)).collect();
        let mut order: Vec<RecordId> = Vec::new();
        for update in &updates {
            let current = staged
                .remove(&update.id)
                .ok_or_else(|| ServiceError::not_found(self.entity(), &update.id))?;
            if !order.contains(&update.id) {
                order.push(update.id.clone());
            }
            staged.insert(update.id.clone(), self.apply(current, update, now)?);
        }
        let batch: Vec<OptionRecord> = order.iter().filter_map(|id| staged.remove(id)).collect();

        let saved = self.repo.save_all(batch).await?;
        info!(count = saved.len(), ?scope, "options_updated");
        Ok(saved)
    }

    /// Overwrite one active record.
    #[instrument(skip(self, update), fields(kind = %self.kind.slug, id = %update.id))]
    pub async fn update_one(&self, update: OptionUpdate) -> Result<OptionRecord, ServiceError> {
        self.update_in(update, Scope::ActiveOnly).await
    }

    /// Overwrite many active records; one unknown or deleted id fails the batch.
    #[instrument(skip(self, updates), fields(kind = %self.kind.slug, count = updates.len()))]
    pub async fn update_many(&self, updates: Vec<OptionUpdate>) -> Result<Vec<OptionRecord>, ServiceError> {
        self.update_all_in(updates, Scope::ActiveOnly).await
    }

    /// Overwrite one record whatever its delete state; the state is kept.
    #[instrument(skip(self, update), fields(kind = %self.kind.slug, id = %update.id))]
    pub async fn hard_update(&self, update: OptionUpdate) -> Result<OptionRecord, ServiceError> {
        self.update_in(update, Scope::AnyState).await
    }

    #[instrument(skip(self, updates), fields(kind = %self.kind.slug, count = updates.len()))]
    pub async fn hard_update_all(&self, updates: Vec<OptionUpdate>) -> Result<Vec<OptionRecord>, ServiceError> {
        self.update_all_in(updates, Scope::AnyState).await
    }

    #[instrument(skip(self), fields(kind = %self.kind.slug))]
    pub async fn soft_delete(&self, id: &RecordId) -> Result<OptionRecord, ServiceError> {
        let mut record = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(self.entity(), id))?;
        if !record.mark_deleted(Utc::now()) {
            return Err(ServiceError::AlreadyDeleted(format!("{} with id {} is already deleted", self.entity(), id)));
        }
        let saved = self.repo.save(record).await?;
        info!(id = %saved.id, "option_soft_deleted");
        Ok(saved)
    }

    /// Soft-delete every id. Any unknown id fails the whole call; records
    /// that are already deleted keep their original timestamp.
    #[instrument(skip(self, ids), fields(kind = %self.kind.slug, count = ids.len()))]
    pub async fn soft_delete_many(&self, ids: &[RecordId]) -> Result<Vec<OptionRecord>, ServiceError> {
        self.require_ids(ids)?;
        let found = self.repo.find_all_by_id(ids).await?;
        let missing = Self::missing_ids(ids, &found);
        if !missing.is_empty() {
            return Err(ServiceError::missing(self.entity(), &missing));
        }

        let now = Utc::now();
        let changed: Vec<OptionRecord> = found
            .into_iter()
            .filter_map(|mut r| r.mark_deleted(now).then_some(r))
            .collect();
        if changed.is_empty() {
            return Ok(changed);
        }
        let saved = self.repo.save_all(changed).await?;
        info!(count = saved.len(), "options_soft_deleted");
        Ok(saved)
    }

    #[instrument(skip(self), fields(kind = %self.kind.slug))]
    pub async fn hard_delete(&self, id: &RecordId) -> Result<(), ServiceError> {
        if !self.repo.delete_by_id(id).await? {
            return Err(ServiceError::not_found(self.entity(), id));
        }
        info!(id = %id, "option_hard_deleted");
        Ok(())
    }

    /// Remove every id. Any unknown id fails the whole call.
    #[instrument(skip(self, ids), fields(kind = %self.kind.slug, count = ids.len()))]
    pub async fn hard_delete_many(&self, ids: &[RecordId]) -> Result<u64, ServiceError> {
        self.require_ids(ids)?;
        let found = self.repo.find_all_by_id(ids).await?;
        let missing = Self::missing_ids(ids, &found);
        if !missing.is_empty() {
            return Err(ServiceError::missing(self.entity(), &missing));
        }
        let found_ids: Vec<RecordId> = found.into_iter().map(|r| r.id).collect();
        let removed = self.repo.delete_all_by_id(&found_ids).await?;
        info!(removed, "options_hard_deleted");
        Ok(removed)
    }

    #[instrument(skip(self), fields(kind = %self.kind.slug))]
    pub async fn hard_delete_all(&self) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_all().await?;
        info!(removed, "options_purged");
        Ok(removed)
    }
}
