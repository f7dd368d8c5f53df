use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::{prelude::DateTimeWithTimeZone, DeriveIden, FromQueryResult};
use serde::{Deserialize, Serialize};

use crate::{catalog::OptionKind, errors::ModelError};

/// Identifier of an option record. Generated ids are either UUID strings or
/// decimal numbers, both stored as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn into_inner(self) -> String { self.0 }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self { Self(value) }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self { Self(value.to_string()) }
}

/// Soft-delete state. Stored as the nullable `deleted_at` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Lifecycle::Deleted { at },
            None => Lifecycle::Active,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(*at),
        }
    }

    pub fn is_active(&self) -> bool { matches!(self, Lifecycle::Active) }
}

/// One row of an option table.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionRecord {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl OptionRecord {
    /// A fresh, active record stamped with `now`.
    pub fn new(id: RecordId, name: String, description: Option<String>, now: DateTime<Utc>) -> Self {
        Self { id, name, description, created_at: now, updated_at: now, lifecycle: Lifecycle::Active }
    }

    pub fn is_active(&self) -> bool { self.lifecycle.is_active() }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> { self.lifecycle.deleted_at() }

    /// Flip to deleted. Returns `false` when the record was already deleted,
    /// leaving the original timestamp untouched.
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_active() {
            return false;
        }
        self.lifecycle = Lifecycle::Deleted { at };
        self.updated_at = at;
        true
    }
}

/// Column identifiers shared by every option table.
#[derive(DeriveIden, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionColumn {
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl OptionColumn {
    pub const ALL: [OptionColumn; 6] = [
        OptionColumn::Id,
        OptionColumn::Name,
        OptionColumn::Description,
        OptionColumn::CreatedAt,
        OptionColumn::UpdatedAt,
        OptionColumn::DeletedAt,
    ];

    /// Columns rewritten when an upsert hits an existing id.
    pub const MUTABLE: [OptionColumn; 4] = [
        OptionColumn::Name,
        OptionColumn::Description,
        OptionColumn::UpdatedAt,
        OptionColumn::DeletedAt,
    ];
}

/// Storage shape of [`OptionRecord`].
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct OptionRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl From<OptionRow> for OptionRecord {
    fn from(row: OptionRow) -> Self {
        Self {
            id: RecordId(row.id),
            name: row.name,
            description: row.description,
            created_at: row.created_at.with_timezone(&Utc),
            updated_at: row.updated_at.with_timezone(&Utc),
            lifecycle: Lifecycle::from_deleted_at(row.deleted_at.map(|at| at.with_timezone(&Utc))),
        }
    }
}

impl From<&OptionRecord> for OptionRow {
    fn from(record: &OptionRecord) -> Self {
        Self {
            id: record.id.as_str().to_string(),
            name: record.name.clone(),
            description: record.description.clone(),
            created_at: record.created_at.into(),
            updated_at: record.updated_at.into(),
            deleted_at: record.deleted_at().map(Into::into),
        }
    }
}

/// Trimmed, non-blank name.
pub fn validate_name(name: &str) -> Result<String, ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions collapse to `None`; kinds that require one reject that.
pub fn validate_description(kind: &OptionKind, description: Option<&str>) -> Result<Option<String>, ModelError> {
    let normalized = description.map(str::trim).filter(|d| !d.is_empty()).map(str::to_string);
    if kind.description_required && normalized.is_none() {
        return Err(ModelError::Validation(format!("description required for {}", kind.title)));
    }
    Ok(normalized)
}
