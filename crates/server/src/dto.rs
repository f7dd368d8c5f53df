//! Wire types and the explicit conversions between them and the domain.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use models::catalog::OptionKind;
use models::id::IdStrategy;
use models::option::{OptionRecord, RecordId};
use service::option::domain::{NewOption, OptionUpdate};

use crate::errors::JsonApiError;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOptionRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateOptionRequest {
    /// Sequential kinds may send their id as a JSON number.
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn id_from_text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionKindResponse {
    pub slug: String,
    pub title: String,
    pub base_path: String,
    pub id_strategy: String,
    pub description_required: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Comma separated ids; both `id_list` and `idList` are accepted.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IdListQuery {
    #[serde(alias = "idList")]
    pub id_list: Option<String>,
}

pub fn to_new_option(req: CreateOptionRequest) -> NewOption {
    NewOption { name: req.name, description: req.description }
}

pub fn to_option_update(req: UpdateOptionRequest) -> OptionUpdate {
    OptionUpdate { id: RecordId::new(req.id), name: req.name, description: req.description }
}

pub fn to_response(record: OptionRecord) -> OptionResponse {
    let deleted_at = record.deleted_at();
    OptionResponse {
        id: record.id.into_inner(),
        name: record.name,
        description: record.description,
        created_at: record.created_at,
        updated_at: record.updated_at,
        deleted_at,
    }
}

pub fn to_responses(records: Vec<OptionRecord>) -> Vec<OptionResponse> {
    records.into_iter().map(to_response).collect()
}

pub fn to_kind_response(kind: &OptionKind) -> OptionKindResponse {
    OptionKindResponse {
        slug: kind.slug.to_string(),
        title: kind.title.to_string(),
        base_path: kind.base_path(),
        id_strategy: match kind.id_strategy {
            IdStrategy::Uuid => "uuid",
            IdStrategy::Sequential => "sequential",
        }
        .to_string(),
        description_required: kind.description_required,
    }
}

/// Decode a JSON body. An empty body or a literal `null` is a missing input;
/// anything else that fails to decode is invalid.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, JsonApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(JsonApiError::null_input("request body is required"));
    }
    let value: Option<T> = serde_json::from_slice(body).map_err(|e| JsonApiError::invalid_input(e.to_string()))?;
    value.ok_or_else(|| JsonApiError::null_input("request body is required"))
}

impl IdQuery {
    pub fn require(self) -> Result<RecordId, JsonApiError> {
        match self.id.map(|s| s.trim().to_string()) {
            Some(id) if !id.is_empty() => Ok(RecordId::new(id)),
            _ => Err(JsonApiError::null_input("id is required")),
        }
    }
}

impl IdListQuery {
    pub fn require(self) -> Result<Vec<RecordId>, JsonApiError> {
        let ids = parse_id_list(self.id_list.as_deref().unwrap_or_default());
        if ids.is_empty() {
            return Err(JsonApiError::null_input("id list is required"));
        }
        Ok(ids)
    }
}

pub fn parse_id_list(raw: &str) -> Vec<RecordId> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(RecordId::from).collect()
}
