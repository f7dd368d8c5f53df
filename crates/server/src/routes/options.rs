//! The route tree mounted under every option kind's base path.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use common::types::Envelope;
use models::option::RecordId;
use service::option::repository::OptionRepository;
use service::option::OptionService;

use crate::dto::{self, CreateOptionRequest, IdListQuery, IdQuery, OptionResponse, UpdateOptionRequest};
use crate::errors::JsonApiError;
use crate::metrics::observe;

type Svc<R> = State<Arc<OptionService<R>>>;
type EnvelopeResult = Result<Json<Envelope>, JsonApiError>;
type ListResult = Result<Json<Vec<OptionResponse>>, JsonApiError>;

fn envelope(msg: String) -> Json<Envelope> { Json(Envelope::ok(msg)) }

pub async fn create_one<R: OptionRepository>(State(svc): Svc<R>, body: Bytes) -> EnvelopeResult {
    let req: CreateOptionRequest = dto::parse_body(&body)?;
    let kind = svc.kind();
    let saved = observe(kind.slug, "create_one", svc.save(dto::to_new_option(req))).await?;
    Ok(envelope(format!("{} {} created successfully", kind.title, saved.id)))
}

pub async fn create_many<R: OptionRepository>(State(svc): Svc<R>, body: Bytes) -> EnvelopeResult {
    let reqs: Vec<CreateOptionRequest> = dto::parse_body(&body)?;
    let kind = svc.kind();
    let inputs = reqs.into_iter().map(dto::to_new_option).collect();
    let saved = observe(kind.slug, "create_many", svc.save_many(inputs)).await?;
    Ok(envelope(format!("{} {} records created successfully", saved.len(), kind.title)))
}

pub async fn read_one<R: OptionRepository>(
    State(svc): Svc<R>,
    Query(q): Query<IdQuery>,
) -> Result<Json<OptionResponse>, JsonApiError> {
    let id = q.require()?;
    let record = observe(svc.kind().slug, "read_one", svc.read_one(&id)).await?;
    Ok(Json(dto::to_response(record)))
}

pub async fn read_all<R: OptionRepository>(State(svc): Svc<R>) -> ListResult {
    let records = observe(svc.kind().slug, "read_all", svc.read_all()).await?;
    Ok(Json(dto::to_responses(records)))
}

pub async fn read_hard_all<R: OptionRepository>(State(svc): Svc<R>) -> ListResult {
    let records = observe(svc.kind().slug, "read_hard_all", svc.hard_read_all()).await?;
    Ok(Json(dto::to_responses(records)))
}

pub async fn read_many<R: OptionRepository>(State(svc): Svc<R>, Query(q): Query<IdListQuery>) -> ListResult {
    let ids = q.require()?;
    let records = observe(svc.kind().slug, "read_many", svc.read_many(&ids)).await?;
    Ok(Json(dto::to_responses(records)))
}

pub async fn update_one<R: OptionRepository>(State(svc): Svc<R>, body: Bytes) -> EnvelopeResult {
    let req: UpdateOptionRequest = dto::parse_body(&body)?;
    let kind = svc.kind();
    let saved = observe(kind.slug, "update_one", svc.update_one(dto::to_option_update(req))).await?;
    Ok(envelope(format!("{} {} updated successfully", kind.title, saved.id)))
}

pub async fn update_many<R: OptionRepository>(State(svc): Svc<R>, body: Bytes) -> EnvelopeResult {
    let reqs: Vec<UpdateOptionRequest> = dto::parse_body(&body)?;
    let kind = svc.kind();
    let updates = reqs.into_iter().map(dto::to_option_update).collect();
    let saved = observe(kind.slug, "update_many", svc.update_many(updates)).await?;
    Ok(envelope(format!("{} {} records updated successfully", saved.len(), kind.title)))
}

pub async fn update_hard_one<R: OptionRepository>(State(svc): Svc<R>, body: Bytes) -> EnvelopeResult {
    let req: UpdateOptionRequest = dto::parse_body(&body)?;
    let kind = svc.kind();
    let saved = observe(kind.slug, "update_hard_one", svc.hard_update(dto::to_option_update(req))).await?;
    Ok(envelope(format!("{} {} hard updated successfully", kind.title, saved.id)))
}

pub async fn update_hard_all<R: OptionRepository>(State(svc): Svc<R>, body: Bytes) -> EnvelopeResult {
    let reqs: Vec<UpdateOptionRequest> = dto::parse_body(&body)?;
    let kind = svc.kind();
    let updates = reqs.into_iter().map(dto::to_option_update).collect();
    let saved = observe(kind.slug, "update_hard_all", svc.hard_update_all(updates)).await?;
    Ok(envelope(format!("{} {} records hard updated successfully", saved.len(), kind.title)))
}

pub async fn soft_delete_one<R: OptionRepository>(State(svc): Svc<R>, Query(q): Query<IdQuery>) -> EnvelopeResult {
    let id = q.require()?;
    let kind = svc.kind();
    observe(kind.slug, "soft_delete_one", svc.soft_delete(&id)).await?;
    Ok(envelope(format!("{} {} deleted successfully", kind.title, id)))
}

pub async fn soft_delete_many<R: OptionRepository>(
    State(svc): Svc<R>,
    Query(q): Query<IdListQuery>,
) -> EnvelopeResult {
    let ids = q.require()?;
    let kind = svc.kind();
    let changed = observe(kind.slug, "soft_delete_many", svc.soft_delete_many(&ids)).await?;
    Ok(envelope(format!("{} {} records deleted successfully", changed.len(), kind.title)))
}

async fn hard_delete_by<R: OptionRepository>(svc: &OptionService<R>, id: RecordId) -> EnvelopeResult {
    let kind = svc.kind();
    observe(kind.slug, "hard_delete_one", svc.hard_delete(&id)).await?;
    Ok(envelope(format!("{} {} permanently deleted", kind.title, id)))
}

pub async fn hard_delete_path<R: OptionRepository>(State(svc): Svc<R>, Path(id): Path<String>) -> EnvelopeResult {
    let id = IdQuery { id: Some(id) }.require()?;
    hard_delete_by(&svc, id).await
}

pub async fn hard_delete_query<R: OptionRepository>(State(svc): Svc<R>, Query(q): Query<IdQuery>) -> EnvelopeResult {
    let id = q.require()?;
    hard_delete_by(&svc, id).await
}

pub async fn hard_delete_many<R: OptionRepository>(
    State(svc): Svc<R>,
    Query(q): Query<IdListQuery>,
) -> EnvelopeResult {
    let ids = q.require()?;
    let kind = svc.kind();
    let removed = observe(kind.slug, "hard_delete_many", svc.hard_delete_many(&ids)).await?;
    Ok(envelope(format!("{} {} records permanently deleted", removed, kind.title)))
}

pub async fn hard_delete_all<R: OptionRepository>(State(svc): Svc<R>) -> EnvelopeResult {
    let kind = svc.kind();
    let removed = observe(kind.slug, "hard_delete_all", svc.hard_delete_all()).await?;
    Ok(envelope(format!("All {} records permanently deleted ({})", kind.title, removed)))
}

/// Every operation for one kind, relative to its base path.
pub fn option_routes<R: OptionRepository + 'static>(svc: Arc<OptionService<R>>) -> Router {
    Router::new()
        .route("/create/one", post(create_one::<R>))
        .route("/create/many", post(create_many::<R>))
        .route("/read/one", get(read_one::<R>))
        .route("/read/all", get(read_all::<R>))
        .route("/read/hard/all", get(read_hard_all::<R>))
        .route("/read/many", post(read_many::<R>))
        .route("/update/one", put(update_one::<R>))
        .route("/update/many", put(update_many::<R>))
        .route("/update/hard/one", put(update_hard_one::<R>))
        .route("/update/hard/all", put(update_hard_all::<R>))
        .route("/soft/delete/one", put(soft_delete_one::<R>))
        .route("/soft/delete/many", put(soft_delete_many::<R>))
        .route("/hard/delete", get(hard_delete_query::<R>))
        .route("/hard/delete/many", get(hard_delete_many::<R>))
        .route("/hard/delete/all", get(hard_delete_all::<R>))
        .route("/hard/delete/:id", get(hard_delete_path::<R>))
        .with_state(svc)
}
