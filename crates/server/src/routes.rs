pub mod options;

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use models::catalog::OPTION_KINDS;
use service::option::repository::OptionRepository;
use service::option::OptionService;

use crate::dto::{self, OptionKindResponse};
use crate::{metrics, openapi};

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(
    get, path = "/api/options", tag = "catalog",
    responses((status = 200, description = "Every mounted option kind", body = [OptionKindResponse]))
)]
pub async fn catalog() -> Json<Vec<OptionKindResponse>> {
    Json(OPTION_KINDS.iter().map(dto::to_kind_response).collect())
}

pub async fn metrics_text() -> (StatusCode, String) {
    metrics::encode_metrics()
}

/// Full application router: one route tree per service, plus health,
/// catalogue, metrics and API docs.
pub fn build_router<R: OptionRepository + 'static>(services: Vec<Arc<OptionService<R>>>, cors: CorsLayer) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api/options", get(catalog));

    for svc in services {
        let base = svc.kind().base_path();
        app = app.nest(&base, options::option_routes(svc));
    }

    app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::build_openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
