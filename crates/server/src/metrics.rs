use std::future::Future;

use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};

use service::errors::ServiceError;

use crate::errors::JsonApiError;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "option_registry_operations_total",
        "Option operations by kind, operation and outcome",
        &["kind", "op", "outcome"]
    )
    .expect("register operations_total")
});

pub static REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "option_registry_request_duration_seconds",
        "Option operation duration in seconds",
        &["kind", "op"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register request_duration")
});

fn outcome(result: &Result<impl Sized, ServiceError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ServiceError::AlreadyExists(_)) => "already_exists",
        Err(ServiceError::AlreadyDeleted(_)) => "already_deleted",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::InvalidInput(_)) => "invalid_input",
        Err(ServiceError::NullInput(_)) => "null_input",
        Err(ServiceError::Db(_)) => "db_error",
    }
}

/// Time a service call, count its outcome and lift its error to the HTTP type.
pub async fn observe<T, F>(kind: &str, op: &str, fut: F) -> Result<T, JsonApiError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    let timer = REQUEST_DURATION.with_label_values(&[kind, op]).start_timer();
    let result = fut.await;
    timer.observe_duration();
    OPERATIONS_TOTAL.with_label_values(&[kind, op, outcome(&result)]).inc();
    result.map_err(JsonApiError::from)
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
