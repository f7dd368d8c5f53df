use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use models::catalog::{self, OPTION_KINDS};
use models::id;
use server::routes;
use service::option::repository::mock::InMemoryOptionRepository;
use service::option::{OptionService, ServicePolicy};

const BASE: &str = "/api/tender_status_option";

fn app() -> Router {
    let services = OPTION_KINDS
        .iter()
        .map(|kind| {
            Arc::new(OptionService::new(
                Arc::new(InMemoryOptionRepository::default()),
                id::generator_for(kind.id_strategy, 0),
                kind,
                ServicePolicy::default(),
            ))
        })
        .collect();
    routes::build_router(services, CorsLayer::very_permissive())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body)?).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, value))
}

async fn create(app: &Router, name: &str) -> anyhow::Result<String> {
    let body = json!({"name": name, "description": "desc"});
    let (status, _) = send(app, Method::POST, &format!("{BASE}/create/one"), Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, all) = send(app, Method::GET, &format!("{BASE}/read/all"), None).await?;
    let id = all
        .as_array()
        .and_then(|a| a.iter().find(|r| r["name"] == name))
        .and_then(|r| r["id"].as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("created record {name} not listed"))?;
    Ok(id)
}

#[tokio::test]
async fn health_and_catalog() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/api/options", None).await?;
    assert_eq!(status, StatusCode::OK);
    let kinds = body.as_array().cloned().unwrap_or_default();
    assert_eq!(kinds.len(), OPTION_KINDS.len());
    assert!(kinds.iter().any(|k| k["slug"] == "gender_option" && k["idStrategy"] == "sequential"));
    Ok(())
}

#[tokio::test]
async fn open_soft_delete_hard_delete_scenario() -> anyhow::Result<()> {
    let app = app();
    let body = json!({"name": "Open", "description": "desc"});
    let (status, env) = send(&app, Method::POST, &format!("{BASE}/create/one"), Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(env["status"], "OK");
    assert!(env["message"].is_string());
    assert!(env["timestamp"].is_string());

    let id = create(&app, "Closed").await?;
    let (_, all) = send(&app, Method::GET, &format!("{BASE}/read/all"), None).await?;
    let open = all.as_array().and_then(|a| a.iter().find(|r| r["name"] == "Open")).cloned().unwrap_or_default();
    assert!(open["deletedAt"].is_null());
    assert_eq!(open["description"], "desc");

    let (status, _) = send(&app, Method::PUT, &format!("{BASE}/soft/delete/one?id={id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, active) = send(&app, Method::GET, &format!("{BASE}/read/all"), None).await?;
    assert!(!active.as_array().unwrap().iter().any(|r| r["id"] == id.as_str()));
    let (_, every) = send(&app, Method::GET, &format!("{BASE}/read/hard/all"), None).await?;
    let deleted = every.as_array().unwrap().iter().find(|r| r["id"] == id.as_str()).cloned().unwrap();
    assert!(deleted["deletedAt"].is_string());

    let (status, _) = send(&app, Method::GET, &format!("{BASE}/hard/delete/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, every) = send(&app, Method::GET, &format!("{BASE}/read/hard/all"), None).await?;
    assert!(!every.as_array().unwrap().iter().any(|r| r["id"] == id.as_str()));
    Ok(())
}

#[tokio::test]
async fn error_statuses() -> anyhow::Result<()> {
    let app = app();
    let id = create(&app, "Open").await?;

    let (status, body) = send(&app, Method::POST, &format!("{BASE}/create/one"), Some(json!({"name": "Open"}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert!(body["detail"].as_str().unwrap_or_default().contains("Open"));

    let (status, _) = send(&app, Method::PUT, &format!("{BASE}/soft/delete/one?id={id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::PUT, &format!("{BASE}/soft/delete/one?id={id}"), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Already Deleted");

    let (status, _) = send(&app, Method::GET, &format!("{BASE}/read/one?id={id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, &format!("{BASE}/read/one"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, &format!("{BASE}/create/one"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Null Input");
    let (status, body) = send(&app, Method::POST, &format!("{BASE}/create/one"), Some(Value::Null)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Null Input");
    let (status, body) = send(&app, Method::POST, &format!("{BASE}/create/one"), Some(json!({"name": "   "}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Input");

    let (status, _) = send(&app, Method::GET, &format!("{BASE}/hard/delete?id=ghost"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

/// Active ids keyed by name, so assertions never depend on listing order.
async fn ids_by_name(app: &Router, base: &str) -> anyhow::Result<HashMap<String, String>> {
    let (_, all) = send(app, Method::GET, &format!("{base}/read/all"), None).await?;
    Ok(all
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|r| Some((r["name"].as_str()?.to_string(), r["id"].as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default())
}

#[tokio::test]
async fn bulk_routes() -> anyhow::Result<()> {
    let app = app();
    let dup = json!([{"name": "A"}, {"name": "A"}]);
    let (status, body) = send(&app, Method::POST, &format!("{BASE}/create/many"), Some(dup)).await?;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    let (_, all) = send(&app, Method::GET, &format!("{BASE}/read/hard/all"), None).await?;
    assert!(all.as_array().unwrap().is_empty());

    let batch = json!([{"name": "A"}, {"name": "B"}, {"name": "C"}]);
    let (status, _) = send(&app, Method::POST, &format!("{BASE}/create/many"), Some(batch)).await?;
    assert_eq!(status, StatusCode::OK);
    let ids = ids_by_name(&app, BASE).await?;
    assert_eq!(ids.len(), 3);
    let (a, b, c) = (ids["A"].as_str(), ids["B"].as_str(), ids["C"].as_str());

    let uri = format!("{BASE}/read/many?idList={c},ghost,{a}");
    let (status, many) = send(&app, Method::POST, &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    let got: Vec<&str> = many.as_array().unwrap().iter().filter_map(|r| r["id"].as_str()).collect();
    assert_eq!(got, vec![c, a]);
    let (status, _) = send(&app, Method::POST, &format!("{BASE}/read/many"), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let updates = json!([{"id": a, "name": "A2"}, {"id": "ghost", "name": "X"}]);
    let (status, _) = send(&app, Method::PUT, &format!("{BASE}/update/many"), Some(updates)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, record) = send(&app, Method::GET, &format!("{BASE}/read/one?id={a}"), None).await?;
    assert_eq!(record["name"], "A");

    let update = json!({"id": a, "name": "A2", "description": "d"});
    let (status, _) = send(&app, Method::PUT, &format!("{BASE}/update/one"), Some(update)).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::PUT, &format!("{BASE}/soft/delete/many?id_list={a},{b}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let update = json!({"id": a, "name": "A3"});
    let (status, _) = send(&app, Method::PUT, &format!("{BASE}/update/hard/one"), Some(update)).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, every) = send(&app, Method::GET, &format!("{BASE}/read/hard/all"), None).await?;
    let a3 = every.as_array().unwrap().iter().find(|r| r["id"] == a).cloned().unwrap();
    assert_eq!(a3["name"], "A3");
    assert!(a3["deletedAt"].is_string());

    let (status, _) = send(&app, Method::GET, &format!("{BASE}/hard/delete/many?idList={b},ghost"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, &format!("{BASE}/hard/delete/many?idList={a},{b}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("{BASE}/hard/delete/all"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, every) = send(&app, Method::GET, &format!("{BASE}/read/hard/all"), None).await?;
    assert!(every.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn bulk_create_lists_in_request_order() -> anyhow::Result<()> {
    let app = app();
    let names = ["C", "A", "B"];
    let batch: Vec<Value> = names.iter().map(|n| json!({"name": n})).collect();
    let (status, _) = send(&app, Method::POST, &format!("{BASE}/create/many"), Some(Value::Array(batch))).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, all) = send(&app, Method::GET, &format!("{BASE}/read/all"), None).await?;
    let listed: Vec<&str> = all.as_array().unwrap().iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(listed, names);
    Ok(())
}

#[tokio::test]
async fn hard_update_all_touches_deleted_records_atomically() -> anyhow::Result<()> {
    let app = app();
    let batch = json!([{"name": "Open"}, {"name": "Closed"}]);
    let (status, _) = send(&app, Method::POST, &format!("{BASE}/create/many"), Some(batch)).await?;
    assert_eq!(status, StatusCode::OK);
    let ids = ids_by_name(&app, BASE).await?;
    let (open, closed) = (ids["Open"].clone(), ids["Closed"].clone());
    let (status, _) = send(&app, Method::PUT, &format!("{BASE}/soft/delete/one?id={closed}"), None).await?;
    assert_eq!(status, StatusCode::OK);

    let updates = json!([{"id": open, "name": "Open2"}, {"id": "ghost", "name": "X"}]);
    let (status, body) = send(&app, Method::PUT, &format!("{BASE}/update/hard/all"), Some(updates)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    let (_, record) = send(&app, Method::GET, &format!("{BASE}/read/one?id={open}"), None).await?;
    assert_eq!(record["name"], "Open");

    let updates = json!([{"id": open, "name": "Open2"}, {"id": closed, "name": "Closed2"}]);
    let (status, body) = send(&app, Method::PUT, &format!("{BASE}/update/hard/all"), Some(updates)).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    let (_, every) = send(&app, Method::GET, &format!("{BASE}/read/hard/all"), None).await?;
    let rows = every.as_array().cloned().unwrap_or_default();
    let find = |id: &str| rows.iter().find(|r| r["id"] == id).cloned().unwrap_or_default();
    assert_eq!(find(&open)["name"], "Open2");
    assert!(find(&open)["deletedAt"].is_null());
    assert_eq!(find(&closed)["name"], "Closed2");
    assert!(find(&closed)["deletedAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn sequential_ids_may_be_sent_as_numbers() -> anyhow::Result<()> {
    let app = app();
    let base = "/api/gender_option";
    let (status, _) = send(&app, Method::POST, &format!("{base}/create/one"), Some(json!({"name": "Female"}))).await?;
    assert_eq!(status, StatusCode::OK);
    let ids = ids_by_name(&app, base).await?;
    assert_eq!(ids["Female"], "1");

    let update = json!({"id": 1, "name": "Woman"});
    let (status, body) = send(&app, Method::PUT, &format!("{base}/update/one"), Some(update)).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    let (_, record) = send(&app, Method::GET, &format!("{base}/read/one?id=1"), None).await?;
    assert_eq!(record["name"], "Woman");
    Ok(())
}

#[tokio::test]
async fn kinds_are_isolated_and_described_kinds_need_descriptions() -> anyhow::Result<()> {
    let app = app();
    create(&app, "Open").await?;
    let (_, other) = send(&app, Method::GET, "/api/plan_status_option/read/all", None).await?;
    assert!(other.as_array().unwrap().is_empty());

    let described = catalog::find("procurement_method_option").unwrap();
    let uri = format!("{}/create/one", described.base_path());
    let (status, _) = send(&app, Method::POST, &uri, Some(json!({"name": "Open Tender"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn metrics_and_docs_are_served() -> anyhow::Result<()> {
    let app = app();
    create(&app, "Open").await?;
    let resp = app.clone().oneshot(Request::builder().uri("/metrics").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("option_registry_operations_total"));

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get(format!("{BASE}/read/all")).is_some());
    Ok(())
}
