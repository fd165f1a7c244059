//! API integration tests against the in-memory store

use std::io::{Cursor, Read};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use inventory_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

async fn app() -> Router {
    let config = AppConfig::default();
    let services = Services::new(Repository::in_memory(), &config.export)
        .await
        .expect("Failed to create services");
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("Failed to parse response")
}

fn microphone(name: &str, location: &str) -> Value {
    json!({
        "name": name,
        "model": "SM58",
        "serial_number": format!("SN-{}", name),
        "inventory_number": format!("INV-{}", name),
        "quantity": 2,
        "category": "microphones",
        "location": location,
        "state": "available",
        "notes": "with clip"
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, bytes) = send(app, Method::POST, "/api/v1/equipment", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json_body(&bytes)
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;
    let (status, bytes) = send(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes)["status"], "healthy");

    let (status, bytes) = send(&app, Method::GET, "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes)["status"], "ready");
}

#[tokio::test]
async fn test_create_then_filter() {
    let app = app().await;
    let created = create(&app, microphone("Shure", "auditorio")).await;
    create(&app, microphone("Rode", "zite_gym")).await;

    assert!(created["id"].is_string());
    assert!(created["last_updated"].is_string());

    let (status, bytes) = send(
        &app,
        Method::GET,
        "/api/v1/equipment?search=SHURE&location=auditorio&category=all&state=available",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = json_body(&bytes);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_invalid_quantity_is_rejected() {
    let app = app().await;
    let mut body = microphone("Zero", "auditorio");
    body["quantity"] = json!(0);

    let (status, bytes) = send(&app, Method::POST, "/api/v1/equipment", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&bytes)["error"], "BadValue");

    let (_, bytes) = send(&app, Method::GET, "/api/v1/equipment", None).await;
    assert!(json_body(&bytes).as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_move_and_delete() {
    let app = app().await;
    let created = create(&app, microphone("Sennheiser", "informatica")).await;
    let id = created["id"].as_str().unwrap();

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/equipment/{}", id),
        Some(json!({ "state": "in_repair", "notes": "cracked grille" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = json_body(&bytes);
    assert_eq!(updated["state"], "in_repair");
    assert_eq!(updated["name"], "Sennheiser");

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/equipment/{}/location", id),
        Some(json!({ "location": "en_uso" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let moved = json_body(&bytes);
    assert_eq!(moved["location"], "en_uso");
    assert_eq!(moved["state"], "in_repair");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/equipment/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/v1/equipment/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/equipment/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_export_csv_respects_location() {
    let app = app().await;
    create(&app, microphone("Kept", "tec_edu")).await;
    create(&app, microphone("Skipped", "zite_cece")).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/equipment/export?format=csv&location=tec_edu")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"inventory_tec_edu.csv\""
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("Kept"));
    assert!(!text.contains("Skipped"));
}

#[tokio::test]
async fn test_export_empty_inventory() {
    let app = app().await;
    for format in ["csv", "xlsx", "pdf"] {
        let (status, bytes) = send(
            &app,
            Method::GET,
            &format!("/api/v1/equipment/export?format={}", format),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "format {}", format);
        assert!(!bytes.is_empty());

        match format {
            "csv" => {
                let text = String::from_utf8(bytes).unwrap();
                assert_eq!(text.lines().count(), 1);
                assert!(text.starts_with("Name,Model,Serial Number"));
            }
            "xlsx" => {
                let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
                let mut strings = String::new();
                archive
                    .by_name("xl/sharedStrings.xml")
                    .unwrap()
                    .read_to_string(&mut strings)
                    .unwrap();
                assert!(strings.contains("Inventory Number"));
                assert!(strings.contains("Last Updated"));
            }
            _ => assert!(bytes.starts_with(b"%PDF")),
        }
    }
}

#[tokio::test]
async fn test_stats_and_activity() {
    let app = app().await;
    create(&app, microphone("One", "auditorio")).await;
    create(&app, microphone("Two", "auditorio")).await;

    let (status, bytes) = send(&app, Method::GET, "/api/v1/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = json_body(&bytes);
    assert_eq!(stats["total_items"], 2);
    assert_eq!(stats["total_units"], 4);
    let auditorio = stats["by_location"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["key"] == "auditorio")
        .unwrap();
    assert_eq!(auditorio["value"], 2);

    let (status, bytes) = send(&app, Method::GET, "/api/v1/stats/activity", None).await;
    assert_eq!(status, StatusCode::OK);
    let days = json_body(&bytes);
    assert_eq!(days.as_array().unwrap().len(), 1);
    assert_eq!(days[0]["count"], 2);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/stats/activity?start_date=2024-02-01&end_date=2024-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_qrcode_and_scan() {
    let app = app().await;
    let created = create(&app, microphone("Labelled", "zite_gym")).await;
    let id = created["id"].as_str().unwrap();

    let (status, bytes) = send(&app, Method::GET, &format!("/api/v1/equipment/{}/qrcode", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes).unwrap().contains("<svg"));

    let scanned = json!({ "id": id, "name": "Labelled" }).to_string();
    let (status, bytes) = send(
        &app,
        Method::POST,
        "/api/v1/equipment/scan",
        Some(json!({ "content": scanned })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes)["name"], "Labelled");
}

#[tokio::test]
async fn test_options_lists_fixed_values() {
    let app = app().await;
    let (status, bytes) = send(&app, Method::GET, "/api/v1/options", None).await;
    assert_eq!(status, StatusCode::OK);
    let options = json_body(&bytes);
    assert_eq!(options["locations"].as_array().unwrap().len(), 6);
    assert_eq!(options["categories"].as_array().unwrap().len(), 15);
    assert_eq!(options["states"][3]["value"], "in_repair");
}
