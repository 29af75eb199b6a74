//! Integration tests for the datalogger reading endpoints.
//!
//! Tests cover:
//! - Random reading (GET and POST)
//! - Reading for a specific logger, including unknown ids
//! - Listing every logger in registration order
//! - Deviation fields computed from live readings
//! - Readings observed after drift ticks

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use chrono::DateTime;
use common::{body_json, get, post};
use datalogger_core::drift::DriftEngine;
use datalogger_core::reading::Measurements;
use datalogger_core::registry::DataloggerRegistry;

const DEFAULT_IDS: [&str; 5] = ["DL-001", "DL-002", "DL-003", "DL-004", "DL-005"];

/// Assert the shape shared by every reading payload.
fn assert_reading_shape(json: &serde_json::Value) {
    assert!(json["datalogger_id"].is_string());
    assert!(json["temperature"].is_number());
    assert!(json["humidity"].is_number());
    assert!(json["pressure"].is_number());
    assert!(json["is_deviation"].is_boolean());
    assert!(json["deviation_type"].is_string());

    let timestamp = json["timestamp"].as_str().expect("timestamp string");
    assert!(
        DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "timestamp is not ISO-8601: {timestamp}"
    );
    assert!(timestamp.ends_with('Z'));
}

// ---------------------------------------------------------------------------
// Specific logger
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_known_logger_returns_seed_reading() {
    let response = get(common::build_test_app(), "/api/datalogger/DL-001").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_reading_shape(&json);
    assert_eq!(json["datalogger_id"], "DL-001");
    assert_eq!(json["temperature"], 22.5);
    assert_eq!(json["humidity"], 55.0);
    assert_eq!(json["pressure"], 1013.2);
    assert_eq!(json["is_deviation"], false);
    assert_eq!(json["deviation_type"], "none");
}

#[tokio::test]
async fn get_unknown_logger_returns_404() {
    let response = get(common::build_test_app(), "/api/datalogger/DL-999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Datalogger not found");
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json.get("temperature").is_none(), "no fallback reading");
}

#[tokio::test]
async fn deviation_reflects_current_values() {
    let registry = common::registry_from(&[
        ("HOT", Measurements::new(26.0, 50.0, 1010.0)),
        ("DRY", Measurements::new(22.0, 35.0, 1010.0)),
        ("STORM", Measurements::new(10.0, 50.0, 1050.0)),
    ]);
    let app = common::build_test_app_with(registry);

    let hot = body_json(get(app.clone(), "/api/datalogger/HOT").await).await;
    assert_eq!(hot["is_deviation"], true);
    assert_eq!(hot["deviation_type"], "temperature_high");

    let dry = body_json(get(app.clone(), "/api/datalogger/DRY").await).await;
    assert_eq!(dry["deviation_type"], "humidity_low");

    let storm = body_json(get(app, "/api/datalogger/STORM").await).await;
    assert_eq!(storm["is_deviation"], true);
    assert_eq!(storm["deviation_type"], "temperature_and_pressure");
}

// ---------------------------------------------------------------------------
// Random logger
// ---------------------------------------------------------------------------

#[tokio::test]
async fn random_get_returns_a_registered_logger() {
    let response = get(common::build_test_app(), "/api/datalogger").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_reading_shape(&json);
    let id = json["datalogger_id"].as_str().unwrap();
    assert!(DEFAULT_IDS.contains(&id), "unexpected id {id}");
}

#[tokio::test]
async fn random_post_behaves_like_get() {
    let response = post(common::build_test_app(), "/api/datalogger").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_reading_shape(&json);
    let id = json["datalogger_id"].as_str().unwrap();
    assert!(DEFAULT_IDS.contains(&id), "unexpected id {id}");
}

#[tokio::test]
async fn random_picks_spread_across_loggers() {
    let app = common::build_test_app();
    let mut seen = HashSet::new();

    for _ in 0..200 {
        let json = body_json(get(app.clone(), "/api/datalogger").await).await;
        seen.insert(json["datalogger_id"].as_str().unwrap().to_string());
    }

    assert_eq!(seen.len(), DEFAULT_IDS.len());
}

#[tokio::test]
async fn random_pick_on_empty_registry_is_500() {
    let app = common::build_test_app_with(common::registry_from(&[]));

    let response = get(app, "/api/datalogger").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_every_logger_in_order() {
    let response = get(common::build_test_app(), "/api/dataloggers").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().expect("array body");
    assert_eq!(items.len(), 5);

    let ids: Vec<&str> = items
        .iter()
        .map(|item| item["datalogger_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, DEFAULT_IDS);

    for item in items {
        assert_reading_shape(item);
    }
}

// ---------------------------------------------------------------------------
// Drift is visible over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn readings_after_ticks_stay_in_hard_limits() {
    let registry = std::sync::Arc::new(DataloggerRegistry::initialize());
    let mut engine = DriftEngine::seeded(3);
    for _ in 0..500 {
        engine.tick(&registry, chrono::Utc::now()).await;
    }

    let app = common::build_test_app_with(registry);
    let json = body_json(get(app, "/api/dataloggers").await).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 5);

    for item in items {
        let t = item["temperature"].as_f64().unwrap();
        let h = item["humidity"].as_f64().unwrap();
        let p = item["pressure"].as_f64().unwrap();
        assert!((15.0..=30.0).contains(&t), "temperature {t}");
        assert!((30.0..=80.0).contains(&h), "humidity {h}");
        assert!((990.0..=1030.0).contains(&p), "pressure {p}");
    }
}
