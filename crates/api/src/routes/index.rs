//! Self-describing endpoint index served at `/`.

use axum::{routing::get, Json, Router};
use indexmap::IndexMap;
use serde::Serialize;

use crate::state::AppState;

/// Root index payload.
#[derive(Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    /// Endpoint signature to description, in display order.
    pub endpoints: IndexMap<&'static str, &'static str>,
}

const ENDPOINTS: [(&str, &str); 5] = [
    ("GET /api/datalogger", "Get random datalogger reading"),
    ("GET /api/datalogger/:id", "Get specific datalogger reading"),
    ("POST /api/datalogger", "Get random datalogger reading (POST)"),
    ("GET /api/dataloggers", "Get all dataloggers readings"),
    ("GET /health", "Health check"),
];

/// GET /
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Datalogger Simulator API",
        endpoints: ENDPOINTS.into_iter().collect(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
