//! Handlers for the datalogger reading endpoints.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::response::ReadingResponse;
use crate::state::AppState;

/// GET /api/datalogger and POST /api/datalogger
///
/// Reading of one logger chosen uniformly at random. Any request body is
/// ignored.
pub async fn random_reading(State(state): State<AppState>) -> AppResult<Json<ReadingResponse>> {
    let picked = {
        let mut rng = state.picker.lock().await;
        state.registry.pick_random(&mut *rng).await
    };
    let (id, reading) =
        picked.ok_or_else(|| AppError::InternalError("No dataloggers registered".to_string()))?;

    tracing::debug!(datalogger_id = %id, "Serving random datalogger");
    Ok(Json(ReadingResponse::new(id, &reading, Utc::now())))
}

/// GET /api/datalogger/{id}
pub async fn get_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReadingResponse>> {
    let reading = state.registry.get(&id).await?;
    Ok(Json(ReadingResponse::new(id, &reading, Utc::now())))
}

/// GET /api/dataloggers
///
/// Every logger in registration order, all stamped with the same response
/// time.
pub async fn list_readings(State(state): State<AppState>) -> Json<Vec<ReadingResponse>> {
    let now = Utc::now();
    let readings = state
        .registry
        .list()
        .await
        .into_iter()
        .map(|(id, reading)| ReadingResponse::new(id, &reading, now))
        .collect();
    Json(readings)
}
