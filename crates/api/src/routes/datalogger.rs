//! Route definitions for the datalogger endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::datalogger;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET  /datalogger          -> random_reading
/// POST /datalogger          -> random_reading
/// GET  /datalogger/{id}     -> get_reading
/// GET  /dataloggers         -> list_readings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/datalogger",
            get(datalogger::random_reading).post(datalogger::random_reading),
        )
        .route("/datalogger/{id}", get(datalogger::get_reading))
        .route("/dataloggers", get(datalogger::list_readings))
}
