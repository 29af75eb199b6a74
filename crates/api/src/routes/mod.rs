pub mod datalogger;
pub mod health;
pub mod index;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /datalogger                 random reading (GET, POST)
/// /datalogger/{id}            reading for one logger
/// /dataloggers                every logger
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(datalogger::router())
}
