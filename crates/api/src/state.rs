use std::sync::Arc;

use datalogger_core::registry::DataloggerRegistry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Live datalogger readings, shared with the drift task.
    pub registry: Arc<DataloggerRegistry>,
    /// Random source for the "any logger" endpoints.
    pub picker: Arc<Mutex<StdRng>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state around an existing registry.
    ///
    /// When `config.drift_seed` is set the picker is seeded from it (offset
    /// so it does not replay the drift sequence); otherwise it uses OS
    /// entropy.
    pub fn new(registry: Arc<DataloggerRegistry>, config: ServerConfig) -> Self {
        let picker = match config.drift_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };
        Self {
            registry,
            picker: Arc::new(Mutex::new(picker)),
            config: Arc::new(config),
        }
    }
}
