//! Periodic sensor drift.
//!
//! Spawns a loop that runs one [`DriftEngine::tick`] over the shared registry
//! every `period`. Ticks run inline in the loop body, so a slow tick delays
//! the next one instead of overlapping it.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use datalogger_core::drift::DriftEngine;
use datalogger_core::registry::DataloggerRegistry;
use rand::Rng;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Run the drift loop until `cancel` is triggered.
///
/// The first tick fires one full `period` after start, so the seed values
/// are served until then.
pub async fn run<R>(
    registry: Arc<DataloggerRegistry>,
    mut engine: DriftEngine<R>,
    period: Duration,
    cancel: CancellationToken,
) where
    R: Rng + Send,
{
    tracing::info!(
        interval_secs = period.as_secs(),
        dataloggers = registry.len(),
        "Drift engine started"
    );

    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(ticks, "Drift engine stopping");
                break;
            }
            _ = interval.tick() => {
                let summary = engine.tick(&registry, Utc::now()).await;
                ticks += 1;
                if summary.skipped > 0 {
                    tracing::warn!(
                        tick = ticks,
                        updated = summary.updated,
                        skipped = summary.skipped,
                        "Drift tick kept stale readings for some loggers"
                    );
                } else {
                    tracing::debug!(tick = ticks, updated = summary.updated, "Drift tick applied");
                }
            }
        }
    }
}
