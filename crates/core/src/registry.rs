//! Process-wide datalogger registry.
//!
//! The set of loggers is fixed when the registry is built: the map itself is
//! never mutated afterwards, only the readings behind each entry's lock. This
//! makes "no logger is ever added or removed" a structural guarantee rather
//! than a convention.
//!
//! Each reading sits behind its own `RwLock`. Writers replace the whole
//! [`Reading`] while holding the write lock, and readers copy it out under the
//! read lock, so a reader can never observe dimensions from two different
//! ticks.

use indexmap::IndexMap;
use rand::Rng;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::reading::{Measurements, Reading};
use crate::types::{LoggerId, Timestamp};

/// Seed values for the simulated fleet. Every value sits inside its normal
/// band so a freshly started service reports no deviations.
pub const DEFAULT_FLEET: [(&str, Measurements); 5] = [
    ("DL-001", Measurements::new(22.5, 55.0, 1013.2)),
    ("DL-002", Measurements::new(21.8, 58.0, 1012.8)),
    ("DL-003", Measurements::new(23.2, 52.0, 1014.1)),
    ("DL-004", Measurements::new(20.5, 60.0, 1011.5)),
    ("DL-005", Measurements::new(24.1, 48.0, 1015.3)),
];

/// Fixed, insertion-ordered collection of datalogger readings.
///
/// Designed to be wrapped in `Arc` and shared between the drift task and the
/// HTTP handlers.
#[derive(Debug)]
pub struct DataloggerRegistry {
    entries: IndexMap<LoggerId, RwLock<Reading>>,
}

impl DataloggerRegistry {
    /// Build the default five-logger fleet with `now` as every entry's
    /// last update.
    pub fn with_default_fleet(now: Timestamp) -> Self {
        Self::from_seeds(DEFAULT_FLEET, now)
            .unwrap_or_else(|_| unreachable!("default fleet ids are unique"))
    }

    /// Build the default fleet stamped with the current time.
    pub fn initialize() -> Self {
        Self::with_default_fleet(chrono::Utc::now())
    }

    /// Build a registry from arbitrary seeds, in the order given.
    ///
    /// Rejects duplicate ids so that each id maps to exactly one reading.
    pub fn from_seeds<I, S>(seeds: I, now: Timestamp) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (S, Measurements)>,
        S: Into<LoggerId>,
    {
        let mut entries = IndexMap::new();
        for (id, measurements) in seeds {
            let id = id.into();
            if entries.contains_key(&id) {
                return Err(CoreError::DuplicateLogger(id));
            }
            entries.insert(id, RwLock::new(Reading::new(measurements, now)));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Logger ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Current reading for `id`.
    pub async fn get(&self, id: &str) -> Result<Reading, CoreError> {
        let slot = self
            .entries
            .get(id)
            .ok_or_else(|| CoreError::logger_not_found(id))?;
        Ok(*slot.read().await)
    }

    /// Snapshot of every logger, in insertion order.
    ///
    /// Each reading is individually consistent; the list as a whole may mix
    /// loggers read before and after a concurrent tick.
    pub async fn list(&self) -> Vec<(LoggerId, Reading)> {
        let mut snapshot = Vec::with_capacity(self.entries.len());
        for (id, slot) in &self.entries {
            snapshot.push((id.clone(), *slot.read().await));
        }
        snapshot
    }

    /// One logger chosen uniformly at random. `None` only when empty.
    pub async fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(LoggerId, Reading)> {
        if self.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.entries.len());
        let (id, slot) = self.entries.get_index(index)?;
        Some((id.clone(), *slot.read().await))
    }

    /// Apply `update` to every logger under that logger's write lock.
    ///
    /// Returning `None` keeps the current reading. Returns how many readings
    /// were replaced.
    pub async fn update_each<F>(&self, mut update: F) -> usize
    where
        F: FnMut(&str, &Reading) -> Option<Reading>,
    {
        let mut replaced = 0;
        for (id, slot) in &self.entries {
            let mut guard = slot.write().await;
            if let Some(next) = update(id.as_str(), &*guard) {
                *guard = next;
                replaced += 1;
            }
        }
        replaced
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
