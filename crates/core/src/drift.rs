//! Drift engine: bounded random perturbation of every logger's reading.
//!
//! One call to [`DriftEngine::tick`] walks the registry once. For each logger
//! the next reading is computed from the current one, clamped to
//! [`HARD_LIMITS`], rounded to one decimal and published under that logger's
//! write lock. Scheduling lives with the caller; the engine only knows how
//! to run a single tick.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::reading::{BandSet, Measurements, Reading, HARD_LIMITS};
use crate::registry::DataloggerRegistry;
use crate::types::Timestamp;

/// Half-width of the uniform perturbation applied per tick, per dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftProfile {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl Default for DriftProfile {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            humidity: 2.0,
            pressure: 1.0,
        }
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub updated: usize,
    /// Loggers whose candidate reading was unusable and kept their old value.
    pub skipped: usize,
}

/// Draw a value uniformly from `[-half_width, +half_width]`.
fn jitter<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.random_range(-half_width..=half_width)
    } else {
        0.0
    }
}

/// Perturb `current` by `profile`, clamp to `limits` and round.
///
/// Returns the settled measurements, or `None` if any dimension came out
/// non-finite.
pub fn perturb<R: Rng + ?Sized>(
    current: &Measurements,
    profile: &DriftProfile,
    limits: &BandSet,
    rng: &mut R,
) -> Option<Measurements> {
    let raw = Measurements {
        temperature: current.temperature + jitter(rng, profile.temperature),
        humidity: current.humidity + jitter(rng, profile.humidity),
        pressure: current.pressure + jitter(rng, profile.pressure),
    };
    raw.is_finite().then(|| raw.settle(limits))
}

/// Owns the random source and drift amplitudes.
#[derive(Debug)]
pub struct DriftEngine<R = StdRng> {
    profile: DriftProfile,
    limits: BandSet,
    rng: R,
}

impl DriftEngine<StdRng> {
    /// Engine seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic engine, for tests and reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DriftEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            profile: DriftProfile::default(),
            limits: HARD_LIMITS,
            rng,
        }
    }

    pub fn with_profile(mut self, profile: DriftProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Run one drift pass over every logger, stamping updates with `now`.
    pub async fn tick(&mut self, registry: &DataloggerRegistry, now: Timestamp) -> TickSummary {
        let Self {
            profile,
            limits,
            rng,
        } = self;
        let mut skipped = 0;

        let updated = registry
            .update_each(|_, current| {
                match perturb(&current.measurements, profile, limits, rng) {
                    Some(next) => Some(Reading::new(next, now)),
                    None => {
                        skipped += 1;
                        None
                    }
                }
            })
            .await;

        TickSummary { updated, skipped }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
