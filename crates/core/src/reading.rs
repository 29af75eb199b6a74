//! Reading model: the measurement triple, its hard limits and normal bands.

use crate::deviation::{classify, Deviation};
use crate::types::Timestamp;

/// A closed interval `[min, max]` over a single measurement dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

/// Where a value falls relative to a [`Band`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    Below,
    Within,
    Above,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Values equal to either bound count as within the band.
    pub fn position(&self, value: f64) -> BandPosition {
        if value < self.min {
            BandPosition::Below
        } else if value > self.max {
            BandPosition::Above
        } else {
            BandPosition::Within
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.position(value) == BandPosition::Within
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// One [`Band`] per measurement dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSet {
    pub temperature: Band,
    pub humidity: Band,
    pub pressure: Band,
}

/// Physical range a simulated sensor can ever report. Drift is clamped here.
pub const HARD_LIMITS: BandSet = BandSet {
    temperature: Band::new(15.0, 30.0),
    humidity: Band::new(30.0, 80.0),
    pressure: Band::new(990.0, 1030.0),
};

/// The "normal" operating band. Anything outside is a deviation.
pub const NORMAL_THRESHOLDS: BandSet = BandSet {
    temperature: Band::new(18.0, 25.0),
    humidity: Band::new(40.0, 65.0),
    pressure: Band::new(1000.0, 1020.0),
};

/// Round to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Temperature (°C), relative humidity (%) and pressure (hPa).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl Measurements {
    pub const fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
        }
    }

    /// Clamp every dimension to `limits`, then round to one decimal.
    pub fn settle(self, limits: &BandSet) -> Self {
        Self {
            temperature: round_one_decimal(limits.temperature.clamp(self.temperature)),
            humidity: round_one_decimal(limits.humidity.clamp(self.humidity)),
            pressure: round_one_decimal(limits.pressure.clamp(self.pressure)),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.humidity.is_finite() && self.pressure.is_finite()
    }
}

/// The current state of one datalogger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub measurements: Measurements,
    pub last_update: Timestamp,
}

impl Reading {
    pub fn new(measurements: Measurements, last_update: Timestamp) -> Self {
        Self {
            measurements,
            last_update,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.measurements.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.measurements.humidity
    }

    pub fn pressure(&self) -> f64 {
        self.measurements.pressure
    }

    /// Classify this reading against [`NORMAL_THRESHOLDS`].
    pub fn deviation(&self) -> Deviation {
        classify(self.temperature(), self.humidity(), self.pressure())
    }
}
