//! Deviation classifier.
//!
//! Pure logic. Each dimension is checked against [`NORMAL_THRESHOLDS`]
//! independently, then the three flags are resolved into a single category
//! in a fixed priority order: three-way, then the two-way combinations
//! (temperature+humidity, temperature+pressure, humidity+pressure), then the
//! single-dimension cases which also report the direction.
//!
//! A two-way combination never reports which side of the band each value is
//! on. Callers that need the direction must look at the values themselves.

use serde::Serialize;

use crate::reading::{BandPosition, BandSet, NORMAL_THRESHOLDS};

/// Category label attached to a classified reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationType {
    TemperatureHumidityPressure,
    TemperatureAndHumidity,
    TemperatureAndPressure,
    HumidityAndPressure,
    TemperatureLow,
    TemperatureHigh,
    HumidityLow,
    HumidityHigh,
    PressureLow,
    PressureHigh,
    None,
}

impl DeviationType {
    /// The wire label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TemperatureHumidityPressure => "temperature_humidity_pressure",
            Self::TemperatureAndHumidity => "temperature_and_humidity",
            Self::TemperatureAndPressure => "temperature_and_pressure",
            Self::HumidityAndPressure => "humidity_and_pressure",
            Self::TemperatureLow => "temperature_low",
            Self::TemperatureHigh => "temperature_high",
            Self::HumidityLow => "humidity_low",
            Self::HumidityHigh => "humidity_high",
            Self::PressureLow => "pressure_low",
            Self::PressureHigh => "pressure_high",
            Self::None => "none",
        }
    }
}

/// Verdict for one reading triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deviation {
    pub is_deviation: bool,
    pub deviation_type: DeviationType,
}

impl Deviation {
    fn found(deviation_type: DeviationType) -> Self {
        Self {
            is_deviation: true,
            deviation_type,
        }
    }

    const NONE: Self = Self {
        is_deviation: false,
        deviation_type: DeviationType::None,
    };
}

/// Classify a reading triple against the default [`NORMAL_THRESHOLDS`].
pub fn classify(temperature: f64, humidity: f64, pressure: f64) -> Deviation {
    classify_with(&NORMAL_THRESHOLDS, temperature, humidity, pressure)
}

/// Classify a reading triple against an arbitrary threshold set.
pub fn classify_with(
    thresholds: &BandSet,
    temperature: f64,
    humidity: f64,
    pressure: f64,
) -> Deviation {
    let temp = thresholds.temperature.position(temperature);
    let hum = thresholds.humidity.position(humidity);
    let pres = thresholds.pressure.position(pressure);

    let temp_dev = temp != BandPosition::Within;
    let hum_dev = hum != BandPosition::Within;
    let pres_dev = pres != BandPosition::Within;

    // First match wins; order is significant.
    match (temp_dev, hum_dev, pres_dev) {
        (true, true, true) => Deviation::found(DeviationType::TemperatureHumidityPressure),
        (true, true, false) => Deviation::found(DeviationType::TemperatureAndHumidity),
        (true, false, true) => Deviation::found(DeviationType::TemperatureAndPressure),
        (false, true, true) => Deviation::found(DeviationType::HumidityAndPressure),
        (true, false, false) => Deviation::found(directional(
            temp,
            DeviationType::TemperatureLow,
            DeviationType::TemperatureHigh,
        )),
        (false, true, false) => Deviation::found(directional(
            hum,
            DeviationType::HumidityLow,
            DeviationType::HumidityHigh,
        )),
        (false, false, true) => Deviation::found(directional(
            pres,
            DeviationType::PressureLow,
            DeviationType::PressureHigh,
        )),
        (false, false, false) => Deviation::NONE,
    }
}

/// Anything not below the band is reported as high.
fn directional(position: BandPosition, low: DeviationType, high: DeviationType) -> DeviationType {
    if position == BandPosition::Below {
        low
    } else {
        high
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
