//! Response payloads shared by the datalogger handlers.
//!
//! Readings are returned bare, without a `{ "data": ... }` envelope, in the
//! shape existing simulator clients already consume.

use chrono::SecondsFormat;
use datalogger_core::deviation::DeviationType;
use datalogger_core::reading::Reading;
use datalogger_core::types::Timestamp;
use serde::Serialize;

/// One classified datalogger reading.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingResponse {
    pub datalogger_id: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    /// Response time, ISO-8601 UTC with millisecond precision.
    pub timestamp: String,
    pub is_deviation: bool,
    pub deviation_type: DeviationType,
}

impl ReadingResponse {
    /// Classify `reading` and shape it for the wire, stamped with `responded_at`.
    pub fn new(
        datalogger_id: impl Into<String>,
        reading: &Reading,
        responded_at: Timestamp,
    ) -> Self {
        let deviation = reading.deviation();
        Self {
            datalogger_id: datalogger_id.into(),
            temperature: reading.temperature(),
            humidity: reading.humidity(),
            pressure: reading.pressure(),
            timestamp: responded_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            is_deviation: deviation.is_deviation,
            deviation_type: deviation.deviation_type,
        }
    }
}
