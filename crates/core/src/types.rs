/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Datalogger identifiers are short fixed strings such as `DL-001`.
pub type LoggerId = String;
