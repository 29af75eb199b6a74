//! Request handlers.
//!
//! Handlers read from the shared registry, classify via `datalogger_core`
//! and map errors via [`crate::error::AppError`].

pub mod datalogger;
