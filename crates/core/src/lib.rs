//! Domain logic for the datalogger simulator.
//!
//! Nothing in this crate knows about HTTP. The registry owns the live
//! readings, the drift engine mutates them, and the deviation classifier
//! turns a reading triple into a verdict.

pub mod deviation;
pub mod drift;
pub mod error;
pub mod reading;
pub mod registry;
pub mod types;
