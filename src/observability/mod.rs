//! Diagnostics logging
//!
//! Swallowed failures (formula evaluation, skipped store files) are
//! logged here so silent degradation stays observable.
//!
//! # Principles
//!
//! 1. Logging is read-only; no side effects on evaluation
//! 2. Synchronous, no buffering, no background threads
//! 3. Deterministic output: one JSON line per event, sorted keys

mod logger;

pub use logger::{Logger, Severity};
