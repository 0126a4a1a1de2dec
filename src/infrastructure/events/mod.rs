//! Event Sink Implementations
//!
//! Provides concrete implementations of TreeEventSink / LinkEventSink:
//! - JsonEventSink: NDJSON output for automation
//! - TracingEventSink: events as debug log records

mod json;
mod logging;

pub use json::JsonEventSink;
pub use logging::TracingEventSink;
