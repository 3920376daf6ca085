// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting failure reports.
//!
//! This module captures diagnostic events while failures are reported and
//! notifications are shown, stores them in a memory-bounded circular buffer,
//! and exports them as sanitized JSON reports.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event wrapping a [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: channel-fed storage
//!
//! # Privacy
//!
//! Messages and response bodies are sanitized on their way into the
//! collector. File paths, e-mail addresses and credentials are replaced with
//! placeholders.

mod buffer;
mod collector;
mod events;
mod report;
mod sanitizer;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, ErrorEvent, LifecycleTransition};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
pub use sanitizer::sanitize_message;
