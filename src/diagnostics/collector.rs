// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! This module provides the central collector that receives events from
//! the error path and the notification manager and stores them in a
//! circular buffer.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::{
    sanitize_message, BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    DiagnosticReport, ErrorEvent, LifecycleTransition, ReportMetadata, SerializableEvent,
};
use crate::error::Result;
use crate::notifications::{DismissReason, Kind, NotificationId};

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel and dropped when it is full.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs a reported failure.
    ///
    /// The summary and a string body are sanitized before buffering.
    /// This method is non-blocking.
    pub fn log_error(&self, error_event: ErrorEvent) {
        let body = error_event.body.map(|body| match body {
            serde_json::Value::String(text) => serde_json::Value::String(sanitize_message(&text)),
            other => {
                let sanitized = sanitize_message(&other.to_string());
                serde_json::from_str(&sanitized)
                    .unwrap_or_else(|_| serde_json::Value::String(sanitized))
            }
        });
        let sanitized_event = ErrorEvent {
            summary: sanitize_message(&error_event.summary),
            body,
            ..error_event
        };
        self.send(DiagnosticEventKind::Error {
            event: sanitized_event,
        });
    }

    /// Logs a problem in the feedback path itself.
    ///
    /// The message is sanitized. This method is non-blocking.
    pub fn log_warning(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Warning {
            message: sanitize_message(&message.into()),
        });
    }

    /// Logs a notification lifecycle transition.
    pub fn log_lifecycle(
        &self,
        id: NotificationId,
        kind: Kind,
        transition: LifecycleTransition,
        reason: Option<DismissReason>,
    ) {
        self.send(DiagnosticEventKind::Lifecycle {
            id,
            kind,
            transition,
            reason,
        });
    }

    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log(
        &self,
        kind: DiagnosticEventKind,
    ) -> std::result::Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }

    fn send(&self, kind: DiagnosticEventKind) {
        // Non-blocking send - drop if channel is full
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central collector for diagnostic events.
///
/// The collector receives events through a channel and stores them in a
/// memory-bounded circular buffer. Old events are evicted when the buffer
/// reaches capacity.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    /// Sender stored to create handles.
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for offsets).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the event channel into the buffer.
    ///
    /// Call this periodically (e.g. on each UI tick) and before exporting.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Builds a report from the buffered events.
    #[must_use]
    pub fn build_report(&self) -> DiagnosticReport {
        let duration = self.collection_started_at.elapsed();
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent::from_event(event, self.collection_started_at))
            .collect();

        DiagnosticReport {
            metadata: ReportMetadata::new(
                self.collection_started_at_utc,
                u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                events.len(),
            ),
            events,
        }
    }

    /// Exports the buffered events as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.build_report())?)
    }

    /// Writes the JSON report to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.export_json()?)?;
        Ok(())
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}
