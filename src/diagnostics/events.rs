// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! This module defines the events captured while failures are reported and
//! notifications come and go.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::failure::Failure;
use crate::notifications::{DismissReason, Kind, NotificationId};

/// Diagnostic record for one reported failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Call site or operation label supplied by the caller.
    pub context: String,
    /// One-line description of the failure.
    pub summary: String,
    /// HTTP status code, present only for HTTP failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Raw response body, present only for HTTP failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ErrorEvent {
    /// Builds the record for `failure` as reported from `context`.
    #[must_use]
    pub fn from_failure(failure: Option<&Failure>, context: impl Into<String>) -> Self {
        let summary = failure.map_or_else(|| "no failure value".to_string(), Failure::summary);
        Self {
            context: context.into(),
            summary,
            status_code: failure.and_then(Failure::status),
            body: failure.and_then(Failure::body).cloned(),
        }
    }
}

/// Notification lifecycle step recorded in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleTransition {
    Shown,
    Dismissed,
}

/// A single diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for offsets).
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A failure reported through the API error path.
    Error { event: ErrorEvent },

    /// A problem in the feedback path itself (e.g. a toast could not be shown).
    Warning { message: String },

    /// A notification changed lifecycle phase.
    Lifecycle {
        id: NotificationId,
        kind: Kind,
        transition: LifecycleTransition,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<DismissReason>,
    },
}
