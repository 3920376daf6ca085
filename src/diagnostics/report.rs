// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report structures for JSON export.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DiagnosticEvent, DiagnosticEventKind};

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// Unique identifier for this report (UUID v4)
    pub report_id: String,
    /// When the report was generated (RFC 3339)
    pub generated_at: String,
    /// Version of the crate that generated the report
    pub crate_version: String,
    /// When diagnostic collection started (RFC 3339)
    pub collection_started_at: String,
    /// Duration of collection in milliseconds
    pub collection_duration_ms: u64,
    /// Total number of events in the report
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

/// An event as written to the report, timed relative to collection start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    pub offset_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    pub fn from_event(event: &DiagnosticEvent, collection_started_at: Instant) -> Self {
        let offset = event.timestamp.saturating_duration_since(collection_started_at);
        Self {
            offset_ms: u64::try_from(offset.as_millis()).unwrap_or(u64::MAX),
            kind: event.kind.clone(),
        }
    }
}

/// Complete exported report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn report_ids_are_unique() {
        let started = Utc::now();
        let a = ReportMetadata::new(started, 0, 0);
        let b = ReportMetadata::new(started, 0, 0);
        assert_ne!(a.report_id, b.report_id);
        assert_eq!(a.crate_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn serializable_event_offsets_from_start() {
        let start = Instant::now();
        let event = DiagnosticEvent::with_timestamp(
            DiagnosticEventKind::Warning {
                message: "slow".to_string(),
            },
            start + Duration::from_millis(250),
        );

        let serialized = SerializableEvent::from_event(&event, start);
        assert_eq!(serialized.offset_ms, 250);

        let json = serde_json::to_string(&serialized).expect("serialization should succeed");
        assert!(json.contains("\"offset_ms\":250"));
        assert!(json.contains("\"type\":\"warning\""));
    }

    #[test]
    fn events_before_start_clamp_to_zero() {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            message: "early".to_string(),
        });
        let later = event.timestamp + Duration::from_secs(1);
        assert_eq!(SerializableEvent::from_event(&event, later).offset_ms, 0);
    }
}
