// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` record, its `Kind`, and the
//! `Phase` state machine every notification goes through.

use crate::config::DEFAULT_NOTIFICATION_DURATION_MS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of notification; selects styling in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[default]
    Info,
    Error,
    Success,
    Warning,
}

impl Kind {
    /// Parses a kind name. Unrecognized names fall back to [`Kind::Info`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Kind::Error,
            "success" => Kind::Success,
            "warning" | "warn" => Kind::Warning,
            _ => Kind::Info,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Info => "info",
            Kind::Error => "error",
            Kind::Success => "success",
            Kind::Warning => "warning",
        }
    }

    /// Display duration used when the caller does not pick one.
    #[must_use]
    pub fn default_duration(self) -> Duration {
        Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phase of a notification.
///
/// `Created → Visible → Dismissed`. `Dismissed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Visible,
    Dismissed,
}

/// Why a notification left the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// Its display duration elapsed.
    Expired,
    /// The user closed it.
    Closed,
    /// The whole queue was cleared.
    Cleared,
}

/// A notification to be displayed to the user.
///
/// Kind, message and duration are fixed at creation.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    message: String,
    duration: Duration,
    created_at: Instant,
    created_at_utc: DateTime<Utc>,
    phase: Phase,
}

impl Notification {
    pub fn new(kind: Kind, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            message: message.into(),
            duration,
            created_at: Instant::now(),
            created_at_utc: Utc::now(),
            phase: Phase::Created,
        }
    }

    /// Creates a notification with its kind's default duration.
    pub fn with_default_duration(kind: Kind, message: impl Into<String>) -> Self {
        Self::new(kind, message, kind.default_duration())
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_default_duration(Kind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::with_default_duration(Kind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_default_duration(Kind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_default_duration(Kind::Error, message)
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Wall-clock creation time, for display.
    #[must_use]
    pub fn created_at_utc(&self) -> DateTime<Utc> {
        self.created_at_utc
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Instant after which the notification must be gone.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.created_at + self.duration
    }

    /// Returns whether the display duration has elapsed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    /// `Created → Visible`. Returns `false` for any other starting phase.
    pub(crate) fn mark_visible(&mut self) -> bool {
        if self.phase == Phase::Created {
            self.phase = Phase::Visible;
            true
        } else {
            false
        }
    }

    /// `Created | Visible → Dismissed`. Returns `false` if already dismissed.
    pub(crate) fn mark_dismissed(&mut self) -> bool {
        if self.phase == Phase::Dismissed {
            false
        } else {
            self.phase = Phase::Dismissed;
            true
        }
    }
}
