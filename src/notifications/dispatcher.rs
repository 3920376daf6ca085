// SPDX-License-Identifier: MPL-2.0
//! The notification dispatch seam.
//!
//! Code that wants to tell the user something depends on [`Dispatcher`]
//! rather than on a concrete toast implementation, so tests can swap in a
//! [`RecordingDispatcher`] and inspect what would have been shown.

use super::notification::{Kind, NotificationId};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

/// Why a notification could not be shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("notification message is empty")]
    EmptyMessage,
    #[error("notification surface unavailable: {0}")]
    Unavailable(String),
}

/// Shows transient notifications to the user.
pub trait Dispatcher {
    /// Shows one new notification for `duration`.
    ///
    /// Each call creates an independent notification; nothing is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the notification cannot be shown. Callers
    /// on the failure path log and drop this error.
    fn notify(
        &self,
        kind: Kind,
        message: &str,
        duration: Duration,
    ) -> Result<NotificationId, NotifyError>;

    /// Duration used by [`Dispatcher::notify_default`] for `kind`.
    ///
    /// Defaults to the kind's built-in duration (3 s).
    fn default_duration(&self, kind: Kind) -> Duration {
        kind.default_duration()
    }

    /// Shows a notification for this dispatcher's default duration.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::notify`].
    fn notify_default(&self, kind: Kind, message: &str) -> Result<NotificationId, NotifyError> {
        self.notify(kind, message, self.default_duration(kind))
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for &D {
    fn notify(
        &self,
        kind: Kind,
        message: &str,
        duration: Duration,
    ) -> Result<NotificationId, NotifyError> {
        (**self).notify(kind, message, duration)
    }

    fn default_duration(&self, kind: Kind) -> Duration {
        (**self).default_duration(kind)
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for std::sync::Arc<D> {
    fn notify(
        &self,
        kind: Kind,
        message: &str,
        duration: Duration,
    ) -> Result<NotificationId, NotifyError> {
        (**self).notify(kind, message, duration)
    }

    fn default_duration(&self, kind: Kind) -> Duration {
        (**self).default_duration(kind)
    }
}

/// A `notify` call captured by [`RecordingDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNotification {
    pub id: NotificationId,
    pub kind: Kind,
    pub message: String,
    pub duration: Duration,
}

/// Fake dispatcher that records calls instead of showing anything.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    calls: Mutex<Vec<RecordedNotification>>,
    failure: Option<NotifyError>,
    default_duration: Option<Duration>,
}

impl RecordingDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher whose every `notify` fails with `error` (calls are
    /// still recorded).
    #[must_use]
    pub fn failing(error: NotifyError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Records `notify_default` calls with `duration` instead of the
    /// kind's built-in one.
    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = Some(duration);
        self
    }

    /// Returns a copy of every recorded call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedNotification> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent call, if any.
    #[must_use]
    pub fn last(&self) -> Option<RecordedNotification> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn notify(
        &self,
        kind: Kind,
        message: &str,
        duration: Duration,
    ) -> Result<NotificationId, NotifyError> {
        let id = NotificationId::new();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedNotification {
                id,
                kind,
                message: message.to_owned(),
                duration,
            });
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(id),
        }
    }

    fn default_duration(&self, kind: Kind) -> Duration {
        self.default_duration.unwrap_or_else(|| kind.default_duration())
    }
}
