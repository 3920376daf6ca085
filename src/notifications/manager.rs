// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` is the process-wide list of active notifications. A single
//! long-lived view renders [`Manager::visible`]; `push` and `dismiss` are
//! the only operations that change what is on screen.

use super::notification::{DismissReason, Notification, NotificationId};
use crate::diagnostics::{DiagnosticsHandle, LifecycleTransition};
use std::time::Instant;

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// The user closed a specific notification.
    Dismiss(NotificationId),
    /// Tick for checking expiry deadlines.
    Tick,
}

/// Manages the visible notifications.
#[derive(Debug, Default)]
pub struct Manager {
    /// Currently visible notifications (oldest first).
    visible: Vec<Notification>,
    /// Number of notifications dismissed so far, by any path.
    dismissed_total: u64,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diagnostics handle for lifecycle logging.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Shows a new notification next to any already visible.
    ///
    /// A notification with a zero duration is dismissed on the spot and
    /// never becomes part of the visible list.
    pub fn push(&mut self, mut notification: Notification) -> NotificationId {
        let id = notification.id();
        notification.mark_visible();
        self.log_transition(&notification, LifecycleTransition::Shown, None);

        if notification.duration().is_zero() {
            notification.mark_dismissed();
            self.dismissed_total += 1;
            self.log_transition(
                &notification,
                LifecycleTransition::Dismissed,
                Some(DismissReason::Expired),
            );
        } else {
            self.visible.push(notification);
        }
        id
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `false` if it is unknown or was already dismissed, so every
    /// notification is released at most once.
    pub fn dismiss(&mut self, id: NotificationId, reason: DismissReason) -> bool {
        let Some(pos) = self.visible.iter().position(|n| n.id() == id) else {
            return false;
        };
        let mut notification = self.visible.remove(pos);
        if !notification.mark_dismissed() {
            return false;
        }
        self.dismissed_total += 1;
        self.log_transition(&notification, LifecycleTransition::Dismissed, Some(reason));
        true
    }

    /// Dismisses every notification whose deadline is at or before `now`.
    ///
    /// Returns how many were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let expired: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.is_expired_at(now))
            .map(Notification::id)
            .collect();

        let mut removed = 0;
        for id in expired {
            if self.dismiss(id, DismissReason::Expired) {
                removed += 1;
            }
        }
        removed
    }

    /// Processes a tick against the current time.
    pub fn tick(&mut self) -> usize {
        self.expire(Instant::now())
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id, DismissReason::Closed);
            }
            Message::Tick => {
                self.tick();
            }
        }
    }

    /// Returns the currently visible notifications, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.visible.iter().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty()
    }

    #[must_use]
    pub fn dismissed_total(&self) -> u64 {
        self.dismissed_total
    }

    /// Dismisses all visible notifications.
    pub fn clear(&mut self) {
        let ids: Vec<NotificationId> = self.visible.iter().map(Notification::id).collect();
        for id in ids {
            self.dismiss(id, DismissReason::Cleared);
        }
    }

    fn log_transition(
        &self,
        notification: &Notification,
        transition: LifecycleTransition,
        reason: Option<DismissReason>,
    ) {
        if let Some(handle) = &self.diagnostics {
            handle.log_lifecycle(notification.id(), notification.kind(), transition, reason);
        }
    }
}
