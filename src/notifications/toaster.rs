// SPDX-License-Identifier: MPL-2.0
//! Timer-driven toast dispatcher.
//!
//! `Toaster` pushes notifications into a shared [`Manager`] and gives each
//! one its own Tokio timer that dismisses it when its duration elapses.
//! Closing a toast by hand aborts that toast's timer. When no runtime is
//! available the toast is still shown and [`Toaster::tick`] removes it.

use super::dispatcher::{Dispatcher, NotifyError};
use super::manager::Manager;
use super::notification::{DismissReason, Kind, Notification, NotificationId};
use crate::config::NotificationSettings;
use crate::diagnostics::DiagnosticsHandle;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Production [`Dispatcher`] backed by a shared notification queue.
///
/// Clones share the same queue and timers.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    manager: Arc<Mutex<Manager>>,
    timers: Arc<Mutex<HashMap<NotificationId, AbortHandle>>>,
    runtime: Option<Handle>,
    default_duration: Option<Duration>,
}

impl Toaster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a toaster whose `notify_default` uses the configured duration.
    #[must_use]
    pub fn from_config(settings: &NotificationSettings) -> Self {
        Self {
            default_duration: Some(settings.default_duration()),
            ..Self::default()
        }
    }

    /// Spawns dismiss timers on `runtime` instead of the ambient one.
    #[must_use]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    #[must_use]
    pub fn with_diagnostics(self, handle: DiagnosticsHandle) -> Self {
        lock(&self.manager).set_diagnostics(handle);
        self
    }

    /// Closes a notification on user request.
    ///
    /// Aborts its timer first, so it is never dismissed twice. Returns
    /// `false` if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        if let Some(timer) = lock(&self.timers).remove(&id) {
            timer.abort();
        }
        lock(&self.manager).dismiss(id, DismissReason::Closed)
    }

    /// Removes every expired notification. Fallback for missed timers.
    ///
    /// Timers whose notification is gone are dropped as well, which covers
    /// tasks spawned on a runtime that has since shut down.
    pub fn tick(&self) -> usize {
        let mut manager = lock(&self.manager);
        let removed = manager.tick();
        lock(&self.timers).retain(|id, timer| {
            let live = manager.get(*id).is_some();
            if !live {
                timer.abort();
            }
            live
        });
        removed
    }

    /// Copies the visible notifications, oldest first, for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        lock(&self.manager).visible().cloned().collect()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        lock(&self.manager).visible_count()
    }

    #[must_use]
    pub fn dismissed_total(&self) -> u64 {
        lock(&self.manager).dismissed_total()
    }

    /// Number of dismiss timers still waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        lock(&self.timers).len()
    }

    fn schedule_dismiss(&self, id: NotificationId, duration: Duration) {
        let runtime = match self.runtime.clone().map_or_else(Handle::try_current, Ok) {
            Ok(runtime) => runtime,
            Err(_) => {
                log::debug!("no async runtime; toast {id} will be removed on tick");
                return;
            }
        };

        let manager = Arc::clone(&self.manager);
        let timers = Arc::clone(&self.timers);
        // Held across spawn so the task cannot remove its entry before it exists.
        let mut pending = lock(&self.timers);
        let task = runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            lock(&timers).remove(&id);
            lock(&manager).dismiss(id, DismissReason::Expired);
        });
        pending.insert(id, task.abort_handle());
    }
}

impl Dispatcher for Toaster {
    fn notify(
        &self,
        kind: Kind,
        message: &str,
        duration: Duration,
    ) -> Result<NotificationId, NotifyError> {
        if message.trim().is_empty() {
            return Err(NotifyError::EmptyMessage);
        }

        let id = lock(&self.manager).push(Notification::new(kind, message, duration));
        log::debug!("showing {kind} toast {id} for {}ms", duration.as_millis());

        if !duration.is_zero() {
            self.schedule_dismiss(id, duration);
        }
        Ok(id)
    }

    fn default_duration(&self, kind: Kind) -> Duration {
        self.default_duration.unwrap_or_else(|| kind.default_duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn toast_is_removed_when_its_timer_fires() {
        let toaster = Toaster::new();
        toaster
            .notify(Kind::Info, "welcome back", Duration::from_millis(3000))
            .expect("toast should show");

        sleep(Duration::from_millis(2999)).await;
        assert_eq!(toaster.visible_count(), 1);

        sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(toaster.visible_count(), 0);
        assert_eq!(toaster.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_toast_is_not_dismissed_again_by_its_timer() {
        let toaster = Toaster::new();
        let id = toaster
            .notify(Kind::Error, "upload failed", Duration::from_millis(1000))
            .expect("toast should show");

        assert!(toaster.dismiss(id));
        assert_eq!(toaster.pending_timers(), 0);

        sleep(Duration::from_millis(2000)).await;
        tokio::task::yield_now().await;
        assert_eq!(toaster.dismissed_total(), 1);
        assert!(!toaster.dismiss(id));
    }

    #[tokio::test(start_paused = true)]
    async fn each_toast_has_an_independent_timer() {
        let toaster = Toaster::new();
        for ms in [100, 200, 300] {
            toaster
                .notify(Kind::Warning, "slow network", Duration::from_millis(ms))
                .expect("toast should show");
        }

        sleep(Duration::from_millis(150)).await;
        tokio::task::yield_now().await;
        assert_eq!(toaster.visible_count(), 2);

        sleep(Duration::from_millis(100)).await;
        tokio::task::yield_now().await;
        assert_eq!(toaster.visible_count(), 1);
    }

    #[tokio::test]
    async fn zero_duration_toast_never_shows() {
        let toaster = Toaster::new();
        toaster
            .notify(Kind::Success, "done", Duration::ZERO)
            .expect("toast should be accepted");

        assert_eq!(toaster.visible_count(), 0);
        assert_eq!(toaster.pending_timers(), 0);
        assert_eq!(toaster.dismissed_total(), 1);
    }

    #[test]
    fn empty_message_is_rejected() {
        let toaster = Toaster::new();
        assert_eq!(
            toaster.notify(Kind::Error, "   ", Duration::from_secs(1)),
            Err(NotifyError::EmptyMessage)
        );
        assert_eq!(toaster.visible_count(), 0);
    }

    #[test]
    fn without_runtime_tick_removes_expired_toasts() {
        let toaster = Toaster::new();
        toaster
            .notify(Kind::Info, "offline mode", Duration::from_millis(1))
            .expect("toast should show without a runtime");
        assert_eq!(toaster.visible_count(), 1);
        assert_eq!(toaster.pending_timers(), 0);

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(toaster.tick(), 1);
        assert_eq!(toaster.visible_count(), 0);
    }

    #[test]
    fn explicit_runtime_drives_timers() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime should build");
        let toaster = Toaster::new().with_runtime(runtime.handle().clone());

        toaster
            .notify(Kind::Info, "synced", Duration::from_millis(10))
            .expect("toast should show");
        assert_eq!(toaster.pending_timers(), 1);

        runtime.block_on(async { sleep(Duration::from_millis(50)).await });
        assert_eq!(toaster.visible_count(), 0);
    }

    #[test]
    fn tick_drops_timers_of_a_shut_down_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime should build");
        let handle = runtime.handle().clone();
        drop(runtime);

        let toaster = Toaster::new().with_runtime(handle);
        for _ in 0..3 {
            toaster
                .notify(Kind::Warning, "sync paused", Duration::from_millis(1))
                .expect("toast should show");
        }

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(toaster.tick(), 3);
        assert_eq!(toaster.visible_count(), 0);
        assert_eq!(toaster.pending_timers(), 0);
    }

    #[test]
    fn tick_keeps_timers_of_visible_toasts() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime should build");
        let toaster = Toaster::new().with_runtime(runtime.handle().clone());
        toaster
            .notify(Kind::Info, "reading position saved", Duration::from_secs(60))
            .expect("toast should show");

        assert_eq!(toaster.tick(), 0);
        assert_eq!(toaster.pending_timers(), 1);
    }

    #[test]
    fn configured_default_duration_is_used_by_notify_default() {
        let settings = NotificationSettings {
            default_duration_ms: 1234,
            ..NotificationSettings::default()
        };
        let toaster = Toaster::from_config(&settings);
        toaster
            .notify_default(Kind::Success, "added to shelf")
            .expect("toast should show");

        let snapshot = toaster.snapshot();
        assert_eq!(snapshot[0].duration(), Duration::from_millis(1234));
        assert_eq!(
            Toaster::new().default_duration(Kind::Info),
            Duration::from_millis(3000)
        );
    }

    #[test]
    fn clones_share_the_queue() {
        let toaster = Toaster::new();
        let view = toaster.clone();
        toaster
            .notify(Kind::Success, "bookmark added", Duration::from_secs(30))
            .expect("toast should show");

        let snapshot = view.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].message(), "bookmark added");
    }
}
