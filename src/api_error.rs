// SPDX-License-Identifier: MPL-2.0
//! Reporting failed API calls to the user and to the logs.
//!
//! [`handle_api_error`] is what forms and data-fetching code call from
//! their error branch: it shows one error toast and then logs the failure.
//! The toast goes first, and a toast that cannot be shown never stops the
//! log entry.

use std::time::Duration;

use crate::config::{Config, DEFAULT_ERROR_NOTIFICATION_DURATION_MS};
use crate::diagnostics::{DiagnosticsHandle, ErrorEvent};
use crate::failure::Failure;
use crate::normalizer::MessageFormatter;
use crate::notifications::{Dispatcher, Kind, NotificationId};

/// Context label used by [`handle_api_error`] when logging.
pub const API_ERROR_CONTEXT: &str = "API Error";

const LOG_TARGET: &str = "bookaura_feedback::api";

/// Result of reporting one failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiErrorOutcome {
    /// Message shown (or offered) to the user.
    pub message: String,
    /// The toast that was shown, if the dispatcher accepted it.
    pub notification: Option<NotificationId>,
    /// The diagnostic record that was logged.
    pub event: ErrorEvent,
}

/// Emits a diagnostic record for `failure`, tagged with `context`.
///
/// HTTP failures also carry their status code and raw body. Never fails.
pub fn log_error(failure: Option<&Failure>, context: &str) -> ErrorEvent {
    let event = ErrorEvent::from_failure(failure, context);
    match (event.status_code, &event.body) {
        (Some(status), Some(body)) => {
            log::error!(
                target: LOG_TARGET,
                "[{context}] {} (status {status}, body {body})",
                event.summary
            );
        }
        _ => {
            log::error!(target: LOG_TARGET, "[{context}] {}", event.summary);
        }
    }
    event
}

/// Shows an error toast for `failure` and logs it.
///
/// A non-blank `custom_message` replaces the computed one; the original
/// failure is logged either way.
pub fn handle_api_error(
    failure: Option<&Failure>,
    dispatcher: &dyn Dispatcher,
    custom_message: Option<&str>,
) -> ApiErrorOutcome {
    report(
        failure,
        dispatcher,
        custom_message,
        &MessageFormatter::default(),
        Duration::from_millis(DEFAULT_ERROR_NOTIFICATION_DURATION_MS),
    )
}

fn report(
    failure: Option<&Failure>,
    dispatcher: &dyn Dispatcher,
    custom_message: Option<&str>,
    formatter: &MessageFormatter,
    duration: Duration,
) -> ApiErrorOutcome {
    let message = match custom_message.filter(|m| !m.trim().is_empty()) {
        Some(custom) => custom.to_string(),
        None => formatter.format(failure),
    };

    let notification = match dispatcher.notify(Kind::Error, &message, duration) {
        Ok(id) => Some(id),
        Err(err) => {
            log::warn!(target: LOG_TARGET, "could not show error toast: {err}");
            None
        }
    };

    let event = log_error(failure, API_ERROR_CONTEXT);
    ApiErrorOutcome {
        message,
        notification,
        event,
    }
}

/// Long-lived API error reporter bound to one dispatcher.
///
/// Carries the configured toast duration and fallback formatting, and
/// forwards each logged failure to diagnostics when a handle is set.
#[derive(Debug)]
pub struct ErrorReporter<D: Dispatcher> {
    dispatcher: D,
    formatter: MessageFormatter,
    error_duration: Duration,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<D: Dispatcher> ErrorReporter<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            formatter: MessageFormatter::default(),
            error_duration: Duration::from_millis(DEFAULT_ERROR_NOTIFICATION_DURATION_MS),
            diagnostics: None,
        }
    }

    /// Builds a reporter using the durations and formatting from `config`.
    pub fn from_config(dispatcher: D, config: &Config) -> Self {
        Self {
            dispatcher,
            formatter: MessageFormatter::from(&config.diagnostics),
            error_duration: config.notifications.error_duration(),
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Same as [`handle_api_error`], with this reporter's settings.
    pub fn handle_api_error(
        &self,
        failure: Option<&Failure>,
        custom_message: Option<&str>,
    ) -> ApiErrorOutcome {
        let outcome = report(
            failure,
            &self.dispatcher,
            custom_message,
            &self.formatter,
            self.error_duration,
        );

        if let Some(handle) = &self.diagnostics {
            if outcome.notification.is_none() {
                handle.log_warning(format!("error toast not shown: {}", outcome.message));
            }
            handle.log_error(outcome.event.clone());
        }
        outcome
    }

    /// Formats a failure with this reporter's settings, without side effects.
    pub fn format(&self, failure: Option<&Failure>) -> String {
        self.formatter.format(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use crate::normalizer::NOT_FOUND_MESSAGE;
    use crate::notifications::{NotifyError, RecordingDispatcher};
    use serde_json::json;

    #[test]
    fn handle_api_error_shows_one_error_toast_for_five_seconds() {
        let dispatcher = RecordingDispatcher::new();
        let failure = Failure::http(404, json!(null));

        let outcome = handle_api_error(Some(&failure), &dispatcher, None);

        let calls = dispatcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind, Kind::Error);
        assert_eq!(calls[0].message, NOT_FOUND_MESSAGE);
        assert_eq!(calls[0].duration, Duration::from_millis(5000));
        assert_eq!(outcome.notification, Some(calls[0].id));
    }

    #[test]
    fn custom_message_is_shown_but_original_failure_is_logged() {
        let dispatcher = RecordingDispatcher::new();
        let failure = Failure::http(422, json!({"message": "Invalid field"}));

        let outcome = handle_api_error(Some(&failure), &dispatcher, Some("Could not save review"));

        assert_eq!(
            dispatcher.last().map(|c| c.message),
            Some("Could not save review".to_string())
        );
        assert_eq!(outcome.event.context, API_ERROR_CONTEXT);
        assert_eq!(outcome.event.status_code, Some(422));
        assert_eq!(outcome.event.body, Some(json!({"message": "Invalid field"})));
    }

    #[test]
    fn blank_custom_message_is_ignored() {
        let dispatcher = RecordingDispatcher::new();
        let outcome = handle_api_error(Some(&Failure::generic("boom")), &dispatcher, Some("  "));
        assert_eq!(outcome.message, "boom");
    }

    #[test]
    fn dispatch_failure_does_not_stop_logging() {
        let dispatcher = RecordingDispatcher::failing(NotifyError::Unavailable("no view".into()));

        let outcome = handle_api_error(Some(&Failure::network()), &dispatcher, None);

        assert_eq!(outcome.notification, None);
        assert_eq!(outcome.event.summary, "network error");
        assert_eq!(dispatcher.calls().len(), 1);
    }

    #[test]
    fn log_error_includes_http_details_only_for_http() {
        let http = log_error(Some(&Failure::http(400, json!("bad"))), "checkout");
        assert_eq!(http.status_code, Some(400));
        assert_eq!(http.body, Some(json!("bad")));

        let generic = log_error(Some(&Failure::generic("boom")), "checkout");
        assert_eq!(generic.status_code, None);
        assert_eq!(generic.body, None);

        let missing = log_error(None, "checkout");
        assert_eq!(missing.context, "checkout");
    }

    #[test]
    fn reporter_uses_configured_duration() {
        let mut config = Config::default();
        config.notifications.error_duration_ms = 8000;
        let reporter = ErrorReporter::from_config(RecordingDispatcher::new(), &config);

        reporter.handle_api_error(Some(&Failure::unknown()), None);

        assert_eq!(
            reporter.dispatcher().last().map(|c| c.duration),
            Some(Duration::from_millis(8000))
        );
    }

    #[test]
    fn reporter_forwards_events_to_diagnostics() {
        let mut collector = DiagnosticsCollector::default();
        let reporter = ErrorReporter::new(RecordingDispatcher::failing(NotifyError::EmptyMessage))
            .with_diagnostics(collector.handle());

        reporter.handle_api_error(Some(&Failure::http(503, json!({"code": 1}))), None);
        collector.process_pending();

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds.len(), 2);
        assert!(matches!(kinds[0], DiagnosticEventKind::Warning { .. }));
        match &kinds[1] {
            DiagnosticEventKind::Error { event } => assert_eq!(event.status_code, Some(503)),
            other => panic!("expected Error variant, got {other:?}"),
        }
    }
}
