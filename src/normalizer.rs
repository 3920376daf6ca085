// SPDX-License-Identifier: MPL-2.0
//! Turns failures into messages fit for a toast.
//!
//! Every function here is total: any [`Failure`] (or none at all) yields a
//! non-empty, human-readable string, and nothing panics.

use serde_json::Value;

use crate::config::{
    DiagnosticsSettings, DEFAULT_MAX_FALLBACK_BODY_CHARS, DEFAULT_REDACT_FALLBACK_BODY,
};
use crate::diagnostics::sanitize_message;
use crate::failure::{is_truthy, Failure};

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required. Please log in again.";
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Placeholder for an empty body in the fallback template.
const EMPTY_BODY_PLACEHOLDER: &str = "Unknown error";

/// Body fields consulted for a server-provided message, in priority order.
const BODY_MESSAGE_FIELDS: [&str; 3] = ["error", "message", "details"];

/// Formats failures with the default settings.
///
/// ```
/// use bookaura_feedback::failure::Failure;
/// use bookaura_feedback::normalizer::format_error_message;
///
/// assert_eq!(
///     format_error_message(Some(&Failure::http(404, serde_json::Value::Null))),
///     "The requested resource was not found."
/// );
/// assert_eq!(format_error_message(None), "An unknown error occurred");
/// ```
#[must_use]
pub fn format_error_message(failure: Option<&Failure>) -> String {
    MessageFormatter::default().format(failure)
}

/// Failure-to-message formatter with configurable handling of the raw
/// body embedded by the last-resort template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFormatter {
    /// Pass the embedded body through [`sanitize_message`].
    pub redact_fallback_body: bool,
    /// Cut the embedded body after this many characters.
    pub max_fallback_body_chars: usize,
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self {
            redact_fallback_body: DEFAULT_REDACT_FALLBACK_BODY,
            max_fallback_body_chars: DEFAULT_MAX_FALLBACK_BODY_CHARS,
        }
    }
}

impl From<&DiagnosticsSettings> for MessageFormatter {
    fn from(settings: &DiagnosticsSettings) -> Self {
        Self {
            redact_fallback_body: settings.redact_fallback_body,
            max_fallback_body_chars: settings.max_fallback_body_chars,
        }
    }
}

impl MessageFormatter {
    #[must_use]
    pub fn format(&self, failure: Option<&Failure>) -> String {
        match failure {
            None => UNKNOWN_ERROR_MESSAGE.to_string(),
            Some(Failure::Http { status, body }) => self.format_http(*status, body),
            Some(Failure::Network { .. }) => NETWORK_ERROR_MESSAGE.to_string(),
            Some(Failure::Generic { message }) => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(UNEXPECTED_ERROR_MESSAGE)
                .to_string(),
        }
    }

    fn format_http(&self, status: u16, body: &Value) -> String {
        match status {
            401 => UNAUTHORIZED_MESSAGE.to_string(),
            403 => FORBIDDEN_MESSAGE.to_string(),
            404 => NOT_FOUND_MESSAGE.to_string(),
            500 => SERVER_ERROR_MESSAGE.to_string(),
            _ => message_from_body(body)
                .unwrap_or_else(|| format!("Error {status}: {}", self.fallback_body(body))),
        }
    }

    fn fallback_body(&self, body: &Value) -> String {
        let rendered = match body {
            Value::Null => return EMPTY_BODY_PLACEHOLDER.to_string(),
            Value::String(text) if text.trim().is_empty() => {
                return EMPTY_BODY_PLACEHOLDER.to_string()
            }
            Value::Object(map) if map.is_empty() => return EMPTY_BODY_PLACEHOLDER.to_string(),
            Value::Array(items) if items.is_empty() => {
                return EMPTY_BODY_PLACEHOLDER.to_string()
            }
            other => other.to_string(),
        };

        let rendered = if self.redact_fallback_body {
            sanitize_message(&rendered)
        } else {
            rendered
        };
        truncate_chars(&rendered, self.max_fallback_body_chars)
    }
}

/// Finds a server-provided message: a non-blank string body, or the first
/// displayable `error`, `message` or `details` field.
fn message_from_body(body: &Value) -> Option<String> {
    if let Value::String(text) = body {
        return displayable(body).then(|| text.clone());
    }
    BODY_MESSAGE_FIELDS.iter().find_map(|field| {
        body.get(field).filter(|v| displayable(v)).map(|v| match v {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    })
}

fn displayable(value: &Value) -> bool {
    match value {
        Value::String(text) => !text.trim().is_empty(),
        other => is_truthy(other),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
