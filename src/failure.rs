// SPDX-License-Identifier: MPL-2.0
//! Failure shapes produced by network calls.
//!
//! Collaborators that perform a request build a [`Failure`] at the boundary,
//! so everything downstream matches on a closed enum instead of probing an
//! open-ended error object.

use std::fmt;

use serde_json::Value;

/// A failure raised by a network call.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A response arrived with a non-success status.
    Http {
        /// HTTP status code (0 when the client did not report one).
        status: u16,
        /// Decoded response body (`Value::Null` when empty).
        body: Value,
    },
    /// The request left the client but no response arrived.
    Network {
        /// Low-level cause (timeout, refused connection, DNS). Diagnostic only.
        cause: Option<String>,
    },
    /// Anything else, including malformed failure values.
    Generic {
        /// Message carried by the failure, if any.
        message: Option<String>,
    },
}

impl Failure {
    pub fn http(status: u16, body: impl Into<Value>) -> Self {
        Failure::Http {
            status,
            body: body.into(),
        }
    }

    pub fn network() -> Self {
        Failure::Network { cause: None }
    }

    pub fn network_with_cause(cause: impl Into<String>) -> Self {
        Failure::Network {
            cause: Some(cause.into()),
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Failure::Generic {
            message: Some(message.into()),
        }
    }

    /// A generic failure that carries no message at all.
    pub fn unknown() -> Self {
        Failure::Generic { message: None }
    }

    /// Adapts a loosely-shaped failure object into a [`Failure`].
    ///
    /// Shapes are tried in a fixed order: a truthy `response` field makes an
    /// HTTP failure, then a truthy `request` field makes a network failure,
    /// and anything else is generic. `null` yields `None`.
    ///
    /// ```
    /// use bookaura_feedback::failure::Failure;
    /// use serde_json::json;
    ///
    /// let failure = Failure::from_value(&json!({"response": {"status": 404}}));
    /// assert_eq!(failure, Some(Failure::http(404, serde_json::Value::Null)));
    /// ```
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }

        if let Some(response) = value.get("response").filter(|v| is_truthy(v)) {
            let status = response
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or(0);
            let body = response.get("data").cloned().unwrap_or(Value::Null);
            return Some(Failure::Http { status, body });
        }

        if value.get("request").is_some_and(is_truthy) {
            return Some(Failure::Network { cause: None });
        }

        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Some(Failure::Generic { message })
    }

    /// Classifies a `reqwest` error.
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Failure::Http {
                status: status.as_u16(),
                body: Value::Null,
            };
        }
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return Failure::network_with_cause(err.to_string());
        }
        Failure::generic(err.to_string())
    }

    /// Builds an HTTP failure from a received response, reading its body.
    ///
    /// A body that cannot be read is treated as empty.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => body_from_text(&text),
            Err(err) => {
                log::debug!("discarding unreadable body of HTTP {status} response: {err}");
                Value::Null
            }
        };
        Failure::Http { status, body }
    }

    /// Returns the HTTP status code, if this is an HTTP failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Failure::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the response body, if this is an HTTP failure.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Failure::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// One-line diagnostic summary. Not meant for end users.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Http { status, .. } => write!(f, "HTTP {status}"),
            Failure::Network { cause: Some(cause) } => write!(f, "network error: {cause}"),
            Failure::Network { cause: None } => write!(f, "network error"),
            Failure::Generic {
                message: Some(message),
            } if !message.is_empty() => write!(f, "{message}"),
            Failure::Generic { .. } => write!(f, "unknown failure"),
        }
    }
}

/// Parses a raw response body: JSON when it parses, otherwise the text
/// itself, and `null` when blank.
#[must_use]
pub fn body_from_text(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// JavaScript-style truthiness for JSON values.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
