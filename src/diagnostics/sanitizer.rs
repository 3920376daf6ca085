// SPDX-License-Identifier: MPL-2.0
//! Message sanitization.
//!
//! Removes data that must not leave the client in readable form: local file
//! paths, e-mail addresses, bearer tokens and credential-looking JSON fields.
//! Replacements keep the message structure intact.

use std::sync::LazyLock;

use regex::Regex;

/// Compiled regex patterns for path detection.
static PATH_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    // Path continues until whitespace or common delimiters (quotes, parens, brackets)
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,
        r#"|/Users/[^\s"'()\[\]]+"#,
        r#"|/tmp/[^\s"'()\[\]]+"#,
        r#"|/var/[^\s"'()\[\]]+"#,
        r#"|/etc/[^\s"'()\[\]]+"#,
        r#"|/opt/[^\s"'()\[\]]+"#,
        r#"|~/[^\s"'()\[\]]+"#,
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#,
        r#"|\\\\[^\s"'()\[\]]+"#,
        r#")"#,
    ))
    .expect("path regex should compile")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("email regex should compile")
});

static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bbearer\s+[A-Za-z0-9\-._~+/]+=*").expect("bearer regex should compile")
});

/// `"token": "..."` and friends, as they appear in JSON bodies.
static SECRET_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)"(password|passwd|secret|token|access_token|refresh_token|api_key|apikey|authorization)"\s*:\s*"[^"]*""#,
    )
    .expect("secret field regex should compile")
});

/// Sanitizes a message by removing sensitive information.
///
/// # Examples
///
/// ```
/// use bookaura_feedback::diagnostics::sanitize_message;
///
/// let msg = "Failed to open /home/user/books/dune.epub";
/// assert_eq!(sanitize_message(msg), "Failed to open <path>");
///
/// let msg = r#"{"email":"reader@example.com","token":"abc123"}"#;
/// assert_eq!(
///     sanitize_message(msg),
///     r#"{"email":"<email>","token":"<redacted>"}"#
/// );
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    let message = SECRET_FIELD_PATTERN.replace_all(message, r#""$1":"<redacted>""#);
    let message = BEARER_PATTERN.replace_all(&message, "Bearer <redacted>");
    let message = EMAIL_PATTERN.replace_all(&message, "<email>");
    PATH_PATTERNS.replace_all(&message, "<path>").into_owned()
}
