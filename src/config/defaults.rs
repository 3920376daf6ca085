// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Notifications**: Toast display durations
//! - **Diagnostics**: Event buffer bounds and fallback body handling

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default display duration for a toast when the caller does not pick one.
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 3000;

/// Display duration for toasts raised by API failures.
pub const DEFAULT_ERROR_NOTIFICATION_DURATION_MS: u64 = 5000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10000;

/// Whether the fallback error template redacts the embedded response body.
pub const DEFAULT_REDACT_FALLBACK_BODY: bool = true;

/// Maximum number of body characters embedded by the fallback template.
pub const DEFAULT_MAX_FALLBACK_BODY_CHARS: usize = 200;
