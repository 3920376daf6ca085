// SPDX-License-Identifier: MPL-2.0
//! `bookaura_feedback` reports failed requests to BookAura readers.
//!
//! A network collaborator turns whatever went wrong into a [`failure::Failure`],
//! hands it to [`api_error::handle_api_error`], and the reader sees one short
//! error toast while the details go to the log and the diagnostics buffer.
//!
//! ```
//! use bookaura_feedback::api_error::handle_api_error;
//! use bookaura_feedback::failure::Failure;
//! use bookaura_feedback::notifications::Toaster;
//! use serde_json::json;
//!
//! let toaster = Toaster::new();
//! let failure = Failure::http(422, json!({"message": "Invalid field"}));
//! handle_api_error(Some(&failure), &toaster, None);
//!
//! assert_eq!(toaster.snapshot()[0].message(), "Invalid field");
//! ```

pub mod api_error;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod failure;
pub mod normalizer;
pub mod notifications;

pub use api_error::{handle_api_error, log_error, ApiErrorOutcome, ErrorReporter};
pub use failure::Failure;
pub use normalizer::{format_error_message, MessageFormatter};
