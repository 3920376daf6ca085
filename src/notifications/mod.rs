// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to tell readers what happened (a failed
//! purchase, a saved bookmark) without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - `Notification` record, `Kind` and lifecycle `Phase`
//! - [`manager`] - `Manager`, the list of visible notifications a view renders
//! - [`dispatcher`] - the `Dispatcher` trait callers depend on, plus a fake
//! - [`toaster`] - `Toaster`, the timer-driven production dispatcher
//!
//! # Usage
//!
//! ```
//! use bookaura_feedback::notifications::{Dispatcher, Kind, Toaster};
//!
//! let toaster = Toaster::new();
//! toaster.notify_default(Kind::Success, "Added to your library").unwrap();
//!
//! // The view renders whatever is currently visible.
//! for toast in toaster.snapshot() {
//!     println!("[{}] {}", toast.kind(), toast.message());
//! }
//! ```

pub mod dispatcher;
pub mod manager;
pub mod notification;
pub mod toaster;

pub use dispatcher::{Dispatcher, NotifyError, RecordedNotification, RecordingDispatcher};
pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{DismissReason, Kind, Notification, NotificationId, Phase};
pub use toaster::Toaster;
