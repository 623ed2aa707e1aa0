// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for operator feedback.
//!
//! This module provides a non-intrusive notification system following
//! toast/snackbar UX patterns. Notifications appear temporarily to inform
//! the reviewing officer about actions (challan approved, upload failures,
//! plate corrections saved) without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with kinds, placements
//!   and timeouts
//! - [`store`] - `Store` holding the active/queued partition and the
//!   dismiss countdowns
//! - [`dispatcher`] - `Toasts` handle plus the global registration cell
//! - [`host`] - per-toast display phases (enter/exit transitions, hover)
//! - [`overlay`] - Iced widgets rendering the toast cards and anchors
//!
//! # Usage
//!
//! ```ignore
//! use challan_review::notify::{self, Notification, Toasts};
//!
//! // During startup, once:
//! let toasts = Toasts::default();
//! notify::install_global(toasts.clone());
//!
//! // Anywhere, including outside the UI tree:
//! notify::global().success("Challan approved");
//!
//! // Structured notifications use the builder:
//! toasts.push(
//!     Notification::error("Plate lookup failed")
//!         .heading("RTA registry")
//!         .action("Retry", || { /* re-enqueue the lookup */ }),
//! );
//! ```
//!
//! # Partition discipline
//!
//! The store keeps every live notification partitioned into an `active` set
//! (at most `max_visible`, the highest priorities first, newest first on
//! ties) and a `queued` overflow set promoted as space frees up. Adding a
//! high-priority toast to a full screen evicts the lowest-priority visible
//! toast back into the queue with its remaining display time frozen.

pub mod clock;
pub mod dispatcher;
pub mod host;
pub mod notification;
pub mod overlay;
pub mod store;

pub use dispatcher::{global, install_global, Toasts};
pub use host::{Host, Message as HostMessage};
pub use notification::{Kind, Notification, Placement, Timeout, ToastAction, ToastId};
pub use store::{Action, Store, StoreConfig};
