// SPDX-License-Identifier: MPL-2.0
//! Dispatcher façade over the notification store.
//!
//! [`Toasts`] is a cheaply clonable handle that any part of the application
//! can use to raise notifications. Code with no access to the UI tree (e.g.
//! request handlers that need to surface a failure) goes through the global
//! accessor instead: [`install_global`] registers a handle once during
//! startup, and [`global`] retrieves it, loudly panicking when called
//! before installation, since that is a startup-ordering bug rather than a
//! recoverable condition.

use super::notification::{Notification, ToastId};
use super::store::{Action, Store, StoreConfig};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Duration;

static GLOBAL: OnceLock<Toasts> = OnceLock::new();

/// Registers the process-wide toast handle.
///
/// # Panics
///
/// Panics if a handle was already installed. Installation is a one-time
/// startup step; installing twice indicates conflicting initialization
/// paths.
pub fn install_global(toasts: Toasts) {
    if GLOBAL.set(toasts).is_err() {
        panic!("notify::install_global called twice; the global toast store can only be registered once");
    }
}

/// Returns the process-wide toast handle.
///
/// # Panics
///
/// Panics if no handle has been registered. Call
/// [`install_global`] during application startup, before any code path
/// that raises notifications can run.
#[must_use]
pub fn global() -> &'static Toasts {
    GLOBAL.get().expect(
        "no global toast store installed; call notify::install_global during application startup",
    )
}

/// Handle for raising and dismissing notifications.
///
/// Clones share the same underlying store. All methods are fire-and-forget:
/// none of them fail, and dismissing an unknown id is a no-op.
#[derive(Debug, Clone)]
pub struct Toasts {
    store: Arc<Mutex<Store>>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Toasts {
    /// Creates a handle over a fresh store with the given defaults.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::new(config))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A panicked holder cannot leave the partition inconsistent:
        // repartition runs to completion before callbacks fire.
        self.store.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Adds a notification, filling unset fields from the store defaults,
    /// and returns its id synchronously.
    pub fn push(&self, notification: Notification) -> ToastId {
        let id = notification.id();
        self.lock().apply(Action::Add(notification));
        id
    }

    /// Raises a success toast with the given body text.
    pub fn success(&self, body: impl Into<String>) -> ToastId {
        self.push(Notification::success(body))
    }

    /// Raises an info toast with the given body text.
    pub fn info(&self, body: impl Into<String>) -> ToastId {
        self.push(Notification::info(body))
    }

    /// Raises a warning toast with the given body text.
    pub fn warning(&self, body: impl Into<String>) -> ToastId {
        self.push(Notification::warning(body))
    }

    /// Raises an error toast with the given body text.
    ///
    /// Error toasts are sticky unless the notification sets an explicit
    /// timeout.
    pub fn error(&self, body: impl Into<String>) -> ToastId {
        self.push(Notification::error(body))
    }

    /// Raises a neutral toast with the given body text.
    pub fn neutral(&self, body: impl Into<String>) -> ToastId {
        self.push(Notification::neutral(body))
    }

    /// Dismisses a notification. Idempotent; unknown ids are ignored.
    pub fn remove(&self, id: ToastId) {
        self.lock().apply(Action::Remove(id));
    }

    /// Dismisses every notification, visible and queued.
    pub fn clear_all(&self) {
        self.lock().apply(Action::ClearAll);
    }

    /// Suspends the dismiss countdown of one toast.
    pub fn pause(&self, id: ToastId) {
        self.lock().apply(Action::Pause(id));
    }

    /// Resumes a suspended countdown.
    pub fn resume(&self, id: ToastId) {
        self.lock().apply(Action::Resume(id));
    }

    /// Advances all visible countdowns; returns the ids that just expired.
    pub fn tick(&self, elapsed: Duration) -> Vec<ToastId> {
        self.lock().tick(elapsed)
    }

    /// Runs a closure against the store for reading.
    pub fn with<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&self.lock())
    }

    /// Returns whether there are any notifications (visible or queued).
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        self.lock().has_notifications()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::notification::{Kind, Placement, Timeout};

    #[test]
    fn push_returns_id_and_remove_empties_store() {
        let toasts = Toasts::default();
        let id = toasts.push(Notification::success("Saved"));
        assert_eq!(toasts.with(Store::len), 1);

        toasts.remove(id);
        assert!(toasts.with(Store::is_empty));
    }

    #[test]
    fn wrappers_set_their_kind() {
        let toasts = Toasts::default();
        let cases = [
            (toasts.success("s"), Kind::Success),
            (toasts.info("i"), Kind::Info),
            (toasts.warning("w"), Kind::Warning),
            (toasts.error("e"), Kind::Error),
            (toasts.neutral("n"), Kind::Neutral),
        ];
        for (id, kind) in cases {
            assert_eq!(toasts.with(|s| s.notification(id).unwrap().kind()), kind);
        }
    }

    #[test]
    fn error_wrapper_defaults_to_sticky() {
        let toasts = Toasts::default();
        let id = toasts.error("backend unreachable");
        let timeout = toasts.with(|s| s.notification(id).unwrap().dismiss_timeout());
        assert_eq!(timeout, Some(Timeout::Sticky));
    }

    #[test]
    fn push_fills_defaults_from_config() {
        let config = StoreConfig {
            placement: Placement::TopCenter,
            timeout: Timeout::After(Duration::from_secs(7)),
            pause_on_hover: false,
            ..StoreConfig::default()
        };
        let toasts = Toasts::new(config);
        let id = toasts.info("defaults please");

        toasts.with(|s| {
            let n = s.notification(id).unwrap();
            assert_eq!(n.placement_anchor(), Some(Placement::TopCenter));
            assert_eq!(
                n.dismiss_timeout(),
                Some(Timeout::After(Duration::from_secs(7)))
            );
            assert_eq!(n.pauses_on_hover(), Some(false));
        });
    }

    #[test]
    fn remove_of_unknown_id_is_silent() {
        let toasts = Toasts::default();
        let stale = Notification::info("never added").id();
        toasts.remove(stale);
        toasts.remove(stale);
        assert!(toasts.with(Store::is_empty));
    }

    #[test]
    fn clear_all_empties_everything() {
        let toasts = Toasts::default();
        for i in 0..8 {
            toasts.neutral(format!("n{i}"));
        }
        toasts.clear_all();
        assert!(toasts.with(Store::is_empty));
    }

    #[test]
    fn clones_share_one_store() {
        let toasts = Toasts::default();
        let clone = toasts.clone();
        let id = toasts.success("shared");
        clone.remove(id);
        assert!(toasts.with(Store::is_empty));
    }

    #[test]
    #[should_panic(expected = "install_global")]
    fn global_access_before_install_fails_loudly() {
        // No test in this binary installs the global handle, so this must
        // hit the startup-ordering panic.
        let _ = global();
    }
}
