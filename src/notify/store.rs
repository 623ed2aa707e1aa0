// SPDX-License-Identifier: MPL-2.0
//! Notification store and state transitions.
//!
//! The `Store` owns every live notification and keeps them partitioned into
//! an `active` set (eligible for display, at most `max_visible` entries) and
//! a `queued` overflow set. After every mutating action the partition is
//! recomputed so that `active` always holds the `max_visible`
//! highest-priority notifications, newest first within equal priority.
//!
//! All state transitions go through [`Store::apply`], which is total: no
//! action fails, and removing an unknown id is a no-op. Dismiss countdowns
//! live here too: the display host drives them through [`Store::tick`] and
//! is told which toasts expired so it can play their exit transition before
//! issuing the actual `Remove`.

use super::clock::DismissClock;
use super::notification::{Notification, Placement, Timeout, ToastId};
use std::collections::HashMap;
use std::time::Duration;

/// Default maximum number of notifications visible at once.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Default auto-dismiss duration for non-error notifications.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Tunable defaults applied to notifications that don't specify their own.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    /// Maximum size of the active set.
    pub max_visible: usize,
    /// Auto-dismiss behavior for toasts without an explicit timeout.
    /// Error toasts ignore this and default to sticky.
    pub timeout: Timeout,
    /// Anchor for toasts without an explicit placement.
    pub placement: Placement,
    /// Whether hovering suspends the dismiss timer by default.
    pub pause_on_hover: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            timeout: Timeout::After(DEFAULT_TIMEOUT),
            placement: Placement::default(),
            pause_on_hover: true,
        }
    }
}

/// State transitions accepted by the store.
#[derive(Debug, Clone)]
pub enum Action {
    /// Insert a notification and re-partition.
    Add(Notification),
    /// Delete a notification if present; unknown ids are a silent no-op
    /// since dismissal races (timer vs. manual close) are expected.
    Remove(ToastId),
    /// Reset to the empty state unconditionally.
    ClearAll,
    /// Suspend the dismiss countdown of one toast (remaining time kept).
    Pause(ToastId),
    /// Resume a suspended countdown.
    Resume(ToastId),
}

/// A stored notification plus its insertion sequence number.
///
/// The sequence breaks priority ties: newer insertions display first.
#[derive(Debug, Clone)]
struct Slot {
    notification: Notification,
    seq: u64,
}

/// Holds all live notifications and their active/queued partition.
#[derive(Debug, Default)]
pub struct Store {
    config: StoreConfig,
    all: Vec<Slot>,
    active: Vec<ToastId>,
    queued: Vec<ToastId>,
    clocks: HashMap<ToastId, DismissClock>,
    next_seq: u64,
}

impl Store {
    /// Creates an empty store with the given defaults.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Applies a state transition.
    ///
    /// Dismissed notifications have their close callback invoked here,
    /// exactly once, after they have left the store. Explicit removal
    /// (including `ClearAll`) counts as dismissal; dropping the store does
    /// not.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Add(mut notification) => {
                notification.resolve_defaults(
                    self.config.placement,
                    self.config.timeout,
                    self.config.pause_on_hover,
                );
                let seq = self.next_seq;
                self.next_seq += 1;
                self.all.push(Slot { notification, seq });
                self.repartition();
            }
            Action::Remove(id) => {
                let Some(pos) = self.all.iter().position(|s| s.notification.id() == id) else {
                    return;
                };
                let mut slot = self.all.remove(pos);
                self.clocks.remove(&id);
                self.repartition();
                if let Some(on_close) = slot.notification.take_on_close() {
                    on_close(id);
                }
            }
            Action::ClearAll => {
                let drained: Vec<Slot> = self.all.drain(..).collect();
                self.active.clear();
                self.queued.clear();
                self.clocks.clear();
                for mut slot in drained {
                    let id = slot.notification.id();
                    if let Some(on_close) = slot.notification.take_on_close() {
                        on_close(id);
                    }
                }
            }
            Action::Pause(id) => {
                if let Some(clock) = self.clocks.get_mut(&id) {
                    clock.pause();
                }
            }
            Action::Resume(id) => {
                if let Some(clock) = self.clocks.get_mut(&id) {
                    clock.resume();
                }
            }
        }
    }

    /// Advances the countdowns of visible toasts by `elapsed`.
    ///
    /// Returns the ids that expired on this tick, each reported exactly
    /// once. Expired toasts stay in the store so the host can run their
    /// exit transition; the host removes them afterwards. Queued toasts do
    /// not count down; their timer starts (or resumes) on activation.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<ToastId> {
        let mut expired = Vec::new();
        for id in &self.active {
            if let Some(clock) = self.clocks.get_mut(id) {
                if clock.tick(elapsed) {
                    expired.push(*id);
                }
            }
        }
        expired
    }

    /// Recomputes the active/queued partition.
    ///
    /// Order: priority descending, then insertion sequence descending
    /// (newest first). The first `max_visible` entries form the active set.
    /// Toasts entering the active set for the first time get their dismiss
    /// clock started; toasts evicted back to the queue keep their clock and
    /// remaining time untouched.
    fn repartition(&mut self) {
        let mut order: Vec<(i32, u64, ToastId)> = self
            .all
            .iter()
            .map(|s| (s.notification.display_priority(), s.seq, s.notification.id()))
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        let split = self.config.max_visible.min(order.len());
        self.active = order[..split].iter().map(|&(_, _, id)| id).collect();
        self.queued = order[split..].iter().map(|&(_, _, id)| id).collect();

        for id in &self.active {
            if self.clocks.contains_key(id) {
                continue;
            }
            let timeout = self
                .all
                .iter()
                .find(|s| s.notification.id() == *id)
                .and_then(|s| s.notification.dismiss_timeout());
            if let Some(Timeout::After(duration)) = timeout {
                self.clocks.insert(*id, DismissClock::new(duration));
            }
        }
    }

    /// Returns the store defaults.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the notification with the given id, if it is still live.
    #[must_use]
    pub fn notification(&self, id: ToastId) -> Option<&Notification> {
        self.all
            .iter()
            .find(|s| s.notification.id() == id)
            .map(|s| &s.notification)
    }

    /// Returns the visible notifications in display order.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter().filter_map(|id| self.notification(*id))
    }

    /// Returns the queued notifications in promotion order.
    pub fn queued(&self) -> impl Iterator<Item = &Notification> {
        self.queued.iter().filter_map(|id| self.notification(*id))
    }

    /// Returns the ids of the visible notifications in display order.
    #[must_use]
    pub fn active_ids(&self) -> &[ToastId] {
        &self.active
    }

    /// Returns the frontmost visible notification, if any.
    ///
    /// This is the toast the Escape key dismisses.
    #[must_use]
    pub fn front(&self) -> Option<ToastId> {
        self.active.first().copied()
    }

    /// Returns the number of visible notifications.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns the number of queued notifications.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queued.len()
    }

    /// Returns the number of queued notifications anchored at `placement`.
    #[must_use]
    pub fn queued_count_at(&self, placement: Placement) -> usize {
        self.queued()
            .filter(|n| n.placement_anchor() == Some(placement))
            .count()
    }

    /// Returns the total number of live notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Returns whether the store holds no notifications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Returns whether there are any notifications (visible or queued).
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.all.is_empty()
    }

    /// Returns the remaining time before auto-dismiss for a toast whose
    /// clock has started. Sticky and still-queued toasts have no clock.
    #[must_use]
    pub fn remaining(&self, id: ToastId) -> Option<Duration> {
        self.clocks.get(&id).map(DismissClock::remaining)
    }

    /// Returns whether the toast's countdown is currently suspended.
    #[must_use]
    pub fn is_paused(&self, id: ToastId) -> bool {
        self.clocks.get(&id).is_some_and(DismissClock::is_paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn store_with_max(max_visible: usize) -> Store {
        Store::new(StoreConfig {
            max_visible,
            ..StoreConfig::default()
        })
    }

    /// active ∪ queued == all, and the two sets are disjoint.
    fn assert_partition(store: &Store) {
        let active: Vec<ToastId> = store.active().map(Notification::id).collect();
        let queued: Vec<ToastId> = store.queued().map(Notification::id).collect();
        assert_eq!(active.len() + queued.len(), store.len());
        for id in &active {
            assert!(!queued.contains(id));
        }
        assert!(store.active_count() <= store.config().max_visible);
    }

    #[test]
    fn new_store_is_empty() {
        let store = Store::default();
        assert!(store.is_empty());
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.queued_count(), 0);
    }

    #[test]
    fn capacity_invariant_holds_after_every_add() {
        let mut store = store_with_max(3);
        for i in 0..10 {
            store.apply(Action::Add(Notification::info(format!("n{i}"))));
            assert_partition(&store);
        }
        assert_eq!(store.active_count(), 3);
        assert_eq!(store.queued_count(), 7);
    }

    #[test]
    fn priority_orders_the_active_set() {
        let mut store = store_with_max(2);
        let low = Notification::info("low").priority(1);
        let high = Notification::info("high").priority(5);
        let mid = Notification::info("mid").priority(3);
        let (low_id, high_id, mid_id) = (low.id(), high.id(), mid.id());

        store.apply(Action::Add(low));
        store.apply(Action::Add(high));
        store.apply(Action::Add(mid));

        assert_eq!(store.active_ids(), &[high_id, mid_id]);
        let queued: Vec<ToastId> = store.queued().map(Notification::id).collect();
        assert_eq!(queued, vec![low_id]);
        assert_partition(&store);
    }

    #[test]
    fn equal_priority_displays_newest_first() {
        let mut store = store_with_max(5);
        let first = Notification::info("first");
        let second = Notification::info("second");
        let (first_id, second_id) = (first.id(), second.id());

        store.apply(Action::Add(first));
        store.apply(Action::Add(second));

        assert_eq!(store.active_ids(), &[second_id, first_id]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = store_with_max(5);
        let notification = Notification::success("done");
        let id = notification.id();
        store.apply(Action::Add(notification));
        store.apply(Action::Add(Notification::info("other")));

        store.apply(Action::Remove(id));
        let after_first = store.len();
        store.apply(Action::Remove(id));
        assert_eq!(store.len(), after_first);
        assert_partition(&store);
    }

    #[test]
    fn clear_all_resets_fully() {
        let mut store = store_with_max(2);
        for i in 0..6 {
            store.apply(Action::Add(Notification::info(format!("n{i}"))));
        }
        store.apply(Action::ClearAll);
        assert!(store.is_empty());
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.queued_count(), 0);
    }

    #[test]
    fn removal_promotes_from_queue() {
        let mut store = store_with_max(5);
        let mut ids = Vec::new();
        for i in 0..6 {
            let n = Notification::info(format!("n{i}"));
            ids.push(n.id());
            store.apply(Action::Add(n));
        }
        assert_eq!(store.active_count(), 5);
        assert_eq!(store.queued_count(), 1);

        store.apply(Action::Remove(ids[3]));
        assert_eq!(store.active_count(), 5);
        assert_eq!(store.queued_count(), 0);
        assert_partition(&store);
    }

    #[test]
    fn high_priority_add_evicts_lowest_into_queue() {
        let mut store = store_with_max(2);
        let victim = Notification::info("victim");
        let victim_id = victim.id();
        store.apply(Action::Add(victim));
        store.apply(Action::Add(Notification::info("peer")));

        store.apply(Action::Add(Notification::warning("urgent").priority(9)));
        let queued: Vec<ToastId> = store.queued().map(Notification::id).collect();
        assert_eq!(queued, vec![victim_id]);
        assert_partition(&store);
    }

    #[test]
    fn tick_expires_only_visible_toasts() {
        let mut store = store_with_max(1);
        let visible = Notification::info("visible").dismiss_after(Duration::from_secs(1));
        let visible_id = visible.id();
        let queued = Notification::info("waiting")
            .priority(-1)
            .dismiss_after(Duration::from_secs(1));
        let queued_id = queued.id();

        store.apply(Action::Add(visible));
        store.apply(Action::Add(queued));
        assert_eq!(store.active_ids(), &[visible_id]);

        // Far more than the queued toast's timeout; it must not expire.
        let expired = store.tick(Duration::from_secs(5));
        assert_eq!(expired, vec![visible_id]);

        // The queued toast's clock starts only once it becomes visible.
        store.apply(Action::Remove(visible_id));
        assert_eq!(store.active_ids(), &[queued_id]);
        assert!(store.tick(Duration::from_millis(500)).is_empty());
        assert_eq!(store.tick(Duration::from_millis(500)), vec![queued_id]);
    }

    #[test]
    fn sticky_toasts_never_expire() {
        let mut store = store_with_max(5);
        let sticky = Notification::error("broken");
        let id = sticky.id();
        store.apply(Action::Add(sticky));

        assert!(store.tick(Duration::from_secs(3600)).is_empty());
        assert!(store.remaining(id).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn pause_suspends_and_resume_restores_countdown() {
        let mut store = store_with_max(5);
        let toast = Notification::info("hover me").dismiss_after(Duration::from_millis(300));
        let id = toast.id();
        store.apply(Action::Add(toast));

        store.tick(Duration::from_millis(100));
        store.apply(Action::Pause(id));
        assert!(store.is_paused(id));

        // Paused time must not count.
        assert!(store.tick(Duration::from_secs(10)).is_empty());
        assert_eq!(store.remaining(id), Some(Duration::from_millis(200)));

        store.apply(Action::Resume(id));
        assert!(store.tick(Duration::from_millis(100)).is_empty());
        assert_eq!(store.tick(Duration::from_millis(100)), vec![id]);
    }

    #[test]
    fn pause_of_unknown_id_is_a_no_op() {
        let mut store = store_with_max(5);
        let orphan = Notification::info("gone").id();
        store.apply(Action::Pause(orphan));
        store.apply(Action::Resume(orphan));
        assert!(store.is_empty());
    }

    #[test]
    fn evicted_toast_keeps_remaining_time() {
        let mut store = store_with_max(1);
        let slow = Notification::info("slow").dismiss_after(Duration::from_secs(4));
        let slow_id = slow.id();
        store.apply(Action::Add(slow));
        store.tick(Duration::from_secs(2));

        // Evict `slow` into the queue; its clock must freeze at 2s left.
        let urgent = Notification::warning("urgent").priority(5);
        let urgent_id = urgent.id();
        store.apply(Action::Add(urgent));
        store.tick(Duration::from_secs(10));
        assert_eq!(store.remaining(slow_id), Some(Duration::from_secs(2)));

        // Promotion resumes the countdown where it stopped.
        store.apply(Action::Remove(urgent_id));
        assert!(store.tick(Duration::from_millis(1900)).is_empty());
        assert_eq!(store.tick(Duration::from_millis(200)), vec![slow_id]);
    }

    #[test]
    fn on_close_fires_exactly_once_per_dismissal() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = store_with_max(5);

        let counted = {
            let calls = Arc::clone(&calls);
            Notification::success("saved").on_close(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
        };
        let id = counted.id();
        store.apply(Action::Add(counted));

        store.apply(Action::Remove(id));
        store.apply(Action::Remove(id));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_all_fires_on_close_for_every_toast() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = store_with_max(2);

        for i in 0..4 {
            let calls = Arc::clone(&calls);
            store.apply(Action::Add(Notification::info(format!("n{i}")).on_close(
                move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                },
            )));
        }
        store.apply(Action::ClearAll);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn expired_toast_stays_until_removed() {
        let mut store = store_with_max(5);
        let toast = Notification::info("fading").dismiss_after(Duration::from_millis(100));
        let id = toast.id();
        store.apply(Action::Add(toast));

        let expired = store.tick(Duration::from_millis(200));
        assert_eq!(expired, vec![id]);
        // The host owns the exit transition; the store keeps the toast.
        assert_eq!(store.len(), 1);

        store.apply(Action::Remove(id));
        assert!(store.is_empty());
    }
}
