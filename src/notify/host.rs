// SPDX-License-Identifier: MPL-2.0
//! Presentation-side lifecycle for visible toasts.
//!
//! Each rendered toast moves through `Entering -> Visible -> Exiting` and is
//! removed from the store only after its exit transition finishes. The host
//! owns those phases and nothing else: countdowns live in the store, and the
//! host merely drives them with the elapsed time between ticks and reacts to
//! the expirations the store reports.
//!
//! Manual dismissal (close button, Escape, action press) and timer expiry
//! take the same path: `begin_exit`, a short fade, then `remove` against the
//! store, which fires the toast's close callback. Action handlers run before
//! the dismissal transition starts.
//!
//! The host keeps no timers of its own, so dropping it mid-transition leaks
//! nothing and never dispatches to a disposed store.

use super::dispatcher::Toasts;
use super::notification::ToastId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Duration of the fade-in played when a toast becomes visible.
pub const ENTER_TRANSITION: Duration = Duration::from_millis(150);

/// Duration of the fade-out played before a toast is removed.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(200);

/// Recommended interval for the driving tick subscription.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Upper bound on the elapsed time credited to a single tick.
///
/// Protects countdowns from wall-clock jumps (system suspend, a stalled
/// event loop): a 4-second toast should not vanish because the laptop lid
/// was closed.
const MAX_TICK_GAP: Duration = Duration::from_secs(1);

/// Display phase of one rendered toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fading in.
    Entering,
    /// Fully shown; the dismiss countdown runs during this phase.
    Visible,
    /// Fading out; removal from the store follows.
    Exiting,
}

#[derive(Debug, Clone, Copy)]
struct PhaseState {
    phase: Phase,
    elapsed: Duration,
}

/// Messages for toast presentation state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Periodic tick driving countdowns and transitions.
    Tick(Instant),
    /// Dismiss a specific toast (close button).
    Dismiss(ToastId),
    /// Dismiss the frontmost visible toast (Escape key).
    DismissFront,
    /// The toast's action button was pressed.
    ActionPressed(ToastId),
    /// Pointer entered the toast's area.
    HoverEntered(ToastId),
    /// Pointer left the toast's area.
    HoverLeft(ToastId),
}

/// Tracks display phases for every rendered toast.
#[derive(Debug, Default)]
pub struct Host {
    phases: HashMap<ToastId, PhaseState>,
    last_tick: Option<Instant>,
}

impl Host {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a presentation message against the given store handle.
    pub fn update(&mut self, message: Message, toasts: &Toasts) {
        match message {
            Message::Tick(now) => self.tick(now, toasts),
            Message::Dismiss(id) => self.begin_exit(id),
            Message::DismissFront => {
                if let Some(id) = toasts.with(super::store::Store::front) {
                    self.begin_exit(id);
                }
            }
            Message::ActionPressed(id) => {
                // Clone the action out before running it: the handler may
                // itself raise a toast through the same store.
                let action = toasts.with(|s| s.notification(id).and_then(|n| n.action_button().cloned()));
                if let Some(action) = action {
                    action.press();
                }
                self.begin_exit(id);
            }
            Message::HoverEntered(id) => {
                if toasts.with(|s| s.notification(id).and_then(super::notification::Notification::pauses_on_hover))
                    == Some(true)
                {
                    toasts.pause(id);
                }
            }
            Message::HoverLeft(id) => {
                if toasts.with(|s| s.notification(id).and_then(super::notification::Notification::pauses_on_hover))
                    == Some(true)
                {
                    toasts.resume(id);
                }
            }
        }
    }

    fn tick(&mut self, now: Instant, toasts: &Toasts) {
        let elapsed = self
            .last_tick
            .map_or(TICK_INTERVAL, |last| now.duration_since(last))
            .min(MAX_TICK_GAP);
        self.last_tick = Some(now);

        // Advance transitions; collect toasts whose exit just finished.
        let mut done_exiting = Vec::new();
        for (id, state) in &mut self.phases {
            state.elapsed += elapsed;
            match state.phase {
                Phase::Entering if state.elapsed >= ENTER_TRANSITION => {
                    state.phase = Phase::Visible;
                    state.elapsed = Duration::ZERO;
                }
                Phase::Exiting if state.elapsed >= EXIT_TRANSITION => {
                    done_exiting.push(*id);
                }
                _ => {}
            }
        }
        for id in done_exiting {
            self.phases.remove(&id);
            toasts.remove(id);
        }

        // Run the countdowns; expired toasts start their exit transition.
        for id in toasts.tick(elapsed) {
            self.begin_exit(id);
        }

        self.reconcile(toasts);
    }

    /// Brings the phase map in line with the store: newly visible toasts
    /// start entering, vanished ones are forgotten.
    fn reconcile(&mut self, toasts: &Toasts) {
        toasts.with(|store| {
            self.phases.retain(|id, _| store.notification(*id).is_some());
            for id in store.active_ids() {
                self.phases.entry(*id).or_insert(PhaseState {
                    phase: Phase::Entering,
                    elapsed: Duration::ZERO,
                });
            }
            if store.is_empty() {
                // The tick subscription pauses on an empty store; forget the
                // last instant so the next burst doesn't see a huge gap.
                self.last_tick = None;
            }
        });
    }

    /// Starts the exit transition for a toast. Idempotent: a toast already
    /// exiting keeps its progress, so timer/manual dismissal races are
    /// harmless.
    pub fn begin_exit(&mut self, id: ToastId) {
        let state = self.phases.entry(id).or_insert(PhaseState {
            phase: Phase::Exiting,
            elapsed: Duration::ZERO,
        });
        if state.phase != Phase::Exiting {
            state.phase = Phase::Exiting;
            state.elapsed = Duration::ZERO;
        }
    }

    /// Returns the display phase of a toast, if it is being rendered.
    #[must_use]
    pub fn phase(&self, id: ToastId) -> Option<Phase> {
        self.phases.get(&id).map(|s| s.phase)
    }

    /// Returns whether the toast is mid exit transition.
    #[must_use]
    pub fn is_exiting(&self, id: ToastId) -> bool {
        self.phase(id) == Some(Phase::Exiting)
    }

    /// Returns the rendering opacity for a toast (0.0 to 1.0).
    #[must_use]
    pub fn opacity(&self, id: ToastId) -> f32 {
        match self.phases.get(&id) {
            Some(state) => match state.phase {
                Phase::Entering => {
                    (state.elapsed.as_secs_f32() / ENTER_TRANSITION.as_secs_f32()).min(1.0)
                }
                Phase::Visible => 1.0,
                Phase::Exiting => {
                    1.0 - (state.elapsed.as_secs_f32() / EXIT_TRANSITION.as_secs_f32()).min(1.0)
                }
            },
            // Added since the last tick; rendering starts transparent.
            None => 0.0,
        }
    }
}
