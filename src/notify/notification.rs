// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct together with the `Kind`,
//! `Placement` and `Timeout` vocabulary used throughout the notification
//! system.

use crate::ui::design_tokens::palette;
use iced::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    ///
    /// IDs are unique within a single process lifetime.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind determines the default visual treatment of a toast.
///
/// Kind never changes behavior, with one exception: `Error` toasts default
/// to sticky (no auto-dismiss) so they cannot disappear unread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    /// Operation completed successfully (green).
    Success,
    /// Informational message (blue).
    Info,
    /// Warning that doesn't block operation (orange).
    Warning,
    /// Error requiring attention (red, sticky by default).
    Error,
    /// Untinted message (gray).
    #[default]
    Neutral,
}

impl Kind {
    /// Returns the accent color for this kind.
    #[must_use]
    pub fn accent_color(&self) -> Color {
        match self {
            Kind::Success => palette::SUCCESS_500,
            Kind::Info => palette::INFO_500,
            Kind::Warning => palette::WARNING_500,
            Kind::Error => palette::ERROR_500,
            Kind::Neutral => palette::GRAY_400,
        }
    }

    /// Returns the leading glyph rendered next to the message.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Kind::Success => "\u{2713}",
            Kind::Info => "\u{2139}",
            Kind::Warning => "\u{26A0}",
            Kind::Error => "\u{2715}",
            Kind::Neutral => "\u{2022}",
        }
    }

    /// Returns whether toasts of this kind are sticky unless told otherwise.
    #[must_use]
    pub fn sticky_by_default(&self) -> bool {
        matches!(self, Kind::Error)
    }
}

/// Screen anchor for a toast: top/bottom crossed with left/center/right.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Placement {
    /// All six anchors, in rendering order.
    pub const ALL: [Placement; 6] = [
        Placement::TopLeft,
        Placement::TopCenter,
        Placement::TopRight,
        Placement::BottomLeft,
        Placement::BottomCenter,
        Placement::BottomRight,
    ];

    /// Returns whether this anchor sits on the top edge of the screen.
    #[must_use]
    pub fn is_top(&self) -> bool {
        matches!(
            self,
            Placement::TopLeft | Placement::TopCenter | Placement::TopRight
        )
    }
}

/// Auto-dismiss behavior for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Never auto-dismisses; stays until manually closed.
    Sticky,
    /// Auto-dismisses after the given duration of visibility.
    After(Duration),
}

impl Timeout {
    /// Converts a millisecond count into a timeout, treating `0` as sticky.
    ///
    /// This is the representation used by the settings file.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Timeout::Sticky
        } else {
            Timeout::After(Duration::from_millis(ms))
        }
    }

    /// Returns whether this timeout never fires.
    #[must_use]
    pub fn is_sticky(&self) -> bool {
        matches!(self, Timeout::Sticky)
    }
}

/// Callback invoked exactly once when a toast is dismissed.
pub type CloseHandler = Arc<dyn Fn(ToastId) + Send + Sync>;

/// An optional action button attached to a toast.
///
/// Pressing the action always also dismisses the toast; the handler runs
/// before the dismissal transition starts.
#[derive(Clone)]
pub struct ToastAction {
    label: String,
    on_press: Arc<dyn Fn() + Send + Sync>,
}

impl ToastAction {
    /// Creates an action with a button label and a press handler.
    pub fn new(label: impl Into<String>, on_press: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_press: Arc::new(on_press),
        }
    }

    /// Returns the button label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the press handler.
    pub fn press(&self) {
        (self.on_press)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A notification to be displayed to the user.
///
/// `placement`, `timeout` and `pause_on_hover` may be left unset; the store
/// fills them from its configured defaults when the notification is added.
/// At least one of `heading`/`body` should be set for the toast to be
/// useful, but this is deliberately not enforced.
#[derive(Clone)]
pub struct Notification {
    id: ToastId,
    kind: Kind,
    heading: Option<String>,
    body: Option<String>,
    placement: Option<Placement>,
    timeout: Option<Timeout>,
    pause_on_hover: Option<bool>,
    priority: i32,
    on_close: Option<CloseHandler>,
    action: Option<ToastAction>,
}

impl Notification {
    /// Creates an empty notification of the given kind.
    pub fn new(kind: Kind) -> Self {
        Self {
            id: ToastId::new(),
            kind,
            heading: None,
            body: None,
            placement: None,
            timeout: None,
            pause_on_hover: None,
            priority: 0,
            on_close: None,
            action: None,
        }
    }

    /// Creates a success notification with the given body text.
    pub fn success(body: impl Into<String>) -> Self {
        Self::new(Kind::Success).body(body)
    }

    /// Creates an info notification with the given body text.
    pub fn info(body: impl Into<String>) -> Self {
        Self::new(Kind::Info).body(body)
    }

    /// Creates a warning notification with the given body text.
    pub fn warning(body: impl Into<String>) -> Self {
        Self::new(Kind::Warning).body(body)
    }

    /// Creates an error notification with the given body text.
    ///
    /// Error notifications are sticky unless a timeout is set explicitly.
    pub fn error(body: impl Into<String>) -> Self {
        Self::new(Kind::Error).body(body)
    }

    /// Creates a neutral notification with the given body text.
    pub fn neutral(body: impl Into<String>) -> Self {
        Self::new(Kind::Neutral).body(body)
    }

    /// Sets the heading line.
    #[must_use]
    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Sets the body text.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Anchors the toast to a specific screen corner or edge.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Auto-dismisses after `duration` of visibility, overriding the default.
    #[must_use]
    pub fn dismiss_after(mut self, duration: Duration) -> Self {
        self.timeout = Some(Timeout::After(duration));
        self
    }

    /// Keeps the toast on screen until manually dismissed.
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.timeout = Some(Timeout::Sticky);
        self
    }

    /// Sets whether hovering suspends the dismiss timer.
    #[must_use]
    pub fn pause_on_hover(mut self, pause: bool) -> Self {
        self.pause_on_hover = Some(pause);
        self
    }

    /// Sets the display priority. Higher priorities display first and are
    /// dismissed from the visible set last when space runs out.
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Registers a callback invoked exactly once when the toast is dismissed.
    ///
    /// The callback does not run on process teardown.
    #[must_use]
    pub fn on_close(mut self, on_close: impl Fn(ToastId) + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(on_close));
        self
    }

    /// Attaches an action button. Pressing it runs the handler and then
    /// dismisses the toast.
    #[must_use]
    pub fn action(mut self, label: impl Into<String>, on_press: impl Fn() + Send + Sync + 'static) -> Self {
        self.action = Some(ToastAction::new(label, on_press));
        self
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Returns the kind.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the heading line, if set.
    #[must_use]
    pub fn heading_text(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    /// Returns the body text, if set.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the anchor, if resolved or explicitly set.
    #[must_use]
    pub fn placement_anchor(&self) -> Option<Placement> {
        self.placement
    }

    /// Returns the dismiss timeout, if resolved or explicitly set.
    #[must_use]
    pub fn dismiss_timeout(&self) -> Option<Timeout> {
        self.timeout
    }

    /// Returns whether hover suspends the timer, if resolved or set.
    #[must_use]
    pub fn pauses_on_hover(&self) -> Option<bool> {
        self.pause_on_hover
    }

    /// Returns the display priority.
    #[must_use]
    pub fn display_priority(&self) -> i32 {
        self.priority
    }

    /// Returns the attached action, if any.
    #[must_use]
    pub fn action_button(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }

    /// Fills any unset field from the store defaults.
    ///
    /// Error-kind toasts with no explicit timeout become sticky instead of
    /// inheriting the default duration.
    pub(crate) fn resolve_defaults(
        &mut self,
        placement: Placement,
        timeout: Timeout,
        pause_on_hover: bool,
    ) {
        self.placement.get_or_insert(placement);
        if self.timeout.is_none() {
            self.timeout = Some(if self.kind.sticky_by_default() {
                Timeout::Sticky
            } else {
                timeout
            });
        }
        self.pause_on_hover.get_or_insert(pause_on_hover);
    }

    /// Takes the close callback out, guaranteeing at-most-once invocation.
    pub(crate) fn take_on_close(&mut self) -> Option<CloseHandler> {
        self.on_close.take()
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("heading", &self.heading)
            .field("body", &self.body)
            .field("placement", &self.placement)
            .field("timeout", &self.timeout)
            .field("priority", &self.priority)
            .field("has_on_close", &self.on_close.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn kind_colors_are_distinct() {
        let colors = [
            Kind::Success.accent_color(),
            Kind::Info.accent_color(),
            Kind::Warning.accent_color(),
            Kind::Error.accent_color(),
            Kind::Neutral.accent_color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn constructors_set_correct_kind() {
        assert_eq!(Notification::success("").kind(), Kind::Success);
        assert_eq!(Notification::info("").kind(), Kind::Info);
        assert_eq!(Notification::warning("").kind(), Kind::Warning);
        assert_eq!(Notification::error("").kind(), Kind::Error);
        assert_eq!(Notification::neutral("").kind(), Kind::Neutral);
    }

    #[test]
    fn builder_pattern_works() {
        let notification = Notification::warning("disk almost full")
            .heading("Storage")
            .placement(Placement::TopCenter)
            .priority(3)
            .dismiss_after(Duration::from_secs(8));

        assert_eq!(notification.heading_text(), Some("Storage"));
        assert_eq!(notification.body_text(), Some("disk almost full"));
        assert_eq!(notification.placement_anchor(), Some(Placement::TopCenter));
        assert_eq!(notification.display_priority(), 3);
        assert_eq!(
            notification.dismiss_timeout(),
            Some(Timeout::After(Duration::from_secs(8)))
        );
    }

    #[test]
    fn resolve_fills_only_unset_fields() {
        let mut notification = Notification::info("hi").placement(Placement::TopLeft);
        notification.resolve_defaults(
            Placement::BottomRight,
            Timeout::After(Duration::from_secs(4)),
            true,
        );

        assert_eq!(notification.placement_anchor(), Some(Placement::TopLeft));
        assert_eq!(
            notification.dismiss_timeout(),
            Some(Timeout::After(Duration::from_secs(4)))
        );
        assert_eq!(notification.pauses_on_hover(), Some(true));
    }

    #[test]
    fn resolve_makes_errors_sticky() {
        let mut notification = Notification::error("upload failed");
        notification.resolve_defaults(
            Placement::BottomRight,
            Timeout::After(Duration::from_secs(4)),
            false,
        );
        assert_eq!(notification.dismiss_timeout(), Some(Timeout::Sticky));
    }

    #[test]
    fn explicit_timeout_on_error_is_kept() {
        let mut notification =
            Notification::error("transient").dismiss_after(Duration::from_secs(2));
        notification.resolve_defaults(
            Placement::BottomRight,
            Timeout::After(Duration::from_secs(4)),
            false,
        );
        assert_eq!(
            notification.dismiss_timeout(),
            Some(Timeout::After(Duration::from_secs(2)))
        );
    }

    #[test]
    fn zero_millis_is_sticky() {
        assert!(Timeout::from_millis(0).is_sticky());
        assert_eq!(
            Timeout::from_millis(2500),
            Timeout::After(Duration::from_millis(2500))
        );
    }

    #[test]
    fn placement_edge_detection() {
        assert!(Placement::TopCenter.is_top());
        assert!(!Placement::BottomLeft.is_top());
        assert_eq!(Placement::ALL.len(), 6);
    }
}
