// SPDX-License-Identifier: MPL-2.0
//! Review queue navigation.
//!
//! The `ReviewQueue` holds the ordered list of challan image ids assigned
//! to an officer and tracks which one is currently under review. It is the
//! single source of truth for navigation and for the *prefetch window*:
//! the next few entries whose presigned URLs should be fetched ahead of
//! time (see [`crate::media::prefetch`]).

/// Navigation state snapshot for UI rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueInfo {
    /// Whether there is a next image to navigate to.
    pub has_next: bool,
    /// Whether there is a previous image to navigate to.
    pub has_previous: bool,
    /// Current position in the queue (0-indexed), if set.
    pub current_index: Option<usize>,
    /// Total number of images in the queue.
    pub total_count: usize,
}

/// Ordered list of image ids under review, with a cursor.
///
/// The queue never wraps: the first and last entries are hard edges, which
/// matches how officers work through an assignment batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQueue {
    items: Vec<String>,
    cursor: Option<usize>,
}

impl ReviewQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue positioned on its first entry.
    #[must_use]
    pub fn from_items(items: Vec<String>) -> Self {
        let cursor = if items.is_empty() { None } else { Some(0) };
        Self { items, cursor }
    }

    /// Appends an image id to the end of the queue.
    ///
    /// The cursor moves to the new entry only when the queue was empty.
    pub fn push(&mut self, id: impl Into<String>) {
        self.items.push(id.into());
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
    }

    /// Removes an image id (e.g. after the challan was issued or rejected).
    ///
    /// Returns `true` if the id was present. The cursor stays on the same
    /// position so the next unreviewed image slides into view; removing
    /// the final entry steps the cursor back.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(pos) = self.items.iter().position(|item| item == id) else {
            return false;
        };
        self.items.remove(pos);
        self.cursor = match self.cursor {
            None => None,
            Some(_) if self.items.is_empty() => None,
            Some(cursor) if pos < cursor => Some(cursor - 1),
            Some(cursor) => Some(cursor.min(self.items.len() - 1)),
        };
        true
    }

    /// Returns the image id currently under review.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|i| self.items[i].as_str())
    }

    /// Moves to the next image and returns it, or `None` at the end.
    pub fn advance(&mut self) -> Option<&str> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.items.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.current()
    }

    /// Moves to the previous image and returns it, or `None` at the start.
    pub fn retreat(&mut self) -> Option<&str> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.current()
    }

    /// Jumps to the given position, returning the image id there.
    pub fn jump_to(&mut self, index: usize) -> Option<&str> {
        if index >= self.items.len() {
            return None;
        }
        self.cursor = Some(index);
        self.current()
    }

    /// Jumps to the given image id. Returns `false` if it is not queued.
    pub fn select(&mut self, id: &str) -> bool {
        match self.items.iter().position(|item| item == id) {
            Some(pos) => {
                self.cursor = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Returns the ids eligible for prefetching: up to `count` entries
    /// directly after the cursor, never including the current one, clipped
    /// at the end of the queue.
    #[must_use]
    pub fn prefetch_window(&self, count: usize) -> &[String] {
        let Some(cursor) = self.cursor else {
            return &[];
        };
        let start = (cursor + 1).min(self.items.len());
        let end = (start + count).min(self.items.len());
        &self.items[start..end]
    }

    /// Returns a navigation snapshot for UI rendering.
    #[must_use]
    pub fn info(&self) -> QueueInfo {
        QueueInfo {
            has_next: self
                .cursor
                .is_some_and(|cursor| cursor + 1 < self.items.len()),
            has_previous: self.cursor.is_some_and(|cursor| cursor > 0),
            current_index: self.cursor,
            total_count: self.items.len(),
        }
    }

    /// Returns the number of queued images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
