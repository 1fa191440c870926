//! Ordered store of segments: the single source of truth for "what is typed where".
//!
//! The store distinguishes two write paths:
//! - [`SegmentStore::edit_segment`] is the normal editing path and notifies
//!   subscribers when a value changes.
//! - [`SegmentStore::set_segment_value`] is the silent path used for
//!   programmatic writes (external values, paste distribution), so the
//!   aggregator never hears its own writes echoed back.

use crate::segment::Segment;
use crate::subscription::{SharedRegistry, Subscription};

/// Ordered sequence of single-character segments.
///
/// # Example
///
/// ```
/// use otp_core::SegmentStore;
///
/// let mut store = SegmentStore::new();
/// store.build(4);
/// store.edit_segment(0, Some('9'));
///
/// assert_eq!(store.len(), 4);
/// assert_eq!(store.get(0).and_then(|s| s.value()), Some('9'));
/// ```
#[derive(Default)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    listeners: SharedRegistry,
}

impl SegmentStore {
    /// Create an empty store. Call [`build`](Self::build) to allocate segments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store with `length` fresh, empty, enabled segments.
    ///
    /// Prior values are discarded; nothing migrates across a rebuild.
    /// A zero length yields an empty store.
    pub fn build(&mut self, length: usize) {
        let live = self.listeners.borrow().len();
        if live > 0 {
            log::debug!(
                target: "otp.store",
                "rebuilding store with {live} live subscription(s) still attached"
            );
        }
        self.segments = (0..length).map(Segment::new).collect();
        log::trace!(target: "otp.store", "built {length} segment(s)");
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Read-only ordered view of every segment.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Index of the last segment, or `None` for an empty store.
    #[inline]
    pub fn last_index(&self) -> Option<usize> {
        self.segments.len().checked_sub(1)
    }

    /// Set one segment's value without notifying subscribers.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_segment_value(&mut self, index: usize, value: Option<char>) {
        if let Some(seg) = self.segments.get_mut(index) {
            seg.set_value(value);
        }
    }

    /// Set one segment's value through the editing path.
    ///
    /// Subscribers are notified only when the value actually changes.
    /// Returns `true` in that case.
    pub fn edit_segment(&mut self, index: usize, value: Option<char>) -> bool {
        let Some(seg) = self.segments.get_mut(index) else {
            return false;
        };
        if !seg.set_value(value) {
            return false;
        }
        self.notify();
        true
    }

    /// Write a run of characters from `start` onward through the editing path.
    ///
    /// Characters past the last segment are dropped. Subscribers are notified
    /// once, and only if some segment changed. Returns the number of segments
    /// written.
    pub fn edit_segments(&mut self, start: usize, values: impl IntoIterator<Item = char>) -> usize {
        let Some(tail) = self.segments.get_mut(start..) else {
            return 0;
        };
        let mut written = 0;
        let mut changed = false;
        for (seg, ch) in tail.iter_mut().zip(values) {
            changed |= seg.set_value(Some(ch));
            written += 1;
        }
        if changed {
            self.notify();
        }
        written
    }

    /// Set the `disabled` flag on every current segment. Values are untouched.
    pub fn set_disabled(&mut self, disabled: bool) {
        for seg in &mut self.segments {
            seg.set_disabled(disabled);
        }
    }

    /// Register a listener for edits made through [`edit_segment`](Self::edit_segment).
    ///
    /// The listener receives the full segment list after each change and stays
    /// registered until the returned handle is closed or dropped.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Segment]) + 'static) -> Subscription {
        let id = self.listeners.borrow_mut().insert(Box::new(listener));
        log::trace!(target: "otp.store", "subscription {id} opened");
        Subscription::new(id, &self.listeners)
    }

    /// Number of listeners currently registered.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        self.listeners.borrow_mut().emit(&self.segments);
    }
}

impl std::fmt::Debug for SegmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentStore")
            .field("segments", &self.segments)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
