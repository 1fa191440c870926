//! Per-segment state.
//!
//! A [`Segment`] is created by [`SegmentStore`](crate::SegmentStore) and only
//! mutated through it; consumers get a read-only view.

/// One single-character cell of a one-time-password field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Position in the store. Fixed for the lifetime of the segment.
    index: usize,

    /// The character typed into this segment, if any.
    value: Option<char>,

    /// Whether the renderer should refuse interaction with this segment.
    disabled: bool,
}

impl Segment {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            value: None,
            disabled: false,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn value(&self) -> Option<char> {
        self.value
    }

    /// Returns `true` if nothing has been typed into this segment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Replace the segment's value.
    ///
    /// Returns `true` if the value actually changed.
    pub(crate) fn set_value(&mut self, value: Option<char>) -> bool {
        let changed = self.value != value;
        self.value = value;
        changed
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
