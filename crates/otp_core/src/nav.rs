//! Focus routing between segments.
//!
//! The controller keeps no state of its own: every [`Reaction`] is computed from
//! the triggering [`Signal`], the originating segment, and the current shape of
//! the segment list. Navigation never wraps around; requests past the first or
//! last segment simply produce no focus change.

use crate::segment::Segment;
use crate::validate::{ValueType, accepts};

/// Keys the controller distinguishes. Everything else is [`Key::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Backspace,
    Delete,
    /// A printable key, reported before its text is inserted.
    Character(char),
    Other,
}

/// Modifier keys held while a key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    /// Ctrl, or the platform command key.
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
    };
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
    };
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
    };
}

/// A low-level signal forwarded by the rendering layer for one segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegmentEvent {
    /// Key pressed while the segment has focus.
    Key { key: Key, modifiers: Modifiers },
    /// Text about to be inserted (typed characters, IME commits).
    Text(String),
    /// Clipboard contents pasted into the segment.
    Paste(String),
    /// The segment received focus.
    FocusIn,
}

impl SegmentEvent {
    pub fn key(key: Key) -> Self {
        SegmentEvent::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        SegmentEvent::Text(s.into())
    }

    pub fn paste(s: impl Into<String>) -> Self {
        SegmentEvent::Paste(s.into())
    }
}

/// Navigation-relevant signal kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// A character landed in the segment.
    Inserted,
    /// A backward delete happened at the segment.
    Removed { was_empty: bool },
    /// A key was pressed.
    Key { key: Key, modifiers: Modifiers },
    /// A paste was handled (accepted or not).
    Pasted,
    /// The segment received focus.
    FocusIn,
}

/// What the host should do in response to a signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    /// Segment that should receive focus next.
    pub focus: Option<usize>,
    /// Suppress the platform's default handling of the signal.
    pub prevent_default: bool,
    /// Select the full content of the originating segment.
    pub select: bool,
    /// Clear the originating segment's visible content before the pending
    /// character is committed. Only meaningful to hosts backed by a native
    /// text widget; the engine's own commit always replaces.
    pub clear: bool,
}

impl Reaction {
    fn focus(index: Option<usize>) -> Self {
        Self {
            focus: index,
            ..Self::default()
        }
    }

    fn prevent(index: Option<usize>) -> Self {
        Self {
            focus: index,
            prevent_default: true,
            ..Self::default()
        }
    }

    /// Merge a later reaction into this one. The later focus request wins.
    pub fn then(self, later: Reaction) -> Reaction {
        Reaction {
            focus: later.focus.or(self.focus),
            prevent_default: self.prevent_default || later.prevent_default,
            select: self.select || later.select,
            clear: self.clear || later.clear,
        }
    }
}

/// Compute the reaction to `signal` raised by segment `origin`.
///
/// `origin` outside the segment list yields [`Reaction::default`].
pub fn react(
    signal: Signal,
    origin: usize,
    segments: &[Segment],
    value_type: ValueType,
) -> Reaction {
    let Some(seg) = segments.get(origin) else {
        return Reaction::default();
    };
    let len = segments.len();

    let reaction = match signal {
        Signal::Inserted if seg.is_empty() => Reaction::default(),
        Signal::Inserted => Reaction::focus(next(origin, len)),

        Signal::Removed { was_empty: true } => Reaction::prevent(prev(origin)),
        Signal::Removed { was_empty: false } => Reaction::default(),

        Signal::Key { key, modifiers } => react_to_key(key, modifiers, origin, seg, len, value_type),

        Signal::Pasted => Reaction::prevent(segments.len().checked_sub(1)),

        Signal::FocusIn => Reaction {
            select: !seg.is_empty(),
            ..Reaction::default()
        },
    };

    log::trace!(target: "otp.nav", "{signal:?} at {origin} -> {reaction:?}");
    reaction
}

fn react_to_key(
    key: Key,
    modifiers: Modifiers,
    origin: usize,
    seg: &Segment,
    len: usize,
    value_type: ValueType,
) -> Reaction {
    match key {
        // Shift+arrow belongs to text selection.
        Key::ArrowLeft | Key::ArrowRight if modifiers.shift => Reaction::default(),
        Key::ArrowLeft => Reaction::focus(prev(origin)),
        Key::ArrowRight => Reaction::focus(next(origin, len)),

        // A filled segment deletes in place.
        Key::Backspace | Key::Delete if !seg.is_empty() => Reaction::default(),
        Key::Backspace => Reaction::prevent(prev(origin)),
        Key::Delete => Reaction::prevent(next(origin, len)),

        Key::Character(ch) => Reaction {
            clear: ch.is_ascii_alphanumeric()
                && !seg.is_empty()
                && !modifiers.shift
                && !modifiers.ctrl
                && accepts(ch, value_type),
            ..Reaction::default()
        },

        Key::Other => Reaction::default(),
    }
}

#[inline]
fn prev(origin: usize) -> Option<usize> {
    origin.checked_sub(1)
}

#[inline]
fn next(origin: usize, len: usize) -> Option<usize> {
    let candidate = origin + 1;
    (candidate < len).then_some(candidate)
}
