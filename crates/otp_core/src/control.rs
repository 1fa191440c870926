//! The field-level facade.
//!
//! [`OtpControl`] owns the configuration and the [`SegmentStore`], exposes the
//! host contract (`write_value` / `value` / `register_on_change` /
//! `set_disabled`), and routes rendering-layer events through the validator and
//! the navigation controller.
//!
//! There is no native text widget underneath, so when navigation lets a
//! signal's default behavior proceed the control applies that default to its
//! own store (e.g. Backspace on a filled segment clears it).
//!
//! Lifecycle:
//! - `Uninitialized`: configuration and external values are recorded only.
//! - `Ready`: after [`activate`](OtpControl::activate). The store exists and a
//!   single subscription forwards edits to the host.
//! - `TornDown`: after [`teardown`](OtpControl::teardown). The subscription is
//!   closed and every later call is ignored.

use crate::aggregate::{aggregate, distribute};
use crate::config::OtpConfig;
use crate::nav::{self, Key, Modifiers, Reaction, SegmentEvent, Signal};
use crate::segment::Segment;
use crate::store::SegmentStore;
use crate::subscription::Subscription;
use crate::traits::SegmentEventSink;
use crate::validate::{InputType, ValueType, accepts, accepts_paste};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Ready,
    TornDown,
}

type OnChange = Box<dyn FnMut(&str)>;

/// State shared between the control and its store subscription.
#[derive(Default)]
struct HostBinding {
    value: String,
    on_change: Option<OnChange>,
}

impl HostBinding {
    /// Record `value` and hand it to the host callback.
    ///
    /// The callback is taken out of the cell while it runs so it may freely
    /// read the binding through other handles.
    fn publish(binding: &RefCell<HostBinding>, value: String) {
        let callback = {
            let mut b = binding.borrow_mut();
            b.value.clone_from(&value);
            b.on_change.take()
        };
        log::trace!(target: "otp.control", "value changed: {value:?}");
        if let Some(mut callback) = callback {
            callback(&value);
            let mut b = binding.borrow_mut();
            if b.on_change.is_none() {
                b.on_change = Some(callback);
            }
        }
    }
}

/// Segmented one-time-password field.
///
/// # Example
///
/// ```
/// use otp_core::{OtpConfig, OtpControl, SegmentEvent, ValueType};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut control = OtpControl::new(OtpConfig::default().with_value_type(ValueType::Number));
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// control.register_on_change(move |v| sink.borrow_mut().push(v.to_string()));
/// control.activate();
///
/// let reaction = control.handle(0, SegmentEvent::text("4"));
/// assert_eq!(reaction.focus, Some(1));
/// assert_eq!(control.value(), "4");
/// assert_eq!(*seen.borrow(), vec!["4".to_string()]);
/// ```
pub struct OtpControl {
    config: OtpConfig,
    lifecycle: Lifecycle,
    store: SegmentStore,
    subscription: Option<Subscription>,
    binding: Rc<RefCell<HostBinding>>,
    /// External value written before activation.
    pending_value: Option<String>,
    focused: Option<usize>,
}

impl OtpControl {
    pub fn new(config: OtpConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Uninitialized,
            store: SegmentStore::new(),
            subscription: None,
            binding: Rc::default(),
            pending_value: None,
            focused: None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Build the segments, subscribe to edits, and apply the disabled state.
    ///
    /// Returns the segment to focus when `focus_on_init` is set. Calling this
    /// more than once is a no-op.
    pub fn activate(&mut self) -> Option<usize> {
        if self.lifecycle != Lifecycle::Uninitialized {
            return None;
        }
        self.lifecycle = Lifecycle::Ready;
        self.mount_store();

        if let Some(value) = self.pending_value.take() {
            self.apply_external_value(&value);
        }

        log::debug!(
            target: "otp.control",
            "activated with {} segment(s), {:?}",
            self.store.len(),
            self.config.value_type
        );

        if self.config.focus_on_init && !self.store.is_empty() {
            self.focused = Some(0);
            return Some(0);
        }
        None
    }

    /// Close the subscription and drop the segments. Irreversible.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        if let Some(sub) = self.subscription.take() {
            sub.close();
        }
        self.store = SegmentStore::new();
        self.focused = None;
        self.pending_value = None;
        self.lifecycle = Lifecycle::TornDown;
        log::debug!(target: "otp.control", "torn down");
    }

    /// Rebuild the store at the configured length and re-subscribe.
    ///
    /// The old subscription is closed before the rebuild so a listener bound
    /// to the previous segments can never observe the new ones.
    fn mount_store(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.close();
        }

        self.store.build(self.config.length);
        self.store.set_disabled(self.config.disabled);
        self.focused = None;
        self.binding.borrow_mut().value.clear();

        let binding = Rc::clone(&self.binding);
        self.subscription = Some(self.store.subscribe(move |segments| {
            HostBinding::publish(&binding, aggregate(segments));
        }));
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Change the segment count.
    ///
    /// Once the control is ready, a different length discards every value and
    /// rebuilds the segments. The same length is a no-op.
    pub fn set_length(&mut self, length: usize) {
        if self.config.length == length {
            return;
        }
        let previous = std::mem::replace(&mut self.config.length, length);
        if self.lifecycle == Lifecycle::Ready {
            log::debug!(target: "otp.control", "length {previous} -> {length}, rebuilding");
            self.mount_store();
        }
    }

    pub fn set_value_type(&mut self, value_type: ValueType) {
        self.config.value_type = value_type;
    }

    pub fn set_masked(&mut self, masked: bool) {
        self.config.masked = masked;
    }

    pub fn set_focus_on_init(&mut self, focus_on_init: bool) {
        self.config.focus_on_init = focus_on_init;
    }

    /// Enable or disable every segment in place. Values are kept.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if self.lifecycle == Lifecycle::Ready {
            self.store.set_disabled(disabled);
        }
    }

    /// Apply a whole configuration, performing only the transitions the
    /// changed fields require.
    pub fn apply(&mut self, config: OtpConfig) {
        let OtpConfig {
            length,
            value_type,
            masked,
            disabled,
            focus_on_init,
        } = config;
        self.set_value_type(value_type);
        self.set_masked(masked);
        self.set_focus_on_init(focus_on_init);
        self.set_length(length);
        if self.config.disabled != disabled {
            self.set_disabled(disabled);
        }
    }

    // =========================================================================
    // Host binding
    // =========================================================================

    /// Distribute an externally supplied value across the segments.
    ///
    /// The host callback is not invoked: the host already knows this value.
    /// Characters beyond the segment count are dropped. Before activation the
    /// value is only held until the segments exist.
    pub fn write_value(&mut self, value: &str) {
        match self.lifecycle {
            Lifecycle::Uninitialized => self.pending_value = Some(value.to_string()),
            Lifecycle::Ready => self.apply_external_value(value),
            Lifecycle::TornDown => {}
        }
    }

    fn apply_external_value(&mut self, value: &str) {
        distribute(value, &mut self.store);
        self.binding.borrow_mut().value = aggregate(self.store.segments());
    }

    /// Current aggregated value.
    pub fn value(&self) -> String {
        self.binding.borrow().value.clone()
    }

    /// Register the host callback invoked with each internally produced value.
    ///
    /// Replaces any previously registered callback.
    pub fn register_on_change(&mut self, on_change: impl FnMut(&str) + 'static) {
        self.binding.borrow_mut().on_change = Some(Box::new(on_change));
    }

    // =========================================================================
    // Read-only state
    // =========================================================================

    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn segments(&self) -> &[Segment] {
        self.store.segments()
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// The native input kind a renderer should use for every segment.
    pub fn input_type(&self) -> InputType {
        self.config.input_type()
    }

    /// Segment that currently holds focus, as last reported or requested.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    // =========================================================================
    // Event routing
    // =========================================================================

    /// Route one rendering-layer event raised by segment `origin`.
    ///
    /// Events for a missing segment, or arriving while the control is disabled
    /// or not ready, are ignored.
    pub fn handle(&mut self, origin: usize, event: SegmentEvent) -> Reaction {
        if self.lifecycle != Lifecycle::Ready
            || self.config.disabled
            || origin >= self.store.len()
        {
            log::trace!(target: "otp.control", "ignored {event:?} at segment {origin}");
            return Reaction::default();
        }

        let reaction = match event {
            SegmentEvent::Key { key, modifiers } => self.on_key(origin, key, modifiers),
            SegmentEvent::Text(text) => self.on_text(origin, &text),
            SegmentEvent::Paste(text) => self.on_paste(origin, &text),
            SegmentEvent::FocusIn => {
                self.focused = Some(origin);
                self.react(Signal::FocusIn, origin)
            }
        };

        if let Some(target) = reaction.focus {
            self.focused = Some(target);
        }
        reaction
    }

    fn react(&self, signal: Signal, origin: usize) -> Reaction {
        nav::react(
            signal,
            origin,
            self.store.segments(),
            self.config.value_type,
        )
    }

    fn on_key(&mut self, origin: usize, key: Key, modifiers: Modifiers) -> Reaction {
        let reaction = self.react(Signal::Key { key, modifiers }, origin);
        if reaction.prevent_default {
            return reaction;
        }

        match key {
            Key::Backspace | Key::Delete => {
                let was_empty = self.store.get(origin).is_none_or(Segment::is_empty);
                if was_empty {
                    return reaction;
                }
                // Default deletion: the whole single-character content goes.
                self.store.edit_segment(origin, None);
                reaction.then(self.react(Signal::Removed { was_empty }, origin))
            }
            _ => reaction,
        }
    }

    /// Commit typed text as one edit.
    ///
    /// Accepted characters fill consecutive segments from `origin`, replacing
    /// their content; rejected characters are vetoed. Characters that run past
    /// the last segment are dropped. The host hears about the run once.
    fn on_text(&mut self, origin: usize, text: &str) -> Reaction {
        let value_type = self.config.value_type;
        let mut reaction = Reaction::default();

        let mut accepted = Vec::with_capacity(text.len());
        for ch in text.chars() {
            if accepts(ch, value_type) {
                accepted.push(ch);
            } else {
                log::trace!(target: "otp.control", "vetoed {ch:?} under {value_type:?}");
                reaction.prevent_default = true;
            }
        }

        let written = self.store.edit_segments(origin, accepted.iter().copied());
        if written < accepted.len() {
            log::trace!(
                target: "otp.control",
                "dropped {} typed char(s) past the last segment",
                accepted.len() - written
            );
        }
        for cursor in origin..origin + written {
            reaction = reaction.then(self.react(Signal::Inserted, cursor));
        }
        reaction
    }

    /// Fill the field from clipboard text.
    ///
    /// The string is validated as a whole; a rejected paste changes nothing.
    /// Focus moves to the last segment either way.
    fn on_paste(&mut self, origin: usize, text: &str) -> Reaction {
        if !text.is_empty() {
            if accepts_paste(text, self.config.value_type) {
                distribute(text, &mut self.store);
                HostBinding::publish(&self.binding, aggregate(self.store.segments()));
            } else {
                log::debug!(
                    target: "otp.control",
                    "rejected paste of {} char(s) under {:?}",
                    text.chars().count(),
                    self.config.value_type
                );
            }
        }
        self.react(Signal::Pasted, origin)
    }
}

impl Default for OtpControl {
    fn default() -> Self {
        Self::new(OtpConfig::default())
    }
}

impl Drop for OtpControl {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for OtpControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpControl")
            .field("config", &self.config)
            .field("lifecycle", &self.lifecycle)
            .field("store", &self.store)
            .field("value", &self.binding.borrow().value)
            .field("focused", &self.focused)
            .finish()
    }
}

impl SegmentEventSink for OtpControl {
    #[inline]
    fn segment_count(&self) -> usize {
        self.store.len()
    }

    #[inline]
    fn dispatch(&mut self, origin: usize, event: SegmentEvent) -> Reaction {
        self.handle(origin, event)
    }
}
