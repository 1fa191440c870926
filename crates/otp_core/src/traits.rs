//! Event sink trait used by rendering layers.
//!
//! Rendering integrations (e.g. `otp_egui`) route their native events through
//! this trait rather than a concrete control, so they can be exercised against
//! a recording sink in tests.

use crate::nav::{Reaction, SegmentEvent};

/// Receiver of per-segment rendering events.
///
/// # Integration Pattern
///
/// ```ignore
/// fn on_native_event(sink: &mut impl SegmentEventSink, focused: usize, evt: NativeEvent) {
///     if let Some(event) = translate(evt) {
///         let reaction = sink.dispatch(focused, event);
///         if let Some(target) = reaction.focus {
///             request_native_focus(target);
///         }
///     }
/// }
/// ```
pub trait SegmentEventSink {
    /// Number of segments events may be addressed to.
    fn segment_count(&self) -> usize;

    /// Handle `event` raised by segment `origin`.
    fn dispatch(&mut self, origin: usize, event: SegmentEvent) -> Reaction;
}
