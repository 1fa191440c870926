//! egui integration for `otp_core`.
//!
//! egui delivers a frame's input as a flat list of [`egui::Event`]s addressed
//! to whatever widget holds keyboard focus. [`route_events`] translates the
//! ones a one-time-password segment cares about into [`SegmentEvent`]s, feeds
//! them to a [`SegmentEventSink`] starting at the focused segment, and follows
//! the focus requests the engine answers with. When focus moves, the new
//! segment gets a `FocusIn`, as a native focus change would deliver.

use egui::{Event, Key as EguiKey, Modifiers as EguiModifiers};
use otp_core::{Key, Modifiers, SegmentEvent, SegmentEventSink};

/// Outcome of routing one frame of events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Segment that should hold egui focus after this frame, if it changed.
    pub focus: Option<usize>,
    /// The focused segment's content should be shown selected.
    pub select: bool,
    /// Number of events forwarded to the sink (focus-ins included).
    pub dispatched: usize,
}

pub fn translate_modifiers(modifiers: EguiModifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl || modifiers.command,
    }
}

pub fn translate_key(key: EguiKey) -> Key {
    match key {
        EguiKey::ArrowLeft => Key::ArrowLeft,
        EguiKey::ArrowRight => Key::ArrowRight,
        EguiKey::Backspace => Key::Backspace,
        EguiKey::Delete => Key::Delete,
        other => character_for_key(other).map_or(Key::Other, Key::Character),
    }
}

/// The character a digit or letter key types, lowercase for letters.
fn character_for_key(key: EguiKey) -> Option<char> {
    let ch = match key {
        EguiKey::Num0 => '0',
        EguiKey::Num1 => '1',
        EguiKey::Num2 => '2',
        EguiKey::Num3 => '3',
        EguiKey::Num4 => '4',
        EguiKey::Num5 => '5',
        EguiKey::Num6 => '6',
        EguiKey::Num7 => '7',
        EguiKey::Num8 => '8',
        EguiKey::Num9 => '9',
        EguiKey::A => 'a',
        EguiKey::B => 'b',
        EguiKey::C => 'c',
        EguiKey::D => 'd',
        EguiKey::E => 'e',
        EguiKey::F => 'f',
        EguiKey::G => 'g',
        EguiKey::H => 'h',
        EguiKey::I => 'i',
        EguiKey::J => 'j',
        EguiKey::K => 'k',
        EguiKey::L => 'l',
        EguiKey::M => 'm',
        EguiKey::N => 'n',
        EguiKey::O => 'o',
        EguiKey::P => 'p',
        EguiKey::Q => 'q',
        EguiKey::R => 'r',
        EguiKey::S => 's',
        EguiKey::T => 't',
        EguiKey::U => 'u',
        EguiKey::V => 'v',
        EguiKey::W => 'w',
        EguiKey::X => 'x',
        EguiKey::Y => 'y',
        EguiKey::Z => 'z',
        _ => return None,
    };
    Some(ch)
}

/// Translate one egui event. Key releases and unrelated events yield `None`.
pub fn translate_event(evt: &Event) -> Option<SegmentEvent> {
    match evt {
        Event::Text(t) => Some(SegmentEvent::Text(t.clone())),
        Event::Paste(t) => Some(SegmentEvent::Paste(t.clone())),
        Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => Some(SegmentEvent::Key {
            key: translate_key(*key),
            modifiers: translate_modifiers(*modifiers),
        }),
        _ => None,
    }
}

/// Route a frame's events into `sink`, starting at segment `focused`.
///
/// Later events in the frame are addressed to wherever focus moved.
pub fn route_events<S: SegmentEventSink + ?Sized>(
    sink: &mut S,
    focused: usize,
    events: &[Event],
) -> RouteOutcome {
    let mut outcome = RouteOutcome::default();
    if focused >= sink.segment_count() {
        return outcome;
    }

    let mut cursor = focused;
    for evt in events {
        let Some(event) = translate_event(evt) else {
            continue;
        };
        let reaction = sink.dispatch(cursor, event);
        outcome.dispatched += 1;

        match reaction.focus {
            Some(target) if target != cursor => {
                log::trace!(target: "otp.egui", "focus {cursor} -> {target}");
                cursor = target;
                outcome.focus = Some(target);
                outcome.select = sink.dispatch(target, SegmentEvent::FocusIn).select;
                outcome.dispatched += 1;
            }
            // Any further input collapses the selection.
            _ => outcome.select = false,
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_core::{OtpConfig, OtpControl, Reaction, ValueType};

    fn key_event(key: EguiKey, modifiers: EguiModifiers) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn ready(config: OtpConfig) -> OtpControl {
        let mut control = OtpControl::new(config);
        control.activate();
        control
    }

    #[derive(Default)]
    struct RecordingSink {
        len: usize,
        seen: Vec<(usize, SegmentEvent)>,
    }

    impl SegmentEventSink for RecordingSink {
        fn segment_count(&self) -> usize {
            self.len
        }

        fn dispatch(&mut self, origin: usize, event: SegmentEvent) -> Reaction {
            self.seen.push((origin, event));
            Reaction::default()
        }
    }

    #[test]
    fn translates_navigation_keys_and_modifiers() {
        assert_eq!(
            translate_event(&key_event(EguiKey::ArrowLeft, EguiModifiers::SHIFT)),
            Some(SegmentEvent::Key {
                key: Key::ArrowLeft,
                modifiers: Modifiers::SHIFT,
            })
        );
        assert_eq!(translate_key(EguiKey::Num7), Key::Character('7'));
        assert_eq!(translate_key(EguiKey::Q), Key::Character('q'));
        assert_eq!(translate_key(EguiKey::Escape), Key::Other);
        assert!(translate_modifiers(EguiModifiers::COMMAND).ctrl);
    }

    #[test]
    fn key_releases_are_dropped() {
        let release = Event::Key {
            key: EguiKey::Backspace,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: EguiModifiers::NONE,
        };
        assert_eq!(translate_event(&release), None);
        assert_eq!(translate_event(&Event::Copy), None);
    }

    #[test]
    fn typed_digits_advance_through_the_field() {
        let mut control = ready(OtpConfig::default().with_length(4));
        let events = vec![
            key_event(EguiKey::Num1, EguiModifiers::NONE),
            Event::Text("1".into()),
            key_event(EguiKey::Num2, EguiModifiers::NONE),
            Event::Text("2".into()),
        ];

        let outcome = route_events(&mut control, 0, &events);
        assert_eq!(outcome.focus, Some(2));
        assert_eq!(control.value(), "12");
        assert_eq!(control.focused(), Some(2));
    }

    #[test]
    fn paste_moves_to_last_segment() {
        let mut control = ready(OtpConfig::default().with_value_type(ValueType::Number));
        let outcome = route_events(&mut control, 0, &[Event::Paste("123456".into())]);
        assert_eq!(outcome.focus, Some(5));
        // Focus lands on a filled segment, so it is selected.
        assert!(outcome.select);
        assert_eq!(control.value(), "123456");
    }

    #[test]
    fn backspace_walks_back_over_empty_segments() {
        let mut control = ready(OtpConfig::default());
        control.write_value("ab");

        let events = vec![key_event(EguiKey::Backspace, EguiModifiers::NONE)];
        let outcome = route_events(&mut control, 3, &events);
        assert_eq!(outcome.focus, Some(2));
        assert!(!outcome.select);
        assert_eq!(control.value(), "ab");
    }

    #[test]
    fn events_stay_put_without_focus_requests() {
        let mut sink = RecordingSink {
            len: 3,
            ..RecordingSink::default()
        };
        let events = vec![
            Event::Text("x".into()),
            Event::PointerGone,
            key_event(EguiKey::ArrowRight, EguiModifiers::NONE),
        ];
        let outcome = route_events(&mut sink, 1, &events);

        // The recording sink never requests focus, so everything stays at 1.
        assert_eq!(outcome.focus, None);
        assert_eq!(outcome.dispatched, 2);
        assert!(sink.seen.iter().all(|(origin, _)| *origin == 1));
    }

    #[test]
    fn out_of_range_focus_dispatches_nothing() {
        let mut control = ready(OtpConfig::default().with_length(2));
        let outcome = route_events(&mut control, 2, &[Event::Text("1".into())]);
        assert_eq!(outcome, RouteOutcome::default());
        assert_eq!(control.value(), "");
    }
}
