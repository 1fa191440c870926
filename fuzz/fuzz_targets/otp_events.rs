#![no_main]

use libfuzzer_sys::fuzz_target;
use otp_core::{Key, Modifiers, OtpConfig, OtpControl, SegmentEvent, ValueType};
use std::cell::RefCell;
use std::rc::Rc;

const ALPHABET: &[u8] = b"0123456789abcXYZ -";

fn pick_char(byte: u8) -> char {
    char::from(ALPHABET[usize::from(byte) % ALPHABET.len()])
}

fn decode_event(op: u8, arg: u8) -> SegmentEvent {
    let modifiers = if arg & 0x80 != 0 {
        Modifiers::SHIFT
    } else {
        Modifiers::NONE
    };
    let key = |key| SegmentEvent::Key { key, modifiers };
    match op % 8 {
        0 => SegmentEvent::Text(pick_char(arg).to_string()),
        1 => key(Key::Backspace),
        2 => key(Key::Delete),
        3 => key(Key::ArrowLeft),
        4 => key(Key::ArrowRight),
        5 => key(Key::Character(pick_char(arg))),
        6 => SegmentEvent::Paste(
            (0..(arg % 12))
                .map(|i| pick_char(arg.wrapping_add(i)))
                .collect(),
        ),
        _ => SegmentEvent::FocusIn,
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&header, ops)) = data.split_first() else {
        return;
    };
    let length = usize::from(header % 10);
    let value_type = if header & 0x10 != 0 {
        ValueType::Number
    } else {
        ValueType::Text
    };

    let mut control = OtpControl::new(
        OtpConfig::default()
            .with_length(length)
            .with_value_type(value_type),
    );
    let last_seen = Rc::new(RefCell::new(None::<String>));
    let sink = Rc::clone(&last_seen);
    control.register_on_change(move |v| *sink.borrow_mut() = Some(v.to_string()));
    control.activate();

    for chunk in ops.chunks_exact(3) {
        let origin = usize::from(chunk[0]) % (length + 1);
        let event = decode_event(chunk[1], chunk[2]);
        let reaction = control.handle(origin, event);

        assert_eq!(control.segments().len(), length);
        if let Some(target) = reaction.focus {
            assert!(target < length, "focus {target} outside {length} segments");
        }
        let value = control.value();
        assert!(value.chars().count() <= length);
        if let Some(notified) = last_seen.borrow().as_deref() {
            assert_eq!(notified, value);
        }
        if value_type == ValueType::Number {
            assert!(value.bytes().all(|b| b.is_ascii_digit()));
        }
    }
});
