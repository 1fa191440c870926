//! Value-type policy: which characters and pasted strings a field accepts.

/// Character acceptance policy of a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Any single non-whitespace character.
    #[default]
    Text,
    /// ASCII digits only.
    Number,
}

/// The kind of native input a renderer should draw for each segment.
///
/// Masking only changes presentation; it has no effect on the value model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Number,
    Password,
}

impl InputType {
    pub fn for_field(value_type: ValueType, masked: bool) -> Self {
        if masked {
            return InputType::Password;
        }
        match value_type {
            ValueType::Text => InputType::Text,
            ValueType::Number => InputType::Number,
        }
    }
}

/// Decide whether a single typed character may land in a segment.
#[inline]
pub fn accepts(ch: char, value_type: ValueType) -> bool {
    match value_type {
        ValueType::Text => !ch.is_whitespace(),
        ValueType::Number => ch.is_ascii_digit(),
    }
}

/// `true` for a non-empty string made only of ASCII digits.
pub fn is_numeric_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `true` if the string has at least one non-whitespace character.
pub fn is_non_blank_string(s: &str) -> bool {
    s.chars().any(|c| !c.is_whitespace())
}

/// Whole-string gate for paste: a rejected string is ignored entirely.
pub fn accepts_paste(s: &str, value_type: ValueType) -> bool {
    match value_type {
        ValueType::Text => is_non_blank_string(s),
        ValueType::Number => is_numeric_string(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_policy_accepts_only_ascii_digits() {
        assert!(accepts('5', ValueType::Number));
        assert!(accepts('0', ValueType::Number));
        assert!(!accepts('a', ValueType::Number));
        assert!(!accepts(' ', ValueType::Number));
        // Non-ASCII digits are not accepted.
        assert!(!accepts('٣', ValueType::Number));
    }

    #[test]
    fn text_policy_accepts_any_non_whitespace() {
        assert!(accepts('a', ValueType::Text));
        assert!(accepts('5', ValueType::Text));
        assert!(accepts('€', ValueType::Text));
        assert!(!accepts(' ', ValueType::Text));
        assert!(!accepts('\t', ValueType::Text));
    }

    #[test]
    fn numeric_string_requires_every_char_to_be_a_digit() {
        assert!(is_numeric_string("123456"));
        assert!(!is_numeric_string("12a456"));
        assert!(!is_numeric_string(" 123"));
        assert!(!is_numeric_string(""));
    }

    #[test]
    fn non_blank_string() {
        assert!(is_non_blank_string("a"));
        assert!(is_non_blank_string("  x "));
        assert!(!is_non_blank_string("   "));
        assert!(!is_non_blank_string(""));
    }

    #[test]
    fn paste_gate_follows_policy() {
        assert!(accepts_paste("12a456", ValueType::Text));
        assert!(!accepts_paste("12a456", ValueType::Number));
        assert!(accepts_paste("123456", ValueType::Number));
        assert!(!accepts_paste("  ", ValueType::Text));
    }

    #[test]
    fn masked_fields_render_as_password() {
        assert_eq!(InputType::for_field(ValueType::Number, true), InputType::Password);
        assert_eq!(InputType::for_field(ValueType::Text, true), InputType::Password);
        assert_eq!(InputType::for_field(ValueType::Number, false), InputType::Number);
        assert_eq!(InputType::for_field(ValueType::Text, false), InputType::Text);
    }
}
