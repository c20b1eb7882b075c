use crate::domain::phone_digits;
use crate::rules::MESSAGE_MIN_LEN;

const PHONE_COUNTRY_DIGITS: usize = 2;
const PHONE_FIRST_GROUP_END: usize = 7;
const PHONE_MAX_DIGITS: usize = 12;

/// What the message field should show while the visitor is typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageHint {
    /// Field is empty; whatever is displayed stays as it is.
    Unchanged,
    Remaining(usize),
    Satisfied,
}

impl MessageHint {
    pub fn text(self) -> Option<String> {
        match self {
            MessageHint::Remaining(count) => Some(format!("{count} more characters required")),
            MessageHint::Unchanged | MessageHint::Satisfied => None,
        }
    }
}

/// Counts the raw, untrimmed input against the message validator's minimum.
pub fn message_hint(raw: &str) -> MessageHint {
    let count = raw.chars().count();
    if count == 0 {
        MessageHint::Unchanged
    } else if count < MESSAGE_MIN_LEN {
        MessageHint::Remaining(MESSAGE_MIN_LEN - count)
    } else {
        MessageHint::Satisfied
    }
}

/// Reformats typed phone input as `+CC GROUP GROUP`. Display only: the
/// phone validator counts digits on its own.
pub fn format_phone_input(raw: &str) -> String {
    let digits = phone_digits(raw);
    let digits = &digits[..digits.len().min(PHONE_MAX_DIGITS)];

    if digits.is_empty() {
        String::new()
    } else if digits.len() <= PHONE_COUNTRY_DIGITS {
        format!("+{digits}")
    } else if digits.len() <= PHONE_FIRST_GROUP_END {
        format!(
            "+{} {}",
            &digits[..PHONE_COUNTRY_DIGITS],
            &digits[PHONE_COUNTRY_DIGITS..]
        )
    } else {
        format!(
            "+{} {} {}",
            &digits[..PHONE_COUNTRY_DIGITS],
            &digits[PHONE_COUNTRY_DIGITS..PHONE_FIRST_GROUP_END],
            &digits[PHONE_FIRST_GROUP_END..]
        )
    }
}
