use crate::domain::{
    count_phone_digits, has_only_phone_characters, is_email_shape, ConditionTag, FieldId,
    FieldValue,
};
use serde::Serialize;

pub const NAME_MIN_LEN: usize = 2;
pub const SUBJECT_MIN_LEN: usize = 3;
pub const MESSAGE_MIN_LEN: usize = 10;
pub const PHONE_MIN_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Present,
    MinLength(usize),
    LettersAndSpaces,
    EmailShape,
    PhoneCharacters,
    MinDigits(usize),
    Checked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub condition: ConditionTag,
    pub rule: Rule,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: FieldId,
    pub required: bool,
    /// Evaluated in order; the first failing check decides the message.
    pub checks: &'static [Check],
}

const fn check(condition: ConditionTag, rule: Rule, message: &'static str) -> Check {
    Check {
        condition,
        rule,
        message,
    }
}

pub const FIELD_SPECS: [FieldSpec; 7] = [
    FieldSpec {
        field: FieldId::Name,
        required: true,
        checks: &[
            check(ConditionTag::Required, Rule::Present, "Name is required"),
            check(
                ConditionTag::MinLength,
                Rule::MinLength(NAME_MIN_LEN),
                "Name must be at least 2 characters",
            ),
            check(
                ConditionTag::LettersOnly,
                Rule::LettersAndSpaces,
                "Name should only contain letters",
            ),
        ],
    },
    FieldSpec {
        field: FieldId::Email,
        required: true,
        checks: &[
            check(ConditionTag::Required, Rule::Present, "Email is required"),
            check(
                ConditionTag::InvalidFormat,
                Rule::EmailShape,
                "Please enter a valid email address",
            ),
        ],
    },
    FieldSpec {
        field: FieldId::Phone,
        required: false,
        checks: &[
            check(
                ConditionTag::InvalidCharacters,
                Rule::PhoneCharacters,
                "Please enter a valid phone number",
            ),
            check(
                ConditionTag::TooFewDigits,
                Rule::MinDigits(PHONE_MIN_DIGITS),
                "Phone number must be at least 10 digits",
            ),
        ],
    },
    FieldSpec {
        field: FieldId::Subject,
        required: true,
        checks: &[
            check(ConditionTag::Required, Rule::Present, "Subject is required"),
            check(
                ConditionTag::MinLength,
                Rule::MinLength(SUBJECT_MIN_LEN),
                "Subject must be at least 3 characters",
            ),
        ],
    },
    FieldSpec {
        field: FieldId::Message,
        required: true,
        checks: &[
            check(ConditionTag::Required, Rule::Present, "Message is required"),
            check(
                ConditionTag::MinLength,
                Rule::MinLength(MESSAGE_MIN_LEN),
                "Message must be at least 10 characters",
            ),
        ],
    },
    FieldSpec {
        field: FieldId::Consent,
        required: true,
        checks: &[check(
            ConditionTag::MustAcknowledge,
            Rule::Checked,
            "You must acknowledge the disclaimer",
        )],
    },
    FieldSpec {
        field: FieldId::Privacy,
        required: true,
        checks: &[check(
            ConditionTag::MustAgree,
            Rule::Checked,
            "You must agree to the privacy policy",
        )],
    },
];

pub fn field_spec(field: FieldId) -> &'static FieldSpec {
    // FIELD_SPECS is laid out in FieldId::ALL order.
    &FIELD_SPECS[field as usize]
}

impl Rule {
    fn passes(self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Rule::Present, FieldValue::Text(text)) => !text.is_empty(),
            (Rule::MinLength(min), FieldValue::Text(text)) => text.chars().count() >= min,
            (Rule::LettersAndSpaces, FieldValue::Text(text)) => text
                .chars()
                .all(|ch| ch.is_ascii_alphabetic() || ch.is_whitespace()),
            (Rule::EmailShape, FieldValue::Text(text)) => is_email_shape(text),
            (Rule::PhoneCharacters, FieldValue::Text(text)) => has_only_phone_characters(text),
            (Rule::MinDigits(min), FieldValue::Text(text)) => count_phone_digits(text) >= min,
            (Rule::Checked, FieldValue::Checked(checked)) => checked,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub field: FieldId,
    pub valid: bool,
    pub message: Option<&'static str>,
    pub condition: Option<ConditionTag>,
}

impl ValidationResult {
    fn pass(field: FieldId) -> Self {
        Self {
            field,
            valid: true,
            message: None,
            condition: None,
        }
    }

    fn fail(field: FieldId, check: &Check) -> Self {
        Self {
            field,
            valid: false,
            message: Some(check.message),
            condition: Some(check.condition),
        }
    }
}

pub fn validate_field(field: FieldId, value: FieldValue<'_>) -> ValidationResult {
    let rules = field_spec(field);
    let value = match value {
        FieldValue::Text(raw) => FieldValue::Text(raw.trim()),
        checked => checked,
    };

    if !rules.required && value == FieldValue::Text("") {
        return ValidationResult::pass(field);
    }

    rules
        .checks
        .iter()
        .find(|check| !check.rule.passes(value))
        .map(|check| ValidationResult::fail(field, check))
        .unwrap_or_else(|| ValidationResult::pass(field))
}

pub fn validate_name(raw: &str) -> ValidationResult {
    validate_field(FieldId::Name, FieldValue::Text(raw))
}

pub fn validate_email(raw: &str) -> ValidationResult {
    validate_field(FieldId::Email, FieldValue::Text(raw))
}

pub fn validate_phone(raw: &str) -> ValidationResult {
    validate_field(FieldId::Phone, FieldValue::Text(raw))
}

pub fn validate_subject(raw: &str) -> ValidationResult {
    validate_field(FieldId::Subject, FieldValue::Text(raw))
}

pub fn validate_message(raw: &str) -> ValidationResult {
    validate_field(FieldId::Message, FieldValue::Text(raw))
}

pub fn validate_consent(checked: bool) -> ValidationResult {
    validate_field(FieldId::Consent, FieldValue::Checked(checked))
}

pub fn validate_privacy(checked: bool) -> ValidationResult {
    validate_field(FieldId::Privacy, FieldValue::Checked(checked))
}
