use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Name,
    Email,
    Phone,
    Subject,
    Message,
    Consent,
    Privacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
}

impl FieldId {
    /// Form order. Focus and "first error" lookups follow it.
    pub const ALL: [FieldId; 7] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Subject,
        FieldId::Message,
        FieldId::Consent,
        FieldId::Privacy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Subject => "subject",
            FieldId::Message => "message",
            FieldId::Consent => "consent",
            FieldId::Privacy => "privacy",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::Consent | FieldId::Privacy => FieldKind::Checkbox,
            _ => FieldKind::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Full name",
            FieldId::Email => "Email",
            FieldId::Phone => "Phone",
            FieldId::Subject => "Subject",
            FieldId::Message => "Message",
            FieldId::Consent => "I acknowledge the disclaimer",
            FieldId::Privacy => "I agree to the privacy policy",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FieldId::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownField(trimmed.to_string()))
    }
}

/// Which check a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTag {
    Required,
    MinLength,
    LettersOnly,
    InvalidFormat,
    InvalidCharacters,
    TooFewDigits,
    MustAcknowledge,
    MustAgree,
}

impl ConditionTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionTag::Required => "required",
            ConditionTag::MinLength => "min_length",
            ConditionTag::LettersOnly => "letters_only",
            ConditionTag::InvalidFormat => "invalid_format",
            ConditionTag::InvalidCharacters => "invalid_characters",
            ConditionTag::TooFewDigits => "too_few_digits",
            ConditionTag::MustAcknowledge => "must_acknowledge",
            ConditionTag::MustAgree => "must_agree",
        }
    }
}
