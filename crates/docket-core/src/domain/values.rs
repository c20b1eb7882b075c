use crate::domain::field::FieldId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Raw form state as the host collected it. Nothing here is trimmed or
/// checked; that happens in the validators and when a payload is captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub practice_area: String,
    pub message: String,
    pub consent: bool,
    pub privacy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Checked(bool),
}

impl FormValues {
    pub fn get(&self, field: FieldId) -> FieldValue<'_> {
        match field {
            FieldId::Name => FieldValue::Text(&self.name),
            FieldId::Email => FieldValue::Text(&self.email),
            FieldId::Phone => FieldValue::Text(&self.phone),
            FieldId::Subject => FieldValue::Text(&self.subject),
            FieldId::Message => FieldValue::Text(&self.message),
            FieldId::Consent => FieldValue::Checked(self.consent),
            FieldId::Privacy => FieldValue::Checked(self.privacy),
        }
    }

    pub fn text(&self, field: FieldId) -> Option<&str> {
        match self.get(field) {
            FieldValue::Text(value) => Some(value),
            FieldValue::Checked(_) => None,
        }
    }

    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::Name => Some(&mut self.name),
            FieldId::Email => Some(&mut self.email),
            FieldId::Phone => Some(&mut self.phone),
            FieldId::Subject => Some(&mut self.subject),
            FieldId::Message => Some(&mut self.message),
            FieldId::Consent | FieldId::Privacy => None,
        }
    }

    pub fn set_text(&mut self, field: FieldId, value: impl Into<String>) -> Result<(), CoreError> {
        let target = self
            .text_mut(field)
            .ok_or(CoreError::NotATextField(field.as_str()))?;
        *target = value.into();
        Ok(())
    }

    pub fn set_checked(&mut self, field: FieldId, checked: bool) {
        match field {
            FieldId::Consent => self.consent = checked,
            FieldId::Privacy => self.privacy = checked,
            _ => {}
        }
    }

    pub fn toggle(&mut self, field: FieldId) {
        if let FieldValue::Checked(current) = self.get(field) {
            self.set_checked(field, !current);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
