use std::collections::BTreeMap;

use crate::domain::{FieldId, FormValues};
use crate::rules::validation::{validate_field, ValidationResult};
use serde::Serialize;

/// Form-level verdict. Only [`validate_all`] builds one, so `all_valid`
/// always agrees with the per-field results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormValidationOutcome {
    all_valid: bool,
    per_field: BTreeMap<FieldId, ValidationResult>,
}

impl FormValidationOutcome {
    pub fn all_valid(&self) -> bool {
        self.all_valid
    }

    pub fn result(&self, field: FieldId) -> Option<&ValidationResult> {
        self.per_field.get(&field)
    }

    pub fn per_field(&self) -> &BTreeMap<FieldId, ValidationResult> {
        &self.per_field
    }

    /// First failing field in form order.
    pub fn first_invalid(&self) -> Option<FieldId> {
        self.per_field
            .values()
            .find(|result| !result.valid)
            .map(|result| result.field)
    }

    pub fn invalid_fields(&self) -> Vec<FieldId> {
        self.per_field
            .values()
            .filter(|result| !result.valid)
            .map(|result| result.field)
            .collect()
    }
}

pub fn validate_all(values: &FormValues) -> FormValidationOutcome {
    let per_field: BTreeMap<FieldId, ValidationResult> = FieldId::ALL
        .into_iter()
        .map(|field| (field, validate_field(field, values.get(field))))
        .collect();
    let all_valid = per_field.values().all(|result| result.valid);
    FormValidationOutcome {
        all_valid,
        per_field,
    }
}

#[cfg(test)]
mod tests {
    use super::validate_all;
    use crate::domain::{ConditionTag, FieldId, FormValues};

    fn complete_values() -> FormValues {
        FormValues {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            subject: "Property dispute".to_string(),
            practice_area: "Civil litigation".to_string(),
            message: "I need advice about a boundary wall.".to_string(),
            consent: true,
            privacy: true,
        }
    }

    #[test]
    fn validate_all_passes_complete_form() {
        let outcome = validate_all(&complete_values());
        assert!(outcome.all_valid());
        assert_eq!(outcome.per_field().len(), FieldId::ALL.len());
        assert!(outcome.per_field().values().all(|result| result.valid));
        assert_eq!(outcome.first_invalid(), None);
    }

    #[test]
    fn validate_all_flags_short_message_only() {
        let mut values = complete_values();
        values.message = "Hello".to_string();

        let outcome = validate_all(&values);
        assert!(!outcome.all_valid());
        let message = outcome.result(FieldId::Message).expect("message result");
        assert!(!message.valid);
        assert_eq!(message.condition, Some(ConditionTag::MinLength));
        assert_eq!(
            message.message,
            Some("Message must be at least 10 characters")
        );
        assert_eq!(outcome.invalid_fields(), vec![FieldId::Message]);
    }

    #[test]
    fn validate_all_evaluates_every_field() {
        let outcome = validate_all(&FormValues::default());
        assert!(!outcome.all_valid());
        assert_eq!(
            outcome.invalid_fields(),
            vec![
                FieldId::Name,
                FieldId::Email,
                FieldId::Subject,
                FieldId::Message,
                FieldId::Consent,
                FieldId::Privacy,
            ]
        );
        assert!(outcome.result(FieldId::Phone).expect("phone").valid);
        assert_eq!(outcome.first_invalid(), Some(FieldId::Name));
    }

    #[test]
    fn outcome_serializes_per_field_map() {
        let mut values = complete_values();
        values.privacy = false;
        let json = serde_json::to_value(validate_all(&values)).expect("serialize");
        assert_eq!(json["all_valid"], false);
        assert_eq!(json["per_field"]["privacy"]["condition"], "must_agree");
        assert_eq!(json["per_field"]["email"]["valid"], true);
    }
}
