pub mod aggregate;
pub mod validation;

pub use aggregate::{validate_all, FormValidationOutcome};
pub use validation::{
    field_spec, validate_consent, validate_email, validate_field, validate_message,
    validate_name, validate_phone, validate_privacy, validate_subject, Check, FieldSpec, Rule,
    ValidationResult, FIELD_SPECS, MESSAGE_MIN_LEN, NAME_MIN_LEN, PHONE_MIN_DIGITS,
    SUBJECT_MIN_LEN,
};
