use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::domain::{FormValues, SubmissionId};
use crate::error::CoreError;
use crate::rules::{validate_all, FormValidationOutcome};
use crate::time::format_iso8601;

/// Snapshot of a form that passed validation. Fields are private so a
/// payload cannot change after capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    id: SubmissionId,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    practice_area: Option<String>,
    message: String,
    consent: bool,
    privacy: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
}

fn serialize_timestamp<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso8601(*at))
}

fn form_invalid(outcome: &FormValidationOutcome) -> CoreError {
    let fields = outcome
        .invalid_fields()
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    CoreError::FormInvalid(fields)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl SubmissionPayload {
    /// Fails when `outcome` has any invalid field, or when `values` no
    /// longer pass validation themselves; a payload is never built from a
    /// rejected form.
    pub fn capture(
        outcome: &FormValidationOutcome,
        values: &FormValues,
        at: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        if !outcome.all_valid() {
            return Err(form_invalid(outcome));
        }
        let current = validate_all(values);
        if !current.all_valid() {
            return Err(form_invalid(&current));
        }

        Ok(Self {
            id: SubmissionId::new(),
            name: values.name.trim().to_string(),
            email: values.email.trim().to_string(),
            phone: non_empty(&values.phone),
            subject: values.subject.trim().to_string(),
            practice_area: non_empty(&values.practice_area),
            message: values.message.trim().to_string(),
            consent: values.consent,
            privacy: values.privacy,
            timestamp: at,
        })
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn practice_area(&self) -> Option<&str> {
        self.practice_area.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    pub fn privacy(&self) -> bool {
        self.privacy
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn timestamp_iso8601(&self) -> String {
        format_iso8601(self.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Success { payload: SubmissionPayload },
    /// Reserved for a real transport; the simulator never produces it.
    Failure { reason: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    /// On success the host clears field values, error text and saved drafts.
    pub fn clears_form(&self) -> bool {
        self.is_success()
    }

    pub fn payload(&self) -> Option<&SubmissionPayload> {
        match self {
            SubmissionOutcome::Success { payload } => Some(payload),
            SubmissionOutcome::Failure { .. } => None,
        }
    }

    pub fn banner(&self) -> String {
        match self {
            SubmissionOutcome::Success { payload } => format!(
                "Thank you for contacting us. We will get back to you shortly. (ref {})",
                payload.id().short()
            ),
            SubmissionOutcome::Failure { reason } => format!(
                "Sorry, there was an error sending your message. Please try again later. ({reason})"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SubmissionOutcome, SubmissionPayload};
    use crate::domain::FormValues;
    use crate::error::CoreError;
    use crate::rules::validate_all;
    use crate::time::parse_iso8601;
    use chrono::{TimeZone, Utc};

    fn valid_values() -> FormValues {
        FormValues {
            name: " Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            subject: "Will drafting".to_string(),
            practice_area: "   ".to_string(),
            message: "Please call me about my will.".to_string(),
            consent: true,
            privacy: true,
        }
    }

    #[test]
    fn capture_trims_and_drops_blank_optionals() {
        let values = valid_values();
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let payload = SubmissionPayload::capture(&validate_all(&values), &values, at).unwrap();
        assert_eq!(payload.name(), "Ada Lovelace");
        assert_eq!(payload.phone(), None);
        assert_eq!(payload.practice_area(), None);
        assert_eq!(payload.timestamp_iso8601(), "2024-01-10T12:00:00.000Z");
    }

    #[test]
    fn capture_rejects_invalid_outcome() {
        let mut values = valid_values();
        values.consent = false;
        values.email = "nope".to_string();
        let err =
            SubmissionPayload::capture(&validate_all(&values), &values, Utc::now()).unwrap_err();
        assert_eq!(err, CoreError::FormInvalid("email, consent".to_string()));
    }

    #[test]
    fn capture_rejects_values_that_no_longer_validate() {
        let values = valid_values();
        let outcome = validate_all(&values);
        let mut edited = values.clone();
        edited.name = "R2D2".to_string();
        edited.privacy = false;

        let err = SubmissionPayload::capture(&outcome, &edited, Utc::now()).unwrap_err();
        assert_eq!(err, CoreError::FormInvalid("name, privacy".to_string()));
    }

    #[test]
    fn payload_json_carries_iso_timestamp() {
        let values = valid_values();
        let payload =
            SubmissionPayload::capture(&validate_all(&values), &values, Utc::now()).unwrap();
        let outcome = SubmissionOutcome::Success { payload };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        let timestamp = json["payload"]["timestamp"].as_str().unwrap();
        assert!(parse_iso8601(timestamp).is_ok());
    }

    #[test]
    fn failure_keeps_form() {
        let outcome = SubmissionOutcome::Failure {
            reason: "transport unavailable".to_string(),
        };
        assert!(!outcome.clears_form());
        assert!(outcome.payload().is_none());
        assert!(outcome.banner().contains("transport unavailable"));
    }
}
