use std::future::Future;
use std::time::Duration;

use docket_core::time::parse_iso8601;
use docket_core::{validate_all, CoreError, FormValues, SubmissionOutcome, SubmissionPayload};
use docket_submit::{Dispatcher, SimulatedSubmitter, SubmitError, Submitter};
use tokio::time::Instant;

const DELAY: Duration = Duration::from_millis(1500);

fn valid_values() -> FormValues {
    FormValues {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "123-456-7890".to_string(),
        subject: "Contract review".to_string(),
        practice_area: "Corporate".to_string(),
        message: "Could you review a supplier agreement?".to_string(),
        consent: true,
        privacy: true,
    }
}

#[tokio::test(start_paused = true)]
async fn submit_resolves_success_after_delay() {
    let dispatcher = Dispatcher::new(SimulatedSubmitter::new(DELAY));
    let values = valid_values();
    let outcome = validate_all(&values);

    let started = Instant::now();
    let result = dispatcher.submit(&outcome, &values).await.expect("submit");
    assert!(started.elapsed() >= DELAY);

    let payload = result.payload().expect("success payload");
    assert_eq!(payload.name(), values.name);
    assert_eq!(payload.email(), values.email);
    assert_eq!(payload.phone(), Some(values.phone.as_str()));
    assert_eq!(payload.subject(), values.subject);
    assert_eq!(payload.practice_area(), Some("Corporate"));
    assert_eq!(payload.message(), values.message);
    assert!(parse_iso8601(&payload.timestamp_iso8601()).is_ok());
    assert!(result.clears_form());
    assert!(!dispatcher.is_in_flight());
}

#[tokio::test(start_paused = true)]
async fn submit_rejects_invalid_outcome() {
    let dispatcher = Dispatcher::new(SimulatedSubmitter::new(DELAY));
    let mut values = valid_values();
    values.message = "Hello".to_string();
    let outcome = validate_all(&values);

    let err = dispatcher
        .submit(&outcome, &values)
        .await
        .expect_err("invalid form");
    assert!(matches!(
        err,
        SubmitError::Core(CoreError::FormInvalid(ref fields)) if fields == "message"
    ));
    assert!(!dispatcher.is_in_flight());
}

#[tokio::test(start_paused = true)]
async fn submit_rejects_valid_outcome_paired_with_failing_values() {
    let dispatcher = Dispatcher::new(SimulatedSubmitter::new(DELAY));
    let outcome = validate_all(&valid_values());

    let err = dispatcher
        .submit(&outcome, &FormValues::default())
        .await
        .expect_err("values fail validation");
    assert!(matches!(
        err,
        SubmitError::Core(CoreError::FormInvalid(ref fields))
            if fields == "name, email, subject, message, consent, privacy"
    ));
    assert!(!dispatcher.is_in_flight());
}

#[tokio::test(start_paused = true)]
async fn second_submit_while_pending_is_rejected() {
    let dispatcher = Dispatcher::new(SimulatedSubmitter::new(DELAY));
    let values = valid_values();
    let outcome = validate_all(&values);

    let (first, second) = tokio::join!(dispatcher.submit(&outcome, &values), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(dispatcher.is_in_flight());
        dispatcher.submit(&outcome, &values).await
    });

    assert!(first.expect("first submit").is_success());
    assert!(matches!(second, Err(SubmitError::InFlight)));

    let third = dispatcher.submit(&outcome, &values).await;
    assert!(third.expect("after settle").is_success());
}

#[tokio::test(start_paused = true)]
async fn dropping_pending_submission_releases_guard() {
    let dispatcher = Dispatcher::new(SimulatedSubmitter::new(DELAY));
    let values = valid_values();
    let outcome = validate_all(&values);

    let timed_out = tokio::time::timeout(
        Duration::from_millis(100),
        dispatcher.submit(&outcome, &values),
    )
    .await;
    assert!(timed_out.is_err());
    assert!(!dispatcher.is_in_flight());
}

struct RejectingSubmitter;

impl Submitter for RejectingSubmitter {
    fn send(&self, _payload: SubmissionPayload) -> impl Future<Output = SubmissionOutcome> + Send {
        async {
            SubmissionOutcome::Failure {
                reason: "503 from intake endpoint".to_string(),
            }
        }
    }
}

#[tokio::test]
async fn failure_from_transport_is_passed_through() {
    let dispatcher = Dispatcher::new(RejectingSubmitter);
    let values = valid_values();
    let outcome = validate_all(&values);

    let result = dispatcher.submit(&outcome, &values).await.expect("submit");
    assert!(!result.is_success());
    assert!(!result.clears_form());
    assert!(!dispatcher.is_in_flight());
}
