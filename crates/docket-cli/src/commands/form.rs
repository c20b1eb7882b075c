use std::time::Duration;

use crate::commands::{print_json, Context};
use crate::error::{invalid_form, submission_failed};
use anyhow::{Context as _, Result};
use clap::Args;
use docket_config::validate_submit_delay;
use docket_core::drafts;
use docket_core::notices::{self, NoticeKind};
use docket_core::{validate_all, FieldId, FormValidationOutcome, FormValues, SubmissionOutcome};
use docket_store::error::StoreError;
use docket_submit::{build_runtime, Dispatcher, SimulatedSubmitter};
use tracing::debug;

#[derive(Debug, Args)]
pub struct FormArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long)]
    pub practice_area: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    /// Acknowledge the disclaimer
    #[arg(long)]
    pub consent: bool,
    /// Agree to the privacy policy
    #[arg(long)]
    pub privacy: bool,
    /// Start from saved drafts; flags override draft values
    #[arg(long)]
    pub from_drafts: bool,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub form: FormArgs,
    /// Override the configured simulated latency
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub fn validate(ctx: &Context<'_>, args: FormArgs) -> Result<()> {
    let values = collect_values(ctx, args)?;
    let outcome = validate_all(&values);
    render_outcome(ctx, &outcome)?;
    ensure_valid(&outcome)
}

pub fn submit(ctx: &Context<'_>, args: SubmitArgs) -> Result<()> {
    let delay_ms = match args.delay_ms {
        Some(value) => validate_submit_delay(value)?,
        None => ctx.config.submission.delay_ms,
    };
    let values = collect_values(ctx, args.form)?;
    let outcome = validate_all(&values);
    if !outcome.all_valid() {
        render_outcome(ctx, &outcome)?;
        return ensure_valid(&outcome);
    }

    let storage = ctx.store.local_storage();
    if !ctx.json
        && ctx.config.notices.disclaimer
        && !notices::is_accepted(&storage, NoticeKind::Disclaimer)?
    {
        eprintln!("{}", NoticeKind::Disclaimer.text());
    }

    let dispatcher = Dispatcher::new(SimulatedSubmitter::new(Duration::from_millis(delay_ms)));
    let runtime = build_runtime()?;
    if !ctx.json {
        println!("Sending...");
    }
    let result = runtime
        .block_on(dispatcher.submit(&outcome, &values))
        .with_context(|| "submit form")?;

    if result.clears_form() {
        drafts::clear_drafts(&storage).with_context(|| "clear saved drafts")?;
        debug!("drafts cleared after submission");
    }

    if ctx.json {
        print_json(&result)?;
    } else {
        println!("{}", result.banner());
    }

    match result {
        SubmissionOutcome::Success { .. } => Ok(()),
        SubmissionOutcome::Failure { reason } => Err(submission_failed(reason)),
    }
}

fn collect_values(ctx: &Context<'_>, args: FormArgs) -> Result<FormValues> {
    let mut values = if args.from_drafts {
        drafts::load_drafts(&ctx.store.local_storage()).with_context(|| "load drafts")?
    } else {
        FormValues::default()
    };

    let texts = [
        (FieldId::Name, args.name),
        (FieldId::Email, args.email),
        (FieldId::Phone, args.phone),
        (FieldId::Subject, args.subject),
        (FieldId::Message, args.message),
    ];
    let mut supplied = Vec::new();
    for (field, value) in texts {
        if let Some(value) = value {
            values.set_text(field, value)?;
            supplied.push(field);
        }
    }
    let practice_area_supplied = args.practice_area.is_some();
    if let Some(practice_area) = args.practice_area {
        values.practice_area = practice_area;
    }
    values.consent = args.consent;
    values.privacy = args.privacy;

    if ctx.config.drafts.autosave {
        autosave(ctx, &values, &supplied, practice_area_supplied)
            .with_context(|| "save drafts")?;
    }
    Ok(values)
}

/// Only slots given on the command line are written; other drafts stay.
fn autosave(
    ctx: &Context<'_>,
    values: &FormValues,
    supplied: &[FieldId],
    practice_area: bool,
) -> std::result::Result<(), StoreError> {
    let storage = ctx.store.local_storage();
    for &field in supplied {
        if let Some(value) = values.text(field) {
            drafts::save_draft(&storage, field, value)?;
        }
    }
    if practice_area {
        drafts::save_practice_area_draft(&storage, &values.practice_area)?;
    }
    Ok(())
}

fn render_outcome(ctx: &Context<'_>, outcome: &FormValidationOutcome) -> Result<()> {
    if ctx.json {
        return print_json(outcome);
    }

    for result in outcome.per_field().values() {
        match (result.message, result.condition) {
            (Some(message), Some(condition)) => println!(
                "{:<8} {} [{}]",
                result.field.as_str(),
                message,
                condition.as_str()
            ),
            (Some(message), None) => println!("{:<8} {}", result.field.as_str(), message),
            (None, _) => println!("{:<8} ok", result.field.as_str()),
        }
    }
    Ok(())
}

fn ensure_valid(outcome: &FormValidationOutcome) -> Result<()> {
    if outcome.all_valid() {
        Ok(())
    } else {
        Err(invalid_form(outcome.invalid_fields().len()))
    }
}
