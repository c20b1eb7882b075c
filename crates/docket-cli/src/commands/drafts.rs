use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{format_timestamp_datetime, parse_draft_slot, DraftSlot};
use anyhow::Result;
use clap::{Args, Subcommand};
use docket_core::drafts::{self, PRACTICE_AREA_DRAFT_KEY};
use docket_core::{format_phone_input, message_hint, FieldId, FieldKind};
use serde::Serialize;

const DRAFT_PREFIX: &str = "form_";

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Save a draft value, as if typed into the field
    Set(DraftSetArgs),
    Show(DraftShowArgs),
    Clear(DraftClearArgs),
}

#[derive(Debug, Args)]
pub struct DraftSetArgs {
    /// name, email, phone, subject, message or practice-area
    pub field: String,
    pub value: String,
}

#[derive(Debug, Args)]
pub struct DraftShowArgs {}

#[derive(Debug, Args)]
pub struct DraftClearArgs {}

#[derive(Debug, Serialize)]
struct DraftDto {
    field: String,
    value: String,
    updated_at: i64,
}

#[derive(Debug, Serialize)]
struct DraftSavedDto {
    field: String,
    value: String,
    hint: Option<String>,
}

pub fn set_draft(ctx: &Context<'_>, args: DraftSetArgs) -> Result<()> {
    let storage = ctx.store.local_storage();
    let slot = parse_draft_slot(&args.field)?;
    let (field_name, value, hint) = match slot {
        DraftSlot::PracticeArea => {
            drafts::save_practice_area_draft(&storage, &args.value)?;
            ("practice-area".to_string(), args.value, None)
        }
        DraftSlot::Field(field) if field.kind() == FieldKind::Checkbox => {
            return Err(invalid_input(format!(
                "{} is a checkbox; checkbox fields are not saved",
                field
            )));
        }
        DraftSlot::Field(field) => {
            let value = if field == FieldId::Phone {
                format_phone_input(&args.value)
            } else {
                args.value
            };
            drafts::save_draft(&storage, field, &value)?;
            let hint = if field == FieldId::Message {
                message_hint(&value).text()
            } else {
                None
            };
            (field.as_str().to_string(), value, hint)
        }
    };

    if ctx.json {
        print_json(&DraftSavedDto {
            field: field_name,
            value,
            hint,
        })?;
    } else {
        println!("saved {}: {}", field_name, value);
        if let Some(hint) = hint {
            println!("{}", hint);
        }
    }
    Ok(())
}

pub fn show_drafts(ctx: &Context<'_>, _args: DraftShowArgs) -> Result<()> {
    let entries = ctx.store.local_storage().list_prefix(DRAFT_PREFIX)?;
    let items: Vec<DraftDto> = entries
        .into_iter()
        .map(|entry| DraftDto {
            field: if entry.key == PRACTICE_AREA_DRAFT_KEY {
                "practice-area".to_string()
            } else {
                entry.key.trim_start_matches(DRAFT_PREFIX).to_string()
            },
            value: entry.value,
            updated_at: entry.updated_at,
        })
        .collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no drafts saved");
        return Ok(());
    }
    for item in items {
        println!(
            "{:<14} {}  ({})",
            item.field,
            item.value,
            format_timestamp_datetime(item.updated_at)
        );
    }
    Ok(())
}

pub fn clear_drafts(ctx: &Context<'_>, _args: DraftClearArgs) -> Result<()> {
    drafts::clear_drafts(&ctx.store.local_storage())?;
    if ctx.json {
        print_json(&serde_json::json!({ "cleared": true }))?;
    } else {
        println!("drafts cleared");
    }
    Ok(())
}
