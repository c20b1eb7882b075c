use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use docket_core::FieldId;
use std::str::FromStr;

use crate::error::invalid_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSlot {
    Field(FieldId),
    PracticeArea,
}

pub fn parse_draft_slot(raw: &str) -> Result<DraftSlot> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("field cannot be empty"));
    }
    let lower = trimmed.to_ascii_lowercase();
    if matches!(lower.as_str(), "practice-area" | "practice_area") {
        return Ok(DraftSlot::PracticeArea);
    }
    FieldId::from_str(&lower)
        .map(DraftSlot::Field)
        .map_err(|err| invalid_input(err.to_string()))
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}
