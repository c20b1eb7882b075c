use crate::commands::print_json;
use anyhow::Result;
use clap::Args;
use docket_core::{format_phone_input, message_hint, MessageHint, MESSAGE_MIN_LEN};

#[derive(Debug, Args)]
pub struct FormatPhoneArgs {
    pub input: String,
}

#[derive(Debug, Args)]
pub struct CounterArgs {
    pub message: String,
}

pub fn format_phone(json: bool, args: FormatPhoneArgs) -> Result<()> {
    let formatted = format_phone_input(&args.input);
    if json {
        print_json(&serde_json::json!({ "input": args.input, "formatted": formatted }))?;
    } else {
        println!("{}", formatted);
    }
    Ok(())
}

pub fn counter(json: bool, args: CounterArgs) -> Result<()> {
    let hint = message_hint(&args.message);
    let remaining = match hint {
        MessageHint::Remaining(count) => count,
        MessageHint::Satisfied => 0,
        MessageHint::Unchanged => MESSAGE_MIN_LEN,
    };
    if json {
        print_json(&serde_json::json!({
            "remaining": remaining,
            "minimum": MESSAGE_MIN_LEN,
            "hint": hint.text(),
        }))?;
    } else {
        match hint.text() {
            Some(text) => println!("{}", text),
            None if remaining == 0 => println!("ok"),
            None => println!("{} characters required", MESSAGE_MIN_LEN),
        }
    }
    Ok(())
}
