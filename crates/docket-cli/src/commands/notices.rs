use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use docket_core::notices::{self, NoticeKind};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum NoticeCommand {
    Status(NoticeStatusArgs),
    Accept(NoticeAcceptArgs),
}

#[derive(Debug, Args)]
pub struct NoticeStatusArgs {}

#[derive(Debug, Args)]
pub struct NoticeAcceptArgs {
    #[arg(value_enum)]
    pub kind: NoticeArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum NoticeArg {
    Disclaimer,
    Cookies,
}

impl From<NoticeArg> for NoticeKind {
    fn from(arg: NoticeArg) -> Self {
        match arg {
            NoticeArg::Disclaimer => NoticeKind::Disclaimer,
            NoticeArg::Cookies => NoticeKind::Cookies,
        }
    }
}

#[derive(Debug, Serialize)]
struct NoticeStatusDto {
    notice: NoticeKind,
    enabled: bool,
    accepted: bool,
}

pub fn status(ctx: &Context<'_>, _args: NoticeStatusArgs) -> Result<()> {
    let storage = ctx.store.local_storage();
    let mut items = Vec::new();
    for kind in NoticeKind::ALL {
        let enabled = match kind {
            NoticeKind::Disclaimer => ctx.config.notices.disclaimer,
            NoticeKind::Cookies => ctx.config.notices.cookies,
        };
        items.push(NoticeStatusDto {
            notice: kind,
            enabled,
            accepted: notices::is_accepted(&storage, kind)?,
        });
    }

    if ctx.json {
        return print_json(&items);
    }
    for item in items {
        let state = match (item.enabled, item.accepted) {
            (false, _) => "disabled",
            (true, true) => "accepted",
            (true, false) => "pending",
        };
        println!("{:<10} {}", item.notice.as_str(), state);
    }
    Ok(())
}

pub fn accept(ctx: &Context<'_>, args: NoticeAcceptArgs) -> Result<()> {
    let kind = NoticeKind::from(args.kind);
    notices::accept(&ctx.store.local_storage(), kind)?;
    if ctx.json {
        print_json(&serde_json::json!({ "notice": kind, "accepted": true }))?;
    } else {
        println!("{} accepted", kind.as_str());
    }
    Ok(())
}
