pub mod assists;
pub mod domain;
pub mod drafts;
pub mod error;
pub mod notices;
pub mod rules;
pub mod submission;
pub mod time;

pub use assists::{format_phone_input, message_hint, MessageHint};
pub use domain::*;
pub use drafts::{
    clear_drafts, draft_key, load_drafts, save_draft, save_practice_area_draft,
    KeyValueStore, MemoryStore,
};
pub use error::CoreError;
pub use notices::NoticeKind;
pub use rules::*;
pub use submission::{SubmissionOutcome, SubmissionPayload};
