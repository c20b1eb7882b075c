use std::collections::{BTreeMap, VecDeque};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use docket_core::{
    format_phone_input, message_hint, validate_all, validate_field, FieldId, FieldKind,
    FormValues, MessageHint, NoticeKind, SubmissionOutcome,
};

use crate::actions::Action;

/// Focusable positions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Field(FieldId),
    PracticeArea,
    Send,
    Reset,
}

pub const SLOTS: [Slot; 10] = [
    Slot::Field(FieldId::Name),
    Slot::Field(FieldId::Email),
    Slot::Field(FieldId::Phone),
    Slot::Field(FieldId::Subject),
    Slot::PracticeArea,
    Slot::Field(FieldId::Message),
    Slot::Field(FieldId::Consent),
    Slot::Field(FieldId::Privacy),
    Slot::Send,
    Slot::Reset,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Form,
    Disclaimer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub success: bool,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub autosave: bool,
    pub disclaimer: bool,
    pub cookies: bool,
}

#[derive(Debug, Clone)]
pub struct App {
    pub mode: Mode,
    pub should_quit: bool,
    pub values: FormValues,
    /// Text shown under each field: a validation message or the message counter.
    pub feedback: BTreeMap<FieldId, String>,
    pub(crate) focus: usize,
    pub sending: bool,
    pub banner: Option<Banner>,
    pub show_cookie_notice: bool,
    pub status: Option<String>,
    pub error: Option<String>,
    pub settings: Settings,
    actions: VecDeque<Action>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let mut app = Self {
            mode: Mode::Form,
            should_quit: false,
            values: FormValues::default(),
            feedback: BTreeMap::new(),
            focus: 0,
            sending: false,
            banner: None,
            show_cookie_notice: false,
            status: None,
            error: None,
            settings,
            actions: VecDeque::new(),
        };
        app.enqueue(Action::LoadSession);
        app
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn focused(&self) -> Slot {
        SLOTS[self.focus]
    }

    pub fn is_focused(&self, slot: Slot) -> bool {
        self.focused() == slot
    }

    pub fn apply_session(
        &mut self,
        drafts: Option<FormValues>,
        disclaimer_pending: bool,
        cookies_pending: bool,
    ) {
        if let Some(values) = drafts {
            if !values.is_blank() {
                self.set_status("Restored saved drafts");
            }
            self.values = values;
        }
        if disclaimer_pending {
            self.mode = Mode::Disclaimer;
        }
        self.show_cookie_notice = cookies_pending;
    }

    pub fn apply_submission(&mut self, outcome: SubmissionOutcome) {
        self.sending = false;
        self.banner = Some(Banner {
            success: outcome.is_success(),
            text: outcome.banner(),
        });
        if outcome.clears_form() {
            self.values.clear();
            self.feedback.clear();
            self.focus = 0;
            if self.settings.autosave {
                self.enqueue(Action::ClearDrafts);
            }
        }
    }

    pub fn submission_error(&mut self, message: impl Into<String>) {
        self.sending = false;
        self.set_error(message);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Disclaimer => self.handle_disclaimer_key(key),
            Mode::Form => self.handle_form_key(key),
        }
    }

    fn handle_disclaimer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                self.enqueue(Action::AcceptNotice(NoticeKind::Disclaimer));
                self.mode = Mode::Form;
            }
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('k') if ctrl => {
                if self.show_cookie_notice {
                    self.show_cookie_notice = false;
                    self.enqueue(Action::AcceptNotice(NoticeKind::Cookies));
                }
            }
            KeyCode::Char('s') if ctrl => self.request_submit(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => match self.focused() {
                Slot::Send => self.request_submit(),
                Slot::Reset => self.reset(),
                Slot::Field(field) if field.kind() == FieldKind::Checkbox => {
                    self.values.toggle(field)
                }
                _ => self.focus_next(),
            },
            KeyCode::Char(' ') if self.focused_checkbox().is_some() => {
                if let Some(field) = self.focused_checkbox() {
                    self.values.toggle(field);
                }
            }
            _ => self.edit_focused(key),
        }
    }

    pub fn focus_next(&mut self) {
        self.blur();
        self.focus = (self.focus + 1) % SLOTS.len();
    }

    pub fn focus_prev(&mut self) {
        self.blur();
        if self.focus == 0 {
            self.focus = SLOTS.len() - 1;
        } else {
            self.focus -= 1;
        }
    }

    fn focus_field(&mut self, field: FieldId) {
        if let Some(pos) = SLOTS.iter().position(|slot| *slot == Slot::Field(field)) {
            self.focus = pos;
        }
    }

    fn focused_checkbox(&self) -> Option<FieldId> {
        match self.focused() {
            Slot::Field(field) if field.kind() == FieldKind::Checkbox => Some(field),
            _ => None,
        }
    }

    /// Text fields are checked when focus leaves them; checkboxes wait for submit.
    fn blur(&mut self) {
        if let Slot::Field(field) = self.focused() {
            if field.kind() == FieldKind::Text {
                self.show_result(field);
            }
        }
    }

    fn show_result(&mut self, field: FieldId) {
        let result = validate_field(field, self.values.get(field));
        match result.message {
            Some(message) => {
                self.feedback.insert(field, message.to_string());
            }
            None => {
                self.feedback.remove(&field);
            }
        }
    }

    fn edit_focused(&mut self, key: KeyEvent) {
        let slot = self.focused();
        let updated = {
            let target = match slot {
                Slot::Field(field) => match self.values.text_mut(field) {
                    Some(target) => target,
                    None => return,
                },
                Slot::PracticeArea => &mut self.values.practice_area,
                Slot::Send | Slot::Reset => return,
            };
            let before = target.clone();
            apply_text_input(target, key);
            if slot == Slot::Field(FieldId::Phone) {
                *target = format_phone_input(target);
            }
            if *target == before {
                return;
            }
            target.clone()
        };

        if slot == Slot::Field(FieldId::Message) {
            match message_hint(&updated) {
                MessageHint::Unchanged => {}
                MessageHint::Satisfied => {
                    self.feedback.remove(&FieldId::Message);
                }
                hint @ MessageHint::Remaining(_) => {
                    if let Some(text) = hint.text() {
                        self.feedback.insert(FieldId::Message, text);
                    }
                }
            }
        }

        if self.settings.autosave {
            self.enqueue(Action::SaveDraft(slot, updated));
        }
    }

    pub fn request_submit(&mut self) {
        if self.sending {
            return;
        }
        self.clear_error();
        let outcome = validate_all(&self.values);
        if !outcome.all_valid() {
            self.feedback.clear();
            for result in outcome.per_field().values() {
                if let Some(message) = result.message {
                    self.feedback.insert(result.field, message.to_string());
                }
            }
            if let Some(field) = outcome.first_invalid() {
                self.focus_field(field);
            }
            self.banner = None;
            return;
        }

        self.feedback.clear();
        self.banner = None;
        self.sending = true;
        self.enqueue(Action::Submit(Box::new(outcome), self.values.clone()));
    }

    /// Clears values, field feedback and the banner. Saved drafts stay.
    pub fn reset(&mut self) {
        if self.sending {
            return;
        }
        self.values.clear();
        self.feedback.clear();
        self.banner = None;
        self.focus = 0;
    }
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Banner, Mode, Settings, Slot};
    use crate::actions::Action;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use docket_core::time::now_utc;
    use docket_core::{validate_all, FieldId, FormValues, SubmissionOutcome, SubmissionPayload};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn drain(app: &mut App) -> Vec<Action> {
        std::iter::from_fn(|| app.next_action()).collect()
    }

    fn ready_app(settings: Settings) -> App {
        let mut app = App::new(settings);
        drain(&mut app);
        app
    }

    fn filled() -> FormValues {
        FormValues {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            subject: "Contract review".to_string(),
            practice_area: String::new(),
            message: "Please review my lease agreement.".to_string(),
            consent: true,
            privacy: true,
        }
    }

    #[test]
    fn new_app_loads_session_first() {
        let mut app = App::new(Settings::default());
        assert!(matches!(app.next_action(), Some(Action::LoadSession)));
        assert!(app.next_action().is_none());
    }

    #[test]
    fn leaving_a_text_field_validates_it() {
        let mut app = ready_app(Settings::default());
        type_text(&mut app, "R2");
        assert!(app.feedback.is_empty());

        press(&mut app, KeyCode::Tab);
        assert_eq!(
            app.feedback.get(&FieldId::Name).map(String::as_str),
            Some("Name should only contain letters")
        );

        press(&mut app, KeyCode::BackTab);
        ctrl(&mut app, 'u');
        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Tab);
        assert!(!app.feedback.contains_key(&FieldId::Name));
    }

    #[test]
    fn phone_input_is_reformatted_while_typing() {
        let mut app = ready_app(Settings::default());
        app.focus = 2;
        type_text(&mut app, "919876543210");
        assert_eq!(app.values.phone, "+91 98765 43210");

        type_text(&mut app, "99");
        assert_eq!(app.values.phone, "+91 98765 43210");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.values.phone, "+91 98765 4321");
    }

    #[test]
    fn message_counter_tracks_typing() {
        let mut app = ready_app(Settings::default());
        app.focus = 5;
        assert_eq!(app.focused(), Slot::Field(FieldId::Message));

        type_text(&mut app, "Hi");
        assert_eq!(
            app.feedback.get(&FieldId::Message).map(String::as_str),
            Some("8 more characters required")
        );

        type_text(&mut app, " there, counsel");
        assert!(!app.feedback.contains_key(&FieldId::Message));

        ctrl(&mut app, 'u');
        assert_eq!(app.values.message, "");
        assert!(!app.feedback.contains_key(&FieldId::Message));
    }

    #[test]
    fn checkboxes_toggle_with_space_and_enter() {
        let mut app = ready_app(Settings::default());
        app.focus = 6;
        press(&mut app, KeyCode::Char(' '));
        assert!(app.values.consent);
        press(&mut app, KeyCode::Enter);
        assert!(!app.values.consent);
    }

    #[test]
    fn invalid_submit_shows_errors_and_focuses_first() {
        let mut app = ready_app(Settings::default());
        app.values.name = "Ada Lovelace".to_string();
        app.focus = 8;
        assert_eq!(app.focused(), Slot::Send);

        press(&mut app, KeyCode::Enter);
        assert!(!app.sending);
        assert_eq!(app.focused(), Slot::Field(FieldId::Email));
        assert_eq!(
            app.feedback.get(&FieldId::Email).map(String::as_str),
            Some("Email is required")
        );
        assert_eq!(
            app.feedback.get(&FieldId::Privacy).map(String::as_str),
            Some("You must agree to the privacy policy")
        );
        assert!(drain(&mut app).is_empty());
    }

    #[test]
    fn valid_submit_is_queued_once() {
        let mut app = ready_app(Settings::default());
        app.values = filled();
        ctrl(&mut app, 's');
        ctrl(&mut app, 's');
        assert!(app.sending);

        let actions = drain(&mut app);
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::Submit(outcome, values) => {
                assert!(outcome.all_valid());
                assert_eq!(values, &filled());
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn success_clears_form_and_shows_banner() {
        let mut app = ready_app(Settings {
            autosave: true,
            ..Settings::default()
        });
        app.values = filled();
        app.sending = true;

        let values = filled();
        let payload =
            SubmissionPayload::capture(&validate_all(&values), &values, now_utc()).unwrap();
        app.apply_submission(SubmissionOutcome::Success { payload });

        assert!(!app.sending);
        assert!(app.values.is_blank());
        assert!(matches!(app.banner, Some(Banner { success: true, .. })));
        assert!(matches!(drain(&mut app).as_slice(), [Action::ClearDrafts]));
    }

    #[test]
    fn failure_keeps_values() {
        let mut app = ready_app(Settings::default());
        app.values = filled();
        app.sending = true;
        app.apply_submission(SubmissionOutcome::Failure {
            reason: "gateway timeout".to_string(),
        });
        assert_eq!(app.values, filled());
        assert!(matches!(app.banner, Some(Banner { success: false, .. })));
    }

    #[test]
    fn reset_clears_values_feedback_and_banner() {
        let mut app = ready_app(Settings::default());
        app.values = filled();
        app.feedback
            .insert(FieldId::Name, "Name is required".to_string());
        app.banner = Some(Banner {
            success: true,
            text: "done".to_string(),
        });
        app.focus = 9;
        press(&mut app, KeyCode::Enter);

        assert!(app.values.is_blank());
        assert!(app.feedback.is_empty());
        assert!(app.banner.is_none());
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn autosave_queues_draft_writes() {
        let mut app = ready_app(Settings {
            autosave: true,
            ..Settings::default()
        });
        app.focus = 4;
        type_text(&mut app, "Tax");
        let actions = drain(&mut app);
        assert_eq!(actions.len(), 3);
        assert!(matches!(
            actions.last(),
            Some(Action::SaveDraft(Slot::PracticeArea, value)) if value == "Tax"
        ));

        app.focus = 6;
        press(&mut app, KeyCode::Char(' '));
        assert!(drain(&mut app).is_empty());
    }

    #[test]
    fn disclaimer_blocks_form_until_accepted() {
        let mut app = ready_app(Settings::default());
        app.apply_session(None, true, true);
        assert_eq!(app.mode, Mode::Disclaimer);

        type_text(&mut app, "x");
        assert!(app.values.is_blank());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Form);
        assert!(matches!(
            drain(&mut app).as_slice(),
            [Action::AcceptNotice(docket_core::NoticeKind::Disclaimer)]
        ));

        ctrl(&mut app, 'k');
        assert!(!app.show_cookie_notice);
        assert!(matches!(
            drain(&mut app).as_slice(),
            [Action::AcceptNotice(docket_core::NoticeKind::Cookies)]
        ));
    }
}
