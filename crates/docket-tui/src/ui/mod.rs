use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use docket_core::{FieldId, FieldValue, NoticeKind};

use crate::app::{App, Mode, Slot, SLOTS};

const FORM_HINT: &str =
    "tab/shift+tab move  space toggle  enter select  ctrl+s send  ctrl+r reset  esc quit";
const DISCLAIMER_HINT: &str = "enter accept  esc quit";

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let footer_height = if app.show_cookie_notice { 5 } else { 4 };
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(8),
        Constraint::Length(footer_height),
    ])
    .areas(frame.area());

    render_header(frame, header, app);
    render_form(frame, body, app);
    render_footer(frame, footer, app);

    if app.mode == Mode::Disclaimer {
        render_disclaimer(frame);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let status_line = match &app.banner {
        Some(banner) if banner.success => Line::from(banner.text.clone().green().bold()),
        Some(banner) => Line::from(banner.text.clone().red().bold()),
        None => Line::from("Fields marked * are required.".dark_gray()),
    };
    let paragraph = Paragraph::new(vec![Line::from("docket  contact us"), status_line])
        .block(Block::bordered().title("docket"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for slot in SLOTS {
        let focused = app.is_focused(slot);
        match slot {
            Slot::Field(field) => {
                lines.push(input_line(app, field, focused));
                if let Some(feedback) = app.feedback.get(&field) {
                    lines.push(Line::from(format!("  {feedback}").red()));
                }
            }
            Slot::PracticeArea => {
                lines.push(text_line("Practice area", &app.values.practice_area, focused))
            }
            Slot::Send | Slot::Reset => {}
        }
    }
    lines.push(Line::default());
    lines.push(buttons(app));

    let paragraph = Paragraph::new(lines).block(Block::bordered().title("Contact Form"));
    frame.render_widget(paragraph, area);
}

fn input_line(app: &App, field: FieldId, focused: bool) -> Line<'static> {
    match app.values.get(field) {
        FieldValue::Text(value) if field == FieldId::Phone => {
            text_line(field.label(), value, focused)
        }
        FieldValue::Text(value) => text_line(&format!("{} *", field.label()), value, focused),
        FieldValue::Checked(checked) => {
            let marker = if checked { "[x]" } else { "[ ]" };
            Line::from(format!("{marker} {} *", field.label())).style(focus_style(focused))
        }
    }
}

fn text_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    Line::from(vec![
        format!("{label}: ").bold(),
        Span::styled(value.to_string(), focus_style(focused)),
    ])
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::new().fg(Color::Yellow)
    } else {
        Style::new()
    }
}

/// Send is greyed out and relabelled while a submission is pending.
fn buttons(app: &App) -> Line<'static> {
    let send = if app.sending {
        "[Sending...]".dark_gray()
    } else if app.is_focused(Slot::Send) {
        "[Send Message]".black().on_light_green()
    } else {
        "[Send Message]".green()
    };
    let reset = if app.is_focused(Slot::Reset) {
        "[Reset]".black().on_light_red()
    } else {
        "[Reset]".red()
    };
    Line::from(vec![send, Span::raw("  "), reset])
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::Disclaimer => DISCLAIMER_HINT,
        Mode::Form => FORM_HINT,
    };
    let mut lines = vec![Line::from(hint.dark_gray())];

    if app.show_cookie_notice {
        lines.push(Line::from(vec![
            NoticeKind::Cookies.text().yellow(),
            "  ctrl+k accept".dark_gray(),
        ]));
    }
    if let Some(status) = &app.status {
        lines.push(Line::from(status.clone().green()));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(err.clone().red()));
    }

    frame.render_widget(Paragraph::new(lines).block(Block::bordered()), area);
}

fn render_disclaimer(frame: &mut Frame<'_>) {
    let area = popup_area(frame.area(), 60, 40);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(NoticeKind::Disclaimer.text()),
        Line::default(),
        Line::from("[I Understand]".black().on_light_green()),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::bordered().title("Disclaimer"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
