use crate::app::{App, Focus};
use crate::theme::Theme;
use crate::views::{actions, contacts, history, modal, toast};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let [body_area, footer_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

    let [contacts_area, right_area] =
        Layout::horizontal([Constraint::Length(32), Constraint::Fill(1)]).areas(body_area);

    let [history_area, actions_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(7)]).areas(right_area);

    contacts::render(frame, app, contacts_area);
    history::render(frame, app, history_area);
    actions::render(frame, app, actions_area);
    render_footer(frame, app, footer_area);

    if let Some(ref m) = app.modal {
        modal::render(frame, m);
    }

    if let Some(t) = app.toasts.current() {
        toast::render(frame, t);
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let desc_style = Style::new().fg(Theme::TEXT_KEY_DESC);

    let spans = match app.focus {
        Focus::Contacts => vec![
            Span::styled(" ↑/↓ ", key_style),
            Span::styled("move  ", desc_style),
            Span::styled("Enter ", key_style),
            Span::styled("open  ", desc_style),
            Span::styled("f ", key_style),
            Span::styled("filter  ", desc_style),
            Span::styled("r ", key_style),
            Span::styled("refresh  ", desc_style),
            Span::styled("Tab ", key_style),
            Span::styled("focus  ", desc_style),
            Span::styled("q ", key_style),
            Span::styled("quit", desc_style),
        ],
        Focus::Search => vec![
            Span::styled(" type ", key_style),
            Span::styled("to search  ", desc_style),
            Span::styled("Esc ", key_style),
            Span::styled("clear  ", desc_style),
            Span::styled("Tab ", key_style),
            Span::styled("focus", desc_style),
        ],
        Focus::Actions => vec![
            Span::styled(" s/n/a/t ", key_style),
            Span::styled("actions  ", desc_style),
            Span::styled("↑/↓/Enter ", key_style),
            Span::styled("vector store  ", desc_style),
            Span::styled("Tab ", key_style),
            Span::styled("focus  ", desc_style),
            Span::styled("q ", key_style),
            Span::styled("quit", desc_style),
        ],
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
