use crate::app::{App, Focus};
use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = if app.focus == Focus::Actions {
        Theme::block_accent()
    } else {
        Theme::block()
    }
    .title(" Actions ")
    .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let desc_style = Style::new().fg(Theme::TEXT_KEY_DESC);

    let mut lines = Vec::new();

    match &app.selected_contact {
        None => {
            lines.push(Line::styled(
                "Select a contact first",
                Style::new().fg(Theme::TEXT_MUTED),
            ));
        }
        Some(contact) => {
            let reply_line = match app.stores.reply.value(contact) {
                Some(true) => Line::from(vec![
                    Span::styled("Auto-reply: ", Style::new().fg(Theme::TEXT_SECONDARY)),
                    Span::styled("on", Style::new().fg(Theme::TOGGLE_ON).bold()),
                ]),
                Some(false) => Line::from(vec![
                    Span::styled("Auto-reply: ", Style::new().fg(Theme::TEXT_SECONDARY)),
                    Span::styled("off", Style::new().fg(Theme::TOGGLE_OFF).bold()),
                ]),
                None if app.stores.reply.is_loading(contact) => Line::styled(
                    "Auto-reply: loading...",
                    Style::new().fg(Theme::TEXT_MUTED),
                ),
                None => Line::styled("Auto-reply: unknown", Style::new().fg(Theme::TEXT_MUTED)),
            };
            lines.push(reply_line);

            if app.editing_test_message {
                lines.push(Line::from(vec![
                    Span::styled("Test message: ", Style::new().fg(Theme::TEXT_SECONDARY)),
                    Span::styled(
                        format!("{}_", app.test_message),
                        Style::new().fg(Theme::TEXT_PRIMARY),
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Enter ", key_style),
                    Span::styled("send  ", desc_style),
                    Span::styled("Esc ", key_style),
                    Span::styled("cancel", desc_style),
                ]));
            } else if app.mutation_pending {
                lines.push(Line::styled(
                    "Working...",
                    Style::new().fg(Theme::ACCENT_YELLOW),
                ));
            } else {
                lines.push(Line::from(vec![
                    Span::styled("s ", key_style),
                    Span::styled("summarize  ", desc_style),
                    Span::styled("n ", key_style),
                    Span::styled("notifications  ", desc_style),
                    Span::styled("a ", key_style),
                    Span::styled("toggle auto-reply  ", desc_style),
                    Span::styled("d ", key_style),
                    Span::styled("docs  ", desc_style),
                    Span::styled("i ", key_style),
                    Span::styled("images  ", desc_style),
                    Span::styled("t ", key_style),
                    Span::styled("test message", desc_style),
                ]));
            }
        }
    }

    lines.push(Line::raw(""));
    lines.push(render_vector_dbs(app));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_vector_dbs(app: &App) -> Line<'static> {
    let Some(resp) = app.stores.vector_dbs.value(&()) else {
        return if app.stores.vector_dbs.is_loading(&()) {
            Line::styled("Vector stores: loading...", Style::new().fg(Theme::TEXT_MUTED))
        } else {
            Line::styled("Vector stores: unavailable", Style::new().fg(Theme::TEXT_MUTED))
        };
    };

    let mut spans = vec![Span::styled(
        "Vector store: ",
        Style::new().fg(Theme::TEXT_SECONDARY),
    )];
    if resp.databases.is_empty() {
        spans.push(Span::styled("none", Style::new().fg(Theme::TEXT_MUTED)));
        return Line::from(spans);
    }
    for (i, db) in resp.databases.iter().enumerate() {
        let active = resp.current_db.as_deref() == Some(db.as_str());
        let cursor = app.focus == Focus::Actions && i == app.vector_db_cursor;
        let style = match (active, cursor) {
            (true, _) => Style::new().fg(Theme::ACCENT_GREEN).bold(),
            (false, true) => Style::new().fg(Theme::ACCENT_BLUE),
            (false, false) => Style::new().fg(Theme::TEXT_MUTED),
        };
        let marker = if cursor { ">" } else { " " };
        spans.push(Span::styled(format!("{marker}{db} "), style));
    }
    Line::from(spans)
}
