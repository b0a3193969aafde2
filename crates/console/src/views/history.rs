use crate::app::{App, Focus};
use crate::theme::{self, Theme};
use botdesk_core::search;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
    render_search_bar(frame, app, search_area);
    render_records(frame, app, list_area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = if app.focus == Focus::Search {
        Theme::block_accent()
    } else {
        Theme::block_dim()
    }
    .title(" Search ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if app.query_input.is_empty() {
        Line::styled("type to filter messages", Style::new().fg(Theme::TEXT_MUTED))
    } else {
        let mut spans = vec![Span::styled(
            app.query_input.clone(),
            Style::new().fg(Theme::TEXT_PRIMARY),
        )];
        if app.debouncer.is_pending() {
            spans.push(Span::styled("  …", Style::new().fg(Theme::TEXT_MUTED)));
        } else if app.search_active() {
            spans.push(Span::styled(
                format!("  {} match(es)", app.visible_history().len()),
                Style::new().fg(Theme::TEXT_SECONDARY),
            ));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_records(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = match &app.selected_contact {
        Some(c) => format!(" History: {c} "),
        None => " History ".to_string(),
    };
    let block = Theme::block().title(title).padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(contact) = app.selected_contact.clone() else {
        frame.render_widget(
            Paragraph::new("Select a contact to view history")
                .style(Style::new().fg(Theme::TEXT_MUTED)),
            inner,
        );
        return;
    };

    if app.stores.history.is_loading(&contact) && app.selected_history().is_empty() {
        frame.render_widget(
            Paragraph::new("Loading history...").style(Style::new().fg(Theme::TEXT_MUTED)),
            inner,
        );
        return;
    }

    if let Some(err) = app.stores.history.error(&contact) {
        if app.selected_history().is_empty() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::styled("Failed to load history", Style::new().fg(Theme::ACCENT_RED)),
                    Line::styled(err.to_string(), Style::new().fg(Theme::TEXT_MUTED)),
                ])
                .wrap(ratatui::widgets::Wrap { trim: true }),
                inner,
            );
            return;
        }
    }

    let visible = app.visible_history();
    if visible.is_empty() {
        let msg = if app.search_active() {
            "No messages match"
        } else {
            "No messages yet"
        };
        frame.render_widget(
            Paragraph::new(msg).style(Style::new().fg(Theme::TEXT_MUTED)),
            inner,
        );
        return;
    }

    let query = app.committed_query.clone();
    let stale = app.stores.history.error(&contact).is_some();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|record| {
            let mut line = vec![
                Span::styled(
                    record.sender.clone(),
                    Style::new().fg(theme::sender_color(&record.sender)).bold(),
                ),
                Span::styled(
                    format!("  {}", record.time),
                    Style::new().fg(Theme::TEXT_MUTED),
                ),
            ];
            if record.local_resource_path.is_some() {
                line.push(Span::styled(
                    format!("  [{}]", record.content_type.label()),
                    Style::new().fg(Theme::ACCENT_YELLOW),
                ));
            }
            let body = if app.search_active() {
                highlighted_line(&record.text_body, &query)
            } else {
                Line::styled(
                    record.text_body.clone(),
                    Style::new().fg(Theme::TEXT_CONTENT),
                )
            };
            let mut lines = vec![Line::from(line), body];
            if let Some(extracted) = &record.extracted_content {
                if app.search_active() && !query.is_empty() {
                    lines.push(highlighted_line(extracted, &query));
                } else {
                    lines.push(Line::styled(
                        extracted.clone(),
                        Style::new().fg(Theme::TEXT_SECONDARY),
                    ));
                }
            }
            ListItem::new(lines)
        })
        .collect();

    let mut list = List::new(items);
    if stale {
        // Stale-but-shown: the last good value stays up, dimmed.
        list = list.style(Style::new().fg(Theme::TEXT_MUTED));
    }
    frame.render_stateful_widget(list, inner, &mut app.history_state);
}

/// Render a message body with the committed query's matches emphasized.
fn highlighted_line(text: &str, query: &str) -> Line<'static> {
    let spans = search::highlight(text, query)
        .into_iter()
        .map(|span| {
            if span.is_match {
                Span::styled(
                    span.text,
                    Style::new().fg(Theme::MATCH_HIGHLIGHT).bold(),
                )
            } else {
                Span::styled(span.text, Style::new().fg(Theme::TEXT_CONTENT))
            }
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}
