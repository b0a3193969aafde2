use crate::app::{App, Focus};
use crate::theme::Theme;
use botdesk_core::types::ContactKind;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let filter_label = match app.type_filter.as_deref() {
        None => "all",
        Some("group") => "groups",
        Some("private") => "private",
        Some(other) => other,
    };
    let block = if app.focus == Focus::Contacts {
        Theme::block_accent()
    } else {
        Theme::block()
    }
    .title(format!(" Contacts ({filter_label}) "))
    .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.stores.contacts.is_loading(&app.type_filter) && app.contacts().is_empty() {
        frame.render_widget(
            Paragraph::new("Loading contacts...").style(Style::new().fg(Theme::TEXT_MUTED)),
            inner,
        );
        return;
    }

    if let Some(err) = app.stores.contacts.error(&app.type_filter) {
        if app.contacts().is_empty() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::styled("Failed to load contacts", Style::new().fg(Theme::ACCENT_RED)),
                    Line::styled(err.to_string(), Style::new().fg(Theme::TEXT_MUTED)),
                    Line::raw(""),
                    Line::styled("r to retry", Style::new().fg(Theme::TEXT_KEY_DESC)),
                ])
                .wrap(ratatui::widgets::Wrap { trim: true }),
                inner,
            );
            return;
        }
    }

    if app.contacts().is_empty() {
        frame.render_widget(
            Paragraph::new("No contacts").style(Style::new().fg(Theme::TEXT_MUTED)),
            inner,
        );
        return;
    }

    let selected_identity = app.selected_contact.clone();
    let items: Vec<ListItem> = app
        .contacts()
        .iter()
        .map(|contact| {
            let (badge, badge_color) = match contact.kind {
                Some(ContactKind::Group) => ("[G]", Theme::BADGE_GROUP),
                Some(ContactKind::Private) => ("[P]", Theme::BADGE_PRIVATE),
                _ => ("[?]", Theme::TEXT_MUTED),
            };
            let active = selected_identity.as_deref() == Some(contact.identity.as_str());
            let name_style = if active {
                Style::new().fg(Theme::ACCENT_BLUE).bold()
            } else {
                Style::new().fg(Theme::TEXT_PRIMARY)
            };
            ListItem::new(Line::from(vec![
                Span::styled(badge, Style::new().fg(badge_color)),
                Span::raw(" "),
                Span::styled(contact.label(), name_style),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::new()
            .bg(Theme::BORDER_NORMAL)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, inner, &mut app.contacts_state);
}
