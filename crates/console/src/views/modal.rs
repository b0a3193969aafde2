use crate::app::Modal;
use crate::dispatch::FileKind;
use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};

/// Render the current modal overlay on top of everything.
pub fn render(frame: &mut Frame, modal: &Modal) {
    let area = frame.area();
    let popup_width = 70u16.min(area.width.saturating_sub(4));
    let popup_height = 20u16.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let (title, lines) = match modal {
        Modal::Summary(Some(summary)) => (
            " Chat summary ",
            summary
                .lines()
                .map(|l| Line::styled(l.to_string(), Style::new().fg(Theme::TEXT_CONTENT)))
                .collect::<Vec<_>>(),
        ),
        Modal::Summary(None) => (
            " Chat summary ",
            vec![Line::styled(
                "No summary available for this chat.",
                Style::new().fg(Theme::TEXT_MUTED),
            )],
        ),
        Modal::Notifications(items) if items.is_empty() => (
            " Notifications ",
            vec![Line::styled(
                "No notification-worthy messages.",
                Style::new().fg(Theme::TEXT_MUTED),
            )],
        ),
        Modal::Notifications(items) => (
            " Notifications ",
            items
                .iter()
                .flat_map(|item| {
                    let mut lines = vec![
                        Line::from(vec![
                            Span::styled(
                                item.sender.clone(),
                                Style::new().fg(Theme::ACCENT_BLUE).bold(),
                            ),
                            Span::styled(
                                format!("  {}", item.time),
                                Style::new().fg(Theme::TEXT_MUTED),
                            ),
                        ]),
                        Line::styled(
                            format!("  {}", item.content),
                            Style::new().fg(Theme::TEXT_CONTENT),
                        ),
                    ];
                    if let Some(reason) = &item.reason {
                        lines.push(Line::styled(
                            format!("  ({reason})"),
                            Style::new().fg(Theme::TEXT_SECONDARY),
                        ));
                    }
                    lines
                })
                .collect(),
        ),
        Modal::Files { kind, files, cursor } => {
            let title = match kind {
                FileKind::Doc => " Documents ",
                FileKind::Image => " Images ",
            };
            let lines = if files.is_empty() {
                vec![Line::styled(
                    "No stored files for this contact.",
                    Style::new().fg(Theme::TEXT_MUTED),
                )]
            } else {
                files
                    .iter()
                    .enumerate()
                    .map(|(i, file)| {
                        let marker = if i == *cursor { "> " } else { "  " };
                        let style = if i == *cursor {
                            Style::new().fg(Theme::ACCENT_BLUE).bold()
                        } else {
                            Style::new().fg(Theme::TEXT_CONTENT)
                        };
                        Line::styled(format!("{marker}{}", file.file_name), style)
                    })
                    .collect()
            };
            (title, lines)
        }
    };

    let block = Theme::block_accent().title(title).padding(Theme::PADDING_COMPACT);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut all_lines = lines;
    all_lines.push(Line::raw(""));
    all_lines.push(match modal {
        Modal::Files { kind, .. } => {
            let mut spans = vec![
                Span::styled("↑/↓ ", Style::new().fg(Theme::TEXT_KEY)),
                Span::styled("select  ", Style::new().fg(Theme::TEXT_KEY_DESC)),
                Span::styled("Enter ", Style::new().fg(Theme::TEXT_KEY)),
                Span::styled("translate  ", Style::new().fg(Theme::TEXT_KEY_DESC)),
            ];
            if matches!(kind, FileKind::Doc) {
                spans.push(Span::styled("m ", Style::new().fg(Theme::TEXT_KEY)));
                spans.push(Span::styled(
                    "summarize  ",
                    Style::new().fg(Theme::TEXT_KEY_DESC),
                ));
            }
            spans.push(Span::styled("Esc ", Style::new().fg(Theme::TEXT_KEY)));
            spans.push(Span::styled("close", Style::new().fg(Theme::TEXT_KEY_DESC)));
            Line::from(spans)
        }
        _ => Line::from(vec![
            Span::styled("Esc/Enter ", Style::new().fg(Theme::TEXT_KEY)),
            Span::styled("close", Style::new().fg(Theme::TEXT_KEY_DESC)),
        ]),
    });

    frame.render_widget(
        Paragraph::new(all_lines).wrap(Wrap { trim: false }),
        inner,
    );
}
