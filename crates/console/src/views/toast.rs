use crate::notify::{Toast, ToastVariant};
use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

/// Render the single toast slot in the bottom-right corner.
pub fn render(frame: &mut Frame, toast: &Toast) {
    let area = frame.area();
    let width = (toast.message.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(2))
        .max(10);
    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(4);
    let toast_area = Rect::new(x, y, width, 3);

    let color = match toast.variant {
        ToastVariant::Info => Theme::ACCENT_BLUE,
        ToastVariant::Success => Theme::ACCENT_GREEN,
        ToastVariant::Error => Theme::ACCENT_RED,
    };

    frame.render_widget(Clear, toast_area);
    let block = ratatui::widgets::Block::bordered()
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::new().fg(color));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);
    frame.render_widget(
        Paragraph::new(Line::styled(
            format!(" {}", toast.message),
            Style::new().fg(Theme::TEXT_PRIMARY),
        )),
        inner,
    );
}
