use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Padding};

pub struct Theme;

impl Theme {
    // ── Border ───────────────────────────────────────────────────────
    pub const BORDER_DIM: Color = Color::DarkGray;
    pub const BORDER_NORMAL: Color = Color::Rgb(60, 65, 80);
    pub const BORDER_ACCENT: Color = Color::Rgb(100, 180, 240);

    // ── Text hierarchy ───────────────────────────────────────────────
    pub const TEXT_PRIMARY: Color = Color::White;
    pub const TEXT_SECONDARY: Color = Color::Rgb(140, 145, 160);
    pub const TEXT_MUTED: Color = Color::Rgb(80, 85, 100);
    pub const TEXT_CONTENT: Color = Color::Rgb(170, 175, 190);

    // ── Key style (for footer hints) ─────────────────────────────────
    pub const TEXT_KEY: Color = Color::Rgb(140, 145, 160);
    pub const TEXT_KEY_DESC: Color = Color::DarkGray;

    // ── Accent ───────────────────────────────────────────────────────
    pub const ACCENT_BLUE: Color = Color::Rgb(100, 180, 240);
    pub const ACCENT_GREEN: Color = Color::Rgb(80, 200, 120);
    pub const ACCENT_RED: Color = Color::Rgb(220, 80, 80);
    pub const ACCENT_YELLOW: Color = Color::Rgb(220, 180, 60);

    // ── Semantic ─────────────────────────────────────────────────────
    pub const TOGGLE_ON: Color = Color::Rgb(80, 200, 120);
    pub const TOGGLE_OFF: Color = Color::Rgb(220, 80, 80);
    pub const MATCH_HIGHLIGHT: Color = Color::Rgb(220, 180, 60);

    // ── Badge colors ─────────────────────────────────────────────────
    pub const BADGE_GROUP: Color = Color::Rgb(80, 160, 240);
    pub const BADGE_PRIVATE: Color = Color::Rgb(80, 200, 120);

    // ── Padding ──────────────────────────────────────────────────────
    pub const PADDING_COMPACT: Padding = Padding::new(1, 1, 0, 0);

    // ── Block helpers ────────────────────────────────────────────────

    pub fn block() -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Self::BORDER_NORMAL))
    }

    pub fn block_dim() -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Self::BORDER_DIM))
    }

    pub fn block_accent() -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Self::BORDER_ACCENT))
    }
}

// ── Sender color palette ─────────────────────────────────────────────

const SENDER_PALETTE: [Color; 8] = [
    Color::Rgb(100, 180, 240), // blue
    Color::Rgb(80, 200, 120),  // green
    Color::Rgb(220, 180, 60),  // yellow
    Color::Rgb(180, 140, 220), // purple
    Color::Rgb(220, 130, 80),  // orange
    Color::Rgb(80, 200, 200),  // teal
    Color::Rgb(220, 100, 160), // pink
    Color::Rgb(160, 200, 80),  // lime
];

pub fn sender_color(sender: &str) -> Color {
    let hash = sender
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    SENDER_PALETTE[(hash as usize) % SENDER_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_color_is_stable_for_same_sender() {
        assert_eq!(sender_color("alice"), sender_color("alice"));
    }

    #[test]
    fn sender_color_uses_multiple_palette_slots() {
        let a = sender_color("alice");
        let b = sender_color("bob");
        let c = sender_color("carol");
        assert!(a != b || b != c || a != c);
    }
}
