use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the current mode
fn hints(mode: UiMode) -> Vec<&'static str> {
    match mode {
        UiMode::Normal => vec![
            " ↑/↓ select   ",
            "Shift+↑/↓ move   ",
            "Enter start/pause   ",
            "r reset   ",
            "d done   ",
            "e edit   ",
            "a add   ",
            "g grab   ",
            "x delete   ",
            "Esc dismiss   ",
            "q quit",
        ],
        UiMode::Dragging => vec![
            " ↑/↓ choose slot   ",
            "g/Enter drop   ",
            "Esc cancel",
        ],
        UiMode::AddingTask | UiMode::EditingTask => vec![
            " Tab switch field   ",
            "Enter save   ",
            "Esc cancel",
        ],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let line = Line::from(hints(mode).into_iter().map(Span::raw).collect::<Vec<_>>());
    let paragraph = Paragraph::new(line).style(hint_style());
    f.render_widget(paragraph, area);
}
