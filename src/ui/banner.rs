use crate::notifications::Banner;
use crate::ui::styles::banner_style;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the "time is up" banner
pub fn render_banner(f: &mut Frame, banner: &Banner, area: Rect) {
    let line = Line::from(vec![
        Span::raw(" ⏰ "),
        Span::raw(banner.notice.message.as_str()),
        Span::raw("   (Esc to dismiss)"),
    ]);

    let paragraph = Paragraph::new(line)
        .style(banner_style())
        .block(Block::default().borders(Borders::ALL).style(banner_style()));

    f.render_widget(paragraph, area);
}
