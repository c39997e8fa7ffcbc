use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.editing_id.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };

        let mut lines = Vec::new();

        let fields = [("Description", &form.text), ("Estimate (minutes)", &form.minutes)];
        for (index, (label, value)) in fields.iter().enumerate() {
            let editing = form.editing_field == index;
            lines.push(Line::raw(""));
            lines.push(Line::raw(if editing {
                format!("{}: (editing)", label)
            } else {
                format!("{}:", label)
            }));
            lines.push(Line::from(vec![
                Span::raw("> "),
                Span::styled(value.as_str(), modal_title_style()),
                if editing {
                    Span::styled("█", modal_title_style()) // Cursor
                } else {
                    Span::raw("")
                },
            ]));
        }
        lines.push(Line::raw(""));

        match &form.error {
            Some(error) => lines.push(Line::from(Span::styled(error.as_str(), error_style()))),
            None => lines.push(Line::raw(
                "Tab to switch fields  ·  Enter to save  ·  Esc to cancel",
            )),
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
