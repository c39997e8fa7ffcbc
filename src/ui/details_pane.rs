use crate::app::AppState;
use crate::domain::{clock::elapsed_secs, timer_label, TimerStatus, Timestamp};
use crate::ui::styles::{border_style, default_style, running_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Format seconds as "1h 05m 09s", "5m 09s" or "9s"
fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, now: Timestamp, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_task() else {
        f.render_widget(Paragraph::new("No task selected").block(block), area);
        return;
    };

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Task: ", title_style()),
        Span::raw(task.text.as_str()),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::styled("Est:     ", title_style()),
        Span::raw(format_seconds(task.estimated_duration)),
    ]));

    let elapsed_style = if task.timer_status == TimerStatus::Running {
        running_style()
    } else {
        default_style()
    };
    lines.push(Line::from(vec![
        Span::styled("Elapsed: ", title_style()),
        Span::styled(format_seconds(elapsed_secs(task, now)), elapsed_style),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Timer:   ", title_style()),
        Span::raw(timer_label(task, now)),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Status:  ", title_style()),
        Span::raw(task.timer_status.to_tag()),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Done:    ", title_style()),
        Span::raw(if task.is_completed { "yes" } else { "no" }),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(9), "9s");
        assert_eq!(format_seconds(309), "5m 09s");
        assert_eq!(format_seconds(3909), "1h 05m 09s");
    }
}
