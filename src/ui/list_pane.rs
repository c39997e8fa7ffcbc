use crate::app::{AppState, DragState};
use crate::domain::{
    check_glyph, presentation, status_badge, summary_counts, timer_label, DisplayMode, Task,
    TimerStatus, Timestamp,
};
use crate::ui::styles::{
    border_style, default_style, done_style, drop_marker_style, grabbed_style, idle_style,
    overtime_style, paused_style, running_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, now: Timestamp, area: Rect) {
    let tasks = app.tasks();
    let mut items: Vec<ListItem> = Vec::new();

    for (idx, task) in tasks.iter().enumerate() {
        if let Some(drag) = &app.drag {
            if drag.drop_index == idx {
                items.push(drop_marker());
            }
        }

        let style = row_style(app, app.drag.as_ref(), idx, task);
        items.push(ListItem::new(create_task_line(task, now)).style(style));
    }

    if tasks.is_empty() {
        let empty = Line::raw(" No tasks yet. Press 'a' to add one.");
        items.push(ListItem::new(empty).style(idle_style()));
    }

    // Trailing "drop at end" slot
    if let Some(drag) = &app.drag {
        if drag.drop_index >= tasks.len() {
            items.push(drop_marker());
        }
    }

    let (open, completed, running) = summary_counts(tasks);
    let title = format!(" Tasks ({} open · {} done · {} running) ", open, completed, running);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

fn row_style(app: &AppState, drag: Option<&DragState>, idx: usize, task: &Task) -> Style {
    match drag {
        Some(drag) if drag.task_id == task.id => grabbed_style(),
        Some(_) => default_style(),
        None if idx == app.selected_index => selected_style(),
        None => default_style(),
    }
}

fn drop_marker() -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(" ──▶ drop here", drop_marker_style())))
}

/// Create a single line for a task
/// Format: [ ] Write proposal   12:30  ⏱ RUNNING
fn create_task_line(task: &Task, now: Timestamp) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw(format!("{} ", check_glyph(task))));

    let text_style = if task.is_completed {
        done_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(task.text.clone(), text_style));
    spans.push(Span::raw("  ".to_string()));

    spans.push(Span::styled(timer_label(task, now), timer_style(task, now)));
    spans.push(Span::raw("  ".to_string()));

    let badge_style = match task.timer_status {
        TimerStatus::Running => running_style(),
        TimerStatus::Paused => paused_style(),
        TimerStatus::Finished => overtime_style(),
        TimerStatus::Idle => idle_style(),
    };
    spans.push(Span::styled(status_badge(task).to_string(), badge_style));

    Line::from(spans)
}

/// Color of the timer label: red in overtime, otherwise by state
fn timer_style(task: &Task, now: Timestamp) -> Style {
    if presentation(task, now).mode == DisplayMode::Overtime {
        return overtime_style();
    }
    match task.timer_status {
        TimerStatus::Running => running_style(),
        TimerStatus::Paused => paused_style(),
        _ => idle_style(),
    }
}
