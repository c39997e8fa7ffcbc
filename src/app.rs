use crate::domain::{
    move_down_target, move_up_target, now_ms, parse_minutes, Task, TimerStatus, Timestamp, UiMode,
    ValidationError,
};
use crate::notifications::{self, Banner};
use crate::persistence::{Settings, TaskRepository};
use crate::store::TaskStore;
use anyhow::Result;
use std::time::Instant;

/// Input form state for adding or editing a task
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub text: String,
    pub minutes: String,
    pub editing_field: usize, // 0 = text, 1 = minutes
    /// Task being edited; None when adding
    pub editing_id: Option<String>,
    /// Minutes text the edit form opened with. Submitting it unchanged keeps
    /// the stored estimate, which may not be a whole number of minutes.
    pub initial_minutes: Option<String>,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

/// Keyboard drag: the grabbed task and the slot it would be dropped into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub task_id: String,
    /// Index of the task to drop before; equal to the list length for "end of list"
    pub drop_index: usize,
}

/// Main application state
pub struct AppState {
    pub store: TaskStore<Box<dyn TaskRepository>>,
    pub settings: Settings,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub drag: Option<DragState>,
    pub banner: Option<Banner>,
}

impl AppState {
    pub fn new(store: TaskStore<Box<dyn TaskRepository>>, settings: Settings) -> Self {
        Self {
            store,
            settings,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            drag: None,
            banner: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Message for the status line while the latest save has failed
    pub fn status_message(&self) -> Option<&str> {
        self.store.save_error()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks().get(self.selected_index)
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    fn select_id(&mut self, id: &str) {
        if let Some(index) = self.store.list().position(id) {
            self.selected_index = index;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.tasks().len() {
            self.selected_index += 1;
        }
    }

    /// Move selected task up one slot
    pub fn move_item_up(&mut self) {
        let Some(id) = self.selected_id() else { return };
        if let Some(target) = move_up_target(self.tasks(), &id) {
            self.store.reorder(&id, target.as_deref(), now_ms());
            self.select_id(&id);
        }
    }

    /// Move selected task down one slot
    pub fn move_item_down(&mut self) {
        let Some(id) = self.selected_id() else { return };
        if let Some(target) = move_down_target(self.tasks(), &id) {
            self.store.reorder(&id, target.as_deref(), now_ms());
            self.select_id(&id);
        }
    }

    /// Start the selected timer, or pause it if it is counting
    pub fn toggle_run_pause(&mut self) {
        let Some(task) = self.selected_task() else { return };
        let (id, status) = (task.id.clone(), task.timer_status);
        let now = now_ms();
        match status {
            TimerStatus::Running | TimerStatus::Finished => self.store.pause(&id, now),
            TimerStatus::Idle | TimerStatus::Paused => self.store.start(&id, now),
        }
    }

    pub fn reset_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.reset(&id, now_ms());
        }
    }

    pub fn toggle_complete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.toggle_complete(&id, now_ms());
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.delete_task(&id, now_ms());
            if self.banner.as_ref().is_some_and(|b| b.notice.task_id == id) {
                self.banner = None;
            }
            self.clamp_selection();
        }
    }

    /// Open the form for a new task
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the form prefilled with the selected task
    pub fn start_edit_task(&mut self) {
        let Some(task) = self.selected_task() else { return };
        let minutes = (task.estimated_duration / 60).max(1).to_string();
        self.input_form = Some(InputFormState {
            text: task.text.clone(),
            minutes: minutes.clone(),
            editing_field: 0,
            editing_id: Some(task.id.clone()),
            initial_minutes: Some(minutes),
            error: None,
        });
        self.ui_mode = UiMode::EditingTask;
    }

    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.text.push(c),
                _ => form.minutes.push(c),
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.text.pop(),
                _ => form.minutes.pop(),
            };
        }
    }

    /// Validate and apply the form. On a validation error the form stays open
    /// with the message and nothing changes.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.clone() else { return };

        match self.apply_form(&form, now_ms()) {
            Ok(id) => {
                self.input_form = None;
                self.ui_mode = UiMode::Normal;
                self.select_id(&id);
            }
            Err(e) => {
                if let Some(form) = &mut self.input_form {
                    form.error = Some(e.to_string());
                }
            }
        }
    }

    /// Add or edit from the form fields. Returns the affected task's ID.
    fn apply_form(
        &mut self,
        form: &InputFormState,
        now: Timestamp,
    ) -> Result<String, ValidationError> {
        if form.text.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        match &form.editing_id {
            Some(id) => {
                let unchanged = form.initial_minutes.as_deref() == Some(form.minutes.trim());
                let minutes = if unchanged {
                    None
                } else {
                    Some(parse_minutes(&form.minutes)? / 60)
                };
                self.store.edit_task(id, Some(form.text.clone()), minutes, now)?;
                Ok(id.clone())
            }
            None => {
                let minutes = parse_minutes(&form.minutes)? / 60;
                self.store.add_task(&form.text, minutes, now)
            }
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Pick up the selected task for keyboard reordering
    pub fn grab_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        self.drag = Some(DragState {
            task_id: id,
            drop_index: self.selected_index,
        });
        self.ui_mode = UiMode::Dragging;
    }

    pub fn drag_cursor_up(&mut self) {
        if let Some(drag) = &mut self.drag {
            drag.drop_index = drag.drop_index.saturating_sub(1);
        }
    }

    pub fn drag_cursor_down(&mut self) {
        let len = self.store.tasks().len();
        if let Some(drag) = &mut self.drag {
            if drag.drop_index < len {
                drag.drop_index += 1;
            }
        }
    }

    /// Drop the grabbed task before the task under the cursor, or at the end
    pub fn drop_grabbed(&mut self) {
        let Some(drag) = self.drag.take() else { return };
        let target = self.tasks().get(drag.drop_index).map(|t| t.id.clone());
        self.store.reorder(&drag.task_id, target.as_deref(), now_ms());
        self.select_id(&drag.task_id);
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Drive timers and expire the banner
    pub fn tick(&mut self) {
        self.tick_at(now_ms(), Instant::now());
    }

    pub fn tick_at(&mut self, now: Timestamp, instant: Instant) {
        for notice in self.store.tick(now) {
            if self.settings.bell {
                notifications::ring_bell();
            }
            if self.settings.desktop_notifications {
                notifications::notify_time_up(&notice);
            }
            self.banner = Some(Banner::new(notice, instant));
        }

        let ttl = self.settings.banner_duration();
        if self.banner.as_ref().is_some_and(|b| b.is_expired(instant, ttl)) {
            self.banner = None;
        }
    }

    /// Stop all timers' tick handles and write the final state
    pub fn shutdown(&mut self) -> Result<()> {
        self.store.shutdown()
    }
}
