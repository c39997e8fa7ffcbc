use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::Dragging => handle_dragging_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_item_up();
            } else {
                app.move_selection_up();
            }
            Ok(false)
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_item_down();
            } else {
                app.move_selection_down();
            }
            Ok(false)
        }

        // Start / pause
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_run_pause();
            Ok(false)
        }

        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_selected();
            Ok(false)
        }

        // Toggle completed
        KeyCode::Char('d') | KeyCode::Char('D') => {
            app.toggle_complete_selected();
            Ok(false)
        }

        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Edit task (open form with existing data)
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_task();
            Ok(false)
        }

        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Grab for drag and drop
        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.grab_selected();
            Ok(false)
        }

        KeyCode::Esc => {
            app.dismiss_banner();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while a task is grabbed
fn handle_dragging_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => {
            app.drag_cursor_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.drag_cursor_down();
            Ok(false)
        }

        // Drop
        KeyCode::Enter | KeyCode::Char('g') | KeyCode::Char('G') => {
            app.drop_grabbed();
            Ok(false)
        }

        KeyCode::Esc => {
            app.cancel_drag();
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding or editing a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Switch between description and minutes
        KeyCode::Tab | KeyCode::BackTab => {
            app.input_form_toggle_field();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        // Add character
        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}
