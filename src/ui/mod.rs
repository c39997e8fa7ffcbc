pub mod banner;
pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::now_ms;
use banner::render_banner;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::{error_style, hint_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    // One instant per frame so every label agrees
    let now = now_ms();
    let size = f.size();
    let layout = create_layout(size, app.banner.is_some());

    render_keybindings(f, app.ui_mode, layout.keybindings_area);

    if let (Some(banner), Some(area)) = (&app.banner, layout.banner_area) {
        render_banner(f, banner, area);
    }

    render_list_pane(f, app, now, layout.list_area);
    render_details_pane(f, app, now, layout.details_area);

    let status = match app.status_message() {
        Some(message) => Paragraph::new(Span::styled(format!(" {}", message), error_style())),
        None => Paragraph::new(Span::styled(
            format!(" {} tasks", app.tasks().len()),
            hint_style(),
        )),
    };
    f.render_widget(status, layout.status_area);

    // Render input form if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}
