use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub banner_area: Option<Rect>,
    pub list_area: Rect,
    pub details_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Banner (3 rows) while a notification is showing
/// - Main area: List (70%) | Details (30%)
/// - Bottom bar: status line (1 row)
pub fn create_layout(area: Rect, show_banner: bool) -> MainLayout {
    let banner_height = if show_banner { 3 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Keybindings bar
            Constraint::Length(banner_height), // Banner
            Constraint::Min(0),                // Main content
            Constraint::Length(1),             // Status line
        ])
        .split(area);

    let horizontal_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // List pane
            Constraint::Percentage(30), // Details pane
        ])
        .split(main_chunks[2]);

    MainLayout {
        keybindings_area: main_chunks[0],
        banner_area: show_banner.then_some(main_chunks[1]),
        list_area: horizontal_split[0],
        details_area: horizontal_split[1],
        status_area: main_chunks[3],
    }
}

/// Create centered modal area (for the task form)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(12),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
