pub mod clock;
pub mod enums;
pub mod list;
pub mod notice;
pub mod reorder;
pub mod task;
pub mod timer;
pub mod views;

pub use clock::{now_ms, presentation, timer_label, Timestamp};
pub use enums::{DisplayMode, TimerStatus, UiMode};
pub use list::{parse_minutes, TaskEdit, TaskList, ValidationError};
pub use notice::Notification;
pub use reorder::{move_down_target, move_up_target};
pub use task::Task;
pub use timer::TickSchedule;
pub use views::{check_glyph, status_badge, summary_counts};
