pub mod board_view;
pub mod day_view;
pub mod event_form;
pub mod help;
pub mod month_view;
pub mod status_bar;
pub mod task_form;
pub mod week_view;

pub use board_view::BoardView;
pub use day_view::DayView;
pub use event_form::EventForm;
pub use help::HelpPopup;
pub use month_view::MonthView;
pub use status_bar::StatusBar;
pub use task_form::TaskForm;
pub use week_view::WeekView;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

/// One labelled text input line of a form; the active one gets a cursor.
fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let t = theme::current();
    let cursor = if active { "_" } else { "" };
    let style = if active { t.highlight } else { ratatui::style::Style::default() };

    let line = Line::from(vec![
        Span::styled(format!("{:<10}", label), t.dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
