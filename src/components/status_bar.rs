use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, BoardLayout, InputMode, Page};
use crate::calendar::ViewMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let status = theme::current().status;
        let w = area.width as usize;

        let mode_str = match (app.page, app.input_mode) {
            (_, InputMode::Form) => "FORM".to_string(),
            (_, InputMode::Search) => "SEARCH".to_string(),
            (Page::Calendar, _) => match app.calendar.view_mode {
                ViewMode::Month => "Calendar [1]Month".to_string(),
                ViewMode::Week => "Calendar [2]Week".to_string(),
                ViewMode::Day => "Calendar [3]Day".to_string(),
            },
            (Page::Tasks, _) => match (&app.tasks.drag, app.tasks.layout) {
                (Some(drag), _) => format!("Tasks DRAG from {}", drag.origin().title()),
                (None, BoardLayout::Board) => "Tasks Board".to_string(),
                (None, BoardLayout::List) => "Tasks List".to_string(),
            },
        };

        let hints = match app.status_message.as_deref() {
            Some(msg) => format!(" {} ", msg),
            None => hints(app, w).to_string(),
        };

        let padding = " ".repeat(w.saturating_sub(mode_str.len() + 2 + hints.chars().count()));

        let line = Line::from(vec![
            Span::styled(format!(" {} ", mode_str), status),
            Span::styled(padding, status),
            Span::styled(hints, status),
        ]);

        frame.render_widget(Paragraph::new(line).style(status), area);
    }
}

fn hints(app: &App, w: usize) -> &'static str {
    match (app.input_mode, app.page) {
        (InputMode::Form, _) => " Tab:Next  Enter:Save  Esc:Cancel",
        (InputMode::Search, _) => " Enter:Apply  Esc:Clear",
        (_, Page::Calendar) if w >= 70 => {
            " h/l:Navigate  t:Today  n:New  Tab:Tasks  ?:Help  q:Quit"
        }
        (_, Page::Tasks) if app.tasks.drag.is_some() => " hjkl:Move  Space:Drop  Esc:Done",
        (_, Page::Tasks) if w >= 70 => {
            " hjkl:Move  Space:Drag  v:Layout  /:Search  n:New  Tab:Calendar  q:Quit"
        }
        _ => " ?:Help q:Quit",
    }
}
