use chrono::NaiveDate;
use tracing::{debug, info};

use crate::calendar::{
    self, CalendarEvent, Direction, EventId, EventStore, HourWindow, TimeGrid, ViewMode,
};
use crate::components::event_form::{EventFormMode, EventFormState};
use crate::components::task_form::TaskFormState;
use crate::config::Config;
use crate::ids::IdClock;
use crate::tasks::{self, DragSession, Status, Target, Task, TaskBoard, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Calendar,
    Tasks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Form,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardLayout {
    Board,
    List,
}

#[derive(Debug, Clone)]
pub enum Form {
    Event(EventFormState),
    Task(TaskFormState),
}

pub struct CalendarPage {
    pub view_mode: ViewMode,
    pub anchor: NaiveDate,
    pub today: NaiveDate,
    pub store: EventStore,
    /// Index into the anchor day's events.
    pub selected: usize,
    pub detail: Option<EventId>,
}

impl CalendarPage {
    pub fn day_events(&self) -> Vec<&CalendarEvent> {
        self.store.on_date(self.anchor)
    }

    pub fn selected_event(&self) -> Option<&CalendarEvent> {
        self.day_events().get(self.selected).copied()
    }

    pub fn detail_event(&self) -> Option<&CalendarEvent> {
        self.detail.and_then(|id| self.store.get(id))
    }

    /// Events in the current week or day grid that the hour window hides.
    pub fn hidden_event_count(&self, window: HourWindow) -> usize {
        let events = self.store.events();
        match self.view_mode {
            ViewMode::Month => 0,
            ViewMode::Week => TimeGrid::week(self.anchor, events).hidden_count(window),
            ViewMode::Day => TimeGrid::day(self.anchor, events).hidden_count(window),
        }
    }
}

pub struct TasksPage {
    pub board: TaskBoard,
    pub query: String,
    pub layout: BoardLayout,
    /// Cursor column on the board layout, as an index into `Status::ALL`.
    pub column: usize,
    pub row: usize,
    pub drag: Option<DragSession>,
    pub default_status: Status,
}

impl TasksPage {
    pub fn column_status(&self) -> Status {
        Status::ALL[self.column.min(Status::ALL.len() - 1)]
    }

    /// Tasks the cursor moves over in the active layout.
    pub fn visible(&self) -> Vec<&Task> {
        match self.layout {
            BoardLayout::Board => self.board.column(self.column_status(), &self.query),
            BoardLayout::List => self.board.filtered(&self.query).collect(),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible().get(self.row).copied()
    }

    pub fn dragging(&self) -> Option<TaskId> {
        self.drag.as_ref().map(DragSession::task)
    }

    fn clamp_row(&mut self) {
        let len = self.visible().len();
        self.row = self.row.min(len.saturating_sub(1));
    }
}

pub struct App {
    pub running: bool,
    pub page: Page,
    pub input_mode: InputMode,
    pub calendar: CalendarPage,
    pub tasks: TasksPage,
    pub form: Option<Form>,
    pub hour_window: HourWindow,
    pub show_help: bool,
    pub status_message: Option<String>,
    ids: IdClock,
}

impl App {
    pub fn new(config: &Config, today: NaiveDate) -> Self {
        let store = EventStore::new(calendar::seed::events());
        let board = TaskBoard::new(tasks::seed::tasks());
        let ids = IdClock::starting_after(store.max_id().max(board.max_id()));

        Self {
            running: true,
            page: Page::Calendar,
            input_mode: InputMode::Normal,
            calendar: CalendarPage {
                view_mode: config.calendar.default_view,
                anchor: today,
                today,
                store,
                selected: 0,
                detail: None,
            },
            tasks: TasksPage {
                board,
                query: String::new(),
                layout: BoardLayout::Board,
                column: 0,
                row: 0,
                drag: None,
                default_status: config.tasks.default_status,
            },
            form: None,
            hour_window: config.hour_window(),
            show_help: false,
            status_message: None,
            ids,
        }
    }

    pub fn switch_page(&mut self) {
        self.page = match self.page {
            Page::Calendar => Page::Tasks,
            Page::Tasks => Page::Calendar,
        };
        info!(page = ?self.page, "page switched");
    }

    // ── Calendar ──

    pub fn set_view(&mut self, mode: ViewMode) {
        self.calendar.view_mode = mode;
        self.flag_hidden_events();
    }

    pub fn navigate(&mut self, direction: Direction) {
        let cal = &mut self.calendar;
        cal.anchor = calendar::grid::navigate(cal.anchor, cal.view_mode, direction);
        self.on_date_changed();
    }

    pub fn set_anchor(&mut self, date: NaiveDate) {
        self.calendar.anchor = date;
        self.on_date_changed();
    }

    pub fn go_to_today(&mut self) {
        self.calendar.anchor = self.calendar.today;
        self.on_date_changed();
    }

    pub fn select_next_event(&mut self) {
        let len = self.calendar.day_events().len();
        if self.calendar.selected + 1 < len {
            self.calendar.selected += 1;
        }
    }

    pub fn select_prev_event(&mut self) {
        self.calendar.selected = self.calendar.selected.saturating_sub(1);
    }

    fn on_date_changed(&mut self) {
        self.calendar.selected = 0;
        self.flag_hidden_events();
    }

    fn flag_hidden_events(&mut self) {
        let hidden = self.calendar.hidden_event_count(self.hour_window);
        if hidden > 0 {
            self.status_message = Some(format!(
                "{} event{} outside visible hours",
                hidden,
                if hidden == 1 { "" } else { "s" }
            ));
        }
    }

    pub fn show_detail(&mut self) {
        self.calendar.detail = self.calendar.selected_event().map(|e| e.id);
    }

    pub fn close_detail(&mut self) {
        self.calendar.detail = None;
    }

    pub fn open_event_form(&mut self) {
        self.form = Some(Form::Event(EventFormState::new(self.calendar.anchor)));
        self.input_mode = InputMode::Form;
    }

    pub fn edit_detail_event(&mut self) {
        if let Some(ev) = self.calendar.detail_event() {
            self.form = Some(Form::Event(EventFormState::edit(ev)));
            self.input_mode = InputMode::Form;
            self.calendar.detail = None;
        }
    }

    pub fn delete_detail_event(&mut self) {
        let Some(id) = self.calendar.detail.take() else {
            return;
        };
        match self.calendar.store.delete_event(id) {
            Ok(store) => {
                self.calendar.store = store;
                self.calendar.selected = self.calendar.selected.saturating_sub(1);
                self.status_message = Some("Event deleted".to_string());
            }
            Err(err) => debug!(error = %err, "event delete rejected"),
        }
    }

    // ── Tasks ──

    pub fn toggle_layout(&mut self) {
        let tasks = &mut self.tasks;
        tasks.layout = match tasks.layout {
            BoardLayout::Board => BoardLayout::List,
            BoardLayout::List => BoardLayout::Board,
        };
        tasks.row = 0;
        if let Some(id) = tasks.dragging() {
            self.follow_task(id);
        }
    }

    pub fn move_column(&mut self, direction: Direction) {
        if self.tasks.drag.is_some() {
            self.drag_to_column(direction);
            return;
        }
        let len = Status::ALL.len();
        let tasks = &mut self.tasks;
        tasks.column = match direction {
            Direction::Next => (tasks.column + 1).min(len - 1),
            Direction::Prev => tasks.column.saturating_sub(1),
        };
        tasks.clamp_row();
    }

    pub fn move_row(&mut self, direction: Direction) {
        let len = self.tasks.visible().len();
        let tasks = &mut self.tasks;
        tasks.row = match direction {
            Direction::Next if tasks.row + 1 < len => tasks.row + 1,
            Direction::Next => tasks.row,
            Direction::Prev => tasks.row.saturating_sub(1),
        };

        if self.tasks.drag.is_some() {
            if let Some(under) = self.tasks.selected_task().map(|t| t.id) {
                self.drag_over(Target::Task(under));
            }
        }
    }

    pub fn start_drag(&mut self) {
        let Some(id) = self.tasks.selected_task().map(|t| t.id) else {
            return;
        };
        self.tasks.drag = DragSession::start(&self.tasks.board, id);
        debug!(id = %id, "drag started");
    }

    pub fn end_drag(&mut self) {
        if let Some(session) = self.tasks.drag.take() {
            debug!(origin = session.origin().id(), hovered = ?session.hovered(), "drag ended");
            let id = session.end();
            if let Some(task) = self.tasks.board.get(id) {
                self.status_message = Some(format!("Moved to {}", task.status.title()));
            }
            self.follow_task(id);
        }
    }

    fn drag_to_column(&mut self, direction: Direction) {
        let Some(id) = self.tasks.dragging() else {
            return;
        };
        let Some(current) = self.tasks.board.get(id).map(|t| t.status) else {
            return;
        };
        let column = match direction {
            Direction::Next => current.next(),
            Direction::Prev => current.prev(),
        };
        self.drag_over(Target::Column(column));
        self.follow_task(id);
    }

    fn drag_over(&mut self, target: Target) {
        let tasks = &mut self.tasks;
        if let Some(session) = tasks.drag.as_mut() {
            tasks.board = session.over(&tasks.board, target);
        }
    }

    /// Put the cursor on `id`, switching columns if its status changed.
    fn follow_task(&mut self, id: TaskId) {
        let tasks = &mut self.tasks;
        if tasks.layout == BoardLayout::Board {
            if let Some(task) = tasks.board.get(id) {
                tasks.column = task.status.column_index();
            }
        }
        let row = tasks.visible().iter().position(|t| t.id == id);
        if let Some(row) = row {
            tasks.row = row;
        }
        tasks.clamp_row();
    }

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn search_input(&mut self, c: char) {
        self.tasks.query.push(c);
        self.tasks.row = 0;
    }

    pub fn search_backspace(&mut self) {
        self.tasks.query.pop();
        self.tasks.clamp_row();
    }

    pub fn end_search(&mut self, clear: bool) {
        if clear {
            self.tasks.query.clear();
        }
        self.tasks.clamp_row();
        self.input_mode = InputMode::Normal;
    }

    pub fn open_task_form(&mut self, status: Status) {
        self.form = Some(Form::Task(TaskFormState::new(status, self.calendar.today)));
        self.input_mode = InputMode::Form;
    }

    /// The empty under-review column offers a shortcut to the create sheet.
    pub fn activate_selection(&mut self) {
        let status = self.tasks.column_status();
        if self.tasks.layout == BoardLayout::Board
            && self.tasks.board.shows_create_affordance(status, &self.tasks.query)
        {
            self.open_task_form(status);
        }
    }

    // ── Forms ──

    pub fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_form(&mut self) {
        match self.form.take() {
            Some(Form::Event(form)) => self.submit_event_form(form),
            Some(Form::Task(form)) => self.submit_task_form(form),
            None => self.input_mode = InputMode::Normal,
        }
    }

    fn submit_event_form(&mut self, form: EventFormState) {
        let Some(draft) = form.to_draft() else {
            debug!("event form has unparseable fields");
            self.form = Some(Form::Event(form));
            return;
        };
        let date = draft.date;
        let result = match form.mode {
            EventFormMode::Create => {
                let id = EventId(self.ids.next_id());
                self.calendar.store.create_event(draft, id)
            }
            EventFormMode::Edit(id) => self.calendar.store.update_event(id, draft),
        };

        match result {
            Ok(store) => {
                self.calendar.store = store;
                self.input_mode = InputMode::Normal;
                self.status_message = Some(match form.mode {
                    EventFormMode::Create => "Event created".to_string(),
                    EventFormMode::Edit(_) => "Event updated".to_string(),
                });
                self.set_anchor(date);
            }
            Err(err) => {
                debug!(error = %err, "event rejected");
                self.form = Some(Form::Event(form));
            }
        }
    }

    fn submit_task_form(&mut self, form: TaskFormState) {
        let Some(draft) = form.to_draft() else {
            debug!("task form has unparseable fields");
            self.form = Some(Form::Task(form));
            return;
        };

        let id = TaskId(self.ids.next_id());
        let board = self
            .tasks
            .board
            .create_task(draft, id, self.tasks.default_status);
        if board == self.tasks.board {
            self.form = Some(Form::Task(form));
            return;
        }

        self.tasks.board = board;
        self.input_mode = InputMode::Normal;
        self.status_message = Some("Task created".to_string());
        self.follow_task(id);
    }

    pub fn form_input_char(&mut self, c: char) {
        match self.form.as_mut() {
            Some(Form::Event(f)) => f.input_char(c),
            Some(Form::Task(f)) => f.input_char(c),
            None => {}
        }
    }

    pub fn form_backspace(&mut self) {
        match self.form.as_mut() {
            Some(Form::Event(f)) => f.backspace(),
            Some(Form::Task(f)) => f.backspace(),
            None => {}
        }
    }

    pub fn form_tab(&mut self) {
        match self.form.as_mut() {
            Some(Form::Event(f)) => f.active_field = f.active_field.next(),
            Some(Form::Task(f)) => f.active_field = f.active_field.next(),
            None => {}
        }
    }

    pub fn form_backtab(&mut self) {
        match self.form.as_mut() {
            Some(Form::Event(f)) => f.active_field = f.active_field.prev(),
            Some(Form::Task(f)) => f.active_field = f.active_field.prev(),
            None => {}
        }
    }

    /// Space cycles choice fields and types a space into text fields.
    pub fn form_space(&mut self) {
        match self.form.as_mut() {
            Some(Form::Event(f)) => f.input_char(' '),
            Some(Form::Task(f)) => {
                if !f.cycle_choice() {
                    f.input_char(' ');
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::task_form::TaskField;

    fn app() -> App {
        App::new(&Config::default(), NaiveDate::from_ymd_opt(2025, 7, 9).unwrap())
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.form_input_char(c);
        }
    }

    #[test]
    fn seeded_day_has_two_events() {
        let app = app();
        let titles: Vec<&str> = app.calendar.day_events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Break", "File taxes"]);
    }

    #[test]
    fn selection_stays_in_bounds_and_resets_on_navigation() {
        let mut app = app();
        app.select_next_event();
        app.select_next_event();
        assert_eq!(app.calendar.selected, 1);
        app.navigate(Direction::Next);
        assert_eq!(app.calendar.anchor, NaiveDate::from_ymd_opt(2025, 8, 9).unwrap());
        assert_eq!(app.calendar.selected, 0);
    }

    #[test]
    fn create_event_through_form() {
        let mut app = app();
        app.open_event_form();
        assert_eq!(app.input_mode, InputMode::Form);
        type_str(&mut app, "Design review");
        app.submit_form();

        assert!(app.form.is_none());
        assert_eq!(app.input_mode, InputMode::Normal);
        let titles: Vec<String> = app.calendar.day_events().iter().map(|e| e.title.clone()).collect();
        assert!(titles.contains(&"Design review".to_string()));
    }

    #[test]
    fn blank_event_title_keeps_form_open() {
        let mut app = app();
        let before = app.calendar.store.clone();
        app.open_event_form();
        app.submit_form();
        assert!(matches!(app.form, Some(Form::Event(_))));
        assert_eq!(app.calendar.store, before);
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn edit_and_delete_from_detail() {
        let mut app = app();
        app.show_detail();
        let id = app.calendar.detail.unwrap();
        app.edit_detail_event();
        type_str(&mut app, " (moved)");
        app.submit_form();
        assert_eq!(app.calendar.store.get(id).unwrap().title, "Break (moved)");

        app.show_detail();
        app.delete_detail_event();
        assert!(app.calendar.store.get(id).is_none());
        assert_eq!(app.calendar.day_events().len(), 1);
    }

    #[test]
    fn flags_events_outside_window_in_day_view() {
        let mut app = app();
        app.set_anchor(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        app.status_message = None;
        app.hour_window = HourWindow { first: 7, last: 12 };
        // Gia's birthday starts at 16:00.
        app.set_view(ViewMode::Day);
        assert_eq!(app.status_message.as_deref(), Some("1 event outside visible hours"));
    }

    #[test]
    fn drag_card_across_columns() {
        let mut app = app();
        app.page = Page::Tasks;
        app.start_drag();
        let id = app.tasks.dragging().unwrap();
        assert_eq!(id, TaskId(1));

        app.move_column(Direction::Next);
        app.move_column(Direction::Next);
        app.end_drag();

        assert_eq!(app.tasks.board.get(id).unwrap().status, Status::UnderReview);
        assert_eq!(app.tasks.column_status(), Status::UnderReview);
        assert_eq!(app.tasks.selected_task().map(|t| t.id), Some(id));
        assert_eq!(app.status_message.as_deref(), Some("Moved to Under review"));
    }

    #[test]
    fn drag_over_card_in_list_layout_adopts_its_column() {
        let mut app = app();
        app.toggle_layout();
        app.start_drag();
        // Rows 0..3 are todo, row 3 is the first in-progress task.
        for _ in 0..3 {
            app.move_row(Direction::Next);
        }
        app.end_drag();
        assert_eq!(app.tasks.board.get(TaskId(1)).unwrap().status, Status::InProgress);
        assert_eq!(app.tasks.board.column_count(Status::Todo, ""), 2);
    }

    #[test]
    fn create_task_uses_configured_default_and_blank_is_ignored() {
        let mut app = app();
        app.page = Page::Tasks;
        app.open_task_form(app.tasks.default_status);
        app.submit_form();
        assert_eq!(app.tasks.board.tasks().len(), 9);
        assert!(app.form.is_some());

        type_str(&mut app, "Write changelog");
        app.submit_form();
        assert_eq!(app.tasks.board.tasks().len(), 10);
        let created = app.tasks.board.tasks().last().unwrap();
        assert_eq!(created.status, Status::UnderReview);
        assert_eq!(app.tasks.selected_task().map(|t| t.id), Some(created.id));
    }

    #[test]
    fn task_form_cycles_choices_with_space() {
        let mut app = app();
        app.open_task_form(Status::Todo);
        if let Some(Form::Task(f)) = app.form.as_mut() {
            f.active_field = TaskField::List;
        }
        app.form_space();
        match &app.form {
            Some(Form::Task(f)) => assert_eq!(f.status, Status::InProgress),
            _ => panic!("task form should be open"),
        }
    }

    #[test]
    fn empty_under_review_column_opens_create_sheet() {
        let mut app = app();
        app.page = Page::Tasks;
        app.move_column(Direction::Next);
        app.move_column(Direction::Next);
        assert_eq!(app.tasks.column_status(), Status::UnderReview);
        app.activate_selection();
        match &app.form {
            Some(Form::Task(f)) => assert_eq!(f.status, Status::UnderReview),
            _ => panic!("task form should be open"),
        }
    }

    #[test]
    fn search_narrows_visible_tasks() {
        let mut app = app();
        app.toggle_layout();
        app.begin_search();
        for c in "PRICING".chars() {
            app.search_input(c);
        }
        app.end_search(false);
        assert_eq!(app.tasks.visible().len(), 1);
        app.begin_search();
        app.end_search(true);
        assert_eq!(app.tasks.visible().len(), 9);
    }
}
