mod app;
mod calendar;
mod cli;
mod components;
mod config;
mod event;
mod ids;
mod logging;
mod tasks;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode, Page};
use calendar::{Direction, MonthGrid, TimeGrid, ViewMode};
use chrono::Local;
use clap::Parser;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::AppEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Tabs,
    Frame,
};
use tracing::{debug, info};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let log_path = logging::init(cli.log_file.as_deref(), cli.verbose)?;
    let config = config::Config::load(cli.config.as_deref())?;
    let theme = config.theme.clone().into_theme(&config.tags);
    info!(log = %log_path.display(), theme = %theme.name, "starting");
    theme::init(theme);

    let mut app = App::new(&config, Local::now().date_naive());
    if let Some(date) = cli.date {
        app.set_anchor(date);
    }
    if let Some(view) = cli.view {
        app.set_view(view.into());
    }
    if let Some(page) = cli.page {
        app.page = page.into();
    }

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    info!("exiting");
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| render(frame, app))?;

        match event::next_event(Duration::from_millis(100))? {
            Some(AppEvent::Key(key)) => handle_key(app, key),
            Some(AppEvent::Resize(w, h)) => debug!(w, h, "resized"),
            None => {}
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let [tabs_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_tabs(frame, tabs_area, app.page);

    match app.page {
        Page::Calendar => render_calendar(frame, content_area, app),
        Page::Tasks => components::BoardView::render(
            frame,
            content_area,
            &app.tasks,
            app.input_mode == InputMode::Search,
        ),
    }

    match &app.form {
        Some(app::Form::Event(form)) => components::EventForm::render(frame, area, form),
        Some(app::Form::Task(form)) => components::TaskForm::render(frame, area, form),
        None => {}
    }

    if let Some(ev) = app.calendar.detail_event() {
        components::day_view::render_detail_popup(frame, area, ev);
    }

    if app.show_help {
        components::HelpPopup::render(frame, area);
    }

    components::StatusBar::render(frame, status_area, app);
}

fn render_tabs(frame: &mut Frame, area: Rect, page: Page) {
    let t = theme::current();
    let selected = match page {
        Page::Calendar => 0,
        Page::Tasks => 1,
    };
    let tabs = Tabs::new(vec![Line::from(" Calendar "), Line::from(" Tasks ")])
        .select(selected)
        .style(t.dim)
        .highlight_style(t.selected);
    frame.render_widget(tabs, area);
}

fn render_calendar(frame: &mut Frame, area: Rect, app: &App) {
    let cal = &app.calendar;
    let events = cal.store.events();

    match cal.view_mode {
        ViewMode::Month => {
            let grid = MonthGrid::build(cal.anchor, events);
            if area.width < 100 {
                components::MonthView::render(frame, area, &grid, cal.anchor, cal.today);
                return;
            }
            let [month_area, day_area] =
                Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                    .areas(area);
            components::MonthView::render(frame, month_area, &grid, cal.anchor, cal.today);
            components::DayView::render(
                frame,
                day_area,
                &TimeGrid::day(cal.anchor, events),
                app.hour_window,
                &cal.day_events(),
                cal.selected,
                cal.today,
            );
        }
        ViewMode::Week => components::WeekView::render(
            frame,
            area,
            &TimeGrid::week(cal.anchor, events),
            app.hour_window,
            cal.anchor,
            cal.today,
        ),
        ViewMode::Day => components::DayView::render(
            frame,
            area,
            &TimeGrid::day(cal.anchor, events),
            app.hour_window,
            &cal.day_events(),
            cal.selected,
            cal.today,
        ),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Clear status message on any key
    app.status_message = None;

    // Help overlay takes priority
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return;
    }

    // Detail popup next
    if app.calendar.detail.is_some() {
        match key.code {
            KeyCode::Esc => app.close_detail(),
            KeyCode::Char('e') => app.edit_detail_event(),
            KeyCode::Char('d') => app.delete_detail_event(),
            _ => {}
        }
        return;
    }

    match app.input_mode {
        InputMode::Form => handle_form_input(app, key.code),
        InputMode::Search => handle_search_input(app, key.code),
        InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
    }
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('?'), _) => app.show_help = true,
        (KeyCode::Tab, _) => app.switch_page(),
        _ => match app.page {
            Page::Calendar => handle_calendar_input(app, code),
            Page::Tasks => handle_tasks_input(app, code),
        },
    }
}

fn handle_calendar_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('1') => app.set_view(ViewMode::Month),
        KeyCode::Char('2') => app.set_view(ViewMode::Week),
        KeyCode::Char('3') => app.set_view(ViewMode::Day),
        KeyCode::Char('t') => app.go_to_today(),
        KeyCode::Char('n') => app.open_event_form(),
        KeyCode::Enter => app.show_detail(),
        KeyCode::Left | KeyCode::Char('h') => app.navigate(Direction::Prev),
        KeyCode::Right | KeyCode::Char('l') => app.navigate(Direction::Next),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_event(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_event(),
        _ => {}
    }
}

fn handle_tasks_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('v') => app.toggle_layout(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('n') => app.open_task_form(app.tasks.default_status),
        KeyCode::Char(' ') if app.tasks.drag.is_some() => app.end_drag(),
        KeyCode::Char(' ') => app.start_drag(),
        KeyCode::Esc => app.end_drag(),
        KeyCode::Enter => app.activate_selection(),
        KeyCode::Left | KeyCode::Char('h') => app.move_column(Direction::Prev),
        KeyCode::Right | KeyCode::Char('l') => app.move_column(Direction::Next),
        KeyCode::Down | KeyCode::Char('j') => app.move_row(Direction::Next),
        KeyCode::Up | KeyCode::Char('k') => app.move_row(Direction::Prev),
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(' ') => app.form_space(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.end_search(true),
        KeyCode::Enter => app.end_search(false),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_input(c),
        _ => {}
    }
}
