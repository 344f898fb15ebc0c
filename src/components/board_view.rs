use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{BoardLayout, TasksPage};
use crate::tasks::{Status, Task};
use crate::theme;

pub struct BoardView;

impl BoardView {
    pub fn render(frame: &mut Frame, area: Rect, page: &TasksPage, searching: bool) {
        let [search, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        render_search(frame, search, &page.query, searching);

        match page.layout {
            BoardLayout::Board => render_columns(frame, body, page),
            BoardLayout::List => render_list(frame, body, page),
        }
    }
}

fn render_search(frame: &mut Frame, area: Rect, query: &str, searching: bool) {
    let t = theme::current();
    let line = if searching {
        Line::from(vec![
            Span::styled(" / ", t.header),
            Span::raw(query.to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if query.is_empty() {
        Line::from(Span::styled(" /:Search tasks", t.dim))
    } else {
        Line::from(vec![
            Span::styled(" Filter: ", t.dim),
            Span::raw(query.to_string()),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_columns(frame: &mut Frame, area: Rect, page: &TasksPage) {
    let t = theme::current();
    let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    for (i, status) in Status::ALL.into_iter().enumerate() {
        let tasks = page.board.column(status, &page.query);
        let focused = i == page.column;

        let block = Block::default()
            .title(format!(" {} ({}) ", status.title(), tasks.len()))
            .title_style(if focused { t.selected } else { t.header })
            .borders(Borders::ALL)
            .border_style(if focused { t.header } else { t.border });

        if page.board.shows_create_affordance(status, &page.query) {
            let inner = block.inner(cols[i]);
            frame.render_widget(block, cols[i]);
            let style = if focused { t.highlight } else { t.dim };
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("+ Create task", style)),
            ])
            .centered();
            frame.render_widget(hint, inner);
            continue;
        }

        let items: Vec<ListItem> = tasks
            .iter()
            .enumerate()
            .map(|(row, task)| {
                let cursor = focused && row == page.row;
                card(task, cursor, page.dragging() == Some(task.id))
            })
            .collect();
        frame.render_widget(List::new(items).block(block), cols[i]);
    }
}

fn render_list(frame: &mut Frame, area: Rect, page: &TasksPage) {
    let t = theme::current();
    let tasks = page.visible();
    let total = page.board.tasks().len();
    let title = if tasks.len() == total {
        format!(" All tasks ({}) ", total)
    } else {
        format!(" Tasks ({} of {}) ", tasks.len(), total)
    };

    let block = Block::default()
        .title(title)
        .title_style(t.header)
        .borders(Borders::ALL)
        .border_style(t.border);

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(row, task)| {
            let dragging = page.dragging() == Some(task.id);
            let style = if dragging {
                t.dragging
            } else if row == page.row {
                t.highlight
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<14}", task.status.title()), t.dim),
                Span::styled(format!("{:<7}", task.priority.label()), t.priority_style(task.priority)),
                Span::raw(task.title.clone()),
                Span::styled(format!("  {}", task.due_display()), t.dim),
                Span::styled(format!("  {}", names(task)), t.dim),
            ]))
            .style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// A three-line card: title, description, then due date, assignees and priority.
fn card(task: &Task, cursor: bool, dragging: bool) -> ListItem<'static> {
    let t = theme::current();
    let style = if dragging {
        t.dragging
    } else if cursor {
        t.highlight
    } else {
        Style::default()
    };

    ListItem::new(vec![
        Line::from(Span::styled(
            task.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(task.description.clone(), t.dim)),
        Line::from(vec![
            Span::styled(task.due_display(), t.dim),
            Span::raw(" "),
            Span::raw(initials(task)),
            Span::raw(" "),
            Span::styled(task.priority.label(), t.priority_style(task.priority)),
        ]),
        Line::from(""),
    ])
    .style(style)
}

fn names(task: &Task) -> String {
    task.assignees
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn initials(task: &Task) -> String {
    task.assignees
        .iter()
        .map(|a| a.initials.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
