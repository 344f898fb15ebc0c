use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::event::parse_date;
use crate::tasks::seed::TEAM;
use crate::tasks::{Priority, Status, TaskDraft};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskField {
    Title,
    List,
    Due,
    Priority,
    Assignee,
    Description,
}

impl TaskField {
    pub fn next(&self) -> Self {
        match self {
            TaskField::Title => TaskField::List,
            TaskField::List => TaskField::Due,
            TaskField::Due => TaskField::Priority,
            TaskField::Priority => TaskField::Assignee,
            TaskField::Assignee => TaskField::Description,
            TaskField::Description => TaskField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            TaskField::Title => TaskField::Description,
            TaskField::List => TaskField::Title,
            TaskField::Due => TaskField::List,
            TaskField::Priority => TaskField::Due,
            TaskField::Assignee => TaskField::Priority,
            TaskField::Description => TaskField::Assignee,
        }
    }

    fn is_choice(&self) -> bool {
        matches!(self, TaskField::List | TaskField::Priority | TaskField::Assignee)
    }
}

/// State of the create-task sheet. List, priority and assignee are picked
/// from fixed choices; the rest are free text.
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub status: Status,
    pub priority: Priority,
    /// Index into `TEAM`, `None` for unassigned.
    pub assignee: Option<usize>,
    pub active_field: TaskField,
}

impl TaskFormState {
    pub fn new(status: Status, today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: today.format("%Y-%m-%d").to_string(),
            status,
            priority: Priority::default(),
            assignee: None,
            active_field: TaskField::Title,
        }
    }

    pub fn assignee_name(&self) -> Option<&'static str> {
        self.assignee.and_then(|i| TEAM.get(i)).map(|(_, name)| *name)
    }

    /// `None` when the due date does not parse.
    pub fn to_draft(&self) -> Option<TaskDraft> {
        let mut draft = TaskDraft::new(&self.title, parse_date(&self.due_date)?);
        draft.description = self.description.clone();
        draft.priority = self.priority;
        draft.status = Some(self.status);
        draft.assignee = self.assignee_name().map(str::to_string);
        Some(draft)
    }

    /// Step the active choice field. Returns false on a text field.
    pub fn cycle_choice(&mut self) -> bool {
        match self.active_field {
            TaskField::List => self.status = self.status.next(),
            TaskField::Priority => self.priority = self.priority.next(),
            TaskField::Assignee => {
                self.assignee = match self.assignee {
                    None => Some(0),
                    Some(i) if i + 1 < TEAM.len() => Some(i + 1),
                    Some(_) => None,
                }
            }
            _ => return false,
        }
        true
    }

    fn active_buffer(&mut self) -> Option<&mut String> {
        match self.active_field {
            TaskField::Title => Some(&mut self.title),
            TaskField::Due => Some(&mut self.due_date),
            TaskField::Description => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(buf) = self.active_buffer() {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.active_buffer() {
            buf.pop();
        }
    }
}

pub struct TaskForm;

impl TaskForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &TaskFormState) {
        let t = theme::current();

        let form_w = area.width.clamp(30, 56);
        let form_h = area.height.clamp(9, 11);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h).intersection(area);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" New Task ")
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        let list = format!("< {} >", state.status.title());
        let priority = format!("< {} >", state.priority.label());
        let assignee = format!("< {} >", state.assignee_name().unwrap_or("Unassigned"));
        let fields = [
            (TaskField::Title, "Title:", state.title.as_str()),
            (TaskField::List, "List:", list.as_str()),
            (TaskField::Due, "Due:", state.due_date.as_str()),
            (TaskField::Priority, "Priority:", priority.as_str()),
            (TaskField::Assignee, "Assignee:", assignee.as_str()),
            (TaskField::Description, "Notes:", state.description.as_str()),
        ];
        for (i, (field, label, value)) in fields.into_iter().enumerate() {
            let active = state.active_field == field;
            if field.is_choice() {
                let style = if active { t.highlight } else { Style::default() };
                let line = Line::from(vec![
                    Span::styled(format!("{:<10}", label), t.dim),
                    Span::styled(value.to_string(), style),
                ]);
                frame.render_widget(Paragraph::new(line), rows[i]);
            } else {
                super::render_field(frame, rows[i], label, value, active);
            }
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", t.dim),
            Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Change ", t.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Create ", t.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", t.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[7]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TaskFormState {
        TaskFormState::new(Status::Todo, NaiveDate::from_ymd_opt(2025, 7, 9).unwrap())
    }

    #[test]
    fn choice_fields_ignore_typing() {
        let mut form = form();
        form.active_field = TaskField::Priority;
        form.input_char('x');
        assert!(form.cycle_choice());
        assert!(form.cycle_choice());
        assert_eq!(form.priority, Priority::High);

        form.active_field = TaskField::Title;
        assert!(!form.cycle_choice());
        form.input_char('x');
        assert_eq!(form.title, "x");
    }

    #[test]
    fn assignee_cycles_through_team_and_back_to_none() {
        let mut form = form();
        form.active_field = TaskField::Assignee;
        for _ in 0..TEAM.len() {
            form.cycle_choice();
        }
        assert_eq!(form.assignee_name(), Some("Sarah Wilson"));
        form.cycle_choice();
        assert_eq!(form.assignee_name(), None);
    }

    #[test]
    fn draft_carries_every_field() {
        let mut form = form();
        form.title = "Ship it".to_string();
        form.due_date = "2025-07-20".to_string();
        form.assignee = Some(1);
        form.active_field = TaskField::List;
        form.cycle_choice();

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.status, Some(Status::InProgress));
        assert_eq!(draft.assignee.as_deref(), Some("Jane Smith"));
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2025, 7, 20).unwrap());

        form.due_date = "next week".to_string();
        assert!(form.to_draft().is_none());
    }
}
