use chrono::{NaiveDate, NaiveTime};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::event::{parse_date, parse_time};
use crate::calendar::{CalendarEvent, EventDraft, EventId};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFormMode {
    Create,
    Edit(EventId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Date,
    StartTime,
    EndTime,
    Tag,
    Guests,
    Link,
    Description,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Date,
            FormField::Date => FormField::StartTime,
            FormField::StartTime => FormField::EndTime,
            FormField::EndTime => FormField::Tag,
            FormField::Tag => FormField::Guests,
            FormField::Guests => FormField::Link,
            FormField::Link => FormField::Description,
            FormField::Description => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Date => FormField::Title,
            FormField::StartTime => FormField::Date,
            FormField::EndTime => FormField::StartTime,
            FormField::Tag => FormField::EndTime,
            FormField::Guests => FormField::Tag,
            FormField::Link => FormField::Guests,
            FormField::Description => FormField::Link,
        }
    }
}

/// Text buffers behind the create/edit event sheet.
#[derive(Debug, Clone)]
pub struct EventFormState {
    pub mode: EventFormMode,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub tag: String,
    /// Comma-separated guest names.
    pub guests: String,
    pub link: String,
    pub description: String,
    pub active_field: FormField,
}

impl EventFormState {
    pub fn new(date: NaiveDate) -> Self {
        Self::from_draft(EventFormMode::Create, &EventDraft::on(date))
    }

    pub fn edit(ev: &CalendarEvent) -> Self {
        Self::from_draft(EventFormMode::Edit(ev.id), &EventDraft::from(ev))
    }

    fn from_draft(mode: EventFormMode, draft: &EventDraft) -> Self {
        Self {
            mode,
            title: draft.title.clone(),
            date: draft.date.format("%Y-%m-%d").to_string(),
            start_time: draft.start.format("%H:%M").to_string(),
            end_time: draft.end.format("%H:%M").to_string(),
            tag: draft.tag.clone(),
            guests: draft.guests.join(", "),
            link: draft.meeting_link.clone().unwrap_or_default(),
            description: draft.description.clone().unwrap_or_default(),
            active_field: FormField::Title,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn parsed_start_time(&self) -> Option<NaiveTime> {
        parse_time(&self.start_time)
    }

    pub fn parsed_end_time(&self) -> Option<NaiveTime> {
        parse_time(&self.end_time)
    }

    /// `None` when the date or a time does not parse.
    pub fn to_draft(&self) -> Option<EventDraft> {
        let guests = self
            .guests
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        let tag = match self.tag.trim() {
            "" => "blue".to_string(),
            tag => tag.to_string(),
        };

        Some(EventDraft {
            title: self.title.clone(),
            date: self.parsed_date()?,
            start: self.parsed_start_time()?,
            end: self.parsed_end_time()?,
            tag,
            description: Some(self.description.clone()),
            guests,
            meeting_link: Some(self.link.clone()),
        })
    }

    fn active_buffer(&mut self) -> &mut String {
        match self.active_field {
            FormField::Title => &mut self.title,
            FormField::Date => &mut self.date,
            FormField::StartTime => &mut self.start_time,
            FormField::EndTime => &mut self.end_time,
            FormField::Tag => &mut self.tag,
            FormField::Guests => &mut self.guests,
            FormField::Link => &mut self.link,
            FormField::Description => &mut self.description,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.active_buffer().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_buffer().pop();
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &EventFormState) {
        let t = theme::current();

        // Center the form popup
        let form_w = area.width.clamp(30, 56);
        let form_h = area.height.clamp(10, 14);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h).intersection(area);

        // Clear background
        frame.render_widget(Clear, form_area);

        let title = match state.mode {
            EventFormMode::Create => " New Event ",
            EventFormMode::Edit(_) => " Edit Event ",
        };
        let tag_color = t.tag_color(&state.tag);
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(tag_color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(tag_color));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // date
            Constraint::Length(1), // start time
            Constraint::Length(1), // end time
            Constraint::Length(1), // tag
            Constraint::Length(1), // guests
            Constraint::Length(1), // link
            Constraint::Length(1), // description
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let fields = [
            (FormField::Title, "Title:", &state.title),
            (FormField::Date, "Date:", &state.date),
            (FormField::StartTime, "Start:", &state.start_time),
            (FormField::EndTime, "End:", &state.end_time),
            (FormField::Tag, "Tag:", &state.tag),
            (FormField::Guests, "Guests:", &state.guests),
            (FormField::Link, "Link:", &state.link),
            (FormField::Description, "Notes:", &state.description),
        ];
        for (i, (field, label, value)) in fields.into_iter().enumerate() {
            super::render_field(frame, rows[i], label, value, state.active_field == field);
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", t.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", t.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", t.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[9]);
    }
}
