use std::fmt;

use chrono::NaiveDate;
use tracing::info;

use super::event::{CalendarEvent, EventDraft, EventId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    BlankTitle,
    EndsBeforeStart,
    DuplicateId(EventId),
    NotFound(EventId),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::BlankTitle => write!(f, "event title is blank"),
            EventError::EndsBeforeStart => write!(f, "event ends before it starts"),
            EventError::DuplicateId(id) => write!(f, "event id {} is already in use", id),
            EventError::NotFound(id) => write!(f, "no event with id {}", id),
        }
    }
}

impl std::error::Error for EventError {}

/// The calendar page's events, in insertion order.
///
/// Every mutation returns a new store and leaves `self` as it was, so callers
/// swap snapshots rather than editing in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    pub fn max_id(&self) -> u64 {
        self.events.iter().map(|e| e.id.0).max().unwrap_or(0)
    }

    pub fn create_event(&self, draft: EventDraft, id: EventId) -> Result<Self, EventError> {
        validate(&draft)?;
        if self.get(id).is_some() {
            return Err(EventError::DuplicateId(id));
        }

        let event = draft.into_event(id);
        info!(id = %event.id, title = %event.title, date = %event.date, "event created");

        let mut events = self.events.clone();
        events.push(event);
        Ok(Self { events })
    }

    /// Replace an event's fields, keeping its id and position.
    pub fn update_event(&self, id: EventId, draft: EventDraft) -> Result<Self, EventError> {
        validate(&draft)?;
        let idx = self.position(id)?;

        let mut events = self.events.clone();
        events[idx] = draft.into_event(id);
        info!(id = %id, "event updated");
        Ok(Self { events })
    }

    pub fn delete_event(&self, id: EventId) -> Result<Self, EventError> {
        let idx = self.position(id)?;

        let mut events = self.events.clone();
        let removed = events.remove(idx);
        info!(id = %id, title = %removed.title, "event deleted");
        Ok(Self { events })
    }

    fn position(&self, id: EventId) -> Result<usize, EventError> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or(EventError::NotFound(id))
    }
}

fn validate(draft: &EventDraft) -> Result<(), EventError> {
    if draft.title.trim().is_empty() {
        return Err(EventError::BlankTitle);
    }
    if draft.end < draft.start {
        return Err(EventError::EndsBeforeStart);
    }
    Ok(())
}
