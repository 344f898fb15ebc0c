use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Free-form category label, only used to pick a color.
    pub tag: String,
    pub description: Option<String>,
    pub guests: Vec<String>,
    pub meeting_link: Option<String>,
}

impl CalendarEvent {
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    pub fn duration_display(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// The editable fields of an event, as submitted by the event sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub tag: String,
    pub description: Option<String>,
    pub guests: Vec<String>,
    pub meeting_link: Option<String>,
}

impl EventDraft {
    /// Sheet defaults: 09:00 to 10:00, blue tag.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            date,
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            tag: "blue".to_string(),
            description: None,
            guests: Vec::new(),
            meeting_link: None,
        }
    }

    pub fn into_event(self, id: EventId) -> CalendarEvent {
        CalendarEvent {
            id,
            title: self.title.trim().to_string(),
            date: self.date,
            start: self.start,
            end: self.end,
            tag: self.tag,
            description: self.description.filter(|d| !d.trim().is_empty()),
            guests: self.guests,
            meeting_link: self.meeting_link.filter(|l| !l.trim().is_empty()),
        }
    }
}

impl From<&CalendarEvent> for EventDraft {
    fn from(ev: &CalendarEvent) -> Self {
        Self {
            title: ev.title.clone(),
            date: ev.date,
            start: ev.start,
            end: ev.end,
            tag: ev.tag.clone(),
            description: ev.description.clone(),
            guests: ev.guests.clone(),
            meeting_link: ev.meeting_link.clone(),
        }
    }
}

/// Parse a time of day. Accepts `HH:MM` and the 12-hour `h:mmam` / `h:mm pm` forms.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Some(t);
    }
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    NaiveTime::parse_from_str(&compact, "%I:%M%p").ok()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
