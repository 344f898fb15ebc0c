use chrono::TimeDelta;

use super::event::{parse_date, parse_time, CalendarEvent, EventId};

// (title, start, date, tag)
const SEED: &[(&str, &str, &str, &str)] = &[
    ("Project kickoff", "9:45am", "2025-01-01", "meeting"),
    ("Break", "12:00pm", "2025-01-03", "break"),
    ("Sales Meeting", "03:30pm", "2025-01-04", "meeting"),
    ("Mark's game", "8:00am", "2025-01-05", "personal"),
    ("Weekly sync", "8:30am", "2025-01-07", "meeting"),
    ("Break", "8:00am", "2025-01-09", "break"),
    ("File taxes", "11:00am", "2025-01-09", "task"),
    ("Sales Meeting", "03:30pm", "2025-01-10", "meeting"),
    ("Meet accounting", "8:30am", "2025-01-14", "meeting"),
    ("Gia's birthday", "04:00pm", "2025-01-15", "personal"),
    ("Break", "12:00pm", "2025-01-17", "break"),
    ("Meet accounting", "8:30am", "2025-01-18", "meeting"),
    ("Weekly sync", "8:30am", "2025-07-07", "meeting"),
    ("Project kickoff", "9:45am", "2025-07-08", "meeting"),
    ("Break", "8:00am", "2025-07-09", "break"),
    ("File taxes", "11:00am", "2025-07-09", "task"),
    ("Photoshoot", "02:30pm", "2025-07-10", "personal"),
    ("Sales Meeting", "03:30pm", "2025-07-11", "meeting"),
];

/// Demo events shown on first launch. Each runs for an hour.
pub fn events() -> Vec<CalendarEvent> {
    SEED.iter()
        .zip(1u64..)
        .filter_map(|(&(title, start, date, tag), id)| {
            let start = parse_time(start)?;
            let (end, _) = start.overflowing_add_signed(TimeDelta::hours(1));
            Some(CalendarEvent {
                id: EventId(id),
                title: title.to_string(),
                date: parse_date(date)?,
                start,
                end: end.max(start),
                tag: tag.to_string(),
                description: None,
                guests: Vec::new(),
                meeting_link: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_seed_row_parses() {
        let events = events();
        assert_eq!(events.len(), SEED.len());
        assert!(events.iter().all(|e| e.end > e.start));
    }

    #[test]
    fn seed_ids_are_unique() {
        let events = events();
        let ids: std::collections::HashSet<EventId> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), events.len());
    }
}
