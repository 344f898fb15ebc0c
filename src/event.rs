use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Terminal input the run loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl AppEvent {
    /// Key releases and repeats are dropped so each press acts once.
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Wait up to `timeout` for the next event the app cares about.
pub fn next_event(timeout: Duration) -> color_eyre::Result<Option<AppEvent>> {
    loop {
        match poll_event(timeout)? {
            Some(ev) => {
                if let Some(ev) = AppEvent::from_terminal(ev) {
                    return Ok(Some(ev));
                }
            }
            None => return Ok(None),
        }
    }
}
