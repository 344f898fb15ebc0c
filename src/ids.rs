use chrono::Utc;

/// Hands out ids from the wall clock, in milliseconds since the Unix epoch.
///
/// Readings that do not advance past the last issued id are bumped by one, so
/// ids from a single generator are strictly increasing even when several are
/// requested within the same millisecond.
#[derive(Debug, Default)]
pub struct IdClock {
    last: u64,
}

impl IdClock {
    /// Start above every id already in use (seed data uses small integers).
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}
