//! Month, week and day grids for the calendar page.
//!
//! Grids borrow events from the store and never reorder them: events that
//! share a cell come out in store insertion order.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Deserialize;

use super::event::CalendarEvent;

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    Week,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Shift the anchor by one unit of the active view: a month, 7 days or 1 day.
///
/// Month steps clamp the day to the target month's length, so Jan 31 moves to
/// the last day of February. Out-of-range results leave the anchor unchanged.
pub fn navigate(anchor: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    let shifted = match (mode, direction) {
        (ViewMode::Month, Direction::Next) => anchor.checked_add_months(Months::new(1)),
        (ViewMode::Month, Direction::Prev) => anchor.checked_sub_months(Months::new(1)),
        (ViewMode::Week, Direction::Next) => anchor.checked_add_days(Days::new(7)),
        (ViewMode::Week, Direction::Prev) => anchor.checked_sub_days(Days::new(7)),
        (ViewMode::Day, Direction::Next) => anchor.succ_opt(),
        (ViewMode::Day, Direction::Prev) => anchor.pred_opt(),
    };
    shifted.unwrap_or(anchor)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| {
            let next = first.checked_add_months(Months::new(1))?;
            Some(next.signed_duration_since(first).num_days() as u32)
        })
        .unwrap_or(0)
}

/// Placeholder cells before day 1 in a Monday-first week, in `0..=6`.
pub fn leading_offset(year: i32, month: u32) -> usize {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| (first.weekday().num_days_from_sunday() as usize + 6) % 7)
        .unwrap_or(0)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonthCell<'a> {
    Placeholder,
    Day {
        date: NaiveDate,
        events: Vec<&'a CalendarEvent>,
    },
}

impl<'a> MonthCell<'a> {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            MonthCell::Placeholder => None,
            MonthCell::Day { date, .. } => Some(*date),
        }
    }

    pub fn events(&self) -> &[&'a CalendarEvent] {
        match self {
            MonthCell::Placeholder => &[],
            MonthCell::Day { events, .. } => events.as_slice(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub fn build(anchor: NaiveDate, events: &'a [CalendarEvent]) -> Self {
        let year = anchor.year();
        let month = anchor.month();

        let mut cells: Vec<MonthCell<'a>> = (0..leading_offset(year, month))
            .map(|_| MonthCell::Placeholder)
            .collect();

        for day in 1..=days_in_month(year, month) {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            let day_events = events.iter().filter(|ev| ev.date == date).collect();
            cells.push(MonthCell::Day {
                date,
                events: day_events,
            });
        }

        Self { year, month, cells }
    }

    /// Cells grouped seven at a time; the last week may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell<'a>]> {
        self.cells.chunks(7)
    }
}

/// Inclusive range of hours drawn by the week and day views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    pub first: u32,
    pub last: u32,
}

impl Default for HourWindow {
    fn default() -> Self {
        Self { first: 7, last: 19 }
    }
}

impl HourWindow {
    pub fn contains(&self, hour: u32) -> bool {
        (self.first..=self.last).contains(&hour)
    }

    pub fn hour_count(&self) -> usize {
        (self.last + 1).saturating_sub(self.first) as usize
    }
}

#[derive(Debug, Clone)]
pub struct HourRow<'a> {
    pub hour: u32,
    /// One bucket per day column, in column order.
    pub cells: Vec<Vec<&'a CalendarEvent>>,
}

/// Day columns crossed with the 24 hour rows. Used for both week and day mode.
#[derive(Debug, Clone)]
pub struct TimeGrid<'a> {
    pub days: Vec<NaiveDate>,
    pub rows: Vec<HourRow<'a>>,
}

impl<'a> TimeGrid<'a> {
    pub fn week(anchor: NaiveDate, events: &'a [CalendarEvent]) -> Self {
        let start = week_start(anchor);
        let days = start.iter_days().take(7).collect();
        Self::for_days(days, events)
    }

    pub fn day(anchor: NaiveDate, events: &'a [CalendarEvent]) -> Self {
        Self::for_days(vec![anchor], events)
    }

    fn for_days(days: Vec<NaiveDate>, events: &'a [CalendarEvent]) -> Self {
        let rows = (0..HOURS_PER_DAY)
            .map(|hour| HourRow {
                hour,
                cells: days
                    .iter()
                    .map(|day| {
                        events
                            .iter()
                            .filter(|ev| ev.date == *day && ev.start_hour() == hour)
                            .collect()
                    })
                    .collect(),
            })
            .collect();
        Self { days, rows }
    }

    pub fn visible_rows(&self, window: HourWindow) -> impl Iterator<Item = &HourRow<'a>> {
        self.rows.iter().filter(move |r| window.contains(r.hour))
    }

    /// Events in this grid that the window leaves out.
    pub fn hidden_count(&self, window: HourWindow) -> usize {
        self.rows
            .iter()
            .filter(|r| !window.contains(r.hour))
            .map(|r| r.cells.iter().map(Vec::len).sum::<usize>())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::{EventDraft, EventId};
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cell_events<'g, 'a>(grid: &'g MonthGrid<'a>, day: NaiveDate) -> &'g [&'a CalendarEvent] {
        let cell = grid.cells.iter().find(|c| c.date() == Some(day));
        cell.map(MonthCell::events).unwrap_or_default()
    }

    fn event(id: u64, on: NaiveDate, hour: u32) -> CalendarEvent {
        let mut draft = EventDraft::on(on);
        draft.title = format!("event {id}");
        draft.start = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
        draft.end = NaiveTime::from_hms_opt(hour, 30, 0).unwrap();
        draft.into_event(EventId(id))
    }

    #[test]
    fn month_cell_count_is_offset_plus_days() {
        for year in [2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let offset = leading_offset(year, month);
                assert!(offset <= 6);
                let grid = MonthGrid::build(date(year, month, 1), &[]);
                assert_eq!(
                    grid.cells.len(),
                    offset + days_in_month(year, month) as usize,
                    "{year}-{month}"
                );
            }
        }
    }

    #[test]
    fn month_layout_is_monday_first() {
        // 2025-06-01 is a Sunday, 2025-09-01 a Monday.
        assert_eq!(leading_offset(2025, 6), 6);
        assert_eq!(leading_offset(2025, 9), 0);
        // 2025-07-01 is a Tuesday.
        assert_eq!(leading_offset(2025, 7), 1);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn each_event_lands_in_exactly_one_month_cell() {
        let events: Vec<CalendarEvent> = (1..=31)
            .step_by(3)
            .map(|d| event(d as u64, date(2025, 7, d), 9))
            .chain([event(100, date(2025, 8, 1), 9)])
            .collect();
        let grid = MonthGrid::build(date(2025, 7, 15), &events);

        for ev in events.iter().filter(|e| e.date.month() == 7) {
            let hits: Vec<_> = grid
                .cells
                .iter()
                .filter(|c| c.events().iter().any(|e| e.id == ev.id))
                .collect();
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].date(), Some(ev.date));
        }
        assert!(grid
            .cells
            .iter()
            .all(|c| c.events().iter().all(|e| e.id != EventId(100))));
    }

    #[test]
    fn shared_cells_keep_insertion_order() {
        let day = date(2025, 7, 9);
        let events = vec![event(3, day, 14), event(1, day, 8), event(2, day, 8)];

        let month = MonthGrid::build(day, &events);
        let ids: Vec<u64> = cell_events(&month, day).iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let week = TimeGrid::week(day, &events);
        let col = week.days.iter().position(|d| *d == day).unwrap();
        let ids: Vec<u64> = week.rows[8].cells[col].iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn july_anchor_scenario() {
        let anchor = date(2025, 7, 9);
        let events = vec![event(1, anchor, 8)];

        let month = MonthGrid::build(anchor, &events);
        assert_eq!(cell_events(&month, anchor).len(), 1);

        let week = TimeGrid::week(anchor, &events);
        assert_eq!(week.days[0], date(2025, 7, 7));
        assert_eq!(week.days.len(), 7);
        // Wednesday column.
        assert_eq!(week.rows[8].cells[2].len(), 1);
        assert!(week.rows.iter().filter(|r| r.hour != 8).all(|r| r.cells[2].is_empty()));

        let day = TimeGrid::day(anchor, &events);
        assert_eq!(day.days, vec![anchor]);
        assert_eq!(day.rows[8].cells[0].len(), 1);
    }

    #[test]
    fn window_hides_early_and_late_events() {
        let day = date(2025, 7, 9);
        let events = vec![event(1, day, 6), event(2, day, 7), event(3, day, 19), event(4, day, 22)];
        let grid = TimeGrid::day(day, &events);
        let window = HourWindow::default();

        let shown: Vec<u64> = grid
            .visible_rows(window)
            .flat_map(|r| r.cells[0].iter().map(|e| e.id.0))
            .collect();
        assert_eq!(shown, vec![2, 3]);
        assert_eq!(grid.hidden_count(window), 2);
        assert_eq!(grid.visible_rows(window).count(), window.hour_count());
    }

    #[test]
    fn week_start_is_monday() {
        assert_eq!(week_start(date(2025, 7, 13)), date(2025, 7, 7));
        assert_eq!(week_start(date(2025, 7, 7)), date(2025, 7, 7));
        // Crosses a year boundary.
        assert_eq!(week_start(date(2025, 1, 1)), date(2024, 12, 30));
    }

    #[test]
    fn fifty_two_weeks_forward_is_364_days() {
        let monday = date(2025, 7, 7);
        let mut anchor = monday;
        for _ in 0..52 {
            anchor = navigate(anchor, ViewMode::Week, Direction::Next);
        }
        assert_eq!(anchor.signed_duration_since(monday).num_days(), 364);
        assert_eq!(anchor.weekday(), Weekday::Mon);
    }

    #[test]
    fn navigation_rolls_over_boundaries() {
        assert_eq!(navigate(date(2025, 12, 15), ViewMode::Month, Direction::Next), date(2026, 1, 15));
        assert_eq!(navigate(date(2025, 1, 15), ViewMode::Month, Direction::Prev), date(2024, 12, 15));
        assert_eq!(navigate(date(2025, 1, 31), ViewMode::Month, Direction::Next), date(2025, 2, 28));
        assert_eq!(navigate(date(2024, 12, 31), ViewMode::Day, Direction::Next), date(2025, 1, 1));
        assert_eq!(navigate(date(2025, 3, 1), ViewMode::Day, Direction::Prev), date(2025, 2, 28));
        assert_eq!(navigate(date(2025, 12, 29), ViewMode::Week, Direction::Next), date(2026, 1, 5));
    }
}
