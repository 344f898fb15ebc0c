pub mod event;
pub mod grid;
pub mod seed;
pub mod store;

pub use event::{CalendarEvent, EventDraft, EventId};
pub use grid::{Direction, HourWindow, MonthCell, MonthGrid, TimeGrid, ViewMode};
pub use store::EventStore;
