use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{CalendarEvent, HourWindow, TimeGrid};
use crate::theme;

pub struct WeekView;

impl WeekView {
    /// Draw the hour rows of `grid` that fall inside `window`, one column
    /// per day. Also used by the day view with a single-day grid.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &TimeGrid,
        window: HourWindow,
        selected_date: NaiveDate,
        today: NaiveDate,
    ) {
        let t = theme::current();
        let title = match grid.days.as_slice() {
            [day] => format!(" {} ", day.format("%A, %B %-d, %Y")),
            days => format!(
                " Week of {} ",
                days.first().unwrap_or(&selected_date).format("%b %d, %Y")
            ),
        };
        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        if inner.width < 10 || inner.height < 3 {
            frame.render_widget(block, area);
            return;
        }

        let day_count = grid.days.len().max(1) as u16;

        // Time label column width
        let time_col_w: u16 = if inner.width >= 70 { 6 } else { 4 };
        let day_cols_w = inner.width.saturating_sub(time_col_w);
        let col_w = (day_cols_w / day_count).max(1);

        let mut col_constraints = vec![Constraint::Length(time_col_w)];
        col_constraints.extend((0..day_count).map(|_| Constraint::Length(col_w)));
        col_constraints.push(Constraint::Min(0)); // absorb remainder
        let cols = Layout::horizontal(col_constraints).split(inner);

        // Reserve 1 row for day headers
        let content_rows = inner.height.saturating_sub(1) as usize;
        let total_hours = window.hour_count().max(1);
        let rows_per_hour = (content_rows / total_hours).max(1);
        let visible_hours = (content_rows / rows_per_hour).min(total_hours);

        // In-window hours that do not fit the area still count toward the footer.
        let clipped: usize = grid
            .visible_rows(window)
            .skip(visible_hours)
            .flat_map(|row| row.cells.iter())
            .map(Vec::len)
            .sum();
        let block = if clipped > 0 {
            block.title_bottom(Line::from(Span::styled(
                format!(" {} more below ", clipped),
                t.dim,
            )))
        } else {
            block
        };
        frame.render_widget(block, area);

        let mut row_constraints = vec![Constraint::Length(1)]; // day header
        row_constraints.extend((0..visible_hours).map(|_| Constraint::Length(rows_per_hour as u16)));
        row_constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(row_constraints).split(inner);

        for (i, date) in grid.days.iter().enumerate() {
            let Some(col) = cols.get(i + 1) else {
                break;
            };

            let day_label = if col_w >= 10 {
                date.format("%a %d").to_string()
            } else if col_w >= 5 {
                date.format("%a").to_string()
            } else {
                date.format("%d").to_string()
            };

            let style = if *date == today && *date == selected_date {
                t.today.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else if *date == selected_date {
                t.selected
            } else if *date == today {
                t.today
            } else {
                t.header
            };

            let label = Paragraph::new(Line::from(Span::styled(
                format!("{:^width$}", day_label, width = col_w as usize),
                style,
            )));
            frame.render_widget(label, col.intersection(rows[0]));
        }

        for (hour_idx, hour_row) in grid.visible_rows(window).take(visible_hours).enumerate() {
            let row_area = rows[hour_idx + 1];

            let time_label = if time_col_w >= 6 {
                format!("{:>2}:00 ", hour_row.hour)
            } else {
                format!("{:>2} ", hour_row.hour)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(time_label, t.dim)),
                cols[0].intersection(row_area),
            );

            for (day_idx, cell_events) in hour_row.cells.iter().enumerate() {
                let Some(col) = cols.get(day_idx + 1) else {
                    break;
                };
                let cell_area = col.intersection(row_area);
                if cell_area.is_empty() || cell_events.is_empty() {
                    continue;
                }
                render_cell(frame, cell_area, cell_events);
            }
        }
    }
}

/// One line per event that fits, with a `+N` line when some don't.
fn render_cell(frame: &mut Frame, area: Rect, events: &[&CalendarEvent]) {
    let t = theme::current();
    let width = area.width as usize;
    let room = area.height as usize;
    let shown = if events.len() > room { room.saturating_sub(1) } else { events.len() };

    let mut lines: Vec<Line> = events
        .iter()
        .take(shown)
        .map(|ev| {
            let title: String = ev.title.chars().take(width).collect();
            Line::from(Span::styled(
                format!("{:<width$}", title, width = width),
                Style::default().fg(Color::Black).bg(t.tag_color(&ev.tag)),
            ))
        })
        .collect();

    if shown < events.len() {
        let more = format!("+{} more", events.len() - shown);
        lines.push(Line::from(Span::styled(
            more.chars().take(width).collect::<String>(),
            t.dim,
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::seed;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(grid: &TimeGrid, window: HourWindow, anchor: NaiveDate) -> String {
        screen_sized(grid, window, anchor, 30)
    }

    fn screen_sized(grid: &TimeGrid, window: HourWindow, anchor: NaiveDate, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, height)).unwrap();
        terminal
            .draw(|f| WeekView::render(f, f.area(), grid, window, anchor, anchor))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn draws_events_inside_window_only() {
        let anchor = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
        let events = seed::events();
        let grid = TimeGrid::week(anchor, &events);

        let out = screen(&grid, HourWindow::default(), anchor);
        assert!(out.contains("Week of Jul 07, 2025"));
        assert!(out.contains("Weekly sync"));
        assert!(out.contains("19:00"));

        let narrow = screen(&grid, HourWindow { first: 12, last: 16 }, anchor);
        assert!(!narrow.contains("Weekly sync"));
        assert!(narrow.contains("Photoshoot"));
    }

    #[test]
    fn short_area_counts_events_below_the_last_row() {
        let anchor = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
        let events = seed::events();
        let grid = TimeGrid::week(anchor, &events);

        // Five hour rows fit (7:00 to 11:00), leaving the 14:00 and 15:00 events out.
        let out = screen_sized(&grid, HourWindow::default(), anchor, 8);
        assert!(out.contains("Weekly sync"));
        assert!(!out.contains("Photoshoot"));
        assert!(out.contains("2 more below"));

        let tall = screen(&grid, HourWindow::default(), anchor);
        assert!(!tall.contains("more below"));
    }
}
