use chrono::{Datelike, Month, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{MonthCell, MonthGrid};
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &MonthGrid,
        selected_date: NaiveDate,
        today: NaiveDate,
    ) {
        let t = theme::current();
        let month = u8::try_from(grid.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("Unknown", |m| m.name());
        let title = format!(" {} {} ", month, grid.year);

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 14 || inner.height < 2 {
            return;
        }

        let col_w = inner.width / 7;
        let weeks: Vec<&[MonthCell]> = grid.weeks().collect();
        let rows_per_week = (inner.height.saturating_sub(1) / weeks.len().max(1) as u16).max(1);

        let mut constraints = vec![Constraint::Length(1)]; // header
        constraints.extend(weeks.iter().map(|_| Constraint::Length(rows_per_week)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        let cols = Layout::horizontal([Constraint::Length(col_w); 7]).split(inner);

        for (i, name) in DAY_NAMES.iter().enumerate() {
            let label = Paragraph::new(Span::styled(
                format!("{:^width$}", name, width = col_w as usize),
                t.header,
            ));
            frame.render_widget(label, cols[i].intersection(rows[0]));
        }

        for (w, week) in weeks.iter().enumerate() {
            let Some(row) = rows.get(w + 1) else {
                break;
            };
            for (d, cell) in week.iter().enumerate() {
                let cell_area = cols[d].intersection(*row);
                if cell_area.is_empty() {
                    continue;
                }
                render_cell(frame, cell_area, cell, selected_date, today);
            }
        }
    }
}

fn render_cell(
    frame: &mut Frame,
    area: Rect,
    cell: &MonthCell,
    selected_date: NaiveDate,
    today: NaiveDate,
) {
    let t = theme::current();
    let Some(date) = cell.date() else {
        return;
    };
    let events = cell.events();
    let width = area.width as usize;

    let style = if date == today && date == selected_date {
        t.today.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if date == selected_date {
        t.selected
    } else if date == today {
        t.today
    } else {
        Style::default()
    };

    // Room for event titles under the day number
    let title_rows = (area.height as usize).saturating_sub(1);
    let overflow = events.len().saturating_sub(title_rows);

    let marker = match (events.len(), title_rows) {
        (0, _) => String::new(),
        (n, 0) => format!("\u{2022}{}", n),
        (_, _) if overflow > 0 => format!("+{}", overflow),
        _ => String::new(),
    };
    let head = format!(
        "{:>2} {:<rest$}",
        date.day(),
        marker,
        rest = width.saturating_sub(3)
    );

    let mut lines = vec![Line::from(Span::styled(truncate(&head, width), style))];
    for ev in events.iter().take(title_rows) {
        lines.push(Line::from(Span::styled(
            truncate(&ev.title, width.saturating_sub(1)),
            Style::default().fg(Color::Black).bg(t.tag_color(&ev.tag)),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::seed;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(width: u16, height: u16, anchor: NaiveDate) -> String {
        let events = seed::events();
        let grid = MonthGrid::build(anchor, &events);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| MonthView::render(f, f.area(), &grid, anchor, anchor))
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
    fn header_starts_on_monday() {
        let out = screen(70, 20, NaiveDate::from_ymd_opt(2025, 7, 9).unwrap());
        assert!(out.contains("July 2025"));
        let mon = out.find("Mon").unwrap();
        let sun = out.find("Sun").unwrap();
        assert!(mon < sun);
    }

    #[test]
    fn tall_cells_show_event_titles() {
        let out = screen(140, 40, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert!(out.contains("January 2025"));
        assert!(out.contains("Gia"));
    }

    #[test]
    fn title_uses_full_month_name() {
        for (month, name) in [(2, "February"), (9, "September"), (12, "December")] {
            let out = screen(70, 20, NaiveDate::from_ymd_opt(2025, month, 1).unwrap());
            assert!(out.contains(&format!("{} 2025", name)), "missing {}", name);
        }
    }
}
