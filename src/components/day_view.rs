use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::calendar::{CalendarEvent, HourWindow, TimeGrid};
use crate::components::WeekView;
use crate::theme;

pub struct DayView;

impl DayView {
    /// Agenda of the day's events beside its hour grid.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        grid: &TimeGrid,
        window: HourWindow,
        events: &[&CalendarEvent],
        selected: usize,
        today: NaiveDate,
    ) {
        let Some(&date) = grid.days.first() else {
            return;
        };

        if area.width >= 60 {
            let [agenda, hours] =
                Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .areas(area);
            render_agenda(frame, agenda, date, events, selected, grid.hidden_count(window));
            WeekView::render(frame, hours, grid, window, date, today);
        } else {
            render_agenda(frame, area, date, events, selected, grid.hidden_count(window));
        }
    }
}

fn render_agenda(
    frame: &mut Frame,
    area: Rect,
    date: NaiveDate,
    events: &[&CalendarEvent],
    selected: usize,
    hidden: usize,
) {
    let t = theme::current();
    let w = area.width as usize;

    let title = if w >= 30 {
        format!(" {} ", date.format("%A, %B %d"))
    } else {
        format!(" {} ", date.format("%m/%d"))
    };

    let mut counts = Vec::new();
    if !events.is_empty() {
        let n = events.len();
        counts.push(format!("{} event{}", n, if n == 1 { "" } else { "s" }));
    }
    if hidden > 0 {
        counts.push(format!("{} outside visible hours", hidden));
    }
    let count_str = if counts.is_empty() {
        String::new()
    } else {
        format!(" {} ", counts.join(", "))
    };

    let block = Block::default()
        .title(title)
        .title_style(t.header)
        .title_bottom(Line::from(Span::styled(count_str, t.dim)))
        .borders(Borders::ALL)
        .border_style(t.border);

    if events.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new("No events").style(t.dim), inner);
        return;
    }

    let items: Vec<ListItem> = events
        .iter()
        .enumerate()
        .map(|(i, ev)| {
            let item = format_event(ev);
            if i == selected {
                item.style(t.highlight)
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn format_event(ev: &CalendarEvent) -> ListItem<'static> {
    let t = theme::current();
    let tag_indicator = Span::styled("  ", Style::default().bg(t.tag_color(&ev.tag)));
    let time_span = Span::styled(
        format!(" {} ", ev.duration_display()),
        Style::default().add_modifier(Modifier::DIM),
    );
    let title_span = Span::styled(ev.title.clone(), Style::default());

    let mut spans = vec![tag_indicator, time_span, title_span];
    if !ev.guests.is_empty() {
        spans.push(Span::styled(format!(" ({} guests)", ev.guests.len()), t.dim));
    }

    ListItem::new(Line::from(spans))
}

/// Render the event detail popup overlay.
pub fn render_detail_popup(frame: &mut Frame, area: Rect, ev: &CalendarEvent) {
    let t = theme::current();
    let popup_w = area.width.clamp(30, 60);
    let popup_h = area.height.clamp(8, 16);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let color = t.tag_color(&ev.tag);
    let block = Block::default()
        .title(format!(" {} ", ev.title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("  ", Style::default().bg(color)),
            Span::styled(format!(" {}", ev.tag), Style::default()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Time: ", t.dim),
            Span::styled(ev.duration_display(), Style::default()),
        ]),
        Line::from(vec![
            Span::styled("Date: ", t.dim),
            Span::styled(ev.date.format("%A, %B %d, %Y").to_string(), Style::default()),
        ]),
    ];

    if !ev.guests.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Guests: ", t.dim),
            Span::styled(ev.guests.join(", "), Style::default()),
        ]));
    }

    if let Some(link) = ev.meeting_link.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Link: ", t.dim),
            Span::styled(link.to_string(), Style::default().add_modifier(Modifier::UNDERLINED)),
        ]));
    }

    if let Some(notes) = ev.description.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Notes:", t.dim)));
        lines.extend(notes.lines().map(|l| Line::from(l.to_string())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("e:Edit  d:Delete  Esc:Close", t.dim)));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::seed;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn agenda_lists_day_and_counts_hidden_events() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let all = seed::events();
        let grid = TimeGrid::day(date, &all);
        let events: Vec<&CalendarEvent> = all.iter().filter(|e| e.date == date).collect();
        let window = HourWindow { first: 10, last: 18 };

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| DayView::render(f, f.area(), &grid, window, &events, 0, date))
            .unwrap();
        let out: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(out.contains("Thursday, January 09"));
        assert!(out.contains("File taxes"));
        assert!(out.contains("1 outside visible hours"));
    }
}
