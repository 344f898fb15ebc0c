use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const CALENDAR_KEYS: &[(&str, &str)] = &[
    ("h/l", "Previous/next month, week or day"),
    ("t", "Jump to today"),
    ("1/2/3", "Month / Week / Day view"),
    ("j/k", "Select event on the day"),
    ("Enter", "Event details (e:Edit d:Delete)"),
    ("n", "New event"),
];

const TASK_KEYS: &[(&str, &str)] = &[
    ("hjkl", "Move the cursor"),
    ("Space", "Pick up / drop the card"),
    ("Esc", "Stop dragging"),
    ("v", "Board / list layout"),
    ("/", "Search tasks"),
    ("n", "New task"),
];

pub struct HelpPopup;

impl HelpPopup {
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_w = area.width.clamp(30, 56);
        let popup_h = area.height.clamp(12, 22);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keybindings ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut lines = vec![Line::from(Span::styled("Calendar", section_style))];
        lines.extend(CALENDAR_KEYS.iter().map(|&(k, d)| key_line(k, d)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Tasks", section_style)));
        lines.extend(TASK_KEYS.iter().map(|&(k, d)| key_line(k, d)));
        lines.push(Line::from(""));
        lines.push(key_line("Tab", "Switch page"));
        lines.push(Line::from(vec![
            Span::styled("  q", key_style()),
            Span::styled(" / ", theme::current().dim),
            Span::styled("Esc     ", key_style()),
            Span::styled("Quit / close popup", Style::default()),
        ]));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

fn key_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), key_style()),
        Span::styled(desc, Style::default()),
    ])
}
