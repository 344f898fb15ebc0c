use std::collections::BTreeMap;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use tracing::debug;

use crate::tasks::Priority;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from the config. Only the first call wins.
pub fn init(theme: Theme) {
    if let Err(ignored) = THEME.set(theme) {
        debug!(theme = %ignored.name, "theme already set, keeping the first one");
    }
}

/// Get the active theme, falling back to the default palette.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    /// Card being dragged on the task board.
    pub dragging: Style,
    /// Color for events whose tag has no entry in `tags`.
    pub event: Color,
    pub tags: BTreeMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            dragging: Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
            event: Color::Cyan,
            tags: default_tags(),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    pub fn tag_color(&self, tag: &str) -> Color {
        self.tags
            .get(&tag.to_lowercase())
            .copied()
            .unwrap_or(self.event)
    }

    pub fn priority_style(&self, priority: Priority) -> Style {
        let color = match priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Rgb(255, 165, 0),
            Priority::Low => Color::Blue,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)),
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            highlight: Style::default()
                .bg(Color::Rgb(68, 71, 90))
                .add_modifier(Modifier::BOLD),
            dragging: Style::default().fg(Color::Black).bg(Color::Rgb(80, 250, 123)),
            event: Color::Rgb(255, 121, 198),
            tags: default_tags(),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)),
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            highlight: Style::default()
                .bg(Color::Rgb(80, 73, 69))
                .add_modifier(Modifier::BOLD),
            dragging: Style::default().fg(Color::Black).bg(Color::Rgb(184, 187, 38)),
            event: Color::Rgb(254, 128, 25),
            tags: default_tags(),
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            highlight: Style::default()
                .bg(Color::Rgb(67, 76, 94))
                .add_modifier(Modifier::BOLD),
            dragging: Style::default().fg(Color::Black).bg(Color::Rgb(163, 190, 140)),
            event: Color::Rgb(129, 161, 193),
            tags: default_tags(),
        }
    }
}

fn default_tags() -> BTreeMap<String, Color> {
    [
        ("meeting", Color::Blue),
        ("break", Color::Green),
        ("personal", Color::Magenta),
        ("task", Color::Red),
        ("blue", Color::Blue),
        ("green", Color::Green),
        ("orange", Color::Rgb(249, 115, 22)),
        ("purple", Color::Rgb(168, 85, 247)),
        ("red", Color::Red),
        ("yellow", Color::Yellow),
    ]
    .into_iter()
    .map(|(tag, color)| (tag.to_string(), color))
    .collect()
}

// ── TOML config types ──

/// The `[theme]` table of the config file.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub highlight_bg: Option<String>,
    pub event_fg: Option<String>,
}

impl ThemeConfig {
    /// Build the theme, with `tags` overriding the per-tag event colors.
    pub fn into_theme(self, tags: &BTreeMap<String, String>) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let overrides = [
            (&self.today_fg, &mut theme.today),
            (&self.selected_fg, &mut theme.selected),
            (&self.header_fg, &mut theme.header),
            (&self.dim_fg, &mut theme.dim),
            (&self.border_fg, &mut theme.border),
            (&self.status_fg, &mut theme.status),
        ];
        for (value, style) in overrides {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *style = style.fg(c);
            }
        }

        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.highlight_bg.as_deref().and_then(parse_color) {
            theme.highlight = theme.highlight.bg(c);
        }
        if let Some(c) = self.event_fg.as_deref().and_then(parse_color) {
            theme.event = c;
        }

        for (tag, color) in tags {
            if let Some(c) = parse_color(color) {
                theme.tags.insert(tag.to_lowercase(), c);
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" | "purple" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "orange" => Some(Color::Rgb(249, 115, 22)),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_after_theme_is_set_keeps_the_first_one() {
        let first = current().name.clone();
        init(Theme::preset("dracula"));
        init(Theme::preset("gruvbox"));
        assert_eq!(current().name, first);
    }

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color(" Grey "), Some(Color::Gray));
        assert_eq!(parse_color("#ff80"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn config_overrides_preset() {
        let config = ThemeConfig {
            preset: Some("nord".to_string()),
            today_bg: Some("#010203".to_string()),
            event_fg: Some("white".to_string()),
            ..Default::default()
        };
        let tags = BTreeMap::from([("Standup".to_string(), "yellow".to_string())]);
        let theme = config.into_theme(&tags);

        assert_eq!(theme.name, "nord");
        assert_eq!(theme.today.bg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(theme.tag_color("standup"), Color::Yellow);
        assert_eq!(theme.tag_color("meeting"), Color::Blue);
        assert_eq!(theme.tag_color("no-such-tag"), Color::White);
    }
}
