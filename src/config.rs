use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{bail, Result, WrapErr};
use serde::Deserialize;
use tracing::debug;

use crate::calendar::{HourWindow, ViewMode};
use crate::tasks::Status;
use crate::theme::ThemeConfig;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub calendar: CalendarConfig,
    pub tasks: TasksConfig,
    pub theme: ThemeConfig,
    /// Event tag label -> color name or `#rrggbb`.
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    pub first_hour: u32,
    pub last_hour: u32,
    pub default_view: ViewMode,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        let window = HourWindow::default();
        Self {
            first_hour: window.first,
            last_hour: window.last,
            default_view: ViewMode::Month,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TasksConfig {
    /// Column for tasks created without picking one.
    pub default_status: Status,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_status: Status::UnderReview,
        }
    }
}

impl Config {
    /// Load the config file. An explicit path must exist; the default
    /// location is optional and falls back to built-in settings.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&content)
            .wrap_err_with(|| format!("loading config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let CalendarConfig {
            first_hour,
            last_hour,
            ..
        } = self.calendar;
        if last_hour > 23 {
            bail!("calendar.last_hour must be at most 23, got {last_hour}");
        }
        if first_hour > last_hour {
            bail!("calendar.first_hour ({first_hour}) is after calendar.last_hour ({last_hour})");
        }
        Ok(())
    }

    pub fn hour_window(&self) -> HourWindow {
        HourWindow {
            first: self.calendar.first_hour,
            last: self.calendar.last_hour,
        }
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dashboard-tui").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.hour_window(), HourWindow::default());
        assert_eq!(config.tasks.default_status, Status::UnderReview);
    }

    #[test]
    fn parses_every_section() {
        let config = Config::parse(
            r##"
            [calendar]
            first_hour = 6
            last_hour = 22
            default_view = "week"

            [tasks]
            default_status = "pending"

            [theme]
            preset = "gruvbox"

            [tags]
            meeting = "#336699"
            "##,
        )
        .unwrap();

        assert_eq!(config.hour_window(), HourWindow { first: 6, last: 22 });
        assert_eq!(config.calendar.default_view, ViewMode::Week);
        assert_eq!(config.tasks.default_status, Status::Todo);
        assert_eq!(config.theme.preset.as_deref(), Some("gruvbox"));
        assert_eq!(config.tags.get("meeting").map(String::as_str), Some("#336699"));
    }

    #[test]
    fn rejects_bad_hour_windows() {
        assert!(Config::parse("[calendar]\nfirst_hour = 10\nlast_hour = 9\n").is_err());
        assert!(Config::parse("[calendar]\nlast_hour = 24\n").is_err());
        assert!(Config::parse("[tasks]\ndefault_status = \"blocked\"\n").is_err());
    }

    #[test]
    fn loads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tasks]\ndefault_status = \"todo\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.tasks.default_status, Status::Todo);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
