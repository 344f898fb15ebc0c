use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};

use crate::app::Page;
use crate::calendar::ViewMode;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dashboard-tui",
    version,
    about = "Calendar and task board in the terminal"
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/dashboard-tui/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial calendar date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    #[arg(long, value_enum)]
    pub view: Option<ViewArg>,

    #[arg(long, value_enum)]
    pub page: Option<PageArg>,

    /// Where to write logs (defaults to <data dir>/dashboard-tui/dashboard.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Month,
    Week,
    Day,
}

impl From<ViewArg> for ViewMode {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Month => ViewMode::Month,
            ViewArg::Week => ViewMode::Week,
            ViewArg::Day => ViewMode::Day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageArg {
    Calendar,
    Tasks,
}

impl From<PageArg> for Page {
    fn from(p: PageArg) -> Self {
        match p {
            PageArg::Calendar => Page::Calendar,
            PageArg::Tasks => Page::Tasks,
        }
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    crate::calendar::event::parse_date(s).ok_or_else(|| format!("expected YYYY-MM-DD, got: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let cli = Cli::try_parse_from([
            "dashboard-tui",
            "--date",
            "2025-07-09",
            "--view",
            "week",
            "--page",
            "tasks",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2025, 7, 9));
        assert_eq!(cli.view.map(ViewMode::from), Some(ViewMode::Week));
        assert_eq!(cli.page.map(Page::from), Some(Page::Tasks));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(Cli::try_parse_from(["dashboard-tui", "--date", "2025-13-01"]).is_err());
    }
}
