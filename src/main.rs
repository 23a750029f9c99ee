mod app;
mod calendar;
mod counts;
mod help;
mod theme;
use crate::app::App;
use crate::calendar::{ViewConfig, WeekBounds, HEATMAP_METRICS};
use crate::counts::CountLog;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday,
};
use tracing_subscriber::EnvFilter;

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    today: Option<Date>,
    first_weekday: Weekday,
    min_weeks: usize,
    max_weeks: usize,
    log_file: Option<PathBuf>,
    count_log: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            today: None,
            first_weekday: Weekday::Sunday,
            min_weeks: calendar::DEFAULT_MIN_WEEKS,
            max_weeks: calendar::DEFAULT_MAX_WEEKS,
            log_file: None,
            count_log: None,
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('t') | Arg::Long("today") => {
                    let date = parser.value()?.parse_with(|s| Date::parse(s, &YMD_FMT))?;
                    opts.today = Some(date);
                }
                Arg::Short('w') | Arg::Long("week-start") => {
                    opts.first_weekday = parser.value()?.parse_with(parse_weekday)?;
                }
                Arg::Long("min-weeks") => opts.min_weeks = parser.value()?.parse()?,
                Arg::Long("max-weeks") => opts.max_weeks = parser.value()?.parse()?,
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.count_log.is_none() => {
                    opts.count_log = Some(PathBuf::from(value));
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let today = match opts.today {
                    Some(d) => d,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                if let Some(path) = &opts.log_file {
                    init_tracing(path)?;
                }
                tracing::info!(%today, first_weekday = %opts.first_weekday, "starting");
                let bounds = WeekBounds::new(opts.min_weeks, opts.max_weeks)?;
                let mut config = ViewConfig::new(today, HEATMAP_METRICS)
                    .first_weekday(opts.first_weekday)
                    .bounds(bounds);
                if let Some(path) = &opts.count_log {
                    config = config.count_source(CountLog::load(path)?);
                }
                let app = App::new(config)?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal)
                })
            }
            Command::Help => {
                println!("Usage: habitcal [options] <LOGFILE>");
                println!();
                println!("Show a heatmap of daily contributions read from LOGFILE");
                println!();
                println!("LOGFILE holds one `YYYY-MM-DD [COUNT]` entry per line.");
                println!();
                println!("Options:");
                println!("  -t, --today YYYY-MM-DD  Show the weeks ending on this date");
                println!("  -w, --week-start DAY    Start weeks on this day [default: sunday]");
                println!(
                    "      --min-weeks N       Show at least N weeks [default: {}]",
                    calendar::DEFAULT_MIN_WEEKS
                );
                println!(
                    "      --max-weeks N       Show at most N weeks [default: {}]",
                    calendar::DEFAULT_MAX_WEEKS
                );
                println!("      --log-file PATH     Append diagnostic logs to PATH");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

// The terminal belongs to the calendar, so logs only go to a file
fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid RUST_LOG filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

fn parse_weekday(s: &str) -> Result<Weekday, UnknownWeekdayError> {
    use Weekday::*;
    match s.to_ascii_lowercase().as_str() {
        "sun" | "sunday" => Ok(Sunday),
        "mon" | "monday" => Ok(Monday),
        "tue" | "tuesday" => Ok(Tuesday),
        "wed" | "wednesday" => Ok(Wednesday),
        "thu" | "thursday" => Ok(Thursday),
        "fri" | "friday" => Ok(Friday),
        "sat" | "saturday" => Ok(Saturday),
        _ => Err(UnknownWeekdayError(s.to_owned())),
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown day of the week: {0:?}")]
struct UnknownWeekdayError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse_args(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("habitcal").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Run(Options::default()));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse_args(&[
            "--today",
            "2025-01-22",
            "-w",
            "Mon",
            "--min-weeks",
            "2",
            "--max-weeks=10",
            "--log-file",
            "habitcal.log",
            "runs.log",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                today: Some(date!(2025 - 01 - 22)),
                first_weekday: Weekday::Monday,
                min_weeks: 2,
                max_weeks: 10,
                log_file: Some(PathBuf::from("habitcal.log")),
                count_log: Some(PathBuf::from("runs.log")),
            })
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse_args(&["runs.log", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse_args(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_values() {
        assert!(parse_args(&["--today", "2025-13-01"]).is_err());
        assert!(parse_args(&["--week-start", "someday"]).is_err());
        assert!(parse_args(&["--min-weeks", "-1"]).is_err());
        assert!(parse_args(&["a.log", "b.log"]).is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("sunday"), Ok(Weekday::Sunday));
        assert_eq!(parse_weekday("SAT"), Ok(Weekday::Saturday));
        assert_eq!(parse_weekday("Thursday"), Ok(Weekday::Thursday));
        assert_eq!(
            parse_weekday("thurs"),
            Err(UnknownWeekdayError(String::from("thurs")))
        );
    }
}
