mod app;
mod calendar;
mod data;
mod detail;
mod dvc;
mod help;
mod jumpto;
mod panes;
mod theme;
mod trip;
use crate::app::App;
use crate::calendar::parse_iso;
use crate::data::SampleStore;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { date: Option<Date>, trip: usize },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut trip = 1usize;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('t') | Arg::Long("trip") => {
                    trip = parser.value()?.parse()?;
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match parse_iso(&value) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { date, trip })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, trip } => {
                let store = SampleStore::load();
                let trip_idx = trip
                    .checked_sub(1)
                    .filter(|&i| i < store.trip_count())
                    .with_context(|| {
                        format!(
                            "no such trip: {trip} (sample data has {} trips)",
                            store.trip_count()
                        )
                    })?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let start = date.unwrap_or_else(|| {
                    store
                        .trip(trip_idx)
                        .map_or(today, |t| t.range.start())
                });
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(store, trip_idx, today, start).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: parkplan [-t N] [YYYY-MM-DD]");
                println!();
                println!("Terminal itinerary planner for multi-day theme-park trips");
                println!();
                println!("Options:");
                println!("  -t, --trip <N>    Open the Nth sample trip [default: 1]");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
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
