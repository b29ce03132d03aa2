//! `slot-grid` CLI — lay out events on a slot grid and navigate weeks.
//!
//! ## Usage
//!
//! ```sh
//! # Lay out a JSON array of {start, end, label} records (stdin → stdout)
//! cat events.json | slot-grid layout
//!
//! # Only the week containing a date, pretty-printed, to a file
//! slot-grid layout -i events.json -o grid.json --week 2026-03-04 --pretty
//!
//! # Show the per-day fragments and the slots they occupy
//! slot-grid fragments -i events.json
//!
//! # Show the week containing a date, or two weeks later
//! slot-grid week --date 2026-03-04
//! slot-grid week --date 2026-03-04 --offset 2
//! ```
//!
//! Rejected events are reported as warnings on stderr and listed under
//! `"rejected"` in the output; `--strict` turns them into a failure. Set
//! `RUST_LOG` or pass `-v` for more logging.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use slot_grid::{
    layout_records, slots_for, EventFragment, EventRecord, LayoutOptions, RejectedEvent,
    RenderGrid, WeekWindow,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "slot-grid",
    version,
    about = "Calendar slot-grid layout for shifts and care tasks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log pipeline progress (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out events and print the render grid as JSON
    Layout {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Restrict the grid to the week containing this date (YYYY-MM-DD)
        #[arg(long)]
        week: Option<NaiveDate>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Fail if any event is rejected
        #[arg(long)]
        strict: bool,
        /// Reject events touching more than this many calendar days
        #[arg(long, default_value_t = LayoutOptions::default().max_span_days)]
        max_span_days: u32,
    },
    /// Print the per-day fragments of each event and their slots
    Fragments {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reject events touching more than this many calendar days
        #[arg(long, default_value_t = LayoutOptions::default().max_span_days)]
        max_span_days: u32,
    },
    /// Print the Monday-anchored week containing a date
    Week {
        /// Reference date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Number of weeks to move forward (negative moves back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    week: Option<WeekSummary>,
    grid: RenderGrid,
    rejected: &'a [RejectedEvent],
}

#[derive(Serialize)]
struct WeekSummary {
    title: String,
    days: Vec<String>,
}

impl From<&WeekWindow> for WeekSummary {
    fn from(week: &WeekWindow) -> Self {
        Self {
            title: week.title(),
            days: week.day_keys().iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Serialize)]
struct FragmentOutput<'a> {
    #[serde(flatten)]
    fragment: &'a EventFragment,
    slots: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Layout {
            input,
            output,
            week,
            pretty,
            strict,
            max_span_days,
        } => {
            let records = read_records(input.as_deref())?;
            let layout = layout_records(&records, &LayoutOptions { max_span_days });

            if strict && !layout.is_complete() {
                anyhow::bail!(
                    "{} of {} events rejected (first: #{}: {})",
                    layout.rejected.len(),
                    records.len(),
                    layout.rejected[0].input_index,
                    layout.rejected[0].error
                );
            }

            let window = week.map(WeekWindow::containing).transpose()?;
            let grid = match &window {
                Some(window) => layout.grid.week(window),
                None => layout.grid.clone(),
            };
            let out = LayoutOutput {
                week: window.as_ref().map(WeekSummary::from),
                grid,
                rejected: &layout.rejected,
            };

            let json = if pretty {
                serde_json::to_string_pretty(&out)?
            } else {
                serde_json::to_string(&out)?
            };
            info!(
                "Laid out {} events over {} days",
                layout.events.len(),
                layout.days.len()
            );
            write_output(output.as_deref(), &json)?;
        }
        Commands::Fragments {
            input,
            max_span_days,
        } => {
            let records = read_records(input.as_deref())?;
            let layout = layout_records(&records, &LayoutOptions { max_span_days });
            let fragments: Vec<FragmentOutput> = layout
                .fragments
                .iter()
                .map(|fragment| FragmentOutput {
                    fragment,
                    slots: slots_for(fragment)
                        .iter()
                        .map(|o| o.slot.label())
                        .collect(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&fragments)?);
        }
        Commands::Week { date, offset } => {
            let reference = date.unwrap_or_else(|| Local::now().date_naive());
            let week = WeekWindow::containing(reference)?
                .shifted(offset)
                .with_context(|| format!("Cannot move {} weeks from {}", offset, reference))?;
            println!("{}", week.title());
            for date in week.dates() {
                println!("{}  {}", date.format("%a"), slot_grid::DayKey::new(date));
            }
        }
    }

    Ok(())
}

fn read_records(path: Option<&str>) -> Result<Vec<EventRecord>> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Input must be a JSON array of {start, end, label} objects")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
