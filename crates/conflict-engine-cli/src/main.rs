//! `dayplan` CLI — lay out, check, and reschedule a day of appointments.
//!
//! Reads a JSON array of appointments and prints the engine's output as JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Column layout for rendering (stdin → stdout)
//! cat day.json | dayplan layout
//!
//! # Every overlapping pair, with the appointment that owns the warning
//! dayplan conflicts -i day.json
//!
//! # Alternative start times for one appointment
//! dayplan suggest --id 42 -i day.json
//!
//! # 15-minute availability grid for a date
//! dayplan slots --date 2026-03-16 --granularity 15 -i day.json
//!
//! # Free windows of at least an hour, using a custom config
//! dayplan free --min 60 --config week.json -i day.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conflict_engine::{Appointment, EngineConfig};
use serde::Serialize;
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dayplan", version, about = "Calendar conflict engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Appointments JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Engine configuration JSON file; absent keys use defaults
    #[arg(long, global = true)]
    config: Option<String>,

    /// Override the maximum number of side-by-side columns
    #[arg(long, global = true)]
    max_columns: Option<usize>,

    /// Log engine diagnostics to stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute column layout and rendering coordinates
    Layout,
    /// List every overlapping pair of appointments
    Conflicts,
    /// Suggest conflict-free start times for one appointment
    Suggest {
        /// Id of the appointment to move
        #[arg(long)]
        id: String,
    },
    /// Show the availability grid for a date
    Slots {
        /// Date in YYYY-MM-DD format
        #[arg(long)]
        date: String,
        /// Slot width in minutes (must divide 60); defaults to the config value
        #[arg(long)]
        granularity: Option<u32>,
    },
    /// Show free windows inside the business day
    Free {
        /// Only report windows at least this many minutes long
        #[arg(long, default_value_t = 0)]
        min: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(max_columns) = cli.max_columns {
        config.max_columns = max_columns;
    }
    config.validate().context("Invalid engine configuration")?;

    let raw = read_input(cli.input.as_deref())?;
    let appointments: Vec<Appointment> =
        serde_json::from_str(&raw).context("Failed to parse appointments JSON")?;
    tracing::debug!(count = appointments.len(), "loaded appointments");

    let rendered = match cli.command {
        Commands::Layout => {
            let layout = conflict_engine::compute_day_layout(&appointments, &config);
            to_json(&layout)?
        }
        Commands::Conflicts => {
            let conflicts = conflict_engine::find_conflicts(&appointments);
            let summaries: Vec<ConflictSummary> = conflicts
                .iter()
                .map(|c| ConflictSummary {
                    owner: &c.owner.id,
                    other: &c.other.id,
                    overlap_minutes: c.overlap_minutes,
                })
                .collect();
            to_json(&summaries)?
        }
        Commands::Suggest { id } => {
            let Some(target) = appointments.iter().find(|a| a.id == id) else {
                anyhow::bail!("No appointment with id '{}'", id);
            };
            let times = conflict_engine::suggest_times_for(target, &appointments, &config)
                .with_context(|| format!("Failed to suggest times for '{}'", id))?;
            to_json(&times)?
        }
        Commands::Slots { date, granularity } => {
            let granularity = granularity.unwrap_or(config.granularity_minutes);
            let slots =
                conflict_engine::list_available_slots(&date, &appointments, granularity, &config)
                    .context("Failed to list available slots")?;
            to_json(&slots)?
        }
        Commands::Free { min } => {
            let windows = conflict_engine::free_windows(&appointments, &config)?
                .into_iter()
                .filter(|w| w.duration_minutes >= min)
                .collect::<Vec<_>>();
            to_json(&windows)?
        }
    };

    write_output(cli.output.as_deref(), &rendered)
}

/// Compact view of a conflict: ids only, owner first.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictSummary<'a> {
    owner: &'a str,
    other: &'a str,
    overlap_minutes: u32,
}

/// Send engine logs to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
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
            print!("{}", content);
        }
    }
    Ok(())
}
