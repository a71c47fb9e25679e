//! `slots` CLI: compute bookable appointment slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Available slots for one week, default template, Google events from a file
//! slots slots --from 2026-03-16 --to 2026-03-22 --events events.json
//!
//! # Custom template, events piped on stdin, fixed "now"
//! cat events.json | slots slots -c hours.json --events - \
//!     --from 2026-03-16 --to 2026-03-16 --now 2026-03-15T00:00:00Z
//!
//! # Keep busy slots in the output, flagged "available": false
//! slots slots --from 2026-03-16 --to 2026-03-16 --include-busy
//!
//! # Only the days that still have room
//! slots dates --from 2026-03-16 --to 2026-04-15 --events events.json
//!
//! # Check a working-hours file
//! slots validate -c hours.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use slot_engine::google::parse_events;
use slot_engine::zone::{parse_date, parse_datetime, parse_timezone};
use slot_engine::{
    AvailabilityRequest, AvailabilityResponse, AvailabilityService, StaticBusySource,
    WorkingHoursConfig,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Compute bookable appointment slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print available slots as JSON
    Slots {
        #[command(flatten)]
        query: QueryArgs,
        /// Keep busy slots in the output, flagged "available": false
        #[arg(long)]
        include_busy: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the days that have at least one available slot
    Dates {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Check a working-hours configuration file
    Validate {
        /// Working-hours JSON file
        #[arg(short, long)]
        config: String,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Working-hours JSON file (defaults to Mon-Fri 09:00-18:00, 60-minute slots)
    #[arg(short, long)]
    config: Option<String>,
    /// Google Calendar events JSON ("-" reads stdin; no busy time if omitted)
    #[arg(short, long)]
    events: Option<String>,
    /// First day, YYYY-MM-DD
    #[arg(long)]
    from: String,
    /// Last day (inclusive), YYYY-MM-DD
    #[arg(long)]
    to: String,
    /// Current time as ISO 8601 (defaults to the system clock)
    #[arg(long)]
    now: Option<String>,
    /// Practitioner's IANA timezone
    #[arg(long, default_value = "Europe/Paris")]
    timezone: String,
    /// Calendar identifier the events belong to
    #[arg(long, default_value = "primary")]
    calendar_id: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Slots {
            query,
            include_busy,
            output,
        } => {
            let response = run_query(&query, include_busy)?;
            let json = serde_json::to_string_pretty(&response)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Dates { query } => {
            let response = run_query(&query, false)?;
            for date in &response.dates {
                println!("{}", date);
            }
        }
        Commands::Validate { config } => {
            let config = load_config(Some(&config))?;
            config.validate().context("Invalid working-hours configuration")?;
            println!(
                "ok: {} slot(s) per working day, {} working day(s) per week",
                config.slots_per_day(),
                config.working_days.len()
            );
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `-v` flags win over `RUST_LOG`; default is `warn`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_query(query: &QueryArgs, include_busy: bool) -> Result<AvailabilityResponse> {
    let config = load_config(query.config.as_deref())?;
    let timezone = parse_timezone(&query.timezone)?;
    let start_date = parse_day(&query.from)?;
    let end_date = parse_day(&query.to)?;
    let now: DateTime<Utc> = match &query.now {
        Some(raw) => parse_datetime(raw).context("Invalid --now")?,
        None => Utc::now(),
    };

    let mut source = StaticBusySource::new();
    if let Some(path) = query.events.as_deref() {
        let raw = read_input(path)?;
        let events = parse_events(&raw).context("Failed to parse calendar events")?;
        debug!(events = events.len(), "loaded calendar events");
        source = source.with_calendar(query.calendar_id.clone(), events);
    }

    let service = AvailabilityService::new(source, config, timezone)
        .context("Invalid working-hours configuration")?;
    let mut request = AvailabilityRequest::new(query.calendar_id.clone(), start_date, end_date);
    request.include_busy = include_busy;

    service
        .available_slots(&request, now)
        .context("Failed to compute availability")
}

fn load_config(path: Option<&str>) -> Result<WorkingHoursConfig> {
    match path {
        Some(path) => {
            let raw = read_input(path)?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse working hours: {}", path))
        }
        None => Ok(WorkingHoursConfig::default()),
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    parse_date(raw).with_context(|| format!("Expected YYYY-MM-DD, got '{}'", raw))
}

/// Read a file, or stdin when `path` is "-".
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
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
