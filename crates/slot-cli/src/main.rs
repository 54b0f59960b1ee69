//! `slots` CLI — find the earliest common meeting slot from a JSON roster.
//!
//! ## Usage
//!
//! ```sh
//! # Earliest 60-minute slot for two participants on 20 June
//! slots find -r roster.json \
//!   -p 11111111-1111-1111-1111-111111111111 \
//!   -p 22222222-2222-2222-2222-222222222222 \
//!   --duration 60 --earliest 2025-06-20T09:00:00 --latest 2025-06-20T17:00:00
//!
//! # Roster from stdin
//! cat roster.json | slots find -p 11111111-1111-1111-1111-111111111111 \
//!   --duration 30 --earliest 2025-06-20T09:00:00Z --latest 2025-06-20T12:00:00Z
//!
//! # A participant's meetings, sorted by start
//! slots meetings -r roster.json -p 22222222-2222-2222-2222-222222222222
//!
//! # Show the pipeline's debug events on stderr
//! RUST_LOG=slot_engine=debug slots find ...
//! ```
//!
//! A roster is `{"participants": [{"id", "name"}], "meetings": [{"id", "start",
//! "end", "participants": [ids]}]}`.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::{
    find_earliest_slot, participant_meetings, InMemoryDirectory, MeetingRecord, MeetingRequest,
    ParticipantId, Roster, SchedulingError,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find the earliest meeting slot every participant can attend"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "slot_engine=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the earliest slot free for all participants
    Find {
        /// Roster JSON file (reads from stdin if omitted or "-")
        #[arg(short, long)]
        roster: Option<String>,
        /// Participant id; repeat for each participant
        #[arg(short = 'p', long = "participant", required = true)]
        participants: Vec<Uuid>,
        /// Meeting length in minutes
        #[arg(short, long)]
        duration: i64,
        /// Earliest allowed start (RFC 3339, or naive time read as UTC)
        #[arg(long, value_parser = parse_datetime)]
        earliest: DateTime<Utc>,
        /// Latest allowed end (RFC 3339, or naive time read as UTC)
        #[arg(long, value_parser = parse_datetime)]
        latest: DateTime<Utc>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List a participant's meetings
    Meetings {
        /// Roster JSON file (reads from stdin if omitted or "-")
        #[arg(short, long)]
        roster: Option<String>,
        /// Participant id
        #[arg(short = 'p', long = "participant")]
        participant: Uuid,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Serialize)]
struct SlotOutput {
    start: String,
    end: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Find {
            roster,
            participants,
            duration,
            earliest,
            latest,
            pretty,
        } => {
            let duration = Duration::try_minutes(duration)
                .with_context(|| format!("Duration out of range: {} minutes", duration))?;
            let directory = load_directory(roster.as_deref())?;
            let request = MeetingRequest::new(
                participants.into_iter().map(ParticipantId::from_uuid),
                duration,
                earliest,
                latest,
            );

            let slot = find_earliest_slot(&directory, &request).map_err(scheduling_failure)?;
            let output = SlotOutput {
                start: slot.start().to_rfc3339(),
                end: slot.end().to_rfc3339(),
            };
            print_json(&output, pretty)?;
        }
        Commands::Meetings {
            roster,
            participant,
            pretty,
        } => {
            let directory = load_directory(roster.as_deref())?;
            let meetings = participant_meetings(&directory, ParticipantId::from_uuid(participant))
                .map_err(scheduling_failure)?;
            let records: Vec<MeetingRecord> = meetings.iter().map(MeetingRecord::from).collect();
            print_json(&records, pretty)?;
        }
    }

    Ok(())
}

/// Send log events to stderr so stdout stays machine-readable.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Attach the stable error code so scripts can match on it.
fn scheduling_failure(err: SchedulingError) -> anyhow::Error {
    let code = err.code();
    anyhow::Error::new(err).context(format!("Scheduling failed [{}]", code))
}

fn load_directory(path: Option<&str>) -> Result<InMemoryDirectory> {
    let json = read_input(path)?;
    let roster: Roster = serde_json::from_str(&json).context("Failed to parse roster JSON")?;
    debug!(
        participants = roster.participants.len(),
        meetings = roster.meetings.len(),
        "loaded roster"
    );
    InMemoryDirectory::from_roster(roster).map_err(|e| {
        let code = e.code();
        anyhow::Error::new(e).context(format!("Invalid roster [{}]", code))
    })
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with offset, e.g. "2025-06-20T09:00:00+02:00") and
/// naive time (e.g. "2025-06-20T09:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
