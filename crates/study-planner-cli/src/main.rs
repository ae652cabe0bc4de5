//! `study-planner` CLI — generate study schedules from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Generate sessions from a plan document (stdin → stdout)
//! cat plan.json | study-planner generate
//!
//! # From file to file, with settings from a TOML file
//! study-planner --config planner.toml generate -i plan.json -o sessions.json
//!
//! # Override settings on the command line
//! study-planner generate -i plan.json --session-length 45 --timezone Europe/London
//!
//! # Scheduled versus requested minutes per test
//! study-planner summary -i plan.json --now 2026-03-16T00:00:00Z
//!
//! # Find overlapping sessions in a generated schedule
//! study-planner conflicts -i sessions.json
//! ```
//!
//! Logging goes to stderr. `-v` raises the level (info, debug, trace);
//! without it `RUST_LOG` is honored and the default is `warn`.

mod settings;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use study_planner::summary::under_fulfilled;
use study_planner::{find_session_conflicts, summarize, Plan, StudySession};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::settings::{GeneratorSettings, SettingsFile};

#[derive(Parser)]
#[command(
    name = "study-planner",
    version,
    about = "Generate study sessions that fit weekly availability before test deadlines"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with a [generator] table of default settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate study sessions from a plan document
    Generate {
        #[command(flatten)]
        files: IoArgs,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Report scheduled versus requested minutes for each test
    Summary {
        #[command(flatten)]
        files: IoArgs,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// List overlapping pairs in a JSON array of sessions
    Conflicts {
        #[command(flatten)]
        files: IoArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct GeneratorArgs {
    /// Reference time (RFC 3339); defaults to the plan's `now`, then the system clock
    #[arg(long)]
    now: Option<DateTime<Utc>>,
    /// Length of each session in minutes
    #[arg(long)]
    session_length: Option<u32>,
    /// Let sessions for different tests share the same time
    #[arg(long)]
    allow_overlap: bool,
    /// IANA timezone that windows and dates are local to
    #[arg(long)]
    timezone: Option<String>,
    /// Do not use slots earlier today that have already started
    #[arg(long)]
    skip_elapsed: bool,
    /// Never schedule more minutes than a test's budget
    #[arg(long)]
    cap_at_budget: bool,
}

impl GeneratorArgs {
    fn settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            session_length_minutes: self.session_length,
            allow_overlap: self.allow_overlap.then_some(true),
            timezone: self.timezone.clone(),
            skip_elapsed_slots: self.skip_elapsed.then_some(true),
            cap_at_budget: self.cap_at_budget.then_some(true),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_settings = match &cli.config {
        Some(path) => SettingsFile::from_file(path)?.generator,
        None => GeneratorSettings::default(),
    };

    match cli.command {
        Commands::Generate { files, generator } => {
            let (plan, sessions) = run_plan(&files, &generator, &file_settings)?;
            for progress in under_fulfilled(&plan.tests, &sessions) {
                warn!(
                    test_id = %progress.test_id,
                    shortfall_minutes = progress.shortfall_minutes,
                    "not enough availability before the test date"
                );
            }
            write_json(files.output.as_deref(), &sessions)?;
        }
        Commands::Summary { files, generator } => {
            let (plan, sessions) = run_plan(&files, &generator, &file_settings)?;
            write_json(files.output.as_deref(), &summarize(&plan.tests, &sessions))?;
        }
        Commands::Conflicts { files } => {
            let json = read_input(files.input.as_deref())?;
            let sessions: Vec<StudySession> =
                serde_json::from_str(&json).context("Failed to parse sessions JSON")?;
            let conflicts = find_session_conflicts(&sessions);
            info!(sessions = sessions.len(), conflicts = conflicts.len(), "checked sessions");
            write_json(files.output.as_deref(), &conflicts)?;
        }
    }

    Ok(())
}

/// Read a plan, layer settings over its config and generate.
fn run_plan(
    files: &IoArgs,
    args: &GeneratorArgs,
    file_settings: &GeneratorSettings,
) -> Result<(Plan, Vec<StudySession>)> {
    let json = read_input(files.input.as_deref())?;
    let mut plan = Plan::from_json(&json).context("Failed to read plan")?;

    file_settings.apply(&mut plan.config);
    args.settings().apply(&mut plan.config);
    if args.now.is_some() {
        plan.now = args.now;
    }

    let now = plan.reference_time(Utc::now());
    let sessions = plan
        .generate(now)
        .context("Failed to generate schedule")?;
    info!(
        tests = plan.tests.len(),
        sessions = sessions.len(),
        now = %now,
        "generated schedule"
    );
    Ok((plan, sessions))
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
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

fn write_json<T: Serialize + ?Sized>(path: Option<&str>, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    content.push('\n');
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
