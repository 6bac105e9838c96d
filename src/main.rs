//! Main entry point for the gala-scoreboard CLI
//!
//! Resolves event results and prints standings over a JSON meet snapshot.
//! Output goes to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gala_scoreboard::config::AppConfig;
use gala_scoreboard::metrics::MetricsCollector;
use gala_scoreboard::scoring::{parse_outcomes, Resolver};
use gala_scoreboard::store::{InMemoryResultStore, MeetSnapshot};
use gala_scoreboard::standings::ResultsFilter;
use gala_scoreboard::types::{EventId, HouseId};
use gala_scoreboard::{ScoringError, ScoringService};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Gala Scoreboard - results scoring and house standings
#[derive(Parser)]
#[command(
    name = "gala-scoreboard",
    version,
    about = "Score swimming gala events and compute house standings",
    long_about = "Gala Scoreboard ranks race outcomes with standard competition ranking, \
                 awards points per position, and derives house totals, leaderboards and \
                 per-event summaries from a meet snapshot."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running a command")]
    dry_run: bool,

    /// Print Prometheus metrics to stderr after the command
    #[arg(long, help = "Print collected metrics to stderr when done")]
    metrics: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rank a list of outcomes without touching any meet data
    Resolve {
        /// JSON array of participant outcomes
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Replace one event's results in a meet snapshot
    Submit {
        /// Meet snapshot (JSON)
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
        /// Event the outcomes belong to
        #[arg(short, long)]
        event: EventId,
        /// JSON array of participant outcomes
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Where to write the updated snapshot (defaults to --data)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Stored results for one event in finishing order
    Results {
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
        #[arg(short, long)]
        event: EventId,
    },
    /// Named results across all events, optionally filtered
    ParticipantResults {
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
        /// Only this event
        #[arg(short, long)]
        event: Option<EventId>,
        /// Only swimmers from this house
        #[arg(long)]
        house: Option<HouseId>,
        /// Match participant, event or house names (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// House totals, win counts and the top performers
    Standings {
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
    },
    /// Participation and completion per event
    Events {
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
    },
    /// Cumulative house points event by event
    Trends {
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    gala_scoreboard::config::validate_config(&config)?;
    Ok(config)
}

fn display_startup_banner(config: &AppConfig) {
    info!("Gala Scoreboard v{}", gala_scoreboard::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   Points table: {:?}",
        config.scoring.points_table.as_slice()
    );
    info!(
        "   Store retries: {} (first delay {}ms)",
        config.store.max_retry_attempts, config.store.retry_delay_ms
    );
}

fn read_snapshot(path: &Path) -> Result<MeetSnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read meet data {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse meet data {}", path.display()))
}

fn write_snapshot(path: &Path, snapshot: &MeetSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json).map_err(|e| {
        ScoringError::StorageError {
            message: format!("Failed to write meet data {}: {}", path.display(), e),
        }
        .into()
    })
}

fn read_outcomes(path: &Path) -> Result<Vec<gala_scoreboard::ParticipantOutcome>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read outcomes {}", path.display()))?;
    parse_outcomes(&contents)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_service(
    data: &Path,
    config: &AppConfig,
    metrics: &Arc<MetricsCollector>,
) -> Result<ScoringService<InMemoryResultStore>> {
    let store = Arc::new(InMemoryResultStore::from_snapshot(read_snapshot(data)?));
    Ok(ScoringService::from_config(store, config).with_metrics(metrics.clone()))
}

async fn run(command: Command, config: &AppConfig, metrics: &Arc<MetricsCollector>) -> Result<()> {
    match command {
        Command::Resolve { input } => {
            let outcomes = read_outcomes(&input)?;
            let resolver = Resolver::new(config.scoring.points_table.clone());
            print_json(&resolver.resolve(&outcomes))
        }
        Command::Submit {
            data,
            event,
            input,
            output,
        } => {
            let outcomes = read_outcomes(&input)?;
            let service = open_service(&data, config, metrics)?;
            let ranked = service.submit_event_results(event, outcomes).await?;

            let target = output.unwrap_or(data);
            write_snapshot(&target, &service.store().snapshot()?)?;
            info!("Wrote updated meet data to {}", target.display());
            print_json(&ranked)
        }
        Command::Results { data, event } => {
            let service = open_service(&data, config, metrics)?;
            print_json(&service.event_results(event).await?)
        }
        Command::ParticipantResults {
            data,
            event,
            house,
            search,
        } => {
            let service = open_service(&data, config, metrics)?;
            let filter = ResultsFilter {
                event_id: event,
                house_id: house,
                search,
            };
            print_json(&service.participant_results(&filter).await?)
        }
        Command::Standings { data } => {
            let service = open_service(&data, config, metrics)?;
            print_json(&service.standings().await?)
        }
        Command::Events { data } => {
            let service = open_service(&data, config, metrics)?;
            print_json(&service.event_summaries().await?)
        }
        Command::Trends { data } => {
            let service = open_service(&data, config, metrics)?;
            print_json(&service.performance_trends().await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting");
        return Ok(());
    }

    let Some(command) = args.command else {
        eprintln!("No command given; see --help");
        std::process::exit(2);
    };

    display_startup_banner(&config);
    let metrics = Arc::new(MetricsCollector::new()?);

    let outcome = run(command, &config, &metrics).await;

    if args.metrics {
        eprintln!("{}", metrics.render()?);
    }

    if let Err(e) = outcome {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
