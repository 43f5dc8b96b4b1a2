//! sarhint - flag `sar` samples that breach thresholds and explain why.
//!
//! Usage:
//!   sarhint -f /var/log/sa/sa16 -m disk
//!   sarhint -f sa16 -m network --thresholds limits.json --json
//!   sarhint -i sa16.txt -m cpu -v

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use sarhint::capture::{FeedSource, SarCommand, TextFile};
use sarhint::render::{render_json, render_text};
use sarhint::{DefaultThresholds, MetricFamily, ThresholdOverrides, ThresholdSet, analyze};

/// Offline analyzer for sar activity files.
#[derive(Parser)]
#[command(name = "sarhint", about = "SAR data processor", version)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "input"])))]
struct Args {
    /// Path to a binary sa file (passed to `sar -f`).
    #[arg(short, long, value_name = "SA_FILE")]
    file: Option<PathBuf>,

    /// Path to text output captured from sar earlier.
    #[arg(short, long, value_name = "TEXT_FILE")]
    input: Option<PathBuf>,

    /// Metric family to analyze.
    #[arg(short, long, value_enum)]
    metric: MetricFamily,

    /// JSON file with per-family threshold overrides.
    /// An entry for the analyzed family replaces the defaults entirely.
    #[arg(long, value_name = "PATH")]
    thresholds: Option<PathBuf>,

    /// sar executable to run.
    #[arg(long, default_value = "sar")]
    sar_bin: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v shows skipped lines, -vv parsed values).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Default level is INFO. Use -q for errors only.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = DefaultThresholds::builtin();
    let overrides = match &args.thresholds {
        Some(path) => {
            info!("Loading thresholds from {}", path.display());
            ThresholdOverrides::load(path)?
        }
        None => ThresholdOverrides::default(),
    };
    let thresholds =
        ThresholdSet::resolve(args.metric, &defaults, overrides.for_family(args.metric));

    let source: Box<dyn FeedSource> = match (&args.input, &args.file) {
        (Some(input), _) => Box::new(TextFile::new(input)),
        (None, Some(file)) => Box::new(SarCommand::new(&args.sar_bin, file)),
        (None, None) => return Err("either --file or --input is required".into()),
    };
    let feed = source.capture(args.metric)?;

    let report = analyze(&feed, args.metric, &thresholds)?;

    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
