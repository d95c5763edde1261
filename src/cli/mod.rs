//! # CLI Module
//!
//! Command-line interface for signature comparison.
//!
//! ## Usage
//! ```bash
//! # Compare two signatures
//! sigmatch compare reference.png candidate.jpg
//!
//! # With custom threshold and canonical size
//! sigmatch compare reference.png candidate.jpg --threshold 90 --size 400x200
//!
//! # JSON output
//! sigmatch compare reference.png candidate.jpg --output json
//!
//! # List capture devices
//! sigmatch devices
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use signature_match::core::loader::ImageLoader;
use signature_match::core::pipeline::{MatcherConfig, SignatureMatcher};
use signature_match::core::reporter::{export_json, ComparisonReport, Severity};
use signature_match::core::source::{available_devices, ImageLocation, VideoNodeProbe};
use signature_match::error::{ConfigError, Result, SignatureMatchError};
use signature_match::events::{Event, EventChannel, LoadEvent, PipelineEvent};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

/// Signature Match - compare two signatures by structural similarity
#[derive(Parser, Debug)]
#[command(name = "sigmatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two signature images
    Compare {
        /// Reference signature
        a: PathBuf,

        /// Signature to check against the reference
        b: PathBuf,

        /// Match threshold percentage (scores strictly above it match)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Canonical size both images are resized to, as WIDTHxHEIGHT
        #[arg(short, long, value_parser = parse_size)]
        size: Option<Size>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Load the two images one after the other
        #[arg(long)]
        sequential: bool,

        /// Config file (defaults to the per-user config if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List capture devices that respond
    Devices {
        /// Highest device index to probe (exclusive)
        #[arg(long, default_value = "10")]
        max_index: u32,
    },

    /// Check that a file is an accepted signature image and loads
    Check {
        path: PathBuf,

        /// Canonical size to normalize to, as WIDTHxHEIGHT
        #[arg(short, long, value_parser = parse_size)]
        size: Option<Size>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable verdict with colors
    Pretty,
    /// JSON report for scripting
    Json,
    /// Score and verdict only
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Size {
    width: u32,
    height: u32,
}

fn parse_size(value: &str) -> std::result::Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", height))?;
    Ok(Size { width, height })
}

/// What a successful command ended with
enum Outcome {
    Match,
    NoMatch,
    Done,
}

impl Outcome {
    fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Match | Outcome::Done => ExitCode::SUCCESS,
            Outcome::NoMatch => ExitCode::from(1),
        }
    }
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        signature_match::init_tracing_with_default("signature_match=debug");
    } else {
        signature_match::init_tracing();
    }

    let term = Term::stderr();
    let result = match cli.command {
        Commands::Compare {
            a,
            b,
            threshold,
            size,
            output,
            sequential,
            config,
        } => run_compare(
            a, b, threshold, size, output, sequential, config, cli.verbose,
        ),
        Commands::Devices { max_index } => run_devices(max_index),
        Commands::Check { path, size } => run_check(path, size),
    };

    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(error) => {
            print_error(&term, &error);
            ExitCode::from(2)
        }
    }
}

/// Config file from `--config`, else the per-user file if it exists
fn load_config(explicit: Option<PathBuf>) -> std::result::Result<MatcherConfig, ConfigError> {
    if let Some(path) = explicit {
        return MatcherConfig::from_json_file(&path);
    }

    match MatcherConfig::default_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "using user config");
            MatcherConfig::from_json_file(&path)
        }
        _ => Ok(MatcherConfig::default()),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_compare(
    a: PathBuf,
    b: PathBuf,
    threshold: Option<f64>,
    size: Option<Size>,
    output: OutputFormat,
    sequential: bool,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> Result<Outcome> {
    let mut config = load_config(config_path)?;
    if let Some(threshold) = threshold {
        config.threshold = threshold;
    }
    if let Some(size) = size {
        config.width = size.width;
        config.height = size.height;
    }
    if sequential {
        config.parallel_load = false;
    }

    let matcher = SignatureMatcher::builder().config(config).build()?;
    let (location_a, location_b) = (ImageLocation::new(a), ImageLocation::new(b));

    // Set up event handling
    let (sender, receiver) = EventChannel::new();

    // Spinner for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner);
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase, .. }) => {
                    pb.set_message(phase.to_string());
                }
                Event::Load(LoadEvent::Loaded {
                    path,
                    source_width,
                    source_height,
                    ..
                }) if verbose => {
                    pb.println(format!(
                        "  {} {} ({}x{})",
                        style("loaded").dim(),
                        path.display(),
                        source_width,
                        source_height
                    ));
                }
                Event::Pipeline(PipelineEvent::Completed { .. })
                | Event::Pipeline(PipelineEvent::Failed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = matcher.compare_with_events(&location_a, &location_b, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let report = result?;

    match output {
        OutputFormat::Pretty => print_pretty_result(&Term::stdout(), &report, verbose),
        OutputFormat::Json => export_json(&report, std::io::stdout().lock())?,
        OutputFormat::Minimal => print_minimal_result(&report),
    }

    Ok(if report.is_match() {
        Outcome::Match
    } else {
        Outcome::NoMatch
    })
}

fn print_pretty_result(term: &Term, report: &ComparisonReport, verbose: bool) {
    let explanation = report.explain();

    let title = match explanation.severity {
        Severity::Info => style(format!("✓ {}", explanation.title)).green().bold(),
        Severity::Error => style(format!("✗ {}", explanation.title)).red().bold(),
    };
    term.write_line(&title.to_string()).ok();
    term.write_line("").ok();

    for line in explanation.message.lines() {
        term.write_line(&format!("  {}", line)).ok();
    }

    if verbose {
        term.write_line("").ok();
        term.write_line(&format!(
            "  {} {} ({}x{})",
            style("A:").dim(),
            report.location_a,
            report.source_dimensions_a.0,
            report.source_dimensions_a.1
        ))
        .ok();
        term.write_line(&format!(
            "  {} {} ({}x{})",
            style("B:").dim(),
            report.location_b,
            report.source_dimensions_b.0,
            report.source_dimensions_b.1
        ))
        .ok();
        term.write_line(&format!(
            "  {} compared at {}x{} in {} ms",
            style("·").dim(),
            report.normalized_dimensions.0,
            report.normalized_dimensions.1,
            report.duration_ms
        ))
        .ok();
    }
}

fn print_minimal_result(report: &ComparisonReport) {
    let verdict = if report.is_match() { "MATCH" } else { "NO_MATCH" };
    println!("{} {}", report.score(), verdict);
}

fn run_devices(max_index: u32) -> Result<Outcome> {
    let term = Term::stdout();
    let devices = available_devices(&VideoNodeProbe::new(), max_index);

    term.write_line(&format!("{}", style("Capture devices:").bold()))
        .ok();
    for index in devices {
        term.write_line(&format!("  {} camera {}", style("●").cyan(), index))
            .ok();
    }

    Ok(Outcome::Done)
}

fn run_check(path: PathBuf, size: Option<Size>) -> Result<Outcome> {
    let location = ImageLocation::from_picker(path)?;
    let loader = match size {
        Some(size) => ImageLoader::new(size.width, size.height),
        None => ImageLoader::default(),
    };
    let image = loader.load(&location)?;

    let (source_width, source_height) = image.source_dimensions();
    let (width, height) = image.dimensions();
    Term::stdout()
        .write_line(&format!(
            "{} {} ({}x{}, normalized to {}x{})",
            style("✓").green().bold(),
            location,
            source_width,
            source_height,
            width,
            height
        ))
        .ok();

    Ok(Outcome::Done)
}

fn print_error(term: &Term, error: &SignatureMatchError) {
    term.write_line(&format!("{} {}", style("Error:").red().bold(), error))
        .ok();
    if let Some(path) = error.failed_location() {
        term.write_line(&format!(
            "  {} {}",
            style("Location:").dim(),
            path.display()
        ))
        .ok();
    }
}
