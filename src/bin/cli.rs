//! circuitmap CLI - Debug tool for track definitions
//!
//! Usage:
//!   circuitmap-cli progress <track.json> <x> <y> [--hint <p>]
//!   circuitmap-cli sample <track.json> <progress>
//!   circuitmap-cli sectors <track.json>
//!   circuitmap-cli replay <track.json> <samples.json>
//!
//! This tool loads a track definition and shows how raw positions map to
//! progress on the reference path and to marker positions on the display path.

use circuitmap::{TrackDefinition, TrackPair, VehicleTracker};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "circuitmap-cli")]
#[command(about = "Debug tool for track progress mapping", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a reference-space position onto the track
    Progress {
        /// Track definition (JSON)
        track: PathBuf,
        x: f64,
        y: f64,

        /// Progress from the previous tick, to enable the hint window
        #[arg(long)]
        hint: Option<f64>,
    },

    /// Sample the display path at a progress value
    Sample {
        /// Track definition (JSON)
        track: PathBuf,
        progress: f64,
    },

    /// Show sector boundaries on both paths
    Sectors {
        /// Track definition (JSON)
        track: PathBuf,
    },

    /// Replay a sequence of positions for one vehicle, carrying the hint
    Replay {
        /// Track definition (JSON)
        track: PathBuf,

        /// JSON array of [x, y] positions
        samples: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Commands::Progress { track, x, y, hint } => {
            load_track(&track).map(|pair| run_progress(&pair, x, y, hint))
        }
        Commands::Sample { track, progress } => {
            load_track(&track).map(|pair| run_sample(&pair, progress))
        }
        Commands::Sectors { track } => load_track(&track).map(|pair| run_sectors(&pair)),
        Commands::Replay { track, samples } => {
            load_track(&track).and_then(|pair| run_replay(pair, &samples))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_track(path: &PathBuf) -> circuitmap::Result<TrackPair> {
    info!("Loading track definition: {}", path.display());
    let pair = TrackDefinition::from_file(path)?.into_pair()?;
    info!(
        "Track '{}': reference {} pts / {:.1} long, display {} pts / {:.1} long",
        pair.name(),
        pair.reference().path().len(),
        pair.reference().total_length(),
        pair.display().path().len(),
        pair.display().total_length()
    );
    Ok(pair)
}

fn run_progress(pair: &TrackPair, x: f64, y: f64, hint: Option<f64>) {
    let sample = pair.locate(x, y, hint);
    println!("\n{}", "=".repeat(60));
    println!("Position ({}, {})", x, y);
    println!("{}", "=".repeat(60));
    if let Some(h) = hint {
        println!("  hint:      {:.6}", h);
    }
    println!("  progress:  {:.6}", sample.progress);
    match sample.sector {
        Some(s) => println!("  sector:    {}", s + 1),
        None => println!("  sector:    -"),
    }
    println!("  display:   ({:.3}, {:.3})", sample.point.x, sample.point.y);
    println!(
        "  heading:   {:.1} deg",
        sample.tangent.heading_radians().to_degrees()
    );
}

fn run_sample(pair: &TrackPair, progress: f64) {
    let display = pair.display();
    let point = display.point_at(progress);
    println!("progress {:.6} -> display ({:.3}, {:.3})", progress, point.x, point.y);
    if let Some(pt) = display.point_and_tangent_at(progress) {
        println!(
            "  tangent ({:.4}, {:.4}), heading {:.1} deg",
            pt.tangent.dx,
            pt.tangent.dy,
            pt.tangent.heading_radians().to_degrees()
        );
    }
}

fn run_sectors(pair: &TrackPair) {
    if pair.sectors().is_empty() {
        println!("Track '{}' defines no sectors", pair.name());
        return;
    }
    println!("{:>6}  {:>10}  {:>10}", "sector", "reference", "display");
    for (i, (r, d)) in pair
        .sectors()
        .iter()
        .zip(pair.display_sectors())
        .enumerate()
    {
        println!("{:>6}  {:>10.6}  {:>10.6}", i + 1, r, d);
    }
}

fn run_replay(pair: TrackPair, samples: &PathBuf) -> circuitmap::Result<()> {
    let content = fs::read_to_string(samples)?;
    let positions: Vec<[f64; 2]> = serde_json::from_str(&content)?;
    info!("Replaying {} positions", positions.len());

    let mut tracker = VehicleTracker::new(Arc::new(pair));
    for (i, [x, y]) in positions.into_iter().enumerate() {
        let sample = tracker.update(x, y);
        println!(
            "{:>5}  ({:>10.3}, {:>10.3})  progress {:.6}  display ({:.3}, {:.3})",
            i, x, y, sample.progress, sample.point.x, sample.point.y
        );
    }
    Ok(())
}
