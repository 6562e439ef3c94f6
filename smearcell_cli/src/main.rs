//! SmearCell viewer CLI
//!
//! Renders the per-tick and summed exposure curves of one photosite
//! configuration, or sweeps the summed curve across the valid smear range.

use clap::Parser;
use serde::Serialize;
use smearcell_core::limits::{
    MAX_TICK_COUNT, MAX_TOTAL_GREASE, MIN_TICK_COUNT, MIN_TOTAL_GREASE,
};
use smearcell_core::Cell;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod chart;
mod export;

/// Photosite smear-exposure viewer
#[derive(Parser, Debug)]
#[command(name = "smearcell")]
#[command(about = "Render smear-exposure curves for a scanned photosite", long_about = None)]
struct Args {
    /// Number of exposure ticks (clamped to 1..=20)
    #[arg(short, long, default_value = "6")]
    ticks: usize,

    /// Total smear over the exposure in cell widths (clamped to -5..=5)
    #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
    grease: f64,

    /// Sweep the summed curve over this many smear values instead of
    /// rendering a single configuration
    #[arg(long)]
    sweep: Option<usize>,

    /// JSON output for machine parsing
    #[arg(long)]
    json: bool,

    /// Export the full snapshot to a JSON file
    #[arg(long)]
    export: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let mut cell = Cell::new(args.ticks, args.grease);
    if cell.tick_count() != args.ticks {
        debug!(
            "requested tick count {} clamped to {} (valid {}..={})",
            args.ticks,
            cell.tick_count(),
            MIN_TICK_COUNT,
            MAX_TICK_COUNT
        );
    }
    if cell.total_grease() != args.grease {
        debug!(
            "requested smear {:.3} clamped to {:.3}",
            args.grease,
            cell.total_grease()
        );
    }

    if let Some(steps) = args.sweep {
        run_sweep(&mut cell, steps, args.json);
        return;
    }

    let snapshot = cell.snapshot();

    if args.json {
        let summary = serde_json::json!({
            "tick_count": snapshot.tick_count,
            "total_grease": snapshot.total_grease,
            "movement": snapshot.movement,
            "main_beam_index": snapshot.main_beam_index,
            "last_beam_index": snapshot.last_beam_index,
            "max_exposure": snapshot.max_exposure,
            "sum_by_beam": snapshot.sum_by_beam.clone(),
        });
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    } else {
        info!("SmearCell viewer v0.1.0");
        print!("{}", chart::render(&snapshot));
    }

    if let Some(path) = &args.export {
        match export::write_snapshot(&snapshot, path) {
            Ok(()) => info!("Exported snapshot to {}", path),
            Err(e) => {
                error!("Failed to write export: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// One step of a smear sweep.
#[derive(Debug, Serialize)]
struct SweepStep {
    requested_grease: f64,
    total_grease: f64,
    movement: f64,
    main_beam_index: usize,
    last_beam_index: usize,
    max_exposure: f64,
}

/// Recomputes the cell across evenly spaced smear values and reports the
/// summed-curve shape of each, a batch rendition of dragging the smear
/// control across its range.
fn run_sweep(cell: &mut Cell, steps: usize, json: bool) {
    let steps = steps.max(2);
    let mut rows = Vec::with_capacity(steps);
    for index in 0..steps {
        let requested = MIN_TOTAL_GREASE
            + (MAX_TOTAL_GREASE - MIN_TOTAL_GREASE) * index as f64 / (steps - 1) as f64;
        cell.set_total_grease(requested);
        rows.push(SweepStep {
            requested_grease: requested,
            total_grease: cell.total_grease(),
            movement: cell.movement(),
            main_beam_index: cell.main_beam_index(),
            last_beam_index: cell.last_beam_index(),
            max_exposure: cell.max_exposure(),
        });
    }

    if json {
        let summary = serde_json::json!({
            "tick_count": cell.tick_count(),
            "steps": rows,
        });
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
        return;
    }

    info!("smear sweep over {} steps at {} ticks", steps, cell.tick_count());
    println!("──────────────────────────────────────────────────────────");
    println!("  requested  effective  movement       span        max");
    println!("──────────────────────────────────────────────────────────");
    for step in rows {
        println!(
            "  {:>9.3}  {:>9.3}  {:>8.3}  {:>4}..={:<4}  {:>8.3}",
            step.requested_grease,
            step.total_grease,
            step.movement,
            step.main_beam_index,
            step.last_beam_index,
            step.max_exposure
        );
    }
}
