//! Serializable snapshot of a computed cell state.
//!
//! A snapshot copies the active window out of the oversized backing storage,
//! so consumers (chart renderers, JSON exporters) never see the stale slots
//! past the last beam.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// The full result of one recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Effective (clamped) tick count
    pub tick_count: usize,

    /// Effective (clamped) total smear in cell widths
    pub total_grease: f64,

    /// Per-tick beam advancement speed
    pub movement: f64,

    /// Index of the main beam (display origin)
    pub main_beam_index: usize,

    /// Index of the last simulated beam
    pub last_beam_index: usize,

    /// One row per tick, `last_beam_index + 1` exposure fractions each
    pub exposure_by_tick: Vec<Vec<f64>>,

    /// Per-beam exposure summed over all ticks
    pub sum_by_beam: Vec<f64>,

    /// Largest per-beam sum, for display axis scaling
    pub max_exposure: f64,
}

impl CellSnapshot {
    /// Copies the active window of a cell's state.
    pub fn of(cell: &Cell) -> Self {
        let beams = cell.last_beam_index() + 1;
        let exposure_by_tick = (0..cell.tick_count())
            .map(|tick| (0..beams).map(|beam| cell.exposure_at(tick, beam)).collect())
            .collect();
        let sum_by_beam = (0..beams).map(|beam| cell.sum_at(beam)).collect();
        Self {
            tick_count: cell.tick_count(),
            total_grease: cell.total_grease(),
            movement: cell.movement(),
            main_beam_index: cell.main_beam_index(),
            last_beam_index: cell.last_beam_index(),
            exposure_by_tick,
            sum_by_beam,
            max_exposure: cell.max_exposure(),
        }
    }

    /// Beam index relative to the main beam, the origin used for display.
    pub fn beam_offset(&self, beam: usize) -> i64 {
        beam as i64 - self.main_beam_index as i64
    }
}
