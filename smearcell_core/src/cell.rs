//! The photosite model.
//!
//! A [`Cell`] owns its configuration and the preallocated exposure storage,
//! and re-runs the full pipeline (clamp, geometry, beam reset, integration)
//! on every configuration change. There is no incremental update path and no
//! partial-result visibility: a setter returns only after the new tables are
//! complete.

use nalgebra::{DMatrix, DVector};

use crate::geometry::{movement, BeamSpan};
use crate::limits::{
    clamp_tick_count, clamp_total_grease, DELAY, MAX_BEAM_COUNT, MAX_TICK_COUNT,
};
use crate::snapshot::CellSnapshot;

/// One photosite under constant-velocity smear.
///
/// Storage for beam positions, per-beam sums and the per-tick exposure table
/// is allocated once at construction for the worst-case configuration and
/// reused across recomputations; it is reset, never resized.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Effective (clamped) number of exposure ticks.
    tick_count: usize,
    /// Effective (clamped) total smear in cell widths.
    total_grease: f64,
    /// Beam span of the current configuration, recomputed before any
    /// position or exposure value is touched.
    span: BeamSpan,
    /// Current beam positions. Slots past `span.last` hold stale values
    /// from earlier configurations and must never be read.
    beam_positions: DVector<f64>,
    /// Per-beam exposure summed over all ticks (column sums of `exposure`).
    sum_by_beam: DVector<f64>,
    /// Exposure fractions indexed by `(tick, beam)`.
    exposure: DMatrix<f64>,
}

impl Cell {
    /// Creates a cell and computes the exposure tables for the given
    /// configuration. Inputs are clamped, never rejected.
    pub fn new(tick_count: usize, total_grease: f64) -> Self {
        let tick_count = clamp_tick_count(tick_count);
        let total_grease = clamp_total_grease(total_grease, tick_count);
        let mut cell = Self {
            tick_count,
            total_grease,
            span: BeamSpan::for_config(tick_count, total_grease),
            beam_positions: DVector::zeros(MAX_BEAM_COUNT),
            sum_by_beam: DVector::zeros(MAX_BEAM_COUNT),
            exposure: DMatrix::zeros(MAX_TICK_COUNT, MAX_BEAM_COUNT),
        };
        cell.recompute();
        cell
    }

    /// Sets the tick count and recomputes the exposure tables.
    ///
    /// The stored smear is re-clamped against the new tick count before the
    /// recomputation, keeping the movement strictly positive.
    pub fn set_tick_count(&mut self, tick_count: usize) {
        self.tick_count = clamp_tick_count(tick_count);
        self.total_grease = clamp_total_grease(self.total_grease, self.tick_count);
        self.recompute();
    }

    /// Sets the total smear and recomputes the exposure tables.
    pub fn set_total_grease(&mut self, total_grease: f64) {
        self.total_grease = clamp_total_grease(total_grease, self.tick_count);
        self.recompute();
    }

    // ========== Query surface ==========

    /// Effective (clamped) tick count.
    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    /// Effective (clamped) total smear.
    pub fn total_grease(&self) -> f64 {
        self.total_grease
    }

    /// Per-tick beam advancement speed, `1 + grease/ticks`.
    pub fn movement(&self) -> f64 {
        movement(self.tick_count, self.total_grease)
    }

    /// Index of the main beam, the one starting at position 0.
    pub fn main_beam_index(&self) -> usize {
        self.span.main
    }

    /// Index of the last beam covered by the integration pass.
    pub fn last_beam_index(&self) -> usize {
        self.span.last
    }

    /// Largest per-beam exposure sum, for display axis scaling.
    pub fn max_exposure(&self) -> f64 {
        let mut max = 0.0;
        for beam in 0..=self.span.last {
            if self.sum_by_beam[beam] > max {
                max = self.sum_by_beam[beam];
            }
        }
        max
    }

    /// Exposure fraction for one `(tick, beam)` pair.
    ///
    /// # Panics
    ///
    /// Panics when `tick >= tick_count()` or `beam > last_beam_index()`.
    /// The backing storage is oversized, so an unchecked read past the
    /// active window would quietly return stale data.
    pub fn exposure_at(&self, tick: usize, beam: usize) -> f64 {
        assert!(
            tick < self.tick_count,
            "tick {tick} out of range 0..{}",
            self.tick_count
        );
        assert!(
            beam <= self.span.last,
            "beam {beam} out of range 0..={}",
            self.span.last
        );
        self.exposure[(tick, beam)]
    }

    /// Exposure summed over all ticks for one beam.
    ///
    /// # Panics
    ///
    /// Panics when `beam > last_beam_index()`.
    pub fn sum_at(&self, beam: usize) -> f64 {
        assert!(
            beam <= self.span.last,
            "beam {beam} out of range 0..={}",
            self.span.last
        );
        self.sum_by_beam[beam]
    }

    /// Copies the active window of the current state into a serializable
    /// snapshot.
    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot::of(self)
    }

    // ========== Recomputation pipeline ==========

    /// Re-derives the geometry and rebuilds the exposure tables from scratch.
    ///
    /// The span must be updated first: it determines how many beam slots the
    /// reset and the integration pass touch.
    fn recompute(&mut self) {
        self.span = BeamSpan::for_config(self.tick_count, self.total_grease);
        self.reset_beams();
        self.exposure.fill(0.0);
        self.integrate();
    }

    /// Repositions the beams at fixed spacing so that beam `span.main`
    /// starts exactly at 0, and zeroes the per-beam sums.
    fn reset_beams(&mut self) {
        self.sum_by_beam.fill(0.0);
        let mut position = -(self.span.main as f64) * DELAY;
        for beam in 0..=self.span.last {
            self.beam_positions[beam] = position;
            position += DELAY;
        }
    }

    /// The integration pass.
    ///
    /// Ticks run in increasing order with beam positions mutated in place:
    /// a beam's position at tick `t + 1` is its accumulated movement through
    /// ticks `0..=t`, so the outer loop order is load-bearing.
    fn integrate(&mut self) {
        let movement = movement(self.tick_count, self.total_grease);
        for tick in 0..self.tick_count {
            let window = tick as f64;
            for beam in 0..=self.span.last {
                let position = self.beam_positions[beam];
                // Overlap of the footprint [position, position + movement)
                // with the tick window [tick, tick + 1).
                let left = position.max(window);
                let right = (position + movement).min(window + 1.0);
                // Fraction of this beam's traversal time spent inside the
                // window. Non-positive means no overlap, never a subtraction.
                let delta = (right - left) / movement;
                if delta > 0.0 {
                    self.exposure[(tick, beam)] += delta;
                    self.sum_by_beam[beam] += delta;
                }
                // Advance whether or not the beam was lit.
                self.beam_positions[beam] += movement;
            }
        }
    }
}
