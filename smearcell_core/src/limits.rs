//! Configuration bounds and input clamping.
//!
//! Out-of-range inputs are silently clamped to the nearest valid value; there
//! are no error paths. Callers read the effective values back through the
//! [`Cell`](crate::cell::Cell) accessors.
//!
//! The smear clamp depends on the tick count (the per-tick beam movement
//! `1 + grease/ticks` must stay strictly positive), so it takes the tick
//! count as an explicit argument and always runs after the tick count has
//! been finalized.

/// Minimum number of exposure ticks.
pub const MIN_TICK_COUNT: usize = 1;
/// Maximum number of exposure ticks.
pub const MAX_TICK_COUNT: usize = 20;
/// Minimum total smear over the whole exposure, in cell widths.
pub const MIN_TOTAL_GREASE: f64 = -5.0;
/// Maximum total smear over the whole exposure, in cell widths.
pub const MAX_TOTAL_GREASE: f64 = 5.0;
/// Number of beams sampling one cell width.
pub const BEAMS_PER_CELL: usize = 8;
/// Spacing between adjacent beams, where 1.0 is one cell width.
pub const DELAY: f64 = 1.0 / BEAMS_PER_CELL as f64;

/// Beam storage capacity, sized for the worst-case configuration (maximum
/// tick count and maximum smear). One slot past the largest reachable last
/// beam index, so storage never reallocates.
pub const MAX_BEAM_COUNT: usize = (2 + MAX_TOTAL_GREASE as usize) * BEAMS_PER_CELL + 1;

/// Clamps a requested tick count to `[MIN_TICK_COUNT, MAX_TICK_COUNT]`.
pub fn clamp_tick_count(tick_count: usize) -> usize {
    tick_count.clamp(MIN_TICK_COUNT, MAX_TICK_COUNT)
}

/// Clamps a requested total smear to `[MIN_TOTAL_GREASE, MAX_TOTAL_GREASE]`,
/// then holds a negative smear strictly below the tick count in magnitude.
///
/// A negative smear whose magnitude reaches the tick count would drive the
/// per-tick movement `1 + grease/ticks` to zero or below, which breaks the
/// direction and overlap math of the integration pass. Such values are
/// pulled back to one tick short: `-(tick_count - 1)`.
pub fn clamp_total_grease(total_grease: f64, tick_count: usize) -> f64 {
    let grease = total_grease.clamp(MIN_TOTAL_GREASE, MAX_TOTAL_GREASE);
    if grease < 0.0 && -grease >= tick_count as f64 {
        return -((tick_count - 1) as f64);
    }
    grease
}
