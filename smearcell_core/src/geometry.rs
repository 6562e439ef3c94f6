//! Beam-span geometry derived from a validated configuration.
//!
//! Given a tick count and a total smear, the integration pass needs a main
//! beam (the one whose trajectory starts at position 0) and an upper bound on
//! the beam indices that can ever illuminate the photosite. Both are closed
//! form, not a search, and the bound differs between the positive- and
//! negative-smear cases because the smear changes the advancement speed.

use crate::limits::BEAMS_PER_CELL;

/// Per-tick beam advancement speed for a validated configuration.
///
/// Strictly positive as long as the smear has been clamped against the tick
/// count (see [`clamp_total_grease`](crate::limits::clamp_total_grease)).
pub fn movement(tick_count: usize, total_grease: f64) -> f64 {
    1.0 + total_grease / tick_count as f64
}

/// The span of beam indices one configuration must simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamSpan {
    /// Index of the main beam, the display origin starting at position 0.
    pub main: usize,
    /// Index of the last beam covered by the integration pass.
    pub last: usize,
}

impl BeamSpan {
    /// Derives the span for a validated tick count and total smear.
    ///
    /// The ceiling rounding and the negative branch are part of the numeric
    /// contract. The formulas are deliberately not simplified; off-by-one
    /// changes here alter which beams get simulated.
    pub fn for_config(tick_count: usize, total_grease: f64) -> Self {
        let beams = BEAMS_PER_CELL as f64;
        if total_grease < 0.0 {
            let movement = movement(tick_count, total_grease);
            return Self {
                main: (movement * beams).ceil() as usize,
                last: ((movement + movement - total_grease) * beams).ceil() as usize + 1,
            };
        }
        Self {
            main: ((1.0 + total_grease) * beams).ceil() as usize,
            last: ((2.0 + total_grease) * beams).ceil() as usize,
        }
    }

    /// Number of beam slots the span occupies, bound beam included.
    pub fn beam_count(&self) -> usize {
        self.last + 1
    }

    /// Width of the span in beam indices.
    pub fn width(&self) -> usize {
        self.last - self.main
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::{clamp_total_grease, MAX_BEAM_COUNT};
    use approx::assert_relative_eq;

    #[test]
    fn test_movement_without_smear_is_unit() {
        for ticks in 1..=20 {
            assert_relative_eq!(movement(ticks, 0.0), 1.0);
        }
    }

    #[test]
    fn test_movement_splits_smear_across_ticks() {
        assert_relative_eq!(movement(4, 2.0), 1.5);
        assert_relative_eq!(movement(4, -2.0), 0.5);
    }

    #[test]
    fn test_span_without_smear() {
        let span = BeamSpan::for_config(1, 0.0);
        assert_eq!(span.main, 8);
        assert_eq!(span.last, 16);
    }

    #[test]
    fn test_span_positive_smear() {
        // main = ceil((1 + 2.5) * 8) = 28, last = ceil((2 + 2.5) * 8) = 36
        let span = BeamSpan::for_config(10, 2.5);
        assert_eq!(span.main, 28);
        assert_eq!(span.last, 36);
    }

    #[test]
    fn test_span_negative_smear() {
        // movement = 1 - 2/4 = 0.5: main = ceil(0.5 * 8) = 4,
        // last = ceil((0.5 + 0.5 + 2) * 8) + 1 = 25
        let span = BeamSpan::for_config(4, -2.0);
        assert_eq!(span.main, 4);
        assert_eq!(span.last, 25);
    }

    #[test]
    fn test_span_ordering_and_capacity() {
        for ticks in 1..=20 {
            let mut magnitude = 0.0;
            while magnitude <= 5.0 {
                for grease in [magnitude, -magnitude] {
                    let grease = clamp_total_grease(grease, ticks);
                    let span = BeamSpan::for_config(ticks, grease);
                    assert!(span.last >= span.main, "inverted span for g={grease} n={ticks}");
                    assert!(span.beam_count() <= MAX_BEAM_COUNT, "overflow for g={grease} n={ticks}");
                }
                magnitude += 0.125;
            }
        }
    }

    #[test]
    fn test_span_width_never_shrinks_with_magnitude() {
        // Ordered by effective magnitude: the negative-side clamp can map a
        // larger request back to a smaller effective smear.
        for ticks in [1usize, 3, 5, 10, 20] {
            for sign in [1.0, -1.0] {
                let mut samples: Vec<(f64, usize)> = Vec::new();
                let mut magnitude = 0.0;
                while magnitude <= 5.0 {
                    let grease = clamp_total_grease(sign * magnitude, ticks);
                    let width = BeamSpan::for_config(ticks, grease).width();
                    samples.push((grease.abs(), width));
                    magnitude += 0.0625;
                }
                samples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
                for pair in samples.windows(2) {
                    assert!(
                        pair[1].1 >= pair[0].1,
                        "span shrank with |g| for n={ticks}: {pair:?}"
                    );
                }
            }
        }
    }
}
