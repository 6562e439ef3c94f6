//! Text rendering of exposure curves.
//!
//! Renders the same picture the model was built for: one column per tick,
//! the summed series when more than one tick is shown, and a bar per beam
//! scaled to the display axis. The beam axis is labeled relative to the main
//! beam, which sits at offset 0.

use smearcell_core::CellSnapshot;

/// Width of the summed-exposure bar at full display axis scale.
const BAR_WIDTH: usize = 32;

/// Renders a snapshot as a beam-by-beam table with summed-exposure bars.
pub fn render(snapshot: &CellSnapshot) -> String {
    let mut out = String::new();
    // The vertical display axis runs to ceil(max) + 1, so the largest bar
    // never touches the edge.
    let axis_max = snapshot.max_exposure.ceil() + 1.0;
    let show_total = snapshot.tick_count > 1;

    out.push_str(&format!(
        "ticks: {}   smear: {:.3}   movement: {:.3}\n",
        snapshot.tick_count, snapshot.total_grease, snapshot.movement
    ));

    let mut header = String::from("  beam");
    for tick in 0..snapshot.tick_count {
        header.push_str(&format!("{:>9}", format!("tick {}", tick + 1)));
    }
    if show_total {
        header.push_str(&format!("{:>10}", "total"));
    }
    out.push_str(&"─".repeat(header.len().max(40)));
    out.push('\n');
    out.push_str(&header);
    out.push('\n');

    for beam in 0..=snapshot.last_beam_index {
        let mut row = format!("{:>6}", snapshot.beam_offset(beam));
        for tick in 0..snapshot.tick_count {
            row.push_str(&format!("{:>9.3}", snapshot.exposure_by_tick[tick][beam]));
        }
        let sum = snapshot.sum_by_beam[beam];
        if show_total {
            row.push_str(&format!("{:>10.3}", sum));
        }
        let bar = ((sum / axis_max) * BAR_WIDTH as f64).round() as usize;
        if bar > 0 {
            row.push_str("  ");
            row.push_str(&"█".repeat(bar));
        }
        row.push('\n');
        out.push_str(&row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use smearcell_core::Cell;

    #[test]
    fn test_render_single_tick_has_no_total_column() {
        let chart = render(&Cell::new(1, 0.0).snapshot());
        assert!(chart.contains("tick 1"));
        assert!(!chart.contains("total"));
        // The main beam row sits at offset 0 with a full tick of exposure.
        assert!(chart.contains("     0    1.000"));
    }

    #[test]
    fn test_render_multi_tick_includes_total_column() {
        let chart = render(&Cell::new(2, 0.0).snapshot());
        assert!(chart.contains("tick 1"));
        assert!(chart.contains("tick 2"));
        assert!(chart.contains("total"));
        assert!(chart.contains("2.000"));
    }

    #[test]
    fn test_render_covers_every_beam() {
        let snapshot = Cell::new(3, 1.5).snapshot();
        let chart = render(&snapshot);
        // Header, separator, config line, one row per beam.
        assert_eq!(chart.lines().count(), 3 + snapshot.last_beam_index + 1);
    }
}
