//! Utility functions for the renderer: tick positions, gutter sizing, dashed lines.

use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;

use crate::layout::ValueRange;

/// Value-axis tick positions, identical to the ones Plotters labels when asked for
/// `count` labels on the same range.
pub fn value_ticks(range: ValueRange, count: usize) -> Vec<f64> {
    RangedCoordf64::from(range.min..range.max).key_points(count)
}

/// Size of a label gutter: widest label, optional axis title band, and padding.
/// Clamped so a single long label cannot swallow the plot.
pub fn gutter_px(widest_label_px: u32, desc_px: f64, pad_px: f64, max_px: u32) -> u32 {
    let total = widest_label_px as f64 + desc_px + pad_px;
    (total.ceil() as u32).clamp(16, max_px.max(16))
}

/// Split the pixel segment `from -> to` into dashes of `dash` px separated by `gap` px.
pub fn dashed_segments(from: (i32, i32), to: (i32, i32), dash: f64, gap: f64) -> Vec<[(i32, i32); 2]> {
    let (dx, dy) = ((to.0 - from.0) as f64, (to.1 - from.1) as f64);
    let len = dx.hypot(dy);
    if len < 1.0 || dash <= 0.0 {
        return vec![[from, to]];
    }
    let (ux, uy) = (dx / len, dy / len);
    let at = |d: f64| {
        (
            from.0 + (ux * d).round() as i32,
            from.1 + (uy * d).round() as i32,
        )
    };
    let step = dash + gap.max(0.0);
    let mut out = Vec::new();
    let mut start = 0.0;
    while start < len {
        let end = (start + dash).min(len);
        out.push([at(start), at(end)]);
        start += step;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashes_cover_the_segment_start_and_end() {
        let segs = dashed_segments((0, 10), (100, 10), 4.0, 2.0);
        assert_eq!(segs.len(), 17);
        assert_eq!(segs[0][0], (0, 10));
        assert_eq!(segs.last().unwrap()[1], (100, 10));
        assert!(segs.iter().all(|s| s[0].1 == 10 && s[1].1 == 10));
    }

    #[test]
    fn gutter_is_clamped() {
        assert_eq!(gutter_px(1000, 10.0, 8.0, 300), 300);
        assert_eq!(gutter_px(0, 0.0, 0.0, 300), 16);
    }
}
