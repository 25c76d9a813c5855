//! Bar and annotation geometry for grouped bar charts.
//!
//! Everything here is in data coordinates: one unit per category on the category axis,
//! data values on the value axis. Annotation offsets are in points and are converted to
//! pixels by the renderer.

use crate::models::DatasetView;
use serde::{Deserialize, Serialize};

/// Thickness of one bar when a group holds at most two series.
pub const BAR_THICKNESS: f64 = 0.35;
/// Total width a group may occupy inside its category unit.
pub const GROUP_SPAN: f64 = 0.70;
/// Upper bound of the value axis when no value is positive.
pub const VALUE_EPSILON: f64 = 1.0;
pub const DEFAULT_HEADROOM: f64 = 1.2;
pub const VERTICAL_LABEL_OFFSET_PT: f64 = 4.0;
pub const HORIZONTAL_LABEL_OFFSET_PT: f64 = 3.0;

/// Direction the bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Categories along x, values along y.
    #[default]
    Vertical,
    /// Categories along y (first category on top), values along x.
    Horizontal,
}

impl Orientation {
    /// Map a (category, value) position to plot (x, y).
    pub fn to_xy(self, category: f64, value: f64) -> (f64, f64) {
        match self {
            Orientation::Vertical => (category, value),
            Orientation::Horizontal => (value, category),
        }
    }
}

/// Where a bar sits inside its group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSlot {
    pub category: usize,
    pub series: usize,
    /// Center of the bar along the category axis.
    pub center: f64,
}

/// Slot layout for `n_categories` groups of `n_series` bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub orientation: Orientation,
    pub n_categories: usize,
    pub n_series: usize,
    pub thickness: f64,
    pub slots: Vec<BarSlot>,
}

impl Geometry {
    /// Center of category `index` on the category axis. Horizontal charts count from the
    /// top, so index 0 gets the highest coordinate.
    pub fn category_position(&self, index: usize) -> f64 {
        category_position(self.orientation, self.n_categories, index)
    }

    /// Category axis extent, half a unit of padding on each side.
    pub fn category_range(&self) -> (f64, f64) {
        (-0.5, self.n_categories as f64 - 0.5)
    }

    pub fn slot(&self, category: usize, series: usize) -> Option<&BarSlot> {
        self.slots.get(category * self.n_series + series)
    }
}

fn category_position(orientation: Orientation, n: usize, index: usize) -> f64 {
    match orientation {
        Orientation::Vertical => index as f64,
        Orientation::Horizontal => (n - 1 - index) as f64,
    }
}

/// Axis-aligned bar rectangle in (category, value) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub category_from: f64,
    pub category_to: f64,
    pub value_from: f64,
    pub value_to: f64,
}

impl BarRect {
    /// True when the interiors intersect along the category axis. Bars sharing an
    /// edge do not overlap.
    pub fn overlaps(&self, other: &BarRect) -> bool {
        const EPS: f64 = 1e-9;
        self.category_from < other.category_to - EPS && other.category_from < self.category_to - EPS
    }
}

/// Text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Text sits above the anchor, horizontally centred.
    CenterBottom,
    /// Text hangs below the anchor, horizontally centred.
    CenterTop,
    /// Text starts right of the anchor, vertically centred.
    LeftCenter,
    /// Text ends left of the anchor, vertically centred.
    RightCenter,
}

/// Annotation anchor at the value end of a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub category: f64,
    pub value: f64,
    /// Offset in points, +x right and +y up.
    pub offset_pt: (f64, f64),
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub category: usize,
    pub series: usize,
    pub value: f64,
    pub rect: BarRect,
    pub anchor: LabelAnchor,
}

/// Closed value-axis interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Computes slot positions, bar rectangles and the value-axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlanner {
    /// Multiplier applied to the largest value to leave room for annotations.
    pub headroom: f64,
}

impl Default for LayoutPlanner {
    fn default() -> Self {
        Self {
            headroom: DEFAULT_HEADROOM,
        }
    }
}

impl LayoutPlanner {
    pub fn new(headroom: f64) -> Self {
        Self { headroom }
    }

    /// Lay out `n_categories` groups of `n_series` bars.
    pub fn plan(&self, n_categories: usize, n_series: usize, orientation: Orientation) -> Geometry {
        let k = n_series.max(1);
        let thickness = BAR_THICKNESS.min(GROUP_SPAN / k as f64);
        // Horizontal charts run the category axis bottom-up, so the in-group offset is
        // mirrored to keep the first series on top.
        let sign = match orientation {
            Orientation::Vertical => 1.0,
            Orientation::Horizontal => -1.0,
        };
        let mid = (k as f64 - 1.0) / 2.0;
        let mut slots = Vec::with_capacity(n_categories * n_series);
        for category in 0..n_categories {
            let base = category_position(orientation, n_categories, category);
            for series in 0..n_series {
                slots.push(BarSlot {
                    category,
                    series,
                    center: base + sign * (series as f64 - mid) * thickness,
                });
            }
        }
        Geometry {
            orientation,
            n_categories,
            n_series,
            thickness,
            slots,
        }
    }

    /// One rectangle and annotation anchor per (category, series), in series order.
    /// `dataset` must match the shape the geometry was planned for.
    pub fn place(&self, geometry: &Geometry, dataset: &DatasetView) -> Vec<BarGeometry> {
        let half = geometry.thickness / 2.0;
        let mut bars = Vec::with_capacity(geometry.slots.len());
        for (series_idx, series) in dataset.series.values().enumerate() {
            for (category, &value) in series.values.iter().enumerate() {
                let Some(slot) = geometry.slot(category, series_idx) else {
                    continue;
                };
                bars.push(BarGeometry {
                    category,
                    series: series_idx,
                    value,
                    rect: BarRect {
                        category_from: slot.center - half,
                        category_to: slot.center + half,
                        value_from: value.min(0.0),
                        value_to: value.max(0.0),
                    },
                    anchor: anchor_for(geometry.orientation, slot.center, value),
                });
            }
        }
        bars
    }

    /// `[min(0, min * headroom), max * headroom]`, with the upper bound falling back to
    /// [`VALUE_EPSILON`] when nothing is positive.
    pub fn value_range(&self, dataset: &DatasetView) -> ValueRange {
        let (lo, hi) = dataset
            .values()
            .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let max = if hi > 0.0 { hi * self.headroom } else { VALUE_EPSILON };
        let min = if lo < 0.0 { lo * self.headroom } else { 0.0 };
        ValueRange { min, max }
    }
}

fn anchor_for(orientation: Orientation, center: f64, value: f64) -> LabelAnchor {
    let negative = value < 0.0;
    let (offset_pt, align) = match (orientation, negative) {
        (Orientation::Vertical, false) => ((0.0, VERTICAL_LABEL_OFFSET_PT), TextAlign::CenterBottom),
        (Orientation::Vertical, true) => ((0.0, -VERTICAL_LABEL_OFFSET_PT), TextAlign::CenterTop),
        (Orientation::Horizontal, false) => {
            ((HORIZONTAL_LABEL_OFFSET_PT, 0.0), TextAlign::LeftCenter)
        }
        (Orientation::Horizontal, true) => {
            ((-HORIZONTAL_LABEL_OFFSET_PT, 0.0), TextAlign::RightCenter)
        }
    };
    LabelAnchor {
        category: center,
        value,
        offset_pt,
        align,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_series_straddle_the_category_center() {
        let g = LayoutPlanner::default().plan(2, 2, Orientation::Vertical);
        let expected = [-0.175, 0.175, 0.825, 1.175];
        for (slot, want) in g.slots.iter().zip(expected) {
            assert!((slot.center - want).abs() < 1e-12, "{} vs {want}", slot.center);
        }
    }

    #[test]
    fn horizontal_puts_first_category_on_top() {
        let g = LayoutPlanner::default().plan(3, 2, Orientation::Horizontal);
        assert_eq!(g.category_position(0), 2.0);
        assert_eq!(g.category_position(2), 0.0);
        // first series above the second within the group
        assert!(g.slot(0, 0).unwrap().center > g.slot(0, 1).unwrap().center);
    }
}
