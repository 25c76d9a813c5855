//! Styling constants passed explicitly to every render.

use plotters::prelude::*;

const SKYBLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHTCORAL: RGBColor = RGBColor(240, 128, 128);

/// Microsoft Office (2013+) chart series palette, used after the two period colors.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Font sizes (points), colors and tick density. Read-only during a render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title_pt: f64,
    pub axis_label_pt: f64,
    pub tick_pt: f64,
    pub annotation_pt: f64,
    pub legend_pt: f64,
    pub palette: Vec<RGBColor>,
    pub grid_color: RGBColor,
    pub grid_alpha: f64,
    /// Dash and gap length of grid lines, in points.
    pub grid_dash_pt: (f64, f64),
    /// Requested number of value-axis ticks.
    pub value_ticks: usize,
    /// Outer margin, in points.
    pub margin_pt: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let mut palette = vec![SKYBLUE, LIGHTCORAL];
        palette.extend(OFFICE10);
        Self {
            title_pt: 14.0,
            axis_label_pt: 10.0,
            tick_pt: 10.0,
            annotation_pt: 8.0,
            legend_pt: 10.0,
            palette,
            grid_color: RGBColor(176, 176, 176),
            grid_alpha: 0.7,
            grid_dash_pt: (3.7, 1.6),
            value_ticks: 8,
            margin_pt: 10.0,
        }
    }
}

impl ChartStyle {
    /// Color for the `idx`-th series; wraps around the palette.
    pub fn series_color(&self, idx: usize) -> RGBColor {
        if self.palette.is_empty() {
            return OFFICE10[idx % OFFICE10.len()];
        }
        self.palette[idx % self.palette.len()]
    }

    pub fn grid_style(&self) -> ShapeStyle {
        self.grid_color.mix(self.grid_alpha).stroke_width(1)
    }
}
