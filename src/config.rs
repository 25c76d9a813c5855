//! Per-render configuration and the presets for each dataset kind.

use crate::error::{RenderError, Result};
use crate::format::NumberStyle;
use crate::layout::{DEFAULT_HEADROOM, Orientation};
use crate::models::DatasetKind;
use crate::viz::types::LegendPosition;
use serde::{Deserialize, Serialize};

/// Largest accepted raster edge, in pixels.
pub const MAX_DIMENSION_PX: u32 = 16_384;

pub const DEFAULT_WIDTH_IN: f64 = 10.0;
pub const DEFAULT_HEIGHT_IN: f64 = 8.0;
pub const DEFAULT_COUNTS_HEIGHT_IN: f64 = 7.0;
pub const DEFAULT_DPI: u32 = 100;

/// Human-readable names of the two compared periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodLabels {
    pub current: String,
    pub previous: String,
}

impl PeriodLabels {
    pub fn new(current: impl Into<String>, previous: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            previous: previous.into(),
        }
    }

    /// Replace `{current}` and `{previous}` in `template`.
    pub fn fill(&self, template: &str) -> String {
        template
            .replace("{current}", &self.current)
            .replace("{previous}", &self.previous)
    }
}

/// Everything that shapes one chart apart from the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Figure width in inches.
    pub width: f64,
    /// Figure height in inches.
    pub height: f64,
    pub dpi: u32,
    pub orientation: Orientation,
    /// Chart title; `{current}` / `{previous}` expand to the period labels.
    pub title_template: String,
    pub value_axis_label: String,
    /// Legend entry per period; `{period}` expands to that period's label.
    pub series_label_template: String,
    pub period_labels: PeriodLabels,
    pub number_style: NumberStyle,
    /// Append the supplied share percentage under each bar value.
    pub annotate_shares: bool,
    pub legend_position: LegendPosition,
    pub headroom: f64,
}

impl RenderConfig {
    /// Defaults reproducing the chart each dataset kind was designed for.
    pub fn preset(kind: DatasetKind, period_labels: PeriodLabels) -> Self {
        let base = RenderConfig {
            width: DEFAULT_WIDTH_IN,
            height: DEFAULT_HEIGHT_IN,
            dpi: DEFAULT_DPI,
            orientation: Orientation::Horizontal,
            title_template: String::new(),
            value_axis_label: "Doanh thu (VNĐ)".into(),
            series_label_template: "Doanh thu {period}".into(),
            period_labels,
            number_style: NumberStyle::AbbreviatedCurrency,
            annotate_shares: false,
            legend_position: LegendPosition::LowerRight,
            headroom: DEFAULT_HEADROOM,
        };
        match kind {
            DatasetKind::RevenueWithShares => RenderConfig {
                orientation: Orientation::Vertical,
                title_template: "Doanh thu công ty tháng {current} và tháng {previous}".into(),
                annotate_shares: true,
                legend_position: LegendPosition::UpperRight,
                headroom: 1.3,
                ..base
            },
            DatasetKind::RevenueByCategory => RenderConfig {
                title_template: "Doanh thu công ty theo CP tháng {current} và tháng {previous}"
                    .into(),
                ..base
            },
            DatasetKind::CountsByCategory => RenderConfig {
                height: DEFAULT_COUNTS_HEIGHT_IN,
                title_template:
                    "Lượt đăng ký mới theo top 5 CP tháng {current} và tháng {previous}".into(),
                value_axis_label: "Lượt đăng ký mới".into(),
                series_label_template: "Lượt đăng ký mới {period}".into(),
                number_style: NumberStyle::PlainGrouped,
                ..base
            },
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_figure_size(mut self, width: f64, height: f64, dpi: u32) -> Self {
        self.width = width;
        self.height = height;
        self.dpi = dpi;
        self
    }

    pub fn title(&self) -> String {
        self.period_labels.fill(&self.title_template)
    }

    /// Legend text for a period label.
    pub fn series_label(&self, period: &str) -> String {
        self.series_label_template.replace("{period}", period)
    }

    /// Raster size in pixels (inches x dpi, rounded).
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width * dpi).round() as u32,
            (self.height * dpi).round() as u32,
        )
    }

    /// Pixels per typographic point at this dpi.
    pub fn px_per_pt(&self) -> f64 {
        self.dpi as f64 / 72.0
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if self.dpi == 0 {
            return Err(RenderError::InvalidConfig("dpi must be positive".into()));
        }
        if !(self.headroom.is_finite() && self.headroom > 1.0) {
            return Err(RenderError::InvalidConfig(format!(
                "headroom must be greater than 1.0, got {}",
                self.headroom
            )));
        }
        let (w, h) = self.pixel_size();
        if w == 0 || h == 0 || w > MAX_DIMENSION_PX || h > MAX_DIMENSION_PX {
            return Err(RenderError::InvalidConfig(format!(
                "raster size {w}x{h}px is outside 1..={MAX_DIMENSION_PX}"
            )));
        }
        Ok(())
    }
}
