//! Public types for the chart renderer.

use plotters::chart::SeriesLabelPosition;
use serde::{Deserialize, Serialize};

/// Corner of the plot area holding the legend box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    UpperRight,
    LowerRight,
    UpperLeft,
    LowerLeft,
}

impl From<LegendPosition> for SeriesLabelPosition {
    fn from(p: LegendPosition) -> Self {
        match p {
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        }
    }
}

/// An encoded PNG image plus its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterBuffer {
    pub(crate) fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
