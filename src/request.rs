//! JSON request bodies, one per dataset kind.
//!
//! ```
//! use period_bars::request::ChartRequest;
//! use period_bars::models::RevenueByCategoryData;
//!
//! let req: ChartRequest<RevenueByCategoryData> = serde_json::from_str(r#"{
//!     "chart_data": {
//!         "labels": ["A", "B"],
//!         "last_month_revenue": [1200000, 800000],
//!         "prev_month_revenue": [900000, 950000]
//!     },
//!     "last_month_str": "05/2024",
//!     "prev_month_str": "04/2024"
//! }"#)?;
//! let (payload, config) = req.into_parts();
//! assert_eq!(config.dpi, 100);
//! # let _ = payload;
//! # Ok::<(), serde_json::Error>(())
//! ```

use crate::config::{PeriodLabels, RenderConfig};
use crate::layout::Orientation;
use crate::models::DatasetPayload;
use serde::{Deserialize, Serialize};

/// Request envelope: chart data, the two period labels and optional figure overrides.
/// Missing overrides fall back to the kind's preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest<D> {
    pub chart_data: D,
    pub last_month_str: String,
    pub prev_month_str: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl<D> ChartRequest<D>
where
    D: Into<DatasetPayload>,
{
    pub fn period_labels(&self) -> PeriodLabels {
        PeriodLabels::new(&self.last_month_str, &self.prev_month_str)
    }

    /// Split into the typed payload and a preset config with this request's overrides.
    pub fn into_parts(self) -> (DatasetPayload, RenderConfig) {
        let periods = self.period_labels();
        let payload: DatasetPayload = self.chart_data.into();
        let mut config = RenderConfig::preset(payload.kind(), periods);
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(o) = self.orientation {
            config.orientation = o;
        }
        (payload, config)
    }
}
