//! period_bars
//!
//! Render period-over-period grouped bar charts ("this month" vs "last month") to PNG.
//! Pairs with the `period-bars` CLI.
//!
//! ### Features
//! - Vertical or horizontal grouped bars, one bar per period in each category
//! - Categories sorted by the current period (or kept in caller order) without ever
//!   separating a label from its values
//! - Abbreviated money amounts (`1.50 tỷ`, `2.35 tr`, `4.5 k`) or grouped counts
//!   (`12,345`) on both bar annotations and axis ticks
//! - Optional share percentages under each bar value
//!
//! ### Example
//! ```no_run
//! use period_bars::{PeriodLabels, RenderConfig};
//! use period_bars::models::{DatasetPayload, RevenueByCategoryData};
//!
//! let payload = DatasetPayload::from(RevenueByCategoryData {
//!     labels: vec!["A".into(), "B".into(), "C".into()],
//!     last_month_revenue: vec![300.0, 100.0, 500.0],
//!     prev_month_revenue: vec![200.0, 150.0, 450.0],
//! });
//! let config = RenderConfig::preset(payload.kind(), PeriodLabels::new("05/2024", "04/2024"));
//! let png = period_bars::render(&payload, &config)?;
//! std::fs::write("revenue.png", png.as_bytes())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod format;
pub mod layout;
pub mod models;
pub mod request;
pub mod viz;

pub use align::{SortSpec, align};
pub use config::{PeriodLabels, RenderConfig};
pub use error::{RenderError, Result};
pub use format::NumberStyle;
pub use layout::{LayoutPlanner, Orientation};
pub use models::{DatasetKind, DatasetPayload, DatasetView, Series};
pub use viz::{ChartComposer, ChartStyle, RasterBuffer, render, render_request};
