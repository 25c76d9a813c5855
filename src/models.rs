use crate::align::SortSpec;
use crate::error::{RenderError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Series id for the most recent period (drives sorting by default).
pub const CURRENT_PERIOD: &str = "current";
/// Series id for the period being compared against.
pub const PRIOR_PERIOD: &str = "prior";

/// One measured series: a value per category and optional percentage shares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<Vec<f64>>,
}

impl Series {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            shares: None,
        }
    }

    pub fn with_shares(values: Vec<f64>, shares: Vec<f64>) -> Self {
        Self {
            values,
            shares: Some(shares),
        }
    }

    pub fn share(&self, index: usize) -> Option<f64> {
        self.shares.as_ref().and_then(|s| s.get(index).copied())
    }
}

/// Normalized input to one render: ordered category labels plus parallel series.
///
/// Series keep insertion order; that order decides bar position inside a group,
/// palette color and legend order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetView {
    pub labels: Vec<String>,
    pub series: IndexMap<String, Series>,
}

impl DatasetView {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            series: IndexMap::new(),
        }
    }

    /// Builder-style: append (or replace) a series.
    pub fn with_series(mut self, id: impl Into<String>, series: Series) -> Self {
        self.series.insert(id.into(), series);
        self
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Check the cross-series invariants: N >= 1, at least one series, every values and
    /// shares array has exactly N finite entries.
    pub fn validate(&self) -> Result<()> {
        let n = self.labels.len();
        if n == 0 {
            return Err(RenderError::EmptyDataset);
        }
        if self.series.is_empty() {
            return Err(RenderError::ShapeMismatch("dataset has no series".into()));
        }
        for (id, series) in &self.series {
            if series.values.len() != n {
                return Err(RenderError::ShapeMismatch(format!(
                    "series `{id}` has {} values for {n} labels",
                    series.values.len()
                )));
            }
            if let Some(shares) = &series.shares
                && shares.len() != n
            {
                return Err(RenderError::ShapeMismatch(format!(
                    "series `{id}` has {} shares for {n} labels",
                    shares.len()
                )));
            }
            let non_finite = series.values.iter().position(|v| !v.is_finite()).or_else(|| {
                series
                    .shares
                    .as_ref()
                    .and_then(|s| s.iter().position(|v| !v.is_finite()))
            });
            if let Some(index) = non_finite {
                return Err(RenderError::NonFiniteValue {
                    series: id.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    /// Every value of every series.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.values().flat_map(|s| s.values.iter().copied())
    }
}

/// The three request shapes the engine knows how to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    /// Per-period revenue with share percentages, caller order, vertical bars.
    RevenueWithShares,
    /// Parallel revenue arrays, sorted by the current period.
    RevenueByCategory,
    /// Parallel new-user counts, sorted by the current period.
    CountsByCategory,
}

/// Revenue and share arrays for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodData {
    pub revenue: Vec<f64>,
    pub share: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueSharesData {
    pub labels: Vec<String>,
    pub last_month: PeriodData,
    pub prev_month: PeriodData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueByCategoryData {
    pub labels: Vec<String>,
    pub last_month_revenue: Vec<f64>,
    pub prev_month_revenue: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUserData {
    pub labels: Vec<String>,
    pub new_user_last_month: Vec<i64>,
    pub new_user_prev_month: Vec<i64>,
}

/// A typed chart payload; the variant is the dataset kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetPayload {
    RevenueWithShares(RevenueSharesData),
    RevenueByCategory(RevenueByCategoryData),
    CountsByCategory(NewUserData),
}

impl DatasetPayload {
    pub fn kind(&self) -> DatasetKind {
        match self {
            DatasetPayload::RevenueWithShares(_) => DatasetKind::RevenueWithShares,
            DatasetPayload::RevenueByCategory(_) => DatasetKind::RevenueByCategory,
            DatasetPayload::CountsByCategory(_) => DatasetKind::CountsByCategory,
        }
    }

    /// Category ordering used for this kind: caller order for revenue-with-shares,
    /// descending by the current period otherwise.
    pub fn sort_spec(&self) -> SortSpec {
        match self {
            DatasetPayload::RevenueWithShares(_) => SortSpec::Identity,
            _ => SortSpec::default(),
        }
    }

    /// Normalize into a [`DatasetView`] with `current` and `prior` series.
    pub fn to_view(&self) -> DatasetView {
        match self {
            DatasetPayload::RevenueWithShares(d) => DatasetView::new(d.labels.iter().cloned())
                .with_series(
                    CURRENT_PERIOD,
                    Series::with_shares(d.last_month.revenue.clone(), d.last_month.share.clone()),
                )
                .with_series(
                    PRIOR_PERIOD,
                    Series::with_shares(d.prev_month.revenue.clone(), d.prev_month.share.clone()),
                ),
            DatasetPayload::RevenueByCategory(d) => DatasetView::new(d.labels.iter().cloned())
                .with_series(CURRENT_PERIOD, Series::new(d.last_month_revenue.clone()))
                .with_series(PRIOR_PERIOD, Series::new(d.prev_month_revenue.clone())),
            DatasetPayload::CountsByCategory(d) => {
                let as_f64 = |v: &[i64]| v.iter().map(|x| *x as f64).collect::<Vec<_>>();
                DatasetView::new(d.labels.iter().cloned())
                    .with_series(CURRENT_PERIOD, Series::new(as_f64(&d.new_user_last_month)))
                    .with_series(PRIOR_PERIOD, Series::new(as_f64(&d.new_user_prev_month)))
            }
        }
    }
}

impl From<RevenueSharesData> for DatasetPayload {
    fn from(d: RevenueSharesData) -> Self {
        DatasetPayload::RevenueWithShares(d)
    }
}

impl From<RevenueByCategoryData> for DatasetPayload {
    fn from(d: RevenueByCategoryData) -> Self {
        DatasetPayload::RevenueByCategory(d)
    }
}

impl From<NewUserData> for DatasetPayload {
    fn from(d: NewUserData) -> Self {
        DatasetPayload::CountsByCategory(d)
    }
}
