//! Category ordering that keeps every series aligned with its label.

use crate::error::{RenderError, Result};
use crate::models::{CURRENT_PERIOD, DatasetView, Series};
use serde::{Deserialize, Serialize};

/// Which series (if any) drives the category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortSpec {
    /// Keep the caller-supplied order.
    Identity,
    /// Sort categories by this series, largest first. Ties keep their input order.
    Descending { series_id: String },
}

impl SortSpec {
    pub fn descending_by(series_id: impl Into<String>) -> Self {
        SortSpec::Descending {
            series_id: series_id.into(),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::descending_by(CURRENT_PERIOD)
    }
}

/// Reordering of `0..n`: position `j` of the output takes input index `indices[j]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Permutation((0..n).collect())
    }

    /// Stable descending order of `values`.
    pub fn sorting_descending(values: &[f64]) -> Self {
        let mut idx: Vec<usize> = (0..values.len()).collect();
        idx.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
        Permutation(idx)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(j, &i)| i == j)
    }

    /// Reorder `items`; `items.len()` must equal the permutation length.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.0.iter().map(|&i| items[i].clone()).collect()
    }

    pub fn inverse(&self) -> Permutation {
        let mut inv = vec![0; self.0.len()];
        for (j, &i) in self.0.iter().enumerate() {
            inv[i] = j;
        }
        Permutation(inv)
    }
}

/// Align `dataset` according to `sort_spec`.
pub fn align(dataset: &DatasetView, sort_spec: &SortSpec) -> Result<DatasetView> {
    align_with_permutation(dataset, sort_spec).map(|(view, _)| view)
}

/// Like [`align`], also returning the permutation that was applied.
pub fn align_with_permutation(
    dataset: &DatasetView,
    sort_spec: &SortSpec,
) -> Result<(DatasetView, Permutation)> {
    dataset.validate()?;
    let perm = match sort_spec {
        SortSpec::Identity => Permutation::identity(dataset.len()),
        SortSpec::Descending { series_id } => {
            let driver = dataset.series.get(series_id).ok_or_else(|| {
                RenderError::ShapeMismatch(format!("sort series `{series_id}` is not in the dataset"))
            })?;
            Permutation::sorting_descending(&driver.values)
        }
    };
    Ok((reorder(dataset, &perm), perm))
}

/// Apply `perm` to the labels and to every values/shares array.
pub fn reorder(dataset: &DatasetView, perm: &Permutation) -> DatasetView {
    DatasetView {
        labels: perm.apply(&dataset.labels),
        series: dataset
            .series
            .iter()
            .map(|(id, s)| {
                let series = Series {
                    values: perm.apply(&s.values),
                    shares: s.shares.as_ref().map(|sh| perm.apply(sh)),
                };
                (id.clone(), series)
            })
            .collect(),
    }
}
