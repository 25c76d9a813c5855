use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

/// Failures surfaced by a render call. None of them are transient; no image is produced.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Series, category and share lengths disagree, or the sort series is missing.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("dataset has no categories")]
    EmptyDataset,

    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    #[error("series `{series}` has a non-finite value at index {index}")]
    NonFiniteValue { series: String, index: usize },

    /// No usable font could be registered for chart text.
    #[error("font unavailable: {0}")]
    Font(String),

    /// Drawing failed inside the plotting backend.
    #[error("render backend error: {0}")]
    Backend(String),

    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl RenderError {
    pub(crate) fn backend<E: std::fmt::Debug>(e: E) -> Self {
        RenderError::Backend(format!("{e:?}"))
    }
}
