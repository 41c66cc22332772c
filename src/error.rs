use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Failure taxonomy for the layout core.
///
/// Geometry and lookup variants signal caller bugs and fail fast. Degenerate
/// business data (empty series, zero pie totals, equal min/max) is absorbed
/// by the pipeline with safe defaults and never surfaces here.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid plot area: width={width}, height={height}")]
    InvalidPlotArea { width: u32, height: u32 },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("wedge {index} is not part of this pie (wedge count {count})")]
    WedgeNotFound { index: usize, count: usize },

    #[error("color palette is empty")]
    EmptyPalette,

    #[error("invalid data: {0}")]
    InvalidData(String),
}
