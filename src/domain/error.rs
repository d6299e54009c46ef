// Chart composition errors
use thiserror::Error;

/// Failures the compositor can report. Data-shape errors are fatal to the
/// render that produced them and are surfaced to the caller; a missing draw
/// surface is logged and the render skipped instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("historical series is empty; there is no point to anchor the forecast to")]
    EmptyHistoricalSeries,

    #[error("series periods are not strictly increasing at {period}")]
    NonMonotonicSeries { period: String },

    #[error("side-by-side model comparison is only available for annual series")]
    UnsupportedGranularityCombination,

    #[error("no draw surface registered for target '{target}'")]
    MissingDrawSurface { target: String },

    #[error("series mixes annual and monthly period keys")]
    MixedGranularity,
}
