// Historical/forecast series alignment
use super::error::ChartError;
use super::period::{Granularity, Period};
use super::series::{ForecastPoint, TimePoint};

/// Plot-ready output of [`align`]: one label axis and four value tracks of
/// identical length. `historical` is non-null exactly over the historical
/// run; `forecast`, `lower` and `upper` are non-null over the forecast run
/// plus the last historical index, which repeats the last historical value
/// in all three so the forecast line and its band start where the
/// historical line ends instead of leaving a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub labels: Vec<Period>,
    pub historical: Vec<Option<f64>>,
    pub forecast: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn granularity(&self) -> Option<Granularity> {
        self.labels.first().map(|p| p.granularity())
    }
}

/// Merge a historical run and a forecast run (with bounds) into parallel
/// tracks sharing one label axis.
///
/// Fails with [`ChartError::EmptyHistoricalSeries`] when there is no
/// historical point to anchor the forecast to, and with
/// [`ChartError::NonMonotonicSeries`] when the concatenated period keys are
/// not strictly increasing (which includes a forecast starting at or before
/// the last historical period). An empty forecast is fine: the forecast
/// tracks then hold nulls everywhere except the anchored last index.
pub fn align(
    historical: &[TimePoint],
    forecast: &[ForecastPoint],
) -> Result<AlignedSeries, ChartError> {
    let anchor = historical
        .last()
        .ok_or(ChartError::EmptyHistoricalSeries)?;

    let labels: Vec<Period> = historical
        .iter()
        .map(|p| p.period)
        .chain(forecast.iter().map(|p| p.period))
        .collect();
    for pair in labels.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ChartError::NonMonotonicSeries {
                period: pair[1].label(),
            });
        }
    }

    let mut historical_track: Vec<Option<f64>> =
        historical.iter().map(|p| Some(p.value)).collect();
    historical_track.extend(std::iter::repeat(None).take(forecast.len()));

    // The forecast family stays null up to the penultimate historical index;
    // the last historical index carries the historical value in all three
    // tracks (no bound exists there yet).
    let mut forecast_track: Vec<Option<f64>> = vec![None; historical.len() - 1];
    forecast_track.push(Some(anchor.value));
    let mut lower_track = forecast_track.clone();
    let mut upper_track = forecast_track.clone();

    forecast_track.extend(forecast.iter().map(|p| Some(p.value)));
    lower_track.extend(forecast.iter().map(|p| Some(p.lower)));
    upper_track.extend(forecast.iter().map(|p| Some(p.upper)));

    Ok(AlignedSeries {
        labels,
        historical: historical_track,
        forecast: forecast_track,
        lower: lower_track,
        upper: upper_track,
    })
}
