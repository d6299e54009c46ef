// Series domain models
use super::period::{Granularity, Period};

/// One historical sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub period: Period,
    pub value: f64,
}

impl TimePoint {
    pub fn new(period: Period, value: f64) -> Self {
        Self { period, value }
    }
}

/// One forecast sample with its confidence bounds.
///
/// Valid upstream data satisfies `lower <= value <= upper`; the bounds are
/// carried through as-is and never corrected locally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub period: Period,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ForecastPoint {
    pub fn new(period: Period, value: f64, lower: f64, upper: f64) -> Self {
        Self {
            period,
            value,
            lower,
            upper,
        }
    }
}

/// A parsed forecasting-API response: disjoint historical and forecast runs
/// plus the labels the chart title is built from.
#[derive(Debug, Clone)]
pub struct SeriesPayload {
    pub historical: Vec<TimePoint>,
    pub forecast: Vec<ForecastPoint>,
    pub model_label: String,
    pub region_label: String,
}

impl SeriesPayload {
    pub fn new(
        historical: Vec<TimePoint>,
        forecast: Vec<ForecastPoint>,
        model_label: String,
        region_label: String,
    ) -> Self {
        Self {
            historical,
            forecast,
            model_label,
            region_label,
        }
    }

    /// Granularity is read off the first historical point; monthly payloads
    /// carry year-month keys, annual ones bare years.
    pub fn granularity(&self) -> Option<Granularity> {
        self.historical.first().map(|p| p.period.granularity())
    }

    /// Chart title, e.g. "21 Maranhão • ARIMA".
    pub fn title(&self) -> String {
        format!("{} • {}", self.region_label, self.model_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_from_first_point() {
        let annual = SeriesPayload::new(
            vec![TimePoint::new(Period::Year(2020), 10.0)],
            Vec::new(),
            "ARIMA".to_string(),
            "21 Maranhão".to_string(),
        );
        assert_eq!(annual.granularity(), Some(Granularity::Annual));

        let monthly = SeriesPayload::new(
            vec![TimePoint::new(Period::Month { year: 2020, month: 1 }, 10.0)],
            Vec::new(),
            "ARIMA".to_string(),
            "21 Maranhão".to_string(),
        );
        assert_eq!(monthly.granularity(), Some(Granularity::Monthly));

        let empty = SeriesPayload::new(
            Vec::new(),
            Vec::new(),
            "ARIMA".to_string(),
            "21 Maranhão".to_string(),
        );
        assert_eq!(empty.granularity(), None);
    }

    #[test]
    fn test_title() {
        let payload = SeriesPayload::new(
            vec![TimePoint::new(Period::Year(2020), 10.0)],
            Vec::new(),
            "ThetaForecaster (sktime)".to_string(),
            "21 Maranhão".to_string(),
        );
        assert_eq!(payload.title(), "21 Maranhão • ThetaForecaster (sktime)");
    }
}
