// Repository trait for forecasting-API access
use crate::domain::period::Granularity;
use crate::domain::series::SeriesPayload;
use async_trait::async_trait;

/// Which forecasting model a series is requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastModel {
    Arima,
    Theta,
}

impl ForecastModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastModel::Arima => "arima",
            ForecastModel::Theta => "theta",
        }
    }
}

/// Parameters of one forecast request, mirroring what the upstream API
/// expects for a disease/region selection.
#[derive(Debug, Clone)]
pub struct ForecastQuery {
    pub category: String,
    pub disease: String,
    pub data_kind: String,
    pub region: String,
    pub granularity: Granularity,
    /// Forecast horizon in years (annual mode).
    pub horizon_years: u32,
    /// Forecast horizon in periods (monthly mode).
    pub horizon_periods: u32,
    /// Confidence level for the bounds, e.g. 0.95.
    pub alpha: f64,
}

#[async_trait]
pub trait ForecastRepository: Send + Sync {
    /// Fetch one historical+forecast series for the query.
    async fn fetch_forecast(
        &self,
        query: &ForecastQuery,
        model: ForecastModel,
    ) -> anyhow::Result<SeriesPayload>;
}
