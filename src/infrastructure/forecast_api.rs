// Forecasting API client
use crate::application::forecast_repository::{ForecastModel, ForecastQuery, ForecastRepository};
use crate::domain::period::Granularity;
use crate::domain::series::SeriesPayload;
use crate::infrastructure::payload::WireSeriesResponse;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

/// HTTP client for the forecasting backend: `POST /prever` (ARIMA),
/// `POST /prever/theta` and `GET /prever/mensal` for the precomputed
/// monthly series.
#[derive(Debug, Clone)]
pub struct ForecastApiRepository {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct PrevisaoRequest<'a> {
    categoria: &'a str,
    doenca: &'a str,
    tipo_dado: &'a str,
    estado: &'a str,
    modo: &'a str,
    modelo: &'a str,
    anos_previsao: u32,
    periodos_previsao: u32,
    alpha: f64,
}

impl ForecastApiRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn parse_response(&self, response: reqwest::Response) -> Result<SeriesPayload> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("forecast request failed with status {}: {}", status, body);
        }

        let wire = response
            .json::<WireSeriesResponse>()
            .await
            .context("failed to parse forecast response")?;

        wire.into_payload()
    }
}

#[async_trait]
impl ForecastRepository for ForecastApiRepository {
    async fn fetch_forecast(
        &self,
        query: &ForecastQuery,
        model: ForecastModel,
    ) -> Result<SeriesPayload> {
        if query.granularity == Granularity::Monthly {
            // Monthly series are precomputed server-side and exposed on a
            // single endpoint.
            let url = format!("{}/prever/mensal", self.base_url);
            tracing::debug!("fetching monthly series from {}", url);
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .context("failed to reach the forecasting API")?;
            return self.parse_response(response).await;
        }

        let url = match model {
            ForecastModel::Arima => format!("{}/prever", self.base_url),
            ForecastModel::Theta => format!("{}/prever/theta", self.base_url),
        };
        let body = PrevisaoRequest {
            categoria: &query.category,
            doenca: &query.disease,
            tipo_dado: &query.data_kind,
            estado: &query.region,
            modo: "anual",
            modelo: model.as_str(),
            anos_previsao: query.horizon_years,
            periodos_previsao: query.horizon_periods,
            alpha: query.alpha,
        };

        tracing::debug!("requesting {} forecast from {}", model.as_str(), url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("failed to reach the forecasting API")?;

        self.parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let repo = ForecastApiRepository::new("http://localhost:8000/".to_string());
        assert_eq!(repo.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_request_body_shape() {
        let body = PrevisaoRequest {
            categoria: "sepse",
            doenca: "Óbitos por Sepse",
            tipo_dado: "principal",
            estado: "21 Maranhão",
            modo: "anual",
            modelo: "theta",
            anos_previsao: 3,
            periodos_previsao: 12,
            alpha: 0.95,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["categoria"], "sepse");
        assert_eq!(json["modelo"], "theta");
        assert_eq!(json["anos_previsao"], 3);
        assert_eq!(json["alpha"], 0.95);
    }
}
