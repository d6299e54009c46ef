// HTTP request handlers
use crate::application::chart_backend::ChartSpec;
use crate::application::chart_service::{ModelSelection, SlotOutcome};
use crate::application::exporter;
use crate::application::forecast_repository::{ForecastModel, ForecastQuery};
use crate::domain::error::ChartError;
use crate::domain::period::Granularity;
use crate::domain::slot::ChartSlot;
use crate::infrastructure::http_response::csv_attachment_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Render request, mirroring the upstream forecast API's parameters.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub categoria: String,
    pub doenca: String,
    pub tipo_dado: String,
    #[serde(default = "default_estado")]
    pub estado: String,
    /// "anual" or "mensal".
    #[serde(default = "default_modo")]
    pub modo: String,
    /// "arima", "theta" or "ambos" for the side-by-side comparison.
    #[serde(default = "default_modelo")]
    pub modelo: String,
    #[serde(default = "default_anos_previsao")]
    pub anos_previsao: u32,
    #[serde(default = "default_periodos_previsao")]
    pub periodos_previsao: u32,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_estado() -> String {
    "21 Maranhão".to_string()
}

fn default_modo() -> String {
    "anual".to_string()
}

fn default_modelo() -> String {
    "arima".to_string()
}

fn default_anos_previsao() -> u32 {
    3
}

fn default_periodos_previsao() -> u32 {
    12
}

fn default_alpha() -> f64 {
    0.95
}

#[derive(Debug, Serialize)]
pub struct SlotReport {
    pub slot: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub rendered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub results: Vec<SlotReport>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Fetch the requested forecast series and render them into their slots.
pub async fn render_charts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderRequest>,
) -> Response {
    let granularity = match req.modo.as_str() {
        "anual" => Granularity::Annual,
        "mensal" => Granularity::Monthly,
        other => return bad_request(format!("unknown mode '{}'", other)),
    };
    let selection = match req.modelo.as_str() {
        "arima" => ModelSelection::Single(ForecastModel::Arima),
        "theta" => ModelSelection::Single(ForecastModel::Theta),
        "ambos" => ModelSelection::Both,
        other => return bad_request(format!("unknown model '{}'", other)),
    };

    let query = ForecastQuery {
        category: req.categoria,
        disease: req.doenca,
        data_kind: req.tipo_dado,
        region: req.estado,
        granularity,
        horizon_years: req.anos_previsao,
        horizon_periods: req.periodos_previsao,
        alpha: req.alpha,
    };

    match state.chart_service.render_forecast(&query, selection).await {
        Err(e) => {
            tracing::warn!("render request refused: {}", e);
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Ok(outcomes) => {
            let status = response_status(&outcomes);
            let results = outcomes.into_iter().map(slot_report).collect();
            (status, Json(RenderResponse { results })).into_response()
        }
    }
}

/// Current chart spec for a slot.
pub async fn get_chart(
    Path(slot): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(slot) = ChartSlot::from_name(&slot) else {
        return bad_request(format!("unknown chart slot '{}'", slot));
    };

    match state.chart_service.chart_spec(slot) {
        Some(spec) => Json(spec).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("no chart rendered in slot {}", slot),
        )
            .into_response(),
    }
}

/// Download the slot's series as CSV, row-for-row what the chart shows.
pub async fn export_chart(
    Path(slot): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(slot) = ChartSlot::from_name(&slot) else {
        return bad_request(format!("unknown chart slot '{}'", slot));
    };

    let Some(rows) = state.chart_service.export_rows(slot) else {
        return (
            StatusCode::NOT_FOUND,
            format!("no chart rendered in slot {}", slot),
        )
            .into_response();
    };

    let csv = exporter::to_csv(&rows);
    let filename = format!(
        "previsao-{}-{}.csv",
        slot,
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    );

    match csv_attachment_response(&filename, csv) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Clear a slot without rendering a replacement.
pub async fn reset_chart(
    Path(slot): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(slot) = ChartSlot::from_name(&slot) else {
        return bad_request(format!("unknown chart slot '{}'", slot));
    };

    state.chart_service.reset(slot);
    StatusCode::NO_CONTENT.into_response()
}

fn slot_report(outcome: SlotOutcome) -> SlotReport {
    let slot = outcome.slot.as_str();
    match outcome.result {
        Ok(Some(chart)) => SlotReport {
            slot,
            title: outcome.title,
            rendered: true,
            error: None,
            chart: Some(chart),
        },
        Ok(None) => SlotReport {
            slot,
            title: outcome.title,
            rendered: false,
            error: Some("render skipped: no draw surface available".to_string()),
            chart: None,
        },
        Err(e) => {
            tracing::warn!("render into slot {} failed: {:#}", outcome.slot, e);
            SlotReport {
                slot,
                title: outcome.title,
                rendered: false,
                error: Some(format!("{:#}", e)),
                chart: None,
            }
        }
    }
}

/// 200 while at least one slot succeeded; otherwise the status of the
/// failure class (malformed data vs upstream trouble).
fn response_status(outcomes: &[SlotOutcome]) -> StatusCode {
    if outcomes.iter().any(|o| o.result.is_ok()) {
        return StatusCode::OK;
    }
    let data_shape = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().err())
        .any(|e| e.downcast_ref::<ChartError>().is_some());
    if data_shape {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::BAD_GATEWAY
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}
