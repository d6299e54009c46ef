// Chart service - dispatches fetched payloads into chart slots
use crate::application::chart_backend::{ChartBackend, ChartSpec};
use crate::application::exporter;
use crate::application::forecast_repository::{ForecastModel, ForecastQuery, ForecastRepository};
use crate::application::session_manager::ChartSessionManager;
use crate::domain::align::align;
use crate::domain::error::ChartError;
use crate::domain::period::Granularity;
use crate::domain::series::SeriesPayload;
use crate::domain::slot::ChartSlot;
use crate::infrastructure::config::ChartsConfig;
use std::sync::{Arc, Mutex, MutexGuard};

/// One model, or the ARIMA/Theta pair rendered side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSelection {
    Single(ForecastModel),
    Both,
}

/// Result of one slot's pipeline. `Ok(None)` means the render was skipped
/// because the slot has no backing draw surface.
#[derive(Debug)]
pub struct SlotOutcome {
    pub slot: ChartSlot,
    pub title: Option<String>,
    pub result: anyhow::Result<Option<ChartSpec>>,
}

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn ForecastRepository>,
    sessions: Arc<Mutex<ChartSessionManager>>,
    charts: ChartsConfig,
}

impl ChartService {
    pub fn new(
        repository: Arc<dyn ForecastRepository>,
        backend: Arc<dyn ChartBackend>,
        charts: ChartsConfig,
    ) -> Self {
        Self {
            repository,
            sessions: Arc::new(Mutex::new(ChartSessionManager::new(backend))),
            charts,
        }
    }

    /// Fetch the requested series and render them. A single model renders
    /// into the primary slot; the ARIMA/Theta pair renders into primary and
    /// secondary through two independent pipelines, so a failure in one
    /// leaves the other slot's outcome intact. The pair is only defined for
    /// annual series.
    pub async fn render_forecast(
        &self,
        query: &ForecastQuery,
        selection: ModelSelection,
    ) -> Result<Vec<SlotOutcome>, ChartError> {
        match selection {
            ModelSelection::Single(model) => {
                let fetched = self.repository.fetch_forecast(query, model).await;
                Ok(vec![self.complete_render(ChartSlot::Primary, fetched)])
            }
            ModelSelection::Both => {
                if query.granularity == Granularity::Monthly {
                    return Err(ChartError::UnsupportedGranularityCombination);
                }

                let (arima, theta) = tokio::join!(
                    self.repository.fetch_forecast(query, ForecastModel::Arima),
                    self.repository.fetch_forecast(query, ForecastModel::Theta),
                );

                // An upstream that ignored the requested mode and produced
                // monthly keys would otherwise slip a monthly pair through.
                for fetched in [&arima, &theta] {
                    if let Ok(payload) = fetched {
                        if payload.granularity() == Some(Granularity::Monthly) {
                            return Err(ChartError::UnsupportedGranularityCombination);
                        }
                    }
                }

                Ok(vec![
                    self.complete_render(ChartSlot::Primary, arima),
                    self.complete_render(ChartSlot::Secondary, theta),
                ])
            }
        }
    }

    /// Align one payload and render it into `slot`. Data-shape errors are
    /// reported in the outcome without touching the slot.
    pub fn render_payload(&self, slot: ChartSlot, payload: SeriesPayload) -> SlotOutcome {
        let title = payload.title();
        let series = match align(&payload.historical, &payload.forecast) {
            Ok(series) => series,
            Err(e) => {
                return SlotOutcome {
                    slot,
                    title: Some(title),
                    result: Err(e.into()),
                }
            }
        };

        let Some(target) = self.charts.target_for(slot) else {
            tracing::warn!("render into slot {} skipped: no draw surface configured", slot);
            return SlotOutcome {
                slot,
                title: Some(title),
                result: Ok(None),
            };
        };

        let legend = self.charts.legend_labels();
        let result = self
            .sessions()
            .render(slot, target, series, &legend, &title)
            .map(|spec| spec.cloned());

        SlotOutcome {
            slot,
            title: Some(title),
            result,
        }
    }

    /// The spec currently mounted in a slot.
    pub fn chart_spec(&self, slot: ChartSlot) -> Option<ChartSpec> {
        self.sessions().spec(slot).cloned()
    }

    /// Export the slot's aligned series as rows, exactly as rendered.
    pub fn export_rows(&self, slot: ChartSlot) -> Option<Vec<Vec<String>>> {
        let sessions = self.sessions();
        let series = sessions.series(slot)?;
        Some(exporter::to_rows(
            series,
            &self.charts.period_column,
            &self.charts.column_labels(),
        ))
    }

    pub fn reset(&self, slot: ChartSlot) {
        self.sessions().reset(slot);
    }

    fn complete_render(
        &self,
        slot: ChartSlot,
        fetched: anyhow::Result<SeriesPayload>,
    ) -> SlotOutcome {
        match fetched {
            Ok(payload) => self.render_payload(slot, payload),
            Err(e) => SlotOutcome {
                slot,
                title: None,
                result: Err(e),
            },
        }
    }

    fn sessions(&self) -> MutexGuard<'_, ChartSessionManager> {
        self.sessions.lock().expect("chart session table poisoned")
    }
}
