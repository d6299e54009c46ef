// Chart.js line-chart config backend
use crate::application::chart_backend::{ChartBackend, ChartHandle, ChartSpec, TrackRole};
use crate::domain::error::ChartError;
use anyhow::Result;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

type MountedConfigs = Arc<Mutex<HashMap<String, Value>>>;

/// Builds the configuration object a Chart.js-style line renderer consumes
/// and tracks which draw surfaces currently hold one. Surfaces are declared
/// up front; mounting onto an undeclared target is refused so the session
/// manager can skip the render.
pub struct ChartJsBackend {
    surfaces: HashSet<String>,
    mounted: MountedConfigs,
}

#[derive(Debug)]
struct ChartJsHandle {
    target: String,
    mounted: MountedConfigs,
}

impl ChartHandle for ChartJsHandle {
    fn destroy(&mut self) {
        self.mounted
            .lock()
            .expect("mounted chart table poisoned")
            .remove(&self.target);
    }
}

impl ChartJsBackend {
    pub fn new(surfaces: impl IntoIterator<Item = String>) -> Self {
        Self {
            surfaces: surfaces.into_iter().collect(),
            mounted: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The config currently mounted on a surface, if any.
    pub fn mounted_config(&self, target: &str) -> Option<Value> {
        self.mounted
            .lock()
            .expect("mounted chart table poisoned")
            .get(target)
            .cloned()
    }

    fn dataset(label: &str, role: TrackRole, values: &[Option<f64>]) -> Value {
        match role {
            TrackRole::Historical => json!({
                "label": label,
                "data": values,
                "borderColor": "rgba(14,165,233,1)",
                "backgroundColor": "rgba(14,165,233,0.25)",
                "tension": 0.25,
                "spanGaps": true,
                "pointRadius": 3,
            }),
            TrackRole::Forecast => json!({
                "label": label,
                "data": values,
                "borderColor": "rgba(250,204,21,1)",
                "backgroundColor": "rgba(250,204,21,0.15)",
                "borderDash": [5, 5],
                "tension": 0.25,
                "spanGaps": true,
                "pointRadius": 3,
            }),
            TrackRole::LowerBound => json!({
                "label": label,
                "data": values,
                "borderColor": "rgba(248,113,113,0.7)",
                "borderDash": [3, 3],
                "tension": 0.25,
                "spanGaps": true,
                "pointRadius": 0,
            }),
            TrackRole::UpperBound => json!({
                "label": label,
                "data": values,
                "borderColor": "rgba(190,242,100,0.7)",
                "borderDash": [3, 3],
                "tension": 0.25,
                "spanGaps": true,
                "pointRadius": 0,
            }),
        }
    }
}

impl ChartBackend for ChartJsBackend {
    fn has_surface(&self, target: &str) -> bool {
        self.surfaces.contains(target)
    }

    fn mount(&self, target: &str, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>> {
        if !self.has_surface(target) {
            return Err(ChartError::MissingDrawSurface {
                target: target.to_string(),
            }
            .into());
        }

        let datasets: Vec<Value> = spec
            .tracks
            .iter()
            .map(|t| Self::dataset(&t.label, t.role, &t.values))
            .collect();

        let config = json!({
            "type": "line",
            "data": {
                "labels": spec.labels,
                "datasets": datasets,
            },
            "options": {
                "responsive": true,
                "interaction": { "mode": "index", "intersect": false },
                "scales": { "y": { "beginAtZero": true } },
                "plugins": {
                    "legend": { "display": true, "position": "top" },
                    "title": { "display": true, "text": spec.title },
                },
            },
        });

        self.mounted
            .lock()
            .expect("mounted chart table poisoned")
            .insert(target.to_string(), config);

        Ok(Box::new(ChartJsHandle {
            target: target.to_string(),
            mounted: self.mounted.clone(),
        }))
    }
}
