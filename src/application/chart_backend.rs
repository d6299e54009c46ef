// Chart backend seam - the rendering engine is an opaque consumer of tracks
use crate::domain::align::AlignedSeries;
use serde::Serialize;

/// Which logical series a track carries. Concrete backends pick styling
/// (color, dash pattern) from the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackRole {
    Historical,
    Forecast,
    LowerBound,
    UpperBound,
}

/// One plotted line: legend label plus its values over the shared axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTrack {
    pub label: String,
    pub role: TrackRole,
    pub values: Vec<Option<f64>>,
}

/// Legend labels for the four tracks of a forecast chart.
#[derive(Debug, Clone)]
pub struct LegendLabels {
    pub historical: String,
    pub forecast: String,
    pub lower: String,
    pub upper: String,
}

/// Everything a line-chart renderer needs for one chart: a title, formatted
/// axis labels, and four tracks sharing that axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub tracks: Vec<ChartTrack>,
}

impl ChartSpec {
    pub fn from_series(series: &AlignedSeries, legend: &LegendLabels, title: &str) -> Self {
        let track = |label: &str, role, values: &Vec<Option<f64>>| ChartTrack {
            label: label.to_string(),
            role,
            values: values.clone(),
        };

        Self {
            title: title.to_string(),
            labels: series.labels.iter().map(|p| p.label()).collect(),
            tracks: vec![
                track(&legend.historical, TrackRole::Historical, &series.historical),
                track(&legend.forecast, TrackRole::Forecast, &series.forecast),
                track(&legend.lower, TrackRole::LowerBound, &series.lower),
                track(&legend.upper, TrackRole::UpperBound, &series.upper),
            ],
        }
    }
}

/// Live chart instance bound to one draw surface. Destroying it releases the
/// surface; the session manager is the only owner of handles.
pub trait ChartHandle: Send + std::fmt::Debug {
    fn destroy(&mut self);
}

/// Factory seam for chart instances. `mount` binds a spec to a draw surface
/// and hands back the instance handle.
pub trait ChartBackend: Send + Sync {
    fn has_surface(&self, target: &str) -> bool;

    fn mount(&self, target: &str, spec: &ChartSpec) -> anyhow::Result<Box<dyn ChartHandle>>;
}
