use crate::application::chart_backend::LegendLabels;
use crate::domain::slot::ChartSlot;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub api: ApiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    #[serde(default = "default_period_column")]
    pub period_column: String,
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default)]
    pub surfaces: Vec<SurfaceConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LegendConfig {
    #[serde(default = "default_historical")]
    pub historical: String,
    #[serde(default = "default_forecast")]
    pub forecast: String,
    #[serde(default = "default_lower")]
    pub lower: String,
    #[serde(default = "default_upper")]
    pub upper: String,
}

/// Binds a chart slot to the draw surface it renders on.
#[derive(Debug, Deserialize, Clone)]
pub struct SurfaceConfig {
    pub slot: String,
    pub target: String,
}

fn default_period_column() -> String {
    "Periodo".to_string()
}

fn default_historical() -> String {
    "Histórico".to_string()
}

fn default_forecast() -> String {
    "Previsão".to_string()
}

fn default_lower() -> String {
    "Limite inferior".to_string()
}

fn default_upper() -> String {
    "Limite superior".to_string()
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            historical: default_historical(),
            forecast: default_forecast(),
            lower: default_lower(),
            upper: default_upper(),
        }
    }
}

impl ChartsConfig {
    pub fn target_for(&self, slot: ChartSlot) -> Option<&str> {
        self.surfaces
            .iter()
            .find(|s| s.slot == slot.as_str())
            .map(|s| s.target.as_str())
    }

    pub fn surface_targets(&self) -> Vec<String> {
        self.surfaces.iter().map(|s| s.target.clone()).collect()
    }

    pub fn legend_labels(&self) -> LegendLabels {
        LegendLabels {
            historical: self.legend.historical.clone(),
            forecast: self.legend.forecast.clone(),
            lower: self.legend.lower.clone(),
            upper: self.legend.upper.clone(),
        }
    }

    /// Export column labels in track order.
    pub fn column_labels(&self) -> Vec<String> {
        vec![
            self.legend.historical.clone(),
            self.legend.forecast.clone(),
            self.legend.lower.clone(),
            self.legend.upper.clone(),
        ]
    }
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_charts_config() -> anyhow::Result<ChartsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/charts"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charts_config() -> ChartsConfig {
        ChartsConfig {
            period_column: default_period_column(),
            legend: LegendConfig::default(),
            surfaces: vec![
                SurfaceConfig {
                    slot: "primary".to_string(),
                    target: "grafico-arima".to_string(),
                },
                SurfaceConfig {
                    slot: "secondary".to_string(),
                    target: "grafico-theta".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_target_for_slot() {
        let config = charts_config();
        assert_eq!(config.target_for(ChartSlot::Primary), Some("grafico-arima"));
        assert_eq!(
            config.target_for(ChartSlot::Secondary),
            Some("grafico-theta")
        );
    }

    #[test]
    fn test_legend_defaults() {
        let config = charts_config();
        assert_eq!(
            config.column_labels(),
            vec!["Histórico", "Previsão", "Limite inferior", "Limite superior"]
        );
        assert_eq!(config.period_column, "Periodo");
    }
}
