// Wire payload mapping for the forecasting API
use crate::domain::error::ChartError;
use crate::domain::period::{Granularity, Period};
use crate::domain::series::{ForecastPoint, SeriesPayload, TimePoint};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Response body of the forecasting endpoints. Annual series key their
/// points with `ano`, monthly ones with `mes` ("YYYY-MM"); one response
/// never mixes both.
#[derive(Debug, Deserialize)]
pub struct WireSeriesResponse {
    #[serde(default)]
    #[allow(dead_code)]
    pub frequencia_origem: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub frequencia_saida: Option<String>,
    pub estado_rotulo: String,
    pub dados_originais: Vec<WirePoint>,
    pub previsao: Vec<WireForecastPoint>,
    pub modelo: String,
}

#[derive(Debug, Deserialize)]
pub struct WirePoint {
    #[serde(default)]
    pub ano: Option<i32>,
    #[serde(default)]
    pub mes: Option<String>,
    pub valor: f64,
}

#[derive(Debug, Deserialize)]
pub struct WireForecastPoint {
    #[serde(default)]
    pub ano: Option<i32>,
    #[serde(default)]
    pub mes: Option<String>,
    pub valor: f64,
    pub li: f64,
    pub ls: f64,
}

impl WireSeriesResponse {
    /// Map the wire shape into the domain payload, deciding the granularity
    /// from the period keys and rejecting a series that mixes them.
    pub fn into_payload(self) -> Result<SeriesPayload> {
        let mut granularity: Option<Granularity> = None;

        let historical = self
            .dados_originais
            .into_iter()
            .map(|p| {
                let period = parse_period(p.ano, p.mes.as_deref(), &mut granularity)?;
                Ok(TimePoint::new(period, p.valor))
            })
            .collect::<Result<Vec<_>>>()
            .context("invalid historical point")?;

        let forecast = self
            .previsao
            .into_iter()
            .map(|p| {
                let period = parse_period(p.ano, p.mes.as_deref(), &mut granularity)?;
                Ok(ForecastPoint::new(period, p.valor, p.li, p.ls))
            })
            .collect::<Result<Vec<_>>>()
            .context("invalid forecast point")?;

        Ok(SeriesPayload::new(
            historical,
            forecast,
            self.modelo,
            self.estado_rotulo,
        ))
    }
}

/// Parse one point's period key, tracking the granularity seen so far across
/// the whole series.
fn parse_period(
    ano: Option<i32>,
    mes: Option<&str>,
    granularity: &mut Option<Granularity>,
) -> Result<Period> {
    let period = match (ano, mes) {
        (Some(_), Some(_)) => return Err(ChartError::MixedGranularity.into()),
        (Some(year), None) => Period::Year(year),
        (None, Some(mes)) => parse_month(mes)?,
        (None, None) => anyhow::bail!("point carries neither 'ano' nor 'mes'"),
    };

    match granularity {
        None => *granularity = Some(period.granularity()),
        Some(seen) if *seen != period.granularity() => {
            return Err(ChartError::MixedGranularity.into());
        }
        Some(_) => {}
    }

    Ok(period)
}

/// "YYYY-MM" month keys, as emitted by the monthly endpoints.
fn parse_month(mes: &str) -> Result<Period> {
    let (year, month) = mes
        .split_once('-')
        .with_context(|| format!("month key '{mes}' is not in YYYY-MM form"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("month key '{mes}' has an invalid year"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("month key '{mes}' has an invalid month"))?;
    if !(1..=12).contains(&month) {
        anyhow::bail!("month key '{mes}' is out of range");
    }
    Ok(Period::Month { year, month })
}
