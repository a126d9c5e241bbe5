//! Pipeline entry point: every chart payload for one control state

use serde::Serialize;

use crate::aggregate::{aggregate, SeriesPoint};
use crate::heatmap::{temperature_heatmap, TemperatureHeatmap};
use crate::types::{Dataset, Granularity, TemperatureColumn};
use crate::windrose::{wind_rose, WindRose};

/// One humidity-vs-pressure scatter point, colored by the selected
/// temperature column when that reading exists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CorrelationPoint {
    pub pressure_hpa: f64,
    pub humidity_pct: f64,
    pub temperature_c: Option<f64>,
}

/// Everything the presentation layer needs to redraw the dashboard after a
/// control change.
///
/// `heatmap` and `wind_rose` are `None` when the dataset has no usable rows
/// for them; the presentation layer renders a placeholder in that case.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartBundle {
    pub granularity: Granularity,
    pub temperature_column: TemperatureColumn,
    pub rainfall: Vec<SeriesPoint>,
    pub temperature: Vec<SeriesPoint>,
    pub humidity: Vec<SeriesPoint>,
    pub correlation: Vec<CorrelationPoint>,
    pub heatmap: Option<TemperatureHeatmap>,
    pub wind_rose: Option<WindRose>,
}

/// Recompute all six chart payloads for the given control state.
///
/// Pure and synchronous; safe to call per request against a shared,
/// read-only dataset.
pub fn build_charts(
    dataset: &Dataset,
    granularity: Granularity,
    temperature: TemperatureColumn,
) -> ChartBundle {
    let series = aggregate(dataset, granularity, temperature);

    let correlation = dataset
        .observations()
        .iter()
        .filter_map(|obs| match (obs.pressure_instant_hpa, obs.humidity_instant_pct) {
            (Some(pressure), Some(humidity)) => Some(CorrelationPoint {
                pressure_hpa: pressure,
                humidity_pct: humidity,
                temperature_c: obs.temperature(temperature),
            }),
            _ => None,
        })
        .collect();

    ChartBundle {
        granularity,
        temperature_column: temperature,
        rainfall: series.rainfall,
        temperature: series.temperature,
        humidity: series.humidity,
        correlation,
        heatmap: temperature_heatmap(dataset),
        wind_rose: wind_rose(dataset),
    }
}
