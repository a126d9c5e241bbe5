//! Whole-dataset headline metrics
//!
//! Computed once when the dataset is loaded and served unchanged; control
//! changes never touch these.

use serde::Serialize;

use crate::rollups::{Accumulator, AggregateType};
use crate::types::Dataset;

/// The dashboard's header-card metrics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub mean_temperature_c: Option<f64>,
    pub max_temperature_c: Option<f64>,
    pub mean_humidity_pct: Option<f64>,
    pub total_rainfall_mm: f64,
}

/// Fold the whole dataset into its headline metrics.
pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let mut mean_temp = Accumulator::new(AggregateType::Avg);
    let mut max_temp = Accumulator::new(AggregateType::Max);
    let mut mean_humidity = Accumulator::new(AggregateType::Avg);
    let mut rainfall = Accumulator::new(AggregateType::Sum);

    for obs in dataset.observations() {
        mean_temp.add_optional(obs.temp_instant_c);
        max_temp.add_optional(obs.temp_instant_c);
        mean_humidity.add_optional(obs.humidity_instant_pct);
        rainfall.add_optional(obs.rainfall_mm);
    }

    DatasetSummary {
        total_records: dataset.len(),
        mean_temperature_c: mean_temp.result(),
        max_temperature_c: max_temp.result(),
        mean_humidity_pct: mean_humidity.result(),
        total_rainfall_mm: rainfall.result().unwrap_or(0.0),
    }
}
