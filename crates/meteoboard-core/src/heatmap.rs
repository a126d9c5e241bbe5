//! Day-of-month by month temperature pivot

use chrono::Datelike;
use serde::Serialize;

use crate::rollups::{Accumulator, AggregateType};
use crate::types::Dataset;

pub const HEATMAP_DAYS: usize = 31;
pub const HEATMAP_MONTHS: usize = 12;

/// Mean instantaneous temperature pivoted by (day of month, month).
///
/// All years in the dataset pool into the same cell for a given day/month
/// pair. `values[d][m]` covers day `d + 1` of month `m + 1`; cells the
/// calendar never produces (day 31 of month 4) or that saw no readings stay
/// `None` and carry an empty label.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperatureHeatmap {
    /// Row axis: day of month, 1 through 31.
    pub days: Vec<u32>,
    /// Column axis: month, 1 through 12.
    pub months: Vec<u32>,
    /// Unrounded means driving the color scale.
    pub values: Vec<Vec<Option<f64>>>,
    /// One-decimal cell text; empty string for an empty cell.
    pub labels: Vec<Vec<String>>,
}

/// Pivot mean instantaneous temperature into a 31x12 grid.
///
/// Returns `None` when no observation carries an instantaneous temperature,
/// so the caller can render a no-data placeholder instead of a blank grid.
pub fn temperature_heatmap(dataset: &Dataset) -> Option<TemperatureHeatmap> {
    let mut cells: Vec<Vec<Accumulator>> = (0..HEATMAP_DAYS)
        .map(|_| {
            (0..HEATMAP_MONTHS)
                .map(|_| Accumulator::new(AggregateType::Avg))
                .collect()
        })
        .collect();
    let mut any_reading = false;

    for obs in dataset.observations() {
        let temp = match obs.temp_instant_c {
            Some(t) => t,
            None => continue,
        };
        let day = obs.timestamp.day() as usize - 1;
        let month = obs.timestamp.month() as usize - 1;
        cells[day][month].add(temp);
        any_reading = true;
    }

    if !any_reading {
        return None;
    }

    let values: Vec<Vec<Option<f64>>> = cells
        .iter()
        .map(|row| row.iter().map(Accumulator::result).collect())
        .collect();
    let labels = values
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(mean) => format!("{mean:.1}"),
                    None => String::new(),
                })
                .collect()
        })
        .collect();

    Some(TemperatureHeatmap {
        days: (1..=HEATMAP_DAYS as u32).collect(),
        months: (1..=HEATMAP_MONTHS as u32).collect(),
        values,
        labels,
    })
}
