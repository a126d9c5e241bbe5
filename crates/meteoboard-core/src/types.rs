//! Core data types for weather-station observations

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single weather-station reading.
///
/// Every metric field is optional: stations drop readings routinely, and a
/// missing reading must stay distinguishable from a recorded zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// Station-local timestamp (the source data carries no UTC offset).
    pub timestamp: NaiveDateTime,

    pub rainfall_mm: Option<f64>,
    pub temp_instant_c: Option<f64>,
    pub temp_max_c: Option<f64>,
    pub temp_min_c: Option<f64>,
    pub humidity_instant_pct: Option<f64>,
    pub pressure_instant_hpa: Option<f64>,
    pub pressure_max_hpa: Option<f64>,
    pub pressure_min_hpa: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub wind_dir_deg: Option<f64>,
}

impl Observation {
    /// An observation with a timestamp and no readings.
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            rainfall_mm: None,
            temp_instant_c: None,
            temp_max_c: None,
            temp_min_c: None,
            humidity_instant_pct: None,
            pressure_instant_hpa: None,
            pressure_max_hpa: None,
            pressure_min_hpa: None,
            wind_speed_ms: None,
            wind_dir_deg: None,
        }
    }

    /// Reading for the given temperature column, if one was recorded.
    pub fn temperature(&self, column: TemperatureColumn) -> Option<f64> {
        match column {
            TemperatureColumn::Instant => self.temp_instant_c,
            TemperatureColumn::Maximum => self.temp_max_c,
            TemperatureColumn::Minimum => self.temp_min_c,
        }
    }
}

/// An ordered collection of observations, immutable after load.
///
/// Ordering is file order; the loader builds one per process and it is
/// shared read-only for the process lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Time bucket width for the aggregation engine.
///
/// Bucket boundaries are calendar aligned: top of the hour, midnight, or
/// the first of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    Daily,
    Monthly,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Daily
    }
}

impl Granularity {
    /// Start of the bucket containing `ts`.
    pub fn bucket_start(&self, ts: NaiveDateTime) -> NaiveDateTime {
        match self {
            Granularity::Hourly => ts
                .date()
                .and_hms_opt(ts.hour(), 0, 0)
                .expect("hour taken from a valid timestamp"),
            Granularity::Daily => midnight(ts.date()),
            Granularity::Monthly => midnight(first_of_month(ts.date())),
        }
    }

    /// Start of the bucket immediately following `start`.
    pub fn next_start(&self, start: NaiveDateTime) -> NaiveDateTime {
        match self {
            Granularity::Hourly => start + Duration::hours(1),
            Granularity::Daily => start + Duration::days(1),
            Granularity::Monthly => {
                let date = start.date();
                let (year, month) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                midnight(NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is valid"))
            }
        }
    }

    /// Axis label for the presentation layer.
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Hourly => "Hour",
            Granularity::Daily => "Day",
            Granularity::Monthly => "Month",
        }
    }
}

/// Which temperature column drives the temperature series and the
/// correlation-scatter coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureColumn {
    Instant,
    Maximum,
    Minimum,
}

impl Default for TemperatureColumn {
    fn default() -> Self {
        TemperatureColumn::Instant
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).expect("midnight is valid")
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month is valid")
}
