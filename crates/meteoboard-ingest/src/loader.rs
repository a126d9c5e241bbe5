//! CSV parsing for INMET-style station exports

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use meteoboard_core::{Dataset, Observation};

use crate::{LoadError, LoadResult};

/// Column headers as they appear in the station export.
pub mod columns {
    pub const DATE: &str = "Data";
    pub const RAINFALL: &str = "Chuva (mm)";
    pub const TEMP_INSTANT: &str = "Temp. Ins. (C)";
    pub const TEMP_MAX: &str = "Temp. Max. (C)";
    pub const TEMP_MIN: &str = "Temp. Min. (C)";
    pub const HUMIDITY: &str = "Umi. Ins. (%)";
    pub const PRESSURE_INSTANT: &str = "Pressao Ins. (hPa)";
    pub const PRESSURE_MAX: &str = "Pressao Max. (hPa)";
    pub const PRESSURE_MIN: &str = "Pressao Min. (hPa)";
    pub const WIND_SPEED: &str = "Vel. Vento (m/s)";
    // The export mislabels the direction unit; the header is kept verbatim.
    pub const WIND_DIR: &str = "Dir. Vento (m/s)";
}

/// Day-first timestamp formats accepted in the date column.
const DATETIME_FORMATS: [&str; 4] = [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d-%m-%Y"];

/// Load the station CSV at `path` into a dataset.
///
/// Fatal only when the file cannot be opened, the date column is missing,
/// or a date cell cannot be parsed. Malformed numeric cells become missing
/// readings and the row is kept.
pub fn load_csv(path: impl AsRef<Path>) -> LoadResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Load a station CSV from any reader. See [`load_csv`].
pub fn load_reader(reader: impl Read) -> LoadResult<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let date = column(columns::DATE).ok_or(LoadError::MissingDateColumn(columns::DATE))?;
    let rainfall = column(columns::RAINFALL);
    let temp_instant = column(columns::TEMP_INSTANT);
    let temp_max = column(columns::TEMP_MAX);
    let temp_min = column(columns::TEMP_MIN);
    let humidity = column(columns::HUMIDITY);
    let pressure_instant = column(columns::PRESSURE_INSTANT);
    let pressure_max = column(columns::PRESSURE_MAX);
    let pressure_min = column(columns::PRESSURE_MIN);
    let wind_speed = column(columns::WIND_SPEED);
    let wind_dir = column(columns::WIND_DIR);

    let mut observations = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header occupies line 1; the first data row is line 2.
        let line = i + 2;

        let raw_date = record.get(date).unwrap_or("");
        let timestamp = parse_day_first(raw_date).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;

        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).and_then(parse_decimal);

        let mut obs = Observation::new(timestamp);
        obs.rainfall_mm = cell(rainfall);
        obs.temp_instant_c = cell(temp_instant);
        obs.temp_max_c = cell(temp_max);
        obs.temp_min_c = cell(temp_min);
        obs.humidity_instant_pct = cell(humidity);
        obs.pressure_instant_hpa = cell(pressure_instant);
        obs.pressure_max_hpa = cell(pressure_max);
        obs.pressure_min_hpa = cell(pressure_min);
        obs.wind_speed_ms = cell(wind_speed);
        obs.wind_dir_deg = cell(wind_dir);
        observations.push(obs);
    }

    debug!(rows = observations.len(), "parsed observation rows");
    Ok(Dataset::new(observations))
}

/// Parse a locale-formatted decimal cell.
///
/// The export uses a comma decimal separator; every comma becomes a period
/// before parsing. Empty or unparseable cells are missing readings, never
/// errors.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().ok()
}

/// Parse a day-first date cell, with or without a time of day.
///
/// Date-only cells resolve to midnight. Ambiguous two-component dates like
/// 01/02 read as day 1 of month 2.
fn parse_day_first(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
