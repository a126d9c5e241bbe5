//! Time-bucketed aggregation of observation series

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::rollups::{Accumulator, AggregateType};
use crate::types::{Dataset, Granularity, TemperatureColumn};

/// One bucket of an aggregated series.
///
/// `value` is `None` for a mean metric whose bucket held no readings; a
/// rainfall bucket with no readings sums to `Some(0.0)`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub period_start: NaiveDateTime,
    pub value: Option<f64>,
}

/// The three bucketed series behind the rainfall, temperature, and
/// humidity charts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AggregatedSeries {
    pub rainfall: Vec<SeriesPoint>,
    pub temperature: Vec<SeriesPoint>,
    pub humidity: Vec<SeriesPoint>,
}

impl AggregatedSeries {
    fn empty() -> Self {
        Self {
            rainfall: Vec::new(),
            temperature: Vec::new(),
            humidity: Vec::new(),
        }
    }
}

struct BucketAccumulator {
    rainfall: Accumulator,
    temperature: Accumulator,
    humidity: Accumulator,
}

impl BucketAccumulator {
    fn new() -> Self {
        Self {
            rainfall: Accumulator::new(AggregateType::Sum),
            temperature: Accumulator::new(AggregateType::Avg),
            humidity: Accumulator::new(AggregateType::Avg),
        }
    }
}

/// Bucket the dataset by `granularity` and fold each bucket.
///
/// Output buckets are calendar aligned, ascending, and contiguous from the
/// bucket of the first observation through the bucket of the last; buckets
/// in between that saw no readings still appear. An empty dataset yields
/// three empty series.
pub fn aggregate(
    dataset: &Dataset,
    granularity: Granularity,
    temperature: TemperatureColumn,
) -> AggregatedSeries {
    let mut buckets: BTreeMap<NaiveDateTime, BucketAccumulator> = BTreeMap::new();

    for obs in dataset.observations() {
        let start = granularity.bucket_start(obs.timestamp);
        let bucket = buckets.entry(start).or_insert_with(BucketAccumulator::new);
        bucket.rainfall.add_optional(obs.rainfall_mm);
        bucket.temperature.add_optional(obs.temperature(temperature));
        bucket.humidity.add_optional(obs.humidity_instant_pct);
    }

    let (first, last) = match (buckets.first_key_value(), buckets.last_key_value()) {
        (Some((&first, _)), Some((&last, _))) => (first, last),
        _ => return AggregatedSeries::empty(),
    };

    let mut series = AggregatedSeries::empty();
    let mut start = first;
    loop {
        let (rainfall, temperature, humidity) = match buckets.get(&start) {
            Some(bucket) => (
                Some(bucket.rainfall.result().unwrap_or(0.0)),
                bucket.temperature.result(),
                bucket.humidity.result(),
            ),
            None => (Some(0.0), None, None),
        };

        series.rainfall.push(SeriesPoint {
            period_start: start,
            value: rainfall,
        });
        series.temperature.push(SeriesPoint {
            period_start: start,
            value: temperature,
        });
        series.humidity.push(SeriesPoint {
            period_start: start,
            value: humidity,
        });

        if start == last {
            break;
        }
        start = granularity.next_start(start);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Observation;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn obs(s: &str) -> Observation {
        Observation::new(ts(s))
    }

    #[test]
    fn test_daily_single_row() {
        let mut o = obs("2024-01-01 00:00");
        o.rainfall_mm = Some(10.0);
        o.temp_instant_c = Some(25.0);
        o.humidity_instant_pct = Some(80.0);
        let dataset = Dataset::new(vec![o]);

        let series = aggregate(&dataset, Granularity::Daily, TemperatureColumn::Instant);

        assert_eq!(
            series.rainfall,
            vec![SeriesPoint {
                period_start: ts("2024-01-01 00:00"),
                value: Some(10.0),
            }]
        );
        assert_eq!(series.temperature[0].value, Some(25.0));
        assert_eq!(series.humidity[0].value, Some(80.0));
    }

    #[test]
    fn test_empty_dataset() {
        let series = aggregate(&Dataset::new(vec![]), Granularity::Hourly, TemperatureColumn::Instant);
        assert!(series.rainfall.is_empty());
        assert!(series.temperature.is_empty());
        assert!(series.humidity.is_empty());
    }

    #[test]
    fn test_gap_buckets_are_emitted() {
        let mut a = obs("2024-01-01 12:00");
        a.rainfall_mm = Some(5.0);
        a.temp_instant_c = Some(24.0);
        let mut b = obs("2024-01-03 06:00");
        b.rainfall_mm = Some(3.0);
        b.temp_instant_c = Some(28.0);
        let dataset = Dataset::new(vec![a, b]);

        let series = aggregate(&dataset, Granularity::Daily, TemperatureColumn::Instant);

        let starts: Vec<_> = series.rainfall.iter().map(|p| p.period_start).collect();
        assert_eq!(
            starts,
            vec![ts("2024-01-01 00:00"), ts("2024-01-02 00:00"), ts("2024-01-03 00:00")]
        );

        // The untouched middle day: sum metric zero, mean metric undefined.
        assert_eq!(series.rainfall[1].value, Some(0.0));
        assert_eq!(series.temperature[1].value, None);
        assert_eq!(series.humidity[1].value, None);
    }

    #[test]
    fn test_hourly_grouping_and_means() {
        let mut a = obs("2024-06-10 10:15");
        a.temp_instant_c = Some(20.0);
        a.rainfall_mm = Some(1.0);
        let mut b = obs("2024-06-10 10:45");
        b.temp_instant_c = Some(24.0);
        b.rainfall_mm = Some(2.5);
        let mut c = obs("2024-06-10 11:05");
        c.temp_instant_c = Some(26.0);
        let dataset = Dataset::new(vec![a, b, c]);

        let series = aggregate(&dataset, Granularity::Hourly, TemperatureColumn::Instant);

        assert_eq!(series.rainfall.len(), 2);
        assert_eq!(series.rainfall[0].value, Some(3.5));
        assert_eq!(series.temperature[0].value, Some(22.0));
        assert_eq!(series.temperature[1].value, Some(26.0));
        // No rain reading in the second hour sums to zero.
        assert_eq!(series.rainfall[1].value, Some(0.0));
    }

    #[test]
    fn test_monthly_spans_year_boundary() {
        let mut a = obs("2023-12-15 08:00");
        a.humidity_instant_pct = Some(70.0);
        let mut b = obs("2024-02-10 08:00");
        b.humidity_instant_pct = Some(90.0);
        let dataset = Dataset::new(vec![a, b]);

        let series = aggregate(&dataset, Granularity::Monthly, TemperatureColumn::Instant);

        let starts: Vec<_> = series.humidity.iter().map(|p| p.period_start).collect();
        assert_eq!(
            starts,
            vec![ts("2023-12-01 00:00"), ts("2024-01-01 00:00"), ts("2024-02-01 00:00")]
        );
        assert_eq!(series.humidity[0].value, Some(70.0));
        assert_eq!(series.humidity[1].value, None);
        assert_eq!(series.humidity[2].value, Some(90.0));
    }

    #[test]
    fn test_selected_temperature_column() {
        let mut o = obs("2024-05-01 00:00");
        o.temp_instant_c = Some(25.0);
        o.temp_max_c = Some(31.0);
        o.temp_min_c = Some(19.0);
        let dataset = Dataset::new(vec![o]);

        let max = aggregate(&dataset, Granularity::Daily, TemperatureColumn::Maximum);
        assert_eq!(max.temperature[0].value, Some(31.0));

        let min = aggregate(&dataset, Granularity::Daily, TemperatureColumn::Minimum);
        assert_eq!(min.temperature[0].value, Some(19.0));
    }

    #[test]
    fn test_all_missing_bucket_values() {
        // A bucket whose observations exist but carry no readings behaves
        // like an empty bucket: zero rain, undefined means.
        let dataset = Dataset::new(vec![obs("2024-01-01 10:00")]);
        let series = aggregate(&dataset, Granularity::Daily, TemperatureColumn::Instant);

        assert_eq!(series.rainfall[0].value, Some(0.0));
        assert_eq!(series.temperature[0].value, None);
        assert_eq!(series.humidity[0].value, None);
    }
}
