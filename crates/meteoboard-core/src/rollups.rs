//! Streaming accumulators shared by the aggregation engine and the
//! dataset summary

/// How an accumulator folds its readings into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateType {
    Min,
    Max,
    Sum,
    Avg,
    Count,
}

/// Accumulator for folding a stream of readings into a single aggregate.
///
/// Yields `None` when nothing was recorded, so an empty group can never be
/// mistaken for a group that averaged to zero.
#[derive(Debug, Clone)]
pub struct Accumulator {
    aggregate_type: AggregateType,
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    pub fn new(aggregate_type: AggregateType) -> Self {
        Self {
            aggregate_type,
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Add a reading only when one was recorded.
    pub fn add_optional(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.add(v);
        }
    }

    pub fn result(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }

        Some(match self.aggregate_type {
            AggregateType::Min => self.min,
            AggregateType::Max => self.max,
            AggregateType::Sum => self.sum,
            AggregateType::Avg => self.sum / self.count as f64,
            AggregateType::Count => self.count as f64,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
