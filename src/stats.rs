use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;
use serde::Serialize;

use crate::{
    data::Value,
    dataset::{Column, Dataset},
    error::ReportError,
};

/// Six-number summary of a population. Every statistic except `count` is
/// `None` when the population is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        let mut accumulator = MetricAccumulator::default();
        for value in values {
            accumulator.add_value(*value);
        }
        accumulator.summarize()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub category: Value,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, Default)]
pub struct MetricAccumulator {
    values: Vec<f64>,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl MetricAccumulator {
    pub fn add_value(&mut self, value: f64) {
        self.sum += value;
        self.min = Some(match self.min {
            Some(current) => current.min(value),
            None => value,
        });
        self.max = Some(match self.max {
            Some(current) => current.max(value),
            None => value,
        });
        self.values.push(value);
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.sum / self.values.len() as f64)
        }
    }

    pub fn summarize(&self) -> Summary {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        Summary {
            count: sorted.len(),
            median: median(&sorted),
            mode: mode(&sorted),
            mean: self.mean(),
            min: self.min,
            max: self.max,
        }
    }
}

fn median(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value of an ascending slice; ties go to the smallest value.
fn mode(sorted: &[f64]) -> Option<f64> {
    sorted
        .iter()
        .dedup_with_count()
        .fold(None, |best: Option<(usize, f64)>, (count, value)| match best {
            Some((best_count, _)) if best_count >= count => best,
            _ => Some((count, *value)),
        })
        .map(|(_, value)| value)
}

/// Summary over the non-missing values of the numeric column `target`.
pub fn summarize_column(dataset: &Dataset, target: &str) -> Result<Summary, ReportError> {
    let column = dataset.numeric_column(target)?;
    let mut accumulator = MetricAccumulator::default();
    for value in column.numbers().flatten() {
        accumulator.add_value(value);
    }
    Ok(accumulator.summarize())
}

/// Collects `target` values per distinct non-missing `category` value. Rows
/// with a missing target still register their group.
pub fn accumulate_by_group(target: &Column, category: &Column) -> BTreeMap<Value, MetricAccumulator> {
    let mut groups: BTreeMap<Value, MetricAccumulator> = BTreeMap::new();
    for (key, value) in category.cells().iter().zip(target.numbers()) {
        let Some(key) = key else {
            continue;
        };
        let accumulator = groups.entry(key.clone()).or_default();
        if let Some(value) = value {
            accumulator.add_value(value);
        }
    }
    groups
}

/// One summary per category value, ordered by category value ascending.
pub fn summarize_by_group(
    dataset: &Dataset,
    target: &str,
    category: usize,
) -> Result<Vec<GroupSummary>, ReportError> {
    let target_column = dataset.numeric_column(target)?;
    let category_column = &dataset.columns()[category];
    let groups = accumulate_by_group(target_column, category_column);
    debug!(
        "Column '{}' produced {} group(s)",
        category_column.name(),
        groups.len()
    );
    Ok(groups
        .into_iter()
        .map(|(category, accumulator)| GroupSummary {
            category,
            summary: accumulator.summarize(),
        })
        .collect())
}
