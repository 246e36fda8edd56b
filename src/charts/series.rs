//! Pure data preparation for the chart steps. Nothing here touches the
//! drawing backend, so every series can be checked without rendering.

use std::collections::BTreeMap;

use crate::{data::Value, dataset::Dataset, error::ReportError, stats};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Splits `values` into `bins` equal-width intervals over `[min, max]`. The
/// last interval is closed on the right; a zero-width range is widened by 0.5
/// on both sides.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let idx = (((value - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| Bin {
            lower: min + idx as f64 * width,
            upper: if idx + 1 == bins {
                max
            } else {
                min + (idx + 1) as f64 * width
            },
            count,
        })
        .collect()
}

pub fn present_values(dataset: &Dataset, column: &str) -> Result<Vec<f64>, ReportError> {
    Ok(dataset.numeric_column(column)?.numbers().flatten().collect())
}

/// Rows where both `x` and `y` are present, in file order.
pub fn paired_values(dataset: &Dataset, x: &str, y: &str) -> Result<Vec<(f64, f64)>, ReportError> {
    let x_column = dataset.numeric_column(x)?;
    let y_column = dataset.numeric_column(y)?;
    Ok(x_column
        .numbers()
        .zip(y_column.numbers())
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        })
        .collect())
}

/// Present `target` values per `category` value, groups in first-appearance order.
pub fn values_by_group(
    dataset: &Dataset,
    category: &str,
    target: &str,
) -> Result<Vec<(String, Vec<f64>)>, ReportError> {
    let category_column = dataset.column(category)?;
    let target_column = dataset.numeric_column(target)?;
    let mut positions: BTreeMap<&Value, usize> = BTreeMap::new();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for (key, value) in category_column.cells().iter().zip(target_column.numbers()) {
        let Some(key) = key else {
            continue;
        };
        let idx = *positions.entry(key).or_insert_with(|| {
            groups.push((key.as_display(), Vec::new()));
            groups.len() - 1
        });
        if let Some(value) = value {
            groups[idx].1.push(value);
        }
    }
    Ok(groups)
}

/// Mean `target` per `category` value, highest mean first. Groups without any
/// present value are left out.
pub fn means_by_group(
    dataset: &Dataset,
    category: &str,
    target: &str,
) -> Result<Vec<(String, f64)>, ReportError> {
    let category_column = dataset.column(category)?;
    let target_column = dataset.numeric_column(target)?;
    let mut means = stats::accumulate_by_group(target_column, category_column)
        .into_iter()
        .filter_map(|(key, accumulator)| accumulator.mean().map(|mean| (key.as_display(), mean)))
        .collect::<Vec<_>>();
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(means)
}

/// Row count per value of `column`, most frequent first; ties keep
/// first-appearance order.
pub fn value_counts(dataset: &Dataset, column: &str) -> Result<Vec<(String, usize)>, ReportError> {
    let column = dataset.column(column)?;
    let mut positions: BTreeMap<&Value, usize> = BTreeMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in column.cells().iter().flatten() {
        let idx = *positions.entry(key).or_insert_with(|| {
            counts.push((key.as_display(), 0));
            counts.len() - 1
        });
        counts[idx].1 += 1;
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}
