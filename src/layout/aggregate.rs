//! Series aggregation: per-series value vectors, sums, and axis-bound
//! resolution with stacking semantics and null handling.

use tracing::trace;

use crate::data::{MaxValuePolicy, MinValuePolicy, Series, SeriesOptions, SeriesType};

/// Computes the per-series data-value vectors the scale math runs on.
///
/// Stacked-bar series accumulate subseries value-wise by point index, so the
/// vector holds running sums. While accumulating, the lowest partial sum seen
/// at any index is tracked; if it ends up negative it is appended as an extra
/// synthetic entry so minimum-value resolution sees the true floor of stacked
/// negative contributions.
///
/// Every other series type flattens its subseries values into one vector in
/// subseries-major order. Gap points contribute `0` to these vectors (they
/// still occupy an index slot) but are never invented as data elsewhere.
///
/// With no data at all, returns `[[0.0]]` so downstream scale math never
/// divides by a zero range.
#[must_use]
pub fn data_values(series: &[Series]) -> Vec<Vec<f64>> {
    let mut vectors: Vec<Vec<f64>> = Vec::with_capacity(series.len());

    for one in series {
        if one.options.kind == SeriesType::StackedBar {
            vectors.push(stacked_values(one));
        } else {
            let mut flat = Vec::new();
            for run in &one.subseries {
                for point in run {
                    flat.push(point.value.unwrap_or(0.0));
                }
            }
            vectors.push(flat);
        }
    }

    let has_data = vectors.iter().any(|vector| !vector.is_empty());
    if !has_data {
        trace!("no data values present, falling back to [[0.0]]");
        return vec![vec![0.0]];
    }

    vectors
}

fn stacked_values(series: &Series) -> Vec<f64> {
    let num_points = series.num_points();
    let mut totals = vec![0.0_f64; num_points];
    let mut lowest = 0.0_f64;

    for run in &series.subseries {
        for (index, point) in run.iter().enumerate().take(num_points) {
            totals[index] += point.value.unwrap_or(0.0);
            lowest = lowest.min(totals[index]);
        }
    }

    if lowest < 0.0 {
        totals.push(lowest);
    }

    totals
}

/// Arithmetic sum per value vector.
#[must_use]
pub fn sums(vectors: &[Vec<f64>]) -> Vec<f64> {
    vectors
        .iter()
        .map(|vector| vector.iter().sum())
        .collect()
}

/// Resolves each series' axis lower bound from its policy.
#[must_use]
pub fn min_values(vectors: &[Vec<f64>], options: &[SeriesOptions]) -> Vec<f64> {
    vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| {
            let actual = vector.iter().copied().fold(f64::INFINITY, f64::min);
            let actual = if actual.is_finite() { actual } else { 0.0 };
            match policy_for(options, index).min_value {
                MinValuePolicy::Auto => actual,
                MinValuePolicy::ZeroOrLess => actual.min(0.0),
                MinValuePolicy::Fixed(value) => value,
            }
        })
        .collect()
}

/// Resolves each series' axis upper bound from its policy.
#[must_use]
pub fn max_values(vectors: &[Vec<f64>], options: &[SeriesOptions]) -> Vec<f64> {
    vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| {
            match policy_for(options, index).max_value {
                MaxValuePolicy::Auto => {
                    let actual = vector.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    if actual.is_finite() { actual } else { 0.0 }
                }
                MaxValuePolicy::Fixed(value) => value,
            }
        })
        .collect()
}

fn policy_for(options: &[SeriesOptions], index: usize) -> SeriesOptions {
    options.get(index).copied().unwrap_or_default()
}
