//! Bar and stacked-bar geometry: rectangle placement around the zero
//! baseline, plus per-column highlight targets.

use crate::data::{Series, SeriesType};
use crate::layout::scale::ScaleArtifacts;

/// Fraction of one x-tick column occupied by bars; the rest is gutter.
const BAR_COLUMN_FILL: f64 = 0.75;

/// One bar rectangle in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub subseries: usize,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
    pub click_target: Option<String>,
    pub flag: Option<String>,
}

/// Hover/highlight region covering one x-index column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnTarget {
    pub index: usize,
    pub x: f64,
    pub width: f64,
}

/// Geometry plan for one bar/stacked-bar series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarPlan {
    pub rects: Vec<BarRect>,
    pub column_targets: Vec<ColumnTarget>,
    /// Width of one bar body (full column for stacked, per-subseries slice
    /// for grouped).
    pub bar_width: f64,
}

/// Places bar rectangles for one series.
///
/// Stacked mode accumulates a running per-index value offset across
/// subseries, so later subseries draw stacked atop earlier ones. Grouped
/// mode places subseries side by side within the column, dividing the bar
/// width by subseries count. The baseline is value `0` mapped through the
/// scale, not the padding edge: positive values extend upward, negative
/// values downward. Gap points produce no rectangle.
#[must_use]
pub fn plan_bar_series(
    series: &Series,
    series_index: usize,
    scale: &ScaleArtifacts,
) -> BarPlan {
    let mut plan = BarPlan::default();
    let num_points = scale.num_points;
    let stacked = series.options.kind == SeriesType::StackedBar;
    let subseries_count = series.subseries.len().max(1);

    let column_width = scale.x_tick_width * BAR_COLUMN_FILL;
    let gutter = (scale.x_tick_width - column_width) / 2.0;
    plan.bar_width = if stacked {
        column_width
    } else {
        column_width / subseries_count as f64
    };

    let mut offsets = vec![0.0_f64; num_points];
    let mut occupied = vec![false; num_points];

    for (subseries_index, run) in series.subseries.iter().enumerate() {
        for (index, point) in run.iter().enumerate().take(num_points) {
            let Some(value) = point.value else {
                continue;
            };

            let (from, to) = if stacked {
                let from = offsets[index];
                offsets[index] += value;
                (from, offsets[index])
            } else {
                (0.0, value)
            };

            let y_from = scale.pixel_y(series_index, from);
            let y_to = scale.pixel_y(series_index, to);

            let x = if stacked {
                scale.pixel_x(index, gutter)
            } else {
                scale.pixel_x(index, gutter) + subseries_index as f64 * plan.bar_width
            };

            plan.rects.push(BarRect {
                subseries: subseries_index,
                index,
                x,
                y: y_from.min(y_to),
                width: plan.bar_width,
                height: (y_from - y_to).abs(),
                value,
                click_target: point.click_target.clone(),
                flag: point.flag.clone(),
            });
            occupied[index] = true;
        }
    }

    for (index, has_bars) in occupied.into_iter().enumerate() {
        if !has_bars {
            continue;
        }
        plan.column_targets.push(ColumnTarget {
            index,
            x: scale.pixel_x(index, 0.0),
            width: scale.x_tick_width,
        });
    }

    plan
}
