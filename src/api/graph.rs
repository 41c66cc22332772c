//! The `Graph` aggregate root: one render call's worth of normalized data
//! and computed scale artifacts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ChartConfig, LabelWidth};
use crate::data::{Series, SeriesOptions};
use crate::error::ChartResult;
use crate::layout::headroom::{TextMeasurer, required_headroom};
use crate::layout::labels::y_axis_labels;
use crate::layout::scale::{PlotArea, ScaleArtifacts, ScaleRequest, compute_scale};
use crate::layout::{aggregate, sums};

/// Rough advance width per label character, used when the backend supplies
/// no horizontal measurement.
const LABEL_CHAR_WIDTH_PX: f64 = 7.0;

/// Aggregate root for one chart build.
///
/// Constructed once per render call from normalized input plus merged
/// options; `update` callers rebuild it wholesale, discarding prior geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub area: PlotArea,
    pub series: Vec<Series>,
    pub options: Vec<SeriesOptions>,
    pub data_values_set: Vec<Vec<f64>>,
    pub sums: Vec<f64>,
    pub scale: ScaleArtifacts,
    pub y_labels: Vec<String>,
    pub label_width: f64,
    pub headroom_px: f64,
}

/// Serializable snapshot of the computed layout, for goldens and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub num_points: usize,
    pub show_every_nth: usize,
    pub x_tick_width: f64,
    pub min_vals: Vec<f64>,
    pub max_vals: Vec<f64>,
    pub y_ticks_per_pixel: Vec<f64>,
    pub sums: Vec<f64>,
    pub y_labels: Vec<String>,
}

impl Graph {
    /// Runs the full layout pipeline: aggregation, headroom estimation,
    /// scale computation, and axis label generation.
    pub fn build(
        area: PlotArea,
        config: &ChartConfig,
        series: Vec<Series>,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Self> {
        let options: Vec<SeriesOptions> = series.iter().map(|one| one.options).collect();

        let data_values_set = aggregate::data_values(&series);
        let sums = sums(&data_values_set);
        let min_vals = aggregate::min_values(&data_values_set, &options);
        let max_vals = aggregate::max_values(&data_values_set, &options);

        let headroom_px = required_headroom(config, &series, measurer);
        let num_points = series.first().map_or(0, Series::num_points);

        let mut padding = config.padding;
        let mut label_width = match config.label_width {
            LabelWidth::Auto => 0.0,
            LabelWidth::Fixed(width) => width,
        };

        // Two passes when left padding depends on generated label width:
        // first with configured padding to get the labels, then with the
        // padding widened to fit the widest one.
        let mut scale = compute_scale(ScaleRequest {
            area,
            padding,
            headroom_px,
            min_vals: min_vals.clone(),
            max_vals: max_vals.clone(),
            undistorted: options.iter().map(|o| o.keep_axis_undistorted).collect(),
            num_points,
            skip_point_threshold: config.skip_point_threshold,
            nth_override: config.show_every_nth,
        })?;

        let axis_series = config.axes.y1.series_index.min(scale.max_vals.len().saturating_sub(1));
        let mut y_labels = y_axis_labels(
            scale.max_vals[axis_series],
            scale.min_vals[axis_series],
            config.grid.num_y_labels,
            config.precision,
            config.separators(),
        );

        if config.label_width == LabelWidth::Auto {
            label_width = widest_label_px(&y_labels);
        }

        if config.dynamic_left_padding && label_width > padding.left {
            padding.left = label_width;
            scale = compute_scale(ScaleRequest {
                area,
                padding,
                headroom_px,
                min_vals,
                max_vals,
                undistorted: options.iter().map(|o| o.keep_axis_undistorted).collect(),
                num_points,
                skip_point_threshold: config.skip_point_threshold,
                nth_override: config.show_every_nth,
            })?;
            y_labels = y_axis_labels(
                scale.max_vals[axis_series],
                scale.min_vals[axis_series],
                config.grid.num_y_labels,
                config.precision,
                config.separators(),
            );
        }

        debug!(
            series = series.len(),
            num_points = scale.num_points,
            label_width,
            headroom_px,
            "graph built"
        );

        Ok(Self {
            area,
            series,
            options,
            data_values_set,
            sums,
            scale,
            y_labels,
            label_width,
            headroom_px,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            num_points: self.scale.num_points,
            show_every_nth: self.scale.show_every_nth,
            x_tick_width: self.scale.x_tick_width,
            min_vals: self.scale.min_vals.clone(),
            max_vals: self.scale.max_vals.clone(),
            y_ticks_per_pixel: self.scale.y_ticks_per_pixel.clone(),
            sums: self.sums.clone(),
            y_labels: self.y_labels.clone(),
        }
    }
}

fn widest_label_px(labels: &[String]) -> f64 {
    labels
        .iter()
        .map(|label| label.chars().count() as f64 * LABEL_CHAR_WIDTH_PX)
        .fold(0.0, f64::max)
}
