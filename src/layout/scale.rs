//! The core numeric engine: axis ranges, distortion, and the two pixel
//! conversion factors every downstream geometry computation uses.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Padding;
use crate::error::{ChartError, ChartResult};
use crate::layout::decimation::show_every_nth;

/// Drawable surface in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: u32,
    pub height: u32,
}

impl PlotArea {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Inputs combined by [`compute_scale`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleRequest {
    pub area: PlotArea,
    pub padding: Padding,
    /// Extra pixels reserved above the plot for decorations.
    pub headroom_px: f64,
    /// Resolved per-series axis lower bounds.
    pub min_vals: Vec<f64>,
    /// Resolved per-series axis upper bounds.
    pub max_vals: Vec<f64>,
    /// Per-series exemption from headroom distortion.
    pub undistorted: Vec<bool>,
    /// Index domain size, derived from the first series only. Mismatched
    /// series lengths are undefined behavior, not validated.
    pub num_points: usize,
    pub skip_point_threshold: usize,
    pub nth_override: Option<usize>,
}

/// Final axis ranges and pixel conversion factors.
///
/// `y_ticks_per_pixel[i]` and `x_tick_width` are the sole conversion factors
/// used by line, bar, and label geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleArtifacts {
    pub min_vals: Vec<f64>,
    pub max_vals: Vec<f64>,
    pub y_ticks_per_pixel: Vec<f64>,
    pub x_tick_width: f64,
    pub num_points: usize,
    pub show_every_nth: usize,
    area: PlotArea,
    padding: Padding,
}

impl ScaleArtifacts {
    /// Maps a data value on series `series_index`'s axis to pixel Y.
    #[must_use]
    pub fn pixel_y(&self, series_index: usize, value: f64) -> f64 {
        let min = self.min_vals.get(series_index).copied().unwrap_or(0.0);
        let tick = self
            .y_ticks_per_pixel
            .get(series_index)
            .copied()
            .unwrap_or(1.0);
        f64::from(self.area.height) - (value - min) * tick - self.padding.bottom
            + self.padding.top
    }

    /// Pixel Y of the zero baseline on series `series_index`'s axis.
    #[must_use]
    pub fn baseline_y(&self, series_index: usize) -> f64 {
        self.pixel_y(series_index, 0.0)
    }

    /// Maps a point index to pixel X, with an optional intra-column offset.
    #[must_use]
    pub fn pixel_x(&self, index: usize, offset: f64) -> f64 {
        index as f64 * self.x_tick_width + self.padding.left + offset
    }

    /// The top edge of the drawable region; markers above this clip.
    #[must_use]
    pub fn drawable_top(&self) -> f64 {
        self.padding.top
    }

    #[must_use]
    pub fn area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }
}

/// Scale factor that stretches axis maxima so reserved decoration space does
/// not squash the data.
///
/// When the space needed meets or exceeds what is available the factor is a
/// no-op `1.0`; a naive ratio there would go negative or infinite.
#[must_use]
pub fn distortion_factor(pixels_needed: f64, available_pixels: f64) -> f64 {
    if pixels_needed >= available_pixels {
        return 1.0;
    }
    available_pixels / (available_pixels - pixels_needed)
}

/// Combines aggregator bounds and the headroom estimate into final axis
/// ranges and tick scales.
pub fn compute_scale(request: ScaleRequest) -> ChartResult<ScaleArtifacts> {
    let ScaleRequest {
        area,
        padding,
        headroom_px,
        mut min_vals,
        mut max_vals,
        undistorted,
        num_points,
        skip_point_threshold,
        nth_override,
    } = request;

    if !area.is_valid() {
        return Err(ChartError::InvalidPlotArea {
            width: area.width,
            height: area.height,
        });
    }
    if !headroom_px.is_finite() || headroom_px < 0.0 {
        return Err(ChartError::InvalidGeometry(
            "headroom must be finite and >= 0".to_owned(),
        ));
    }
    for value in [padding.top, padding.right, padding.bottom, padding.left] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidGeometry(
                "padding must be finite and >= 0".to_owned(),
            ));
        }
    }

    let vertical = f64::from(area.height) - padding.top - padding.bottom;
    let horizontal = f64::from(area.width) - padding.left - padding.right;
    if vertical <= 0.0 || horizontal <= 0.0 {
        return Err(ChartError::InvalidGeometry(
            "padding leaves no drawable plot area".to_owned(),
        ));
    }

    let factor = distortion_factor(headroom_px, vertical);

    let mut y_ticks_per_pixel = Vec::with_capacity(max_vals.len());
    for (index, max) in max_vals.iter_mut().enumerate() {
        let min = min_vals.get_mut(index).map_or(0.0, |min| *min);

        // A zero-range axis would make the tick scale divide by zero.
        if *max == min {
            *max = min + 1.0;
        }

        let exempt = undistorted.get(index).copied().unwrap_or(false);
        if !exempt {
            *max *= factor;
        }

        // A zero-height series still renders a visible gridline scale.
        if *max == 0.0 {
            *max = 1.0;
        }

        y_ticks_per_pixel.push(vertical / (*max + min.abs()));
    }

    let effective_points = num_points.max(1);
    let x_tick_width = horizontal / effective_points as f64;
    let nth = show_every_nth(effective_points, skip_point_threshold, nth_override);

    debug!(
        series = max_vals.len(),
        num_points = effective_points,
        x_tick_width,
        distortion = factor,
        "computed scale artifacts"
    );

    Ok(ScaleArtifacts {
        min_vals,
        max_vals,
        y_ticks_per_pixel,
        x_tick_width,
        num_points: effective_points,
        show_every_nth: nth,
        area,
        padding,
    })
}
