//! Vertical headroom estimation for chart decorations.
//!
//! Error banners, point-flag callouts, and the secondary (x2) label row all
//! consume space above the plot; the scale computer needs that number before
//! any real layout exists. The estimate is a pure function of configuration
//! plus one measurement callback; the backend measures a representative
//! sample off-screen and reports its height.

use crate::config::{ChartConfig, FlagPosition};
use crate::data::Series;

/// Off-screen measurement probe supplied by the rendering backend.
///
/// `measure_height` sizes a representative piece of content without laying it
/// out for real; the sample is discarded after measurement.
pub trait TextMeasurer {
    fn measure_height(&self, sample: &str) -> f64;
}

/// Fixed-height measurer for tests and headless layout.
#[derive(Debug, Clone, Copy)]
pub struct FixedTextMeasurer {
    pub line_height: f64,
}

impl FixedTextMeasurer {
    #[must_use]
    pub fn new(line_height: f64) -> Self {
        Self { line_height }
    }
}

impl TextMeasurer for FixedTextMeasurer {
    fn measure_height(&self, sample: &str) -> f64 {
        let lines = sample.lines().count().max(1);
        self.line_height * lines as f64
    }
}

/// Extra vertical pixels the plot must reserve so decorations do not collide
/// with graph content.
#[must_use]
pub fn required_headroom(
    config: &ChartConfig,
    series: &[Series],
    measurer: &dyn TextMeasurer,
) -> f64 {
    let mut needed = 0.0;

    if let Some(banner) = config.error_message.as_deref() {
        needed += measurer.measure_height(banner);
    }

    if has_point_flags(series) && config.bars.flag_position == FlagPosition::Exterior {
        if let Some(sample) = first_flag_text(series) {
            needed += measurer.measure_height(sample) + config.flag_offset;
        }
    }

    if config.axes.x2.show && !config.axes.x2.labels.is_empty() {
        let sample = config
            .axes
            .x2
            .labels
            .first()
            .map_or("", String::as_str);
        needed += measurer.measure_height(sample);
    }

    needed
}

fn has_point_flags(series: &[Series]) -> bool {
    first_flag_text(series).is_some()
}

fn first_flag_text(series: &[Series]) -> Option<&str> {
    series
        .iter()
        .flat_map(|one| one.subseries.iter())
        .flat_map(|run| run.iter())
        .find_map(|point| point.flag.as_deref())
}
