use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample within a subseries.
///
/// A `None` value is a gap: it breaks line continuity and contributes nothing
/// to sums. It is never coerced to `0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Point {
    pub value: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Navigation target fired when the point (or its bar) is clicked.
    pub click_target: Option<String>,
    /// Flag callout text rendered near the point.
    pub flag: Option<String>,
}

impl Point {
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// A gap point.
    #[must_use]
    pub fn gap() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    #[must_use]
    pub fn with_click_target(mut self, target: impl Into<String>) -> Self {
        self.click_target = Some(target.into());
        self
    }
}

/// One ordered sequence of points within a series.
pub type Subseries = Vec<Point>;

/// Chart type drawn for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SeriesType {
    #[default]
    Line,
    Step,
    Bar,
    StackedBar,
    Pie,
}

/// Lower-bound policy for a series' value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MinValuePolicy {
    /// Actual minimum of the data.
    #[default]
    Auto,
    /// `min(0, actual minimum)` — the axis never starts above zero.
    ZeroOrLess,
    /// Explicit value passed through unchanged.
    Fixed(f64),
}

/// Upper-bound policy for a series' value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MaxValuePolicy {
    #[default]
    Auto,
    /// Explicit value passed through unchanged, ignoring actual data.
    Fixed(f64),
}

/// Per-series options, a merge of global `seriesDefaults` and per-series
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesOptions {
    #[serde(rename = "type")]
    pub kind: SeriesType,
    #[serde(rename = "minYValue")]
    pub min_value: MinValuePolicy,
    #[serde(rename = "maxYValue")]
    pub max_value: MaxValuePolicy,
    /// Exempts this series' axis from headroom distortion (e.g. temperature
    /// axes where an inflated maximum would be semantically wrong).
    #[serde(rename = "dontDistortAxis")]
    pub keep_axis_undistorted: bool,
    /// Carries lines across gap points instead of breaking them.
    pub interpolate_nulls: bool,
    pub fill_lines: bool,
    pub show_points: bool,
    pub label_points: bool,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            kind: SeriesType::Line,
            min_value: MinValuePolicy::Auto,
            max_value: MaxValuePolicy::Auto,
            keep_axis_undistorted: false,
            interpolate_nulls: false,
            fill_lines: false,
            show_points: true,
            label_points: false,
        }
    }
}

/// One logical dataset: one or more index-aligned subseries drawn as a single
/// chart element.
///
/// All subseries within one chart are assumed to share point count and index
/// alignment; behavior with mismatched lengths is undefined (the layout
/// pipeline derives its point count from the first series only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub subseries: Vec<Subseries>,
    pub options: SeriesOptions,
}

impl Series {
    #[must_use]
    pub fn new(subseries: Vec<Subseries>, options: SeriesOptions) -> Self {
        Self { subseries, options }
    }

    /// Wraps a single run of points as a one-subseries series.
    #[must_use]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            subseries: vec![points],
            options: SeriesOptions::default(),
        }
    }

    /// Point count of the first subseries; the index domain of the series.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.subseries.first().map_or(0, Vec::len)
    }
}
