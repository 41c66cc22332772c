//! Deep configuration tree for the charting engine.
//!
//! Every node derives serde with camelCase field names and full defaults so a
//! chart can be configured from a partial JSON document. The tree is pure
//! data: wedge event callbacks are registered on the pie handle instead.

use serde::{Deserialize, Serialize};

use crate::data::SeriesOptions;

/// Top-level chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    /// Enables animated transitions (draw-in, rotation, live resize).
    pub animation: bool,
    /// Series color palette as CSS hex strings, cycled per series/wedge.
    pub colors: Vec<String>,
    pub dates: DateConfig,
    /// Error banner text; `None` renders no banner and reserves no headroom.
    pub error_message: Option<String>,
    pub label_width: LabelWidth,
    /// Vertical gap between a point flag callout and its point, in pixels.
    pub flag_offset: f64,
    /// Point count above which labels/points are decimated.
    ///
    /// The serde name keeps the original API's double-h spelling.
    #[serde(rename = "skipPointThreshhold")]
    pub skip_point_threshold: usize,
    /// Explicit decimation override; wins over the derived policy when set.
    pub show_every_nth: Option<usize>,
    /// Starting decimal precision for y-axis labels.
    pub precision: u8,
    /// Grows left padding to fit the widest y-axis label when set.
    pub dynamic_left_padding: bool,
    pub grid: GridConfig,
    pub axes: AxesConfig,
    pub tooltip: TooltipConfig,
    pub series_defaults: SeriesOptions,
    pub bars: BarConfig,
    pub lines: LineConfig,
    pub padding: Padding,
    pub pie: PieConfig,
}

impl ChartConfig {
    /// Decimal/thousands separator characters used by label formatting.
    #[must_use]
    pub fn separators(&self) -> crate::layout::labels::Separators {
        crate::layout::labels::Separators {
            decimal: self.dates.decimal_separator,
            thousands: self.dates.thousands_separator,
        }
    }
}

/// Date axis configuration. Date-string formatting itself is an external
/// utility; the engine only carries the chosen format through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateConfig {
    /// strftime-style format, or `"auto"` to let the formatter pick.
    pub format: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            format: "auto".to_owned(),
            decimal_separator: '.',
            thousands_separator: ',',
        }
    }
}

/// Width reserved for y-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LabelWidth {
    /// Measure the generated labels and size to the widest one.
    #[default]
    Auto,
    /// Fixed pixel width.
    Fixed(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub show: bool,
    pub show_baseline: bool,
    pub num_y_labels: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show: true,
            show_baseline: true,
            num_y_labels: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AxesConfig {
    pub x1: AxisConfig,
    pub x2: AxisConfig,
    pub y1: AxisConfig,
    pub y2: AxisConfig,
}

/// One axis row/column of the label frame around the plot area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisConfig {
    pub show: bool,
    /// Explicit label strings; generated from the scale when empty.
    pub labels: Vec<String>,
    /// Which series this axis reads its scale from.
    pub series_index: usize,
    /// Unit suffix appended to every label.
    pub unit: String,
    /// Unit applied only to the topmost label (e.g. `"%"` on the max line).
    pub top_unit: String,
    /// Renders the unit before the value instead of after.
    pub prefix_unit: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            show: true,
            labels: Vec::new(),
            series_index: 0,
            unit: String::new(),
            top_unit: String::new(),
            prefix_unit: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipConfig {
    pub show: bool,
    pub width: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show: true,
            width: 200.0,
        }
    }
}

/// Where point flags render relative to bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FlagPosition {
    /// Callout above the bar; reserves headroom above the plot.
    #[default]
    Exterior,
    /// Rendered inside the bar body; reserves no headroom.
    Interior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarConfig {
    pub highlight_border_width: f64,
    pub highlight_color: String,
    pub flag_position: FlagPosition,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            highlight_border_width: 2.0,
            highlight_color: "#ffffff".to_owned(),
            flag_position: FlagPosition::Exterior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineConfig {
    pub width: f64,
    pub point_radius: f64,
    pub point_stroke_width: f64,
    pub fill_opacity: f64,
    /// Labels closer than this to the drawable top edge are suppressed.
    pub label_line_height: f64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            point_radius: 3.0,
            point_stroke_width: 2.0,
            fill_opacity: 0.2,
            label_line_height: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 15.0,
            right: 20.0,
            bottom: 20.0,
            left: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PieConfig {
    /// Outer radius; derived from the plot area when `None`.
    pub radius: Option<f64>,
    /// Center `(x, y)` in surface pixels; derived from the plot area when
    /// `None`.
    pub center: Option<(f64, f64)>,
    /// Donut hole radius; `0` draws a full pie.
    pub inner_radius: f64,
    pub draw_pie_hole: bool,
    /// Routes pointer events through a transparent overlay to the wedge
    /// geometrically beneath it.
    pub use_pass_through: bool,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            radius: None,
            center: None,
            inner_radius: 0.0,
            draw_pie_hole: false,
            use_pass_through: false,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            animation: true,
            colors: vec![
                "#99cc33".to_owned(),
                "#ffee44".to_owned(),
                "#ffbb11".to_owned(),
                "#ee5500".to_owned(),
                "#33bbcc".to_owned(),
                "#88cc33".to_owned(),
            ],
            dates: DateConfig::default(),
            error_message: None,
            label_width: LabelWidth::Auto,
            flag_offset: 5.0,
            skip_point_threshold: 10,
            show_every_nth: None,
            precision: 0,
            dynamic_left_padding: false,
            grid: GridConfig::default(),
            axes: AxesConfig::default(),
            tooltip: TooltipConfig::default(),
            series_defaults: SeriesOptions::default(),
            bars: BarConfig::default(),
            lines: LineConfig::default(),
            padding: Padding::default(),
            pie: PieConfig::default(),
        }
    }
}
