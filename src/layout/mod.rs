pub mod aggregate;
pub mod bar_geometry;
pub mod decimation;
pub mod headroom;
pub mod labels;
pub mod line_geometry;
pub mod scale;

pub use aggregate::{data_values, max_values, min_values, sums};
pub use bar_geometry::{BarPlan, BarRect, ColumnTarget, plan_bar_series};
pub use decimation::show_every_nth;
pub use headroom::{FixedTextMeasurer, TextMeasurer, required_headroom};
pub use labels::{Separators, format_value, group_thousands, y_axis_labels};
pub use line_geometry::{HoverBand, LinePlan, PointMarker, Polyline, plan_line_series};
pub use scale::{PlotArea, ScaleArtifacts, ScaleRequest, compute_scale, distortion_factor};
