pub mod normalize;
pub mod series;

pub use normalize::{ChartInput, normalize, normalize_json, normalize_with};
pub use series::{
    MaxValuePolicy, MinValuePolicy, Point, Series, SeriesOptions, SeriesType, Subseries,
};
