//! quillchart: declarative vector charting engine.
//!
//! The crate owns the deterministic layout core — data normalization, series
//! aggregation, axis scaling, label generation, line/bar geometry, and pie
//! wedge geometry with its rotation/selection state machine. Drawing is
//! delegated to a rendering backend behind the `render::Renderer` trait; the
//! core only decides *what* geometry to draw.

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod layout;
pub mod pie;
pub mod render;
pub mod telemetry;

pub use api::{ChartHandle, Graph};
pub use config::ChartConfig;
pub use error::{ChartError, ChartResult};
