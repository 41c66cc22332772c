mod engine;
mod graph;

pub use engine::ChartHandle;
pub use graph::{Graph, GraphSnapshot};
