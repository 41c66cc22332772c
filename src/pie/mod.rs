pub mod engine;
pub mod gate;
pub mod wedge;

pub use engine::{HoverEvent, PieGeometry, PieState, SelectionChange};
pub use gate::{PausedWedgeEvents, WedgeEventGate};
pub use wedge::{Wedge, point_in_polygon, wedge_angles, wedge_outline, wedge_path};
