mod animation;
mod frame;
mod null_renderer;
mod primitives;

pub use animation::{
    AnimationHandle, AnimationOutcome, AnimationScheduler, AnimationSpec, InstantScheduler,
};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, PathCommand, PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame`, so
/// drawing code remains isolated from layout and interaction logic. The core
/// decides what geometry exists; the backend decides how it is stroked,
/// filled, and tweened.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
