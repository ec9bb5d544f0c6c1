//! Coordinate and geometry types shared by the region overlay and renderers.
//!
//! Two coordinate systems exist side by side:
//! - Image space: the underlying data grid, `f64`, +Y up, independent of
//!   zoom/pan.
//! - Screen space: logical pixels on the rendering surface, origin top-left,
//!   +Y down.
//!
//! [`ViewProjection`] is the bridge between the two; it is recomputed by the
//! host on every pan/zoom step and read as a snapshot per interaction step.

mod color;
mod vec2;
mod view;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use view::{ViewBounds, ViewProjection, Viewport};
