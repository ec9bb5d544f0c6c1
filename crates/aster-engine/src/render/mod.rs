//! GPU-facing contexts and the contour chunk renderer.

mod contour;
mod ctx;

pub use contour::{ContourRenderer, ContourStyle};
pub use ctx::{GpuCtx, RenderCtx, RenderTarget};
