//! Aster engine crate.
//!
//! Interactive-overlay and GPU-data layer for an image-visualization tool:
//! region geometry editing (drag, anchor-aware resize, rotate) over a
//! pan/zoomable image, and a chunked contour vertex-buffer store with a wgpu
//! renderer. The host owns the event loop and the surface; this crate owns
//! geometry math, gesture state, and buffer lifecycles.

pub mod contour;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod region;
pub mod render;
