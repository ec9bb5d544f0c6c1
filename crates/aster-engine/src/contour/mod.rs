//! Chunked GPU buffer store for streamed contour line data.
//!
//! Contour data arrives incrementally from a producer; every delivery becomes
//! one [`ContourChunk`] with its own vertex buffer, uploaded immediately and
//! drawn in insertion order. Clearing the store releases every buffer; the
//! store never reorders or compacts chunks.

mod generator;
mod store;

pub use generator::{SegmentNormalGenerator, VertexGenerator, VERTEX_DATA_ELEMENTS};
pub use store::{ContourChunk, ContourStore};
