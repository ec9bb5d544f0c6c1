//! Interactive region overlay.
//!
//! Responsibilities:
//! - hold region geometry (center, half-extent, rotation) in image space
//! - translate pointer gestures into geometry updates through a projection
//!   snapshot supplied by the host view
//! - expose an explicit dirty signal so the host render loop knows when to
//!   redraw
//!
//! Geometry is mutated only through [`RegionEditor`]; the editing lifecycle
//! is enforced by the [`InteractionSession`] value returned from
//! [`RegionEditor::begin_edit`].

mod anchor;
mod editor;
mod geometry;

pub use anchor::Anchor;
pub use editor::{InteractionSession, PointerResponse, RegionEditor};
pub use geometry::{RegionGeometry, RegionType, MIN_HALF_EXTENT};
