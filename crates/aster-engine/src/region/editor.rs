use crate::coords::{Vec2, ViewProjection};
use crate::input::{Modifiers, MouseButton, MouseButtonState, PointerButtonEvent};

use super::geometry::MIN_HALF_EXTENT;
use super::{Anchor, RegionGeometry};

/// Ephemeral state of one gesture, created by [`RegionEditor::begin_edit`]
/// and consumed by [`RegionEditor::end_edit`].
///
/// Holding a session is proof that an edit is in progress: the mutating
/// editor operations all require one, so geometry cannot be touched outside
/// a gesture. The type is deliberately neither `Clone` nor `Copy` so a
/// session cannot outlive its `end_edit`.
#[derive(Debug)]
pub struct InteractionSession {
    centered_scaling: bool,
}

impl InteractionSession {
    /// True when resizes keep the center fixed; captured from the modifier
    /// state at gesture start (centered unless Ctrl is held).
    #[inline]
    pub fn centered_scaling(&self) -> bool {
        self.centered_scaling
    }
}

/// What the host should do in response to a pointer press on the region.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerResponse {
    /// Primary button: notify the selection handler.
    Select,
    /// Secondary button: reserved for the context-menu collaborator.
    ContextMenu,
}

/// Per-region interactive controller.
///
/// Owns the region's [`RegionGeometry`] and is its only mutator. All gesture
/// callbacks are synchronous and must complete before the next frame reads
/// the geometry; there is no queuing.
///
/// An interrupted gesture (lost pointer capture) must still call
/// [`end_edit`](Self::end_edit); an open session is a bug in the host, not
/// a supported state.
#[derive(Debug)]
pub struct RegionEditor {
    geometry: RegionGeometry,
    dirty: bool,
}

impl RegionEditor {
    pub fn new(geometry: RegionGeometry) -> Self {
        Self { geometry, dirty: false }
    }

    #[inline]
    pub fn geometry(&self) -> &RegionGeometry {
        &self.geometry
    }

    /// Returns and clears the redraw flag. The host render loop polls this
    /// once per frame instead of observing individual fields.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Classifies a pointer press on the region's shape.
    ///
    /// Release events and other buttons are ignored. The press that starts a
    /// drag goes through here too, so selection follows drag start.
    pub fn handle_pointer_press(&self, ev: &PointerButtonEvent) -> Option<PointerResponse> {
        if ev.state != MouseButtonState::Pressed {
            return None;
        }
        match ev.button {
            MouseButton::Left => Some(PointerResponse::Select),
            MouseButton::Right => Some(PointerResponse::ContextMenu),
            _ => None,
        }
    }

    /// Starts a gesture (first pointer-down of a drag, or transform start).
    ///
    /// Captures the centered-scaling mode from the modifier state: resizes
    /// are centered unless Ctrl is held when the gesture starts. Drags ignore
    /// the flag.
    pub fn begin_edit(&mut self, modifiers: Modifiers) -> InteractionSession {
        self.geometry.set_editing(true);
        InteractionSession { centered_scaling: !modifiers.ctrl }
    }

    /// Ends the gesture. Geometry is accepted as-is; no validation happens
    /// here.
    pub fn end_edit(&mut self, session: InteractionSession) {
        drop(session);
        self.geometry.set_editing(false);
    }

    /// Moves the region center so its projection lands on `new_screen_pos`.
    ///
    /// The screen-space delta between the current projected center and the
    /// reported position is converted back to image space (divide by zoom,
    /// vertical flip) and added to the center.
    pub fn apply_drag(
        &mut self,
        _session: &InteractionSession,
        view: &ViewProjection,
        new_screen_pos: Vec2,
    ) {
        let center = self.geometry.center();
        let current_screen = view.image_to_screen(center);
        let delta = view.screen_delta_to_image(new_screen_pos - current_screen);

        self.geometry.set_center(center + delta);
        self.dirty = true;
    }

    /// Applies one step of a transform gesture.
    ///
    /// The rotation handle sets the reported absolute angle directly. Resize
    /// handles scale the half-extent (clamped to [`MIN_HALF_EXTENT`]);
    /// non-positive scale factors come from degenerate or flipped handles and
    /// are ignored. Anchored (non-centered) resizes also shift the center so
    /// the opposite edge or corner keeps its image-space position, with the
    /// shift expressed in the region's rotated frame.
    pub fn apply_transform(
        &mut self,
        session: &InteractionSession,
        anchor: Anchor,
        scale: Vec2,
        rotation_deg: f64,
    ) {
        if anchor.is_rotator() {
            self.geometry.set_rotation(rotation_deg);
            self.dirty = true;
            return;
        }

        if scale.x <= 0.0 || scale.y <= 0.0 {
            return;
        }

        let half = self.geometry.half_extent();
        let new_half = Vec2::new(
            (half.x * scale.x).max(MIN_HALF_EXTENT),
            (half.y * scale.y).max(MIN_HALF_EXTENT),
        );

        if session.centered_scaling() {
            self.geometry.set_half_extent(new_half);
            self.dirty = true;
            return;
        }

        let factor = self.geometry.region_type().resize_delta_factor();
        let dw = (new_half.x - half.x) * factor;
        let dh = (new_half.y - half.y) * factor;

        let (sin, cos) = self.geometry.rotation().to_radians().sin_cos();
        let mut center = self.geometry.center();

        if anchor.has_left() {
            center.x -= cos * dw;
            center.y += sin * dw;
        } else if anchor.has_right() {
            center.x += cos * dw;
            center.y -= sin * dw;
        }

        if anchor.has_top() {
            center.y += cos * dh;
            center.x += sin * dh;
        } else if anchor.has_bottom() {
            center.y -= cos * dh;
            center.x -= sin * dh;
        }

        self.geometry.set_center(center);
        self.geometry.set_half_extent(new_half);
        self.dirty = true;
    }
}
