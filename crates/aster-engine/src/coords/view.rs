use super::Vec2;

/// Rendering-surface size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Visible window into the image, in image coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewBounds {
    #[inline]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.y_max - self.y_min
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width() > 0.0
            && self.height() > 0.0
            && self.width().is_finite()
            && self.height().is_finite()
    }
}

/// Read-only image-to-screen mapping snapshot.
///
/// Owned by the host frame/view component and recomputed on every pan/zoom;
/// editors read a fresh copy per interaction step and never mutate it.
///
/// `zoom` is the screen-pixels-per-image-pixel ratio. For a consistent view
/// it equals `surface.width / bounds.width()` (and the same for the vertical
/// axis), which is what makes [`image_to_screen`](Self::image_to_screen) and
/// [`screen_delta_to_image`](Self::screen_delta_to_image) inverses of each
/// other.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ViewProjection {
    pub bounds: ViewBounds,
    pub zoom: f64,
    pub surface: Viewport,
}

impl ViewProjection {
    #[inline]
    pub const fn new(bounds: ViewBounds, zoom: f64, surface: Viewport) -> Self {
        Self { bounds, zoom, surface }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.bounds.is_valid() && self.surface.is_valid() && self.zoom > 0.0 && self.zoom.is_finite()
    }

    /// Projects an image-space point to screen space (logical pixels).
    ///
    /// The +1 offset follows the pixel-center convention of the data grid;
    /// the vertical axis is flipped because screen Y grows downward.
    pub fn image_to_screen(self, p: Vec2) -> Vec2 {
        let sx = (p.x + 1.0 - self.bounds.x_min) / self.bounds.width() * self.surface.width as f64;
        let sy = self.surface.height as f64
            - (p.y + 1.0 - self.bounds.y_min) / self.bounds.height() * self.surface.height as f64;
        Vec2::new(sx, sy)
    }

    /// Converts a screen-space delta back into an image-space delta.
    ///
    /// Inverse of the projection for deltas: divide by zoom, un-flip the
    /// vertical axis.
    #[inline]
    pub fn screen_delta_to_image(self, d: Vec2) -> Vec2 {
        Vec2::new(d.x / self.zoom, -d.y / self.zoom)
    }
}
