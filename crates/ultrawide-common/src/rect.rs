//! Screen-space rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in HUD pixel space.
///
/// Matches the local rect of an anchored UI element: `min` is the lower-left
/// corner relative to the element's pivot, so a centered element of size
/// `(w, h)` has `min = (-w/2, -h/2)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Lower-left corner.
    pub min: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl ScreenRect {
    /// Creates a rect from its min corner and size.
    #[must_use]
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Creates a rect of the given size centered on the origin.
    #[must_use]
    pub fn centered(size: Vec2) -> Self {
        Self {
            min: -size * 0.5,
            size,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Maps a normalized viewport coordinate (0..1 on both axes) into this rect.
    ///
    /// Values outside 0..1 map outside the rect; off-screen markers keep their
    /// relative placement.
    #[must_use]
    pub fn viewport_to_rect(&self, viewport: Vec2) -> Vec2 {
        self.min + self.size * viewport
    }
}
