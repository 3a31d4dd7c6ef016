//! Capability traits for host-owned objects.
//!
//! Each dependent visual subsystem is reached through a small trait the host
//! implements on its own objects. [`HudBindings`] gathers them; the host wires
//! it up when a HUD is initialized and hands it to the engine by reference.
//! Every accessor returns `Option` because objects come and go with scene
//! loads.

use glam::{UVec2, Vec2, Vec3};
use ultrawide_common::{MarkerId, ScreenRect};

/// An engine-owned render texture a camera draws into.
pub trait RenderSurfaceTarget {
    /// Current size in pixels.
    fn size(&self) -> UVec2;

    /// Frees the GPU resource so it can be recreated at a new size.
    fn release(&mut self);

    /// Sets the new size; takes effect when the surface is next used.
    fn resize(&mut self, size: UVec2);
}

/// A perspective camera rendering the world.
pub trait CameraTarget {
    /// Re-derives the camera's aspect from its current target surface.
    fn reset_aspect(&mut self);

    /// Projects a world position into normalized viewport space.
    ///
    /// `x`/`y` are 0..1 across the viewport, `z` is the view-space depth.
    fn world_to_viewport(&self, world: Vec3) -> Vec3;
}

/// A layout container that keeps its child at a fixed aspect ratio.
pub trait AspectFitterTarget {
    /// Sets the ratio the container fits to.
    fn set_aspect_ratio(&mut self, aspect: f32);
}

/// Canvas scaler that maps a reference resolution onto the screen.
pub trait UiScalerTarget {
    /// Sets the reference resolution.
    fn set_reference_resolution(&mut self, resolution: Vec2);
}

/// Camera whose field of view frames the HUD.
pub trait FieldOfViewTarget {
    /// Sets the vertical field of view in degrees.
    fn set_field_of_view(&mut self, degrees: f32);
}

/// An anchored UI rectangle.
pub trait AnchoredRectTarget {
    /// Sets the position relative to the anchors.
    fn set_anchored_position(&mut self, position: Vec2);

    /// Sets the normalized anchor corners.
    fn set_anchors(&mut self, min: Vec2, max: Vec2);

    /// Sets the normalized pivot.
    fn set_pivot(&mut self, pivot: Vec2);
}

/// A scene transform with a local scale.
pub trait ScaleTarget {
    /// Current local scale.
    fn local_scale(&self) -> Vec3;

    /// Replaces the local scale.
    fn set_local_scale(&mut self, scale: Vec3);
}

/// One scan-marker widget on the HUD.
pub trait ScanMarkerWidget {
    /// Key into the host's marker → point-of-interest map.
    fn marker_id(&self) -> MarkerId;

    /// Moves the marker.
    fn set_anchored_position(&mut self, position: Vec2);
}

/// Everything the engine touches, resolved fresh on each use.
pub trait HudBindings {
    /// Render surface of the player view.
    fn player_surface(&mut self) -> Option<&mut dyn RenderSurfaceTarget>;

    /// High resolution render surface of the terminal view; not every scene has one.
    fn terminal_surface(&mut self) -> Option<&mut dyn RenderSurfaceTarget>;

    /// Local player's gameplay camera.
    fn gameplay_camera(&mut self) -> Option<&mut dyn CameraTarget>;

    /// Fitter of the panel holding the player view.
    fn view_panel_fitter(&mut self) -> Option<&mut dyn AspectFitterTarget>;

    /// Fitter of the HUD container.
    fn hud_fitter(&mut self) -> Option<&mut dyn AspectFitterTarget>;

    /// Scaler of the root HUD canvas.
    fn canvas_scaler(&mut self) -> Option<&mut dyn UiScalerTarget>;

    /// Camera drawing the HUD.
    fn ui_camera(&mut self) -> Option<&mut dyn FieldOfViewTarget>;

    /// Inventory slot panel.
    fn inventory_panel(&mut self) -> Option<&mut dyn AnchoredRectTarget>;

    /// Cosmetic helmet overlay model.
    fn helmet_model(&mut self) -> Option<&mut dyn ScaleTarget>;

    /// Size the player view canvas is currently displayed at, in pixels.
    fn display_size(&self) -> Option<Vec2>;

    /// Local rect of the player view element.
    fn player_screen_rect(&self) -> Option<ScreenRect>;
}
