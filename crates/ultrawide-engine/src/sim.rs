//! In-memory host.
//!
//! Implements every capability trait on plain structs so the adaptation
//! pipeline runs headless. Defaults mirror the stock game: an 860x520 player
//! view framed at 16:9 on a 500-unit-tall canvas.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Mat4, UVec2, Vec2, Vec3};
use ultrawide_common::{MarkerId, ScreenRect};
use ultrawide_kernel::{
    AnchoredRectTarget, AspectFitterTarget, CameraTarget, FieldOfViewTarget, HudBindings,
    RenderSurfaceTarget, ScaleTarget, ScanMarkerWidget, UiScalerTarget, DEFAULT_HELMET_WIDTH,
    REFERENCE_UI_HEIGHT,
};

/// Stock player view size.
pub const STOCK_SURFACE_SIZE: UVec2 = UVec2::new(860, 520);

/// Stock HUD framing aspect.
pub const STOCK_ASPECT: f32 = 16.0 / 9.0;

/// Stock UI camera FOV.
pub const STOCK_UI_FOV: f32 = 60.0;

/// Render texture whose size is shared with the camera drawing into it.
#[derive(Debug)]
pub struct SimRenderSurface {
    size: Rc<Cell<UVec2>>,
    /// Number of times the GPU resource was released.
    pub releases: u32,
}

impl SimRenderSurface {
    /// Creates a surface of the given size.
    #[must_use]
    pub fn new(size: UVec2) -> Self {
        Self {
            size: Rc::new(Cell::new(size)),
            releases: 0,
        }
    }

    /// Handle a camera reads its target size through.
    #[must_use]
    pub fn size_handle(&self) -> Rc<Cell<UVec2>> {
        Rc::clone(&self.size)
    }
}

impl RenderSurfaceTarget for SimRenderSurface {
    fn size(&self) -> UVec2 {
        self.size.get()
    }

    fn release(&mut self) {
        self.releases += 1;
    }

    fn resize(&mut self, size: UVec2) {
        self.size.set(size);
    }
}

/// Perspective camera rendering into a [`SimRenderSurface`].
#[derive(Debug)]
pub struct SimCamera {
    /// Eye position.
    pub position: Vec3,
    /// Point looked at.
    pub look_at: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    aspect: f32,
    target: Rc<Cell<UVec2>>,
}

impl SimCamera {
    /// Creates a camera at the origin looking down -Z into `target`.
    #[must_use]
    pub fn new(target: &SimRenderSurface) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            fov_y_degrees: 66.0,
            near: 0.1,
            far: 500.0,
            aspect: 1.0,
            target: target.size_handle(),
        };
        camera.reset_aspect();
        camera
    }

    /// Aspect used for projection.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    fn view_projection(&self) -> (Mat4, Mat4) {
        let view = Mat4::look_at_rh(self.position, self.look_at, Vec3::Y);
        let projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        (view, projection)
    }
}

impl CameraTarget for SimCamera {
    fn reset_aspect(&mut self) {
        let size = self.target.get();
        if size.y > 0 {
            self.aspect = size.x as f32 / size.y as f32;
        }
    }

    fn world_to_viewport(&self, world: Vec3) -> Vec3 {
        let (view, projection) = self.view_projection();
        let view_pos = view.transform_point3(world);
        let ndc = projection.project_point3(view_pos);
        Vec3::new(ndc.x * 0.5 + 0.5, ndc.y * 0.5 + 0.5, -view_pos.z)
    }
}

/// Aspect ratio fitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimFitter {
    /// Fitted aspect.
    pub aspect: f32,
}

impl AspectFitterTarget for SimFitter {
    fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

/// Canvas scaler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimCanvasScaler {
    /// Reference resolution.
    pub reference_resolution: Vec2,
}

impl UiScalerTarget for SimCanvasScaler {
    fn set_reference_resolution(&mut self, resolution: Vec2) {
        self.reference_resolution = resolution;
    }
}

/// HUD camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimUiCamera {
    /// Field of view in degrees.
    pub field_of_view: f32,
}

impl FieldOfViewTarget for SimUiCamera {
    fn set_field_of_view(&mut self, degrees: f32) {
        self.field_of_view = degrees;
    }
}

/// Anchored UI rect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimRect {
    /// Position relative to anchors.
    pub anchored_position: Vec2,
    /// Anchor min.
    pub anchor_min: Vec2,
    /// Anchor max.
    pub anchor_max: Vec2,
    /// Pivot.
    pub pivot: Vec2,
}

impl AnchoredRectTarget for SimRect {
    fn set_anchored_position(&mut self, position: Vec2) {
        self.anchored_position = position;
    }

    fn set_anchors(&mut self, min: Vec2, max: Vec2) {
        self.anchor_min = min;
        self.anchor_max = max;
    }

    fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = pivot;
    }
}

/// Scene transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimTransform {
    /// Local scale.
    pub scale: Vec3,
}

impl ScaleTarget for SimTransform {
    fn local_scale(&self) -> Vec3 {
        self.scale
    }

    fn set_local_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }
}

/// Scan marker widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimMarker {
    /// Marker key.
    pub id: MarkerId,
    /// Anchored position on the player screen.
    pub position: Vec2,
}

impl SimMarker {
    /// Creates a marker at the screen origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: MarkerId::new(),
            position: Vec2::ZERO,
        }
    }
}

impl Default for SimMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanMarkerWidget for SimMarker {
    fn marker_id(&self) -> MarkerId {
        self.id
    }

    fn set_anchored_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// Whole HUD scene. Any object may be set to `None` to simulate a scene that
/// lacks it.
#[derive(Debug)]
pub struct SimHost {
    /// Window size in pixels.
    pub window: Vec2,
    /// Player view surface.
    pub player_surface: Option<SimRenderSurface>,
    /// Terminal view surface.
    pub terminal_surface: Option<SimRenderSurface>,
    /// Gameplay camera.
    pub gameplay_camera: Option<SimCamera>,
    /// Player view panel fitter.
    pub view_panel: Option<SimFitter>,
    /// HUD container fitter.
    pub hud_container: Option<SimFitter>,
    /// Canvas scaler.
    pub canvas_scaler: Option<SimCanvasScaler>,
    /// HUD camera.
    pub ui_camera: Option<SimUiCamera>,
    /// Inventory panel.
    pub inventory: Option<SimRect>,
    /// Helmet model.
    pub helmet: Option<SimTransform>,
}

impl SimHost {
    /// Creates a fully populated stock scene in a window of the given size.
    #[must_use]
    pub fn new(window: Vec2) -> Self {
        let player_surface = SimRenderSurface::new(STOCK_SURFACE_SIZE);
        let gameplay_camera = SimCamera::new(&player_surface);
        Self {
            window,
            terminal_surface: Some(SimRenderSurface::new(STOCK_SURFACE_SIZE)),
            gameplay_camera: Some(gameplay_camera),
            player_surface: Some(player_surface),
            view_panel: Some(SimFitter {
                aspect: STOCK_ASPECT,
            }),
            hud_container: Some(SimFitter {
                aspect: STOCK_ASPECT,
            }),
            canvas_scaler: Some(SimCanvasScaler {
                reference_resolution: Vec2::new(
                    REFERENCE_UI_HEIGHT * STOCK_ASPECT,
                    REFERENCE_UI_HEIGHT,
                ),
            }),
            ui_camera: Some(SimUiCamera {
                field_of_view: STOCK_UI_FOV,
            }),
            inventory: Some(SimRect {
                anchored_position: Vec2::new(0.0, 12.0),
                anchor_min: Vec2::new(0.5, 0.0),
                anchor_max: Vec2::new(0.5, 0.0),
                pivot: Vec2::new(0.5, 0.5),
            }),
            helmet: Some(SimTransform {
                scale: Vec3::new(DEFAULT_HELMET_WIDTH, 0.4, 0.4),
            }),
        }
    }

    /// Simulates a window resize or monitor swap.
    pub fn resize_window(&mut self, window: Vec2) {
        self.window = window;
    }

    /// Player view surface size, if bound.
    #[must_use]
    pub fn player_surface_size(&self) -> Option<UVec2> {
        self.player_surface.as_ref().map(RenderSurfaceTarget::size)
    }
}

impl HudBindings for SimHost {
    fn player_surface(&mut self) -> Option<&mut dyn RenderSurfaceTarget> {
        self.player_surface
            .as_mut()
            .map(|s| s as &mut dyn RenderSurfaceTarget)
    }

    fn terminal_surface(&mut self) -> Option<&mut dyn RenderSurfaceTarget> {
        self.terminal_surface
            .as_mut()
            .map(|s| s as &mut dyn RenderSurfaceTarget)
    }

    fn gameplay_camera(&mut self) -> Option<&mut dyn CameraTarget> {
        self.gameplay_camera
            .as_mut()
            .map(|c| c as &mut dyn CameraTarget)
    }

    fn view_panel_fitter(&mut self) -> Option<&mut dyn AspectFitterTarget> {
        self.view_panel
            .as_mut()
            .map(|f| f as &mut dyn AspectFitterTarget)
    }

    fn hud_fitter(&mut self) -> Option<&mut dyn AspectFitterTarget> {
        self.hud_container
            .as_mut()
            .map(|f| f as &mut dyn AspectFitterTarget)
    }

    fn canvas_scaler(&mut self) -> Option<&mut dyn UiScalerTarget> {
        self.canvas_scaler
            .as_mut()
            .map(|s| s as &mut dyn UiScalerTarget)
    }

    fn ui_camera(&mut self) -> Option<&mut dyn FieldOfViewTarget> {
        self.ui_camera
            .as_mut()
            .map(|c| c as &mut dyn FieldOfViewTarget)
    }

    fn inventory_panel(&mut self) -> Option<&mut dyn AnchoredRectTarget> {
        self.inventory
            .as_mut()
            .map(|r| r as &mut dyn AnchoredRectTarget)
    }

    fn helmet_model(&mut self) -> Option<&mut dyn ScaleTarget> {
        self.helmet.as_mut().map(|t| t as &mut dyn ScaleTarget)
    }

    fn display_size(&self) -> Option<Vec2> {
        Some(self.window)
    }

    /// The player view fills the canvas height and is framed at the view
    /// panel's aspect.
    fn player_screen_rect(&self) -> Option<ScreenRect> {
        let scaler = self.canvas_scaler.as_ref()?;
        let panel = self.view_panel.as_ref()?;
        let height = scaler.reference_resolution.y;
        Some(ScreenRect::centered(Vec2::new(height * panel.aspect, height)))
    }
}
