//! Aspect adaptation engine.
//!
//! Owns the sampler state for one HUD lifetime and exposes the three hooks
//! the host calls: HUD start, per-frame HUD update and per-frame scan node
//! update.

use std::collections::HashMap;
use std::hash::BuildHasher;

use glam::Vec3;
use tracing::{debug, info};
use ultrawide_common::{AspectRatio, MarkerId, UltrawideResult};

use crate::applicator::{apply_layout, ApplyReport};
use crate::bindings::{CameraTarget, HudBindings, ScanMarkerWidget};
use crate::layout::{compute_layout, DerivedLayout};
use crate::sampler::{AspectSampler, SampleOutcome};
use crate::settings::AdaptationSettings;

/// Aspect applied at HUD start when auto-detect is off.
pub const FALLBACK_ASPECT: AspectRatio = AspectRatio::WIDESCREEN_16_9;

/// Drives layout derivation and application for one HUD.
#[derive(Debug, Clone)]
pub struct AspectAdaptationEngine {
    settings: AdaptationSettings,
    sampler: AspectSampler,
    last_layout: Option<DerivedLayout>,
}

impl AspectAdaptationEngine {
    /// Creates an engine; invalid settings are replaced with defaults.
    #[must_use]
    pub fn new(settings: AdaptationSettings) -> Self {
        Self::with_sampler(settings, AspectSampler::new())
    }

    /// Creates an engine with a custom sampler.
    #[must_use]
    pub fn with_sampler(settings: AdaptationSettings, sampler: AspectSampler) -> Self {
        let settings = settings.validated();
        info!(
            "Aspect adaptation ready (auto detect: {}, resolution override: {}x{}, UI scale: {}, UI aspect: {})",
            settings.auto_detect(),
            settings.resolution_override.width,
            settings.resolution_override.height,
            settings.ui.scale,
            settings.ui.aspect_ratio
        );
        Self {
            settings,
            sampler,
            last_layout: None,
        }
    }

    /// Settings snapshot in use.
    #[must_use]
    pub fn settings(&self) -> &AdaptationSettings {
        &self.settings
    }

    /// Whether the display aspect is sampled every interval.
    #[must_use]
    pub fn auto_detect(&self) -> bool {
        self.settings.auto_detect()
    }

    /// Last aspect handed to the layout pipeline.
    #[must_use]
    pub fn current_aspect(&self) -> Option<AspectRatio> {
        self.sampler.previous()
    }

    /// Most recently applied layout.
    #[must_use]
    pub fn last_layout(&self) -> Option<&DerivedLayout> {
        self.last_layout.as_ref()
    }

    /// HUD start hook.
    ///
    /// Applies [`FALLBACK_ASPECT`] once when auto-detect is off, then resets
    /// the sampler so the new HUD gets a fresh detection pass.
    pub fn on_hud_start<B>(&mut self, bindings: &mut B) -> Option<ApplyReport>
    where
        B: HudBindings + ?Sized,
    {
        let report = if self.auto_detect() {
            None
        } else {
            Some(self.apply_aspect(FALLBACK_ASPECT, bindings))
        };
        self.sampler.reset();
        report
    }

    /// Per-frame HUD update hook; `now` is the host's elapsed time in seconds.
    ///
    /// Returns a report when a new aspect was applied this frame.
    pub fn on_hud_update<B>(&mut self, now: f32, bindings: &mut B) -> Option<ApplyReport>
    where
        B: HudBindings + ?Sized,
    {
        if !self.auto_detect() {
            return None;
        }

        match self.sampler.sample(now, bindings.display_size()) {
            SampleOutcome::Changed(aspect) => {
                let report = self.apply_aspect(aspect, bindings);
                self.sampler.commit(aspect);
                info!("New aspect ratio: {aspect}");
                Some(report)
            },
            SampleOutcome::NotDue | SampleOutcome::Unavailable | SampleOutcome::Unchanged => {
                None
            },
        }
    }

    /// Per-frame scan node hook.
    ///
    /// Must run after [`Self::on_hud_update`] in the same frame. Returns the
    /// number of markers moved; zero when the player screen rect is unbound.
    pub fn on_scan_nodes_updated<B, W, S>(
        &self,
        bindings: &B,
        camera: &dyn CameraTarget,
        markers: &mut [W],
        points: &HashMap<MarkerId, Vec3, S>,
    ) -> usize
    where
        B: HudBindings + ?Sized,
        W: ScanMarkerWidget,
        S: BuildHasher,
    {
        let Some(screen) = bindings.player_screen_rect() else {
            return 0;
        };
        crate::scan_markers::reposition_scan_markers(camera, screen, markers, points)
    }

    /// Derives and applies the layout for `aspect` immediately.
    pub fn apply_aspect<B>(&mut self, aspect: AspectRatio, bindings: &mut B) -> ApplyReport
    where
        B: HudBindings + ?Sized,
    {
        let current_height = bindings
            .player_surface()
            .map_or(0, |surface| surface.size().y);
        let layout = compute_layout(aspect, &self.settings, current_height);
        debug!(
            "Derived layout for {aspect}: render {}x{}, HUD aspect {}, FOV {:.2}",
            layout.render_width,
            layout.render_height,
            layout.hud_aspect,
            layout.field_of_view_degrees
        );

        let report = apply_layout(&layout, bindings);
        self.last_layout = Some(layout);
        report
    }

    /// Like [`Self::apply_aspect`] for a raw ratio, rejecting degenerate values.
    pub fn change_aspect_ratio<B>(
        &mut self,
        aspect: f32,
        bindings: &mut B,
    ) -> UltrawideResult<ApplyReport>
    where
        B: HudBindings + ?Sized,
    {
        let aspect = AspectRatio::new(aspect)?;
        Ok(self.apply_aspect(aspect, bindings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::{
        AnchoredRectTarget, AspectFitterTarget, FieldOfViewTarget, RenderSurfaceTarget,
        ScaleTarget, UiScalerTarget,
    };
    use crate::settings::ResolutionOverride;
    use glam::{UVec2, Vec2};
    use ultrawide_common::ScreenRect;

    #[derive(Default)]
    struct Surface {
        size: UVec2,
        releases: u32,
    }

    impl RenderSurfaceTarget for Surface {
        fn size(&self) -> UVec2 {
            self.size
        }

        fn release(&mut self) {
            self.releases += 1;
        }

        fn resize(&mut self, size: UVec2) {
            self.size = size;
        }
    }

    /// Host exposing only the player surface and the display size.
    struct SurfaceOnly {
        surface: Surface,
        display: Option<Vec2>,
    }

    impl HudBindings for SurfaceOnly {
        fn player_surface(&mut self) -> Option<&mut dyn RenderSurfaceTarget> {
            Some(&mut self.surface)
        }

        fn terminal_surface(&mut self) -> Option<&mut dyn RenderSurfaceTarget> {
            None
        }

        fn gameplay_camera(&mut self) -> Option<&mut dyn CameraTarget> {
            None
        }

        fn view_panel_fitter(&mut self) -> Option<&mut dyn AspectFitterTarget> {
            None
        }

        fn hud_fitter(&mut self) -> Option<&mut dyn AspectFitterTarget> {
            None
        }

        fn canvas_scaler(&mut self) -> Option<&mut dyn UiScalerTarget> {
            None
        }

        fn ui_camera(&mut self) -> Option<&mut dyn FieldOfViewTarget> {
            None
        }

        fn inventory_panel(&mut self) -> Option<&mut dyn AnchoredRectTarget> {
            None
        }

        fn helmet_model(&mut self) -> Option<&mut dyn ScaleTarget> {
            None
        }

        fn display_size(&self) -> Option<Vec2> {
            self.display
        }

        fn player_screen_rect(&self) -> Option<ScreenRect> {
            None
        }
    }

    fn host(display: Vec2) -> SurfaceOnly {
        SurfaceOnly {
            surface: Surface {
                size: UVec2::new(860, 520),
                releases: 0,
            },
            display: Some(display),
        }
    }

    #[test]
    fn test_auto_detect_waits_for_first_tick() {
        let mut engine = AspectAdaptationEngine::new(AdaptationSettings::default());
        let mut host = host(Vec2::new(2560.0, 1080.0));

        assert!(engine.on_hud_start(&mut host).is_none());
        assert!(engine.on_hud_update(0.5, &mut host).is_none());

        let report = engine.on_hud_update(1.1, &mut host).expect("aspect applied");
        assert!(report.applied(crate::Subsystem::PlayerSurface));
        assert_eq!(host.surface.size, UVec2::new(1233, 520));
        assert_eq!(host.surface.releases, 1);
    }

    #[test]
    fn test_same_aspect_not_reapplied() {
        let mut engine = AspectAdaptationEngine::new(AdaptationSettings::default());
        let mut host = host(Vec2::new(1920.0, 1080.0));

        assert!(engine.on_hud_update(1.5, &mut host).is_some());
        assert!(engine.on_hud_update(3.0, &mut host).is_none());
        assert_eq!(host.surface.releases, 1);
    }

    #[test]
    fn test_fixed_override_applies_fallback_once() {
        let settings = AdaptationSettings {
            resolution_override: ResolutionOverride {
                width: 1920,
                height: 1080,
            },
            ..AdaptationSettings::default()
        };
        let mut engine = AspectAdaptationEngine::new(settings);
        let mut host = host(Vec2::new(3440.0, 1440.0));

        assert!(engine.on_hud_start(&mut host).is_some());
        assert_eq!(host.surface.size, UVec2::new(1920, 1080));
        assert_eq!(
            engine.last_layout().map(|l| l.target_aspect),
            Some(FALLBACK_ASPECT)
        );

        assert!(engine.on_hud_update(5.0, &mut host).is_none());
        assert_eq!(host.surface.releases, 1);
    }

    #[test]
    fn test_hud_restart_reapplies() {
        let mut engine = AspectAdaptationEngine::new(AdaptationSettings::default());
        let mut host = host(Vec2::new(1920.0, 1080.0));

        assert!(engine.on_hud_update(2.0, &mut host).is_some());
        engine.on_hud_start(&mut host);
        assert!(engine.current_aspect().is_none());
        assert!(engine.on_hud_update(1.5, &mut host).is_some());
    }

    #[test]
    fn test_custom_sampler_polls_faster() {
        let mut engine = AspectAdaptationEngine::with_sampler(
            AdaptationSettings::default(),
            AspectSampler::with_interval(0.25),
        );
        let mut host = host(Vec2::new(1920.0, 1080.0));

        assert!(engine.on_hud_update(0.3, &mut host).is_some());
        host.display = Some(Vec2::new(2560.0, 1080.0));
        assert!(engine.on_hud_update(0.5, &mut host).is_none());
        assert!(engine.on_hud_update(0.6, &mut host).is_some());
        assert_eq!(host.surface.releases, 2);
    }

    #[test]
    fn test_change_aspect_ratio_rejects_zero() {
        let mut engine = AspectAdaptationEngine::new(AdaptationSettings::default());
        let mut host = host(Vec2::new(1920.0, 1080.0));
        assert!(engine.change_aspect_ratio(0.0, &mut host).is_err());
        assert!(engine.change_aspect_ratio(f32::NAN, &mut host).is_err());
        assert_eq!(host.surface.releases, 0);
    }

    #[test]
    fn test_missing_camera_does_not_abort() {
        let mut engine = AspectAdaptationEngine::new(AdaptationSettings::default());
        let mut host = host(Vec2::new(1920.0, 1080.0));
        let report = engine
            .change_aspect_ratio(2.0, &mut host)
            .expect("valid aspect");

        assert!(!report.applied(crate::Subsystem::GameplayCamera));
        assert!(report.applied(crate::Subsystem::PlayerSurface));
        assert_eq!(report.steps().len(), crate::Subsystem::ALL.len());
    }
}
