//! Derived layout calculation.
//!
//! Everything the applicator writes is derived here from the target aspect
//! and the settings snapshot. No hidden state: identical inputs always give
//! bit-identical output.

use glam::{UVec2, Vec2};
use ultrawide_common::AspectRatio;

use crate::settings::AdaptationSettings;

/// Reference canvas height at UI scale 1.0.
pub const REFERENCE_UI_HEIGHT: f32 = 500.0;

/// Numerator of the UI camera FOV formula (`FOV = 106 / hud_aspect`).
pub const UI_FOV_NUMERATOR: f32 = 106.0;

/// Upper bound on the UI camera field of view.
pub const MAX_UI_FOV_DEGREES: f32 = 60.0;

/// Authored X scale of the helmet overlay model.
pub const DEFAULT_HELMET_WIDTH: f32 = 0.3628;

/// Widest aspect the helmet model covers at its authored width.
pub const HELMET_REFERENCE_ASPECT: f32 = 2.3;

/// Sizing rule for render surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSizing {
    /// Fixed width, if configured.
    pub width_override: Option<u32>,
    /// Fixed height, if configured.
    pub height_override: Option<u32>,
}

impl SurfaceSizing {
    /// Size a surface currently `current_height` pixels tall should take.
    ///
    /// Without overrides the height is kept and the width follows the aspect,
    /// rounded half to even.
    #[must_use]
    pub fn size_for(&self, current_height: u32, aspect: AspectRatio) -> UVec2 {
        let height = self.height_override.unwrap_or(current_height);
        let width = self
            .width_override
            .unwrap_or_else(|| (height as f32 * aspect.get()).round_ties_even() as u32);
        UVec2::new(width, height)
    }
}

/// Full parameter set for one aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedLayout {
    /// Aspect this layout was derived for.
    pub target_aspect: AspectRatio,
    /// Sizing rule, kept so secondary surfaces can be sized from their own height.
    pub sizing: SurfaceSizing,
    /// Player view render width.
    pub render_width: u32,
    /// Player view render height.
    pub render_height: u32,
    /// Aspect the HUD container is framed at.
    pub hud_aspect: AspectRatio,
    /// Canvas scaler reference resolution.
    pub reference_resolution: Vec2,
    /// UI camera field of view, capped.
    pub field_of_view_degrees: f32,
    /// Helmet overlay X scale.
    pub helmet_scale_x: f32,
}

impl DerivedLayout {
    /// Player view render size.
    #[must_use]
    pub fn render_size(&self) -> UVec2 {
        UVec2::new(self.render_width, self.render_height)
    }

    /// Size for another surface, using that surface's own current height.
    #[must_use]
    pub fn surface_size_for(&self, current_height: u32) -> UVec2 {
        self.sizing.size_for(current_height, self.target_aspect)
    }
}

/// Derives the layout for `target`.
///
/// `current_surface_height` is the player surface's height before the
/// change; it is only used when no height override is set.
///
/// The reference resolution follows the raw `target` aspect, not the HUD
/// aspect: the override only changes how wide the HUD frame is, not how
/// large UI elements are.
#[must_use]
pub fn compute_layout(
    target: AspectRatio,
    settings: &AdaptationSettings,
    current_surface_height: u32,
) -> DerivedLayout {
    let sizing = SurfaceSizing {
        width_override: settings.width_override(),
        height_override: settings.height_override(),
    };
    let render = sizing.size_for(current_surface_height, target);

    let hud_aspect = settings.ui_aspect_override().unwrap_or(target);

    let reference_height = REFERENCE_UI_HEIGHT / settings.ui.scale;
    let reference_resolution = Vec2::new(reference_height * target.get(), reference_height);

    DerivedLayout {
        target_aspect: target,
        sizing,
        render_width: render.x,
        render_height: render.y,
        hud_aspect,
        reference_resolution,
        field_of_view_degrees: ui_field_of_view(hud_aspect),
        helmet_scale_x: helmet_scale_x(target),
    }
}

/// UI camera FOV for a HUD aspect, never wider than [`MAX_UI_FOV_DEGREES`].
#[must_use]
pub fn ui_field_of_view(hud_aspect: AspectRatio) -> f32 {
    (UI_FOV_NUMERATOR / hud_aspect.get()).min(MAX_UI_FOV_DEGREES)
}

/// Helmet X scale: widened past the reference aspect, never narrowed.
#[must_use]
pub fn helmet_scale_x(target: AspectRatio) -> f32 {
    DEFAULT_HELMET_WIDTH * (target.get() / HELMET_REFERENCE_ASPECT).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ResolutionOverride, UiSettings};
    use proptest::prelude::*;

    fn aspect(value: f32) -> AspectRatio {
        AspectRatio::new(value).expect("valid aspect")
    }

    #[test]
    fn test_ultrawide_default_settings() {
        let layout = compute_layout(aspect(2.33), &AdaptationSettings::default(), 520);

        assert_eq!(layout.hud_aspect.get(), 2.33);
        assert!((layout.field_of_view_degrees - 45.49).abs() < 0.01);
        assert!((layout.helmet_scale_x - 0.3675).abs() < 1e-3);
        assert!(layout.helmet_scale_x > DEFAULT_HELMET_WIDTH);
    }

    #[test]
    fn test_ui_aspect_override_keeps_raw_reference_width() {
        let settings = AdaptationSettings {
            ui: UiSettings {
                aspect_ratio: 1.77,
                ..UiSettings::default()
            },
            ..AdaptationSettings::default()
        };
        let layout = compute_layout(aspect(3.55), &settings, 520);

        assert_eq!(layout.hud_aspect.get(), 1.77);
        assert_eq!(layout.reference_resolution.y, 500.0);
        assert!((layout.reference_resolution.x - 500.0 * 3.55).abs() < 1e-3);
        assert!((layout.field_of_view_degrees - 106.0 / 1.77).abs() < 1e-4);
    }

    #[test]
    fn test_height_override_drives_width() {
        let settings = AdaptationSettings {
            resolution_override: ResolutionOverride {
                width: 0,
                height: 520,
            },
            ..AdaptationSettings::default()
        };
        let layout = compute_layout(aspect(2.33), &settings, 1080);

        assert_eq!(layout.render_height, 520);
        assert_eq!(layout.render_width, 1212);
    }

    #[test]
    fn test_auto_size_keeps_surface_height() {
        let layout = compute_layout(
            AspectRatio::WIDESCREEN_16_9,
            &AdaptationSettings::default(),
            520,
        );
        assert_eq!(layout.render_size(), UVec2::new(924, 520));
    }

    #[test]
    fn test_width_rounds_half_to_even() {
        // 3 * 1.5 = 4.5 -> 4, 5 * 1.5 = 7.5 -> 8
        let sizing = SurfaceSizing::default();
        assert_eq!(sizing.size_for(3, aspect(1.5)).x, 4);
        assert_eq!(sizing.size_for(5, aspect(1.5)).x, 8);
    }

    #[test]
    fn test_both_overrides_ignore_aspect() {
        let settings = AdaptationSettings {
            resolution_override: ResolutionOverride {
                width: 860,
                height: 520,
            },
            ..AdaptationSettings::default()
        };
        let layout = compute_layout(AspectRatio::SUPER_ULTRAWIDE_32_9, &settings, 1080);
        assert_eq!(layout.render_size(), UVec2::new(860, 520));
    }

    #[test]
    fn test_terminal_sized_from_own_height() {
        let layout = compute_layout(aspect(2.0), &AdaptationSettings::default(), 520);
        assert_eq!(layout.surface_size_for(400), UVec2::new(800, 400));
    }

    #[test]
    fn test_ui_scale_shrinks_reference() {
        let settings = AdaptationSettings {
            ui: UiSettings {
                scale: 2.0,
                ..UiSettings::default()
            },
            ..AdaptationSettings::default()
        };
        let layout = compute_layout(aspect(2.0), &settings, 520);
        assert_eq!(layout.reference_resolution, Vec2::new(500.0, 250.0));
    }

    #[test]
    fn test_narrow_aspect_fov_is_capped() {
        assert_eq!(ui_field_of_view(AspectRatio::CLASSIC_4_3), MAX_UI_FOV_DEGREES);
    }

    fn settings_strategy() -> impl Strategy<Value = AdaptationSettings> {
        (0u32..4000, 0u32..4000, 0.25f32..4.0, prop_oneof![Just(0.0f32), 0.5f32..5.0]).prop_map(
            |(width, height, scale, aspect_ratio)| AdaptationSettings {
                resolution_override: ResolutionOverride { width, height },
                ui: UiSettings {
                    scale,
                    aspect_ratio,
                },
            },
        )
    }

    proptest! {
        #[test]
        fn prop_layout_is_pure(
            target in 0.2f32..8.0,
            settings in settings_strategy(),
            height in 1u32..4000,
        ) {
            let a = compute_layout(aspect(target), &settings, height);
            let b = compute_layout(aspect(target), &settings, height);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.helmet_scale_x.to_bits(), b.helmet_scale_x.to_bits());
            prop_assert_eq!(a.field_of_view_degrees.to_bits(), b.field_of_view_degrees.to_bits());
        }

        #[test]
        fn prop_fov_never_exceeds_cap(hud in 0.01f32..50.0) {
            prop_assert!(ui_field_of_view(aspect(hud)) <= MAX_UI_FOV_DEGREES);
        }

        #[test]
        fn prop_helmet_never_narrower_than_default(target in 0.01f32..50.0) {
            let scale = helmet_scale_x(aspect(target));
            prop_assert!(scale >= DEFAULT_HELMET_WIDTH);
            if target <= HELMET_REFERENCE_ASPECT {
                prop_assert_eq!(scale, DEFAULT_HELMET_WIDTH);
            }
        }

        #[test]
        fn prop_width_override_wins(
            width in 1u32..8000,
            target in 0.2f32..8.0,
            height in 1u32..4000,
        ) {
            let settings = AdaptationSettings {
                resolution_override: ResolutionOverride { width, height: 0 },
                ..AdaptationSettings::default()
            };
            prop_assert_eq!(compute_layout(aspect(target), &settings, height).render_width, width);
        }

        #[test]
        fn prop_auto_width_follows_aspect(target in 0.2f32..8.0, height in 1u32..4000) {
            let layout = compute_layout(aspect(target), &AdaptationSettings::default(), height);
            prop_assert_eq!(layout.render_height, height);
            prop_assert_eq!(
                layout.render_width,
                (height as f32 * target).round_ties_even() as u32
            );
        }
    }
}
