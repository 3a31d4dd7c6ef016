//! Adaptation settings snapshot.
//!
//! Loaded once at startup and never mutated afterwards; changing a value
//! requires rebuilding the [`crate::AspectAdaptationEngine`].

use serde::{Deserialize, Serialize};
use tracing::warn;
use ultrawide_common::AspectRatio;

/// Default UI scale factor.
pub const DEFAULT_UI_SCALE: f32 = 1.0;

/// Render resolution override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionOverride {
    /// Horizontal render resolution (0 = fit the monitor's aspect ratio).
    ///
    /// Game default: 860.
    pub width: u32,
    /// Vertical render resolution (0 = keep the surface's original height).
    ///
    /// Game default: 520.
    pub height: u32,
}

/// HUD sizing settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Size multiplier for UI elements.
    pub scale: f32,
    /// HUD aspect ratio override (0 = auto, 1.33 = 4:3, 1.77 = 16:9,
    /// 2.33 = 21:9, 3.55 = 32:9). Higher values make the HUD wider.
    pub aspect_ratio: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            scale: DEFAULT_UI_SCALE,
            aspect_ratio: 0.0,
        }
    }
}

/// Immutable configuration snapshot consumed by the layout calculator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptationSettings {
    /// Render resolution override.
    pub resolution_override: ResolutionOverride,
    /// HUD sizing.
    pub ui: UiSettings,
}

impl AdaptationSettings {
    /// Whether the display aspect is sampled continuously.
    ///
    /// A fixed width override turns sampling off.
    #[must_use]
    pub fn auto_detect(&self) -> bool {
        self.resolution_override.width == 0
    }

    /// Width override, if set.
    #[must_use]
    pub fn width_override(&self) -> Option<u32> {
        (self.resolution_override.width > 0).then_some(self.resolution_override.width)
    }

    /// Height override, if set.
    #[must_use]
    pub fn height_override(&self) -> Option<u32> {
        (self.resolution_override.height > 0).then_some(self.resolution_override.height)
    }

    /// HUD aspect override, if set.
    #[must_use]
    pub fn ui_aspect_override(&self) -> Option<AspectRatio> {
        if self.ui.aspect_ratio > 0.0 {
            AspectRatio::new(self.ui.aspect_ratio).ok()
        } else {
            None
        }
    }

    /// Replaces values the layout math cannot use.
    ///
    /// Returns true when anything was changed.
    pub fn validate(&mut self) -> bool {
        let mut changed = false;

        if !(self.ui.scale.is_finite() && self.ui.scale > 0.0) {
            warn!(
                "Invalid UI scale {}, falling back to {DEFAULT_UI_SCALE}",
                self.ui.scale
            );
            self.ui.scale = DEFAULT_UI_SCALE;
            changed = true;
        }

        if !(self.ui.aspect_ratio.is_finite() && self.ui.aspect_ratio >= 0.0) {
            warn!(
                "Invalid UI aspect ratio {}, using auto",
                self.ui.aspect_ratio
            );
            self.ui.aspect_ratio = 0.0;
            changed = true;
        }

        changed
    }

    /// Returns a validated copy.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.validate();
        self
    }
}
