//! Layout application.
//!
//! Pushes a [`DerivedLayout`] into every bound subsystem. The host objects
//! are owned independently, so there is no commit across them: each step
//! resolves its own handle, and a missing handle skips only that step.
//! Every step is a plain assignment, so applying the same layout twice
//! leaves the same end state.

use glam::{UVec2, Vec2};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::bindings::{HudBindings, RenderSurfaceTarget};
use crate::layout::DerivedLayout;

/// Inventory panel anchor min after a layout change.
pub const INVENTORY_ANCHOR_MIN: Vec2 = Vec2::new(0.5, 0.5);

/// Inventory panel anchor max after a layout change.
pub const INVENTORY_ANCHOR_MAX: Vec2 = Vec2::new(0.5, 0.0);

/// Inventory panel pivot after a layout change.
pub const INVENTORY_PIVOT: Vec2 = Vec2::new(0.5, 0.0);

/// One dependent visual subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    /// Player view render surface.
    PlayerSurface,
    /// Terminal view render surface.
    TerminalSurface,
    /// Local player's gameplay camera.
    GameplayCamera,
    /// Fitter of the panel hosting the player view.
    ViewPanel,
    /// Fitter of the HUD container.
    HudContainer,
    /// Canvas scaler.
    CanvasScaler,
    /// HUD camera.
    UiCamera,
    /// Inventory panel.
    InventoryPanel,
    /// Helmet overlay model.
    HelmetModel,
}

impl Subsystem {
    /// All subsystems in application order.
    pub const ALL: [Self; 9] = [
        Self::PlayerSurface,
        Self::TerminalSurface,
        Self::GameplayCamera,
        Self::ViewPanel,
        Self::HudContainer,
        Self::CanvasScaler,
        Self::UiCamera,
        Self::InventoryPanel,
        Self::HelmetModel,
    ];

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PlayerSurface => "player render surface",
            Self::TerminalSurface => "terminal render surface",
            Self::GameplayCamera => "gameplay camera",
            Self::ViewPanel => "view panel fitter",
            Self::HudContainer => "HUD container fitter",
            Self::CanvasScaler => "canvas scaler",
            Self::UiCamera => "UI camera",
            Self::InventoryPanel => "inventory panel",
            Self::HelmetModel => "helmet model",
        }
    }

    /// Whether a missing handle is an error rather than an expected gap.
    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(self, Self::GameplayCamera)
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a step did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The host has no object for this subsystem right now.
    #[error("{0} is not bound")]
    Missing(Subsystem),

    /// The surface would end up with a zero dimension.
    #[error("{subsystem} would be resized to {width}x{height}")]
    DegenerateSurface {
        /// Which surface
        subsystem: Subsystem,
        /// Computed width
        width: u32,
        /// Computed height
        height: u32,
    },
}

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The subsystem was updated.
    Applied,
    /// The subsystem was left untouched.
    Skipped(BindingError),
}

/// Per-step record of one application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    steps: Vec<(Subsystem, StepOutcome)>,
}

impl ApplyReport {
    fn record(&mut self, subsystem: Subsystem, result: Result<(), BindingError>) {
        let outcome = match result {
            Ok(()) => {
                debug!("Applied layout to {subsystem}");
                StepOutcome::Applied
            },
            Err(e) if subsystem.is_required() => {
                error!("Layout step failed: {e}");
                StepOutcome::Skipped(e)
            },
            Err(e) => {
                warn!("Layout step skipped: {e}");
                StepOutcome::Skipped(e)
            },
        };
        self.steps.push((subsystem, outcome));
    }

    /// All steps in the order they ran.
    #[must_use]
    pub fn steps(&self) -> &[(Subsystem, StepOutcome)] {
        &self.steps
    }

    /// Outcome for one subsystem.
    #[must_use]
    pub fn outcome(&self, subsystem: Subsystem) -> Option<StepOutcome> {
        self.steps
            .iter()
            .find(|(s, _)| *s == subsystem)
            .map(|(_, outcome)| *outcome)
    }

    /// Whether `subsystem` was updated.
    #[must_use]
    pub fn applied(&self, subsystem: Subsystem) -> bool {
        self.outcome(subsystem) == Some(StepOutcome::Applied)
    }

    /// Skipped subsystems with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (Subsystem, BindingError)> + '_ {
        self.steps.iter().filter_map(|(s, outcome)| match outcome {
            StepOutcome::Skipped(e) => Some((*s, *e)),
            StepOutcome::Applied => None,
        })
    }

    /// Number of updated subsystems.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, outcome)| *outcome == StepOutcome::Applied)
            .count()
    }

    /// Whether every subsystem was updated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.applied_count() == self.steps.len()
    }
}

/// Applies `layout` to everything `bindings` currently exposes.
pub fn apply_layout<B>(layout: &DerivedLayout, bindings: &mut B) -> ApplyReport
where
    B: HudBindings + ?Sized,
{
    let mut report = ApplyReport::default();

    report.record(
        Subsystem::PlayerSurface,
        bindings
            .player_surface()
            .ok_or(BindingError::Missing(Subsystem::PlayerSurface))
            .and_then(|surface| {
                resize_surface(Subsystem::PlayerSurface, surface, layout.render_size())
            }),
    );

    report.record(
        Subsystem::TerminalSurface,
        bindings
            .terminal_surface()
            .ok_or(BindingError::Missing(Subsystem::TerminalSurface))
            .and_then(|surface| {
                let size = layout.surface_size_for(surface.size().y);
                resize_surface(Subsystem::TerminalSurface, surface, size)
            }),
    );

    report.record(
        Subsystem::GameplayCamera,
        bindings
            .gameplay_camera()
            .ok_or(BindingError::Missing(Subsystem::GameplayCamera))
            .map(|camera| camera.reset_aspect()),
    );

    report.record(
        Subsystem::ViewPanel,
        bindings
            .view_panel_fitter()
            .ok_or(BindingError::Missing(Subsystem::ViewPanel))
            .map(|fitter| fitter.set_aspect_ratio(layout.target_aspect.get())),
    );

    report.record(
        Subsystem::HudContainer,
        bindings
            .hud_fitter()
            .ok_or(BindingError::Missing(Subsystem::HudContainer))
            .map(|fitter| fitter.set_aspect_ratio(layout.hud_aspect.get())),
    );

    report.record(
        Subsystem::CanvasScaler,
        bindings
            .canvas_scaler()
            .ok_or(BindingError::Missing(Subsystem::CanvasScaler))
            .map(|scaler| scaler.set_reference_resolution(layout.reference_resolution)),
    );

    report.record(
        Subsystem::UiCamera,
        bindings
            .ui_camera()
            .ok_or(BindingError::Missing(Subsystem::UiCamera))
            .map(|camera| camera.set_field_of_view(layout.field_of_view_degrees)),
    );

    report.record(
        Subsystem::InventoryPanel,
        bindings
            .inventory_panel()
            .ok_or(BindingError::Missing(Subsystem::InventoryPanel))
            .map(|panel| {
                panel.set_anchored_position(Vec2::ZERO);
                panel.set_anchors(INVENTORY_ANCHOR_MIN, INVENTORY_ANCHOR_MAX);
                panel.set_pivot(INVENTORY_PIVOT);
            }),
    );

    report.record(
        Subsystem::HelmetModel,
        bindings
            .helmet_model()
            .ok_or(BindingError::Missing(Subsystem::HelmetModel))
            .map(|model| {
                let mut scale = model.local_scale();
                scale.x = layout.helmet_scale_x;
                model.set_local_scale(scale);
            }),
    );

    report
}

fn resize_surface(
    subsystem: Subsystem,
    surface: &mut dyn RenderSurfaceTarget,
    size: UVec2,
) -> Result<(), BindingError> {
    if size.x == 0 || size.y == 0 {
        return Err(BindingError::DegenerateSurface {
            subsystem,
            width: size.x,
            height: size.y,
        });
    }
    surface.release();
    surface.resize(size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_camera_is_required() {
        for subsystem in Subsystem::ALL {
            assert_eq!(
                subsystem.is_required(),
                subsystem == Subsystem::GameplayCamera
            );
        }
    }

    #[test]
    fn test_report_queries() {
        let mut report = ApplyReport::default();
        report.record(Subsystem::PlayerSurface, Ok(()));
        report.record(
            Subsystem::TerminalSurface,
            Err(BindingError::Missing(Subsystem::TerminalSurface)),
        );

        assert!(report.applied(Subsystem::PlayerSurface));
        assert!(!report.applied(Subsystem::TerminalSurface));
        assert_eq!(report.outcome(Subsystem::HelmetModel), None);
        assert_eq!(report.applied_count(), 1);
        assert!(!report.is_complete());
        assert_eq!(
            report.skipped().collect::<Vec<_>>(),
            vec![(
                Subsystem::TerminalSurface,
                BindingError::Missing(Subsystem::TerminalSurface)
            )]
        );
    }

    #[test]
    fn test_error_messages() {
        let e = BindingError::Missing(Subsystem::GameplayCamera);
        assert_eq!(e.to_string(), "gameplay camera is not bound");
    }
}
