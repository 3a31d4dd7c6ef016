//! # Ultrawide Kernel
//!
//! Aspect-ratio adaptation core for a fixed 16:9 HUD.
//!
//! This crate derives a consistent set of render and HUD parameters from a
//! target aspect ratio and pushes them into the host's visual subsystems:
//! - Settings snapshot (resolution override, UI scale, UI aspect override)
//! - Aspect sampling with a fixed polling interval
//! - Pure layout derivation (render size, reference resolution, FOV, helmet scale)
//! - Best-effort application across independently owned host objects
//! - Per-frame scan marker re-projection
//!
//! ## Host bindings
//!
//! The kernel never looks objects up by name. The host implements
//! [`HudBindings`], handing out one capability handle per subsystem. Any
//! handle may be absent; the matching step is skipped and reported.
//!
//! ## Frame order
//!
//! Within a frame the host calls [`AspectAdaptationEngine::on_hud_update`]
//! before [`AspectAdaptationEngine::on_scan_nodes_updated`], so markers are
//! always placed against the geometry applied that frame.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod adaptation;
pub mod applicator;
pub mod bindings;
pub mod layout;
pub mod sampler;
pub mod scan_markers;
pub mod settings;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::adaptation::*;
    pub use crate::applicator::*;
    pub use crate::bindings::*;
    pub use crate::layout::*;
    pub use crate::sampler::*;
    pub use crate::scan_markers::*;
    pub use crate::settings::*;
}

pub use prelude::*;
pub use ultrawide_common::{AspectError, AspectRatio, MarkerId, ScreenRect};
