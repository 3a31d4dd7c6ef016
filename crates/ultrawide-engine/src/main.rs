//! # Ultrawide
//!
//! Headless driver for the HUD aspect adaptation engine.
//!
//! Loads the settings file (first argument, or the platform default path),
//! starts a HUD on a simulated host and plays a scripted monitor tour,
//! logging every layout the engine applies.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use glam::{Vec2, Vec3};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ultrawide_engine::{Session, SessionScript, SettingsStore, SimHost};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("ultrawide=info".parse()?))
        .init();

    info!("Ultrawide starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let store = match std::env::args_os().nth(1) {
        Some(path) => SettingsStore::open(path),
        None => SettingsStore::open(SettingsStore::default_settings_path()),
    };
    let settings = store.settings();
    info!("Settings: {}", store.path().display());
    info!(
        "  Resolution override: {}x{}",
        settings.resolution_override.width, settings.resolution_override.height
    );
    info!("  UI scale: {}", settings.ui.scale);
    info!("  UI aspect: {}", settings.ui.aspect_ratio);

    let script = SessionScript::monitor_tour();
    let mut session = Session::start(
        settings,
        SimHost::new(Vec2::new(1920.0, 1080.0)),
        script.frame_rate,
    );
    let beacon = session.track_point(Vec3::new(4.0, 1.5, -12.0));

    for change in session.run(&script) {
        let render = change
            .render_size
            .map_or_else(|| "unbound".to_string(), |s| format!("{}x{}", s.x, s.y));
        info!(
            "t={:.2}s aspect {} -> render {render}, {} subsystems updated",
            change.time,
            change.aspect,
            change.report.applied_count()
        );
        for (subsystem, reason) in change.report.skipped() {
            warn!("  {subsystem} skipped: {reason}");
        }
    }

    if let Some(marker) = session.marker(beacon) {
        info!(
            "Scan marker at ({:.1}, {:.1})",
            marker.position.x, marker.position.y
        );
    }

    info!("Ultrawide shutdown complete");
    Ok(())
}
