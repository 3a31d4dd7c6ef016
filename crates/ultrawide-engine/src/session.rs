//! Headless HUD session.
//!
//! Drives the adaptation engine against a [`SimHost`] the way the game
//! drives it: HUD start once, then every frame the HUD update followed by
//! the scan node update.

use std::collections::HashMap;

use glam::{UVec2, Vec2, Vec3};
use tracing::{debug, info};
use ultrawide_common::{AspectRatio, MarkerId};
use ultrawide_kernel::{AdaptationSettings, ApplyReport, AspectAdaptationEngine};

use crate::sim::{SimHost, SimMarker};
use crate::timing::{FrameClock, DEFAULT_FRAME_RATE};

/// Window size change at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    /// Seconds since session start.
    pub at: f32,
    /// New window size.
    pub window: Vec2,
}

/// Scripted sequence of window changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionScript {
    /// Simulated frames per second.
    pub frame_rate: u32,
    /// Seconds to run.
    pub duration: f32,
    /// Window changes, sorted by time.
    pub resizes: Vec<ResizeEvent>,
}

impl SessionScript {
    /// 16:9, then a 21:9 and a 32:9 monitor, a window that jitters by a
    /// sub-pixel amount, and finally a 4:3 window.
    #[must_use]
    pub fn monitor_tour() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            duration: 12.0,
            resizes: vec![
                ResizeEvent {
                    at: 0.0,
                    window: Vec2::new(1920.0, 1080.0),
                },
                ResizeEvent {
                    at: 3.0,
                    window: Vec2::new(3440.0, 1440.0),
                },
                ResizeEvent {
                    at: 5.5,
                    window: Vec2::new(5120.0, 1440.0),
                },
                ResizeEvent {
                    at: 7.5,
                    window: Vec2::new(5120.0005, 1440.0),
                },
                ResizeEvent {
                    at: 9.5,
                    window: Vec2::new(1024.0, 768.0),
                },
            ],
        }
    }
}

/// One accepted aspect change.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedChange {
    /// Session time of the change.
    pub time: f32,
    /// Applied aspect.
    pub aspect: AspectRatio,
    /// Player surface size afterwards.
    pub render_size: Option<UVec2>,
    /// Per-subsystem outcome.
    pub report: ApplyReport,
}

/// Engine, host and scan markers for one HUD lifetime.
#[derive(Debug)]
pub struct Session {
    engine: AspectAdaptationEngine,
    host: SimHost,
    clock: FrameClock,
    markers: Vec<SimMarker>,
    points: HashMap<MarkerId, Vec3>,
    start_report: Option<ApplyReport>,
}

impl Session {
    /// Starts a HUD on `host`.
    #[must_use]
    pub fn start(settings: AdaptationSettings, mut host: SimHost, frame_rate: u32) -> Self {
        let mut engine = AspectAdaptationEngine::new(settings);
        let start_report = engine.on_hud_start(&mut host);
        Self {
            engine,
            host,
            clock: FrameClock::new(frame_rate),
            markers: Vec::new(),
            points: HashMap::new(),
            start_report,
        }
    }

    /// Adds a scan marker tracking `world`.
    pub fn track_point(&mut self, world: Vec3) -> MarkerId {
        let marker = SimMarker::new();
        self.points.insert(marker.id, world);
        self.markers.push(marker);
        marker.id
    }

    /// Adds a marker widget with no point of interest.
    pub fn add_idle_marker(&mut self) -> MarkerId {
        let marker = SimMarker::new();
        self.markers.push(marker);
        marker.id
    }

    /// Runs one frame; returns the report if the layout changed this frame.
    pub fn step(&mut self) -> Option<ApplyReport> {
        let now = self.clock.tick();
        let report = self.engine.on_hud_update(now, &mut self.host);

        if let Some(camera) = self.host.gameplay_camera.as_ref() {
            let moved = self.engine.on_scan_nodes_updated(
                &self.host,
                camera,
                &mut self.markers,
                &self.points,
            );
            if moved > 0 {
                debug!("Repositioned {moved} scan markers");
            }
        }

        report
    }

    /// Plays `script`, returning every accepted change in order.
    pub fn run(&mut self, script: &SessionScript) -> Vec<AppliedChange> {
        let mut changes = Vec::new();
        let mut pending = script.resizes.iter().peekable();

        while self.clock.elapsed() < script.duration {
            while let Some(event) = pending.next_if(|e| e.at <= self.clock.elapsed()) {
                info!("Window resized to {}x{}", event.window.x, event.window.y);
                self.host.resize_window(event.window);
            }

            if let Some(report) = self.step() {
                if let Some(aspect) = self.engine.current_aspect() {
                    changes.push(AppliedChange {
                        time: self.clock.elapsed(),
                        aspect,
                        render_size: self.host.player_surface_size(),
                        report,
                    });
                }
            }
        }

        changes
    }

    /// Adaptation engine.
    #[must_use]
    pub fn engine(&self) -> &AspectAdaptationEngine {
        &self.engine
    }

    /// Simulated host.
    #[must_use]
    pub fn host(&self) -> &SimHost {
        &self.host
    }

    /// Mutable host, for swapping objects in and out mid-session.
    pub fn host_mut(&mut self) -> &mut SimHost {
        &mut self.host
    }

    /// Scan markers.
    #[must_use]
    pub fn markers(&self) -> &[SimMarker] {
        &self.markers
    }

    /// Marker by ID.
    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&SimMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Report from the HUD start hook.
    #[must_use]
    pub fn start_report(&self) -> Option<&ApplyReport> {
        self.start_report.as_ref()
    }

    /// Seconds since start.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }
}
