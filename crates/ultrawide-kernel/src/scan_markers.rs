//! Scan marker re-projection.
//!
//! The host places scan markers assuming a 16:9 player view. After the view
//! is resized the markers are re-projected every frame from their world
//! points into the current player screen rect.

use std::collections::HashMap;
use std::hash::BuildHasher;

use glam::Vec3;
use ultrawide_common::{MarkerId, ScreenRect};

use crate::bindings::{CameraTarget, ScanMarkerWidget};

/// Moves every marker with a known point of interest onto its projection.
///
/// Markers missing from `points` are left where they are. Returns the number
/// of markers moved.
pub fn reposition_scan_markers<W, S>(
    camera: &dyn CameraTarget,
    screen: ScreenRect,
    markers: &mut [W],
    points: &HashMap<MarkerId, Vec3, S>,
) -> usize
where
    W: ScanMarkerWidget,
    S: BuildHasher,
{
    let mut moved = 0;
    for marker in markers.iter_mut() {
        let Some(world) = points.get(&marker.marker_id()) else {
            continue;
        };
        let viewport = camera.world_to_viewport(*world);
        marker.set_anchored_position(screen.viewport_to_rect(viewport.truncate()));
        moved += 1;
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// Camera mapping world XY straight to viewport XY.
    struct FlatCamera;

    impl CameraTarget for FlatCamera {
        fn reset_aspect(&mut self) {}

        fn world_to_viewport(&self, world: Vec3) -> Vec3 {
            world
        }
    }

    struct Marker {
        id: MarkerId,
        position: Vec2,
    }

    impl ScanMarkerWidget for Marker {
        fn marker_id(&self) -> MarkerId {
            self.id
        }

        fn set_anchored_position(&mut self, position: Vec2) {
            self.position = position;
        }
    }

    #[test]
    fn test_markers_follow_points() {
        let screen = ScreenRect::centered(Vec2::new(1212.0, 520.0));
        let tracked = MarkerId::new();
        let idle = MarkerId::new();
        let mut markers = vec![
            Marker {
                id: tracked,
                position: Vec2::ZERO,
            },
            Marker {
                id: idle,
                position: Vec2::new(7.0, 7.0),
            },
        ];
        let points = HashMap::from([(tracked, Vec3::new(1.0, 0.5, 3.0))]);

        let moved = reposition_scan_markers(&FlatCamera, screen, &mut markers, &points);

        assert_eq!(moved, 1);
        assert_eq!(markers[0].position, Vec2::new(606.0, 0.0));
        assert_eq!(markers[1].position, Vec2::new(7.0, 7.0));
    }

    #[test]
    fn test_empty_markers() {
        let points: HashMap<MarkerId, Vec3> = HashMap::new();
        let mut markers: Vec<Marker> = Vec::new();
        let screen = ScreenRect::centered(Vec2::new(860.0, 520.0));
        assert_eq!(
            reposition_scan_markers(&FlatCamera, screen, &mut markers, &points),
            0
        );
    }
}
