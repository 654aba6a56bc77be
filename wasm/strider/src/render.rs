//! Gizmo rendering: the ground grid and the gait debug shapes.

use bevy::prelude::*;
use nalgebra::Point3;
use strider_gait::{DebugDraw, Marker, PhysicsBody};
use strider_physics::Terrain;

use crate::web_bevy::StriderState;

/// Debug sink that turns walker markers into gizmos.
pub struct GizmoDraw<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
}

impl<'a, 'w, 's> GizmoDraw<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>) -> Self {
        Self { gizmos }
    }
}

fn to_vec3(p: Point3<f32>) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

pub fn marker_color(marker: Marker) -> Color {
    match marker {
        Marker::Probe => Color::srgb(0.4, 0.6, 1.0),
        Marker::ProbeRay => Color::srgba(0.4, 0.6, 1.0, 0.35),
        Marker::Contact => Color::srgb(1.0, 1.0, 0.3),
        Marker::Target => Color::srgb(1.0, 0.35, 0.35),
        Marker::ActiveFoot => Color::srgb(0.3, 1.0, 0.45),
        Marker::PlantedFoot => Color::srgb(0.55, 0.55, 0.6),
        Marker::Reach => Color::srgb(0.85, 0.8, 0.7),
    }
}

impl DebugDraw for GizmoDraw<'_, '_, '_> {
    fn sphere(&mut self, center: Point3<f32>, radius: f32, marker: Marker) {
        self.gizmos.sphere(Isometry3d::from_translation(to_vec3(center)), radius, marker_color(marker));
    }

    fn line(&mut self, from: Point3<f32>, to: Point3<f32>, marker: Marker) {
        self.gizmos.line(to_vec3(from), to_vec3(to), marker_color(marker));
    }
}

/// Ground grid that follows the terrain surface. The terrain never changes
/// after setup, so the segments are sampled once.
pub fn draw_ground_grid(
    mut gizmos: Gizmos,
    state: Res<StriderState>,
    mut segments: Local<Vec<(Vec3, Vec3)>>,
) {
    if segments.is_empty() {
        *segments = grid_segments(&state.terrain, 1.0);
    }
    let grid_color = Color::srgb(0.15, 0.15, 0.18);
    for &(a, b) in segments.iter() {
        gizmos.line(a, b, grid_color);
    }
}

fn grid_segments(terrain: &Terrain, grid_step: f32) -> Vec<(Vec3, Vec3)> {
    // Each grid line is split so it bends with the ground.
    let per_cell = if terrain.is_flat() { 1 } else { 4 };
    let steps = (terrain.size * 0.5 / grid_step) as i32;
    let seg = grid_step / per_cell as f32;
    let ground = |x: f32, z: f32| Vec3::new(x, terrain.height_at(x, z) + 0.01, z);

    let mut segments = Vec::new();
    for i in -steps..=steps {
        let pos = i as f32 * grid_step;
        for j in -steps * per_cell..steps * per_cell {
            let a = j as f32 * seg;
            let b = a + seg;
            segments.push((ground(a, pos), ground(b, pos)));
            segments.push((ground(pos, a), ground(pos, b)));
        }
    }
    segments
}

/// Body heading plus, when enabled, every probe, target and foot.
pub fn draw_walker(mut gizmos: Gizmos, state: Res<StriderState>) {
    let pose = state.physics.pose();
    let center = to_vec3(Point3::from(pose.translation.vector));
    let forward = pose.rotation * -nalgebra::Vector3::z();
    gizmos.arrow(center, center + Vec3::new(forward.x, forward.y, forward.z) * 0.8, Color::WHITE);

    if state.show_debug {
        state.walker.draw_debug(&mut GizmoDraw::new(&mut gizmos));
        return;
    }
    for leg in state.walker.legs() {
        let marker = if leg.is_active() { Marker::ActiveFoot } else { Marker::PlantedFoot };
        gizmos.line(to_vec3(leg.anchor()), to_vec3(leg.foot()), marker_color(marker));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_grid_is_level() {
        let segments = grid_segments(&Terrain::flat(4.0), 1.0);
        // 5 lines each way, 4 cells per line.
        assert_eq!(segments.len(), 5 * 4 * 2);
        assert!(segments.iter().all(|(a, b)| (a.y - 0.01).abs() < 1e-6 && (b.y - 0.01).abs() < 1e-6));
    }

    #[test]
    fn test_rolling_grid_hugs_the_ground() {
        let terrain = Terrain::rolling(6.0, 0.3, 2);
        for (a, _) in grid_segments(&terrain, 1.0) {
            assert!((a.y - terrain.height_at(a.x, a.z) - 0.01).abs() < 1e-6);
        }
    }

    #[test]
    fn test_markers_have_distinct_colors() {
        let markers = [
            Marker::Probe,
            Marker::Contact,
            Marker::Target,
            Marker::ActiveFoot,
            Marker::PlantedFoot,
            Marker::Reach,
        ];
        for (i, a) in markers.iter().enumerate() {
            for b in &markers[i + 1..] {
                assert_ne!(marker_color(*a), marker_color(*b));
            }
        }
    }
}
