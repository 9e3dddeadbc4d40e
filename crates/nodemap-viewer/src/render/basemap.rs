use bevy::prelude::*;

use crate::map::projection::{to_world, LatLng, WORLD_SCALE};

const CANVAS: Color = Color::srgb(0.16, 0.16, 0.17);
const GRID: Color = Color::srgb(0.26, 0.26, 0.28);
const EQUATOR: Color = Color::srgb(0.4, 0.4, 0.44);

#[derive(Component)]
pub struct Basemap;

pub fn spawn_basemap(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
) {
    let plane = meshes.add(
        Plane3d::default()
            .mesh()
            .size(360.0 * WORLD_SCALE, 180.0 * WORLD_SCALE),
    );
    let material = mats.add(StandardMaterial {
        base_color: CANVAS,
        unlit: true,
        ..default()
    });
    commands.spawn((
        PbrBundle {
            mesh: plane,
            material,
            transform: Transform::from_xyz(0.0, -0.01, 0.0),
            ..default()
        },
        Basemap,
    ));
}

/// Graticule lines every `step` degrees; the flag marks the equator.
pub fn graticule(step: f64) -> Vec<(LatLng, LatLng, bool)> {
    let step = step.max(1.0);
    let mut out = Vec::new();

    let mut lng = -180.0;
    while lng <= 180.0 {
        out.push((LatLng::new(-90.0, lng), LatLng::new(90.0, lng), false));
        lng += step;
    }
    let mut lat = -90.0;
    while lat <= 90.0 {
        out.push((LatLng::new(lat, -180.0), LatLng::new(lat, 180.0), lat == 0.0));
        lat += step;
    }
    out
}

pub fn draw_basemap(mut gizmos: Gizmos) {
    for (a, b, equator) in graticule(30.0) {
        gizmos.line(to_world(a), to_world(b), if equator { EQUATOR } else { GRID });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graticule_covers_world_frame() {
        let lines = graticule(30.0);
        // 13 meridians, 7 parallels
        assert_eq!(lines.len(), 20);
        assert_eq!(lines.iter().filter(|(_, _, eq)| *eq).count(), 1);
    }
}
