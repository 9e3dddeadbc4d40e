use bevy::prelude::*;
use std::sync::atomic::Ordering;

use crate::map::marker::pulse_factor;
use crate::map::projection::{to_world, world_per_pixel, LatLng};
use crate::map::{MapState, MarkerVariant};
use crate::render::{fov_of, MapCamera};

const MARKER_LIFT: f32 = 0.02;
const LINE_COLOR: Color = Color::srgb(0.5, 0.0, 0.5);

#[derive(Component)]
pub struct NodeMarker {
    pub index: usize,
    pub variant: MarkerVariant,
}

pub fn marker_position(p: LatLng) -> Vec3 {
    to_world(p) + Vec3::Y * MARKER_LIFT
}

pub fn draw_markers(
    mut commands: Commands,
    st: Res<MapState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    query: Query<Entity, With<NodeMarker>>,
) {
    if !st.needs_redraw.swap(false, Ordering::Relaxed) {
        return;
    }
    for e in query.iter() {
        commands.entity(e).despawn_recursive();
    }

    let sphere = meshes.add(Sphere::new(1.0));
    let mat_transmit = mats.add(StandardMaterial {
        base_color: MarkerVariant::Transmit.color(),
        emissive: MarkerVariant::Transmit.color().into(),
        ..default()
    });
    let mat_static = mats.add(StandardMaterial {
        base_color: MarkerVariant::Static.color(),
        ..default()
    });

    let mut placed = 0usize;
    for (index, node, loc) in st.model.placed() {
        let variant = MarkerVariant::for_node(node);
        commands.spawn((
            PbrBundle {
                mesh: sphere.clone(),
                material: match variant {
                    MarkerVariant::Transmit => mat_transmit.clone(),
                    MarkerVariant::Static => mat_static.clone(),
                },
                transform: Transform::from_translation(marker_position(LatLng::from(loc))),
                ..default()
            },
            NodeMarker { index, variant },
        ));
        placed += 1;
    }
    tracing::debug!(placed, total = st.model.nodes.len(), "markers rebuilt");
}

// keeps markers a constant size on screen; transmit markers pulse
pub fn scale_markers(
    time: Res<Time>,
    st: Res<MapState>,
    windows: Query<&Window>,
    cam_q: Query<(&Transform, &Projection), (With<MapCamera>, Without<NodeMarker>)>,
    mut markers: Query<(&mut Transform, &NodeMarker)>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((cam_tf, projection)) = cam_q.get_single() else {
        return;
    };
    let wpp = world_per_pixel(cam_tf.translation.y, fov_of(projection), window.height());
    let pulse = pulse_factor(time.elapsed_seconds());
    let targets = st.line_targets();

    for (mut tf, marker) in markers.iter_mut() {
        // sphere reads a bit larger than the flat icon
        let mut radius = marker.variant.hit_radius() * wpp * 0.6;
        if marker.variant.pulses() {
            radius *= pulse;
        }
        if st.ui.hovered == Some(marker.index) {
            radius *= 1.3;
        } else if targets.contains(&marker.index) {
            radius *= 1.15;
        }
        tf.scale = Vec3::splat(radius);
    }
}

pub fn draw_neighbor_lines(time: Res<Time>, mut st: ResMut<MapState>, mut gizmos: Gizmos) {
    for seg in st.lines_to_draw(time.delta_seconds_f64()) {
        gizmos.line(
            marker_position(seg.from),
            marker_position(seg.to),
            LINE_COLOR,
        );
    }
}
