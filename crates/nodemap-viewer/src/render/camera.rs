use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::map::projection::{
    fit_view, height_for_zoom, to_world, world_per_pixel, LatLng, MAX_HEIGHT, MIN_HEIGHT,
};
use crate::map::MapState;
use crate::render::fov_of;

#[derive(Component)]
pub struct MapCamera;

/// Camera straight above `target`, north up.
pub fn top_down(target: Vec3, height: f32) -> Transform {
    Transform::from_translation(target + Vec3::Y * height).looking_at(target, Vec3::NEG_Z)
}

pub fn setup_scene(mut commands: Commands, st: Res<MapState>) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 600.0,
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5000.0,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_xyz(0.0, 20.0, 0.0),
        ..default()
    });

    let target = to_world(st.cfg.center);
    commands.spawn((
        Camera3dBundle {
            transform: top_down(target, height_for_zoom(st.cfg.zoom)),
            ..default()
        },
        MapCamera,
    ));
}

// wheel zooms, right/middle drag pans
pub fn camera_controls(
    mut wheel: EventReader<MouseWheel>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut cam_q: Query<(&mut Transform, &Projection), With<MapCamera>>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    let scroll: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        })
        .sum();

    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window.cursor_position();
    let prev = std::mem::replace(&mut *last_cursor, cursor);

    let ctx = contexts.ctx_mut();
    if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
        return;
    }
    let Ok((mut tf, projection)) = cam_q.get_single_mut() else {
        return;
    };

    if scroll != 0.0 {
        tf.translation.y = (tf.translation.y * 0.85f32.powf(scroll)).clamp(MIN_HEIGHT, MAX_HEIGHT);
    }

    let dragging = buttons.pressed(MouseButton::Right) || buttons.pressed(MouseButton::Middle);
    if let (true, Some(now), Some(prev)) = (dragging, cursor, prev) {
        let wpp = world_per_pixel(tf.translation.y, fov_of(projection), window.height());
        let delta = now - prev;
        tf.translation.x -= delta.x * wpp;
        tf.translation.z -= delta.y * wpp;
    }
}

pub fn apply_fit_to_view(
    mut st: ResMut<MapState>,
    windows: Query<&Window>,
    mut cam_q: Query<(&mut Transform, &Projection), With<MapCamera>>,
) {
    if !st.ui.fit_to_view {
        return;
    }
    st.ui.fit_to_view = false;

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((mut tf, projection)) = cam_q.get_single_mut() else {
        return;
    };

    let aspect = window.width() / window.height().max(1.0);
    let points = st.model.placed().map(|(_, _, loc)| LatLng::from(loc));
    match fit_view(points, aspect, fov_of(projection)) {
        Some((center, height)) => *tf = top_down(center, height),
        None => *tf = top_down(to_world(st.cfg.center), height_for_zoom(st.cfg.zoom)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_down_camera_looks_straight_down_with_north_up() {
        let tf = top_down(Vec3::new(1.0, 0.0, -2.0), 10.0);
        assert!((tf.translation - Vec3::new(1.0, 10.0, -2.0)).length() < 1e-5);
        assert!((*tf.forward() - Vec3::NEG_Y).length() < 1e-5);
        assert!((*tf.up() - Vec3::NEG_Z).length() < 1e-5);
    }
}
