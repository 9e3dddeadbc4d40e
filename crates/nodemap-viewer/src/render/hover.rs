use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::app::events::Picked;
use crate::map::projection::LatLng;
use crate::map::{MapState, MarkerVariant};
use crate::render::markers::marker_position;
use crate::render::MapCamera;

/// Closest candidate whose hit radius contains `cursor`. At equal distance
/// the larger marker wins, then the later one, matching what is drawn on top,
/// so a stack of co-located markers always resolves to the same node.
pub fn nearest_marker<I>(cursor: Vec2, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, Vec2, f32)>,
{
    let mut best: Option<(f32, f32, usize)> = None;
    for (idx, screen, radius) in candidates {
        let d = screen.distance(cursor);
        if d > radius {
            continue;
        }
        let better = match best {
            None => true,
            Some((bd, br, _)) => d < bd || (d == bd && radius >= br),
        };
        if better {
            best = Some((d, radius, idx));
        }
    }
    best.map(|(_, _, idx)| idx)
}

fn marker_under_cursor(
    st: &MapState,
    camera: &Camera,
    cam_tf: &GlobalTransform,
    cursor: Vec2,
) -> Option<usize> {
    let candidates = st.model.placed().filter_map(|(idx, node, loc)| {
        let screen = camera.world_to_viewport(cam_tf, marker_position(LatLng::from(loc)))?;
        Some((idx, screen, MarkerVariant::for_node(node).hit_radius()))
    });
    nearest_marker(cursor, candidates)
}

pub fn hover_detection(
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut contexts: EguiContexts,
    mut st: ResMut<MapState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        st.set_hovered(None);
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };

    let ctx = contexts.ctx_mut();
    if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
        st.set_hovered(None);
        return;
    }

    let hit = marker_under_cursor(&st, camera, cam_tf, cursor);
    if st.set_hovered(hit) {
        tracing::trace!(hovered = ?hit, "hover changed");
    }
}

pub fn picking(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut contexts: EguiContexts,
    st: Res<MapState>,
    mut out: EventWriter<Picked>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let ctx = contexts.ctx_mut();
    if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };

    out.send(Picked(marker_under_cursor(&st, camera, cam_tf, cursor)));
}

pub fn apply_picked(mut st: ResMut<MapState>, mut ev: EventReader<Picked>) {
    for Picked(hit) in ev.read() {
        match hit {
            Some(idx) => st.open_popup(*idx),
            None => st.close_popup(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_marker_respects_radius() {
        let cands = [(0, Vec2::new(100.0, 100.0), 10.0), (1, Vec2::new(130.0, 100.0), 15.0)];
        assert_eq!(nearest_marker(Vec2::new(104.0, 100.0), cands), Some(0));
        assert_eq!(nearest_marker(Vec2::new(120.0, 100.0), cands), Some(1));
        assert_eq!(nearest_marker(Vec2::new(300.0, 300.0), cands), None);
    }

    #[test]
    fn colocated_markers_resolve_to_top_marker() {
        let p = Vec2::new(50.0, 50.0);
        let cands = [(3, p, 10.0), (7, p, 10.0)];
        assert_eq!(nearest_marker(p, cands), Some(7));
    }

    #[test]
    fn stacked_static_and_transmit_pick_same_node_everywhere() {
        let p = Vec2::new(200.0, 80.0);
        let small = MarkerVariant::Static.hit_radius();
        let large = MarkerVariant::Transmit.hit_radius();

        for cands in [[(0, p, small), (1, p, large)], [(1, p, large), (0, p, small)]] {
            let center = nearest_marker(p + Vec2::new(3.0, 0.0), cands);
            let rim = nearest_marker(p + Vec2::new(12.0, 0.0), cands);
            assert_eq!(center, Some(1));
            assert_eq!(center, rim);
        }
    }
}
