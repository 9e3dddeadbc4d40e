pub mod basemap;
pub mod camera;
pub mod hover;
pub mod markers;

pub use basemap::{draw_basemap, spawn_basemap};
pub use camera::{apply_fit_to_view, camera_controls, setup_scene, MapCamera};
pub use hover::{apply_picked, hover_detection, picking};
pub use markers::{draw_markers, draw_neighbor_lines, scale_markers};

use bevy::prelude::Projection;

/// Vertical field of view of a perspective camera, 45° otherwise.
pub fn fov_of(projection: &Projection) -> f32 {
    match projection {
        Projection::Perspective(p) => p.fov,
        _ => std::f32::consts::FRAC_PI_4,
    }
}
