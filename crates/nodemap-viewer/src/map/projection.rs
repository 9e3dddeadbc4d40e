use bevy::prelude::{Vec2, Vec3};
use nodemap_core::Location;

/// World units per degree on the equirectangular map plane.
pub const WORLD_SCALE: f32 = 0.1;
/// Camera height at zoom level 2 (whole world in view).
pub const BASE_HEIGHT: f32 = 24.0;
pub const MIN_HEIGHT: f32 = 0.4;
pub const MAX_HEIGHT: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    pub fn distance(&self, other: &LatLng) -> f64 {
        (self.lat - other.lat).hypot(self.lng - other.lng)
    }

    pub fn lerp(&self, other: &LatLng, t: f64) -> LatLng {
        LatLng {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}

impl From<&Location> for LatLng {
    fn from(loc: &Location) -> Self {
        Self {
            lat: loc.lat,
            lng: loc.lng,
        }
    }
}

// north is -Z so a camera with up = -Z reads like a normal map
pub fn to_world(p: LatLng) -> Vec3 {
    Vec3::new(
        p.lng as f32 * WORLD_SCALE,
        0.0,
        -(p.lat as f32) * WORLD_SCALE,
    )
}

pub fn height_for_zoom(zoom: f32) -> f32 {
    (BASE_HEIGHT * 2f32.powf(2.0 - zoom)).clamp(MIN_HEIGHT, MAX_HEIGHT)
}

/// World units covered by one screen pixel at `height` for a camera with
/// vertical field of view `fov` looking straight down.
pub fn world_per_pixel(height: f32, fov: f32, viewport_height: f32) -> f32 {
    if viewport_height <= 0.0 {
        return 0.0;
    }
    2.0 * height * (fov * 0.5).tan() / viewport_height
}

/// Camera target and height that frame every point, or `None` for no points.
pub fn fit_view<I>(points: I, aspect: f32, fov: f32) -> Option<(Vec3, f32)>
where
    I: IntoIterator<Item = LatLng>,
{
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for p in points {
        let w = to_world(p);
        min = min.min(Vec2::new(w.x, w.z));
        max = max.max(Vec2::new(w.x, w.z));
    }
    if !min.x.is_finite() {
        return None;
    }

    let center = (min + max) * 0.5;
    let extent = max - min;
    let aspect = aspect.max(0.1);
    let needed = extent.y.max(extent.x / aspect) * 1.25;
    let height = (needed / (2.0 * (fov * 0.5).tan())).clamp(2.0, MAX_HEIGHT);
    Some((Vec3::new(center.x, 0.0, center.y), height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn world_mapping_puts_north_up() {
        let berlin = to_world(LatLng::new(52.5, 13.4));
        let sydney = to_world(LatLng::new(-33.9, 151.2));
        assert!(berlin.z < sydney.z);
        assert!(berlin.x < sydney.x);
        assert_eq!(berlin.y, 0.0);
    }

    #[test]
    fn zoom_in_lowers_camera() {
        assert_eq!(height_for_zoom(2.0), BASE_HEIGHT);
        assert!(height_for_zoom(4.0) < height_for_zoom(2.0));
        assert_eq!(height_for_zoom(40.0), MIN_HEIGHT);
    }

    #[test]
    fn fit_view_centers_on_bounds() {
        let pts = [LatLng::new(10.0, 10.0), LatLng::new(20.0, 20.0)];
        let (center, height) = fit_view(pts, 1.5, FRAC_PI_4).unwrap();
        let mid = to_world(LatLng::new(15.0, 15.0));
        assert!((center - mid).length() < 1e-4);
        assert!(height >= 2.0);

        assert!(fit_view(std::iter::empty(), 1.5, FRAC_PI_4).is_none());
    }
}
