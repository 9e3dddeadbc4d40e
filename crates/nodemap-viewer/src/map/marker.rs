use bevy::prelude::Color;
use nodemap_core::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerVariant {
    /// Node has at least one neighbor: larger, pulsing.
    Transmit,
    Static,
}

/// Screen offset of a marker popup relative to the marker center (px).
pub const POPUP_ANCHOR: (f32, f32) = (0.0, -20.0);

impl MarkerVariant {
    pub fn for_node(node: &Node) -> Self {
        if node.has_neighbors() {
            Self::Transmit
        } else {
            Self::Static
        }
    }

    /// Icon edge length in screen pixels.
    pub fn icon_size(self) -> f32 {
        match self {
            Self::Transmit => 30.0,
            Self::Static => 20.0,
        }
    }

    /// Icon anchor, measured from the icon's top-left corner.
    pub fn icon_anchor(self) -> (f32, f32) {
        let half = self.icon_size() * 0.5;
        (half, half)
    }

    pub fn hit_radius(self) -> f32 {
        self.icon_anchor().0
    }

    pub fn pulses(self) -> bool {
        matches!(self, Self::Transmit)
    }

    pub fn color(self) -> Color {
        match self {
            Self::Transmit => Color::srgb(0.33, 0.27, 1.0),
            Self::Static => Color::srgb(0.62, 0.6, 0.75),
        }
    }
}

/// Scale multiplier for the transmit pulse at `t` seconds.
pub fn pulse_factor(t: f32) -> f32 {
    1.0 + 0.2 * (t * std::f32::consts::TAU * 0.8).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::model::fixtures::node;

    #[test]
    fn neighbors_pick_transmit_variant() {
        assert_eq!(
            MarkerVariant::for_node(&node("a", &["b"], None)),
            MarkerVariant::Transmit
        );
        assert_eq!(
            MarkerVariant::for_node(&node("a", &[], None)),
            MarkerVariant::Static
        );
    }

    #[test]
    fn icon_geometry_matches_variant() {
        assert_eq!(MarkerVariant::Transmit.icon_anchor(), (15.0, 15.0));
        assert_eq!(MarkerVariant::Static.icon_anchor(), (10.0, 10.0));
        assert!(MarkerVariant::Transmit.pulses());
        assert!(!MarkerVariant::Static.pulses());
    }
}
