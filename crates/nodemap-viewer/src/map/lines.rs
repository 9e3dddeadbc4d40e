use crate::map::model::MapModel;
use crate::map::projection::LatLng;

/// Straight line between a hovered node and one of its placed neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: LatLng,
    pub to: LatLng,
    pub neighbor: usize,
}

impl Segment {
    pub fn length(&self) -> f64 {
        self.from.distance(&self.to)
    }

    /// Portion of the segment starting at `from`, `t` in 0..=1.
    pub fn partial(&self, t: f64) -> Segment {
        Segment {
            to: self.from.lerp(&self.to, t.clamp(0.0, 1.0)),
            ..*self
        }
    }
}

/// Segments from `hovered` to each neighbor that resolves to a node with a
/// location. Entries that do not resolve, or resolve to an unplaced node,
/// produce nothing.
pub fn neighbor_segments(model: &MapModel, hovered: usize) -> Vec<Segment> {
    let Some(node) = model.node(hovered) else {
        return Vec::new();
    };
    let Some(origin) = node.location.as_ref() else {
        return Vec::new();
    };
    let from = LatLng::from(origin);

    node.neighbors
        .iter()
        .filter_map(|addr| {
            let (idx, neighbor) = model.resolve(addr)?;
            let loc = neighbor.location.as_ref()?;
            Some(Segment {
                from,
                to: LatLng::from(loc),
                neighbor: idx,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::model::fixtures::*;
    use nodemap_core::ApiResponse;

    #[test]
    fn hovering_placed_node_draws_to_placed_neighbor() {
        let model = MapModel::from_response(abc());
        let segs = neighbor_segments(&model, 0);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].from, LatLng::new(10.0, 10.0));
        assert_eq!(segs[0].to, LatLng::new(20.0, 20.0));
        assert_eq!(segs[0].neighbor, 1);
    }

    #[test]
    fn hovering_unplaced_node_draws_nothing() {
        let model = MapModel::from_response(abc());
        assert!(neighbor_segments(&model, 2).is_empty());
        assert!(neighbor_segments(&model, 99).is_empty());
    }

    #[test]
    fn unresolved_and_unplaced_neighbors_are_skipped() {
        let model = MapModel::from_response(ApiResponse {
            network: "n".to_string(),
            nodes: vec![
                node("hub", &["ghost", "dark", "lit"], Some(loc(0.0, 0.0))),
                node("dark", &[], None),
                node("lit", &[], Some(loc(-5.0, 30.0))),
            ],
        });
        let targets: Vec<_> = neighbor_segments(&model, 0)
            .into_iter()
            .map(|s| s.neighbor)
            .collect();
        assert_eq!(targets, vec![2]);
    }

    #[test]
    fn partial_segment_shrinks_toward_origin() {
        let seg = Segment {
            from: LatLng::new(0.0, 0.0),
            to: LatLng::new(10.0, 0.0),
            neighbor: 0,
        };
        assert_eq!(seg.partial(0.5).to, LatLng::new(5.0, 0.0));
        assert_eq!(seg.partial(2.0).to, seg.to);
    }
}
