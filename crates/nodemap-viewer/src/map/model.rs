use nodemap_core::{ApiResponse, Location, Node};
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Nodes with a known location.
    pub public_count: usize,
    /// Nodes with at least one neighbor.
    pub reachable_count: usize,
}

pub fn summarize(nodes: &[Node]) -> Summary {
    Summary {
        public_count: nodes.iter().filter(|n| n.is_placed()).count(),
        reachable_count: nodes.iter().filter(|n| n.has_neighbors()).count(),
    }
}

/// One snapshot plus the lookups derived from it.
pub struct MapModel {
    pub network: String,
    pub nodes: Vec<Node>,
    pub summary: Summary,
    pub loaded_at: Option<Instant>,
    by_address: HashMap<String, usize>,
}

impl Default for MapModel {
    fn default() -> Self {
        Self::from_response(ApiResponse::default())
    }
}

impl MapModel {
    pub fn from_response(resp: ApiResponse) -> Self {
        let mut by_address = HashMap::with_capacity(resp.nodes.len());
        for (i, node) in resp.nodes.iter().enumerate() {
            // first occurrence wins
            by_address.entry(node.address.clone()).or_insert(i);
        }
        Self {
            summary: summarize(&resp.nodes),
            network: resp.network,
            nodes: resp.nodes,
            loaded_at: None,
            by_address,
        }
    }

    pub fn node(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    pub fn location(&self, idx: usize) -> Option<&Location> {
        self.node(idx).and_then(|n| n.location.as_ref())
    }

    pub fn resolve(&self, address: &str) -> Option<(usize, &Node)> {
        let idx = *self.by_address.get(address)?;
        Some((idx, &self.nodes[idx]))
    }

    /// Nodes that can be put on the map, in list order.
    pub fn placed(&self) -> impl Iterator<Item = (usize, &Node, &Location)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.location.as_ref().map(|loc| (i, n, loc)))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
