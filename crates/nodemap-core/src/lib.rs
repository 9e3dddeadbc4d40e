use serde::{Deserialize, Serialize};

/// Stacks node RPC port used by the popup info links.
pub const NODE_RPC_PORT: u16 = 20443;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: Option<String>,
}

impl Location {
    /// City name, treating an empty string as absent.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Exact coordinate equality, no tolerance.
    pub fn same_position(&self, other: &Location) -> bool {
        self.lat == other.lat && self.lng == other.lng
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub address: String,
    #[serde(default)]
    pub neighbors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Node {
    pub fn has_neighbors(&self) -> bool {
        !self.neighbors.is_empty()
    }

    pub fn is_placed(&self) -> bool {
        self.location.is_some()
    }

    /// `http://{address}:20443/v2/info`
    pub fn info_url(&self) -> String {
        info_url(&self.address)
    }
}

pub fn info_url(address: &str) -> String {
    format!("http://{address}:{NODE_RPC_PORT}/v2/info")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub network: String,
    pub nodes: Vec<Node>,
}

impl Default for ApiResponse {
    fn default() -> Self {
        Self {
            network: "unknown".to_string(),
            nodes: Vec::new(),
        }
    }
}

/// Accepted on-disk snapshot shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SnapshotFile {
    Response(ApiResponse),
    Nodes(Vec<Node>),
}

impl SnapshotFile {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn into_response(self) -> ApiResponse {
        match self {
            Self::Response(r) => r,
            Self::Nodes(nodes) => ApiResponse {
                nodes,
                ..ApiResponse::default()
            },
        }
    }
}
