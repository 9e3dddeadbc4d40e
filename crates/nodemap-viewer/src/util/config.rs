use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_ENV: &str = "NODEMAP_SNAPSHOT";

/// Raster tile provider, kept as a Leaflet-style URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: "https://services.arcgisonline.com/ArcGIS/rest/services/Canvas/World_Dark_Gray_Base/MapServer/tile/{z}/{y}/{x}".to_string(),
            attribution: "© Esri".to_string(),
        }
    }
}

impl TileSource {
    pub fn url_for(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{s}", "a")
            .replace("{r}", "")
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub snapshot_path: String,
    pub poll_interval_ms: u64,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: f32,
    pub show_neighbor_lines: bool,
    pub animate_lines: bool,
    /// Degrees per second.
    pub snake_speed: f64,
    pub tile_source: TileSource,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "nodes.json".to_string(),
            poll_interval_ms: 2_000,
            center_lat: 20.0,
            center_lng: 12.0,
            zoom: 2.0,
            show_neighbor_lines: true,
            animate_lines: false,
            snake_speed: 90.0,
            tile_source: TileSource::default(),
        }
    }
}

/// Snapshot path, `NODEMAP_SNAPSHOT` taking precedence over the config.
pub fn snapshot_path(cfg: &ViewerConfig) -> PathBuf {
    std::env::var(SNAPSHOT_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.snapshot_path))
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "nodemap")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "invalid viewer config, using defaults");
        ViewerConfig::default()
    })
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}
