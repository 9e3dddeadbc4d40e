use bevy::prelude::Resource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::map::animation::{sanitize_speed, LineAnimator};
use crate::map::lines::{neighbor_segments, Segment};
use crate::map::model::MapModel;
use crate::map::projection::LatLng;
use crate::source::{Incoming, IncomingKind};
use crate::util::config::{TileSource, ViewerConfig};

pub struct UiState {
    pub hovered: Option<usize>,
    pub popup: Option<usize>,
    pub show_lines: bool,
    pub animate_lines: bool,
    pub help_open: bool,
    pub fit_to_view: bool,
    /// Set by the F11 key or the panel button; consumed by the window system.
    pub fullscreen_toggle: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            hovered: None,
            popup: None,
            show_lines: true,
            animate_lines: false,
            help_open: false,
            fit_to_view: false,
            fullscreen_toggle: false,
        }
    }
}

#[derive(Default)]
pub struct SourceState {
    pub name: String,
    pub last_error: Option<String>,
    pub snapshots: u64,
}

pub struct CfgState {
    pub center: LatLng,
    pub zoom: f32,
    pub tile_source: TileSource,
}

impl Default for CfgState {
    fn default() -> Self {
        let cfg = ViewerConfig::default();
        Self {
            center: LatLng::new(cfg.center_lat, cfg.center_lng),
            zoom: cfg.zoom,
            tile_source: cfg.tile_source,
        }
    }
}

#[derive(Resource)]
pub struct MapState {
    pub model: MapModel,
    pub ui: UiState,
    pub source: SourceState,
    pub cfg: CfgState,
    pub animator: LineAnimator,

    pub needs_redraw: AtomicBool,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            model: MapModel::default(),
            ui: UiState::default(),
            source: SourceState::default(),
            cfg: CfgState::default(),
            animator: LineAnimator::new(ViewerConfig::default().snake_speed),
            needs_redraw: AtomicBool::new(true),
        }
    }
}

impl MapState {
    pub fn apply_viewer_config(&mut self, cfg: &ViewerConfig) {
        self.ui.show_lines = cfg.show_neighbor_lines;
        self.ui.animate_lines = cfg.animate_lines;
        let fallback = ViewerConfig::default().snake_speed;
        self.animator.speed = sanitize_speed(cfg.snake_speed, fallback);
        if self.animator.speed != cfg.snake_speed {
            tracing::warn!(
                configured = cfg.snake_speed,
                used = self.animator.speed,
                "snake_speed out of range"
            );
        }
        self.cfg.center = LatLng::new(cfg.center_lat, cfg.center_lng);
        self.cfg.zoom = cfg.zoom;
        self.cfg.tile_source = cfg.tile_source.clone();
    }

    /// Current settings in config form, for saving.
    pub fn to_viewer_config(&self, base: &ViewerConfig) -> ViewerConfig {
        ViewerConfig {
            show_neighbor_lines: self.ui.show_lines,
            animate_lines: self.ui.animate_lines,
            snake_speed: self.animator.speed,
            ..base.clone()
        }
    }

    pub fn apply(&mut self, msg: Incoming) {
        self.source.name = msg.source;
        match msg.kind {
            IncomingKind::Snapshot(resp) => {
                let mut model = MapModel::from_response(resp);
                model.loaded_at = Some(Instant::now());
                self.model = model;
                self.source.last_error = None;
                self.source.snapshots += 1;

                // indices from the previous snapshot mean nothing now
                self.ui.hovered = None;
                self.ui.popup = None;
                self.animator.clear();
                self.needs_redraw.store(true, Ordering::Relaxed);
            }
            IncomingKind::Error(e) => {
                self.source.last_error = Some(e);
            }
        }
    }

    /// Returns `true` when the hovered node changed.
    pub fn set_hovered(&mut self, idx: Option<usize>) -> bool {
        let idx = idx.filter(|i| self.model.location(*i).is_some());
        if self.ui.hovered == idx {
            return false;
        }
        self.ui.hovered = idx;
        self.animator.clear();
        true
    }

    pub fn open_popup(&mut self, idx: usize) {
        if self.model.location(idx).is_some() {
            self.ui.popup = Some(idx);
        }
    }

    pub fn close_popup(&mut self) {
        self.ui.popup = None;
    }

    /// Lines for the hovered node; empty when nothing is hovered.
    pub fn hover_segments(&self) -> Vec<Segment> {
        match self.ui.hovered {
            Some(idx) => neighbor_segments(&self.model, idx),
            None => Vec::new(),
        }
    }

    /// Markers at the far end of the hovered node's lines.
    pub fn line_targets(&self) -> Vec<usize> {
        if !self.ui.show_lines {
            return Vec::new();
        }
        self.hover_segments().iter().map(|s| s.neighbor).collect()
    }

    /// Segments to draw this frame, honouring the line toggles.
    pub fn lines_to_draw(&mut self, dt: f64) -> Vec<Segment> {
        if !self.ui.show_lines {
            return Vec::new();
        }
        let Some(hovered) = self.ui.hovered else {
            return Vec::new();
        };
        if !self.ui.animate_lines {
            return self.hover_segments();
        }

        if !self.animator.tracks(hovered) {
            let segments = self.hover_segments();
            if let Err(e) = self.animator.start(hovered, segments) {
                tracing::error!(node = hovered, error = %e, "aborting animated neighbor lines");
            }
        }
        if self.animator.advance(dt) {
            tracing::debug!(node = hovered, "neighbor line animation finished");
        }
        self.animator.visible_segments()
    }

    pub fn request_fullscreen_toggle(&mut self) {
        self.ui.fullscreen_toggle = true;
    }

    /// Returns whether a toggle was pending, clearing it.
    pub fn take_fullscreen_toggle(&mut self) -> bool {
        std::mem::take(&mut self.ui.fullscreen_toggle)
    }

    pub fn clear_interaction(&mut self) {
        self.ui.hovered = None;
        self.ui.popup = None;
        self.animator.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::model::fixtures::*;

    fn loaded() -> MapState {
        let mut st = MapState::default();
        st.apply(Incoming::snapshot("test".to_string(), abc()));
        st
    }

    #[test]
    fn snapshot_replaces_model_and_clears_interaction() {
        let mut st = loaded();
        assert!(st.set_hovered(Some(0)));
        st.open_popup(1);

        st.apply(Incoming::snapshot("test".to_string(), abc()));
        assert_eq!(st.ui.hovered, None);
        assert_eq!(st.ui.popup, None);
        assert_eq!(st.source.snapshots, 2);
        assert_eq!(st.source.name, "test");
        assert!(st.needs_redraw.load(Ordering::Relaxed));
    }

    #[test]
    fn error_keeps_previous_snapshot() {
        let mut st = loaded();
        st.apply(Incoming::error("test".to_string(), "boom".to_string()));
        assert_eq!(st.model.nodes.len(), 3);
        assert_eq!(st.source.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn only_one_node_is_hovered_and_clearing_drops_lines() {
        let mut st = loaded();
        st.set_hovered(Some(0));
        assert_eq!(st.hover_segments().len(), 1);

        st.set_hovered(Some(1));
        assert_eq!(st.ui.hovered, Some(1));
        assert!(st.hover_segments().is_empty());

        st.set_hovered(None);
        assert!(st.lines_to_draw(0.016).is_empty());
    }

    #[test]
    fn unplaced_nodes_cannot_be_hovered_or_opened() {
        let mut st = loaded();
        assert!(!st.set_hovered(Some(2)));
        assert_eq!(st.ui.hovered, None);
        st.open_popup(2);
        assert_eq!(st.ui.popup, None);
    }

    #[test]
    fn animated_lines_grow_until_complete() {
        let mut st = loaded();
        st.ui.animate_lines = true;
        st.animator.speed = 10.0;
        st.set_hovered(Some(0));

        let first = st.lines_to_draw(0.1);
        assert_eq!(first.len(), 1);
        assert!(first[0].length() < 2.0);

        let done = st.lines_to_draw(10.0);
        assert_eq!(done[0].to, LatLng::new(20.0, 20.0));
    }

    #[test]
    fn out_of_range_snake_speed_is_clamped_on_load() {
        let mut st = MapState::default();
        st.apply_viewer_config(&ViewerConfig {
            snake_speed: 0.0,
            animate_lines: true,
            ..ViewerConfig::default()
        });
        assert_eq!(st.animator.speed, 10.0);

        st.apply(Incoming::snapshot("test".to_string(), abc()));
        st.set_hovered(Some(0));
        st.lines_to_draw(0.0);
        let grown = st.lines_to_draw(0.5);
        assert!(grown[0].length() > 0.0);
    }

    #[test]
    fn line_targets_follow_hover_and_toggle() {
        let mut st = loaded();
        assert!(st.line_targets().is_empty());
        st.set_hovered(Some(0));
        assert_eq!(st.line_targets(), vec![1]);
        st.ui.show_lines = false;
        assert!(st.line_targets().is_empty());
    }

    #[test]
    fn fullscreen_request_is_consumed_once() {
        let mut st = MapState::default();
        assert!(!st.take_fullscreen_toggle());
        st.request_fullscreen_toggle();
        assert!(st.take_fullscreen_toggle());
        assert!(!st.take_fullscreen_toggle());
    }

    #[test]
    fn line_toggle_hides_everything() {
        let mut st = loaded();
        st.set_hovered(Some(0));
        st.ui.show_lines = false;
        assert!(st.lines_to_draw(0.016).is_empty());
    }
}
