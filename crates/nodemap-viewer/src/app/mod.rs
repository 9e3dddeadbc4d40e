use bevy::prelude::*;
use std::time::Duration;

use crate::app::events::Picked;
use crate::app::resources::{LoadedConfig, SourceRx};
use crate::map::MapState;
use crate::source;
use crate::util::config;

pub mod events;
pub mod resources;

pub struct NodeMapViewerPlugin;

impl Plugin for NodeMapViewerPlugin {
    fn build(&self, app: &mut App) {
        let cfg = config::load_or_default();
        let mut st = MapState::default();
        st.apply_viewer_config(&cfg);

        let path = config::snapshot_path(&cfg);
        tracing::info!(path = %path.display(), "watching node snapshot");
        let (tx, rx) = crossbeam_channel::unbounded();
        let reader = source::spawn_reader(path, Duration::from_millis(cfg.poll_interval_ms), tx);

        app.add_event::<Picked>()
            .insert_resource(st)
            .insert_resource(SourceRx(rx))
            .insert_resource(reader)
            .insert_resource(LoadedConfig(cfg))
            .add_systems(
                Startup,
                (crate::render::setup_scene, crate::render::spawn_basemap),
            )
            .add_systems(
                Update,
                (
                    pump_source,
                    crate::ui::handle_shortcuts,
                    (
                        crate::ui::navbar,
                        crate::ui::ui_panel,
                        crate::ui::summary_overlay,
                        crate::ui::help_overlay,
                    )
                        .chain(),
                    crate::ui::apply_fullscreen,
                    crate::render::camera_controls,
                    crate::render::apply_fit_to_view,
                    crate::render::hover_detection,
                    crate::render::picking,
                    crate::render::apply_picked,
                    crate::render::draw_markers,
                    crate::render::scale_markers,
                    crate::render::draw_basemap,
                    crate::render::draw_neighbor_lines,
                    crate::ui::popup_overlay,
                    crate::ui::hover_tooltip,
                )
                    .chain(),
            );
    }
}

fn pump_source(mut st: ResMut<MapState>, rx: Res<SourceRx>) {
    for msg in rx.0.try_iter().take(64) {
        st.apply(msg);
    }
}
