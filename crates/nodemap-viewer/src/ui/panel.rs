use bevy::prelude::{Res, ResMut};
use bevy_egui::{egui, EguiContexts};

use crate::app::resources::LoadedConfig;
use crate::map::animation::SPEED_RANGE;
use crate::map::MapState;
use crate::source::ReaderHandle;
use crate::ui::PANEL_W;
use crate::util::config;

pub fn ui_panel(
    mut contexts: EguiContexts,
    mut st: ResMut<MapState>,
    reader: Res<ReaderHandle>,
    loaded: Res<LoadedConfig>,
) {
    egui::SidePanel::left("left")
        .default_width(PANEL_W)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Node Map");
            ui.label(format!("network: {}", st.model.network));
            ui.label(format!("nodes: {}", st.model.nodes.len()));
            ui.label(format!("on map: {}", st.model.summary.public_count));
            if st.model.is_empty() {
                ui.label("waiting for a snapshot…");
            }
            ui.separator();

            ui.heading("Snapshot");
            if st.source.name.is_empty() {
                ui.label(format!("file: {}", reader.path.display()));
            } else {
                ui.label(format!("file: {}", st.source.name));
            }
            ui.label(format!("loaded: {}x", st.source.snapshots));
            if let Some(at) = st.model.loaded_at {
                ui.label(format!("age: {}s", at.elapsed().as_secs()));
            }
            if let Some(err) = st.source.last_error.as_deref() {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
            if ui.button("Reload (R)").clicked() {
                reader.request_reload();
            }

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Neighbor lines");
            ui.checkbox(&mut st.ui.show_lines, "Show on hover");
            let mut animate = st.ui.animate_lines;
            if ui.checkbox(&mut animate, "Animate").changed() {
                st.ui.animate_lines = animate;
                st.animator.clear();
            }
            ui.add_enabled(
                st.ui.animate_lines,
                egui::Slider::new(&mut st.animator.speed, SPEED_RANGE).text("deg/s"),
            );

            ui.add_space(8.0);
            ui.separator();
            ui.heading("View");
            if ui.button("Fit to nodes (F)").clicked() {
                st.ui.fit_to_view = true;
            }
            if ui.button("Fullscreen (F11)").clicked() {
                st.request_fullscreen_toggle();
            }
            ui.label("Wheel: zoom. Right drag: pan.");
            ui.horizontal(|ui| {
                ui.label("Basemap:");
                ui.add(
                    egui::Hyperlink::from_label_and_url(
                        st.cfg.tile_source.attribution.as_str(),
                        st.cfg.tile_source.url_for(0, 0, 0),
                    )
                    .open_in_new_tab(true),
                );
            });

            ui.add_space(10.0);
            ui.separator();
            if ui.button("Save settings").clicked() {
                match config::save(&st.to_viewer_config(&loaded.0)) {
                    Ok(()) => tracing::info!("viewer settings saved"),
                    Err(e) => tracing::warn!(error = %format!("{e:#}"), "saving viewer settings failed"),
                }
            }
            if ui.button("Help (?)").clicked() {
                st.ui.help_open = !st.ui.help_open;
            }
        });
}
