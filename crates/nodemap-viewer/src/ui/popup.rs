use bevy::prelude::{Camera, GlobalTransform, Query, ResMut, With};
use bevy_egui::{egui, EguiContexts};

use crate::map::marker::POPUP_ANCHOR;
use crate::map::popup::popup_entries;
use crate::map::projection::LatLng;
use crate::map::MapState;
use crate::render::markers::marker_position;
use crate::render::MapCamera;

pub fn popup_overlay(
    mut contexts: EguiContexts,
    mut st: ResMut<MapState>,
    cam_q: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
) {
    let Some(idx) = st.ui.popup else {
        return;
    };
    let Some(loc) = st.model.location(idx) else {
        st.close_popup();
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };
    // off screen: keep it open, just don't show it
    let Some(screen) = camera.world_to_viewport(cam_tf, marker_position(LatLng::from(loc))) else {
        return;
    };

    let entries = popup_entries(&st.model, idx);
    let anchor = egui::pos2(screen.x + POPUP_ANCHOR.0, screen.y + POPUP_ANCHOR.1);
    let mut close = false;

    egui::Area::new(egui::Id::new("marker_popup"))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor)
        .pivot(egui::Align2::CENTER_BOTTOM)
        .show(contexts.ctx_mut(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("{} node(s) here", entries.len()));
                    if ui.small_button("✖").clicked() {
                        close = true;
                    }
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .max_height(260.0)
                    .show(ui, |ui| {
                        for entry in &entries {
                            ui.label(egui::RichText::new(entry.heading()).strong());
                            ui.add(
                                egui::Hyperlink::from_label_and_url(
                                    entry.address.as_str(),
                                    &entry.href,
                                )
                                .open_in_new_tab(true),
                            );
                            ui.add_space(4.0);
                        }
                    });
            });
        });

    if close {
        st.close_popup();
    }
}
