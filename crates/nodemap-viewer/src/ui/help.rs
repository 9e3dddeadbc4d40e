use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::map::MapState;

pub fn help_overlay(mut contexts: EguiContexts, st: Res<MapState>) {
    if !st.ui.help_open {
        return;
    }

    egui::Window::new("Help / Shortcuts")
        .collapsible(false)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label("Hover a marker: neighbor lines");
            ui.label("Click a marker: nodes at that spot");
            ui.label("Wheel: zoom, right/middle drag: pan");
            ui.label("F: fit view to nodes");
            ui.label("R: reload snapshot");
            ui.label("F11: toggle fullscreen");
            ui.label("Esc: close popup, clear hover");
            ui.label("?: toggle help");
        });
}
