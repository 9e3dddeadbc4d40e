use bevy::prelude::{Res, Time};
use bevy_egui::{egui, EguiContexts};

use crate::map::marker::pulse_factor;
use crate::map::{MapState, MarkerVariant};
use crate::ui::{color32, HUD_EDGE_PADDING};

pub fn public_label(count: usize) -> String {
    format!("{count} public Stacks node (public ip address)")
}

pub fn reachable_label(count: usize) -> String {
    format!("{count} publicly reachable Stacks nodes (port open for inbound connections)")
}

fn marker_swatch(ui: &mut egui::Ui, variant: MarkerVariant, scale: f32) {
    let size = MarkerVariant::Transmit.icon_size();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    ui.painter().circle_filled(
        rect.center(),
        variant.hit_radius() * 0.6 * scale,
        color32(variant.color()),
    );
}

pub fn summary_overlay(mut contexts: EguiContexts, st: Res<MapState>, time: Res<Time>) {
    let ctx = contexts.ctx_mut();
    let area = ctx.available_rect();
    let summary = st.model.summary;
    let pulse = pulse_factor(time.elapsed_seconds());

    egui::Area::new(egui::Id::new("summary"))
        .order(egui::Order::Foreground)
        .fixed_pos(area.min + egui::vec2(HUD_EDGE_PADDING, HUD_EDGE_PADDING))
        .show(ctx, |ui| {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    marker_swatch(ui, MarkerVariant::Static, 1.0);
                    ui.label(public_label(summary.public_count));
                });
                ui.horizontal(|ui| {
                    marker_swatch(ui, MarkerVariant::Transmit, pulse);
                    ui.label(reachable_label(summary.reachable_count));
                });
            });
        });

    egui::Area::new(egui::Id::new("attribution"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-6.0, -4.0))
        .show(ctx, |ui| {
            ui.small(st.cfg.tile_source.attribution.as_str());
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_embed_counts() {
        assert_eq!(public_label(2), "2 public Stacks node (public ip address)");
        assert_eq!(
            reachable_label(1),
            "1 publicly reachable Stacks nodes (port open for inbound connections)"
        );
    }
}
