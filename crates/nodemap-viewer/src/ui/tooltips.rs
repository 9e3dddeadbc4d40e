use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::map::MapState;

pub fn render_tooltip(
    ctx: &egui::Context,
    id: &str,
    pos: egui::Pos2,
    lines: impl IntoIterator<Item = String>,
) {
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Tooltip)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.group(|ui| {
                for line in lines {
                    ui.label(line);
                }
            });
        });
}

pub fn tooltip_lines(st: &MapState, idx: usize) -> Vec<String> {
    let Some(node) = st.model.node(idx) else {
        return Vec::new();
    };
    let mut lines = vec![node.address.clone()];
    if let Some(loc) = node.location.as_ref() {
        match loc.city() {
            Some(city) => lines.push(format!("{} - {}", loc.country, city)),
            None => lines.push(loc.country.clone()),
        }
    }
    let drawn = if st.ui.hovered == Some(idx) {
        st.hover_segments().len()
    } else {
        0
    };
    lines.push(format!("neighbors: {} ({} on map)", node.neighbors.len(), drawn));
    lines
}

pub fn hover_tooltip(mut contexts: EguiContexts, st: Res<MapState>) {
    let Some(idx) = st.ui.hovered else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let Some(pointer) = ctx.input(|i| i.pointer.hover_pos()) else {
        return;
    };
    render_tooltip(
        ctx,
        "tooltip_marker",
        pointer + egui::vec2(14.0, 14.0),
        tooltip_lines(&st, idx),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::model::fixtures::abc;
    use crate::source::Incoming;

    #[test]
    fn tooltip_counts_drawn_neighbor_lines() {
        let mut st = MapState::default();
        st.apply(Incoming::snapshot("t".to_string(), abc()));
        st.set_hovered(Some(0));

        let lines = tooltip_lines(&st, 0);
        assert_eq!(lines[0], "a");
        assert_eq!(lines[1], "Testland - Testville");
        assert_eq!(lines[2], "neighbors: 1 (1 on map)");
    }
}
