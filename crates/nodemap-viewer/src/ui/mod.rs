pub mod help;
pub mod navbar;
pub mod panel;
pub mod popup;
pub mod shortcuts;
pub mod summary;
pub mod tooltips;

pub use help::help_overlay;
pub use navbar::navbar;
pub use panel::ui_panel;
pub use popup::popup_overlay;
pub use shortcuts::{apply_fullscreen, handle_shortcuts};
pub use summary::summary_overlay;
pub use tooltips::hover_tooltip;

use bevy::prelude::Color;
use bevy_egui::egui;

pub const PANEL_W: f32 = 260.0;
pub const HUD_EDGE_PADDING: f32 = 10.0;

pub fn color32(c: Color) -> egui::Color32 {
    let s = c.to_srgba();
    egui::Color32::from_rgb(
        (s.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (s.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (s.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}
