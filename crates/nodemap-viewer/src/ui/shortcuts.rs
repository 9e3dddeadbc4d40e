use bevy::prelude::{Query, Res, ResMut};
use bevy::window::{Window, WindowMode};
use bevy_egui::{egui, EguiContexts};

use crate::map::MapState;
use crate::source::ReaderHandle;

pub fn handle_shortcuts(
    mut contexts: EguiContexts,
    mut st: ResMut<MapState>,
    reader: Res<ReaderHandle>,
) {
    let ctx = contexts.ctx_mut();

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        st.ui.help_open = false;
        st.clear_interaction();
    }

    if ctx.wants_keyboard_input() {
        return;
    }

    if ctx.input(|i| i.key_pressed(egui::Key::Questionmark)) {
        st.ui.help_open = !st.ui.help_open;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::F)) {
        st.ui.fit_to_view = true;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::F11)) {
        st.request_fullscreen_toggle();
    }
    if ctx.input(|i| i.key_pressed(egui::Key::R)) {
        tracing::info!(path = %reader.path.display(), "snapshot reload requested");
        reader.request_reload();
    }
}

/// Windowed goes borderless fullscreen; every fullscreen flavour goes back
/// to windowed.
pub fn toggled_window_mode(mode: WindowMode) -> WindowMode {
    match mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen,
        _ => WindowMode::Windowed,
    }
}

pub fn apply_fullscreen(mut st: ResMut<MapState>, mut windows: Query<&mut Window>) {
    if !st.take_fullscreen_toggle() {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.mode = toggled_window_mode(window.mode);
    tracing::debug!(mode = ?window.mode, "window mode changed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_toggles_back_and_forth() {
        let full = toggled_window_mode(WindowMode::Windowed);
        assert_eq!(full, WindowMode::BorderlessFullscreen);
        assert_eq!(toggled_window_mode(full), WindowMode::Windowed);
        assert_eq!(toggled_window_mode(WindowMode::Fullscreen), WindowMode::Windowed);
    }
}
