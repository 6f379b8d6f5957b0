//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    ctx.input(|i| {
        // Escape — close the sector modal
        if i.key_pressed(egui::Key::Escape) {
            state.selection.close();
        }
        // L — toggle legend
        if i.key_pressed(egui::Key::L) && !i.modifiers.command {
            state.show_legend = !state.show_legend;
        }
    });
}
