use eframe::egui;

use crate::i18n;
use crate::presentation::LegendEntry;

/// Block list; the block of the open sector is highlighted
pub fn show(ui: &mut egui::Ui, entries: &[LegendEntry]) {
    ui.heading(i18n::t("legend.title"));
    ui.separator();

    // top block first, the way the stack reads on screen
    for entry in entries.iter().rev() {
        let text = egui::RichText::new(format!("{}. {}", entry.index + 1, entry.name));
        let text = if entry.active { text.strong() } else { text };
        ui.add(egui::Label::new(text).selectable(false))
            .on_hover_text(&entry.name);
    }
}
