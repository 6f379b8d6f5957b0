use eframe::egui;

use crate::app::styles::ACCENT;
use crate::i18n::{self, Lang};
use crate::presentation::ShellView;

/// Title, subtitle, usage hints and the language switch
pub fn show(ui: &mut egui::Ui, view: &ShellView, show_legend: &mut bool) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(view.header).heading().strong().color(ACCENT));
            ui.label(egui::RichText::new(view.subtitle).italics());
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            language_switch(ui);
            ui.toggle_value(show_legend, i18n::t("legend.show"));
        });
    });

    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        for line in view.instructions {
            ui.label(egui::RichText::new(line).small());
            ui.add_space(12.0);
        }
    });
}

fn language_switch(ui: &mut egui::Ui) {
    let current = i18n::lang();
    egui::ComboBox::from_id_salt("language")
        .selected_text(i18n::t(&format!("lang.{}", current.code())))
        .show_ui(ui, |ui| {
            for lang in [Lang::Ru, Lang::En] {
                let label = i18n::tr(lang, &format!("lang.{}", lang.code()));
                if ui.selectable_label(current == lang, label).clicked() && current != lang {
                    i18n::set_lang(lang);
                    tracing::info!("Language switched to {}", lang.code());
                }
            }
        });
    ui.label(i18n::t("menu.language"));
}
