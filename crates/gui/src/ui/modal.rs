use eframe::egui;

use crate::presentation::{perform_action, ModalView};
use crate::state::ModalClick;

/// Show the sector dialog. Returns where the user clicked, if anywhere.
pub fn show(ctx: &egui::Context, view: &ModalView) -> Option<ModalClick> {
    let mut click = None;

    let modal = egui::Modal::new(egui::Id::new("sector_modal")).show(ctx, |ui| {
        ui.set_width(420.0);

        ui.horizontal(|ui| {
            ui.heading(&view.title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                if ui.button(view.close_label).clicked() {
                    click = Some(ModalClick::CloseButton);
                }
            });
        });
        ui.separator();

        ui.label(&view.description);
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            for (action, label) in &view.actions {
                if ui.button(*label).clicked() {
                    perform_action(*action, &view.sector);
                    click.get_or_insert(ModalClick::Content);
                }
            }
        });
    });

    if click.is_none() && modal.backdrop_response.clicked() {
        click = Some(ModalClick::Backdrop);
    }
    click
}
