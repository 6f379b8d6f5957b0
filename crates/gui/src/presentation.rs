//! View model of the application shell: header, instructions, legend and
//! the sector modal. Built from [`AppState`] every frame and rendered by the
//! binary's UI code, so everything shown on screen can be checked in tests.

use shared::SectorId;

use crate::i18n::{tr, Lang};
use crate::state::AppState;

/// One legend row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub index: usize,
    pub name: String,
    /// The open sector belongs to this block
    pub active: bool,
}

/// Buttons at the bottom of the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Details,
    Download,
}

impl ModalAction {
    pub const ALL: [ModalAction; 2] = [ModalAction::Details, ModalAction::Download];

    pub fn label(&self, lang: Lang) -> &'static str {
        match self {
            ModalAction::Details => tr(lang, "modal.details"),
            ModalAction::Download => tr(lang, "modal.download"),
        }
    }
}

/// Contents of the open modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub sector: SectorId,
    pub title: String,
    pub description: String,
    pub close_label: &'static str,
    pub actions: Vec<(ModalAction, &'static str)>,
}

/// Everything the shell renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub header: &'static str,
    pub subtitle: &'static str,
    pub instructions: [&'static str; 3],
    pub legend: Vec<LegendEntry>,
    /// Present iff a sector is selected
    pub modal: Option<ModalView>,
}

impl ShellView {
    pub fn build(state: &AppState, lang: Lang) -> Self {
        let selected_block = state.selection.selected_id().map(|id| id.block);

        let legend = (0..state.config.block_count())
            .map(|index| LegendEntry {
                index,
                name: state.config.block_name(index),
                active: selected_block == Some(index),
            })
            .collect();

        let modal = state.selection.current().map(|sector| ModalView {
            sector: sector.id,
            title: sector.title.clone(),
            description: sector.description.clone(),
            close_label: tr(lang, "modal.close"),
            actions: ModalAction::ALL
                .iter()
                .map(|action| (*action, action.label(lang)))
                .collect(),
        });

        Self {
            header: tr(lang, "header.title"),
            subtitle: tr(lang, "header.subtitle"),
            instructions: [
                tr(lang, "instructions.click"),
                tr(lang, "instructions.rotate"),
                tr(lang, "instructions.zoom"),
            ],
            legend,
            modal,
        }
    }
}

/// Modal action buttons have no effect beyond a log line
pub fn perform_action(action: ModalAction, sector: &SectorId) {
    tracing::info!("Modal action {action:?} for sector {}", sector.key());
}
