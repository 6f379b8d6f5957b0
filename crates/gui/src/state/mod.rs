pub mod selection;
pub mod settings;

use shared::{DiagramConfig, SectorId};

pub use selection::{ModalClick, SelectedSector, SelectionState};
pub use settings::{AppSettings, CameraSettings, UiSettings, ViewportSettings};

/// Combined application state
pub struct AppState {
    pub config: DiagramConfig,
    pub selection: SelectionState,
    pub settings: AppSettings,
    /// Button under the pointer, if any
    pub hovered: Option<SectorId>,
    pub show_legend: bool,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            config: settings.diagram(),
            selection: SelectionState::default(),
            show_legend: settings.ui.show_legend,
            settings,
            hovered: None,
        }
    }

    /// Open the modal for a sector
    pub fn select_sector(&mut self, id: SectorId) {
        let sector = SelectedSector::resolve(&self.config, id);
        self.selection.select(sector);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}
