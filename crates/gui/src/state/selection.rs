use shared::{DiagramConfig, SectorId};

/// Sector shown in the modal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedSector {
    pub id: SectorId,
    pub title: String,
    pub description: String,
}

impl SelectedSector {
    /// Resolve title and description through the content lookup
    pub fn resolve(config: &DiagramConfig, id: SectorId) -> Self {
        let content = shared::lookup(config, &id);
        Self {
            id,
            title: content.title,
            description: content.description,
        }
    }
}

/// Where a click inside the open modal landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalClick {
    /// The × button
    CloseButton,
    /// The dimmed area around the dialog
    Backdrop,
    /// Anywhere inside the dialog body, including the action buttons
    Content,
}

/// Sector selection: empty or exactly one sector.
#[derive(Default, Debug)]
pub struct SelectionState {
    selected: Option<SelectedSector>,
    /// Bumped on every change (for mesh cache invalidation)
    version: u64,
}

impl SelectionState {
    pub fn current(&self) -> Option<&SelectedSector> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<SectorId> {
        self.selected.as_ref().map(|s| s.id)
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_selected(&self, id: &SectorId) -> bool {
        self.selected.as_ref().is_some_and(|s| &s.id == id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Select a sector, replacing any previous one
    pub fn select(&mut self, sector: SelectedSector) {
        tracing::info!("Selected sector {}", sector.id.key());
        self.selected = Some(sector);
        self.version += 1;
    }

    /// Close the modal
    pub fn close(&mut self) {
        if self.selected.take().is_some() {
            self.version += 1;
        }
    }

    /// Apply a click inside the modal. Returns `true` if the selection changed.
    pub fn handle_modal_click(&mut self, click: ModalClick) -> bool {
        match click {
            ModalClick::CloseButton | ModalClick::Backdrop => {
                let had = self.has_selection();
                self.close();
                had
            }
            ModalClick::Content => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FaceKey;

    fn sector(block: usize) -> SelectedSector {
        SelectedSector::resolve(
            &DiagramConfig::default(),
            SectorId::new(block, FaceKey::Right, 0, 2),
        )
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut s = SelectionState::default();
        s.select(sector(0));
        s.select(sector(1));
        assert_eq!(s.selected_id().map(|id| id.block), Some(1));
        assert!(!s.is_selected(&SectorId::new(0, FaceKey::Right, 0, 2)));
    }

    #[test]
    fn test_close_button_and_backdrop_clear() {
        for click in [ModalClick::CloseButton, ModalClick::Backdrop] {
            let mut s = SelectionState::default();
            s.select(sector(2));
            assert!(s.handle_modal_click(click));
            assert!(!s.has_selection());
        }
    }

    #[test]
    fn test_content_click_keeps_selection() {
        let mut s = SelectionState::default();
        s.select(sector(3));
        let before = s.current().cloned();
        assert!(!s.handle_modal_click(ModalClick::Content));
        assert_eq!(s.current().cloned(), before);
    }

    #[test]
    fn test_version_tracks_changes() {
        let mut s = SelectionState::default();
        s.close();
        assert_eq!(s.version(), 0);
        s.select(sector(0));
        s.close();
        assert_eq!(s.version(), 2);
    }

    #[test]
    fn test_resolved_sector_has_content() {
        let selected = sector(1);
        assert!(selected.title.contains("Самореализация"));
        assert!(selected.title.contains("A3"));
        assert!(!selected.description.is_empty());
    }
}
