//! Node mesh cache management

use std::collections::HashMap;

use shared::{NodeId, SceneGraph};

use super::{build_scene_meshes, Highlight, MeshStyle, NodeMesh};

/// Cached node meshes, rebuilt when the scene or the highlight changes
pub struct MeshCache {
    meshes: HashMap<NodeId, NodeMesh>,
    version: u64,
    rebuild_count: u64,
    highlight: Highlight,
    style: Option<MeshStyle>,
}

impl Default for MeshCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshCache {
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
            version: u64::MAX, // force first rebuild
            rebuild_count: 0,
            highlight: Highlight::default(),
            style: None,
        }
    }

    /// Check if cache is still valid
    pub fn is_valid(&self, scene_version: u64, style: &MeshStyle, highlight: &Highlight) -> bool {
        self.version == scene_version
            && self.highlight == *highlight
            && self.style.as_ref() == Some(style)
    }

    /// Rebuild if anything changed; returns `true` when a rebuild happened
    pub fn update(
        &mut self,
        graph: &SceneGraph,
        scene_version: u64,
        style: &MeshStyle,
        highlight: &Highlight,
    ) -> bool {
        if self.is_valid(scene_version, style, highlight) {
            return false;
        }
        self.meshes = build_scene_meshes(graph, style, highlight);
        self.version = scene_version;
        self.highlight = *highlight;
        self.style = Some(style.clone());
        self.rebuild_count += 1;
        true
    }

    /// Clone the cached mesh map (for passing into PaintCallback)
    pub fn meshes_clone(&self) -> HashMap<NodeId, NodeMesh> {
        self.meshes.clone()
    }

    pub fn meshes(&self) -> &HashMap<NodeId, NodeMesh> {
        &self.meshes
    }

    /// Rebuild counter, doubles as the GPU upload version
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Drop every cached mesh
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.version = u64::MAX;
        self.style = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{build_scene, DiagramConfig, FaceKey, SectorId};

    #[test]
    fn test_cache_forces_first_rebuild() {
        let cache = MeshCache::new();
        assert!(!cache.is_valid(0, &MeshStyle::default(), &Highlight::default()));
    }

    #[test]
    fn test_cache_rebuilds_only_on_change() {
        let graph = build_scene(&DiagramConfig::with_blocks(&["A", "B"]));
        let style = MeshStyle::default();
        let mut cache = MeshCache::new();
        let mut highlight = Highlight::default();

        assert!(cache.update(&graph, 1, &style, &highlight));
        assert!(!cache.update(&graph, 1, &style, &highlight));
        assert_eq!(cache.rebuild_count(), 1);

        highlight.hovered = Some(SectorId::new(1, FaceKey::Left, 0, 0));
        assert!(cache.update(&graph, 1, &style, &highlight));
        assert!(cache.update(&graph, 2, &style, &highlight));
        assert_eq!(cache.rebuild_count(), 3);
        assert!(!cache.meshes().is_empty());

        cache.clear();
        assert!(cache.meshes().is_empty());
        assert!(!cache.is_valid(2, &style, &highlight));
    }

    #[test]
    fn test_face_opacity_change_does_not_rebuild() {
        let graph = build_scene(&DiagramConfig::with_blocks(&["A"]));
        let mut settings = crate::state::ViewportSettings::default();
        let mut cache = MeshCache::new();
        let highlight = Highlight::default();

        assert!(cache.update(&graph, 1, &MeshStyle::from(&settings), &highlight));
        settings.face_opacity = 0.9;
        assert!(!cache.update(&graph, 1, &MeshStyle::from(&settings), &highlight));
        assert_eq!(cache.rebuild_count(), 1);

        settings.selection_color = [0, 0, 0];
        assert!(cache.update(&graph, 1, &MeshStyle::from(&settings), &highlight));
    }
}
