//! Mesh building from the scene arena.
//!
//! Every drawable node becomes one world-space mesh. Faces go to the
//! translucent pass, buttons and the axis to the opaque pass; blocks and
//! labels have no geometry (labels are drawn as overlays).

mod cache;
mod mesh_extraction;

pub use cache::MeshCache;
pub use mesh_extraction::{extract_node_mesh, Highlight, MeshStyle};

use std::collections::HashMap;

use shared::{NodeId, SceneGraph};

use crate::viewport::mesh::MeshData;

/// Which render pass a mesh belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    Opaque,
    Translucent,
}

/// Mesh of one scene node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMesh {
    pub pass: RenderPass,
    pub mesh: MeshData,
}

/// Build meshes for every drawable node of the scene
pub fn build_scene_meshes(
    graph: &SceneGraph,
    style: &MeshStyle,
    highlight: &Highlight,
) -> HashMap<NodeId, NodeMesh> {
    let mut meshes = HashMap::new();
    for (id, node) in graph.iter() {
        if let Some(mesh) = extract_node_mesh(graph, id, &node.kind, style, highlight) {
            meshes.insert(id, mesh);
        }
    }
    tracing::debug!("built {} node meshes", meshes.len());
    meshes
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{build_scene, DiagramConfig, NodeKind};

    #[test]
    fn test_build_default_scene() {
        let graph = build_scene(&DiagramConfig::default());
        let meshes = build_scene_meshes(&graph, &MeshStyle::default(), &Highlight::default());

        let translucent = meshes
            .values()
            .filter(|m| m.pass == RenderPass::Translucent)
            .count();
        assert_eq!(translucent, 4 * 3);
        // buttons + axis
        assert_eq!(meshes.len() - translucent, 4 * 3 * 9 + 1);
    }

    #[test]
    fn test_labels_and_blocks_have_no_mesh() {
        let graph = build_scene(&DiagramConfig::with_blocks(&["A"]));
        let meshes = build_scene_meshes(&graph, &MeshStyle::default(), &Highlight::default());
        for (id, node) in graph.iter() {
            if matches!(node.kind, NodeKind::Label { .. } | NodeKind::Block { .. }) {
                assert!(!meshes.contains_key(&id));
            }
        }
    }
}
