//! Mesh extraction and coloring utilities

use shared::{NodeId, NodeKind, SceneGraph, SectorId};

use super::{NodeMesh, RenderPass};
use crate::state::ViewportSettings;
use crate::viewport::mesh::{self, lighten, rgb};

/// Face planes sit slightly behind the buttons
const FACE_PLANE_OFFSET: f32 = -0.02;
const AXIS_SEGMENTS: u32 = 24;
/// Buttons are drawn a little lighter than their face
const BUTTON_TINT: f32 = 0.1;

/// Colours used when building meshes
#[derive(Debug, Clone, PartialEq)]
pub struct MeshStyle {
    pub axis_color: [u8; 3],
    pub hover_tint: f32,
    pub selection_color: [u8; 3],
}

impl Default for MeshStyle {
    fn default() -> Self {
        Self::from(&ViewportSettings::default())
    }
}

impl From<&ViewportSettings> for MeshStyle {
    fn from(settings: &ViewportSettings) -> Self {
        Self {
            axis_color: settings.axis_color,
            hover_tint: settings.hover_tint,
            selection_color: settings.selection_color,
        }
    }
}

/// Buttons drawn with highlight colours
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub hovered: Option<SectorId>,
    pub selected: Option<SectorId>,
}

/// World-space mesh of one node, or `None` for nodes without geometry
pub fn extract_node_mesh(
    graph: &SceneGraph,
    id: NodeId,
    kind: &NodeKind,
    style: &MeshStyle,
    highlight: &Highlight,
) -> Option<NodeMesh> {
    let (pass, local) = match kind {
        NodeKind::Face {
            width,
            height,
            color,
            ..
        } => (
            RenderPass::Translucent,
            mesh::quad(*width, *height, FACE_PLANE_OFFSET, rgb(*color)),
        ),
        NodeKind::Button {
            sector,
            size,
            depth,
            color,
        } => (
            RenderPass::Opaque,
            mesh::cube(*size, *size, *depth, button_color(sector, *color, style, highlight)),
        ),
        NodeKind::Axis { radius, height } => (
            RenderPass::Opaque,
            mesh::cylinder(*radius, *height, AXIS_SEGMENTS, rgb(style.axis_color)),
        ),
        NodeKind::Block { .. } | NodeKind::Label { .. } => return None,
    };

    let mesh = local.transformed(&graph.world_transform(id));
    Some(NodeMesh { pass, mesh })
}

/// Colour of a button given hover and selection state
pub fn button_color(
    sector: &SectorId,
    base: [u8; 3],
    style: &MeshStyle,
    highlight: &Highlight,
) -> [f32; 3] {
    if highlight.selected.as_ref() == Some(sector) {
        return rgb(style.selection_color);
    }
    let color = lighten(rgb(base), BUTTON_TINT);
    if highlight.hovered.as_ref() == Some(sector) {
        lighten(color, style.hover_tint)
    } else {
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FaceKey;

    #[test]
    fn test_button_color_priority() {
        let style = MeshStyle::default();
        let id = SectorId::new(0, FaceKey::Base, 1, 1);
        let plain = button_color(&id, [100, 100, 100], &style, &Highlight::default());

        let hovered = Highlight {
            hovered: Some(id),
            selected: None,
        };
        let hover = button_color(&id, [100, 100, 100], &style, &hovered);
        assert!(hover[0] > plain[0]);

        let both = Highlight {
            hovered: Some(id),
            selected: Some(id),
        };
        assert_eq!(
            button_color(&id, [100, 100, 100], &style, &both),
            rgb(style.selection_color)
        );
    }

    #[test]
    fn test_button_mesh_in_front_of_face() {
        let config = shared::DiagramConfig::with_blocks(&["A"]);
        let graph = shared::build_scene(&config);
        let style = MeshStyle::default();
        let (id, node) = graph
            .iter()
            .find(|(_, n)| matches!(n.kind, NodeKind::Button { .. }))
            .unwrap();
        let built = extract_node_mesh(&graph, id, &node.kind, &style, &Highlight::default()).unwrap();
        assert_eq!(built.pass, RenderPass::Opaque);
        assert_eq!(built.mesh.vertex_count(), 24);

        // every vertex lies within the button's pick box
        let clickable = graph
            .clickables()
            .into_iter()
            .find(|c| graph.find_button(&c.sector) == Some(id))
            .unwrap();
        let inverse = clickable.world.inverse();
        for p in built.mesh.positions() {
            let local = inverse.transform_point3(p);
            assert!(local.abs().cmple(clickable.half_extents + 1e-4).all());
        }
    }
}
