//! Граф сцены в виде арены узлов
//!
//! Узлы хранятся плоским списком и адресуются `NodeId`. Связи
//! родитель/потомки лежат в отдельных индексах, обход при освобождении
//! ресурсов идёт по индексу потомков.

use glam::{Affine3A, Quat, Vec2, Vec3};

use crate::geometry::{axis_height, block_offset, face_frames};
use crate::picking::Clickable;
use crate::{DiagramConfig, FaceKey, SectorId};

/// Зазор между гранью и задней стороной кнопки
const BUTTON_LIFT: f32 = 0.01;
/// Насколько подписи вынесены вперёд от плоскости грани
const LABEL_LIFT: f32 = 0.02;

/// Дескриптор узла арены
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Назначение подписи
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Row(usize),
    Column(usize),
    BlockName,
}

/// Вид узла с данными, относящимися только к нему
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Block {
        index: usize,
        name: String,
    },
    Face {
        block: usize,
        key: FaceKey,
        width: f32,
        height: f32,
        color: [u8; 3],
    },
    Button {
        sector: SectorId,
        size: f32,
        depth: f32,
        color: [u8; 3],
    },
    Label {
        text: String,
        role: LabelRole,
    },
    Axis {
        radius: f32,
        height: f32,
    },
}

/// Локальная трансформация узла относительно родителя
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl LocalTransform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.translation)
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub local: LocalTransform,
}

/// Арена узлов сцены
#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    parent: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.parent.push(parent);
        self.children.push(Vec::new());
        id
    }

    /// Добавить корневой узел
    pub fn add_root(&mut self, kind: NodeKind, local: LocalTransform) -> NodeId {
        let id = self.push(Node { kind, local }, None);
        self.roots.push(id);
        id
    }

    /// Добавить дочерний узел
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind, local: LocalTransform) -> NodeId {
        let id = self.push(Node { kind, local }, Some(parent));
        self.children[parent.index()].push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id.index()).copied().flatten()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id.index())
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Все узлы в порядке добавления
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Мировая трансформация: произведение локальных от корня к узлу
    pub fn world_transform(&self, id: NodeId) -> Affine3A {
        let mut transform = Affine3A::IDENTITY;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.node(node_id) else {
                break;
            };
            transform = node.local.to_affine() * transform;
            current = self.parent(node_id);
        }
        transform
    }

    /// Обратный обход (потомки раньше родителей) по индексу потомков
    pub fn teardown_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, bool)> =
            self.roots.iter().rev().map(|&id| (id, false)).collect();

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            for &child in self.children(id).iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    /// Кнопки секторов в мировых координатах; подписи и грани сюда не входят
    pub fn clickables(&self) -> Vec<Clickable> {
        self.iter()
            .filter_map(|(id, node)| match node.kind {
                NodeKind::Button {
                    sector,
                    size,
                    depth,
                    ..
                } => Some(Clickable {
                    sector,
                    world: self.world_transform(id),
                    half_extents: Vec3::new(size / 2.0, size / 2.0, depth / 2.0),
                }),
                _ => None,
            })
            .collect()
    }

    /// Подписи с мировыми позициями
    pub fn labels(&self) -> Vec<(NodeId, &str, LabelRole, Vec3)> {
        self.iter()
            .filter_map(|(id, node)| match &node.kind {
                NodeKind::Label { text, role } => Some((
                    id,
                    text.as_str(),
                    *role,
                    self.world_transform(id).translation.into(),
                )),
                _ => None,
            })
            .collect()
    }

    pub fn find_button(&self, sector: &SectorId) -> Option<NodeId> {
        self.iter().find_map(|(id, node)| match &node.kind {
            NodeKind::Button { sector: s, .. } if s == sector => Some(id),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.parent.clear();
        self.children.clear();
        self.roots.clear();
    }
}

/// Построить сцену: блоки, грани, кнопки, подписи и центральную ось
pub fn build_scene(config: &DiagramConfig) -> SceneGraph {
    let d = &config.dimensions;
    let layout = config.grid_layout();
    let frames = face_frames(config.shape, d.base_length);
    let count = config.block_count();
    let mut graph = SceneGraph::new();

    for index in 0..count {
        let name = config.block_name(index);
        let y = block_offset(index, count, d.block_height, d.block_spacing);
        let block = graph.add_root(
            NodeKind::Block {
                index,
                name: name.clone(),
            },
            LocalTransform::from_translation(Vec3::new(0.0, y, 0.0)),
        );

        // подпись блока висит перед первой гранью, над её сеткой
        if let Some(first) = frames.first() {
            let anchor = first.center + first.normal * (d.button_depth + 0.3)
                + Vec3::Y * (d.block_height / 2.0);
            graph.add_child(
                block,
                NodeKind::Label {
                    text: name.clone(),
                    role: LabelRole::BlockName,
                },
                LocalTransform::from_translation(anchor),
            );
        }

        for frame in &frames {
            let color = config.face_color(frame.key);
            let face = graph.add_child(
                block,
                NodeKind::Face {
                    block: index,
                    key: frame.key,
                    width: frame.width,
                    height: d.block_height,
                    color,
                },
                LocalTransform {
                    translation: frame.center,
                    rotation: frame.rotation,
                },
            );

            for row in 0..layout.rows {
                for col in 0..layout.cols {
                    let center = layout.button_center(row, col);
                    graph.add_child(
                        face,
                        NodeKind::Button {
                            sector: SectorId::new(index, frame.key, row, col),
                            size: layout.button_size,
                            depth: d.button_depth,
                            color,
                        },
                        LocalTransform::from_translation(lifted(center, d.button_depth / 2.0 + BUTTON_LIFT)),
                    );
                }
            }

            for row in 0..layout.rows {
                graph.add_child(
                    face,
                    NodeKind::Label {
                        text: config.row_label(row),
                        role: LabelRole::Row(row),
                    },
                    LocalTransform::from_translation(lifted(layout.row_label(row), LABEL_LIFT)),
                );
            }
            for col in 0..layout.cols {
                graph.add_child(
                    face,
                    NodeKind::Label {
                        text: config.column_label(col),
                        role: LabelRole::Column(col),
                    },
                    LocalTransform::from_translation(lifted(layout.column_label(col), LABEL_LIFT)),
                );
            }
        }
    }

    graph.add_root(
        NodeKind::Axis {
            radius: d.axis_radius,
            height: axis_height(count, d.block_height, d.block_spacing, d.axis_padding),
        },
        LocalTransform::default(),
    );

    tracing::debug!(
        blocks = count,
        nodes = graph.len(),
        "scene graph built"
    );
    graph
}

fn lifted(point: Vec2, z: f32) -> Vec3 {
    Vec3::new(point.x, point.y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrismShape;

    fn button_count(graph: &SceneGraph) -> usize {
        graph
            .iter()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Button { .. }))
            .count()
    }

    #[test]
    fn test_build_scene_node_counts() {
        let config = DiagramConfig::default();
        let graph = build_scene(&config);
        // на блок: 1 блок + 1 подпись + 3 грани * (1 грань + 9 кнопок + 6 подписей)
        assert_eq!(graph.len(), 4 * (2 + 3 * 16) + 1);
        assert_eq!(button_count(&graph), 4 * 3 * 9);
        assert_eq!(graph.roots().len(), 5);
    }

    #[test]
    fn test_clickables_cover_every_sector_once() {
        let config = DiagramConfig::default();
        let graph = build_scene(&config);
        let mut sectors: Vec<_> = graph.clickables().iter().map(|c| c.sector).collect();
        sectors.sort();
        let mut expected = config.sector_ids();
        expected.sort();
        assert_eq!(sectors, expected);
    }

    #[test]
    fn test_box_shape_has_four_faces() {
        let config = DiagramConfig {
            shape: PrismShape::Box,
            ..DiagramConfig::with_blocks(&["A", "B"])
        };
        let graph = build_scene(&config);
        assert_eq!(button_count(&graph), 2 * 4 * 9);
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(
            NodeKind::Axis {
                radius: 1.0,
                height: 1.0,
            },
            LocalTransform::from_translation(Vec3::new(0.0, 2.0, 0.0)),
        );
        let child = graph.add_child(
            root,
            NodeKind::Label {
                text: "x".into(),
                role: LabelRole::BlockName,
            },
            LocalTransform {
                translation: Vec3::new(1.0, 0.0, 0.0),
                rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            },
        );
        let leaf = graph.add_child(
            child,
            NodeKind::Label {
                text: "y".into(),
                role: LabelRole::BlockName,
            },
            LocalTransform::from_translation(Vec3::new(1.0, 0.0, 0.0)),
        );
        let p: Vec3 = graph.world_transform(leaf).translation.into();
        assert!((p - Vec3::new(1.0, 2.0, -1.0)).length() < 1e-5);
        assert_eq!(graph.parent(leaf), Some(child));
        assert_eq!(graph.children(root), &[child]);
    }

    #[test]
    fn test_teardown_order_children_first() {
        let graph = build_scene(&DiagramConfig::with_blocks(&["A"]));
        let order = graph.teardown_order();
        assert_eq!(order.len(), graph.len());
        let position = |id: NodeId| order.iter().position(|&x| x == id).unwrap();
        for (id, _) in graph.iter() {
            if let Some(parent) = graph.parent(id) {
                assert!(position(id) < position(parent));
            }
        }
    }

    #[test]
    fn test_buttons_sit_in_front_of_their_face() {
        let config = DiagramConfig::default();
        let graph = build_scene(&config);
        for (id, node) in graph.iter() {
            if let NodeKind::Button { depth, .. } = node.kind {
                let face = graph.parent(id).unwrap();
                let face_world = graph.world_transform(face);
                let button_world = graph.world_transform(id);
                let normal: Vec3 = face_world.transform_vector3(Vec3::Z);
                let offset: Vec3 = (button_world.translation - face_world.translation).into();
                assert!((offset.dot(normal) - (depth / 2.0 + BUTTON_LIFT)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_row_zero_is_top_row() {
        let config = DiagramConfig::default();
        let graph = build_scene(&config);
        let top = graph.find_button(&SectorId::new(0, FaceKey::Left, 0, 0)).unwrap();
        let bottom = graph.find_button(&SectorId::new(0, FaceKey::Left, 2, 0)).unwrap();
        assert!(
            graph.world_transform(top).translation.y > graph.world_transform(bottom).translation.y
        );
    }
}
