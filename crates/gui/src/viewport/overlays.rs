//! Text overlays drawn over the 3D view: row and column labels of every
//! face grid and the block names.

use egui::{Color32, Painter};
use shared::{LabelRole, SceneGraph};

use super::camera::OrbitCamera;

/// Draw every label node of the scene at its projected position.
/// Labels on faces turned away from the camera are skipped.
pub fn draw_labels(painter: &Painter, rect: egui::Rect, camera: &OrbitCamera, graph: &SceneGraph) {
    let eye = camera.eye_position();

    for (id, text, role, position) in graph.labels() {
        let facing = graph
            .parent(id)
            .map(|face| graph.world_transform(face).transform_vector3(glam::Vec3::Z))
            .map_or(true, |normal| normal.dot(eye - position) > 0.0);
        if !facing && role != LabelRole::BlockName {
            continue;
        }

        let Some(screen) = camera.project(position, rect) else {
            continue;
        };
        if !rect.contains(screen) {
            continue;
        }

        let (font, color) = match role {
            LabelRole::BlockName => (
                egui::FontId::proportional(15.0),
                Color32::from_rgb(0x2f, 0x35, 0x42),
            ),
            LabelRole::Row(_) | LabelRole::Column(_) => (
                egui::FontId::monospace(12.0),
                Color32::from_rgb(0x5c, 0x63, 0x70),
            ),
        };
        painter.text(screen, egui::Align2::CENTER_CENTER, text, font, color);
    }
}
