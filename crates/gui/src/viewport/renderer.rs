//! Software fallback when no GL context is available: node meshes are
//! projected on the CPU and painted back-to-front as egui triangles.

use std::collections::HashMap;

use egui::{Color32, Rect, Ui};
use shared::NodeId;

use super::camera::OrbitCamera;
use super::mesh::STRIDE;
use crate::build::{NodeMesh, RenderPass};
use crate::i18n::t;
use crate::state::ViewportSettings;

struct ScreenTriangle {
    points: [egui::Pos2; 3],
    depth: f32,
    color: Color32,
}

pub fn paint_viewport(
    ui: &Ui,
    rect: Rect,
    camera: &OrbitCamera,
    meshes: &HashMap<NodeId, NodeMesh>,
    settings: &ViewportSettings,
) {
    let painter = ui.painter_at(rect);

    let bg = settings.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(bg[0], bg[1], bg[2]));

    let mut triangles = project_triangles(rect, camera, meshes, settings.face_opacity);
    // painter's algorithm: far first
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut mesh = egui::Mesh::default();
    for tri in &triangles {
        let base = mesh.vertices.len() as u32;
        for p in tri.points {
            mesh.colored_vertex(p, tri.color);
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    painter.add(egui::Shape::mesh(mesh));

    painter.text(
        rect.left_bottom() + egui::vec2(8.0, -8.0),
        egui::Align2::LEFT_BOTTOM,
        t("viewport.software"),
        egui::FontId::proportional(11.0),
        Color32::from_gray(140),
    );
}

fn project_triangles(
    rect: Rect,
    camera: &OrbitCamera,
    meshes: &HashMap<NodeId, NodeMesh>,
    face_opacity: f32,
) -> Vec<ScreenTriangle> {
    let eye = camera.eye_position();
    let light = glam::Vec3::new(0.4, 0.8, 0.6).normalize();
    let mut out = Vec::new();

    for node_mesh in meshes.values() {
        let alpha = match node_mesh.pass {
            RenderPass::Opaque => 1.0,
            RenderPass::Translucent => face_opacity,
        };
        let vertices = &node_mesh.mesh.vertices;
        for tri in node_mesh.mesh.indices.chunks_exact(3) {
            let mut points = [egui::Pos2::ZERO; 3];
            let mut centroid = glam::Vec3::ZERO;
            let mut visible = true;
            for (slot, &index) in tri.iter().enumerate() {
                let v = &vertices[index as usize * STRIDE..(index as usize + 1) * STRIDE];
                let world = glam::Vec3::new(v[0], v[1], v[2]);
                centroid += world / 3.0;
                match camera.project(world, rect) {
                    Some(p) => points[slot] = p,
                    None => visible = false,
                }
            }
            if !visible {
                continue;
            }

            let first = tri[0] as usize * STRIDE;
            let normal = glam::Vec3::new(
                vertices[first + 3],
                vertices[first + 4],
                vertices[first + 5],
            );
            // opaque geometry is culled, face panels are seen from both sides
            if node_mesh.pass == RenderPass::Opaque && normal.dot(eye - centroid) <= 0.0 {
                continue;
            }
            let shade = 0.45 + 0.55 * normal.dot(light).abs();
            let color = [
                vertices[first + 6] * shade,
                vertices[first + 7] * shade,
                vertices[first + 8] * shade,
            ];

            out.push(ScreenTriangle {
                points,
                depth: centroid.distance(eye),
                color: Color32::from_rgba_unmultiplied(
                    (color[0].clamp(0.0, 1.0) * 255.0) as u8,
                    (color[1].clamp(0.0, 1.0) * 255.0) as u8,
                    (color[2].clamp(0.0, 1.0) * 255.0) as u8,
                    (alpha.clamp(0.0, 1.0) * 255.0) as u8,
                ),
            });
        }
    }
    out
}
