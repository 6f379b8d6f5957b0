//! Геометрия блоков: сечение, грани и вертикальная укладка

use glam::{Mat3, Quat, Vec3};

use crate::{FaceKey, PrismShape};

/// Система координат одной грани блока
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    pub key: FaceKey,
    /// Начальная вершина ребра (со стороны столбца 0)
    pub start: Vec3,
    pub end: Vec3,
    pub width: f32,
    pub center: Vec3,
    /// Единичный вектор вдоль ширины грани (от start к end)
    pub width_axis: Vec3,
    /// Внешняя нормаль
    pub normal: Vec3,
    /// Поворот локальных осей (X, Y, Z) в (width_axis, +Y, normal)
    pub rotation: Quat,
}

/// Вершины сечения в плоскости XZ, центрированные по центроиду
pub fn cross_section(shape: PrismShape, base_length: f32) -> Vec<Vec3> {
    let mut vertices = match shape {
        PrismShape::Triangular => {
            let height = 3.0_f32.sqrt() / 2.0 * base_length;
            vec![
                Vec3::new(base_length / 2.0, 0.0, -height / 3.0),
                Vec3::new(-base_length / 2.0, 0.0, -height / 3.0),
                Vec3::new(0.0, 0.0, 2.0 * height / 3.0),
            ]
        }
        PrismShape::Box => {
            let h = base_length / 2.0;
            vec![
                Vec3::new(-h, 0.0, h),
                Vec3::new(h, 0.0, h),
                Vec3::new(h, 0.0, -h),
                Vec3::new(-h, 0.0, -h),
            ]
        }
    };

    let centroid = vertices.iter().copied().sum::<Vec3>() / vertices.len() as f32;
    for v in &mut vertices {
        *v -= centroid;
    }
    vertices
}

/// Рёбра сечения (start, end) для каждой грани, в порядке `shape.face_keys()`
fn face_edges(shape: PrismShape) -> &'static [(FaceKey, usize, usize)] {
    match shape {
        PrismShape::Triangular => &[
            (FaceKey::Base, 0, 1),
            (FaceKey::Right, 2, 0),
            (FaceKey::Left, 1, 2),
        ],
        PrismShape::Box => &[
            (FaceKey::Front, 0, 1),
            (FaceKey::Right, 1, 2),
            (FaceKey::Back, 2, 3),
            (FaceKey::Left, 3, 0),
        ],
    }
}

/// Системы координат всех граней. Результат детерминирован.
pub fn face_frames(shape: PrismShape, base_length: f32) -> Vec<FaceFrame> {
    let vertices = cross_section(shape, base_length);
    face_edges(shape)
        .iter()
        .map(|&(key, si, ei)| face_frame(key, vertices[si], vertices[ei]))
        .collect()
}

fn face_frame(key: FaceKey, start: Vec3, end: Vec3) -> FaceFrame {
    let edge = end - start;
    let width = edge.length();
    let center = (start + end) * 0.5;

    let mut start = start;
    let mut end = end;
    let mut width_axis = edge.normalize_or_zero();
    let mut normal = width_axis.cross(Vec3::Y).normalize_or_zero();

    // Нормаль смотрит от оси призмы; ось ширины разворачивается вместе
    // с ней, чтобы базис оставался правым.
    if center.dot(normal) < 0.0 {
        normal = -normal;
        width_axis = -width_axis;
        std::mem::swap(&mut start, &mut end);
    }

    let basis = Mat3::from_cols(width_axis, Vec3::Y, normal);
    let rotation = Quat::from_mat3(&basis).normalize();

    FaceFrame {
        key,
        start,
        end,
        width,
        center,
        width_axis,
        normal,
        rotation,
    }
}

/// Вертикальный центр блока: вся стопка центрирована относительно нуля
pub fn block_offset(index: usize, count: usize, height: f32, spacing: f32) -> f32 {
    let step = height + spacing;
    index as f32 * step - step * (count.saturating_sub(1)) as f32 / 2.0
}

/// Длина центральной оси
pub fn axis_height(count: usize, height: f32, spacing: f32, padding: f32) -> f32 {
    count as f32 * (height + spacing) + padding
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_cross_section_centered() {
        for shape in [PrismShape::Triangular, PrismShape::Box] {
            let verts = cross_section(shape, 3.6);
            let centroid = verts.iter().copied().sum::<Vec3>() / verts.len() as f32;
            assert!(centroid.length() < EPS);
            assert!(verts.iter().all(|v| v.y == 0.0));
        }
    }

    #[test]
    fn test_triangle_faces_have_base_length_width() {
        let frames = face_frames(PrismShape::Triangular, 3.6);
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert!((frame.width - 3.6).abs() < 1e-4, "{:?}", frame.key);
        }
        let keys: Vec<_> = frames.iter().map(|f| f.key).collect();
        assert_eq!(keys, PrismShape::Triangular.face_keys());
    }

    #[test]
    fn test_normals_point_outward() {
        for shape in [PrismShape::Triangular, PrismShape::Box] {
            for frame in face_frames(shape, 2.0) {
                assert!(frame.center.dot(frame.normal) > 0.0, "{:?}", frame.key);
                assert!((frame.normal.length() - 1.0).abs() < EPS);
                assert!(frame.normal.dot(frame.width_axis).abs() < EPS);
                assert!(frame.normal.y.abs() < EPS);
            }
        }
    }

    #[test]
    fn test_rotation_maps_local_axes() {
        for shape in [PrismShape::Triangular, PrismShape::Box] {
            for frame in face_frames(shape, 3.6) {
                let x = frame.rotation * Vec3::X;
                let y = frame.rotation * Vec3::Y;
                let z = frame.rotation * Vec3::Z;
                assert!((x - frame.width_axis).length() < 1e-4, "{:?}", frame.key);
                assert!((y - Vec3::Y).length() < 1e-4);
                assert!((z - frame.normal).length() < 1e-4);
            }
        }
    }

    #[test]
    fn test_start_vertex_on_local_negative_x() {
        for frame in face_frames(PrismShape::Triangular, 3.6) {
            let local = frame.rotation.inverse() * (frame.start - frame.center);
            assert!((local.x + frame.width / 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_face_frames_deterministic() {
        let a = face_frames(PrismShape::Triangular, 3.6);
        let b = face_frames(PrismShape::Triangular, 3.6);
        assert_eq!(a, b);
    }

    #[test]
    fn test_block_offsets_centered() {
        let offsets: Vec<f32> = (0..4).map(|i| block_offset(i, 4, 2.6, 0.8)).collect();
        assert!((offsets.iter().sum::<f32>()).abs() < EPS);
        assert!((offsets[1] - offsets[0] - 3.4).abs() < EPS);
        assert_eq!(block_offset(0, 1, 2.6, 0.8), 0.0);
    }

    #[test]
    fn test_axis_height() {
        assert!((axis_height(4, 2.6, 0.8, 1.2) - 14.8).abs() < EPS);
    }
}
