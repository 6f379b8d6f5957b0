//! Выбор сектора лучом из камеры

use glam::{Affine3A, Mat4, Vec2, Vec3, Vec4};

use crate::SectorId;

/// Луч в мировых координатах
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Луч через точку в нормализованных координатах устройства
    pub fn from_ndc(ndc: Vec2, inverse_view_projection: &Mat4) -> Self {
        let near = inverse_view_projection.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse_view_projection.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Self {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Прямоугольник области просмотра в пикселях
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, pixel: Vec2) -> bool {
        pixel.x >= self.left
            && pixel.x <= self.left + self.width
            && pixel.y >= self.top
            && pixel.y <= self.top + self.height
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Пиксели -> NDC: x вправо, y вверх, оба в [-1, 1]
    pub fn pixel_to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            (pixel.x - self.left) / self.width * 2.0 - 1.0,
            -((pixel.y - self.top) / self.height) * 2.0 + 1.0,
        )
    }

    /// NDC -> пиксели
    pub fn ndc_to_pixel(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.left + (ndc.x + 1.0) * 0.5 * self.width,
            self.top + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// Осевой ограничивающий параллелепипед
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_half_extents(half: Vec3) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Пересечение луча с AABB методом плит.
/// Возвращает расстояние до ближайшей точки пересечения.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax.is_nan() || tmin.is_nan() || tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Пересечение луча с ориентированным параллелепипедом.
/// `world` должен быть жёстким (без масштаба), тогда расстояния совпадают.
pub fn ray_obb(ray: &Ray, world: &Affine3A, half_extents: Vec3) -> Option<f32> {
    let to_local = world.inverse();
    let local = Ray {
        origin: to_local.transform_point3(ray.origin),
        direction: to_local.transform_vector3(ray.direction),
    };
    ray_aabb(&local, &Aabb::from_half_extents(half_extents))
}

/// Кликабельная кнопка сектора
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clickable {
    pub sector: SectorId,
    /// Локальная система кнопки -> мир
    pub world: Affine3A,
    pub half_extents: Vec3,
}

impl Clickable {
    pub fn center(&self) -> Vec3 {
        self.world.translation.into()
    }
}

/// Результат выбора
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub sector: SectorId,
    pub distance: f32,
    /// Индекс в списке кликабельных объектов
    pub index: usize,
}

/// Ближайшая кнопка вдоль луча; при равных расстояниях побеждает меньший индекс
pub fn pick_nearest(ray: &Ray, clickables: &[Clickable]) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for (index, clickable) in clickables.iter().enumerate() {
        if let Some(distance) = ray_obb(ray, &clickable.world, clickable.half_extents) {
            if best.as_ref().map_or(true, |b| distance < b.distance) {
                best = Some(PickHit {
                    sector: clickable.sector,
                    distance,
                    index,
                });
            }
        }
    }

    best
}

/// Клик в пикселях -> сектор. `None` означает, что клик ничего не меняет.
pub fn resolve_click(
    pixel: Vec2,
    rect: &ViewportRect,
    view_projection: &Mat4,
    clickables: &[Clickable],
) -> Option<PickHit> {
    if rect.is_empty() || !rect.contains(pixel) {
        return None;
    }
    let ndc = rect.pixel_to_ndc(pixel);
    let ray = Ray::from_ndc(ndc, &view_projection.inverse());
    if ray.direction == Vec3::ZERO {
        return None;
    }
    pick_nearest(&ray, clickables)
}

/// Проекция мировой точки в пиксели; `None`, если точка за камерой
pub fn project_to_pixel(point: Vec3, rect: &ViewportRect, view_projection: &Mat4) -> Option<Vec2> {
    let clip = *view_projection * Vec4::new(point.x, point.y, point.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(rect.ndc_to_pixel(Vec2::new(ndc.x, ndc.y)))
}
