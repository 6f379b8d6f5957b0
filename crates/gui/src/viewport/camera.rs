use glam::{Mat4, Vec2, Vec3};
use shared::picking::{project_to_pixel, Ray, ViewportRect};

use crate::state::settings::CameraSettings;

/// Remaining rotation below this is dropped by the damping step
const SETTLE_EPSILON: f32 = 1e-5;

/// Orbit camera around the vertical axis of the diagram.
///
/// The polar angle is locked to the horizon and panning is not supported:
/// the user can only spin the stack and move closer or further away.
/// Rotation input accumulates and is applied gradually in [`update`],
/// so the stack keeps turning for a moment after the drag ends.
///
/// [`update`]: OrbitCamera::update
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians), fixed
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport width / height
    pub aspect: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Share of the pending rotation applied per frame
    pub damping: f32,
    pending_yaw: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

impl OrbitCamera {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let min_distance = settings.min_distance.min(settings.max_distance);
        let max_distance = settings.max_distance.max(settings.min_distance);
        Self {
            yaw: settings.yaw_degrees.to_radians(),
            pitch: 0.0,
            distance: settings.distance.clamp(min_distance, max_distance),
            target: Vec3::ZERO,
            fov: settings.fov_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
            aspect: 1.0,
            min_distance,
            max_distance,
            damping: settings.damping.clamp(0.0, 1.0),
            pending_yaw: 0.0,
        }
    }

    /// Queue a rotation. Vertical input is ignored: the polar angle is locked.
    pub fn rotate(&mut self, dx: f32, _dy: f32) {
        self.pending_yaw += dx.to_radians();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(self.min_distance, self.max_distance);
    }

    /// Damping step, called once per frame. Returns `true` while the camera
    /// is still settling.
    pub fn update(&mut self) -> bool {
        if self.damping <= 0.0 || self.damping >= 1.0 {
            self.yaw += self.pending_yaw;
            self.pending_yaw = 0.0;
            return false;
        }
        let step = self.pending_yaw * self.damping;
        self.yaw += step;
        self.pending_yaw -= step;
        if self.pending_yaw.abs() < SETTLE_EPSILON {
            self.pending_yaw = 0.0;
        }
        self.is_settling()
    }

    pub fn is_settling(&self) -> bool {
        self.pending_yaw != 0.0
    }

    /// Follow the viewport size; degenerate sizes keep the previous aspect
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a 3D point to 2D screen coords (for overlay text)
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        project_to_pixel(point, &viewport_rect(rect), &self.view_projection())
            .map(|p| egui::pos2(p.x, p.y))
    }

    /// Cast a ray from a screen position into the 3D scene
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let ndc = viewport_rect(rect).pixel_to_ndc(Vec2::new(screen_pos.x, screen_pos.y));
        Ray::from_ndc(ndc, &self.view_projection().inverse())
    }
}

/// egui rectangle -> picking viewport
pub fn viewport_rect(rect: egui::Rect) -> ViewportRect {
    ViewportRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}
