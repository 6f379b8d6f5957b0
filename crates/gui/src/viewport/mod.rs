//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
mod host;
mod overlays;
mod renderer;

pub use prism_gui_lib::viewport::{camera, mesh};

use std::sync::{Arc, Mutex};

use egui::Ui;
use glam::Vec2;

use crate::build::{Highlight, MeshCache, MeshStyle};
use crate::lifecycle::{HostEvent, SceneContext};
use crate::state::AppState;
use gl_renderer::GlRenderer;
use host::EguiHost;

/// 3D viewport panel: owns the mounted scene and its GL resources
pub struct ViewportPanel {
    host: EguiHost,
    context: Option<SceneContext>,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    mesh_cache: MeshCache,
}

impl ViewportPanel {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            host: EguiHost::new(ctx.clone()),
            context: None,
            gl_renderer: None,
            mesh_cache: MeshCache::new(),
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer unavailable, using software fallback: {e}"),
        }
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        self.host.set_container(Some(Vec2::new(rect.width(), rect.height())));
        if self.context.is_none() {
            self.context =
                SceneContext::init(&mut self.host, state.config.clone(), &state.settings.camera);
        }
        let Some(ctx) = self.context.as_mut() else {
            return;
        };

        if self.host.listens(HostEvent::Resize) {
            ctx.handle_resize(&mut self.host);
        }

        // ── Camera controls ─────────────────────────────────────
        let camera_settings = &state.settings.camera;
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            ctx.camera_mut()
                .rotate(delta.x * camera_settings.rotate_speed, delta.y * camera_settings.rotate_speed);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                ctx.camera_mut().zoom(scroll * camera_settings.zoom_speed);
            }
        }

        if self.host.take_frame().is_some() {
            ctx.on_frame(&mut self.host);
        }

        // ── Hover and click ─────────────────────────────────────
        let local = |pos: egui::Pos2| Vec2::new(pos.x - rect.left(), pos.y - rect.top());
        state.hovered = response
            .hover_pos()
            .and_then(|pos| ctx.resolve(local(pos)));
        if state.hovered.is_some() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if response.clicked() && self.host.listens(HostEvent::Click) {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some(sector) = ctx.handle_click(local(pos)) {
                    state.selection.select(sector);
                }
            }
        }

        // ── Meshes ──────────────────────────────────────────────
        let style = MeshStyle::from(&state.settings.viewport);
        let highlight = Highlight {
            hovered: state.hovered,
            selected: state.selection.selected_id(),
        };
        self.mesh_cache
            .update(ctx.graph(), ctx.generation(), &style, &highlight);

        if !ui.is_rect_visible(rect) {
            return;
        }

        let Some(ctx) = self.context.as_ref() else {
            return;
        };
        self.render(ui, rect, ctx, state);
        overlays::draw_labels(&ui.painter_at(rect), rect, ctx.camera(), ctx.graph());
    }

    fn render(&self, ui: &mut Ui, rect: egui::Rect, ctx: &SceneContext, state: &AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            renderer::paint_viewport(
                ui,
                rect,
                ctx.camera(),
                self.mesh_cache.meshes(),
                &state.settings.viewport,
            );
            return;
        };

        let renderer_clone = gl_renderer.clone();
        let meshes = self.mesh_cache.meshes_clone();
        let version = self.mesh_cache.rebuild_count();
        let view_projection = ctx.camera().view_projection();
        let bg_color = state.settings.viewport.background_color;
        let face_opacity = state.settings.viewport.face_opacity;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();
                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer_clone.lock() {
                    r.sync_from_meshes(gl, &meshes, version);
                    r.paint(
                        gl,
                        &gl_renderer::RenderParams {
                            viewport,
                            view_projection,
                            bg_color,
                            face_opacity,
                        },
                    );
                }
            })),
        };

        ui.painter().add(callback);
    }

    /// Tear down the scene and GL resources. Safe to call more than once.
    pub fn dispose(&mut self, gl: Option<&glow::Context>) {
        if let Some(ctx) = self.context.take() {
            ctx.dispose(&mut self.host);
        }
        self.mesh_cache.clear();
        self.host.set_container(None);

        if let (Some(gl), Some(renderer)) = (gl, self.gl_renderer.take()) {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.context.is_some() && self.host.has_surface()
    }
}
