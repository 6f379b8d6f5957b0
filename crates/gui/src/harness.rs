//! Headless test harness: drives the full mount → interact → unmount cycle
//! over a [`HeadlessHost`], the same way the desktop app drives it over egui.

use glam::Vec2;
use shared::picking::project_to_pixel;
use shared::{DiagramConfig, FaceKey, NodeKind, SectorId};

use crate::build::{Highlight, MeshCache, MeshStyle};
use crate::i18n::Lang;
use crate::lifecycle::{HeadlessHost, SceneContext};
use crate::presentation::ShellView;
use crate::state::{AppSettings, AppState, ModalClick};

/// Headless test harness — owns host, application state, scene context and mesh cache
pub struct TestHarness {
    pub host: HeadlessHost,
    pub state: AppState,
    context: Option<SceneContext>,
    cache: MeshCache,
}

impl TestHarness {
    /// Harness with the built-in diagram and an 800×600 container
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_config(config: DiagramConfig) -> Self {
        Self::with_settings(AppSettings {
            diagram: Some(config),
            ..AppSettings::default()
        })
    }

    pub fn with_blocks(names: &[&str]) -> Self {
        Self::with_config(DiagramConfig::with_blocks(names))
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            host: HeadlessHost::new(800.0, 600.0),
            state: AppState::new(settings),
            context: None,
            cache: MeshCache::new(),
        }
    }

    /// Load settings from JSON (replaces state, unmounts first)
    pub fn load_settings_json(&mut self, json: &str) -> Result<(), String> {
        let settings = AppSettings::from_json(json)?;
        self.unmount();
        self.state = AppState::new(settings);
        Ok(())
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Mount the scene. Returns `false` if already mounted or the host has
    /// no container.
    pub fn mount(&mut self) -> bool {
        if self.context.is_some() {
            return false;
        }
        self.context = SceneContext::init(
            &mut self.host,
            self.state.config.clone(),
            &self.state.settings.camera,
        );
        self.context.is_some()
    }

    /// Unmount the scene. Safe to call any number of times.
    pub fn unmount(&mut self) -> bool {
        match self.context.take() {
            Some(ctx) => {
                ctx.dispose(&mut self.host);
                self.cache.clear();
                self.state.hovered = None;
                true
            }
            None => false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&SceneContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut SceneContext> {
        self.context.as_mut()
    }

    /// Fire one pending frame. Returns `false` when nothing was pending.
    pub fn tick(&mut self) -> bool {
        if self.host.fire_frame().is_none() {
            return false;
        }
        match self.context.as_mut() {
            Some(ctx) => ctx.on_frame(&mut self.host),
            None => false,
        }
    }

    /// Change the container size and deliver the resize event
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.host.set_container_size(width, height);
        match self.context.as_mut() {
            Some(ctx) => ctx.handle_resize(&mut self.host),
            None => false,
        }
    }

    // ── Interaction ───────────────────────────────────────────

    /// Click at a container-local pixel. Returns the sector that was opened.
    pub fn click(&mut self, pixel: Vec2) -> Option<SectorId> {
        let sector = self.context.as_ref()?.handle_click(pixel)?;
        let id = sector.id;
        self.state.selection.select(sector);
        Some(id)
    }

    /// Move the pointer; updates the hovered button
    pub fn hover(&mut self, pixel: Vec2) -> Option<SectorId> {
        self.state.hovered = self.context.as_ref().and_then(|ctx| ctx.resolve(pixel));
        self.state.hovered
    }

    pub fn modal_click(&mut self, click: ModalClick) -> bool {
        self.state.selection.handle_modal_click(click)
    }

    pub fn press_escape(&mut self) {
        self.state.selection.close();
    }

    /// Turn the camera so it looks straight at a face of a block
    pub fn look_at_face(&mut self, block: usize, face: FaceKey) -> bool {
        let Some(ctx) = self.context.as_mut() else {
            return false;
        };
        let normal = ctx.graph().iter().find_map(|(id, node)| match node.kind {
            NodeKind::Face { block: b, key, .. } if b == block && key == face => {
                Some(ctx.graph().world_transform(id).transform_vector3(glam::Vec3::Z))
            }
            _ => None,
        });
        let Some(normal) = normal else {
            return false;
        };
        let camera = ctx.camera_mut();
        camera.yaw = normal.x.atan2(normal.z);
        true
    }

    /// Pixel at the centre of a sector's button, if it is on screen
    pub fn sector_pixel(&self, id: &SectorId) -> Option<Vec2> {
        let ctx = self.context.as_ref()?;
        let clickable = ctx.clickables().iter().find(|c| &c.sector == id)?;
        project_to_pixel(
            clickable.center(),
            &ctx.viewport(),
            &ctx.camera().view_projection(),
        )
    }

    /// Click the centre of a sector's button
    pub fn click_sector(&mut self, id: &SectorId) -> Option<SectorId> {
        let pixel = self.sector_pixel(id)?;
        self.click(pixel)
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn shell(&self, lang: Lang) -> ShellView {
        ShellView::build(&self.state, lang)
    }

    pub fn selected(&self) -> Option<SectorId> {
        self.state.selection.selected_id()
    }

    /// Rebuild meshes for the current hover/selection; returns mesh count
    pub fn build_meshes(&mut self) -> usize {
        let Some(ctx) = self.context.as_ref() else {
            return 0;
        };
        let style = MeshStyle::from(&self.state.settings.viewport);
        let highlight = Highlight {
            hovered: self.state.hovered,
            selected: self.state.selection.selected_id(),
        };
        self.cache
            .update(ctx.graph(), ctx.generation(), &style, &highlight);
        self.cache.meshes().len()
    }

    pub fn mesh_rebuild_count(&self) -> u64 {
        self.cache.rebuild_count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
