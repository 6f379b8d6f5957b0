use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use shared::picking::{resolve_click, Clickable, ViewportRect};
use shared::{build_scene, DiagramConfig, SceneGraph, SectorId};

use super::frame_loop::FrameLoop;
use super::host::{HostEvent, ListenerId, RenderHost, SurfaceId};
use crate::state::{CameraSettings, SelectedSector};
use crate::viewport::camera::OrbitCamera;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Everything owned by one mounted diagram: scene arena, pick targets,
/// camera, render surface, listeners and the frame loop.
///
/// Created by [`SceneContext::init`] and released by [`SceneContext::dispose`],
/// which consumes the context so it cannot be used afterwards.
#[derive(Debug)]
pub struct SceneContext {
    config: DiagramConfig,
    graph: SceneGraph,
    clickables: Vec<Clickable>,
    camera: OrbitCamera,
    surface: Option<SurfaceId>,
    listeners: Vec<ListenerId>,
    frame_loop: FrameLoop,
    size: Vec2,
    /// Unique per mount, used to invalidate mesh caches
    generation: u64,
}

impl SceneContext {
    /// Build the scene into the host's container.
    ///
    /// Returns `None` without touching the host when there is no container.
    pub fn init(
        host: &mut dyn RenderHost,
        config: DiagramConfig,
        camera_settings: &CameraSettings,
    ) -> Option<Self> {
        let Some(size) = host.container_size() else {
            tracing::warn!("No container to mount the diagram into");
            return None;
        };

        let graph = build_scene(&config);
        let clickables = graph.clickables();

        let mut camera = OrbitCamera::from_settings(camera_settings);
        camera.set_aspect(size.x, size.y);

        let surface = host.attach_surface(size);
        let listeners = vec![
            host.add_listener(HostEvent::Click),
            host.add_listener(HostEvent::Resize),
        ];
        let frame_loop = FrameLoop::start(host);

        tracing::info!(
            "Scene mounted: {} blocks, {} nodes, {} buttons, {}x{} px",
            config.block_count(),
            graph.len(),
            clickables.len(),
            size.x,
            size.y
        );

        Some(Self {
            config,
            graph,
            clickables,
            camera,
            surface: Some(surface),
            listeners,
            frame_loop,
            size,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Frame callback: re-arm the loop and advance camera damping.
    /// Returns `false` once the loop has been cancelled.
    pub fn on_frame(&mut self, host: &mut dyn RenderHost) -> bool {
        if !self.frame_loop.tick(host) {
            return false;
        }
        self.camera.update();
        true
    }

    /// Viewport in container-local pixels
    pub fn viewport(&self) -> ViewportRect {
        ViewportRect::new(0.0, 0.0, self.size.x, self.size.y)
    }

    /// Sector under a container-local pixel
    pub fn resolve(&self, pixel: Vec2) -> Option<SectorId> {
        resolve_click(
            pixel,
            &self.viewport(),
            &self.camera.view_projection(),
            &self.clickables,
        )
        .map(|hit| hit.sector)
    }

    /// Click handler: the sector to open, or `None` when the click hits nothing
    pub fn handle_click(&self, pixel: Vec2) -> Option<SelectedSector> {
        let id = self.resolve(pixel)?;
        tracing::debug!("Click at {pixel:?} resolved to {}", id.key());
        Some(SelectedSector::resolve(&self.config, id))
    }

    /// Follow the container size. Returns `true` when the size changed.
    pub fn handle_resize(&mut self, host: &mut dyn RenderHost) -> bool {
        let Some(size) = host.container_size() else {
            return false;
        };
        if size == self.size || size.x <= 0.0 || size.y <= 0.0 {
            return false;
        }
        self.size = size;
        self.camera.set_aspect(size.x, size.y);
        if let Some(surface) = self.surface {
            host.resize_surface(surface, size);
        }
        tracing::debug!("Viewport resized to {}x{}", size.x, size.y);
        true
    }

    /// Release everything acquired in `init`. Returns the number of scene
    /// nodes released.
    pub fn dispose(mut self, host: &mut dyn RenderHost) -> usize {
        self.frame_loop.cancel(host);

        for listener in self.listeners.drain(..) {
            host.remove_listener(listener);
        }

        if let Some(surface) = self.surface.take() {
            host.detach_surface(surface);
        }

        let released = self.graph.teardown_order().len();
        self.clickables.clear();
        self.graph.clear();

        tracing::info!("Scene disposed, {released} nodes released");
        released
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn clickables(&self) -> &[Clickable] {
        &self.clickables
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
