//! In-memory render host for tests and the harness

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use super::host::{FrameRequest, HostEvent, ListenerId, RenderHost, SurfaceId};

/// Render host without a window. Tracks what the scene attached so tests
/// can check that unmounting leaves nothing behind.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    container: Option<Vec2>,
    surfaces: BTreeMap<u64, Vec2>,
    listeners: BTreeMap<u64, HostEvent>,
    frames: BTreeSet<u64>,
    next_id: u64,
}

impl HeadlessHost {
    /// Host with a mounted container of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            container: Some(Vec2::new(width, height)),
            ..Self::default()
        }
    }

    /// Host whose container is missing
    pub fn without_container() -> Self {
        Self::default()
    }

    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.container = Some(Vec2::new(width, height));
    }

    pub fn remove_container(&mut self) {
        self.container = None;
    }

    /// Elements currently attached to the container
    pub fn child_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_count_for(&self, event: HostEvent) -> usize {
        self.listeners.values().filter(|e| **e == event).count()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Fire the oldest pending frame request, as the UI would on vsync
    pub fn fire_frame(&mut self) -> Option<FrameRequest> {
        let id = *self.frames.iter().next()?;
        self.frames.remove(&id);
        Some(FrameRequest(id))
    }

    pub fn surface_size(&self, surface: SurfaceId) -> Option<Vec2> {
        self.surfaces.get(&surface.0).copied()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl RenderHost for HeadlessHost {
    fn container_size(&self) -> Option<Vec2> {
        self.container
    }

    fn attach_surface(&mut self, size: Vec2) -> SurfaceId {
        let id = self.next();
        self.surfaces.insert(id, size);
        SurfaceId(id)
    }

    fn resize_surface(&mut self, surface: SurfaceId, size: Vec2) {
        if let Some(current) = self.surfaces.get_mut(&surface.0) {
            *current = size;
        }
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface.0);
    }

    fn add_listener(&mut self, event: HostEvent) -> ListenerId {
        let id = self.next();
        self.listeners.insert(id, event);
        ListenerId(id)
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener.0);
    }

    fn request_frame(&mut self) -> FrameRequest {
        let id = self.next();
        self.frames.insert(id);
        FrameRequest(id)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.frames.remove(&request.0);
    }
}
