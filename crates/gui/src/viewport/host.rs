//! [`RenderHost`] over an egui central panel.
//!
//! The container is the rectangle the viewport gets from the layout each
//! frame; the surface is the GL paint callback region; frame requests turn
//! into repaint requests and fire on the next `update`.

use std::collections::HashMap;

use glam::Vec2;

use crate::lifecycle::{FrameRequest, HostEvent, ListenerId, RenderHost, SurfaceId};

pub struct EguiHost {
    ctx: egui::Context,
    container: Option<Vec2>,
    surfaces: HashMap<SurfaceId, Vec2>,
    listeners: HashMap<ListenerId, HostEvent>,
    pending: Option<FrameRequest>,
    next_id: u64,
}

impl EguiHost {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            container: None,
            surfaces: HashMap::new(),
            listeners: HashMap::new(),
            pending: None,
            next_id: 1,
        }
    }

    /// Record the size the layout gave the viewport this frame
    pub fn set_container(&mut self, size: Option<Vec2>) {
        self.container = size.filter(|s| s.x > 0.0 && s.y > 0.0);
    }

    pub fn has_surface(&self) -> bool {
        !self.surfaces.is_empty()
    }

    /// Whether somebody is subscribed to `event`
    pub fn listens(&self, event: HostEvent) -> bool {
        self.listeners.values().any(|e| *e == event)
    }

    /// Take the pending frame request, if any. Called once per egui update.
    pub fn take_frame(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RenderHost for EguiHost {
    fn container_size(&self) -> Option<Vec2> {
        self.container
    }

    fn attach_surface(&mut self, size: Vec2) -> SurfaceId {
        let id = SurfaceId(self.next());
        self.surfaces.insert(id, size);
        id
    }

    fn resize_surface(&mut self, surface: SurfaceId, size: Vec2) {
        if let Some(s) = self.surfaces.get_mut(&surface) {
            *s = size;
        }
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }

    fn add_listener(&mut self, event: HostEvent) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id, event);
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next());
        self.pending = Some(request);
        self.ctx.request_repaint();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }
}
