//! Render host abstraction: the container the diagram is mounted into

use glam::Vec2;

/// Events the scene listens to on its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Click,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Everything the scene needs from the surrounding UI.
///
/// Removing an unknown listener, detaching an unknown surface or
/// cancelling a frame that already fired must be harmless no-ops.
pub trait RenderHost {
    /// Size of the container in pixels, `None` while nothing is mounted
    fn container_size(&self) -> Option<Vec2>;

    /// Create the render surface inside the container
    fn attach_surface(&mut self, size: Vec2) -> SurfaceId;
    fn resize_surface(&mut self, surface: SurfaceId, size: Vec2);
    fn detach_surface(&mut self, surface: SurfaceId);

    fn add_listener(&mut self, event: HostEvent) -> ListenerId;
    fn remove_listener(&mut self, listener: ListenerId);

    /// Ask for the next animation frame
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}
