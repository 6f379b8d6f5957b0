//! Mounting, animating and tearing down the diagram.
//!
//! The scene talks to its surroundings only through [`RenderHost`]: the
//! desktop app implements it over egui, tests use [`HeadlessHost`].

mod context;
mod frame_loop;
mod headless;
mod host;

pub use context::SceneContext;
pub use frame_loop::{CancelToken, FrameLoop};
pub use headless::HeadlessHost;
pub use host::{FrameRequest, HostEvent, ListenerId, RenderHost, SurfaceId};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CameraSettings;
    use shared::DiagramConfig;

    fn mount(host: &mut HeadlessHost) -> SceneContext {
        SceneContext::init(host, DiagramConfig::default(), &CameraSettings::default()).unwrap()
    }

    #[test]
    fn test_frame_loop_keeps_one_request_pending() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut frames = FrameLoop::start(&mut host);
        assert_eq!(host.pending_frames(), 1);
        for _ in 0..5 {
            host.fire_frame().unwrap();
            assert!(frames.tick(&mut host));
            assert_eq!(host.pending_frames(), 1);
        }
        assert_eq!(frames.frame_count(), 5);
    }

    #[test]
    fn test_cancelled_loop_never_rearms() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut frames = FrameLoop::start(&mut host);
        frames.cancel(&mut host);
        assert_eq!(host.pending_frames(), 0);
        assert!(!frames.tick(&mut host));
        assert_eq!(host.pending_frames(), 0);
        assert!(!frames.is_running());
    }

    #[test]
    fn test_token_cancelled_elsewhere_stops_loop() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut frames = FrameLoop::start(&mut host);
        let token = frames.token();
        host.fire_frame();
        token.cancel();
        assert!(!frames.tick(&mut host));
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_init_without_container_is_noop() {
        let mut host = HeadlessHost::without_container();
        let ctx = SceneContext::init(&mut host, DiagramConfig::default(), &CameraSettings::default());
        assert!(ctx.is_none());
        assert_eq!(host.child_count(), 0);
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_init_attaches_surface_listeners_and_frame() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let ctx = mount(&mut host);
        assert_eq!(host.child_count(), 1);
        assert_eq!(host.listener_count_for(HostEvent::Click), 1);
        assert_eq!(host.listener_count_for(HostEvent::Resize), 1);
        assert_eq!(host.pending_frames(), 1);
        assert_eq!(ctx.clickables().len(), 4 * 3 * 9);
        assert!((ctx.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_dispose_releases_everything() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let ctx = mount(&mut host);
        let nodes = ctx.graph().len();
        assert_eq!(ctx.dispose(&mut host), nodes);
        assert_eq!(host.child_count(), 0);
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_resize_updates_aspect_and_surface() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let mut ctx = mount(&mut host);
        assert!(!ctx.handle_resize(&mut host));
        host.set_container_size(1200.0, 400.0);
        assert!(ctx.handle_resize(&mut host));
        assert!((ctx.camera().aspect - 3.0).abs() < 1e-6);
        let surface = ctx.surface().unwrap();
        assert_eq!(host.surface_size(surface), Some(glam::Vec2::new(1200.0, 400.0)));
    }

    #[test]
    fn test_each_mount_gets_new_generation() {
        let mut host = HeadlessHost::new(800.0, 600.0);
        let first = mount(&mut host);
        let generation = first.generation();
        first.dispose(&mut host);
        let second = mount(&mut host);
        assert_ne!(second.generation(), generation);
    }
}
