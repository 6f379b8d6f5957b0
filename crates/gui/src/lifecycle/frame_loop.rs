use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::host::{FrameRequest, RenderHost};

/// Shared cancellation flag, checked before every re-arm of the frame loop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Self re-arming animation loop.
///
/// At most one frame request is pending at any time. Once the token is
/// cancelled the loop never re-arms again.
#[derive(Debug)]
pub struct FrameLoop {
    token: CancelToken,
    pending: Option<FrameRequest>,
    frames: u64,
}

impl FrameLoop {
    /// Request the first frame
    pub fn start(host: &mut dyn RenderHost) -> Self {
        Self::with_token(host, CancelToken::new())
    }

    pub fn with_token(host: &mut dyn RenderHost, token: CancelToken) -> Self {
        let pending = if token.is_cancelled() {
            None
        } else {
            Some(host.request_frame())
        };
        Self {
            token,
            pending,
            frames: 0,
        }
    }

    /// Called when the pending frame fires. Returns `false` once cancelled.
    pub fn tick(&mut self, host: &mut dyn RenderHost) -> bool {
        self.pending = None;
        if self.token.is_cancelled() {
            return false;
        }
        self.frames += 1;
        self.pending = Some(host.request_frame());
        true
    }

    /// Stop re-arming and cancel the outstanding request
    pub fn cancel(&mut self, host: &mut dyn RenderHost) {
        self.token.cancel();
        if let Some(request) = self.pending.take() {
            host.cancel_frame(request);
        }
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
