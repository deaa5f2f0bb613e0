//! Viewport geometry tracking.
//!
//! The viewport rectangle is derived from the world-space corners of the
//! scroll viewport, or of the scroll container when no explicit viewport is
//! configured. It is recomputed before every visibility pass; a rectangle
//! computed on an earlier frame is never reused.

use scrollkit_core::logging::targets;
use scrollkit_core::{FrameId, Rect};

use crate::host::LayoutHost;

/// Derive the viewport rectangle from the host's current geometry.
pub fn compute_viewport_rect<H>(host: &H) -> Rect
where
    H: LayoutHost + ?Sized,
{
    let corners = host
        .viewport_corners()
        .unwrap_or_else(|| host.container_corners());
    Rect::from_corners(&corners)
}

/// Remembers the last computed viewport rectangle and when it was computed.
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    rect: Rect,
    computed_at: Option<FrameId>,
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the viewport rectangle for `frame`.
    pub fn refresh<H>(&mut self, host: &H, frame: FrameId) -> Rect
    where
        H: LayoutHost + ?Sized,
    {
        let rect = compute_viewport_rect(host);
        if rect != self.rect {
            tracing::trace!(target: targets::VIEWPORT, %frame, ?rect, "viewport moved");
        }
        self.rect = rect;
        self.computed_at = Some(frame);
        rect
    }

    /// The last computed rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether the cached rectangle may be used on `frame`.
    pub fn is_current(&self, frame: FrameId) -> bool {
        self.computed_at == Some(frame)
    }
}
