//! Frame pacing for the terminal loop.

/// Decides when a new frame is worth drawing.
///
/// While something blinks, every pass renders. A still board only redraws
/// when its fingerprint changes, or as a keep-alive every
/// `min_static_interval_ms`.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Force the next call to render (e.g. after a terminal resize).
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, animating: bool) -> bool {
        let render = !self.has_rendered
            || animating
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if render {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        render
    }
}
