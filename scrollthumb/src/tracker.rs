//! Scroll position and visibility of one thumb.
//!
//! Scroll signals are coalesced to one update per animation frame; resize
//! signals update synchronously. Every update shows the thumb and re-arms the
//! single hide timer. The tracker holds at most one frame request and one
//! timer at a time and ignores deliveries for ids it no longer holds.

use std::time::Duration;

use log::{debug, trace};

use crate::environment::{
    FrameId, Host, HostEvent, ListenerId, Signal, TimerId, ViewportMetrics,
};

/// Thumb position as a percentage in `[0, 100]`.
///
/// The range is shortened by the thumb's share of the viewport so a thumb
/// `thumb_height` px tall never runs past the end of the track. A viewport
/// without layout or a document that does not scroll yields 0.
pub fn scroll_percentage(metrics: ViewportMetrics, thumb_height: Option<f64>) -> f64 {
    let viewport_height = metrics.viewport_height;
    if !viewport_height.is_finite() || viewport_height <= 0.0 {
        return 0.0;
    }

    let max_scroll_top = metrics.max_scroll_top();
    if !max_scroll_top.is_finite() || max_scroll_top <= 0.0 {
        return 0.0;
    }

    let offset = thumb_height
        .filter(|h| h.is_finite() && *h > 0.0)
        .map(|h| (100.0 * h / viewport_height).min(100.0))
        .unwrap_or(0.0);

    let percentage = metrics.scroll_top / max_scroll_top * (100.0 - offset);
    if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[derive(Debug)]
pub struct ScrollTracker {
    hide_after: Duration,
    percentage: f64,
    visible: bool,
    hide_timer: Option<TimerId>,
    pending_frame: Option<FrameId>,
    scroll_listener: Option<ListenerId>,
    resize_listener: Option<ListenerId>,
}

impl ScrollTracker {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            hide_after,
            percentage: 0.0,
            visible: false,
            hide_timer: None,
            pending_frame: None,
            scroll_listener: None,
            resize_listener: None,
        }
    }

    pub fn hide_after(&self) -> Duration {
        self.hide_after
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_mounted(&self) -> bool {
        self.scroll_listener.is_some() || self.resize_listener.is_some()
    }

    /// The pending hide timer, if one is armed.
    pub fn hide_timer(&self) -> Option<TimerId> {
        self.hide_timer
    }

    /// The frame requested by the last scroll burst, if it has not run yet.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending_frame
    }

    /// Subscribe to the host's scroll and resize signals.
    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.is_mounted() {
            debug!("tracker already mounted");
            return;
        }

        self.percentage = 0.0;
        self.visible = false;
        self.scroll_listener = Some(host.subscribe(Signal::Scroll));
        self.resize_listener = Some(host.subscribe(Signal::Resize));
        debug!("tracker mounted, hide after {:?}", self.hide_after);
    }

    /// Release both subscriptions, the hide timer and any pending frame.
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.scroll_listener.take() {
            host.unsubscribe(id);
        }
        if let Some(id) = self.resize_listener.take() {
            host.unsubscribe(id);
        }
        if let Some(id) = self.pending_frame.take() {
            host.cancel_frame(id);
        }
        self.cancel_hide(host);
        self.visible = false;
        debug!("tracker unmounted");
    }

    /// Process one host delivery. Returns true if the percentage or the
    /// visibility changed.
    pub fn handle<H: Host + ?Sized>(&mut self, event: HostEvent, host: &mut H) -> bool {
        if !self.is_mounted() {
            trace!("ignoring {} while unmounted", event.name());
            return false;
        }

        let before = (self.percentage, self.visible);

        match event {
            HostEvent::Scroll => self.on_scroll(host),
            HostEvent::Resize => self.update(host),
            HostEvent::Frame(id) => {
                if self.pending_frame == Some(id) {
                    self.pending_frame = None;
                    self.update(host);
                } else {
                    trace!("ignoring stale frame {id:?}");
                }
            }
            HostEvent::Timer(id) => {
                if self.hide_timer == Some(id) {
                    self.hide_timer = None;
                    self.visible = false;
                    debug!("thumb hidden after {:?} idle", self.hide_after);
                } else {
                    trace!("ignoring stale timer {id:?}");
                }
            }
        }

        before != (self.percentage, self.visible)
    }

    /// Recompute the percentage, show the thumb and re-arm the hide timer.
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H) {
        let metrics = host.metrics();
        let thumb_height = host.thumb().and_then(|thumb| thumb.client_height());

        self.percentage = scroll_percentage(metrics, thumb_height);
        self.visible = true;

        self.cancel_hide(host);
        self.hide_timer = Some(host.set_timeout(self.hide_after));

        trace!(
            "update scroll_top={} max={} percentage={:.2}",
            metrics.scroll_top,
            metrics.max_scroll_top(),
            self.percentage
        );
    }

    fn on_scroll<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(host.request_frame());
        }
        // Keep the thumb from hiding mid-burst before the frame runs.
        self.cancel_hide(host);
    }

    fn cancel_hide<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.hide_timer.take() {
            host.clear_timeout(id);
        }
    }
}
