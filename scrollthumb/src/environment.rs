//! The host environment a thumb runs against.
//!
//! A host stands in for the browser window: it reports viewport metrics,
//! delivers scroll/resize signals to subscribers, runs animation frames and
//! timers, and owns the rendered thumb element. Every deferred piece of work
//! is identified by an id the host hands out, so the tracker can cancel it and
//! recognise stale deliveries.

use std::time::Duration;

use crate::element::ThumbElement;

/// Scroll metrics of the viewport, in px.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    /// Current vertical scroll offset. Negative during elastic overscroll.
    pub scroll_top: f64,
    /// Total height of the scrolled document.
    pub scroll_height: f64,
    /// Height of the visible area. Zero before the first layout.
    pub viewport_height: f64,
}

impl ViewportMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            viewport_height,
        }
    }

    /// Total scrollable distance.
    pub fn max_scroll_top(&self) -> f64 {
        self.scroll_height - self.viewport_height
    }
}

/// Viewport signals a thumb subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Scroll,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Something the host delivers to a mounted thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The viewport scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
    /// A frame requested with [`Scheduler::request_frame`] is about to paint.
    Frame(FrameId),
    /// A timeout armed with [`Scheduler::set_timeout`] elapsed.
    Timer(TimerId),
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Scroll => "scroll",
            HostEvent::Resize => "resize",
            HostEvent::Frame(_) => "frame",
            HostEvent::Timer(_) => "timer",
        }
    }
}

impl From<Signal> for HostEvent {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Scroll => HostEvent::Scroll,
            Signal::Resize => HostEvent::Resize,
        }
    }
}

pub trait Viewport {
    fn metrics(&self) -> ViewportMetrics;
}

/// Frame and timer primitives.
pub trait Scheduler {
    /// Run-before-next-repaint. The host later delivers [`HostEvent::Frame`].
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
    /// The host delivers [`HostEvent::Timer`] once `delay` has elapsed.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;
    fn clear_timeout(&mut self, id: TimerId);
}

pub trait Signals {
    fn subscribe(&mut self, signal: Signal) -> ListenerId;
    fn unsubscribe(&mut self, id: ListenerId);
}

pub trait Host: Viewport + Scheduler + Signals {
    /// The rendered thumb element, once it is attached.
    fn thumb(&mut self) -> Option<&mut dyn ThumbElement>;
}
