//! Deterministic in-memory host with a virtual clock.
//!
//! Nothing fires on its own: signals, frames and timers are produced as
//! [`HostEvent`]s by [`FakeHost::scroll_to`], [`FakeHost::next_frame`],
//! [`FakeHost::advance`] and friends, and handed to the thumb with
//! [`dispatch`].

use std::collections::BTreeMap;
use std::time::Duration;

use crate::component::ScrollThumb;
use crate::element::{ThumbElement, Transform};
use crate::environment::{
    FrameId, Host, HostEvent, ListenerId, Scheduler, Signal, Signals, TimerId, Viewport,
    ViewportMetrics,
};

/// Thumb element that records what was written to it.
#[derive(Debug, Clone, Default)]
pub struct FakeThumb {
    pub height: Option<f64>,
    pub transform: Transform,
    /// Number of transform writes.
    pub writes: usize,
}

impl FakeThumb {
    pub fn new(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Default::default()
        }
    }
}

impl ThumbElement for FakeThumb {
    fn client_height(&self) -> Option<f64> {
        self.height
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.writes += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub metrics: ViewportMetrics,
    pub thumb: Option<FakeThumb>,
    now: Duration,
    next_id: u64,
    /// Timer deadlines; `None` for delays past the end of the clock.
    timers: BTreeMap<TimerId, Option<Duration>>,
    frames: Vec<FrameId>,
    listeners: BTreeMap<ListenerId, Signal>,
    timers_armed: usize,
    frames_requested: usize,
}

impl FakeHost {
    pub fn new(metrics: ViewportMetrics) -> Self {
        Self {
            metrics,
            ..Default::default()
        }
    }

    /// Attach a thumb element `height` px tall.
    pub fn with_thumb(mut self, height: f64) -> Self {
        self.thumb = Some(FakeThumb::new(height));
        self
    }

    /// Virtual time since the host was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_for(&self, signal: Signal) -> usize {
        self.listeners.values().filter(|s| **s == signal).count()
    }

    /// Total timers ever armed.
    pub fn timers_armed(&self) -> usize {
        self.timers_armed
    }

    /// Total frames ever requested.
    pub fn frames_requested(&self) -> usize {
        self.frames_requested
    }

    /// One event per subscriber of `signal`.
    pub fn signal(&self, signal: Signal) -> Vec<HostEvent> {
        self.listeners
            .values()
            .filter(|s| **s == signal)
            .map(|s| HostEvent::from(*s))
            .collect()
    }

    pub fn scroll_to(&mut self, scroll_top: f64) -> Vec<HostEvent> {
        self.metrics.scroll_top = scroll_top;
        self.signal(Signal::Scroll)
    }

    pub fn resize(&mut self, viewport_height: f64) -> Vec<HostEvent> {
        self.metrics.viewport_height = viewport_height;
        self.signal(Signal::Resize)
    }

    /// Run the frame boundary: every requested frame, in request order.
    pub fn next_frame(&mut self) -> Vec<HostEvent> {
        self.frames.drain(..).map(HostEvent::Frame).collect()
    }

    /// Move the clock forward and collect the timers that came due, earliest
    /// first.
    pub fn advance(&mut self, by: Duration) -> Vec<HostEvent> {
        self.now = self.now.saturating_add(by);

        let mut due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter_map(|(id, deadline)| match deadline {
                Some(deadline) if *deadline <= self.now => Some((*deadline, *id)),
                _ => None,
            })
            .collect();
        due.sort();

        for (_, id) in &due {
            self.timers.remove(id);
        }
        due.into_iter().map(|(_, id)| HostEvent::Timer(id)).collect()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Viewport for FakeHost {
    fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }
}

impl Scheduler for FakeHost {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        self.frames.push(id);
        self.frames_requested += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id());
        self.timers.insert(id, self.now.checked_add(delay));
        self.timers_armed += 1;
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

impl Signals for FakeHost {
    fn subscribe(&mut self, signal: Signal) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, signal);
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

impl Host for FakeHost {
    fn thumb(&mut self) -> Option<&mut dyn ThumbElement> {
        self.thumb
            .as_mut()
            .map(|thumb| thumb as &mut dyn ThumbElement)
    }
}

/// Hand `events` to `thumb` in order. Returns how many changed its state.
pub fn dispatch(thumb: &mut ScrollThumb, host: &mut FakeHost, events: Vec<HostEvent>) -> usize {
    let mut changed = 0;
    for event in events {
        if thumb.handle(event, host) {
            changed += 1;
        }
    }
    changed
}
