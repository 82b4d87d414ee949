//! Terminal implementation of the thumb's host environment.
//!
//! The viewport is the terminal, the document is measured in rows, and both
//! are reported in px at a fixed cell size so the thumb's px-based config
//! keeps its meaning. Frames run on the event loop's frame tick and timers on
//! its deadline branch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::trace;
use scrollthumb::{
    FrameId, Host, HostEvent, ListenerId, Scheduler, Signal, Signals, ThumbElement, TimerId,
    Transform, Viewport, ViewportMetrics,
};

use crate::document::Document;

/// Pixel height assumed for one terminal row.
pub const ROW_PX: f64 = 16.0;
/// Pixel width assumed for one terminal column.
pub const COL_PX: f64 = 8.0;

/// Whole cells needed to cover `px` at `cell_px` per cell, at least one.
pub fn cells_for(px: f64, cell_px: f64) -> u16 {
    (px / cell_px).ceil().clamp(1.0, u16::MAX as f64) as u16
}

/// The thumb as a block of terminal cells.
#[derive(Debug, Clone)]
pub struct CellThumb {
    rows: u16,
    cols: u16,
    /// Viewport height the thumb is laid out in.
    max_rows: u16,
    transform: Transform,
    last_translate: Transform,
}

impl CellThumb {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows,
            cols,
            max_rows: u16::MAX,
            transform: Transform::None,
            last_translate: Transform::None,
        }
    }

    /// Lay the thumb out in a viewport `rows` tall. A thumb taller than the
    /// viewport is cut to it, and its reported height follows.
    pub fn fit(&mut self, rows: u16) {
        self.max_rows = rows;
    }

    /// Rows actually occupied.
    pub fn rows(&self) -> u16 {
        self.rows.min(self.max_rows)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Translation to draw with. A cleared transform keeps the last shown
    /// placement so the thumb fades out where it was.
    pub fn placement(&self) -> Transform {
        if self.transform.is_identity() {
            self.last_translate
        } else {
            self.transform
        }
    }
}

impl ThumbElement for CellThumb {
    fn client_height(&self) -> Option<f64> {
        Some(self.rows() as f64 * ROW_PX)
    }

    fn set_transform(&mut self, transform: Transform) {
        if !transform.is_identity() {
            self.last_translate = transform;
        }
        self.transform = transform;
    }
}

#[derive(Debug)]
pub struct TermHost {
    document: Document,
    cols: u16,
    rows: u16,
    thumb: Option<CellThumb>,
    next_id: u64,
    /// Deadlines; `None` for delays that never come due.
    timers: HashMap<TimerId, Option<Instant>>,
    frames: Vec<FrameId>,
    listeners: HashMap<ListenerId, Signal>,
}

impl TermHost {
    pub fn new(document: Document, (cols, rows): (u16, u16)) -> Self {
        let mut document = document;
        document.clamp(rows);
        Self {
            document,
            cols,
            rows,
            thumb: None,
            next_id: 0,
            timers: HashMap::new(),
            frames: Vec::new(),
            listeners: HashMap::new(),
        }
    }

    /// Attach the thumb element.
    pub fn attach_thumb(&mut self, mut thumb: CellThumb) {
        thumb.fit(self.rows);
        self.thumb = Some(thumb);
    }

    pub fn thumb_element(&self) -> Option<&CellThumb> {
        self.thumb.as_ref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Scroll the document by `delta` rows. Signals only if the offset moved.
    pub fn scroll_by(&mut self, delta: i64) -> Vec<HostEvent> {
        if self.document.scroll_by(delta, self.rows) {
            self.signal(Signal::Scroll)
        } else {
            Vec::new()
        }
    }

    /// Scroll so that line `top` is first. Signals only if the offset moved.
    pub fn scroll_to(&mut self, top: usize) -> Vec<HostEvent> {
        if self.document.scroll_to(top, self.rows) {
            self.signal(Signal::Scroll)
        } else {
            Vec::new()
        }
    }

    pub fn page_rows(&self) -> i64 {
        (self.rows as i64 - 1).max(1)
    }

    pub fn resize(&mut self, cols: u16, rows: u16) -> Vec<HostEvent> {
        self.cols = cols;
        self.rows = rows;
        self.document.clamp(rows);
        if let Some(thumb) = self.thumb.as_mut() {
            thumb.fit(rows);
        }
        self.signal(Signal::Resize)
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Frame boundary: every requested frame, in request order.
    pub fn take_frames(&mut self) -> Vec<HostEvent> {
        self.frames.drain(..).map(HostEvent::Frame).collect()
    }

    /// Remove and return the timers due at `now`, earliest first.
    pub fn due_timers(&mut self, now: Instant) -> Vec<HostEvent> {
        let mut due: Vec<(Instant, TimerId)> = self
            .timers
            .iter()
            .filter_map(|(id, deadline)| match deadline {
                Some(deadline) if *deadline <= now => Some((*deadline, *id)),
                _ => None,
            })
            .collect();
        due.sort();

        for (_, id) in &due {
            self.timers.remove(id);
        }
        due.into_iter().map(|(_, id)| HostEvent::Timer(id)).collect()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().flatten().min().copied()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn signal(&self, signal: Signal) -> Vec<HostEvent> {
        self.listeners
            .values()
            .filter(|s| **s == signal)
            .map(|s| HostEvent::from(*s))
            .collect()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Viewport for TermHost {
    fn metrics(&self) -> ViewportMetrics {
        ViewportMetrics::new(
            self.document.top() as f64 * ROW_PX,
            self.document.len() as f64 * ROW_PX,
            self.rows as f64 * ROW_PX,
        )
    }
}

impl Scheduler for TermHost {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id());
        let deadline = Instant::now().checked_add(delay);
        trace!("timer {id:?} armed for {delay:?}");
        self.timers.insert(id, deadline);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

impl Signals for TermHost {
    fn subscribe(&mut self, signal: Signal) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, signal);
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

impl Host for TermHost {
    fn thumb(&mut self) -> Option<&mut dyn ThumbElement> {
        self.thumb
            .as_mut()
            .map(|thumb| thumb as &mut dyn ThumbElement)
    }
}

#[cfg(test)]
mod tests {
    use scrollthumb::{ScrollThumb, ThumbConfig};

    use super::*;

    fn sample_host() -> TermHost {
        let doc = Document::new((0..200).map(|i| i.to_string()).collect());
        let mut host = TermHost::new(doc, (80, 50));
        host.attach_thumb(CellThumb::new(4, 1));
        host
    }

    fn run(thumb: &mut ScrollThumb, host: &mut TermHost, events: Vec<HostEvent>) {
        for event in events {
            thumb.handle(event, host);
        }
    }

    #[test]
    fn test_cells_for() {
        assert_eq!(cells_for(64.0, ROW_PX), 4);
        assert_eq!(cells_for(6.0, COL_PX), 1);
        assert_eq!(cells_for(17.0, ROW_PX), 2);
        assert_eq!(cells_for(0.0, ROW_PX), 1);
    }

    #[test]
    fn test_metrics_in_px() {
        let mut host = sample_host();
        host.scroll_to(10);

        let m = host.metrics();
        assert_eq!(m.scroll_top, 160.0);
        assert_eq!(m.scroll_height, 3200.0);
        assert_eq!(m.viewport_height, 800.0);
    }

    #[test]
    fn test_scroll_signals_only_when_offset_moves() {
        let mut host = sample_host();
        host.subscribe(Signal::Scroll);

        assert!(host.scroll_by(-1).is_empty());
        assert_eq!(host.scroll_by(1), vec![HostEvent::Scroll]);
        assert_eq!(host.scroll_to(1000).len(), 1);
        assert!(host.scroll_by(1).is_empty());
    }

    #[test]
    fn test_thumb_lifecycle_on_terminal_host() {
        let mut host = sample_host();
        let mut thumb = ScrollThumb::new(ThumbConfig::default());
        thumb.mount(&mut host);
        assert_eq!(host.listener_count(), 2);

        let events = host.scroll_to(150);
        run(&mut thumb, &mut host, events);
        assert!(host.has_pending_frames());

        let frames = host.take_frames();
        run(&mut thumb, &mut host, frames);
        assert!(thumb.is_visible());
        // Bottom of the document: 100 - 100 * 64 / 800
        assert!((thumb.percentage() - 92.0).abs() < 1e-9);
        assert_eq!(host.pending_timers(), 1);

        let deadline = host.next_deadline().unwrap();
        let fired = host.due_timers(deadline);
        assert_eq!(fired.len(), 1);
        run(&mut thumb, &mut host, fired);
        assert!(!thumb.is_visible());

        thumb.unmount(&mut host);
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_timers_not_due_stay_pending() {
        let mut host = sample_host();
        let id = host.set_timeout(Duration::from_secs(60));

        assert!(host.due_timers(Instant::now()).is_empty());
        assert_eq!(host.pending_timers(), 1);

        host.clear_timeout(id);
        assert_eq!(host.next_deadline(), None);
    }

    #[test]
    fn test_unrepresentable_timer_never_fires() {
        let mut host = sample_host();
        host.set_timeout(Duration::MAX);

        assert_eq!(host.next_deadline(), None);
        assert_eq!(host.pending_timers(), 1);
    }

    #[test]
    fn test_thumb_fits_short_viewport() {
        let doc = Document::new((0..200).map(|i| i.to_string()).collect());
        let mut host = TermHost::new(doc, (80, 3));
        host.attach_thumb(CellThumb::new(4, 1));

        let element = host.thumb_element().unwrap();
        assert_eq!(element.rows(), 3);
        assert_eq!(element.client_height(), Some(48.0));

        host.resize(80, 50);
        let element = host.thumb_element().unwrap();
        assert_eq!(element.rows(), 4);
        assert_eq!(element.client_height(), Some(64.0));
    }

    #[test]
    fn test_transform_uses_fitted_height() {
        let doc = Document::new((0..200).map(|i| i.to_string()).collect());
        let mut host = TermHost::new(doc, (80, 3));
        host.attach_thumb(CellThumb::new(4, 1));
        let mut thumb = ScrollThumb::new(ThumbConfig::default());
        thumb.mount(&mut host);

        let events = host.resize(80, 3);
        run(&mut thumb, &mut host, events);

        let placement = host.thumb_element().unwrap().placement();
        assert_eq!(
            placement,
            Transform::Translate {
                percent: 0.0,
                minus_px: 48.0,
            }
        );
    }

    #[test]
    fn test_placement_survives_hide() {
        let mut thumb = CellThumb::new(4, 1);
        let shown = Transform::Translate {
            percent: 40.0,
            minus_px: 64.0,
        };
        thumb.set_transform(shown);
        thumb.set_transform(Transform::None);

        assert_eq!(thumb.transform(), Transform::None);
        assert_eq!(thumb.placement(), shown);
    }
}
