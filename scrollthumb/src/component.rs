use crate::binding::PresentationBinding;
use crate::config::{ThumbConfig, ThumbProps};
use crate::environment::{Host, HostEvent};
use crate::tracker::ScrollTracker;
use crate::transitions::TransitionConfig;
use crate::types::ThumbStyle;

/// A scroll thumb: configuration, tracker and binding for one mounted
/// instance.
#[derive(Debug)]
pub struct ScrollThumb {
    config: ThumbConfig,
    tracker: ScrollTracker,
    binding: PresentationBinding,
}

impl ScrollThumb {
    pub fn new(config: ThumbConfig) -> Self {
        let tracker = ScrollTracker::new(config.hide_after());
        Self {
            config,
            tracker,
            binding: PresentationBinding::new(),
        }
    }

    /// Build from raw props, degrading malformed values.
    pub fn from_props(props: &ThumbProps) -> Self {
        Self::new(ThumbConfig::from_props(props))
    }

    pub fn config(&self) -> &ThumbConfig {
        &self.config
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn percentage(&self) -> f64 {
        self.tracker.percentage()
    }

    pub fn is_visible(&self) -> bool {
        self.tracker.is_visible()
    }

    pub fn is_mounted(&self) -> bool {
        self.tracker.is_mounted()
    }

    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.tracker.mount(host);
        self.sync(host);
    }

    /// Deliver one host event. Returns true if the percentage or the
    /// visibility changed.
    pub fn handle<H: Host + ?Sized>(&mut self, event: HostEvent, host: &mut H) -> bool {
        let changed = self.tracker.handle(event, host);
        if self.tracker.is_mounted() {
            self.sync(host);
        }
        changed
    }

    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.tracker.unmount(host);
        self.binding.reset();
    }

    /// Current declarative style. `None` when the position is invalid, in
    /// which case nothing is rendered.
    pub fn style(&self) -> Option<ThumbStyle> {
        let anchor = self.config.position?;
        Some(ThumbStyle {
            top_percent: self.tracker.percentage(),
            anchor,
            width: self.config.width,
            height: self.config.height,
            background: self.config.color.clone(),
            z_index: self.config.z_index,
            border_radius: self.config.border_radius,
            opacity: if self.tracker.is_visible() { 1.0 } else { 0.0 },
            transition: TransitionConfig::opacity_fade(),
        })
    }

    /// Markup for the thumb element.
    pub fn render(&self) -> Option<String> {
        self.style()
            .map(|style| format!("<div style=\"{}\"></div>", style.to_css()))
    }

    fn sync<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.binding.apply(
            self.tracker.percentage(),
            self.tracker.is_visible(),
            host.thumb(),
        );
    }
}
