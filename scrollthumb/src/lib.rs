//! Scroll-position thumb decoupled from the native scrollbar.
//!
//! A [`ScrollThumb`] tracks the viewport's vertical scroll position, shows on
//! scroll or resize, and hides again after an idle timeout. It talks to its
//! surroundings only through the [`Host`] trait, so the same component runs
//! against a browser-like environment, a terminal, or the in-memory
//! `testing::FakeHost` enabled by the `testing` feature.

pub mod animation;
pub mod binding;
pub mod component;
pub mod config;
pub mod element;
pub mod environment;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod tracker;
pub mod transitions;
pub mod types;

pub use animation::{blend, Fade};
pub use binding::PresentationBinding;
pub use component::ScrollThumb;
pub use config::{ConfigError, PropValue, ThumbConfig, ThumbProps};
pub use element::{ThumbElement, Transform};
pub use environment::{
    FrameId, Host, HostEvent, ListenerId, Scheduler, Signal, Signals, TimerId, Viewport,
    ViewportMetrics,
};
pub use tracker::{scroll_percentage, ScrollTracker};
pub use transitions::{Easing, TransitionConfig};
pub use types::*;
