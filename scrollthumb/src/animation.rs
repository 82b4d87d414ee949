//! Opacity fade for hosts that cannot apply CSS transitions themselves.
//!
//! The browser applies `opacity 0.3s ease-in-out` declaratively. A host that
//! draws the thumb itself (the terminal pager) drives a [`Fade`] from the
//! visibility flag and blends the thumb color over the background with
//! [`blend`].

use std::time::Instant;

use crate::transitions::TransitionConfig;
use crate::types::Rgb;

/// Interruptible opacity transition between hidden (0.0) and shown (1.0).
#[derive(Debug, Clone)]
pub struct Fade {
    config: TransitionConfig,
    from: f32,
    to: f32,
    start: Option<Instant>,
    /// When true, transitions complete instantly.
    reduced_motion: bool,
}

impl Fade {
    /// A fade starting fully hidden.
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            from: 0.0,
            to: 0.0,
            start: None,
            reduced_motion: false,
        }
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// Opacity the fade is heading towards.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Retarget the fade. A fade already in flight continues from its
    /// current interpolated value.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        let target = if visible { 1.0 } else { 0.0 };
        if target == self.to {
            return;
        }

        if self.reduced_motion || self.config.duration.is_zero() {
            self.from = target;
            self.to = target;
            self.start = None;
            return;
        }

        self.from = self.value(now);
        self.to = target;
        self.start = Some(now);
    }

    /// Opacity at `now`.
    pub fn value(&self, now: Instant) -> f32 {
        let Some(start) = self.start else {
            return self.to;
        };

        let elapsed = now.duration_since(start);
        let progress = (elapsed.as_secs_f32() / self.config.duration.as_secs_f32()).min(1.0);
        let eased = self.config.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Returns true while the fade still changes over time.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.start
            .is_some_and(|start| now.duration_since(start) < self.config.duration)
    }
}

/// Composite `over` onto `under` at `opacity`, interpolating in OKLCH.
pub fn blend(under: Rgb, over: Rgb, opacity: f32) -> Rgb {
    use palette::{Clamp, IntoColor, Oklch, Srgb};

    let t = opacity.clamp(0.0, 1.0);
    if t <= 0.0 {
        return under;
    }
    if t >= 1.0 {
        return over;
    }

    let (from_l, from_c, from_h) = rgb_to_oklch(under);
    let (to_l, to_c, to_h) = rgb_to_oklch(over);

    let l = from_l + (to_l - from_l) * t;
    let c = from_c + (to_c - from_c) * t;

    // Hue interpolation (shortest path around the circle)
    let mut dh = to_h - from_h;
    if dh > 180.0 {
        dh -= 360.0;
    } else if dh < -180.0 {
        dh += 360.0;
    }
    let h = (from_h + dh * t).rem_euclid(360.0);

    let srgb: Srgb = Oklch::new(l, c, h).into_color();
    let (r, g, b) = srgb.clamp().into_format::<u8>().into_components();
    Rgb::new(r, g, b)
}

fn rgb_to_oklch(rgb: Rgb) -> (f32, f32, f32) {
    use palette::{IntoColor, Oklch, Srgb};

    let srgb = Srgb::new(
        rgb.r as f32 / 255.0,
        rgb.g as f32 / 255.0,
        rgb.b as f32 / 255.0,
    );
    let oklch: Oklch = srgb.into_color();
    (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
}
