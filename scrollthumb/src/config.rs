//! Thumb configuration and the raw prop bag it is built from.

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Anchor, Color};

/// Idle seconds before the thumb hides.
pub const DEFAULT_HIDE_SECS: f64 = 2.0;
pub const DEFAULT_WIDTH_PX: f64 = 6.0;
pub const DEFAULT_HEIGHT_PX: f64 = 64.0;
pub const DEFAULT_Z_INDEX: i32 = 50;
pub const DEFAULT_BORDER_RADIUS_PX: f64 = 2.0;

/// Errors produced while validating thumb props.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid position '{0}', expected 'left' or 'right'")]
    InvalidPosition(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("invalid {name} '{value}', expected a positive length")]
    InvalidDimension { name: &'static str, value: String },

    #[error("invalid z-index '{0}'")]
    InvalidZIndex(String),

    #[error("invalid hide time '{0}', expected a positive number of seconds")]
    InvalidHideTime(String),
}

/// A prop given either as a number (`6`) or a string (`"6px"`, `"3"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
}

impl PropValue {
    /// Numeric value, accepting an optional `px` suffix on strings.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            PropValue::Number(n) => *n,
            PropValue::Text(s) => {
                let s = s.trim();
                s.strip_suffix("px").unwrap_or(s).trim().parse().ok()?
            }
        };
        value.is_finite().then_some(value)
    }

    fn describe(&self) -> String {
        match self {
            PropValue::Number(n) => n.to_string(),
            PropValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

/// Unvalidated thumb props, as a host or a JSON file supplies them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThumbProps {
    pub color: Option<String>,
    pub width: Option<PropValue>,
    pub height: Option<PropValue>,
    pub position: Option<String>,
    pub z_index: Option<PropValue>,
    pub border_radius: Option<PropValue>,
    #[serde(alias = "hideTime")]
    pub hidetime: Option<PropValue>,
}

/// Validated thumb configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbConfig {
    pub color: Color,
    /// Width in px.
    pub width: f64,
    /// Height in px.
    pub height: f64,
    /// `None` means the position prop was invalid and nothing is rendered.
    pub position: Option<Anchor>,
    pub z_index: i32,
    /// Corner radius in px.
    pub border_radius: f64,
    /// Idle timeout in seconds.
    pub hidetime: f64,
}

impl Default for ThumbConfig {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: DEFAULT_WIDTH_PX,
            height: DEFAULT_HEIGHT_PX,
            position: Some(Anchor::Left),
            z_index: DEFAULT_Z_INDEX,
            border_radius: DEFAULT_BORDER_RADIUS_PX,
            hidetime: DEFAULT_HIDE_SECS,
        }
    }
}

impl ThumbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn width(mut self, px: f64) -> Self {
        self.width = px;
        self
    }

    pub fn height(mut self, px: f64) -> Self {
        self.height = px;
        self
    }

    pub fn position(mut self, anchor: Anchor) -> Self {
        self.position = Some(anchor);
        self
    }

    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    pub fn border_radius(mut self, px: f64) -> Self {
        self.border_radius = px;
        self
    }

    pub fn hidetime(mut self, seconds: f64) -> Self {
        self.hidetime = seconds;
        self
    }

    /// Idle timeout as a duration. Values too large to represent never hide.
    pub fn hide_after(&self) -> Duration {
        if !(self.hidetime.is_finite() && self.hidetime > 0.0) {
            return Duration::from_secs_f64(DEFAULT_HIDE_SECS);
        }
        Duration::try_from_secs_f64(self.hidetime).unwrap_or(Duration::MAX)
    }

    /// Build a config, rejecting any malformed prop.
    pub fn try_from_props(props: &ThumbProps) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let color = match &props.color {
            Some(s) => s.parse()?,
            None => defaults.color,
        };
        let position = match &props.position {
            Some(s) => Some(s.parse()?),
            None => defaults.position,
        };

        Ok(Self {
            color,
            width: length(props.width.as_ref(), "width", false)?.unwrap_or(defaults.width),
            height: length(props.height.as_ref(), "height", false)?.unwrap_or(defaults.height),
            position,
            z_index: z_index(props.z_index.as_ref())?.unwrap_or(defaults.z_index),
            border_radius: length(props.border_radius.as_ref(), "border radius", true)?
                .unwrap_or(defaults.border_radius),
            hidetime: hidetime(props.hidetime.as_ref())?.unwrap_or(defaults.hidetime),
        })
    }

    /// Build a config, degrading each malformed prop to its default. A
    /// malformed position leaves `position` unset so nothing is rendered.
    pub fn from_props(props: &ThumbProps) -> Self {
        let defaults = Self::default();

        let color = match props.color.as_deref().map(str::parse::<Color>) {
            Some(Ok(color)) => color,
            Some(Err(e)) => {
                warn!("{e}, using {}", defaults.color);
                defaults.color
            }
            None => defaults.color,
        };
        let position = match props.position.as_deref().map(str::parse::<Anchor>) {
            Some(Ok(anchor)) => Some(anchor),
            Some(Err(e)) => {
                warn!("{e}, thumb will not be rendered");
                None
            }
            None => defaults.position,
        };

        Self {
            color,
            width: lenient(length(props.width.as_ref(), "width", false), defaults.width),
            height: lenient(length(props.height.as_ref(), "height", false), defaults.height),
            position,
            z_index: lenient(z_index(props.z_index.as_ref()), defaults.z_index),
            border_radius: lenient(
                length(props.border_radius.as_ref(), "border radius", true),
                defaults.border_radius,
            ),
            hidetime: lenient(hidetime(props.hidetime.as_ref()), defaults.hidetime),
        }
    }
}

fn lenient<T: std::fmt::Display + Copy>(parsed: Result<Option<T>, ConfigError>, default: T) -> T {
    match parsed {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            warn!("{e}, using {default}");
            default
        }
    }
}

fn length(
    value: Option<&PropValue>,
    name: &'static str,
    allow_zero: bool,
) -> Result<Option<f64>, ConfigError> {
    let Some(value) = value else { return Ok(None) };
    match value.as_number() {
        Some(px) if px > 0.0 || (allow_zero && px == 0.0) => Ok(Some(px)),
        _ => Err(ConfigError::InvalidDimension {
            name,
            value: value.describe(),
        }),
    }
}

fn z_index(value: Option<&PropValue>) -> Result<Option<i32>, ConfigError> {
    let Some(value) = value else { return Ok(None) };
    match value.as_number() {
        Some(z) if z.fract() == 0.0 && z >= i32::MIN as f64 && z <= i32::MAX as f64 => {
            Ok(Some(z as i32))
        }
        _ => Err(ConfigError::InvalidZIndex(value.describe())),
    }
}

fn hidetime(value: Option<&PropValue>) -> Result<Option<f64>, ConfigError> {
    let Some(value) = value else { return Ok(None) };
    match value.as_number() {
        Some(secs) if secs > 0.0 => Ok(Some(secs)),
        _ => Err(ConfigError::InvalidHideTime(value.describe())),
    }
}
