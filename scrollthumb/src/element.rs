use std::fmt;

/// The rendered thumb element, as far as the binding needs it.
pub trait ThumbElement {
    /// Post-layout height in px. `None` while the element has no layout.
    fn client_height(&self) -> Option<f64>;

    fn set_transform(&mut self, transform: Transform);
}

/// Transform written onto the thumb element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transform {
    /// Identity.
    #[default]
    None,
    /// Vertical translation by `percent`% of the element's own height minus
    /// `minus_px` px.
    Translate { percent: f64, minus_px: f64 },
}

impl Transform {
    /// Vertical offset in px for an element `own_height` px tall.
    pub fn offset_px(&self, own_height: f64) -> f64 {
        match self {
            Transform::None => 0.0,
            Transform::Translate { percent, minus_px } => percent / 100.0 * own_height - minus_px,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Transform::None)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::None => f.write_str("none"),
            Transform::Translate { percent, minus_px } => {
                write!(f, "matrix(1, 0, 0, 1, 0, calc({percent}% - {minus_px}px))")
            }
        }
    }
}
