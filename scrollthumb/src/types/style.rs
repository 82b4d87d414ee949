use super::{Anchor, Color};
use crate::transitions::TransitionConfig;

/// Gap between the thumb and the viewport edge it is anchored to.
pub const EDGE_INSET_PX: f64 = 3.0;

/// Declarative style of the thumb element. The transform is not part of it;
/// the presentation binding writes that onto the element directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbStyle {
    /// Vertical offset of the thumb's box, as a percentage of the viewport.
    pub top_percent: f64,
    pub anchor: Anchor,
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub z_index: i32,
    pub border_radius: f64,
    /// 1.0 when shown, 0.0 when hidden.
    pub opacity: f32,
    pub transition: TransitionConfig,
}

impl ThumbStyle {
    /// Inline CSS declarations, `position: fixed` against the viewport.
    pub fn to_css(&self) -> String {
        let declarations = [
            "position: fixed".to_string(),
            format!("top: {}%", self.top_percent),
            format!("{}: {}px", self.anchor, EDGE_INSET_PX),
            format!("{}: auto", self.anchor.opposite()),
            format!("width: {}px", self.width),
            format!("height: {}px", self.height),
            format!("background-color: {}", self.background),
            format!("z-index: {}", self.z_index),
            format!("border-radius: {}px", self.border_radius),
            format!("opacity: {}", self.opacity),
            format!("transition: {}", self.transition.to_css("opacity")),
        ];
        declarations.join("; ")
    }
}
