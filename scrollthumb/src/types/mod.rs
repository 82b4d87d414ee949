mod color;
mod enums;
mod style;

pub use color::{Color, Rgb};
pub use enums::Anchor;
pub use style::{ThumbStyle, EDGE_INSET_PX};
