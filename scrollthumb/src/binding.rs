use log::trace;

use crate::element::{ThumbElement, Transform};

/// Writes tracker state onto the thumb element as a transform.
///
/// Writes happen only when the percentage or visibility differ from the last
/// successful write. With no element bound nothing is written and the next
/// apply tries again.
#[derive(Debug, Clone, Default)]
pub struct PresentationBinding {
    applied: Option<(f64, bool)>,
}

impl PresentationBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the transform written, if a write happened.
    pub fn apply(
        &mut self,
        percentage: f64,
        visible: bool,
        element: Option<&mut dyn ThumbElement>,
    ) -> Option<Transform> {
        let Some(element) = element else {
            trace!("thumb element not attached, skipping transform");
            return None;
        };

        if self.applied == Some((percentage, visible)) {
            return None;
        }

        let transform = if visible {
            Transform::Translate {
                percent: percentage,
                minus_px: element.client_height().unwrap_or(0.0),
            }
        } else {
            Transform::None
        };

        element.set_transform(transform);
        self.applied = Some((percentage, visible));
        trace!("thumb transform: {transform}");
        Some(transform)
    }

    /// Forget the last write so the next apply always writes.
    pub fn reset(&mut self) {
        self.applied = None;
    }
}
