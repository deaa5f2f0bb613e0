//! Visibility classification of layout slots.

use scrollkit_core::{Corners, Rect};

/// Whether a slot rectangle is on screen.
///
/// Uses the standard axis-aligned overlap test; a slot that only touches the
/// viewport edge is visible.
#[inline]
pub fn is_visible(viewport: &Rect, slot: &Rect) -> bool {
    viewport.overlaps(slot)
}

/// Classifies slots against a viewport, with an optional look-ahead margin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisibilityClassifier {
    margin: f32,
}

impl VisibilityClassifier {
    /// A classifier with no look-ahead margin.
    pub fn new() -> Self {
        Self::default()
    }

    /// A classifier that treats slots within `margin` of the viewport as
    /// visible.
    pub fn with_margin(margin: f32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Classify a slot from its world-space corners.
    ///
    /// A slot the host has not laid out yet (`None`) is not visible.
    pub fn classify(&self, viewport: &Rect, slot: Option<&Corners>) -> bool {
        let Some(corners) = slot else {
            return false;
        };
        let slot = Rect::from_corners(corners);
        if self.margin > 0.0 {
            is_visible(&viewport.inflate(self.margin), &slot)
        } else {
            is_visible(viewport, &slot)
        }
    }
}
