use serde::{Deserialize, Serialize};

use crate::core::BoundingBox;

/// Which side of its anchor an annotation label extends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Alignment {
    /// Label starts at the anchor and extends rightwards.
    #[default]
    Left,
    /// Label ends at the anchor and extends leftwards.
    Right,
}

/// One rendered annotation: a wrapper positioned at the sample's pixel
/// coordinates plus its formatted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationNode {
    pub series_name: String,
    pub left_px: f64,
    pub top_px: f64,
    pub content: String,
    pub active: bool,
    pub alignment: Alignment,
    pub width_px: f64,
    pub height_px: f64,
}

impl AnnotationNode {
    #[must_use]
    pub fn new(
        series_name: impl Into<String>,
        left_px: f64,
        top_px: f64,
        content: impl Into<String>,
    ) -> Self {
        Self {
            series_name: series_name.into(),
            left_px,
            top_px,
            content: content.into(),
            active: false,
            alignment: Alignment::Left,
            width_px: 0.0,
            height_px: 0.0,
        }
    }

    /// Box occupied by the content, in the same space as `origin`.
    ///
    /// `origin` is the top-left corner the wrapper offsets are relative to.
    #[must_use]
    pub fn bounding_box(&self, origin_left: f64, origin_top: f64) -> BoundingBox {
        let anchor = origin_left + self.left_px;
        let left = match self.alignment {
            Alignment::Left => anchor,
            Alignment::Right => anchor - self.width_px,
        };
        BoundingBox::new(left, origin_top + self.top_px, self.width_px, self.height_px)
    }
}
