use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::render::{Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::node::{Alignment, AnnotationNode};

/// Visual style applied when annotation nodes are exported as a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    pub font_size_px: f64,
    pub horizontal_padding_px: f64,
    pub text_color: Color,
    pub background_color: Color,
    pub border_color: Color,
    pub border_width_px: f64,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            horizontal_padding_px: 6.0,
            text_color: Color::rgb(1.0, 1.0, 1.0),
            background_color: Color::rgba(0.0, 0.0, 0.0, 0.8),
            border_color: Color::rgba(1.0, 1.0, 1.0, 0.6),
            border_width_px: 1.0,
        }
    }
}

/// Converts nodes into element-local draw commands: one box and one label
/// per node. Nodes with empty content are skipped.
pub(super) fn nodes_to_frame(
    nodes: &[AnnotationNode],
    viewport: Viewport,
    style: AnnotationStyle,
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);
    for node in nodes.iter().filter(|node| !node.content.is_empty()) {
        let bounds = node.bounding_box(0.0, 0.0);
        frame = frame.with_rect(
            RectPrimitive::new(
                bounds.left,
                bounds.top,
                bounds.width,
                bounds.height,
                style.background_color,
            )
            .with_border(style.border_width_px, style.border_color),
        );

        let (x, h_align) = match node.alignment {
            Alignment::Left => (node.left_px + style.horizontal_padding_px, TextHAlign::Left),
            Alignment::Right => (node.left_px - style.horizontal_padding_px, TextHAlign::Right),
        };
        frame = frame.with_text(TextPrimitive::new(
            node.content.clone(),
            x,
            node.top_px,
            style.font_size_px,
            style.text_color,
            h_align,
        ));
    }
    frame
}
