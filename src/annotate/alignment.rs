use crate::core::BoundingBox;

use super::node::{Alignment, AnnotationNode};

/// Pixels by which `rect` extends past the left and right edges of `parent`.
///
/// Returns `None` for zero-width boxes, which cannot be measured.
#[must_use]
pub fn layout_error(rect: BoundingBox, parent: BoundingBox) -> Option<f64> {
    if rect.width == 0.0 {
        return None;
    }

    let mut error = 0.0;
    if rect.right() > parent.right() {
        error += rect.right() - parent.right();
    }
    if rect.left < parent.left {
        error += parent.left - rect.left;
    }
    Some(error)
}

/// Switches an overflowing left-aligned node to right alignment unless that
/// makes the overflow worse.
///
/// Runs a single pass: after reverting to left the node is not re-measured,
/// so it may still overflow.
pub fn correct_alignment(node: &mut AnnotationNode, parent: BoundingBox, origin: (f64, f64)) {
    let measure =
        |node: &AnnotationNode| layout_error(node.bounding_box(origin.0, origin.1), parent);

    let Some(left_error) = measure(node) else {
        return;
    };
    if left_error <= 0.0 {
        return;
    }

    node.alignment = Alignment::Right;
    if let Some(right_error) = measure(node) {
        if right_error > left_error {
            node.alignment = Alignment::Left;
        }
    }
}
