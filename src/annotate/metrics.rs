use serde::{Deserialize, Serialize};

use crate::error::{AnnotateError, AnnotateResult};

/// Measured size of a label's content box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

/// Text measurement used for alignment correction.
pub trait LabelMetrics {
    fn measure(&self, text: &str) -> LabelSize;
}

/// Fixed-advance estimate. Empty text measures zero width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonospaceLabelMetrics {
    pub char_width_px: f64,
    pub horizontal_padding_px: f64,
    pub height_px: f64,
}

impl Default for MonospaceLabelMetrics {
    fn default() -> Self {
        Self {
            char_width_px: 7.0,
            horizontal_padding_px: 6.0,
            height_px: 14.0,
        }
    }
}

impl MonospaceLabelMetrics {
    pub fn validate(self) -> AnnotateResult<Self> {
        for (value, name) in [
            (self.char_width_px, "char_width_px"),
            (self.height_px, "height_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnnotateError::InvalidData(format!(
                    "label metrics `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.horizontal_padding_px.is_finite() || self.horizontal_padding_px < 0.0 {
            return Err(AnnotateError::InvalidData(
                "label metrics `horizontal_padding_px` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

impl LabelMetrics for MonospaceLabelMetrics {
    fn measure(&self, text: &str) -> LabelSize {
        let chars = text.chars().count();
        if chars == 0 {
            return LabelSize::default();
        }
        LabelSize {
            width: chars as f64 * self.char_width_px + 2.0 * self.horizontal_padding_px,
            height: self.height_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelMetrics, MonospaceLabelMetrics};

    #[test]
    fn width_counts_chars_not_bytes() {
        let metrics = MonospaceLabelMetrics::default();
        let size = metrics.measure("cpu:\u{a0}1.00");
        assert_eq!(size.width, 9.0 * 7.0 + 12.0);
        assert_eq!(size.height, 14.0);
    }

    #[test]
    fn empty_text_has_no_box() {
        assert_eq!(MonospaceLabelMetrics::default().measure("").width, 0.0);
    }

    #[test]
    fn negative_padding_is_rejected() {
        let metrics = MonospaceLabelMetrics {
            horizontal_padding_px: -1.0,
            ..MonospaceLabelMetrics::default()
        };
        assert!(metrics.validate().is_err());
    }
}
