use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::AnnotateResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned box in page pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// One stacked sample as exposed by the host.
///
/// `y` is `None` when the series has no value at this position. `y0` is the
/// baseline contributed by the series stacked below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedPoint {
    pub x: f64,
    pub y: Option<f64>,
    #[serde(default)]
    pub y0: f64,
}

impl StackedPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y: Some(y),
            y0: 0.0,
        }
    }

    #[must_use]
    pub fn empty(x: f64) -> Self {
        Self {
            x,
            y: None,
            y0: 0.0,
        }
    }

    #[must_use]
    pub fn with_y0(mut self, y0: f64) -> Self {
        self.y0 = y0;
        self
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> AnnotateResult<Self> {
        Ok(Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(value, "value")?,
        ))
    }

    /// Top of the stacked column, or `None` when the sample is empty.
    #[must_use]
    pub fn stacked_top(self) -> Option<f64> {
        self.y.map(|y| self.y0 + y)
    }
}
