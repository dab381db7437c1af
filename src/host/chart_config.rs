use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{AnnotateError, AnnotateResult};

/// Bootstrap configuration for the in-memory [`Chart`](super::Chart) host.
///
/// Serializable so demos and tests can keep chart setups as JSON fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub element_left: f64,
    #[serde(default)]
    pub element_top: f64,
    pub x_start: f64,
    pub x_end: f64,
    #[serde(default = "default_y_min")]
    pub y_min: f64,
    #[serde(default = "default_y_max")]
    pub y_max: f64,
}

impl ChartConfig {
    /// Creates a config with a unit y domain and the element at the page origin.
    #[must_use]
    pub fn new(viewport: Viewport, x_start: f64, x_end: f64) -> Self {
        Self {
            viewport,
            element_left: 0.0,
            element_top: 0.0,
            x_start,
            x_end,
            y_min: default_y_min(),
            y_max: default_y_max(),
        }
    }

    #[must_use]
    pub fn with_y_domain(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_min = y_min;
        self.y_max = y_max;
        self
    }

    /// Sets where the root element sits on the page.
    #[must_use]
    pub fn with_element_origin(mut self, left: f64, top: f64) -> Self {
        self.element_left = left;
        self.element_top = top;
        self
    }

    pub fn to_json_pretty(self) -> AnnotateResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| AnnotateError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> AnnotateResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| AnnotateError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_y_min() -> f64 {
    0.0
}

fn default_y_max() -> f64 {
    1.0
}
