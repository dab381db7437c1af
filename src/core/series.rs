use std::fmt;
use std::sync::Arc;

use crate::core::{StackedPoint, ValueScale};

/// Formats a (possibly missing) numeric value for display.
pub type ValueFormatterFn = Arc<dyn Fn(Option<f64>) -> Option<String> + Send + Sync + 'static>;

/// Two-decimal rendering used when neither the series nor the overlay
/// supplies a value formatter. Missing values stay missing.
#[must_use]
pub fn default_value_format(value: Option<f64>) -> Option<String> {
    value.map(|value| format!("{value:.2}"))
}

/// One named data line owned by the host chart.
#[derive(Clone)]
pub struct Series {
    pub name: String,
    pub scale: Option<ValueScale>,
    pub y_formatter: Option<ValueFormatterFn>,
    pub disabled: bool,
    pub data: Vec<StackedPoint>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<StackedPoint>) -> Self {
        Self {
            name: name.into(),
            scale: None,
            y_formatter: None,
            disabled: false,
            data,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: ValueScale) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_y_formatter(mut self, formatter: ValueFormatterFn) -> Self {
        self.y_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Maps a plotted value back into the series' own units.
    #[must_use]
    pub fn actual_value(&self, plotted: f64) -> f64 {
        match self.scale {
            Some(scale) => scale.invert(plotted),
            None => plotted,
        }
    }
}

impl fmt::Debug for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("name", &self.name)
            .field("scale", &self.scale)
            .field("y_formatter", &self.y_formatter.is_some())
            .field("disabled", &self.disabled)
            .field("data_len", &self.data.len())
            .finish()
    }
}
