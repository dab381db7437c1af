use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{AnnotateError, AnnotateResult};

/// Domain to pixel mapping along one viewport axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> AnnotateResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(AnnotateError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps `value` onto `[0, extent_px]`.
    pub fn domain_to_pixel(self, value: f64, extent_px: u32) -> AnnotateResult<f64> {
        if extent_px == 0 {
            return Err(AnnotateError::InvalidData(
                "pixel extent must be > 0".to_owned(),
            ));
        }
        if !value.is_finite() {
            return Err(AnnotateError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * f64::from(extent_px))
    }

    pub fn pixel_to_domain(self, pixel: f64, extent_px: u32) -> AnnotateResult<f64> {
        if extent_px == 0 {
            return Err(AnnotateError::InvalidData(
                "pixel extent must be > 0".to_owned(),
            ));
        }
        if !pixel.is_finite() {
            return Err(AnnotateError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / f64::from(extent_px);
        Ok(self.domain_start + normalized * span)
    }

    /// Horizontal mapping across the full viewport width.
    pub fn x_to_pixel(self, value: f64, viewport: Viewport) -> AnnotateResult<f64> {
        ensure_viewport(viewport)?;
        self.domain_to_pixel(value, viewport.width)
    }

    /// Vertical mapping with the domain start at the bottom edge.
    pub fn y_to_pixel(self, value: f64, viewport: Viewport) -> AnnotateResult<f64> {
        ensure_viewport(viewport)?;
        let from_bottom = self.domain_to_pixel(value, viewport.height)?;
        Ok(f64::from(viewport.height) - from_bottom)
    }
}

/// Display transform a series may apply to its values before plotting.
///
/// The overlay uses `invert` to recover the raw value from the plotted one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ValueScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> AnnotateResult<Self> {
        let all_finite = [domain.0, domain.1, range.0, range.1]
            .iter()
            .all(|value| value.is_finite());
        if !all_finite || domain.0 == domain.1 || range.0 == range.1 {
            return Err(AnnotateError::InvalidData(
                "value scale domain and range must be finite and non-degenerate".to_owned(),
            ));
        }
        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[must_use]
    pub fn invert(self, value: f64) -> f64 {
        let t = (value - self.range.0) / (self.range.1 - self.range.0);
        self.domain.0 + t * (self.domain.1 - self.domain.0)
    }
}

fn ensure_viewport(viewport: Viewport) -> AnnotateResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(AnnotateError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}
