//! Host-chart contract consumed by the overlay, plus a headless in-memory host.

mod chart;
mod chart_config;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{BoundingBox, Series, StackedPoint};
use crate::error::AnnotateResult;

pub use chart::Chart;
pub use chart_config::ChartConfig;

/// Read-only view of the chart an overlay is attached to.
///
/// `stacked_data()[i]` holds the samples of `active_series()[i]`.
pub trait ChartHost {
    /// Maps a logical x value to a pixel offset inside the root element.
    fn x(&self, value: f64) -> AnnotateResult<f64>;
    /// Maps a logical y value to a pixel offset inside the root element.
    fn y(&self, value: f64) -> AnnotateResult<f64>;
    fn active_series(&self) -> Vec<&Series>;
    fn stacked_data(&self) -> &[Vec<StackedPoint>];
    /// Page-space box of the root element overlays attach to.
    fn element_bounds(&self) -> BoundingBox;
}

/// Subscriber notified after every host update.
pub trait UpdateObserver {
    fn id(&self) -> &str;
    fn on_update(&mut self, host: &dyn ChartHost);
}

pub type SharedObserver = Rc<RefCell<dyn UpdateObserver>>;
