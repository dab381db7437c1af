use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{BoundingBox, LinearScale, Series, StackedPoint, Viewport};
use crate::error::{AnnotateError, AnnotateResult};

use super::{ChartConfig, ChartHost, SharedObserver};

/// Minimal in-memory chart host.
///
/// Holds series in insertion order, stacks active series on `update`, and
/// notifies registered observers serially afterwards.
pub struct Chart {
    viewport: Viewport,
    element_left: f64,
    element_top: f64,
    x_scale: LinearScale,
    y_scale: LinearScale,
    series: IndexMap<String, Series>,
    stacked: Vec<Vec<StackedPoint>>,
    observers: Vec<SharedObserver>,
}

impl Chart {
    pub fn new(config: ChartConfig) -> AnnotateResult<Self> {
        if !config.viewport.is_valid() {
            return Err(AnnotateError::InvalidViewport {
                width: config.viewport.width,
                height: config.viewport.height,
            });
        }
        if !config.element_left.is_finite() || !config.element_top.is_finite() {
            return Err(AnnotateError::InvalidData(
                "element origin must be finite".to_owned(),
            ));
        }

        Ok(Self {
            viewport: config.viewport,
            element_left: config.element_left,
            element_top: config.element_top,
            x_scale: LinearScale::new(config.x_start, config.x_end)?,
            y_scale: LinearScale::new(config.y_min, config.y_max)?,
            series: IndexMap::new(),
            stacked: Vec::new(),
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> AnnotateResult<()> {
        if !viewport.is_valid() {
            return Err(AnnotateError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn set_x_domain(&mut self, start: f64, end: f64) -> AnnotateResult<()> {
        self.x_scale = LinearScale::new(start, end)?;
        Ok(())
    }

    pub fn set_y_domain(&mut self, min: f64, max: f64) -> AnnotateResult<()> {
        self.y_scale = LinearScale::new(min, max)?;
        Ok(())
    }

    /// Appends a series. Names must be non-empty and unique.
    pub fn add_series(&mut self, series: Series) -> AnnotateResult<()> {
        if series.name.is_empty() {
            return Err(AnnotateError::InvalidData(
                "series name must not be empty".to_owned(),
            ));
        }
        if self.series.contains_key(&series.name) {
            return Err(AnnotateError::InvalidData(format!(
                "series `{}` is already registered",
                series.name
            )));
        }
        self.series.insert(series.name.clone(), series);
        Ok(())
    }

    /// Removes a series by name. Returns `true` when removed.
    pub fn remove_series(&mut self, name: &str) -> bool {
        self.series.shift_remove(name).is_some()
    }

    pub fn set_series_data(&mut self, name: &str, data: Vec<StackedPoint>) -> AnnotateResult<()> {
        self.series_mut(name)?.data = data;
        Ok(())
    }

    pub fn set_series_disabled(&mut self, name: &str, disabled: bool) -> AnnotateResult<()> {
        self.series_mut(name)?.disabled = disabled;
        Ok(())
    }

    #[must_use]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Subscribes an observer to update notifications.
    pub fn register_observer(&mut self, observer: SharedObserver) -> AnnotateResult<()> {
        let observer_id = observer.borrow().id().to_owned();
        if observer_id.is_empty() {
            return Err(AnnotateError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self
            .observers
            .iter()
            .any(|entry| entry.borrow().id() == observer_id)
        {
            return Err(AnnotateError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unsubscribes an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.borrow().id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.borrow().id() == observer_id)
    }

    /// Restacks active series and notifies every observer in registration order.
    pub fn update(&mut self) {
        self.restack();
        debug!(
            active_series = self.stacked.len(),
            observers = self.observers.len(),
            "chart update"
        );

        let host: &Self = self;
        for observer in &host.observers {
            match observer.try_borrow_mut() {
                Ok(mut observer) => observer.on_update(host),
                Err(_) => warn!("skipping observer already borrowed during chart update"),
            }
        }
    }

    fn series_mut(&mut self, name: &str) -> AnnotateResult<&mut Series> {
        self.series
            .get_mut(name)
            .ok_or_else(|| AnnotateError::InvalidData(format!("unknown series `{name}`")))
    }

    fn restack(&mut self) {
        let mut baseline: Vec<f64> = Vec::new();
        let mut stacked = Vec::with_capacity(self.series.len());

        for series in self.series.values().filter(|series| !series.disabled) {
            if baseline.len() < series.data.len() {
                baseline.resize(series.data.len(), 0.0);
            }
            let layer: Vec<StackedPoint> = series
                .data
                .iter()
                .zip(baseline.iter_mut())
                .map(|(point, base)| {
                    let y0 = *base;
                    *base += point.y.unwrap_or(0.0);
                    StackedPoint {
                        x: point.x,
                        y: point.y,
                        y0,
                    }
                })
                .collect();
            stacked.push(layer);
        }

        self.stacked = stacked;
    }
}

impl ChartHost for Chart {
    fn x(&self, value: f64) -> AnnotateResult<f64> {
        self.x_scale.x_to_pixel(value, self.viewport)
    }

    fn y(&self, value: f64) -> AnnotateResult<f64> {
        self.y_scale.y_to_pixel(value, self.viewport)
    }

    fn active_series(&self) -> Vec<&Series> {
        self.series
            .values()
            .filter(|series| !series.disabled)
            .collect()
    }

    fn stacked_data(&self) -> &[Vec<StackedPoint>] {
        &self.stacked
    }

    fn element_bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.element_left,
            self.element_top,
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )
    }
}
