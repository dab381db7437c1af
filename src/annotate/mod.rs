//! Per-series value annotations drawn over a host chart.
//!
//! On each host update the overlay builds one [`AnnotationPoint`] per active
//! series sample, replaces its [`AnnotationNode`]s, and flips labels that
//! overflow the chart element to the other side of their anchor.

mod alignment;
mod frame;
mod metrics;
mod node;
mod options;
mod point;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::{BoundingBox, ValueFormatterFn, Viewport, default_value_format};
use crate::error::AnnotateResult;
use crate::host::{Chart, ChartHost, UpdateObserver};
use crate::render::RenderFrame;

pub use alignment::{correct_alignment, layout_error};
pub use frame::AnnotationStyle;
pub use metrics::{LabelMetrics, LabelSize, MonospaceLabelMetrics};
pub use node::{Alignment, AnnotationNode};
pub use options::{
    AnnotateOptions, DEFAULT_OVERLAY_ID, RenderCallbackFn, TextFormatterFn, VisibilityCallbackFn,
    default_text_format,
};
pub use point::AnnotationPoint;

/// Annotation overlay bound to a host chart.
pub struct LineAnnotate {
    id: String,
    formatter: TextFormatterFn,
    y_formatter: ValueFormatterFn,
    on_show: Option<VisibilityCallbackFn>,
    on_hide: Option<VisibilityCallbackFn>,
    on_render: Option<RenderCallbackFn>,
    metrics: Box<dyn LabelMetrics>,
    style: AnnotationStyle,
    visible: bool,
    inactive: bool,
    offset_left_px: f64,
    container: BoundingBox,
    nodes: Vec<AnnotationNode>,
}

impl LineAnnotate {
    /// Creates a detached overlay; callers drive [`LineAnnotate::update`] themselves.
    #[must_use]
    pub fn new(options: AnnotateOptions) -> Self {
        Self {
            id: options.id,
            formatter: options
                .formatter
                .unwrap_or_else(|| Arc::new(default_text_format) as TextFormatterFn),
            y_formatter: options
                .y_formatter
                .unwrap_or_else(|| Arc::new(default_value_format) as ValueFormatterFn),
            on_show: options.on_show,
            on_hide: options.on_hide,
            on_render: options.on_render,
            metrics: Box::new(MonospaceLabelMetrics::default()),
            style: AnnotationStyle::default(),
            visible: true,
            inactive: false,
            offset_left_px: 0.0,
            container: BoundingBox::new(0.0, 0.0, 0.0, 0.0),
            nodes: Vec::new(),
        }
    }

    /// Creates an overlay and subscribes it to `chart` update notifications.
    pub fn attach(
        chart: &mut Chart,
        options: AnnotateOptions,
    ) -> AnnotateResult<Rc<RefCell<Self>>> {
        let overlay = Rc::new(RefCell::new(Self::new(options)));
        chart.register_observer(overlay.clone())?;
        debug!(id = overlay.borrow().id(), "line annotation attached");
        Ok(overlay)
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Box<dyn LabelMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn set_metrics(&mut self, metrics: Box<dyn LabelMetrics>) {
        self.metrics = metrics;
    }

    /// Validates and installs fixed-advance metrics, e.g. loaded from JSON.
    pub fn set_monospace_metrics(&mut self, metrics: MonospaceLabelMetrics) -> AnnotateResult<()> {
        self.metrics = Box::new(metrics.validate()?);
        Ok(())
    }

    pub fn set_style(&mut self, style: AnnotationStyle) {
        self.style = style;
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Mirrors the container's `inactive` state class.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.inactive
    }

    #[must_use]
    pub fn offset_left_px(&self) -> f64 {
        self.offset_left_px
    }

    #[must_use]
    pub fn nodes(&self) -> &[AnnotationNode] {
        &self.nodes
    }

    /// Rebuilds points from the host's active series and renders them when visible.
    pub fn update(&mut self, host: &dyn ChartHost) {
        let active = host.active_series();
        let stacked = host.stacked_data();
        let mut points = Vec::new();

        for (index, series) in active.iter().copied().enumerate() {
            let order = index + 1;
            let Some(data) = stacked.get(index) else {
                warn!(
                    series = %series.name,
                    "no stacked data aligned with active series"
                );
                continue;
            };

            let y_formatter = series.y_formatter.as_ref().unwrap_or(&self.y_formatter);
            for value in data {
                let plotted = value.y.map(|y| series.actual_value(y));
                points.push(AnnotationPoint {
                    series,
                    value: *value,
                    formatted_y: y_formatter(plotted),
                    order,
                    distance: 0.0,
                });
            }
        }

        self.nodes.clear();
        self.offset_left_px = 0.0;
        trace!(points = points.len(), visible = self.visible, "line annotation update");

        if self.visible {
            self.render(host, &points);
        }
    }

    /// Replaces nodes with one per valued point, shows the overlay, then
    /// corrects alignment.
    pub fn render(&mut self, host: &dyn ChartHost, points: &[AnnotationPoint<'_>]) {
        self.nodes.clear();
        self.container = host.element_bounds();

        for point in points {
            let Some(y) = point.value.y else {
                continue;
            };

            let position = host
                .x(point.value.x)
                .and_then(|left| host.y(point.value.y0 + y).map(|top| (left, top)));
            let (left_px, top_px) = match position {
                Ok(position) => position,
                Err(err) => {
                    warn!(
                        series = %point.series.name,
                        error = %err,
                        "skipping annotation with unmappable coordinates"
                    );
                    continue;
                }
            };

            let actual_y = point.series.actual_value(y);
            let content = (self.formatter)(
                point.series,
                point.value.x,
                actual_y,
                point.formatted_y.as_deref(),
                point,
            );

            let size = self.metrics.measure(&content);
            let mut node =
                AnnotationNode::new(point.series.name.as_str(), left_px, top_px, content);
            node.width_px = size.width;
            node.height_px = size.height;
            node.active = true;
            node.alignment = Alignment::Left;
            self.nodes.push(node);
        }

        self.show();
        self.correct_alignment();

        debug!(nodes = self.nodes.len(), "line annotation rendered");
        if let Some(on_render) = &self.on_render {
            on_render(points);
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.inactive = false;
        if let Some(on_show) = &self.on_show {
            on_show();
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.inactive = true;
        if let Some(on_hide) = &self.on_hide {
            on_hide();
        }
    }

    /// Exports nodes as element-local draw commands. Hidden overlays export
    /// an empty frame.
    #[must_use]
    pub fn build_render_frame(&self, viewport: Viewport) -> RenderFrame {
        if !self.visible {
            return RenderFrame::new(viewport);
        }
        frame::nodes_to_frame(&self.nodes, viewport, self.style)
    }

    fn correct_alignment(&mut self) {
        let parent = self.container;
        let origin = (parent.left + self.offset_left_px, parent.top);
        for node in &mut self.nodes {
            correct_alignment(node, parent, origin);
        }
        trace!(
            right_aligned = self
                .nodes
                .iter()
                .filter(|node| node.alignment == Alignment::Right)
                .count(),
            "line annotation alignment corrected"
        );
    }
}

impl UpdateObserver for LineAnnotate {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_update(&mut self, host: &dyn ChartHost) {
        self.update(host);
    }
}
