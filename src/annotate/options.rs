use std::fmt;
use std::sync::Arc;

use crate::core::{Series, ValueFormatterFn};

use super::point::AnnotationPoint;

/// Builds a label's content from
/// `(series, x, actual_y, formatted_y, point)`.
pub type TextFormatterFn = Arc<
    dyn Fn(&Series, f64, f64, Option<&str>, &AnnotationPoint<'_>) -> String
        + Send
        + Sync
        + 'static,
>;

pub type VisibilityCallbackFn = Arc<dyn Fn() + Send + Sync + 'static>;

pub type RenderCallbackFn = Arc<dyn Fn(&[AnnotationPoint<'_>]) + Send + Sync + 'static>;

/// Default content: series name, a non-breaking space, then the value.
#[must_use]
pub fn default_text_format(
    series: &Series,
    _x: f64,
    _y: f64,
    formatted_y: Option<&str>,
    _point: &AnnotationPoint<'_>,
) -> String {
    format!("{}:\u{a0}{}", series.name, formatted_y.unwrap_or_default())
}

pub const DEFAULT_OVERLAY_ID: &str = "line-annotate";

/// Construction-time overrides for an overlay.
#[derive(Clone)]
pub struct AnnotateOptions {
    pub id: String,
    pub formatter: Option<TextFormatterFn>,
    pub y_formatter: Option<ValueFormatterFn>,
    pub on_show: Option<VisibilityCallbackFn>,
    pub on_hide: Option<VisibilityCallbackFn>,
    pub on_render: Option<RenderCallbackFn>,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            id: DEFAULT_OVERLAY_ID.to_owned(),
            formatter: None,
            y_formatter: None,
            on_show: None,
            on_hide: None,
            on_render: None,
        }
    }
}

impl AnnotateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer id used when registering with a host.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: TextFormatterFn) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_y_formatter(mut self, formatter: ValueFormatterFn) -> Self {
        self.y_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_on_show(mut self, callback: VisibilityCallbackFn) -> Self {
        self.on_show = Some(callback);
        self
    }

    #[must_use]
    pub fn with_on_hide(mut self, callback: VisibilityCallbackFn) -> Self {
        self.on_hide = Some(callback);
        self
    }

    #[must_use]
    pub fn with_on_render(mut self, callback: RenderCallbackFn) -> Self {
        self.on_render = Some(callback);
        self
    }
}

impl fmt::Debug for AnnotateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotateOptions")
            .field("id", &self.id)
            .field("formatter", &self.formatter.is_some())
            .field("y_formatter", &self.y_formatter.is_some())
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("on_render", &self.on_render.is_some())
            .finish()
    }
}
