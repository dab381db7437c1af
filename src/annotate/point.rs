use crate::core::{Series, StackedPoint};

/// Per-sample record built on every update cycle.
#[derive(Debug, Clone)]
pub struct AnnotationPoint<'a> {
    pub series: &'a Series,
    pub value: StackedPoint,
    pub formatted_y: Option<String>,
    /// 1-based position of the series among the active series.
    pub order: usize,
    pub distance: f64,
}

impl AnnotationPoint<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.series.name
    }

    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value.y.is_some()
    }
}
