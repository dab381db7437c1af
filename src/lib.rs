//! line-annotate: per-series value annotations for time-series charts.
//!
//! An overlay subscribes to a host chart, turns the active series' stacked
//! samples into formatted labels on every update, and keeps each label inside
//! the chart element by flipping it to the other side of its anchor.

pub mod annotate;
pub mod core;
pub mod error;
pub mod host;
pub mod render;
pub mod telemetry;

pub use annotate::{AnnotateOptions, LineAnnotate};
pub use error::{AnnotateError, AnnotateResult};
pub use host::{Chart, ChartConfig, ChartHost, UpdateObserver};
