pub mod primitives;
pub mod scale;
pub mod series;
pub mod types;

pub use scale::{LinearScale, ValueScale};
pub use series::{Series, ValueFormatterFn, default_value_format};
pub use types::{BoundingBox, StackedPoint, Viewport};
