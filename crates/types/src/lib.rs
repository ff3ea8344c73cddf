pub mod color;
pub mod geometry;
pub mod ids;

pub use color::{Color, Paint};
pub use geometry::{Rect, Size};
pub use ids::ColumnKey;
