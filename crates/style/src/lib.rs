pub mod font;
pub mod text;
pub mod dimension;
pub mod section;
pub mod cell;
pub mod theme;
pub mod parse;

pub use font::FontStyle;
pub use text::{HAlign, Overflow, VAlign};
pub use dimension::{Margins, Spacing, Width};
pub use section::Section;
pub use cell::{CellStyles, ComputedCellStyle};
pub use theme::{Theme, ThemeStyles};
pub use parse::{StyleError, parse_cell_styles, value_kind};
