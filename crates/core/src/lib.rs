//! # autotable-core
//!
//! Layered table options for PDF table drawing.
//!
//! Options are given at three scopes, each a [`TableOptions`] layer:
//! - **global**: a [`GlobalDefaults`] value shared by documents
//! - **document**: the defaults of one [`Document`]
//! - **call**: the options passed when drawing one table
//!
//! [`resolve`] merges them into an [`EffectiveConfiguration`], call first,
//! with style maps merged property by property. A [`TableEngine`] draws
//! the table and calls back into caller code through the hook traits in
//! [`hooks`].

pub mod content;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod options;
pub mod parse;
pub mod resolve;

// Re-export the foundation crates
pub use autotable_style as style;
pub use autotable_types as types;

pub use content::{CellInput, ColumnInput, MAX_SPAN, RowInput};
pub use defaults::{Document, GlobalDefaults};
pub use engine::{DocumentCursor, TableEngine, TableSummary};
pub use error::{AutoTableError, ConfigError, EngineError};
pub use hooks::{
    CellHookData, CellState, ColumnInfo, DidDrawCell, DidDrawPage, DidParseCell, HookSet,
    PageHookData, WillDrawCell, WillParseCell,
};
pub use options::{ColumnStyles, PageBreak, RowPageBreak, ShowFoot, ShowHead, TableOptions};
pub use parse::{load_layer, parse_call_arguments};
pub use resolve::{EffectiveConfiguration, EngineDefaults, MM_SCALE_FACTOR, resolve, resolve_with};
