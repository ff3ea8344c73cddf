//! The seam between option resolution and whatever actually draws tables.

use crate::error::EngineError;
use crate::resolve::EffectiveConfiguration;
use autotable_types::Size;
use serde::Serialize;
use std::sync::Arc;

/// Where the document stands when a table is about to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentCursor {
    /// Page the table starts on (1-based).
    pub page_number: usize,
    /// Pages the document has so far.
    pub page_count: usize,
    /// Page size in document units.
    pub page_size: Size,
    /// Where the previous table ended, if it ended on `page_number`.
    pub previous_final_y: Option<f32>,
}

/// What an engine reports after drawing a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub start_y: f32,
    /// Vertical position right below the last row drawn.
    pub final_y: f32,
    pub start_page: usize,
    pub end_page: usize,
    /// Pages the table touched.
    pub page_count: usize,
    pub row_count: usize,
}

/// A table drawing backend.
///
/// The configuration is frozen by the time it reaches the engine; hooks are
/// the only way caller code takes part in drawing.
pub trait TableEngine {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    fn draw(
        &mut self,
        config: Arc<EffectiveConfiguration>,
        cursor: &DocumentCursor,
    ) -> Result<TableSummary, EngineError>;
}
