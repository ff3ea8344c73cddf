pub mod fixtures;

use autotable::{
    AutoTableError, Document, DryRunEngine, GlobalDefaults, TableOptions, TableSummary,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A document, the global layer it resolves against and a dry-run engine.
pub struct TestDocument {
    pub global: GlobalDefaults,
    pub doc: Document,
    pub engine: DryRunEngine,
}

impl TestDocument {
    pub fn new() -> Self {
        Self {
            global: GlobalDefaults::new(),
            doc: Document::new(),
            engine: DryRunEngine::new(),
        }
    }

    /// Draws a table from a JSON options object.
    pub fn draw_json(&mut self, options: serde_json::Value) -> Result<TableSummary, AutoTableError> {
        let call = TableOptions::from_json(&options)?;
        self.draw(call)
    }

    pub fn draw(&mut self, call: TableOptions) -> Result<TableSummary, AutoTableError> {
        self.doc
            .auto_table(&self.global, call, &mut self.engine)
            .cloned()
    }
}
