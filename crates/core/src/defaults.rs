//! Owned homes for the global and document configuration layers.
//!
//! Nothing here is static: the global layer is a value the caller creates
//! and lends to each document, and a document keeps its own layer and page
//! state. Call layers are consumed by [`Document::auto_table`].

use crate::engine::{DocumentCursor, TableEngine, TableSummary};
use crate::error::{AutoTableError, ConfigError};
use crate::options::TableOptions;
use crate::resolve::{EffectiveConfiguration, EngineDefaults, MM_SCALE_FACTOR, resolve_with};
use autotable_types::Size;
use log::{debug, info};
use std::sync::Arc;

/// The process-wide layer, shared by every document it is passed to.
#[derive(Debug, Clone, Default)]
pub struct GlobalDefaults {
    layer: Option<TableOptions>,
}

impl GlobalDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the layer. `None` clears it.
    pub fn set(&mut self, layer: Option<TableOptions>) {
        debug!(
            "{} global defaults",
            if layer.is_some() { "Setting" } else { "Clearing" }
        );
        self.layer = layer;
    }

    pub fn clear(&mut self) {
        self.set(None);
    }

    pub fn layer(&self) -> Option<&TableOptions> {
        self.layer.as_ref()
    }

    /// Runs `f` with `layer` installed, then puts the previous layer back.
    pub fn scope<R>(&mut self, layer: TableOptions, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.layer.replace(layer);
        let out = f(self);
        self.layer = saved;
        out
    }
}

/// One output document: its defaults layer and where drawing has got to.
#[derive(Debug, Clone)]
pub struct Document {
    defaults: Option<TableOptions>,
    engine_defaults: EngineDefaults,
    page_size: Size,
    current_page: usize,
    page_count: usize,
    previous: Option<TableSummary>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An A4 portrait document measured in millimetres.
    pub fn new() -> Self {
        Self::with_page_size(Size::a4_portrait(), MM_SCALE_FACTOR)
    }

    pub fn landscape() -> Self {
        Self::with_page_size(Size::a4_landscape(), MM_SCALE_FACTOR)
    }

    /// A document with one page of `page_size`, in units of `scale_factor`
    /// points.
    pub fn with_page_size(page_size: Size, scale_factor: f32) -> Self {
        Self {
            defaults: None,
            engine_defaults: EngineDefaults::for_scale_factor(scale_factor),
            page_size,
            current_page: 1,
            page_count: 1,
            previous: None,
        }
    }

    /// Replaces the document layer. `None` clears it; the global layer is
    /// not touched either way.
    pub fn set_defaults(&mut self, layer: Option<TableOptions>) {
        debug!(
            "{} document defaults",
            if layer.is_some() { "Setting" } else { "Clearing" }
        );
        self.defaults = layer;
    }

    pub fn defaults(&self) -> Option<&TableOptions> {
        self.defaults.as_ref()
    }

    pub fn engine_defaults(&self) -> &EngineDefaults {
        &self.engine_defaults
    }

    /// The configuration a table drawn now with `call` would get.
    pub fn resolve(
        &self,
        global: &GlobalDefaults,
        call: &TableOptions,
    ) -> Result<EffectiveConfiguration, ConfigError> {
        resolve_with(
            &self.engine_defaults,
            global.layer(),
            self.defaults.as_ref(),
            Some(call),
        )
    }

    /// Resolves `call` against both default layers and has `engine` draw
    /// the table. The call layer is dropped once resolved.
    pub fn auto_table<E>(
        &mut self,
        global: &GlobalDefaults,
        call: TableOptions,
        engine: &mut E,
    ) -> Result<&TableSummary, AutoTableError>
    where
        E: TableEngine + ?Sized,
    {
        let config = Arc::new(self.resolve(global, &call)?);
        drop(call);

        let cursor = self.cursor();
        debug!(
            "Drawing table with {} engine from page {}",
            engine.name(),
            cursor.page_number
        );
        let summary = engine.draw(config, &cursor)?;
        info!(
            "Table drawn on pages {}-{}, final y {:.2}",
            summary.start_page, summary.end_page, summary.final_y
        );

        self.current_page = summary.end_page;
        self.page_count = self.page_count.max(summary.end_page);
        Ok(self.previous.insert(summary))
    }

    /// Summary of the last table drawn in this document.
    pub fn previous(&self) -> Option<&TableSummary> {
        self.previous.as_ref()
    }

    /// `gap` below the last table, for placing the next one.
    pub fn next_start_y(&self, gap: f32) -> Option<f32> {
        self.previous.as_ref().map(|p| p.final_y + gap)
    }

    /// Appends a page and makes it current. Returns its number.
    pub fn add_page(&mut self) -> usize {
        self.page_count += 1;
        self.current_page = self.page_count;
        self.current_page
    }

    /// Makes an existing page current.
    pub fn set_page(&mut self, page: usize) -> Result<(), ConfigError> {
        if page == 0 || page > self.page_count {
            return Err(ConfigError::invalid_value(
                "page",
                format!("page {} does not exist, document has {}", page, self.page_count),
            ));
        }
        self.current_page = page;
        Ok(())
    }

    pub fn page_number(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    pub fn cursor(&self) -> DocumentCursor {
        let previous_final_y = self
            .previous
            .as_ref()
            .filter(|p| p.end_page == self.current_page)
            .map(|p| p.final_y);
        DocumentCursor {
            page_number: self.current_page,
            page_count: self.page_count,
            page_size: self.page_size,
            previous_final_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use autotable_style::{CellStyles, Theme};

    /// Records the configuration it was given and reports a fixed summary.
    struct Recorder {
        seen: Vec<Arc<EffectiveConfiguration>>,
        pages: usize,
    }

    impl TableEngine for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn draw(
            &mut self,
            config: Arc<EffectiveConfiguration>,
            cursor: &DocumentCursor,
        ) -> Result<TableSummary, EngineError> {
            self.seen.push(config);
            Ok(TableSummary {
                start_y: 10.0,
                final_y: 120.0,
                start_page: cursor.page_number,
                end_page: cursor.page_number + self.pages - 1,
                page_count: self.pages,
                row_count: 3,
            })
        }
    }

    #[test]
    fn test_scope_restores_previous_layer() {
        let mut global = GlobalDefaults::new();
        global.set(Some(TableOptions::new().theme(Theme::Grid)));

        let theme = global.scope(TableOptions::new().theme(Theme::Plain), |g| {
            g.layer().and_then(|l| l.theme)
        });

        assert_eq!(theme, Some(Theme::Plain));
        assert_eq!(global.layer().and_then(|l| l.theme), Some(Theme::Grid));
    }

    #[test]
    fn test_clearing_global_keeps_document_layer() {
        let mut global = GlobalDefaults::new();
        global.set(Some(TableOptions::new().start_y(10.0)));
        let mut doc = Document::new();
        doc.set_defaults(Some(TableOptions::new().start_y(25.0)));

        global.clear();

        let config = doc.resolve(&global, &TableOptions::new()).unwrap();
        assert_eq!(config.start_y, Some(25.0));
    }

    #[test]
    fn test_auto_table_tracks_pages() {
        let global = GlobalDefaults::new();
        let mut doc = Document::new();
        let mut engine = Recorder {
            seen: Vec::new(),
            pages: 2,
        };

        let summary = doc
            .auto_table(
                &global,
                TableOptions::new().body_styles(CellStyles::new().font_size(8.0)),
                &mut engine,
            )
            .unwrap();
        assert_eq!(summary.end_page, 2);
        assert_eq!(doc.page_number(), 2);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.next_start_y(10.0), Some(130.0));
        assert_eq!(doc.cursor().previous_final_y, Some(120.0));

        doc.set_page(1).unwrap();
        assert_eq!(doc.cursor().previous_final_y, None);
        assert!(doc.set_page(3).is_err());
        assert_eq!(doc.add_page(), 3);

        assert_eq!(engine.seen[0].body_styles.font_size, Some(8.0));
    }

    #[test]
    fn test_config_errors_reach_no_engine() {
        let global = GlobalDefaults::new();
        let mut doc = Document::new();
        let mut engine = Recorder {
            seen: Vec::new(),
            pages: 1,
        };

        let result = doc.auto_table(&global, TableOptions::new().start_y(-1.0), &mut engine);

        assert!(matches!(result, Err(AutoTableError::Config(_))));
        assert!(engine.seen.is_empty());
        assert!(doc.previous().is_none());
    }
}
