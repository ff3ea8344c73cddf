//! Extension points a drawing engine calls back into.
//!
//! Each point is its own small trait so callers implement only what they
//! need. Closures taking the matching hook data implement them directly.
//!
//! Engines must keep this order and cardinality for every table:
//! 1. `will_parse_cell` then `did_parse_cell`, once per cell, before layout
//! 2. `will_draw_cell` then `did_draw_cell`, once per cell and page drawn
//! 3. `did_draw_page`, once per page the table touches

use crate::resolve::EffectiveConfiguration;
use autotable_style::{ComputedCellStyle, Section};
use autotable_types::{ColumnKey, Rect};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Identity of the column a cell belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub index: usize,
    pub data_key: ColumnKey,
}

/// The mutable state of one cell as it passes through the hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct CellState {
    /// The raw input value.
    pub raw: Value,
    /// Text lines to draw. Hooks may replace them.
    pub text: Vec<String>,
    pub styles: ComputedCellStyle,
    pub col_span: usize,
    pub row_span: usize,
    /// Position on the page; set once the cell has been laid out.
    pub rect: Option<Rect>,
}

/// Data handed to cell hooks.
pub struct CellHookData<'a> {
    pub cell: &'a mut CellState,
    pub row_index: usize,
    pub column: &'a ColumnInfo,
    pub section: Section,
    pub page_number: usize,
    pub settings: &'a EffectiveConfiguration,
}

/// Data handed to page hooks.
pub struct PageHookData<'a> {
    pub page_number: usize,
    /// Pages the table has touched so far, including this one.
    pub page_count: usize,
    /// Vertical position where the table ended on this page.
    pub cursor_y: f32,
    pub settings: &'a EffectiveConfiguration,
}

/// Called before a cell's content and styles are finalised.
pub trait WillParseCell: Send + Sync {
    fn will_parse_cell(&self, data: &mut CellHookData<'_>);
}

/// Called after a cell has been parsed, before column widths are computed.
pub trait DidParseCell: Send + Sync {
    fn did_parse_cell(&self, data: &mut CellHookData<'_>);
}

/// Called right before a cell is drawn.
pub trait WillDrawCell: Send + Sync {
    fn will_draw_cell(&self, data: &mut CellHookData<'_>);
}

/// Called right after a cell is drawn, e.g. to add images or links.
pub trait DidDrawCell: Send + Sync {
    fn did_draw_cell(&self, data: &mut CellHookData<'_>);
}

/// Called once per page the table is drawn on; the place for headers,
/// footers and page numbers.
pub trait DidDrawPage: Send + Sync {
    fn did_draw_page(&self, data: &mut PageHookData<'_>);
}

impl<F> WillParseCell for F
where
    F: Fn(&mut CellHookData<'_>) + Send + Sync,
{
    fn will_parse_cell(&self, data: &mut CellHookData<'_>) {
        self(data)
    }
}

impl<F> DidParseCell for F
where
    F: Fn(&mut CellHookData<'_>) + Send + Sync,
{
    fn did_parse_cell(&self, data: &mut CellHookData<'_>) {
        self(data)
    }
}

impl<F> WillDrawCell for F
where
    F: Fn(&mut CellHookData<'_>) + Send + Sync,
{
    fn will_draw_cell(&self, data: &mut CellHookData<'_>) {
        self(data)
    }
}

impl<F> DidDrawCell for F
where
    F: Fn(&mut CellHookData<'_>) + Send + Sync,
{
    fn did_draw_cell(&self, data: &mut CellHookData<'_>) {
        self(data)
    }
}

impl<F> DidDrawPage for F
where
    F: Fn(&mut PageHookData<'_>) + Send + Sync,
{
    fn did_draw_page(&self, data: &mut PageHookData<'_>) {
        self(data)
    }
}

/// The hooks registered on one configuration layer.
#[derive(Clone, Default)]
pub struct HookSet {
    pub will_parse_cell: Option<Arc<dyn WillParseCell>>,
    pub did_parse_cell: Option<Arc<dyn DidParseCell>>,
    pub will_draw_cell: Option<Arc<dyn WillDrawCell>>,
    pub did_draw_cell: Option<Arc<dyn DidDrawCell>>,
    pub did_draw_page: Option<Arc<dyn DidDrawPage>>,
}

impl HookSet {
    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    /// Takes every hook `overlay` sets; hooks it leaves unset are kept.
    pub fn merge(&mut self, overlay: &HookSet) {
        if overlay.will_parse_cell.is_some() { self.will_parse_cell = overlay.will_parse_cell.clone(); }
        if overlay.did_parse_cell.is_some() { self.did_parse_cell = overlay.did_parse_cell.clone(); }
        if overlay.will_draw_cell.is_some() { self.will_draw_cell = overlay.will_draw_cell.clone(); }
        if overlay.did_draw_cell.is_some() { self.did_draw_cell = overlay.did_draw_cell.clone(); }
        if overlay.did_draw_page.is_some() { self.did_draw_page = overlay.did_draw_page.clone(); }
    }

    /// Option names of the hooks that are set.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.will_parse_cell.is_some() { names.push("willParseCell"); }
        if self.did_parse_cell.is_some() { names.push("didParseCell"); }
        if self.will_draw_cell.is_some() { names.push("willDrawCell"); }
        if self.did_draw_cell.is_some() { names.push("didDrawCell"); }
        if self.did_draw_page.is_some() { names.push("didDrawPage"); }
        names
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HookSet").field(&self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_points() {
        let mut base = HookSet {
            will_draw_cell: Some(Arc::new(|_: &mut CellHookData<'_>| {})),
            did_draw_page: Some(Arc::new(|_: &mut PageHookData<'_>| {})),
            ..HookSet::default()
        };
        let overlay = HookSet {
            did_draw_page: Some(Arc::new(|_: &mut PageHookData<'_>| {})),
            ..HookSet::default()
        };
        let overlay_page = overlay.did_draw_page.clone();

        base.merge(&overlay);

        assert_eq!(base.names(), ["willDrawCell", "didDrawPage"]);
        let (Some(merged), Some(expected)) = (&base.did_draw_page, &overlay_page) else {
            panic!("page hook missing");
        };
        assert!(Arc::ptr_eq(merged, expected));
    }

    #[test]
    fn test_empty_set() {
        let hooks = HookSet::default();
        assert!(hooks.is_empty());
        assert_eq!(format!("{:?}", hooks), "HookSet([])");
    }
}
