//! A single configuration layer: the sparse set of table options given at
//! one scope (global, document or call).

use crate::content::{ColumnInput, RowInput};
use crate::hooks::{CellHookData, HookSet, PageHookData};
use autotable_style::{CellStyles, Spacing, Theme, Width};
use autotable_types::{Color, ColumnKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// How the table as a whole may be split across pages.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum PageBreak {
    /// Split wherever the page ends.
    #[default]
    Auto,
    /// Start on a new page if the whole table does not fit.
    Avoid,
    /// Always start on a new page.
    Always,
}

/// How a single row may be split across pages.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum RowPageBreak {
    #[default]
    Auto,
    Avoid,
}

/// On which pages the head rows are repeated.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ShowHead {
    #[default]
    EveryPage,
    FirstPage,
    Never,
}

/// On which pages the foot rows are repeated.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ShowFoot {
    #[default]
    EveryPage,
    LastPage,
    Never,
}

/// Per-column styles keyed by data key or column index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColumnStyles(BTreeMap<ColumnKey, CellStyles>);

impl ColumnStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &ColumnKey) -> Option<&CellStyles> {
        self.0.get(key)
    }

    /// Merges `styles` into whatever is already set for `key`.
    pub fn insert(&mut self, key: impl Into<ColumnKey>, styles: CellStyles) {
        self.0.entry(key.into()).or_default().merge(&styles);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColumnKey, &CellStyles)> {
        self.0.iter()
    }

    /// Key-by-key merge: columns only in `self` survive, columns in both
    /// are merged property by property.
    pub fn merge(&mut self, overlay: &ColumnStyles) {
        for (key, styles) in &overlay.0 {
            self.0.entry(key.clone()).or_default().merge(styles);
        }
    }
}

impl<K: Into<ColumnKey>> FromIterator<(K, CellStyles)> for ColumnStyles {
    fn from_iter<I: IntoIterator<Item = (K, CellStyles)>>(iter: I) -> Self {
        let mut styles = ColumnStyles::new();
        for (k, s) in iter {
            styles.insert(k, s);
        }
        styles
    }
}

/// One configuration layer.
///
/// Every option is optional; a default `TableOptions` is the empty layer.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    // Content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Vec<RowInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<RowInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foot: Option<Vec<RowInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_css: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_hidden_html: Option<bool>,

    // Placement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Spacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_break: Option<PageBreak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_page_break: Option<RowPageBreak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_width: Option<Width>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_head: Option<ShowHead>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_foot: Option<ShowFoot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_line_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_page_break: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_page_break_repeat: Option<ColumnKey>,

    // Styling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "CellStyles::is_empty")]
    pub styles: CellStyles,
    #[serde(skip_serializing_if = "CellStyles::is_empty")]
    pub head_styles: CellStyles,
    #[serde(skip_serializing_if = "CellStyles::is_empty")]
    pub body_styles: CellStyles,
    #[serde(skip_serializing_if = "CellStyles::is_empty")]
    pub foot_styles: CellStyles,
    #[serde(skip_serializing_if = "CellStyles::is_empty")]
    pub alternate_row_styles: CellStyles,
    #[serde(skip_serializing_if = "ColumnStyles::is_empty")]
    pub column_styles: ColumnStyles,

    // Hooks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_section_hooks: Option<bool>,
    #[serde(skip)]
    pub hooks: HookSet,
}

macro_rules! take_if_set {
    ($self:ident, $overlay:ident, $($field:ident),* $(,)?) => {
        $(
            if $overlay.$field.is_some() {
                $self.$field = $overlay.$field.clone();
            }
        )*
    };
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the layer sets nothing at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_none()
            && self.head.is_none()
            && self.body.is_none()
            && self.foot.is_none()
            && self.html.is_none()
            && self.use_css.is_none()
            && self.include_hidden_html.is_none()
            && self.start_y.is_none()
            && self.margin.is_none()
            && self.page_break.is_none()
            && self.row_page_break.is_none()
            && self.table_width.is_none()
            && self.show_head.is_none()
            && self.show_foot.is_none()
            && self.table_line_width.is_none()
            && self.table_line_color.is_none()
            && self.horizontal_page_break.is_none()
            && self.horizontal_page_break_repeat.is_none()
            && self.theme.is_none()
            && self.styles.is_empty()
            && self.head_styles.is_empty()
            && self.body_styles.is_empty()
            && self.foot_styles.is_empty()
            && self.alternate_row_styles.is_empty()
            && self.column_styles.is_empty()
            && self.all_section_hooks.is_none()
            && self.hooks.is_empty()
    }

    /// Layers `overlay` on top of `self`.
    ///
    /// Scalar options and content are taken from `overlay` when it sets
    /// them. Style dictionaries and column styles merge property by
    /// property, and hooks merge per extension point.
    pub fn merge(&mut self, overlay: &TableOptions) {
        take_if_set!(
            self,
            overlay,
            columns,
            head,
            body,
            foot,
            html,
            use_css,
            include_hidden_html,
            start_y,
            margin,
            page_break,
            row_page_break,
            table_width,
            show_head,
            show_foot,
            table_line_width,
            table_line_color,
            horizontal_page_break,
            horizontal_page_break_repeat,
            theme,
            all_section_hooks,
        );
        self.styles.merge(&overlay.styles);
        self.head_styles.merge(&overlay.head_styles);
        self.body_styles.merge(&overlay.body_styles);
        self.foot_styles.merge(&overlay.foot_styles);
        self.alternate_row_styles.merge(&overlay.alternate_row_styles);
        self.column_styles.merge(&overlay.column_styles);
        self.hooks.merge(&overlay.hooks);
    }

    /// Returns a copy of `self` with `overlay` merged on top.
    pub fn merged(&self, overlay: &TableOptions) -> TableOptions {
        let mut out = self.clone();
        out.merge(overlay);
        out
    }

    // --- Content ---

    pub fn columns(mut self, columns: Vec<ColumnInput>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn head(mut self, rows: Vec<RowInput>) -> Self {
        self.head = Some(rows);
        self
    }

    pub fn body(mut self, rows: Vec<RowInput>) -> Self {
        self.body = Some(rows);
        self
    }

    pub fn foot(mut self, rows: Vec<RowInput>) -> Self {
        self.foot = Some(rows);
        self
    }

    /// Reads the table from an HTML table matching `selector`.
    pub fn html(mut self, selector: impl Into<String>) -> Self {
        self.html = Some(selector.into());
        self
    }

    pub fn use_css(mut self, use_css: bool) -> Self {
        self.use_css = Some(use_css);
        self
    }

    // --- Placement ---

    pub fn start_y(mut self, y: f32) -> Self {
        self.start_y = Some(y);
        self
    }

    pub fn margin(mut self, margin: Spacing) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn page_break(mut self, page_break: PageBreak) -> Self {
        self.page_break = Some(page_break);
        self
    }

    /// Older spelling of `page_break(PageBreak::Avoid)`.
    pub fn avoid_table_split(self, avoid: bool) -> Self {
        self.page_break(if avoid { PageBreak::Avoid } else { PageBreak::Auto })
    }

    pub fn row_page_break(mut self, row_page_break: RowPageBreak) -> Self {
        self.row_page_break = Some(row_page_break);
        self
    }

    pub fn table_width(mut self, width: Width) -> Self {
        self.table_width = Some(width);
        self
    }

    pub fn show_head(mut self, show: ShowHead) -> Self {
        self.show_head = Some(show);
        self
    }

    pub fn show_foot(mut self, show: ShowFoot) -> Self {
        self.show_foot = Some(show);
        self
    }

    pub fn table_line_width(mut self, width: f32) -> Self {
        self.table_line_width = Some(width);
        self
    }

    pub fn table_line_color(mut self, color: Color) -> Self {
        self.table_line_color = Some(color);
        self
    }

    pub fn horizontal_page_break(mut self, enabled: bool) -> Self {
        self.horizontal_page_break = Some(enabled);
        self
    }

    pub fn horizontal_page_break_repeat(mut self, column: impl Into<ColumnKey>) -> Self {
        self.horizontal_page_break_repeat = Some(column.into());
        self
    }

    // --- Styling ---

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn styles(mut self, styles: CellStyles) -> Self {
        self.styles.merge(&styles);
        self
    }

    pub fn head_styles(mut self, styles: CellStyles) -> Self {
        self.head_styles.merge(&styles);
        self
    }

    pub fn body_styles(mut self, styles: CellStyles) -> Self {
        self.body_styles.merge(&styles);
        self
    }

    pub fn foot_styles(mut self, styles: CellStyles) -> Self {
        self.foot_styles.merge(&styles);
        self
    }

    pub fn alternate_row_styles(mut self, styles: CellStyles) -> Self {
        self.alternate_row_styles.merge(&styles);
        self
    }

    pub fn column_style(mut self, column: impl Into<ColumnKey>, styles: CellStyles) -> Self {
        self.column_styles.insert(column, styles);
        self
    }

    // --- Hooks ---

    /// Restrict cell hooks to body cells when `false`.
    pub fn all_section_hooks(mut self, all: bool) -> Self {
        self.all_section_hooks = Some(all);
        self
    }

    pub fn will_parse_cell<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut CellHookData<'_>) + Send + Sync + 'static,
    {
        self.hooks.will_parse_cell = Some(Arc::new(hook));
        self
    }

    pub fn did_parse_cell<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut CellHookData<'_>) + Send + Sync + 'static,
    {
        self.hooks.did_parse_cell = Some(Arc::new(hook));
        self
    }

    pub fn will_draw_cell<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut CellHookData<'_>) + Send + Sync + 'static,
    {
        self.hooks.will_draw_cell = Some(Arc::new(hook));
        self
    }

    pub fn did_draw_cell<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut CellHookData<'_>) + Send + Sync + 'static,
    {
        self.hooks.did_draw_cell = Some(Arc::new(hook));
        self
    }

    pub fn did_draw_page<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut PageHookData<'_>) + Send + Sync + 'static,
    {
        self.hooks.did_draw_page = Some(Arc::new(hook));
        self
    }

    /// Replaces the whole hook set, e.g. with trait-object hooks.
    pub fn hooks(mut self, hooks: HookSet) -> Self {
        self.hooks = hooks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotable_style::FontStyle;

    #[test]
    fn test_scalar_overlay_wins() {
        let base = TableOptions::new().start_y(20.0).theme(Theme::Grid);
        let merged = base.merged(&TableOptions::new().start_y(40.0));
        assert_eq!(merged.start_y, Some(40.0));
        assert_eq!(merged.theme, Some(Theme::Grid));
    }

    #[test]
    fn test_column_styles_merge_key_by_key() {
        let base = TableOptions::new()
            .column_style("id", CellStyles::new().font_style(FontStyle::Bold));
        let overlay = TableOptions::new()
            .column_style("email", CellStyles::new().font_size(8.0))
            .column_style("id", CellStyles::new().text_color(Color::white()));

        let merged = base.merged(&overlay);

        let id = merged.column_styles.get(&ColumnKey::from("id")).unwrap();
        assert_eq!(id.font_style, Some(FontStyle::Bold));
        assert_eq!(id.text_color, Some(Color::white()));
        assert!(merged.column_styles.get(&ColumnKey::from("email")).is_some());
    }

    #[test]
    fn test_empty_layer() {
        assert!(TableOptions::new().is_empty());
        assert!(!TableOptions::new().all_section_hooks(false).is_empty());
        assert!(!TableOptions::new().did_draw_page(|_| {}).is_empty());
    }

    #[test]
    fn test_avoid_table_split_maps_to_page_break() {
        let options = TableOptions::new().avoid_table_split(true);
        assert_eq!(options.page_break, Some(PageBreak::Avoid));
    }
}
