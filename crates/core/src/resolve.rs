//! Merges configuration layers into the configuration one table is drawn
//! with.
//!
//! Precedence is call > document > global > engine default, decided per
//! option. Style dictionaries merge property by property and column styles
//! column by column, so a layer only ever overrides what it names.

use crate::content::{CellInput, ColumnInput, RowInput};
use crate::error::ConfigError;
use crate::hooks::{CellHookData, ColumnInfo, HookSet, PageHookData};
use crate::options::{ColumnStyles, PageBreak, RowPageBreak, ShowFoot, ShowHead, TableOptions};
use autotable_style::{CellStyles, ComputedCellStyle, Margins, Section, Theme, Width};
use autotable_types::{Color, ColumnKey};
use log::debug;
use serde::{Serialize, Serializer};

/// Points per millimetre; the default document unit.
pub const MM_SCALE_FACTOR: f32 = 72.0 / 25.4;

/// Values used for options no layer sets.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineDefaults {
    /// Points per document unit.
    pub scale_factor: f32,
    pub margin: f32,
    pub theme: Theme,
    pub page_break: PageBreak,
    pub row_page_break: RowPageBreak,
    pub table_width: Width,
    pub show_head: ShowHead,
    pub show_foot: ShowFoot,
    pub table_line_width: f32,
    pub table_line_color: Color,
    pub all_section_hooks: bool,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self::for_scale_factor(MM_SCALE_FACTOR)
    }
}

impl EngineDefaults {
    /// Defaults for a document measured in units of `scale_factor` points.
    pub fn for_scale_factor(scale_factor: f32) -> Self {
        Self {
            scale_factor,
            margin: 40.0 / scale_factor,
            theme: Theme::Striped,
            page_break: PageBreak::Auto,
            row_page_break: RowPageBreak::Auto,
            table_width: Width::Auto,
            show_head: ShowHead::EveryPage,
            show_foot: ShowFoot::EveryPage,
            table_line_width: 0.0,
            table_line_color: Color::gray(200),
            all_section_hooks: true,
        }
    }
}

fn serialize_hook_names<S>(hooks: &HookSet, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    hooks.names().serialize(serializer)
}

/// The merged options for one table drawing.
///
/// Built by [`resolve`] and handed to the engine behind an `Arc`; it is not
/// changed afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfiguration {
    pub columns: Vec<ColumnInput>,
    pub head: Vec<RowInput>,
    pub body: Vec<RowInput>,
    pub foot: Vec<RowInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub use_css: bool,
    pub include_hidden_html: bool,

    /// `None` lets the engine place the table below the previous one, or
    /// at the top margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_y: Option<f32>,
    pub margin: Margins,
    pub page_break: PageBreak,
    pub row_page_break: RowPageBreak,
    pub table_width: Width,
    pub show_head: ShowHead,
    pub show_foot: ShowFoot,
    pub table_line_width: f32,
    pub table_line_color: Color,
    pub horizontal_page_break: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_page_break_repeat: Option<ColumnKey>,

    pub theme: Theme,
    pub styles: CellStyles,
    pub head_styles: CellStyles,
    pub body_styles: CellStyles,
    pub foot_styles: CellStyles,
    pub alternate_row_styles: CellStyles,
    pub column_styles: ColumnStyles,

    pub all_section_hooks: bool,
    #[serde(serialize_with = "serialize_hook_names")]
    pub hooks: HookSet,

    #[serde(skip)]
    pub scale_factor: f32,
}

/// Resolves the three layers against the default engine values.
///
/// Absent layers count as empty.
pub fn resolve(
    global: Option<&TableOptions>,
    document: Option<&TableOptions>,
    call: Option<&TableOptions>,
) -> Result<EffectiveConfiguration, ConfigError> {
    resolve_with(&EngineDefaults::default(), global, document, call)
}

/// Resolves the three layers against explicit engine defaults.
pub fn resolve_with(
    defaults: &EngineDefaults,
    global: Option<&TableOptions>,
    document: Option<&TableOptions>,
    call: Option<&TableOptions>,
) -> Result<EffectiveConfiguration, ConfigError> {
    let mut merged = TableOptions::default();
    for (scope, layer) in [("global", global), ("document", document), ("call", call)] {
        if let Some(layer) = layer {
            debug!("Applying {} options layer", scope);
            merged.merge(layer);
        }
    }
    validate(&merged)?;
    Ok(EffectiveConfiguration::from_merged(merged, defaults))
}

fn validate(options: &TableOptions) -> Result<(), ConfigError> {
    let style_layers = [
        ("styles", &options.styles),
        ("headStyles", &options.head_styles),
        ("bodyStyles", &options.body_styles),
        ("footStyles", &options.foot_styles),
        ("alternateRowStyles", &options.alternate_row_styles),
    ];
    for (key, styles) in style_layers {
        styles.validate().map_err(|source| ConfigError::Style {
            key: key.to_string(),
            source,
        })?;
    }
    for (column, styles) in options.column_styles.iter() {
        styles.validate().map_err(|source| ConfigError::Style {
            key: format!("columnStyles.{}", column),
            source,
        })?;
    }

    if let Some(y) = options.start_y
        && !(y >= 0.0)
    {
        return Err(ConfigError::invalid_value("startY", format!("{} is negative", y)));
    }
    if let Some(margin) = &options.margin
        && let Some(side) = margin.sides().find(|v| *v < 0.0)
    {
        return Err(ConfigError::invalid_value("margin", format!("{} is negative", side)));
    }
    if let Some(width) = options.table_line_width
        && width < 0.0
    {
        return Err(ConfigError::invalid_value(
            "tableLineWidth",
            format!("{} is negative", width),
        ));
    }
    if let Some(Width::Fixed(width)) = options.table_width
        && width <= 0.0
    {
        return Err(ConfigError::invalid_value(
            "tableWidth",
            format!("{} is not positive", width),
        ));
    }
    Ok(())
}

impl EffectiveConfiguration {
    fn from_merged(merged: TableOptions, defaults: &EngineDefaults) -> Self {
        let margin = merged
            .margin
            .map(|m| m.resolve(defaults.margin))
            .unwrap_or_else(|| Margins::all(defaults.margin));

        Self {
            columns: merged.columns.unwrap_or_default(),
            head: merged.head.unwrap_or_default(),
            body: merged.body.unwrap_or_default(),
            foot: merged.foot.unwrap_or_default(),
            html: merged.html,
            use_css: merged.use_css.unwrap_or(false),
            include_hidden_html: merged.include_hidden_html.unwrap_or(false),
            start_y: merged.start_y,
            margin,
            page_break: merged.page_break.unwrap_or(defaults.page_break),
            row_page_break: merged.row_page_break.unwrap_or(defaults.row_page_break),
            table_width: merged.table_width.unwrap_or(defaults.table_width),
            show_head: merged.show_head.unwrap_or(defaults.show_head),
            show_foot: merged.show_foot.unwrap_or(defaults.show_foot),
            table_line_width: merged.table_line_width.unwrap_or(defaults.table_line_width),
            table_line_color: merged.table_line_color.unwrap_or(defaults.table_line_color),
            horizontal_page_break: merged.horizontal_page_break.unwrap_or(false),
            horizontal_page_break_repeat: merged.horizontal_page_break_repeat,
            theme: merged.theme.unwrap_or(defaults.theme),
            styles: merged.styles,
            head_styles: merged.head_styles,
            body_styles: merged.body_styles,
            foot_styles: merged.foot_styles,
            alternate_row_styles: merged.alternate_row_styles,
            column_styles: merged.column_styles,
            all_section_hooks: merged.all_section_hooks.unwrap_or(defaults.all_section_hooks),
            hooks: merged.hooks,
            scale_factor: defaults.scale_factor,
        }
    }

    pub fn section_rows(&self, section: Section) -> &[RowInput] {
        match section {
            Section::Head => &self.head,
            Section::Body => &self.body,
            Section::Foot => &self.foot,
        }
    }

    pub fn section_styles(&self, section: Section) -> &CellStyles {
        match section {
            Section::Head => &self.head_styles,
            Section::Body => &self.body_styles,
            Section::Foot => &self.foot_styles,
        }
    }

    /// True when the table has something to draw.
    pub fn has_content(&self) -> bool {
        self.html.is_some()
            || !self.columns.is_empty()
            || !self.head.is_empty()
            || !self.body.is_empty()
            || !self.foot.is_empty()
    }

    /// The columns of the table.
    ///
    /// Explicit `columns` win. Otherwise they are taken from the first row
    /// in head, body, then foot that is not empty and has no column spans:
    /// data keys for keyed rows, positions for array rows. When every row
    /// spans, the first non-empty row is used with its spans expanded.
    pub fn effective_columns(&self) -> Vec<ColumnInput> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        let mut rows = self
            .head
            .iter()
            .chain(&self.body)
            .chain(&self.foot)
            .filter(|r| !r.is_empty());
        let Some(first) = rows.clone().next() else {
            return Vec::new();
        };
        let row = rows.find(|r| r.span_width() == r.len()).unwrap_or(first);
        match row {
            RowInput::Keyed(cells) => cells
                .iter()
                .flat_map(|(key, cell)| {
                    (0..cell.col_span.max(1)).map(move |i| ColumnInput {
                        header: None,
                        data_key: if i == 0 {
                            key.clone()
                        } else {
                            ColumnKey::from(format!("{}_{}", key, i))
                        },
                    })
                })
                .collect(),
            RowInput::Array(_) => (0..row.span_width()).map(ColumnInput::positional).collect(),
        }
    }

    /// Head rows to draw: explicit head rows, or one row built from the
    /// column headers when only `columns` were given.
    pub fn effective_head(&self) -> Vec<RowInput> {
        if !self.head.is_empty() {
            return self.head.clone();
        }
        if self.columns.iter().any(|c| c.header.is_some()) {
            return vec![RowInput::Keyed(
                self.columns
                    .iter()
                    .map(|c| {
                        let header = c
                            .header
                            .clone()
                            .unwrap_or_else(|| CellInput::new(serde_json::Value::Null));
                        (c.data_key.clone(), header)
                    })
                    .collect(),
            )];
        }
        Vec::new()
    }

    /// Style a cell starts from before any hook runs.
    ///
    /// From least to most specific: engine base style, theme table style,
    /// theme section style, `styles`, the section's styles, alternate row
    /// styles (every other body row, starting with the first), column
    /// styles (body only, by data key then by index), the cell's own styles.
    pub fn cell_style(
        &self,
        section: Section,
        column: &ColumnInfo,
        row_index: usize,
        cell_styles: Option<&CellStyles>,
    ) -> ComputedCellStyle {
        let theme = self.theme.styles();
        let mut computed = ComputedCellStyle::base(self.scale_factor);
        computed.apply(&theme.table);
        computed.apply(theme.section(section));
        computed.apply(&self.styles);
        computed.apply(self.section_styles(section));

        if section == Section::Body {
            if row_index % 2 == 0 {
                computed.apply(&theme.alternate_row);
                computed.apply(&self.alternate_row_styles);
            }
            let by_key = self.column_styles.get(&column.data_key);
            let by_index = self
                .column_styles
                .get(&ColumnKey::from_index(column.index));
            if let Some(styles) = by_key.or(by_index) {
                computed.apply(styles);
            }
        }

        if let Some(styles) = cell_styles {
            computed.apply(styles);
        }
        computed
    }

    fn cell_hooks_apply(&self, section: Section) -> bool {
        self.all_section_hooks || section == Section::Body
    }

    pub fn fire_will_parse_cell(&self, data: &mut CellHookData<'_>) {
        if let Some(hook) = &self.hooks.will_parse_cell
            && self.cell_hooks_apply(data.section)
        {
            hook.will_parse_cell(data);
        }
    }

    pub fn fire_did_parse_cell(&self, data: &mut CellHookData<'_>) {
        if let Some(hook) = &self.hooks.did_parse_cell
            && self.cell_hooks_apply(data.section)
        {
            hook.did_parse_cell(data);
        }
    }

    pub fn fire_will_draw_cell(&self, data: &mut CellHookData<'_>) {
        if let Some(hook) = &self.hooks.will_draw_cell
            && self.cell_hooks_apply(data.section)
        {
            hook.will_draw_cell(data);
        }
    }

    pub fn fire_did_draw_cell(&self, data: &mut CellHookData<'_>) {
        if let Some(hook) = &self.hooks.did_draw_cell
            && self.cell_hooks_apply(data.section)
        {
            hook.did_draw_cell(data);
        }
    }

    pub fn fire_did_draw_page(&self, data: &mut PageHookData<'_>) {
        if let Some(hook) = &self.hooks.did_draw_page {
            hook.did_draw_page(data);
        }
    }
}
