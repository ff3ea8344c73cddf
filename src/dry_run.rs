//! A table engine that lays tables out without producing any output.
//!
//! Text is measured with fixed per-character estimates, so positions are
//! approximate, but rows, pages and hook calls follow the same rules a real
//! backend would. Good enough to check option resolution and hook wiring
//! end to end.

use autotable_core::hooks::{CellHookData, CellState, ColumnInfo, PageHookData};
use autotable_core::{
    ColumnInput, DocumentCursor, EffectiveConfiguration, EngineError, PageBreak, RowInput,
    ShowFoot, ShowHead, TableEngine, TableSummary,
};
use autotable_style::{ComputedCellStyle, FontStyle, Overflow, Section, Width};
use autotable_types::Rect;
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;

/// Average glyph width relative to the font size.
const CHAR_WIDTH_EM: f32 = 0.5;
const BOLD_CHAR_WIDTH_EM: f32 = 0.55;
const LINE_HEIGHT_EM: f32 = 1.15;
/// Gap left below a previous table on the same page, in points.
const TABLE_GAP_PT: f32 = 20.0;

/// One row as placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedRow {
    pub section: Section,
    pub index: usize,
    pub y: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub page_number: usize,
    pub rows: Vec<PlacedRow>,
    pub final_y: f32,
}

/// Where everything of one table ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayout {
    pub column_widths: Vec<f32>,
    pub pages: Vec<PageLayout>,
}

/// Lays out tables and fires hooks, drawing nothing.
#[derive(Debug, Default)]
pub struct DryRunEngine {
    layouts: Vec<TableLayout>,
    last_config: Option<Arc<EffectiveConfiguration>>,
}

struct ParsedRow {
    section: Section,
    index: usize,
    cells: Vec<(usize, CellState)>,
    height: f32,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layouts of every table drawn so far, in order.
    pub fn layouts(&self) -> &[TableLayout] {
        &self.layouts
    }

    pub fn last_layout(&self) -> Option<&TableLayout> {
        self.layouts.last()
    }

    /// The configuration the most recent `draw` was handed.
    pub fn last_config(&self) -> Option<&Arc<EffectiveConfiguration>> {
        self.last_config.as_ref()
    }
}

fn char_width(style: &ComputedCellStyle, scale_factor: f32) -> f32 {
    let em = match style.font_style {
        FontStyle::Bold | FontStyle::BoldItalic => BOLD_CHAR_WIDTH_EM,
        _ => CHAR_WIDTH_EM,
    };
    style.font_size * em / scale_factor
}

fn line_height(style: &ComputedCellStyle, scale_factor: f32) -> f32 {
    style.font_size * LINE_HEIGHT_EM / scale_factor
}

/// Width the cell's text needs on one line, padding included.
fn natural_width(cell: &CellState, scale_factor: f32) -> f32 {
    let longest = cell.text.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let padding = cell.styles.cell_padding.horizontal();
    (longest as f32 * char_width(&cell.styles, scale_factor) + padding).max(cell.styles.min_cell_width)
}

/// Splits text into lines that fit `width`, or cuts it per the overflow mode.
fn fit_text(lines: &[String], style: &ComputedCellStyle, width: f32, scale_factor: f32) -> Vec<String> {
    let available = (width - style.cell_padding.horizontal()).max(0.0);
    let max_chars = ((available / char_width(style, scale_factor)).floor() as usize).max(1);

    match style.overflow {
        Overflow::Linebreak => lines.iter().flat_map(|l| wrap_line(l, max_chars)).collect(),
        Overflow::Ellipsize => lines
            .iter()
            .map(|l| {
                if l.chars().count() <= max_chars {
                    l.clone()
                } else {
                    let kept: String = l.chars().take(max_chars.saturating_sub(3)).collect();
                    format!("{}...", kept.trim_end())
                }
            })
            .collect(),
        Overflow::Hidden => lines
            .iter()
            .map(|l| l.chars().take(max_chars).collect::<String>())
            .collect(),
        Overflow::Visible => lines.to_vec(),
    }
}

fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let len = current.chars().count();
        if len > 0 && len + 1 + word.chars().count() > max_chars {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        // Words longer than a line are hard-split
        while current.chars().count() > max_chars {
            let head: String = current.chars().take(max_chars).collect();
            let tail: String = current.chars().skip(max_chars).collect();
            out.push(head);
            current = tail;
        }
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Resolves column widths the way an auto table layout does: fixed columns
/// keep their width, the rest share what is left in proportion to what
/// their content asks for.
fn resolve_widths(
    fixed: &[Option<f32>],
    preferred: &[f32],
    table_width: Width,
    available: f32,
) -> Vec<f32> {
    let fixed_total: f32 = fixed.iter().flatten().sum();
    let auto: Vec<usize> = (0..fixed.len()).filter(|&i| fixed[i].is_none()).collect();
    let preferred_total: f32 = auto.iter().map(|&i| preferred[i]).sum();

    let target = match table_width {
        Width::Fixed(w) => w,
        Width::Auto => available,
        Width::Wrap => (fixed_total + preferred_total).min(available),
    };
    let remaining = (target - fixed_total).max(0.0);

    let mut widths: Vec<f32> = fixed.iter().map(|w| w.unwrap_or(0.0)).collect();
    if auto.is_empty() {
        return widths;
    }
    if preferred_total > 0.0 {
        let factor = remaining / preferred_total;
        for &i in &auto {
            widths[i] = preferred[i] * factor;
        }
    } else {
        for &i in &auto {
            widths[i] = remaining / auto.len() as f32;
        }
    }
    widths
}

impl DryRunEngine {
    /// Builds the cell states of one section, firing the parse hooks.
    fn parse_section(
        config: &EffectiveConfiguration,
        section: Section,
        rows: &[RowInput],
        columns: &[ColumnInput],
        infos: &[ColumnInfo],
        page_number: usize,
    ) -> Vec<ParsedRow> {
        // Rows still covered by a row span from above, per column
        let mut covered = vec![0usize; infos.len()];
        let mut parsed = Vec::with_capacity(rows.len());

        for (row_index, row) in rows.iter().enumerate() {
            let mut cells = Vec::new();
            let mut next_input = 0;
            let mut col = 0;
            while col < infos.len() {
                if covered[col] > 0 {
                    covered[col] -= 1;
                    col += 1;
                    continue;
                }
                let input = match row {
                    RowInput::Array(inputs) => {
                        next_input += 1;
                        inputs.get(next_input - 1)
                    }
                    RowInput::Keyed(_) => row.cell(&columns[col], col),
                };
                let Some(input) = input else {
                    col += 1;
                    continue;
                };

                let mut state = CellState {
                    raw: input.content.clone(),
                    text: input.text().split('\n').map(str::to_string).collect(),
                    styles: config.cell_style(section, &infos[col], row_index, Some(&input.styles)),
                    col_span: input.col_span,
                    row_span: input.row_span,
                    rect: None,
                };
                let mut data = CellHookData {
                    cell: &mut state,
                    row_index,
                    column: &infos[col],
                    section,
                    page_number,
                    settings: config,
                };
                config.fire_will_parse_cell(&mut data);
                config.fire_did_parse_cell(&mut data);

                state.col_span = state.col_span.clamp(1, infos.len() - col);
                state.row_span = state.row_span.max(1);
                let col_span = state.col_span;
                for rows_left in &mut covered[col..col + col_span] {
                    *rows_left = state.row_span - 1;
                }
                cells.push((col, state));
                col += col_span;
            }
            parsed.push(ParsedRow {
                section,
                index: row_index,
                cells,
                height: 0.0,
            });
        }
        parsed
    }

    fn measure_rows(rows: &mut [ParsedRow], widths: &[f32], scale_factor: f32) {
        for row in rows.iter_mut() {
            let mut height: f32 = 0.0;
            for (col, cell) in row.cells.iter_mut() {
                let width: f32 = widths[*col..*col + cell.col_span].iter().sum();
                cell.text = fit_text(&cell.text, &cell.styles, width, scale_factor);
                let content = cell.text.len() as f32 * line_height(&cell.styles, scale_factor)
                    + cell.styles.cell_padding.vertical();
                let cell_height = content.max(cell.styles.min_cell_height);
                // Row-spanning cells do not stretch the first row
                if cell.row_span == 1 {
                    height = height.max(cell_height);
                }
            }
            row.height = height;
        }
    }
}

fn rows_height(rows: &[ParsedRow]) -> f32 {
    rows.iter().map(|r| r.height).sum()
}

struct Placement {
    page_number: usize,
    rows: Vec<(Section, usize, f32)>,
    final_y: f32,
}

impl TableEngine for DryRunEngine {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn draw(
        &mut self,
        config: Arc<EffectiveConfiguration>,
        cursor: &DocumentCursor,
    ) -> Result<TableSummary, EngineError> {
        self.last_config = Some(Arc::clone(&config));
        let config = config.as_ref();
        if !config.has_content() {
            return Err(EngineError::NoContent);
        }
        let head_rows = config.effective_head();
        if let Some(selector) = &config.html {
            if head_rows.is_empty() && config.body.is_empty() && config.foot.is_empty() {
                return Err(EngineError::Draw(format!(
                    "cannot read HTML table '{}' without a DOM",
                    selector
                )));
            }
            warn!("Ignoring HTML source '{}'; drawing the given rows", selector);
        }

        let sf = config.scale_factor;
        let margin = config.margin;
        let page = cursor.page_size;
        let available_width = page.width - margin.left - margin.right;
        let page_bottom = page.height - margin.bottom;
        if available_width <= 0.0 || page_bottom <= margin.top {
            return Err(EngineError::DoesNotFit(format!(
                "margins {:?} leave no room on a {}x{} page",
                margin, page.width, page.height
            )));
        }

        let columns = config.effective_columns();
        let infos: Vec<ColumnInfo> = columns
            .iter()
            .enumerate()
            .map(|(index, c)| ColumnInfo {
                index,
                data_key: c.data_key.clone(),
            })
            .collect();

        // Parse: every cell once, head then body then foot
        let first_page = cursor.page_number;
        let mut head = Self::parse_section(config, Section::Head, &head_rows, &columns, &infos, first_page);
        let mut body = Self::parse_section(config, Section::Body, &config.body, &columns, &infos, first_page);
        let mut foot = Self::parse_section(config, Section::Foot, &config.foot, &columns, &infos, first_page);

        // Column widths
        let mut fixed = vec![None; infos.len()];
        let mut preferred = vec![0.0f32; infos.len()];
        for row in head.iter().chain(&body).chain(&foot) {
            for (col, cell) in &row.cells {
                if let Width::Fixed(w) = cell.styles.cell_width {
                    fixed[*col] = Some(w);
                }
                if cell.col_span == 1 {
                    preferred[*col] = preferred[*col].max(natural_width(cell, sf));
                }
            }
        }
        let widths = resolve_widths(&fixed, &preferred, config.table_width, available_width);
        let mut x_offsets = Vec::with_capacity(widths.len());
        let mut x = margin.left;
        for w in &widths {
            x_offsets.push(x);
            x += w;
        }

        Self::measure_rows(&mut head, &widths, sf);
        Self::measure_rows(&mut body, &widths, sf);
        Self::measure_rows(&mut foot, &widths, sf);

        // Pagination
        let mut page_number = first_page;
        let mut start_y = config
            .start_y
            .or_else(|| cursor.previous_final_y.map(|y| y + TABLE_GAP_PT / sf))
            .unwrap_or(margin.top);
        let table_height = rows_height(&head) + rows_height(&body) + rows_height(&foot);
        let starts_new_page = match config.page_break {
            PageBreak::Always => true,
            PageBreak::Avoid => start_y + table_height > page_bottom,
            PageBreak::Auto => false,
        };
        if starts_new_page {
            page_number += 1;
            start_y = margin.top;
        }
        let table_start_y = start_y;

        let mut placements = Vec::new();
        let mut current = Placement {
            page_number,
            rows: Vec::new(),
            final_y: start_y,
        };
        let place_head = |placement: &mut Placement, first: bool| {
            let show = match config.show_head {
                ShowHead::EveryPage => true,
                ShowHead::FirstPage => first,
                ShowHead::Never => false,
            };
            if show {
                for row in &head {
                    placement.rows.push((Section::Head, row.index, placement.final_y));
                    placement.final_y += row.height;
                }
            }
        };
        let place_foot = |placement: &mut Placement, last: bool| {
            let show = match config.show_foot {
                ShowFoot::EveryPage => true,
                ShowFoot::LastPage => last,
                ShowFoot::Never => false,
            };
            if show {
                for row in &foot {
                    placement.rows.push((Section::Foot, row.index, placement.final_y));
                    placement.final_y += row.height;
                }
            }
        };
        let foot_every_page = match config.show_foot {
            ShowFoot::EveryPage => rows_height(&foot),
            _ => 0.0,
        };

        place_head(&mut current, true);
        for row in &body {
            let placed_body = current.rows.iter().any(|(s, _, _)| *s == Section::Body);
            let can_break = placed_body || (placements.is_empty() && table_start_y > margin.top);
            if current.final_y + row.height + foot_every_page > page_bottom && can_break {
                place_foot(&mut current, false);
                let next = Placement {
                    page_number: current.page_number + 1,
                    rows: Vec::new(),
                    final_y: margin.top,
                };
                placements.push(std::mem::replace(&mut current, next));
                place_head(&mut current, false);
            }
            if current.final_y + row.height > page_bottom {
                warn!(
                    "Row {} is taller than the space left on page {}",
                    row.index, current.page_number
                );
            }
            current.rows.push((Section::Body, row.index, current.final_y));
            current.final_y += row.height;
        }
        place_foot(&mut current, true);
        placements.push(current);

        // Draw: per page, every placed cell, then the page hook
        let mut layout = TableLayout {
            column_widths: widths.clone(),
            pages: Vec::with_capacity(placements.len()),
        };
        for (touched, placement) in placements.iter().enumerate() {
            let mut placed_rows = Vec::with_capacity(placement.rows.len());
            for &(section, index, y) in &placement.rows {
                let rows = match section {
                    Section::Head => &mut head,
                    Section::Body => &mut body,
                    Section::Foot => &mut foot,
                };
                let following: Vec<f32> = rows.iter().skip(index).map(|r| r.height).collect();
                let row = &mut rows[index];
                for (col, cell) in row.cells.iter_mut() {
                    let width: f32 = widths[*col..*col + cell.col_span].iter().sum();
                    let height: f32 = following.iter().take(cell.row_span).sum();
                    cell.rect = Some(Rect::new(x_offsets[*col], y, width, height));
                    let mut data = CellHookData {
                        cell,
                        row_index: index,
                        column: &infos[*col],
                        section,
                        page_number: placement.page_number,
                        settings: config,
                    };
                    config.fire_will_draw_cell(&mut data);
                    config.fire_did_draw_cell(&mut data);
                }
                placed_rows.push(PlacedRow {
                    section,
                    index,
                    y,
                    height: row.height,
                });
            }

            let mut data = PageHookData {
                page_number: placement.page_number,
                page_count: touched + 1,
                cursor_y: placement.final_y,
                settings: config,
            };
            config.fire_did_draw_page(&mut data);

            layout.pages.push(PageLayout {
                page_number: placement.page_number,
                rows: placed_rows,
                final_y: placement.final_y,
            });
        }

        let end_page = placements.last().map_or(page_number, |p| p.page_number);
        let final_y = placements.last().map_or(table_start_y, |p| p.final_y);
        debug!(
            "Dry run placed {} body rows over {} page(s)",
            body.len(),
            placements.len()
        );
        self.layouts.push(layout);

        Ok(TableSummary {
            start_y: table_start_y,
            final_y,
            start_page: page_number,
            end_page,
            page_count: end_page - page_number + 1,
            row_count: head.len() + body.len() + foot.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_the_config_it_was_handed() {
        let mut doc = autotable_core::Document::new();
        let mut engine = DryRunEngine::new();
        assert!(engine.last_config().is_none());

        let call = autotable_core::TableOptions::new()
            .body(vec![RowInput::array(["a", "b"])])
            .start_y(40.0);
        doc.auto_table(&autotable_core::GlobalDefaults::new(), call, &mut engine)
            .unwrap();

        let config = engine.last_config().unwrap();
        assert_eq!(config.start_y, Some(40.0));
        assert_eq!(config.effective_columns().len(), 2);
    }

    #[test]
    fn test_wrap_line() {
        assert_eq!(wrap_line("one two three", 7), ["one two", "three"]);
        assert_eq!(wrap_line("abcdefghij", 4), ["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("", 4), [""]);
    }

    #[test]
    fn test_resolve_widths_shares_remaining_space() {
        let widths = resolve_widths(&[Some(20.0), None, None], &[5.0, 10.0, 30.0], Width::Auto, 100.0);
        assert_eq!(widths, vec![20.0, 20.0, 60.0]);

        let widths = resolve_widths(&[None, None], &[10.0, 30.0], Width::Wrap, 100.0);
        assert_eq!(widths, vec![10.0, 30.0]);

        let widths = resolve_widths(&[None, None], &[0.0, 0.0], Width::Fixed(50.0), 100.0);
        assert_eq!(widths, vec![25.0, 25.0]);
    }

    #[test]
    fn test_fit_text_overflow_modes() {
        let mut style = ComputedCellStyle::base(1.0);
        style.cell_padding = autotable_style::Margins::all(0.0);
        // 10pt at scale 1: 5 units per char, 25 units hold 5 chars
        let lines = vec!["abcdefghij".to_string()];

        style.overflow = Overflow::Hidden;
        assert_eq!(fit_text(&lines, &style, 25.0, 1.0), ["abcde"]);
        style.overflow = Overflow::Ellipsize;
        assert_eq!(fit_text(&lines, &style, 25.0, 1.0), ["ab..."]);
        style.overflow = Overflow::Visible;
        assert_eq!(fit_text(&lines, &style, 25.0, 1.0), ["abcdefghij"]);
        style.overflow = Overflow::Linebreak;
        assert_eq!(fit_text(&lines, &style, 25.0, 1.0).len(), 2);
    }
}
