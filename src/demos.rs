//! The demonstration catalogue: one entry per documented table example,
//! each run against the dry-run engine.

use crate::dry_run::DryRunEngine;
use crate::sample::{SampleData, columns, head_rows};
use autotable_core::{
    AutoTableError, CellInput, Document, GlobalDefaults, RowInput, ShowHead, TableOptions,
    TableSummary, parse_call_arguments,
};
use autotable_style::{CellStyles, FontStyle, HAlign, Overflow, Section, Spacing, Theme, VAlign, Width};
use autotable_types::{Color, Size};
use log::info;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Page placeholder replaced with the final page count once a document is
/// complete.
pub const TOTAL_PAGES_PLACEHOLDER: &str = "{total_pages_count_string}";

/// Lines hooks wrote instead of drawing, shared between hook closures.
#[derive(Debug, Clone, Default)]
pub struct Notes(Arc<Mutex<Vec<String>>>);

impl Notes {
    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut lines) = self.0.lock() {
            lines.push(line.into());
        }
    }

    pub fn take(&self) -> Vec<String> {
        self.0
            .lock()
            .map(|mut lines| std::mem::take(&mut *lines))
            .unwrap_or_default()
    }

    fn replace_all(&self, from: &str, to: &str) {
        if let Ok(mut lines) = self.0.lock() {
            for line in lines.iter_mut() {
                *line = line.replace(from, to);
            }
        }
    }
}

/// One table a demo drew.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnTable {
    /// The effective configuration, hooks listed by name.
    pub config: Value,
    pub summary: TableSummary,
}

/// Everything a demo run produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub name: &'static str,
    pub tables: Vec<DrawnTable>,
    pub notes: Vec<String>,
}

/// State shared by the tables of one demo run.
pub struct DemoContext<'a> {
    pub global: &'a mut GlobalDefaults,
    pub sample: SampleData,
    pub notes: Notes,
    engine: DryRunEngine,
    tables: Vec<DrawnTable>,
}

impl DemoContext<'_> {
    /// Draws one table into `doc`, keeping its effective configuration for
    /// the report.
    pub fn draw(
        &mut self,
        doc: &mut Document,
        call: TableOptions,
    ) -> Result<TableSummary, AutoTableError> {
        let summary = doc.auto_table(self.global, call, &mut self.engine)?.clone();
        let config = match self.engine.last_config() {
            Some(config) => serde_json::to_value(config.as_ref())?,
            None => Value::Null,
        };
        self.tables.push(DrawnTable {
            config,
            summary: summary.clone(),
        });
        Ok(summary)
    }

    pub fn engine(&self) -> &DryRunEngine {
        &self.engine
    }
}

type DemoFn = fn(&mut DemoContext<'_>) -> Result<(), AutoTableError>;

/// A named example.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    run: DemoFn,
}

pub const DEMOS: &[Demo] = &[
    Demo { name: "basic", description: "What a default table looks like", run: basic },
    Demo { name: "html", description: "Tables read from an HTML table, with and without its CSS", run: html },
    Demo { name: "minimal", description: "A compact table", run: minimal },
    Demo { name: "long", description: "The overflow modes on long text", run: long },
    Demo { name: "content", description: "A table between other page content", run: content },
    Demo { name: "multiple", description: "Several tables side by side and below each other", run: multiple },
    Demo { name: "header-footer", description: "Page headers, footers and page numbers", run: header_footer },
    Demo { name: "defaults", description: "Global and document defaults", run: defaults },
    Demo { name: "colstyles", description: "Styles for a single column", run: colstyles },
    Demo { name: "spans", description: "Column and row spans", run: spans },
    Demo { name: "themes", description: "The striped, grid and plain themes", run: themes },
    Demo { name: "events", description: "Content shapes and the hook extension points", run: events },
    Demo { name: "custom", description: "Custom styles set directly and from hooks", run: custom },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.name == name)
}

/// Runs `demo` with sample data from `seed`.
pub fn run_demo(
    demo: &Demo,
    global: &mut GlobalDefaults,
    seed: u64,
) -> Result<DemoReport, AutoTableError> {
    info!("Running demo '{}'", demo.name);
    let mut ctx = DemoContext {
        global,
        sample: SampleData::new(seed),
        notes: Notes::default(),
        engine: DryRunEngine::new(),
        tables: Vec::new(),
    };
    (demo.run)(&mut ctx)?;
    Ok(DemoReport {
        name: demo.name,
        tables: ctx.tables,
        notes: ctx.notes.take(),
    })
}

fn people_table(ctx: &mut DemoContext<'_>, rows: usize) -> TableOptions {
    TableOptions::new()
        .head(head_rows())
        .body(ctx.sample.body_rows(rows))
}

fn basic(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();

    // Older column/data form, straight from JSON
    let call = TableOptions::from_json(&json!({
        "columns": columns(),
        "data": ctx.sample.people(10),
    }))?;
    ctx.draw(&mut doc, call)?;

    let call = people_table(ctx, 10);
    ctx.draw(&mut doc, call)?;
    Ok(())
}

/// Rows as read from the example HTML table.
fn html_rows() -> (Vec<RowInput>, Vec<RowInput>) {
    let head = vec![RowInput::array([
        "ID", "First name", "Last name", "Email", "Country", "IP-address",
    ])];
    let body = vec![
        RowInput::array(["1", "Donna", "Moore", "dmoore0@example.com", "China", "211.56.242.221"]),
        RowInput::array(["2", "Janice", "Henry", "jhenry1@example.org", "Ukraine", "38.36.7.199"]),
        RowInput::array(["3", "Ruth", "Wells", "rwells2@example.com", "Trinidad and Tobago", "19.162.133.184"]),
        RowInput::array(["4", "Jason", "Ray", "jray3@example.org", "Brazil", "10.68.11.42"]),
        RowInput::array(["5", "Jane", "Stephens", "jstephens4@example.com", "United States", "47.32.129.71"]),
    ];
    (head, body)
}

fn html(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    let (head, body) = html_rows();

    ctx.notes.push("From HTML Table");
    let first = TableOptions::new()
        .html(".table")
        .start_y(20.0)
        .head(head.clone())
        .body(body.clone());
    let summary = ctx.draw(&mut doc, first)?;

    ctx.notes.push("From HTML Table with CSS");
    let second = TableOptions::new()
        .html(".table")
        .use_css(true)
        .start_y(summary.final_y + 20.0)
        .head(head)
        .body(body);
    ctx.draw(&mut doc, second)?;
    Ok(())
}

fn minimal(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    let call = people_table(ctx, 10)
        .table_width(Width::Wrap)
        .styles(CellStyles::new().cell_padding(Spacing::all(0.5)).font_size(8.0));
    ctx.draw(&mut doc, call)?;
    Ok(())
}

fn long(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::landscape();
    let mut head = head_rows();
    for row in &mut head {
        row.set("text", "Text");
    }
    let mut body = ctx.sample.body_rows(4);
    for row in &mut body {
        row.set("text", ctx.sample.sentence(20));
    }

    // Start position passed separately, the older call form
    ctx.notes.push("Overflow 'ellipsize'");
    let call = parse_call_arguments(&[
        json!(20),
        json!({
            "head": head,
            "body": body,
            "styles": {"overflow": "ellipsize", "cellWidth": "wrap"},
            "columnStyles": {"text": {"cellWidth": "auto"}},
        }),
    ])?;
    ctx.draw(&mut doc, call)?;

    for (title, overflow) in [
        ("Overflow 'hidden'", Overflow::Hidden),
        ("Overflow 'linebreak' (default)", Overflow::Linebreak),
    ] {
        ctx.notes.push(title);
        let mut call = TableOptions::new()
            .head(head.clone())
            .body(body.clone())
            .styles(CellStyles::new().overflow(overflow).cell_width(Width::Wrap))
            .column_style("text", CellStyles::new().cell_width(Width::Auto));
        if let Some(y) = doc.next_start_y(15.0) {
            call = call.start_y(y);
        }
        if overflow == Overflow::Linebreak {
            call = call.body_styles(CellStyles::new().valign(VAlign::Top));
        }
        ctx.draw(&mut doc, call)?;
    }
    Ok(())
}

fn content(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    let text = ctx.sample.sentence(45);
    ctx.notes.push("With content");
    ctx.notes.push(text.clone());

    let call = people_table(ctx, 40)
        .start_y(50.0)
        .show_head(ShowHead::FirstPage);
    let summary = ctx.draw(&mut doc, call)?;

    ctx.notes.push(format!(
        "{} (page {}, y {:.1})",
        text,
        summary.end_page,
        summary.final_y + 10.0
    ));
    Ok(())
}

fn multiple(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    ctx.notes.push("Multiple tables");

    let call = people_table(ctx, 25).start_y(30.0);
    ctx.draw(&mut doc, call)?;
    let page = doc.page_number();

    // Two tables next to each other, split by their margins
    let left = people_table(ctx, 15)
        .start_y(240.0)
        .show_head(ShowHead::FirstPage)
        .styles(CellStyles::new().overflow(Overflow::Hidden))
        .margin(Spacing { right: Some(107.0), ..Spacing::default() });
    ctx.draw(&mut doc, left)?;

    doc.set_page(page)?;
    let right = people_table(ctx, 15)
        .start_y(240.0)
        .show_head(ShowHead::FirstPage)
        .styles(CellStyles::new().overflow(Overflow::Hidden))
        .margin(Spacing { left: Some(107.0), ..Spacing::default() });
    ctx.draw(&mut doc, right)?;

    for _ in 0..3 {
        let mut call = people_table(ctx, 10).avoid_table_split(true);
        if let Some(y) = doc.next_start_y(10.0) {
            call = call.start_y(y);
        }
        ctx.draw(&mut doc, call)?;
    }
    Ok(())
}

fn header_footer(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    let notes = ctx.notes.clone();
    let page_height = doc.page_size().height;

    let call = people_table(ctx, 40)
        .margin(Spacing::top(30.0))
        .did_draw_page(move |data| {
            let left = data.settings.margin.left;
            notes.push(format!("Report @ ({:.1}, 22.0)", left + 15.0));
            notes.push(format!(
                "Page {} of {} @ ({:.1}, {:.1})",
                data.page_count,
                TOTAL_PAGES_PLACEHOLDER,
                left,
                page_height - 10.0
            ));
        });
    ctx.draw(&mut doc, call)?;

    ctx.notes
        .replace_all(TOTAL_PAGES_PLACEHOLDER, &doc.page_count().to_string());
    Ok(())
}

fn defaults(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    // Global defaults apply to every document drawn with this value. The
    // demo's layer goes over whatever the caller installed, which is put
    // back afterwards.
    let installed = ctx.global.layer().cloned();
    let layer = TableOptions::new()
        .column_style("id", CellStyles::new().font_style(FontStyle::Bold))
        .head_styles(CellStyles::new().fill_color(Color::gray(0)));
    ctx.global.set(Some(match &installed {
        Some(installed) => installed.merged(&layer),
        None => layer,
    }));

    let drawn = defaults_tables(ctx);
    ctx.global.set(installed);
    drawn
}

fn defaults_tables(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    let notes = ctx.notes.clone();
    doc.set_defaults(Some(
        TableOptions::new()
            .head_styles(CellStyles::new().fill_color(Color::rgb(155, 89, 182)))
            .margin(Spacing::top(25.0))
            .did_draw_page(move |data| {
                notes.push(format!(
                    "Default options @ ({:.1}, 20.0) on page {}",
                    data.settings.margin.left, data.page_number
                ));
            }),
    ));

    let call = people_table(ctx, 10);
    ctx.draw(&mut doc, call)?;

    doc.add_page();

    // Overrides the document and global head styles
    let call = people_table(ctx, 10)
        .head_styles(CellStyles::new().fill_color(Color::rgb(231, 76, 60)));
    ctx.draw(&mut doc, call)?;

    doc.set_defaults(None);
    Ok(())
}

fn colstyles(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    // The column key matches the data key of the keyed rows; array rows
    // are addressed by index instead.
    let call = people_table(ctx, 10).show_head(ShowHead::Never).column_style(
        "id",
        CellStyles::new()
            .fill_color(Color::rgb(41, 128, 185))
            .text_color(Color::white())
            .font_style(FontStyle::Bold),
    );
    ctx.draw(&mut doc, call)?;
    Ok(())
}

fn spans(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    // Points as the document unit
    let mut doc = Document::with_page_size(Size::new(595.28, 841.89), 1.0);
    ctx.notes.push("Rowspan and colspan");

    let mut body = ctx.sample.body_rows(40);
    for (i, row) in body.iter_mut().enumerate().filter(|(i, _)| i % 5 == 0) {
        row.set(
            "id",
            CellInput::new(i / 5 + 1).row_span(5).styles(
                CellStyles::new()
                    .valign(VAlign::Middle)
                    .halign(HAlign::Center),
            ),
        );
    }
    let mut head = head_rows();
    head.insert(
        0,
        RowInput::keyed([(
            "id",
            CellInput::new("People").col_span(5).styles(
                CellStyles::new()
                    .halign(HAlign::Center)
                    .fill_color(Color::rgb(22, 160, 133)),
            ),
        )]),
    );

    let call = TableOptions::new()
        .start_y(60.0)
        .head(head)
        .body(body)
        .theme(Theme::Grid);
    ctx.draw(&mut doc, call)?;
    Ok(())
}

fn themes(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    let mut start_y = 20.0;
    for theme in [Theme::Striped, Theme::Grid, Theme::Plain] {
        let name = serde_json::to_value(theme)?;
        ctx.notes
            .push(format!("Theme \"{}\"", name.as_str().unwrap_or_default()));
        let call = people_table(ctx, 5).start_y(start_y).theme(theme);
        let summary = ctx.draw(&mut doc, call)?;
        start_y = summary.final_y + 14.0;
    }
    Ok(())
}

fn events(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();

    let shapes = [
        // Single rows given directly as arrays
        json!({
            "head": ["ID", "Name", "Age"],
            "body": [[1, "Simon", 25], [2, "Karl", 20]],
            "foot": ["ID", "Name", "Age"],
        }),
        // Keyed rows
        json!({
            "head": {"id": "ID", "name": "Name", "age": "Age"},
            "body": [{"id": 1, "name": "Simon", "age": 25}, {"id": 2, "name": "Karl", "age": 25}],
            "foot": {"id": "ID", "name": "Name", "age": "Age"},
        }),
        // Header list with the older content key
        json!({
            "columns": ["ID", "Name", "Age"],
            "content": [[1, "Simon", 25], [2, "Karl", 20]],
        }),
        // Column map with mixed row shapes
        json!({
            "columns": {"id": "ID", "name": "Name", "age": "Age"},
            "content": [{"id": 1, "1": "Simon", "2": 25}, [2, "Karl", 20]],
        }),
    ];
    for shape in &shapes {
        let call = TableOptions::from_json(shape)?;
        ctx.draw(&mut doc, call)?;
    }

    // Count every extension point; cell hooks only see the body here
    let counters: Arc<[AtomicUsize; 5]> = Arc::new(Default::default());
    let hook = |i: usize| {
        let counters = Arc::clone(&counters);
        move || {
            counters[i].fetch_add(1, Ordering::Relaxed);
        }
    };
    let (c0, c1, c2, c3, c4) = (hook(0), hook(1), hook(2), hook(3), hook(4));
    let call = TableOptions::new()
        .head(vec![RowInput::array(["ID", "Name", "Age"])])
        .body(vec![
            RowInput::array([json!(1), json!("Simon"), json!(25)]),
            RowInput::array([json!(2), json!("Karl"), json!(20)]),
        ])
        .all_section_hooks(false)
        .will_parse_cell(move |data| {
            if data.section == Section::Body {
                c0();
            }
        })
        .did_parse_cell(move |_| c1())
        .will_draw_cell(move |_| c2())
        .did_draw_cell(move |_| c3())
        .did_draw_page(move |_| c4());
    ctx.draw(&mut doc, call)?;

    let names = ["willParseCell", "didParseCell", "willDrawCell", "didDrawCell", "didDrawPage"];
    for (name, count) in names.iter().zip(counters.iter()) {
        ctx.notes
            .push(format!("{}: {} call(s)", name, count.load(Ordering::Relaxed)));
    }
    Ok(())
}

fn raw_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn custom(ctx: &mut DemoContext<'_>) -> Result<(), AutoTableError> {
    let mut doc = Document::new();
    let notes = ctx.notes.clone();

    let call = people_table(ctx, 10)
        .table_line_color(Color::rgb(243, 156, 18))
        .table_line_width(0.75)
        .styles(
            CellStyles::new()
                .font("courier")
                .line_color(Color::rgb(44, 62, 80))
                .line_width(1.0),
        )
        .head_styles(
            CellStyles::new()
                .fill_color(Color::rgb(44, 62, 80))
                .font_size(15.0),
        )
        .body_styles(
            CellStyles::new()
                .fill_color(Color::rgb(52, 73, 94))
                .text_color(Color::gray(240)),
        )
        .alternate_row_styles(CellStyles::new().fill_color(Color::rgb(74, 96, 117)))
        .column_style("email", CellStyles::new().font_style(FontStyle::Bold))
        .will_parse_cell(|data| {
            if data.section == Section::Body && data.row_index == 5 {
                data.cell.styles.fill_color = Color::rgb(40, 170, 100).into();
            }
        })
        .will_draw_cell(move |data| {
            if data.section == Section::Body
                && data.column.data_key.as_str() == "expenses"
                && raw_number(&data.cell.raw).is_some_and(|v| v > 500.0)
            {
                data.cell.styles.fill_color = Color::rgb(190, 60, 40).into();
                notes.push(format!("Highlighted expenses in row {}", data.row_index));
            }
        });
    ctx.draw(&mut doc, call)?;

    Ok(())
}
