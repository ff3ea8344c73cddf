mod common;

use autotable::style::{Section, Theme};
use autotable::types::{Color, Paint};
use autotable::{
    AutoTableError, CellHookData, DryRunEngine, EngineError, PageBreak, PageHookData, ShowHead,
    TableEngine, TableOptions,
};
use common::fixtures::{body, head, people, with};
use common::{TestDocument, TestResult};
use serde_json::json;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

fn log_cell(log: &Log, point: &str, data: &CellHookData<'_>) {
    if let Ok(mut log) = log.lock() {
        log.push(format!(
            "{} {} {} {}",
            point, data.section, data.row_index, data.column.index
        ));
    }
}

fn logging_hooks(options: TableOptions, log: &Log) -> TableOptions {
    let (a, b, c, d, e) = (
        Arc::clone(log),
        Arc::clone(log),
        Arc::clone(log),
        Arc::clone(log),
        Arc::clone(log),
    );
    options
        .will_parse_cell(move |data| log_cell(&a, "willParse", data))
        .did_parse_cell(move |data| log_cell(&b, "didParse", data))
        .will_draw_cell(move |data| log_cell(&c, "willDraw", data))
        .did_draw_cell(move |data| log_cell(&d, "didDraw", data))
        .did_draw_page(move |data: &mut PageHookData<'_>| {
            if let Ok(mut log) = e.lock() {
                log.push(format!("page {}", data.page_number));
            }
        })
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().map(|l| l.clone()).unwrap_or_default()
}

#[test]
fn test_hook_order_and_cardinality() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let log = Log::default();
    let mut t = TestDocument::new();
    let call = logging_hooks(TableOptions::from_json(&people(2))?, &log);
    t.draw(call)?;

    let log = entries(&log);
    let count = |prefix: &str| log.iter().filter(|e| e.starts_with(prefix)).count();
    // 3 rows of 3 cells
    assert_eq!(count("willParse"), 9);
    assert_eq!(count("didParse"), 9);
    assert_eq!(count("willDraw"), 9);
    assert_eq!(count("didDraw"), 9);
    assert_eq!(count("page"), 1);

    let last_parse = log.iter().rposition(|e| e.starts_with("didParse")).ok_or("no parse")?;
    let first_draw = log.iter().position(|e| e.starts_with("willDraw")).ok_or("no draw")?;
    assert!(last_parse < first_draw);
    assert_eq!(log[0], "willParse head 0 0");
    assert_eq!(log[1], "didParse head 0 0");
    assert_eq!(log.last().map(String::as_str), Some("page 1"));
    Ok(())
}

#[test]
fn test_all_section_hooks_false_skips_head_and_foot() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let log = Log::default();
    let mut t = TestDocument::new();
    let options = with(people(2), json!({"foot": head(), "allSectionHooks": false}));
    let call = logging_hooks(TableOptions::from_json(&options)?, &log);
    t.draw(call)?;

    let log = entries(&log);
    assert!(log.iter().all(|e| !e.contains(" head ") && !e.contains(" foot ")));
    assert_eq!(log.iter().filter(|e| e.starts_with("willParse body")).count(), 6);
    assert_eq!(log.iter().filter(|e| e.starts_with("page")).count(), 1);
    Ok(())
}

#[test]
fn test_hooks_change_cells() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let drawn = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&drawn);
    let call = TableOptions::from_json(&people(3))?
        .will_parse_cell(|data| {
            if data.section == Section::Body && data.row_index == 1 {
                data.cell.text = vec!["changed".to_string()];
                data.cell.styles.fill_color = Color::rgb(40, 170, 100).into();
            }
        })
        .did_draw_cell(move |data| {
            if data.section == Section::Body
                && data.column.index == 0
                && let Ok(mut drawn) = sink.lock()
            {
                drawn.push((data.cell.text.clone(), data.cell.styles.fill_color));
            }
        });

    let mut t = TestDocument::new();
    t.draw(call)?;

    let drawn = drawn.lock().map_err(|e| e.to_string())?;
    assert_eq!(drawn.len(), 3);
    assert_eq!(drawn[0].1, Paint::Solid(Color::gray(245)));
    assert_eq!(drawn[1].0, vec!["changed".to_string()]);
    assert_eq!(drawn[1].1, Paint::Solid(Color::rgb(40, 170, 100)));
    assert_eq!(drawn[2].1, Paint::Solid(Color::gray(245)));
    Ok(())
}

#[test]
fn test_long_tables_break_across_pages() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut t = TestDocument::new();
    let summary = t.draw_json(people(100))?;

    assert!(summary.page_count >= 2);
    assert_eq!(summary.start_page, 1);
    assert_eq!(t.doc.page_count(), summary.end_page);

    let layout = t.engine.last_layout().ok_or("no layout")?;
    assert_eq!(layout.pages.len(), summary.page_count);
    for page in &layout.pages {
        assert_eq!(page.rows[0].section, Section::Head);
        assert!(page.final_y <= 297.0);
    }
    let body_rows: usize = layout
        .pages
        .iter()
        .map(|p| p.rows.iter().filter(|r| r.section == Section::Body).count())
        .sum();
    assert_eq!(body_rows, 100);
    Ok(())
}

#[test]
fn test_show_head_first_page_only() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut t = TestDocument::new();
    t.draw(TableOptions::from_json(&people(100))?.show_head(ShowHead::FirstPage))?;

    let layout = t.engine.last_layout().ok_or("no layout")?;
    assert!(layout.pages.len() >= 2);
    assert_eq!(layout.pages[0].rows[0].section, Section::Head);
    for page in &layout.pages[1..] {
        assert!(page.rows.iter().all(|r| r.section != Section::Head));
    }
    Ok(())
}

#[test]
fn test_tables_stack_below_each_other() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut t = TestDocument::new();
    let first = t.draw_json(people(3))?;
    let second = t.draw_json(people(3))?;

    assert!(second.start_y > first.final_y);
    assert_eq!(t.doc.previous(), Some(&second));
    assert_eq!(t.doc.next_start_y(10.0), Some(second.final_y + 10.0));
    Ok(())
}

#[test]
fn test_page_break_modes() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut t = TestDocument::new();
    let avoided = t.draw(
        TableOptions::from_json(&people(10))?
            .start_y(250.0)
            .page_break(PageBreak::Avoid),
    )?;
    assert_eq!(avoided.start_page, 2);
    assert_eq!(avoided.page_count, 1);

    let mut t = TestDocument::new();
    let always = t.draw(TableOptions::from_json(&people(1))?.page_break(PageBreak::Always))?;
    assert_eq!(always.start_page, 2);

    // Legacy spelling
    let mut t = TestDocument::new();
    let legacy = t.draw_json(with(people(10), json!({"startY": 250, "avoidTableSplit": true})))?;
    assert_eq!(legacy.start_page, 2);
    Ok(())
}

#[test]
fn test_set_page_draws_next_to_previous_table() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut t = TestDocument::new();
    t.draw_json(with(people(60), json!({"margin": {"right": 107}})))?;
    assert!(t.doc.page_number() > 1);

    t.doc.set_page(1)?;
    let right = t.draw_json(with(people(3), json!({"startY": 20, "margin": {"left": 107}})))?;
    assert_eq!(right.start_page, 1);
    Ok(())
}

#[test]
fn test_spans() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let drawn = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&drawn);
    let options = json!({
        "head": [
            [{"content": "People", "colSpan": 3}],
            ["ID", "Name", "Age"]
        ],
        "body": [
            [{"content": 1, "rowSpan": 2}, "Simon", 25],
            ["Karl", 20],
            [2, "Hanna", 21]
        ],
        "theme": "grid"
    });
    let call = TableOptions::from_json(&options)?.did_draw_cell(move |data| {
        if let Ok(mut drawn) = sink.lock() {
            drawn.push((data.section, data.row_index, data.column.index, data.cell.rect));
        }
    });

    let mut t = TestDocument::new();
    t.draw(call)?;

    let drawn = drawn.lock().map_err(|e| e.to_string())?;
    let head_cells: Vec<_> = drawn.iter().filter(|c| c.0 == Section::Head && c.1 == 0).collect();
    assert_eq!(head_cells.len(), 1);

    let covered = drawn.iter().find(|c| c.0 == Section::Body && c.1 == 1 && c.2 == 0);
    assert!(covered.is_none());
    let karl = drawn.iter().find(|c| c.0 == Section::Body && c.1 == 1 && c.2 == 1);
    assert!(karl.is_some());

    let layout = t.engine.last_layout().ok_or("no layout")?;
    let body_heights: Vec<f32> = layout.pages[0]
        .rows
        .iter()
        .filter(|r| r.section == Section::Body)
        .map(|r| r.height)
        .collect();
    let spanning = drawn
        .iter()
        .find(|c| c.0 == Section::Body && c.1 == 0 && c.2 == 0)
        .and_then(|c| c.3)
        .ok_or("spanning cell not drawn")?;
    assert!((spanning.height - (body_heights[0] + body_heights[1])).abs() < 1e-3);
    Ok(())
}

#[test]
fn test_theme_reaches_cells() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let fills = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&fills);
    let call = TableOptions::from_json(&people(1))?
        .theme(Theme::Grid)
        .did_parse_cell(move |data| {
            if data.column.index == 0
                && let Ok(mut fills) = sink.lock()
            {
                fills.push((data.section, data.cell.styles.fill_color, data.cell.styles.line_width));
            }
        });

    let mut t = TestDocument::new();
    t.draw(call)?;

    let fills = fills.lock().map_err(|e| e.to_string())?;
    assert_eq!(fills[0], (Section::Head, Paint::Solid(Color::rgb(26, 188, 156)), 0.0));
    assert_eq!(fills[1].0, Section::Body);
    assert!(fills[1].2 > 0.0);
    Ok(())
}

#[test]
fn test_engine_errors() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut t = TestDocument::new();
    let err = t.draw(TableOptions::new()).unwrap_err();
    assert!(matches!(err, AutoTableError::Engine(EngineError::NoContent)));

    let err = t.draw(TableOptions::new().html("#table")).unwrap_err();
    assert!(matches!(err, AutoTableError::Engine(EngineError::Draw(_))));

    let err = t
        .draw_json(with(people(1), json!({"margin": [0, 120]})))
        .unwrap_err();
    assert!(matches!(err, AutoTableError::Engine(EngineError::DoesNotFit(_))));

    assert!(t.doc.previous().is_none());
    Ok(())
}

#[test]
fn test_engine_as_trait_object() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut engine: Box<dyn TableEngine> = Box::new(DryRunEngine::new());
    let mut t = TestDocument::new();
    let call = TableOptions::from_json(&json!({"head": head(), "body": body(2)}))?;
    let summary = t.doc.auto_table(&t.global, call, engine.as_mut())?;

    assert_eq!(summary.row_count, 3);
    assert_eq!(engine.name(), "dry-run");
    Ok(())
}
