mod common;

use autotable::style::{FontStyle, Theme};
use autotable::types::{Color, ColumnKey, Paint};
use autotable::{ConfigError, Document, GlobalDefaults, ShowHead, TableOptions, resolve};
use common::TestResult;
use serde_json::json;

fn layer(value: serde_json::Value) -> Result<TableOptions, ConfigError> {
    TableOptions::from_json(&value)
}

#[test]
fn test_global_only_keys_pass_through() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let global = layer(json!({"theme": "grid", "startY": 30, "showHead": "firstPage"}))?;
    let config = resolve(Some(&global), None, None)?;

    assert_eq!(config.theme, Theme::Grid);
    assert_eq!(config.start_y, Some(30.0));
    assert_eq!(config.show_head, ShowHead::FirstPage);
    Ok(())
}

#[test]
fn test_document_beats_global() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let global = layer(json!({"theme": "grid", "tableLineWidth": 0.5}))?;
    let document = layer(json!({"theme": "plain"}))?;
    let config = resolve(Some(&global), Some(&document), None)?;

    assert_eq!(config.theme, Theme::Plain);
    assert_eq!(config.table_line_width, 0.5);
    Ok(())
}

#[test]
fn test_call_beats_document_and_global() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let global = layer(json!({"theme": "grid", "startY": 10}))?;
    let document = layer(json!({"theme": "plain", "startY": 20}))?;
    let call = layer(json!({"theme": "striped", "startY": 30}))?;
    let config = resolve(Some(&global), Some(&document), Some(&call))?;

    assert_eq!(config.theme, Theme::Striped);
    assert_eq!(config.start_y, Some(30.0));
    Ok(())
}

#[test]
fn test_clearing_global_keeps_document_values() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut global = GlobalDefaults::new();
    global.set(Some(layer(json!({"theme": "grid", "startY": 10}))?));
    let mut doc = Document::new();
    doc.set_defaults(Some(layer(json!({"startY": 25}))?));

    global.set(Some(layer(json!(null))?));
    let config = doc.resolve(&global, &TableOptions::new())?;
    assert_eq!(config.start_y, Some(25.0));
    assert_eq!(config.theme, Theme::Striped);

    global.clear();
    let config = doc.resolve(&global, &TableOptions::new())?;
    assert_eq!(config.start_y, Some(25.0));
    Ok(())
}

#[test]
fn test_clearing_document_keeps_global_values() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut global = GlobalDefaults::new();
    global.set(Some(layer(json!({"theme": "grid"}))?));
    let mut doc = Document::new();
    doc.set_defaults(Some(layer(json!({"theme": "plain"}))?));

    doc.set_defaults(None);

    let config = doc.resolve(&global, &TableOptions::new())?;
    assert_eq!(config.theme, Theme::Grid);
    Ok(())
}

#[test]
fn test_nested_maps_merge_key_by_key() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let global = layer(json!({
        "columnStyles": {"id": {"fontStyle": "bold"}},
        "styles": {"fontSize": 8}
    }))?;
    let call = layer(json!({
        "columnStyles": {"email": {"fontSize": 6}, "id": {"textColor": 255}},
        "styles": {"overflow": "hidden"}
    }))?;
    let config = resolve(Some(&global), None, Some(&call))?;

    let id = config
        .column_styles
        .get(&ColumnKey::from("id"))
        .ok_or("id column style missing")?;
    assert_eq!(id.font_style, Some(FontStyle::Bold));
    assert_eq!(id.text_color, Some(Color::white()));
    assert!(config.column_styles.get(&ColumnKey::from("email")).is_some());
    assert_eq!(config.styles.font_size, Some(8.0));
    assert!(config.styles.overflow.is_some());
    Ok(())
}

#[test]
fn test_three_scope_defaults_scenario() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut global = GlobalDefaults::new();
    global.set(Some(layer(json!({"columnStyles": {"id": {"fontStyle": "bold"}}}))?));
    let mut doc = Document::new();
    doc.set_defaults(Some(layer(json!({"headStyles": {"fillColor": [155, 89, 182]}}))?));
    let call = layer(json!({"headStyles": {"fillColor": [231, 76, 60]}}))?;

    let config = doc.resolve(&global, &call)?;

    let id = config
        .column_styles
        .get(&ColumnKey::from("id"))
        .ok_or("id column style missing")?;
    assert_eq!(id.font_style, Some(FontStyle::Bold));
    assert_eq!(
        config.head_styles.fill_color,
        Some(Paint::Solid(Color::rgb(231, 76, 60)))
    );

    let value = serde_json::to_value(&config)?;
    assert_eq!(value["columnStyles"]["id"]["fontStyle"], json!("bold"));
    assert_eq!(value["headStyles"]["fillColor"], json!([231, 76, 60]));
    Ok(())
}

#[test]
fn test_resolution_is_pure() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let global = layer(json!({"styles": {"fontSize": 8}}))?;
    let call = layer(json!({"styles": {"fontSize": 12}}))?;

    let first = resolve(Some(&global), None, Some(&call))?;
    let second = resolve(Some(&global), None, Some(&call))?;

    assert_eq!(
        serde_json::to_value(&first)?,
        serde_json::to_value(&second)?
    );
    assert_eq!(global.styles.font_size, Some(8.0));
    Ok(())
}

#[test]
fn test_wrongly_typed_values_are_rejected() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cases = [
        (json!({"theme": 3}), "theme"),
        (json!({"margin": "wide"}), "margin"),
        (json!({"styles": {"fontSize": "big"}}), "styles"),
        (json!({"columnStyles": {"id": {"fillColor": [1, 2]}}}), "columnStyles.id"),
        (json!({"tableLineColor": {"r": 1}}), "tableLineColor"),
        (json!({"body": "rows"}), "body"),
        (json!({"willDrawCell": "highlight"}), "willDrawCell"),
    ];
    for (options, key) in cases {
        let err = layer(options).expect_err(key);
        assert_eq!(err.key(), Some(key), "{}", err);
    }
}

#[test]
fn test_layer_file_loading() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("global.json");
    std::fs::write(&path, r#"{"theme": "plain", "margin": [10, 20]}"#)?;

    let global = autotable::load_layer(&path)?;
    let config = resolve(Some(&global), None, None)?;

    assert_eq!(config.theme, Theme::Plain);
    assert_eq!(config.margin.top, 10.0);
    assert_eq!(config.margin.left, 20.0);
    Ok(())
}
