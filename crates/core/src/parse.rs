//! Builds configuration layers from untyped option data.
//!
//! Each recognised key is type-checked on its own; a value of the wrong
//! shape is reported against its key rather than coerced. Unknown keys are
//! logged and skipped. Older option names are still accepted.

use crate::content::{parse_columns, parse_rows};
use crate::error::ConfigError;
use crate::options::{PageBreak, RowPageBreak, ShowFoot, ShowHead, TableOptions};
use autotable_style::{CellStyles, parse_cell_styles, value_kind};
use autotable_types::ColumnKey;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Keys that name hooks. Functions cannot be expressed in data.
const HOOK_KEYS: [&str; 14] = [
    "willParseCell",
    "didParseCell",
    "willDrawCell",
    "didDrawCell",
    "didDrawPage",
    "addPageContent",
    "beforePageContent",
    "afterPageContent",
    "createdHeaderCell",
    "createdCell",
    "drawHeaderRow",
    "drawHeaderCell",
    "drawRow",
    "drawCell",
];

fn typed<T: DeserializeOwned>(
    key: &str,
    expected: &'static str,
    value: &Value,
) -> Result<T, ConfigError> {
    T::deserialize(value).map_err(|_| ConfigError::invalid_type(key, expected, value))
}

fn style_layer(key: &str, value: &Value) -> Result<CellStyles, ConfigError> {
    parse_cell_styles(value).map_err(|source| ConfigError::Style {
        key: key.to_string(),
        source,
    })
}

fn keyword<T: Copy>(key: &str, value: &Value, choices: &[(&str, T)]) -> Result<T, ConfigError> {
    let s = value
        .as_str()
        .ok_or_else(|| ConfigError::invalid_type(key, "string", value))?;
    choices
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, v)| *v)
        .ok_or_else(|| {
            let names: Vec<&str> = choices.iter().map(|(n, _)| *n).collect();
            ConfigError::invalid_value(
                key,
                format!("'{}' is not one of: {}", s, names.join(", ")),
            )
        })
}

fn column_key(key: &str, value: &Value) -> Result<ColumnKey, ConfigError> {
    match value {
        Value::String(s) => Ok(ColumnKey::from(s.as_str())),
        Value::Number(n) if n.is_u64() => Ok(ColumnKey::from(n.to_string())),
        _ => Err(ConfigError::invalid_type(key, "column key or index", value)),
    }
}

fn parse_show_head(key: &str, value: &Value) -> Result<ShowHead, ConfigError> {
    match value {
        Value::Bool(true) => Ok(ShowHead::EveryPage),
        Value::Bool(false) => Ok(ShowHead::Never),
        _ => keyword(
            key,
            value,
            &[
                ("everyPage", ShowHead::EveryPage),
                ("firstPage", ShowHead::FirstPage),
                ("never", ShowHead::Never),
            ],
        ),
    }
}

fn parse_show_foot(key: &str, value: &Value) -> Result<ShowFoot, ConfigError> {
    match value {
        Value::Bool(true) => Ok(ShowFoot::EveryPage),
        Value::Bool(false) => Ok(ShowFoot::Never),
        _ => keyword(
            key,
            value,
            &[
                ("everyPage", ShowFoot::EveryPage),
                ("lastPage", ShowFoot::LastPage),
                ("never", ShowFoot::Never),
            ],
        ),
    }
}

impl TableOptions {
    /// Builds a layer from an options object. `null` gives the empty layer.
    pub fn from_json(value: &Value) -> Result<TableOptions, ConfigError> {
        let obj = match value {
            Value::Null => return Ok(TableOptions::default()),
            Value::Object(obj) => obj,
            other => {
                return Err(ConfigError::NotAnObject {
                    found: value_kind(other),
                });
            }
        };

        let mut options = TableOptions::default();
        let mut legacy_body = None;
        let mut avoid_table_split = None;

        for (key, val) in obj {
            let key = key.as_str();
            if HOOK_KEYS.contains(&key) {
                if !val.is_null() {
                    return Err(ConfigError::HookNotCallable {
                        key: key.to_string(),
                    });
                }
                continue;
            }
            if val.is_null() {
                continue;
            }

            match key {
                "columns" => options.columns = Some(parse_columns(key, val)?),
                "head" => options.head = Some(parse_rows(key, val)?),
                "body" => options.body = Some(parse_rows(key, val)?),
                "foot" => options.foot = Some(parse_rows(key, val)?),
                "content" | "data" => {
                    warn!("Option '{}' is deprecated, use 'body' instead", key);
                    legacy_body = Some(parse_rows(key, val)?);
                }
                "html" => options.html = Some(typed(key, "selector string", val)?),
                "useCss" => options.use_css = Some(typed(key, "boolean", val)?),
                "includeHiddenHtml" => {
                    options.include_hidden_html = Some(typed(key, "boolean", val)?)
                }

                "startY" => {
                    // `false` means "let the engine decide"
                    if val != &Value::Bool(false) {
                        options.start_y = Some(typed(key, "number", val)?);
                    }
                }
                "margin" => options.margin = Some(typed(key, "spacing", val)?),
                "pageBreak" => {
                    options.page_break = Some(keyword(
                        key,
                        val,
                        &[
                            ("auto", PageBreak::Auto),
                            ("avoid", PageBreak::Avoid),
                            ("always", PageBreak::Always),
                        ],
                    )?)
                }
                "avoidTableSplit" => {
                    warn!("Option 'avoidTableSplit' is deprecated, use pageBreak: 'avoid' instead");
                    avoid_table_split = Some(typed::<bool>(key, "boolean", val)?);
                }
                "rowPageBreak" => {
                    options.row_page_break = Some(keyword(
                        key,
                        val,
                        &[("auto", RowPageBreak::Auto), ("avoid", RowPageBreak::Avoid)],
                    )?)
                }
                "tableWidth" => options.table_width = Some(typed(key, "'auto', 'wrap' or number", val)?),
                "showHead" => options.show_head = Some(parse_show_head(key, val)?),
                "showFoot" => options.show_foot = Some(parse_show_foot(key, val)?),
                "tableLineWidth" => options.table_line_width = Some(typed(key, "number", val)?),
                "tableLineColor" => options.table_line_color = Some(typed(key, "color", val)?),
                "horizontalPageBreak" => {
                    options.horizontal_page_break = Some(typed(key, "boolean", val)?)
                }
                "horizontalPageBreakRepeat" => {
                    options.horizontal_page_break_repeat = Some(column_key(key, val)?)
                }

                "theme" => options.theme = Some(typed(key, "'striped', 'grid' or 'plain'", val)?),
                "styles" => options.styles = style_layer(key, val)?,
                "headStyles" => options.head_styles = style_layer(key, val)?,
                "bodyStyles" => options.body_styles = style_layer(key, val)?,
                "footStyles" => options.foot_styles = style_layer(key, val)?,
                "alternateRowStyles" => options.alternate_row_styles = style_layer(key, val)?,
                "columnStyles" => {
                    let columns = val
                        .as_object()
                        .ok_or_else(|| ConfigError::invalid_type(key, "object", val))?;
                    for (column, styles) in columns {
                        let path = format!("{}.{}", key, column);
                        options
                            .column_styles
                            .insert(column.as_str(), style_layer(&path, styles)?);
                    }
                }

                "allSectionHooks" => options.all_section_hooks = Some(typed(key, "boolean", val)?),
                _ => warn!("Ignoring unknown option '{}'", key),
            }
        }

        if options.body.is_none() {
            options.body = legacy_body;
        }
        if options.page_break.is_none()
            && let Some(avoid) = avoid_table_split
        {
            options.page_break = Some(if avoid { PageBreak::Avoid } else { PageBreak::Auto });
        }

        Ok(options)
    }

    /// Parses a layer from JSON text.
    pub fn from_json_str(json: &str) -> Result<TableOptions, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }
}

/// Loads a layer from a JSON file.
pub fn load_layer(path: impl AsRef<Path>) -> Result<TableOptions, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded options layer from {}", path.display());
    TableOptions::from_json_str(&source)
}

/// Normalises the argument shapes a table call accepts into one call layer:
/// - `(options)`
/// - `(startY, options)`
/// - `(columns, data)` and `(columns, data, options)`
pub fn parse_call_arguments(args: &[Value]) -> Result<TableOptions, ConfigError> {
    match args {
        [] => Ok(TableOptions::default()),
        [options] => TableOptions::from_json(options),
        [Value::Number(y), options] => {
            warn!("Passing startY as a separate argument is deprecated, use the startY option");
            let mut layer = TableOptions::from_json(options)?;
            if layer.start_y.is_none() {
                layer.start_y = Some(typed("startY", "number", &Value::Number(y.clone()))?);
            }
            Ok(layer)
        }
        [columns @ Value::Array(_), data @ Value::Array(_), rest @ ..] if rest.len() <= 1 => {
            warn!("The (columns, data) call form is deprecated, use the columns and body options");
            let mut layer = match rest.first() {
                Some(options) => TableOptions::from_json(options)?,
                None => TableOptions::default(),
            };
            layer.columns = Some(parse_columns("columns", columns)?);
            layer.body = Some(parse_rows("body", data)?);
            Ok(layer)
        }
        _ => Err(ConfigError::CallArguments(format!(
            "expected (options), (startY, options) or (columns, data[, options]); got {} argument(s) of types [{}]",
            args.len(),
            args.iter().map(value_kind).collect::<Vec<_>>().join(", ")
        ))),
    }
}
