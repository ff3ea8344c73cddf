//! Table content as given in options: column definitions and head, body
//! and foot rows.
//!
//! Rows come either as arrays (cells addressed by position) or as keyed
//! objects (cells addressed by data key, in insertion order). A cell is a
//! plain value or a `{content, colSpan, rowSpan, styles}` object.

use crate::error::ConfigError;
use autotable_style::{CellStyles, parse_cell_styles};
use autotable_types::ColumnKey;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

const CELL_KEYS: [&str; 4] = ["content", "colSpan", "rowSpan", "styles"];

/// Largest `colSpan` or `rowSpan` a cell may carry.
pub const MAX_SPAN: usize = 1000;

/// One input cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellInput {
    /// The raw value as written; numbers and booleans are kept as-is.
    pub content: Value,
    pub col_span: usize,
    pub row_span: usize,
    pub styles: CellStyles,
}

impl CellInput {
    pub fn new(content: impl Into<Value>) -> Self {
        Self {
            content: content.into(),
            col_span: 1,
            row_span: 1,
            styles: CellStyles::default(),
        }
    }

    pub fn col_span(mut self, span: usize) -> Self {
        self.col_span = span.clamp(1, MAX_SPAN);
        self
    }

    pub fn row_span(mut self, span: usize) -> Self {
        self.row_span = span.clamp(1, MAX_SPAN);
        self
    }

    pub fn styles(mut self, styles: CellStyles) -> Self {
        self.styles = styles;
        self
    }

    /// The text the cell displays.
    pub fn text(&self) -> String {
        match &self.content {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn is_plain(&self) -> bool {
        self.col_span == 1 && self.row_span == 1 && self.styles.is_empty()
    }

    fn parse(path: &str, value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(obj) => {
                if !obj.keys().any(|k| CELL_KEYS.contains(&k.as_str())) {
                    return Err(ConfigError::invalid_type(
                        path,
                        "cell value or {content, colSpan, rowSpan, styles}",
                        value,
                    ));
                }
                let mut cell = CellInput::new(obj.get("content").cloned().unwrap_or(Value::Null));
                if let Some(span) = obj.get("colSpan") {
                    cell.col_span = parse_span(&format!("{}.colSpan", path), span)?;
                }
                if let Some(span) = obj.get("rowSpan") {
                    cell.row_span = parse_span(&format!("{}.rowSpan", path), span)?;
                }
                if let Some(styles) = obj.get("styles").filter(|s| !s.is_null()) {
                    cell.styles = parse_cell_styles(styles).map_err(|source| ConfigError::Style {
                        key: format!("{}.styles", path),
                        source,
                    })?;
                }
                Ok(cell)
            }
            Value::Array(_) => Err(ConfigError::invalid_type(path, "cell value", value)),
            scalar => Ok(CellInput::new(scalar.clone())),
        }
    }
}

macro_rules! cell_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CellInput {
                fn from(value: $ty) -> Self {
                    CellInput::new(value)
                }
            }
        )*
    };
}

cell_from!(Value, String, &str, bool, i32, i64, u32, u64, usize, f32, f64);

impl Serialize for CellInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_plain() {
            return self.content.serialize(serializer);
        }
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("content", &self.content)?;
        if self.col_span != 1 {
            map.serialize_entry("colSpan", &self.col_span)?;
        }
        if self.row_span != 1 {
            map.serialize_entry("rowSpan", &self.row_span)?;
        }
        if !self.styles.is_empty() {
            map.serialize_entry("styles", &self.styles)?;
        }
        map.end()
    }
}

fn parse_span(path: &str, value: &Value) -> Result<usize, ConfigError> {
    let span = value
        .as_u64()
        .ok_or_else(|| ConfigError::invalid_type(path, "positive integer", value))?;
    match usize::try_from(span) {
        Ok(span @ 1..=MAX_SPAN) => Ok(span),
        Ok(0) => Err(ConfigError::invalid_value(path, "span must be at least 1")),
        _ => Err(ConfigError::invalid_value(
            path,
            format!("span must be at most {}", MAX_SPAN),
        )),
    }
}

/// One input row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowInput {
    /// Cells addressed by position.
    Array(Vec<CellInput>),
    /// Cells addressed by data key, in the order given.
    Keyed(Vec<(ColumnKey, CellInput)>),
}

impl RowInput {
    pub fn array<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CellInput>,
    {
        RowInput::Array(cells.into_iter().map(Into::into).collect())
    }

    pub fn keyed<I, K, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<ColumnKey>,
        C: Into<CellInput>,
    {
        RowInput::Keyed(
            cells
                .into_iter()
                .map(|(k, c)| (k.into(), c.into()))
                .collect(),
        )
    }

    /// Looks up the cell for a column, by data key for keyed rows and by
    /// position for array rows.
    pub fn cell(&self, column: &ColumnInput, index: usize) -> Option<&CellInput> {
        match self {
            RowInput::Array(cells) => cells.get(index),
            RowInput::Keyed(cells) => cells
                .iter()
                .find(|(k, _)| *k == column.data_key)
                .map(|(_, c)| c),
        }
    }

    /// Replaces or inserts the cell for `key` in a keyed row. Array rows
    /// are addressed by the key's position.
    pub fn set(&mut self, key: impl Into<ColumnKey>, cell: impl Into<CellInput>) {
        let key = key.into();
        let cell = cell.into();
        match self {
            RowInput::Keyed(cells) => match cells.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => *existing = cell,
                None => cells.push((key, cell)),
            },
            RowInput::Array(cells) => {
                if let Some(index) = key.as_index() {
                    if index >= cells.len() {
                        cells.resize(index + 1, CellInput::new(Value::Null));
                    }
                    cells[index] = cell;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RowInput::Array(cells) => cells.len(),
            RowInput::Keyed(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column count including spans.
    pub fn span_width(&self) -> usize {
        match self {
            RowInput::Array(cells) => cells.iter().fold(0, |w, c| w.saturating_add(c.col_span)),
            RowInput::Keyed(cells) => cells
                .iter()
                .fold(0, |w, (_, c)| w.saturating_add(c.col_span)),
        }
    }

    /// Column keys in the order they appear in this row.
    pub fn keys(&self) -> Vec<ColumnKey> {
        match self {
            RowInput::Array(cells) => (0..cells.len()).map(ColumnKey::from_index).collect(),
            RowInput::Keyed(cells) => cells.iter().map(|(k, _)| k.clone()).collect(),
        }
    }

    fn parse(path: &str, value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| CellInput::parse(&format!("{}[{}]", path, i), v))
                .collect::<Result<Vec<_>, _>>()
                .map(RowInput::Array),
            Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| {
                    CellInput::parse(&format!("{}.{}", path, k), v)
                        .map(|c| (ColumnKey::from(k.as_str()), c))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RowInput::Keyed),
            _ => Err(ConfigError::invalid_type(path, "row (array or object)", value)),
        }
    }
}

impl Serialize for RowInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RowInput::Array(cells) => cells.serialize(serializer),
            RowInput::Keyed(cells) => {
                let mut map = serializer.serialize_map(Some(cells.len()))?;
                for (k, c) in cells {
                    map.serialize_entry(k.as_str(), c)?;
                }
                map.end()
            }
        }
    }
}

/// A `{content, ...}` cell object, as opposed to keyed row data that
/// happens to have a `content` column.
fn is_cell_object(obj: &Map<String, Value>) -> bool {
    obj.contains_key("content") && obj.keys().all(|k| CELL_KEYS.contains(&k.as_str()))
}

/// Parses a section (`head`, `body`, `foot`).
///
/// Accepts a list of rows, or a single row given directly: a flat array of
/// cell values, or one keyed object.
pub fn parse_rows(key: &str, value: &Value) -> Result<Vec<RowInput>, ConfigError> {
    match value {
        Value::Array(items) => {
            let single_row = !items.is_empty()
                && items.iter().all(|item| match item {
                    Value::Array(_) => false,
                    Value::Object(obj) => is_cell_object(obj),
                    _ => true,
                });
            if single_row {
                return Ok(vec![RowInput::parse(&format!("{}[0]", key), value)?]);
            }
            items
                .iter()
                .enumerate()
                .map(|(i, row)| RowInput::parse(&format!("{}[{}]", key, i), row))
                .collect()
        }
        Value::Object(_) => Ok(vec![RowInput::parse(key, value)?]),
        _ => Err(ConfigError::invalid_type(key, "array of rows or a single row", value)),
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<CellInput>,
    pub data_key: ColumnKey,
}

impl ColumnInput {
    pub fn new(header: impl Into<CellInput>, data_key: impl Into<ColumnKey>) -> Self {
        Self {
            header: Some(header.into()),
            data_key: data_key.into(),
        }
    }

    /// A column with no header, addressed by position.
    pub fn positional(index: usize) -> Self {
        Self {
            header: None,
            data_key: ColumnKey::from_index(index),
        }
    }
}

/// Parses `columns`: a list of header strings, a list of
/// `{header, dataKey}` objects (legacy `{title, dataKey}` too), or a map of
/// data key to header.
pub fn parse_columns(key: &str, value: &Value) -> Result<Vec<ColumnInput>, ConfigError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = format!("{}[{}]", key, i);
                match item {
                    Value::Object(obj) => {
                        let header = obj
                            .get("header")
                            .or_else(|| obj.get("title"))
                            .map(|h| CellInput::parse(&format!("{}.header", path), h))
                            .transpose()?;
                        let data_key = match obj.get("dataKey").or_else(|| obj.get("key")) {
                            None | Some(Value::Null) => ColumnKey::from_index(i),
                            Some(Value::String(s)) => ColumnKey::from(s.as_str()),
                            Some(Value::Number(n)) => ColumnKey::from(n.to_string()),
                            Some(other) => {
                                return Err(ConfigError::invalid_type(
                                    format!("{}.dataKey", path),
                                    "string or number",
                                    other,
                                ));
                            }
                        };
                        Ok(ColumnInput { header, data_key })
                    }
                    Value::Array(_) => Err(ConfigError::invalid_type(
                        path,
                        "header or {header, dataKey}",
                        item,
                    )),
                    scalar => Ok(ColumnInput {
                        header: Some(CellInput::new(scalar.clone())),
                        data_key: ColumnKey::from_index(i),
                    }),
                }
            })
            .collect(),
        Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| {
                Ok(ColumnInput {
                    header: Some(CellInput::parse(&format!("{}.{}", key, k), v)?),
                    data_key: ColumnKey::from(k.as_str()),
                })
            })
            .collect(),
        _ => Err(ConfigError::invalid_type(key, "array or object of columns", value)),
    }
}
