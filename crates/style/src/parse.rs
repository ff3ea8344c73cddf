//! Parses cell styles from untyped option data.
//!
//! Each property is checked on its own so a bad value is reported against
//! the property it was given for, instead of as one opaque serde error.
//! Property names are matched in camelCase, kebab-case or snake_case.

use crate::cell::CellStyles;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while reading style data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Style must be an object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("Invalid type for '{property}': expected {expected}, got {found}")]
    InvalidType {
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

/// A short name for the JSON type of `value`, used in error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field<T: DeserializeOwned>(
    property: &str,
    expected: &'static str,
    value: &Value,
) -> Result<T, StyleError> {
    T::deserialize(value).map_err(|_| StyleError::InvalidType {
        property: property.to_string(),
        expected,
        found: value_kind(value),
    })
}

/// Parse a single `CellStyles` from a JSON object.
///
/// `null` values are treated as unset. Unknown properties are logged and
/// skipped.
pub fn parse_cell_styles(value: &Value) -> Result<CellStyles, StyleError> {
    let obj = value.as_object().ok_or(StyleError::NotAnObject {
        found: value_kind(value),
    })?;

    let mut style = CellStyles::default();

    for (key, val) in obj {
        if val.is_null() {
            continue;
        }
        let normalized_key = key.replace(['-', '_'], "").to_lowercase();

        match normalized_key.as_str() {
            "font" => style.font = Some(field(key, "font name", val)?),
            "fontstyle" => style.font_style = Some(field(key, "font style", val)?),
            "overflow" => style.overflow = Some(field(key, "overflow mode", val)?),
            "fillcolor" => style.fill_color = Some(field(key, "color or false", val)?),
            "textcolor" => style.text_color = Some(field(key, "color", val)?),
            "halign" => style.halign = Some(field(key, "horizontal alignment", val)?),
            "valign" => style.valign = Some(field(key, "vertical alignment", val)?),
            "fontsize" => style.font_size = Some(field(key, "number", val)?),
            "cellpadding" => style.cell_padding = Some(field(key, "spacing", val)?),
            "linecolor" => style.line_color = Some(field(key, "color", val)?),
            "linewidth" => style.line_width = Some(field(key, "number", val)?),
            "cellwidth" => style.cell_width = Some(field(key, "width", val)?),
            "mincellheight" => style.min_cell_height = Some(field(key, "number", val)?),
            "mincellwidth" => style.min_cell_width = Some(field(key, "number", val)?),
            _ => warn!("Ignoring unknown style property '{}'", key),
        }
    }

    style.validate()?;
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontStyle;
    use crate::text::{HAlign, Overflow};
    use autotable_types::{Color, Paint};
    use serde_json::json;

    #[test]
    fn test_parse_cell_styles() {
        let style = parse_cell_styles(&json!({
            "fillColor": [41, 128, 185],
            "textColor": 255,
            "fontStyle": "bold",
            "halign": "center",
            "overflow": "ellipsize",
            "cellPadding": 0.5,
            "fontSize": 8
        }))
        .unwrap();

        assert_eq!(style.fill_color, Some(Paint::Solid(Color::rgb(41, 128, 185))));
        assert_eq!(style.text_color, Some(Color::white()));
        assert_eq!(style.font_style, Some(FontStyle::Bold));
        assert_eq!(style.halign, Some(HAlign::Center));
        assert_eq!(style.overflow, Some(Overflow::Ellipsize));
        assert_eq!(style.font_size, Some(8.0));
    }

    #[test]
    fn test_kebab_and_snake_names() {
        let style = parse_cell_styles(&json!({"font-size": 9, "line_width": 0.2})).unwrap();
        assert_eq!(style.font_size, Some(9.0));
        assert_eq!(style.line_width, Some(0.2));
    }

    #[test]
    fn test_wrong_type_is_reported_per_property() {
        let err = parse_cell_styles(&json!({"fontSize": "large"})).unwrap_err();
        assert_eq!(
            err,
            StyleError::InvalidType {
                property: "fontSize".to_string(),
                expected: "number",
                found: "string",
            }
        );
    }

    #[test]
    fn test_non_object_and_out_of_range() {
        assert!(matches!(
            parse_cell_styles(&json!([1, 2])),
            Err(StyleError::NotAnObject { found: "array" })
        ));
        assert!(matches!(
            parse_cell_styles(&json!({"fontSize": -3})),
            Err(StyleError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_and_null_properties_are_skipped() {
        let style = parse_cell_styles(&json!({"sparkle": true, "font": null})).unwrap();
        assert!(style.is_empty());
    }
}
