use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// An opaque RGB color.
///
/// Accepts the shapes table options are usually written in:
/// - `[r, g, b]`
/// - a single gray level, e.g. `255`
/// - a hex string, `"#2980b9"` or `"#fff"`
/// - a map, `{ "r": 41, "g": 128, "b": 185 }`
///
/// Always serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    pub const fn white() -> Self {
        Self::gray(255)
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;
        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex digit '{}' in color: {}", c, s));
        }

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.r, self.g, self.b].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Gray(u8),
            Rgb([u8; 3]),
            Str(String),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Gray(v) => Ok(Color::gray(v)),
            ColorDef::Rgb([r, g, b]) => Ok(Color { r, g, b }),
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}

/// A fill or stroke that may be switched off.
///
/// `false` in option data means "do not paint"; anything else is a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Transparent,
    Solid(Color),
}

impl Paint {
    pub fn color(&self) -> Option<Color> {
        match self {
            Paint::Transparent => None,
            Paint::Solid(c) => Some(*c),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl Serialize for Paint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Paint::Transparent => serializer.serialize_bool(false),
            Paint::Solid(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Paint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PaintDef {
            Flag(bool),
            Solid(Color),
        }

        match PaintDef::deserialize(deserializer)? {
            PaintDef::Flag(false) => Ok(Paint::Transparent),
            PaintDef::Flag(true) => Err(de::Error::custom(
                "`true` is not a color; use `false` to disable painting",
            )),
            PaintDef::Solid(c) => Ok(Paint::Solid(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_malformed_hex_is_an_error() {
        assert!(Color::parse_hex("#é1").is_err());
        assert!(Color::parse_hex("#12345é").is_err());
        assert!(Color::parse_hex("#ggg").is_err());
        assert!(serde_json::from_value::<Color>(json!("#é1")).is_err());
        assert_eq!(Color::parse_hex("#abc"), Ok(Color::rgb(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn test_color_shapes() {
        let rgb: Color = serde_json::from_value(json!([155, 89, 182])).unwrap();
        assert_eq!(rgb, Color::rgb(155, 89, 182));

        let gray: Color = serde_json::from_value(json!(240)).unwrap();
        assert_eq!(gray, Color::gray(240));

        let hex: Color = serde_json::from_value(json!("#abc")).unwrap();
        assert_eq!(hex, Color::rgb(0xaa, 0xbb, 0xcc));

        let map: Color = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
        assert_eq!(map, Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_color_rejects_out_of_range_channel() {
        assert!(serde_json::from_value::<Color>(json!([256, 0, 0])).is_err());
        assert!(serde_json::from_value::<Color>(json!("red")).is_err());
    }

    #[test]
    fn test_paint_false_is_transparent() {
        let p: Paint = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(p, Paint::Transparent);
        assert_eq!(serde_json::to_value(p).unwrap(), json!(false));
        assert!(serde_json::from_value::<Paint>(json!(true)).is_err());
    }

    #[test]
    fn test_color_serializes_as_triplet() {
        let value = serde_json::to_value(Paint::Solid(Color::rgb(231, 76, 60))).unwrap();
        assert_eq!(value, json!([231, 76, 60]));
    }
}
