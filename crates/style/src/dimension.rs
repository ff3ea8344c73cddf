//! Defines primitives for widths and box spacing.
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A column or table width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Width {
    /// Share the available width with other auto columns.
    #[default]
    Auto,
    /// As wide as the content needs, without line breaks.
    Wrap,
    /// A fixed width in document units.
    Fixed(f32),
}

impl Serialize for Width {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Width::Auto => serializer.serialize_str("auto"),
            Width::Wrap => serializer.serialize_str("wrap"),
            Width::Fixed(w) => serializer.serialize_f32(*w),
        }
    }
}

impl<'de> Deserialize<'de> for Width {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WidthDef {
            Num(f32),
            Str(String),
        }

        match WidthDef::deserialize(deserializer)? {
            WidthDef::Num(n) => Ok(Width::Fixed(n)),
            WidthDef::Str(s) => match s.to_lowercase().as_str() {
                "auto" => Ok(Width::Auto),
                "wrap" => Ok(Width::Wrap),
                _ => Err(de::Error::custom(format!(
                    "Invalid width: '{}', expected 'auto', 'wrap' or a number",
                    s
                ))),
            },
        }
    }
}

/// Resolved spacing around a box, in document units.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Spacing as written in options, where any side may be left out.
///
/// Missing sides fall back to whatever the spacing is applied over, so
/// `margin: {top: 30}` only moves the top edge.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Spacing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
}

impl Spacing {
    pub fn all(value: f32) -> Self {
        Self {
            top: Some(value),
            right: Some(value),
            bottom: Some(value),
            left: Some(value),
        }
    }

    pub fn top(value: f32) -> Self {
        Self {
            top: Some(value),
            ..Self::default()
        }
    }

    /// Fills in missing sides from `base`.
    pub fn apply_to(&self, base: &Margins) -> Margins {
        Margins {
            top: self.top.unwrap_or(base.top),
            right: self.right.unwrap_or(base.right),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
        }
    }

    /// Fills in missing sides with a single default value.
    pub fn resolve(&self, default: f32) -> Margins {
        self.apply_to(&Margins::all(default))
    }

    pub fn sides(&self) -> impl Iterator<Item = f32> + '_ {
        [self.top, self.right, self.bottom, self.left]
            .into_iter()
            .flatten()
    }

    /// CSS shorthand order: 1, 2, 3 or 4 values.
    fn from_values(values: &[f32]) -> Result<Self, String> {
        match *values {
            [all] => Ok(Spacing::all(all)),
            [v, h] => Ok(Spacing {
                top: Some(v),
                right: Some(h),
                bottom: Some(v),
                left: Some(h),
            }),
            [t, h, b] => Ok(Spacing {
                top: Some(t),
                right: Some(h),
                bottom: Some(b),
                left: Some(h),
            }),
            [t, r, b, l] => Ok(Spacing {
                top: Some(t),
                right: Some(r),
                bottom: Some(b),
                left: Some(l),
            }),
            _ => Err(format!(
                "Invalid spacing shorthand: expected 1 to 4 values, got {}",
                values.len()
            )),
        }
    }

    /// Parse shorthand like "10" or "10 5"
    fn parse_shorthand(input: &str) -> Result<Self, String> {
        let mut values = Vec::new();
        for part in input.split_whitespace() {
            values.push(
                part.parse::<f32>()
                    .map_err(|e| format!("Invalid number '{}': {}", part, e))?,
            );
        }
        Self::from_values(&values)
    }
}

impl<'de> Deserialize<'de> for Spacing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SpacingVisitor;
        impl<'de> de::Visitor<'de> for SpacingVisitor {
            type Value = Spacing;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number, an array of 1 to 4 numbers or a map of sides")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Spacing, E>
            where
                E: de::Error,
            {
                Ok(Spacing::all(value as f32))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Spacing, E>
            where
                E: de::Error,
            {
                Ok(Spacing::all(value as f32))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Spacing, E>
            where
                E: de::Error,
            {
                Ok(Spacing::all(value as f32))
            }

            fn visit_str<E>(self, value: &str) -> Result<Spacing, E>
            where
                E: de::Error,
            {
                Spacing::parse_shorthand(value).map_err(E::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Spacing, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(v) = seq.next_element::<f32>()? {
                    values.push(v);
                }
                Spacing::from_values(&values).map_err(de::Error::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Spacing, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut spacing = Spacing::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "top" => spacing.top = Some(map.next_value()?),
                        "right" => spacing.right = Some(map.next_value()?),
                        "bottom" => spacing.bottom = Some(map.next_value()?),
                        "left" => spacing.left = Some(map.next_value()?),
                        "horizontal" => {
                            let h: f32 = map.next_value()?;
                            spacing.left = Some(h);
                            spacing.right = Some(h);
                        }
                        "vertical" => {
                            let v: f32 = map.next_value()?;
                            spacing.top = Some(v);
                            spacing.bottom = Some(v);
                        }
                        other => {
                            return Err(de::Error::unknown_field(
                                other,
                                &["top", "right", "bottom", "left", "horizontal", "vertical"],
                            ));
                        }
                    }
                }
                Ok(spacing)
            }
        }
        deserializer.deserialize_any(SpacingVisitor)
    }
}
