//! Cell styles: the sparse form written in options and the computed form
//! a cell is drawn with.

use crate::dimension::{Margins, Spacing, Width};
use crate::font::FontStyle;
use crate::parse::StyleError;
use crate::text::{HAlign, Overflow, VAlign};
use autotable_types::{Color, Paint};
use serde::{Deserialize, Serialize};

/// A sparse set of cell style properties.
///
/// Every field is optional so styles from several sources can be layered;
/// only the fields that are set take part in a merge.
#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CellStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Overflow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halign: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valign: Option<VAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_padding: Option<Spacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<Width>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cell_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cell_width: Option<f32>,
}

impl CellStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn fill_color(mut self, paint: impl Into<Paint>) -> Self {
        self.fill_color = Some(paint.into());
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn halign(mut self, align: HAlign) -> Self {
        self.halign = Some(align);
        self
    }

    pub fn valign(mut self, align: VAlign) -> Self {
        self.valign = Some(align);
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn cell_padding(mut self, padding: Spacing) -> Self {
        self.cell_padding = Some(padding);
        self
    }

    pub fn line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color);
        self
    }

    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn cell_width(mut self, width: Width) -> Self {
        self.cell_width = Some(width);
        self
    }

    pub fn min_cell_height(mut self, height: f32) -> Self {
        self.min_cell_height = Some(height);
        self
    }

    pub fn min_cell_width(mut self, width: f32) -> Self {
        self.min_cell_width = Some(width);
        self
    }

    /// Merges properties from `to_apply` into `self`; set fields in
    /// `to_apply` win, unset fields leave `self` untouched.
    pub fn merge(&mut self, to_apply: &CellStyles) {
        if to_apply.font.is_some() { self.font = to_apply.font.clone(); }
        if to_apply.font_style.is_some() { self.font_style = to_apply.font_style; }
        if to_apply.overflow.is_some() { self.overflow = to_apply.overflow; }
        if to_apply.fill_color.is_some() { self.fill_color = to_apply.fill_color; }
        if to_apply.text_color.is_some() { self.text_color = to_apply.text_color; }
        if to_apply.halign.is_some() { self.halign = to_apply.halign; }
        if to_apply.valign.is_some() { self.valign = to_apply.valign; }
        if to_apply.font_size.is_some() { self.font_size = to_apply.font_size; }
        if to_apply.cell_padding.is_some() { self.cell_padding = to_apply.cell_padding; }
        if to_apply.line_color.is_some() { self.line_color = to_apply.line_color; }
        if to_apply.line_width.is_some() { self.line_width = to_apply.line_width; }
        if to_apply.cell_width.is_some() { self.cell_width = to_apply.cell_width; }
        if to_apply.min_cell_height.is_some() { self.min_cell_height = to_apply.min_cell_height; }
        if to_apply.min_cell_width.is_some() { self.min_cell_width = to_apply.min_cell_width; }
    }

    /// Returns a copy of `self` with `to_apply` merged on top.
    pub fn merged(&self, to_apply: &CellStyles) -> CellStyles {
        let mut out = self.clone();
        out.merge(to_apply);
        out
    }

    /// Rejects values no drawing engine can honour.
    pub fn validate(&self) -> Result<(), StyleError> {
        fn invalid(property: &str, value: impl ToString) -> StyleError {
            StyleError::InvalidValue {
                property: property.to_string(),
                value: value.to_string(),
            }
        }

        if let Some(size) = self.font_size
            && !(size > 0.0)
        {
            return Err(invalid("fontSize", size));
        }
        if let Some(width) = self.line_width
            && width < 0.0
        {
            return Err(invalid("lineWidth", width));
        }
        if let Some(Width::Fixed(width)) = self.cell_width
            && width < 0.0
        {
            return Err(invalid("cellWidth", width));
        }
        if let Some(height) = self.min_cell_height
            && height < 0.0
        {
            return Err(invalid("minCellHeight", height));
        }
        if let Some(width) = self.min_cell_width
            && width < 0.0
        {
            return Err(invalid("minCellWidth", width));
        }
        if let Some(padding) = &self.cell_padding
            && let Some(side) = padding.sides().find(|v| *v < 0.0)
        {
            return Err(invalid("cellPadding", side));
        }
        Ok(())
    }
}

/// The fully-resolved style of one cell.
///
/// This is what cell hooks see and may change before the cell is measured
/// or drawn.
#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ComputedCellStyle {
    pub font: String,
    pub font_style: FontStyle,
    pub overflow: Overflow,
    pub fill_color: Paint,
    pub text_color: Color,
    pub halign: HAlign,
    pub valign: VAlign,
    pub font_size: f32,
    pub cell_padding: Margins,
    pub line_color: Color,
    pub line_width: f32,
    pub cell_width: Width,
    pub min_cell_height: f32,
    pub min_cell_width: f32,
}

impl ComputedCellStyle {
    /// Base cell style for a document whose units are `scale_factor`
    /// points each (2.835 for millimetres).
    pub fn base(scale_factor: f32) -> Self {
        Self {
            font: "helvetica".to_string(),
            font_style: FontStyle::Normal,
            overflow: Overflow::Linebreak,
            fill_color: Paint::Transparent,
            text_color: Color::gray(20),
            halign: HAlign::Left,
            valign: VAlign::Top,
            font_size: 10.0,
            cell_padding: Margins::all(5.0 / scale_factor),
            line_color: Color::gray(200),
            line_width: 0.0,
            cell_width: Width::Auto,
            min_cell_height: 0.0,
            min_cell_width: 0.0,
        }
    }

    /// Applies the set fields of `styles` on top of this computed style.
    pub fn apply(&mut self, styles: &CellStyles) {
        if let Some(font) = &styles.font { self.font = font.clone(); }
        if let Some(v) = styles.font_style { self.font_style = v; }
        if let Some(v) = styles.overflow { self.overflow = v; }
        if let Some(v) = styles.fill_color { self.fill_color = v; }
        if let Some(v) = styles.text_color { self.text_color = v; }
        if let Some(v) = styles.halign { self.halign = v; }
        if let Some(v) = styles.valign { self.valign = v; }
        if let Some(v) = styles.font_size { self.font_size = v; }
        if let Some(v) = &styles.cell_padding { self.cell_padding = v.apply_to(&self.cell_padding); }
        if let Some(v) = styles.line_color { self.line_color = v; }
        if let Some(v) = styles.line_width { self.line_width = v; }
        if let Some(v) = styles.cell_width { self.cell_width = v; }
        if let Some(v) = styles.min_cell_height { self.min_cell_height = v; }
        if let Some(v) = styles.min_cell_width { self.min_cell_width = v; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_only_overrides_set_fields() {
        let mut base = CellStyles::new()
            .font_style(FontStyle::Bold)
            .fill_color(Color::gray(0));
        let overlay = CellStyles::new().fill_color(Color::rgb(231, 76, 60));

        base.merge(&overlay);

        assert_eq!(base.font_style, Some(FontStyle::Bold));
        assert_eq!(base.fill_color, Some(Paint::Solid(Color::rgb(231, 76, 60))));
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let base = CellStyles::new().font_size(8.0).overflow(Overflow::Hidden);
        assert_eq!(base.merged(&CellStyles::new()), base);
        assert!(CellStyles::new().is_empty());
        assert!(!base.is_empty());
    }

    #[test]
    fn test_apply_partial_padding() {
        let mut computed = ComputedCellStyle::base(1.0);
        computed.apply(&CellStyles::new().cell_padding(Spacing::top(0.5)));

        assert_eq!(computed.cell_padding.top, 0.5);
        assert_eq!(computed.cell_padding.left, 5.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(CellStyles::new().font_size(0.0).validate().is_err());
        assert!(CellStyles::new().line_width(-1.0).validate().is_err());
        assert!(CellStyles::new().cell_padding(Spacing::all(-2.0)).validate().is_err());
        assert!(CellStyles::new().font_size(12.0).line_width(0.1).validate().is_ok());
    }
}
