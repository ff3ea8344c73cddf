//! Built-in table themes.

use crate::cell::CellStyles;
use crate::font::FontStyle;
use crate::section::Section;
use autotable_types::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Colored head and foot, alternating body row fill.
    #[default]
    Striped,
    /// Colored head and foot, thin lines around every cell.
    Grid,
    /// Bold head and foot, nothing else.
    Plain,
}

/// The style layers a theme contributes, from least to most specific.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeStyles {
    pub table: CellStyles,
    pub head: CellStyles,
    pub body: CellStyles,
    pub foot: CellStyles,
    pub alternate_row: CellStyles,
}

impl ThemeStyles {
    pub fn section(&self, section: Section) -> &CellStyles {
        match section {
            Section::Head => &self.head,
            Section::Body => &self.body,
            Section::Foot => &self.foot,
        }
    }
}

impl Theme {
    pub fn styles(self) -> ThemeStyles {
        match self {
            Theme::Striped => {
                let banner = CellStyles::new()
                    .text_color(Color::white())
                    .fill_color(Color::rgb(41, 128, 185))
                    .font_style(FontStyle::Bold);
                ThemeStyles {
                    table: table_base(),
                    head: banner.clone(),
                    body: CellStyles::new(),
                    foot: banner,
                    alternate_row: CellStyles::new().fill_color(Color::gray(245)),
                }
            }
            Theme::Grid => {
                let banner = CellStyles::new()
                    .text_color(Color::white())
                    .fill_color(Color::rgb(26, 188, 156))
                    .font_style(FontStyle::Bold)
                    .line_width(0.0);
                ThemeStyles {
                    table: table_base().line_width(0.1),
                    head: banner.clone(),
                    body: CellStyles::new(),
                    foot: banner,
                    alternate_row: CellStyles::new(),
                }
            }
            Theme::Plain => {
                let banner = CellStyles::new().font_style(FontStyle::Bold);
                ThemeStyles {
                    table: CellStyles::new(),
                    head: banner.clone(),
                    body: CellStyles::new(),
                    foot: banner,
                    alternate_row: CellStyles::new(),
                }
            }
        }
    }
}

fn table_base() -> CellStyles {
    CellStyles::new()
        .fill_color(Color::white())
        .text_color(Color::gray(80))
        .font_style(FontStyle::Normal)
}
