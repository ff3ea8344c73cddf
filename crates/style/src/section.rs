use serde::{Deserialize, Serialize};
use std::fmt;

/// The three row groups of a table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Head,
    Body,
    Foot,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Head, Section::Body, Section::Foot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Head => "head",
            Section::Body => "body",
            Section::Foot => "foot",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
