//! Layered table options for PDF table drawing, with a dry-run engine and
//! a catalogue of demonstration tables.
//!
//! The option model, resolution and hooks live in [`autotable_core`] and
//! are re-exported here.

pub mod demos;
pub mod dry_run;
pub mod sample;

pub use autotable_core::*;
pub use dry_run::{DryRunEngine, PageLayout, PlacedRow, TableLayout};
