//! Terminal Core Module
//!
//! The virtual terminal: a fixed grid of cells with glyph, color and style
//! buffers, plus deterministic snapshots of that state.

mod cell;
mod grid;
mod snapshot;

pub use cell::{CellDefaults, CellRef, Glyph, Style};
pub use grid::{Dimensions, Grid};
pub use snapshot::{CellSnapshot, Snapshot, StyleSnapshot};
