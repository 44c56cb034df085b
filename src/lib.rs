//! Blockterm: ANSI half-block terminal rendering
//!
//! Draws RGBA rasters and styled text into a terminal through an in-memory
//! grid of cells, then serializes that grid as a minimal stream of escape
//! sequences.
//!
//! - `ansi`: escape-sequence values and the SGR registry (`Sgr`)
//! - `core`: the virtual terminal grid and its snapshots
//! - `halfblock`: raster blitting at two pixels per cell
//! - `text`: styled text placement
//! - `renderer`: grid to byte stream serialization
//! - `config`: JSON-loadable rendering settings
//!
//! A frame is built by mutating the grid (blit, print) and then rendering it.
//! Those two phases must not overlap; the grid has no internal locking.

pub mod ansi;
pub mod config;
pub mod core;
mod error;
pub mod halfblock;
pub mod image;
pub mod renderer;
pub mod text;

pub use error::{Axis, Error, Result};
