//! Rendering configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ansi::ColorMode;
use crate::core::{Dimensions, Glyph};
use crate::error::Result;
use crate::halfblock::Position;

/// Renderer configuration, loadable from JSON.
///
/// Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal rows
    pub rows: usize,
    /// Terminal columns
    pub columns: usize,
    /// How raster pixels are mapped to terminal colors
    pub color_mode: ColorMode,
    /// Initial content of every cell
    pub glyph: String,
    /// Where the raster's top-left pixel lands, in half-block units
    pub origin: Position,
}

impl Default for Config {
    fn default() -> Self {
        let dims = Dimensions::default();
        Self {
            rows: dims.rows,
            columns: dims.columns,
            color_mode: ColorMode::default(),
            glyph: Glyph::lower_half_block().as_str().to_string(),
            origin: Position::default(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.columns)
    }

    pub fn glyph(&self) -> Result<Glyph> {
        Glyph::new(&self.glyph)
    }
}
