//! Color quantization
//!
//! The half-block blitter turns every opaque pixel into a [`ColorPair`]
//! through a [`Quantize`] implementation. Any `Fn(u8, u8, u8) -> ColorPair`
//! works; [`Sgr`] quantizes to the 6x6x6 cube, and [`Quantizer`] picks the
//! encoding from a [`ColorMode`].

use serde::{Deserialize, Serialize};

use crate::ansi::seq::ColorPair;
use crate::ansi::sgr::{rgb, rgb_to_grayscale24, Sgr};

/// Maps an RGB pixel to a terminal color
pub trait Quantize {
    fn quantize(&self, r: u8, g: u8, b: u8) -> ColorPair;
}

impl<F> Quantize for F
where
    F: Fn(u8, u8, u8) -> ColorPair,
{
    fn quantize(&self, r: u8, g: u8, b: u8) -> ColorPair {
        self(r, g, b)
    }
}

/// The default color function: nearest 6x6x6 cube entry
impl Quantize for Sgr {
    fn quantize(&self, r: u8, g: u8, b: u8) -> ColorPair {
        self.rgb_to_cube6(r, g, b)
    }
}

/// Color encoding used for raster output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// 8-bit 6x6x6 color cube
    #[default]
    Cube6,
    /// 8-bit 24-level grayscale ramp
    Grayscale8,
    /// 24-bit grayscale
    Grayscale24,
    /// 24-bit color, no quantization
    TrueColor,
}

/// A registry paired with a color mode
#[derive(Debug, Clone, Copy)]
pub struct Quantizer<'a> {
    sgr: &'a Sgr,
    mode: ColorMode,
}

impl<'a> Quantizer<'a> {
    pub fn new(sgr: &'a Sgr, mode: ColorMode) -> Self {
        Self { sgr, mode }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }
}

impl Quantize for Quantizer<'_> {
    fn quantize(&self, r: u8, g: u8, b: u8) -> ColorPair {
        match self.mode {
            ColorMode::Cube6 => self.sgr.rgb_to_cube6(r, g, b),
            ColorMode::Grayscale8 => self.sgr.rgb_to_grayscale8(r, g, b),
            ColorMode::Grayscale24 => rgb_to_grayscale24(r, g, b),
            ColorMode::TrueColor => rgb(r, g, b),
        }
    }
}
