//! RGBA raster images
//!
//! Decoding is left to the caller; this is just a validated, row-major
//! buffer of 8-bit RGBA pixels with a few helpers for drawing test patterns.

use crate::error::{Error, Result};

const CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl ImageData {
    /// Wrap an RGBA buffer; its length must be exactly `width * height * 4`
    pub fn new(width: usize, height: usize, rgba: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS));
        match expected {
            Some(expected) if expected == rgba.len() => Ok(Self {
                width,
                height,
                rgba,
            }),
            _ => Err(Error::InvalidImage {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: rgba.len(),
            }),
        }
    }

    /// A fully transparent image
    pub fn blank(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(Error::InvalidImage {
                width,
                height,
                expected: usize::MAX,
                actual: 0,
            })?;
        Self::new(width, height, vec![0; len])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.rgba.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    /// RGBA at `(x, y)`; outside the image reads as transparent black
    pub fn pixel(&self, x: usize, y: usize) -> (u8, u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0, 0);
        }
        let idx = (y * self.width + x) * CHANNELS;
        (
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        )
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * CHANNELS;
        self.rgba[idx..idx + CHANNELS].copy_from_slice(&rgba);
    }

    /// Paint an opaque rectangle, clipped to the image
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, rgba: [u8; 4]) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set_pixel(px, py, rgba);
            }
        }
    }
}
