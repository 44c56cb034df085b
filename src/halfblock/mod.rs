//! Half-block blitter
//!
//! Each terminal row shows two raster rows: the cell background paints the
//! top half and the foreground paints the bottom half through a `▄` glyph.
//! Blitting only writes color slots; the grid's glyphs must already be the
//! lower half block (see [`Glyph::lower_half_block`]).
//!
//! Alpha is binary. Pixels with alpha 0 are skipped and leave the slot as it
//! was, so several blits can be layered; any other alpha is drawn opaque.
//!
//! [`Glyph::lower_half_block`]: crate::core::Glyph::lower_half_block

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ansi::{Quantize, Sgr};
use crate::core::Grid;
use crate::error::Result;
use crate::image::ImageData;

/// Raster offset of an image's top-left pixel.
///
/// `x` counts columns, `y` counts half rows (two per terminal row). Either
/// may be negative or past the grid; the blit is clipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Draw `image` onto `grid` at `pos`, quantizing every opaque pixel.
///
/// Returns the number of color slots written. Cells are addressed through
/// [`Grid::index_of`], whose error is passed on.
pub fn blit<Q>(image: &ImageData, grid: &mut Grid, pos: Position, quantize: &Q) -> Result<usize>
where
    Q: Quantize + ?Sized,
{
    let width = to_i64(image.width());
    let height = to_i64(image.height());
    let term_width = to_i64(grid.columns());
    let term_height = to_i64(grid.rows()).saturating_mul(2);

    let (Some(xs), Some(ys)) = (
        clip(pos.x, width, term_width),
        clip(pos.y, height, term_height),
    ) else {
        debug!(x = pos.x, y = pos.y, "blit outside grid");
        return Ok(0);
    };

    let mut written = 0;
    for term_y in ys {
        // clipping keeps both term and image coordinates non-negative
        let img_y = (term_y - pos.y) as usize;
        let row = term_y >> 1;
        let top = term_y & 1 == 0;

        for term_x in xs.clone() {
            let img_x = (term_x - pos.x) as usize;
            let (r, g, b, a) = image.pixel(img_x, img_y);
            if a == 0 {
                continue;
            }

            let i = grid.index_of(row, term_x)?;
            let pair = quantize.quantize(r, g, b);
            if top {
                grid.back_mut()[i] = pair.back;
            } else {
                grid.fore_mut()[i] = pair.fore;
            }
            written += 1;
        }
    }

    debug!(
        x = pos.x,
        y = pos.y,
        width = image.width(),
        height = image.height(),
        written,
        "blit"
    );
    Ok(written)
}

/// [`blit`] with the registry's 6x6x6 cube quantizer
pub fn blit_default(image: &ImageData, grid: &mut Grid, pos: Position, sgr: &Sgr) -> Result<usize> {
    blit(image, grid, pos, sgr)
}

/// Visible part of `start..start + len` within `0..bound`
fn clip(start: i64, len: i64, bound: i64) -> Option<Range<i64>> {
    let begin = start.max(0);
    let end = start.saturating_add(len).min(bound);
    (begin < end).then_some(begin..end)
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
