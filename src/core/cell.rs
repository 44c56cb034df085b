//! Terminal Cell
//!
//! A cell is a glyph plus a foreground color, a background color and a style
//! mask. The grid stores these as parallel buffers; this module defines the
//! element types and a borrowed view of one cell.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::ansi::{BackColor, ForeColor, Sgr};
use crate::error::{Error, Result};

bitflags! {
    /// Per-cell text style
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Style: u16 {
        const BOLD      = 0x0001;
        const FAINT     = 0x0002;
        const ITALIC    = 0x0004;
        const UNDERLINE = 0x0008;
        const BLINK     = 0x0010;
        const INVERT    = 0x0020;
        const CONCEAL   = 0x0040;
        const STRIKE    = 0x0080;
        /// The glyph occupies this cell and the next one
        const DOUBLE_WIDTH = 0x8000;
    }
}

impl Style {
    /// Bits that map to SGR attributes (everything but layout flags)
    pub const ATTRIBUTES: Style = Style::BOLD
        .union(Style::FAINT)
        .union(Style::ITALIC)
        .union(Style::UNDERLINE)
        .union(Style::BLINK)
        .union(Style::INVERT)
        .union(Style::CONCEAL)
        .union(Style::STRIKE);

    /// The style restricted to SGR attribute bits
    pub fn attributes(self) -> Style {
        self & Self::ATTRIBUTES
    }

    pub fn is_double_width(self) -> bool {
        self.contains(Style::DOUBLE_WIDTH)
    }
}

/// The displayed content of a cell.
///
/// Usually one Unicode scalar, but combining marks may follow it. Never
/// empty. Clones share the same allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Glyph(Arc<str>);

impl Glyph {
    pub fn new(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::EmptyGlyph);
        }
        Ok(Self(Arc::from(text)))
    }

    pub fn from_char(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self(Arc::from(&*c.encode_utf8(&mut buf)))
    }

    /// A single space, the default cell content
    pub fn space() -> Self {
        Self::from_char(' ')
    }

    /// `▄`, needed for half-block rendering: the background shows through the
    /// top half and the foreground paints the bottom half.
    pub fn lower_half_block() -> Self {
        Self::from_char('\u{2584}')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 bytes written to the terminal
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Glyph({:?})", self.as_str())
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial content of every cell in a new grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDefaults {
    pub glyph: Glyph,
    pub fore: ForeColor,
    pub back: BackColor,
}

impl CellDefaults {
    /// Space on the terminal's default colors
    pub fn from_sgr(sgr: &Sgr) -> Self {
        let default = sgr.color4().default;
        Self {
            glyph: Glyph::space(),
            fore: default.fore,
            back: default.back,
        }
    }

    pub fn with_glyph(mut self, glyph: Glyph) -> Self {
        self.glyph = glyph;
        self
    }
}

/// A read-only view of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef<'a> {
    pub glyph: &'a Glyph,
    pub fore: ForeColor,
    pub back: BackColor,
    pub style: Style,
}
