//! Styled text placement
//!
//! Writes a string into one grid row with a fixed pen. Characters are laid
//! out by display width: wide characters take two columns (flagged with
//! [`Style::DOUBLE_WIDTH`]) and zero-width characters such as combining marks
//! join the glyph before them. Text never wraps.

use unicode_width::UnicodeWidthChar;

use crate::ansi::{BackColor, ColorPair, ForeColor, Sgr};
use crate::core::{Glyph, Grid, Style};
use crate::error::Result;

/// Colors and style applied to every character written by [`print`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub fore: ForeColor,
    pub back: BackColor,
    pub style: Style,
}

impl Pen {
    pub fn new(colors: ColorPair) -> Self {
        Self {
            fore: colors.fore,
            back: colors.back,
            style: Style::empty(),
        }
    }

    /// The terminal's default colors, no style
    pub fn from_sgr(sgr: &Sgr) -> Self {
        Self::new(sgr.color4().default)
    }

    pub fn with_fore(mut self, fore: ForeColor) -> Self {
        self.fore = fore;
        self
    }

    pub fn with_back(mut self, back: BackColor) -> Self {
        self.back = back;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Write `text` starting at `(row, column)`.
///
/// Fails with `OutOfRange` if the start position is outside the grid.
/// Output is cut at the end of the row. Returns the number of columns used.
pub fn print(grid: &mut Grid, row: i64, column: i64, text: &str, pen: &Pen) -> Result<usize> {
    grid.index_of(row, column)?;
    let end = i64::try_from(grid.columns()).unwrap_or(i64::MAX);
    // layout bits come from the text, not the pen
    let style = pen.style.attributes();

    let mut cursor = column;
    let mut last: Option<usize> = None;

    for c in text.chars() {
        // control characters have no width and are dropped
        let Some(width) = c.width() else {
            continue;
        };

        if width == 0 {
            if let Some(prev) = last {
                let mut joined = String::from(grid.glyphs()[prev].as_str());
                joined.push(c);
                grid.glyphs_mut()[prev] = Glyph::new(&joined)?;
            }
            continue;
        }

        if cursor >= end {
            break;
        }

        let i = grid.index_of(row, cursor)?;
        if width == 2 && cursor + 1 == end {
            // no room for both halves
            write_cell(grid, i, Glyph::space(), pen, style);
            cursor += 1;
            break;
        }

        let glyph = Glyph::from_char(c);
        if width == 2 {
            write_cell(grid, i, glyph, pen, style | Style::DOUBLE_WIDTH);
            let trailing = grid.index_of(row, cursor + 1)?;
            write_cell(grid, trailing, Glyph::space(), pen, style);
        } else {
            write_cell(grid, i, glyph, pen, style);
        }
        last = Some(i);
        cursor += width as i64;
    }

    Ok((cursor - column) as usize)
}

fn write_cell(grid: &mut Grid, i: usize, glyph: Glyph, pen: &Pen, style: Style) {
    grid.glyphs_mut()[i] = glyph;
    grid.fore_mut()[i] = pen.fore;
    grid.back_mut()[i] = pen.back;
    grid.styles_mut()[i] = style;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::sgr::{RED, YELLOW};
    use crate::core::{CellDefaults, Dimensions, Snapshot};
    use crate::error::{Axis, Error};

    fn grid(sgr: &Sgr, rows: usize, columns: usize) -> Grid {
        Grid::new(Dimensions::new(rows, columns), &CellDefaults::from_sgr(sgr)).unwrap()
    }

    #[test]
    fn test_print_ascii() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 2, 10);
        let red = sgr.color4().normal[RED];
        let pen = Pen::from_sgr(&sgr).with_fore(red.fore).with_style(Style::BOLD);

        assert_eq!(print(&mut g, 1, 2, "Hello", &pen).unwrap(), 5);
        assert_eq!(Snapshot::from_grid(&g).to_text(), "\n  Hello\n");

        let cell = g.cell(1, 2).unwrap();
        assert_eq!(cell.fore, red.fore);
        assert_eq!(cell.back, sgr.color4().default.back);
        assert_eq!(cell.style, Style::BOLD);
        assert!(g.cell(1, 7).unwrap().style.is_empty());
    }

    #[test]
    fn test_print_truncates_at_row_end() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 2, 4);
        let pen = Pen::from_sgr(&sgr);
        assert_eq!(print(&mut g, 0, 1, "abcdef", &pen).unwrap(), 3);
        assert_eq!(Snapshot::from_grid(&g).to_text(), " abc\n\n");
    }

    #[test]
    fn test_print_wide_characters() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 1, 6);
        let pen = Pen::from_sgr(&sgr);
        assert_eq!(print(&mut g, 0, 0, "中文x", &pen).unwrap(), 5);

        assert!(g.cell(0, 0).unwrap().style.is_double_width());
        assert_eq!(g.cell(0, 1).unwrap().glyph.as_str(), " ");
        assert!(!g.cell(0, 1).unwrap().style.is_double_width());
        assert!(g.cell(0, 2).unwrap().style.is_double_width());
        assert_eq!(g.cell(0, 4).unwrap().glyph.as_str(), "x");
        assert_eq!(Snapshot::from_grid(&g).to_text(), "中文x\n");
    }

    #[test]
    fn test_print_wide_character_at_row_end() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 1, 3);
        let yellow = sgr.color4().normal[YELLOW];
        let pen = Pen::new(yellow);
        assert_eq!(print(&mut g, 0, 0, "ab中", &pen).unwrap(), 3);

        let cell = g.cell(0, 2).unwrap();
        assert_eq!(cell.glyph.as_str(), " ");
        assert!(!cell.style.is_double_width());
        assert_eq!(cell.back, yellow.back);
    }

    #[test]
    fn test_print_combining_marks() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 1, 4);
        let pen = Pen::from_sgr(&sgr);
        assert_eq!(print(&mut g, 0, 0, "e\u{301}a", &pen).unwrap(), 2);
        assert_eq!(g.cell(0, 0).unwrap().glyph.as_str(), "e\u{301}");
        assert_eq!(g.cell(0, 1).unwrap().glyph.as_str(), "a");

        // a leading mark has nothing to attach to
        assert_eq!(print(&mut g, 0, 2, "\u{301}b", &pen).unwrap(), 1);
        assert_eq!(g.cell(0, 2).unwrap().glyph.as_str(), "b");

        assert_eq!(print(&mut g, 0, 3, "\nc", &pen).unwrap(), 1);
        assert_eq!(g.cell(0, 2).unwrap().glyph.as_str(), "b");
        assert_eq!(g.cell(0, 3).unwrap().glyph.as_str(), "c");
    }

    #[test]
    fn test_print_stays_on_its_row() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 2, 3);
        let pen = Pen::from_sgr(&sgr);
        assert_eq!(print(&mut g, 0, 1, "中中", &pen).unwrap(), 2);
        assert!(g.cell(0, 1).unwrap().style.is_double_width());
        assert_eq!(g.cell(0, 2).unwrap().glyph.as_str(), " ");
        // the next row is untouched
        assert_eq!(Snapshot::from_grid(&g).to_text(), " 中\n\n");
        assert!(g.cell(1, 0).unwrap().style.is_empty());
    }

    #[test]
    fn test_pen_layout_bits_ignored() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 1, 2);
        let pen = Pen::from_sgr(&sgr).with_style(Style::DOUBLE_WIDTH | Style::ITALIC);
        assert_eq!(print(&mut g, 0, 0, "ab", &pen).unwrap(), 2);
        assert_eq!(g.cell(0, 0).unwrap().style, Style::ITALIC);
    }

    #[test]
    fn test_print_out_of_range() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 2, 4);
        let pen = Pen::from_sgr(&sgr);
        assert!(matches!(
            print(&mut g, 2, 0, "x", &pen),
            Err(Error::OutOfRange { axis: Axis::Row, .. })
        ));
        assert!(matches!(
            print(&mut g, 0, -1, "x", &pen),
            Err(Error::OutOfRange { axis: Axis::Column, .. })
        ));
        assert_eq!(print(&mut g, 1, 3, "", &pen).unwrap(), 0);
    }
}
