//! Virtual terminal grid
//!
//! A fixed-size, row-major buffer of cells stored as four parallel arrays
//! (glyph, foreground, background, style). The grid is allocated once and
//! never resized; callers mutate cells through the slices returned by the
//! `_mut` accessors, using [`Grid::index_of`] as the single bounds check.

use crate::ansi::{BackColor, ForeColor};
use crate::core::cell::{CellDefaults, CellRef, Glyph, Style};
use crate::error::{Axis, Error, Result};

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Dimensions from signed values, e.g. the result of a size query
    pub fn checked(rows: i64, columns: i64) -> Result<Self> {
        match (usize::try_from(rows), usize::try_from(columns)) {
            (Ok(r), Ok(c)) => Ok(Self::new(r, c)),
            _ => Err(Error::InvalidDimension { rows, columns }),
        }
    }

    /// Number of cells, or `None` on overflow
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            rows: 24,
            columns: 80,
        }
    }
}

/// The virtual terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    defaults: CellDefaults,
    glyphs: Vec<Glyph>,
    fore: Vec<ForeColor>,
    back: Vec<BackColor>,
    styles: Vec<Style>,
}

impl Grid {
    /// Allocate a grid with every cell set to `defaults` and no style.
    ///
    /// Fails with `InvalidDimension` if the buffers cannot be allocated.
    pub fn new(dims: Dimensions, defaults: &CellDefaults) -> Result<Self> {
        let total = dims.cell_count().ok_or_else(|| too_large(dims))?;

        Ok(Self {
            dims,
            defaults: defaults.clone(),
            glyphs: filled(defaults.glyph.clone(), total, dims)?,
            fore: filled(defaults.fore, total, dims)?,
            back: filled(defaults.back, total, dims)?,
            styles: filled(Style::empty(), total, dims)?,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn columns(&self) -> usize {
        self.dims.columns
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The values every cell had at construction
    pub fn defaults(&self) -> &CellDefaults {
        &self.defaults
    }

    /// Linear index of `(row, column)`.
    ///
    /// Fails with [`Error::OutOfRange`] naming the offending axis.
    pub fn index_of(&self, row: i64, column: i64) -> Result<usize> {
        let row = checked_axis(row, self.dims.rows, Axis::Row)?;
        let column = checked_axis(column, self.dims.columns, Axis::Column)?;
        Ok(row * self.dims.columns + column)
    }

    /// Read-only view of the cell at `(row, column)`
    pub fn cell(&self, row: i64, column: i64) -> Result<CellRef<'_>> {
        let i = self.index_of(row, column)?;
        Ok(CellRef {
            glyph: &self.glyphs[i],
            fore: self.fore[i],
            back: self.back[i],
            style: self.styles[i],
        })
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn glyphs_mut(&mut self) -> &mut [Glyph] {
        &mut self.glyphs
    }

    pub fn fore(&self) -> &[ForeColor] {
        &self.fore
    }

    pub fn fore_mut(&mut self) -> &mut [ForeColor] {
        &mut self.fore
    }

    pub fn back(&self) -> &[BackColor] {
        &self.back
    }

    pub fn back_mut(&mut self) -> &mut [BackColor] {
        &mut self.back
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut [Style] {
        &mut self.styles
    }

    /// Restore every cell to the construction defaults
    pub fn reset(&mut self) {
        self.glyphs.fill(self.defaults.glyph.clone());
        self.fore.fill(self.defaults.fore);
        self.back.fill(self.defaults.back);
        self.styles.fill(Style::empty());
    }
}

fn too_large(dims: Dimensions) -> Error {
    Error::InvalidDimension {
        rows: i64::try_from(dims.rows).unwrap_or(i64::MAX),
        columns: i64::try_from(dims.columns).unwrap_or(i64::MAX),
    }
}

fn filled<T: Clone>(value: T, len: usize, dims: Dimensions) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| too_large(dims))?;
    buf.resize(len, value);
    Ok(buf)
}

fn checked_axis(value: i64, len: usize, axis: Axis) -> Result<usize> {
    match usize::try_from(value) {
        Ok(v) if v < len => Ok(v),
        _ => Err(Error::OutOfRange {
            axis,
            value,
            len: i64::try_from(len).unwrap_or(i64::MAX),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::Sgr;

    fn grid(rows: usize, columns: usize) -> (Sgr, Grid) {
        let sgr = Sgr::new();
        let grid = Grid::new(Dimensions::new(rows, columns), &CellDefaults::from_sgr(&sgr)).unwrap();
        (sgr, grid)
    }

    #[test]
    fn test_grid_new() {
        let (sgr, grid) = grid(4, 8);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.columns(), 8);
        assert_eq!(grid.len(), 32);
        assert!(grid.glyphs().iter().all(|g| g.as_str() == " "));
        assert!(grid.fore().iter().all(|f| *f == sgr.color4().default.fore));
        assert!(grid.back().iter().all(|b| *b == sgr.color4().default.back));
        assert!(grid.styles().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_empty_grid() {
        let (_, grid) = grid(0, 0);
        assert!(grid.is_empty());
        assert!(grid.index_of(0, 0).is_err());
    }

    #[test]
    fn test_checked_dimensions() {
        assert_eq!(Dimensions::checked(3, 5).unwrap(), Dimensions::new(3, 5));
        assert!(matches!(
            Dimensions::checked(-1, 5),
            Err(Error::InvalidDimension { rows: -1, columns: 5 })
        ));
        assert!(Dimensions::checked(3, -5).is_err());
    }

    #[test]
    fn test_overflowing_dimensions() {
        let sgr = Sgr::new();
        let dims = Dimensions::new(usize::MAX, 2);
        assert!(matches!(
            Grid::new(dims, &CellDefaults::from_sgr(&sgr)),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_unallocatable_dimensions() {
        let sgr = Sgr::new();
        let defaults = CellDefaults::from_sgr(&sgr);

        let dims = Dimensions::checked(i64::MAX, 1).unwrap();
        assert!(matches!(
            Grid::new(dims, &defaults),
            Err(Error::InvalidDimension { rows: i64::MAX, columns: 1 })
        ));

        let dims = Dimensions::new(1 << 60, 1);
        assert!(matches!(
            Grid::new(dims, &defaults),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_index_of() {
        let (_, grid) = grid(4, 8);
        assert_eq!(grid.index_of(0, 0).unwrap(), 0);
        assert_eq!(grid.index_of(1, 0).unwrap(), 8);
        assert_eq!(grid.index_of(3, 7).unwrap(), 31);
    }

    #[test]
    fn test_index_of_out_of_range() {
        let (_, grid) = grid(4, 8);
        assert!(matches!(
            grid.index_of(4, 0),
            Err(Error::OutOfRange { axis: Axis::Row, value: 4, len: 4 })
        ));
        assert!(matches!(
            grid.index_of(0, 8),
            Err(Error::OutOfRange { axis: Axis::Column, value: 8, len: 8 })
        ));
        assert!(matches!(
            grid.index_of(-1, 0),
            Err(Error::OutOfRange { axis: Axis::Row, .. })
        ));
        assert!(matches!(
            grid.index_of(0, -1),
            Err(Error::OutOfRange { axis: Axis::Column, .. })
        ));
    }

    #[test]
    fn test_direct_mutation_and_reset() {
        let (sgr, mut grid) = grid(2, 3);
        let i = grid.index_of(1, 2).unwrap();
        grid.glyphs_mut()[i] = Glyph::from_char('X');
        grid.fore_mut()[i] = sgr.color4().normal[crate::ansi::sgr::RED].fore;
        grid.styles_mut()[i] = Style::BOLD;

        let cell = grid.cell(1, 2).unwrap();
        assert_eq!(cell.glyph.as_str(), "X");
        assert_eq!(cell.style, Style::BOLD);
        assert_eq!(cell.back, sgr.color4().default.back);

        grid.reset();
        let cell = grid.cell(1, 2).unwrap();
        assert_eq!(cell.glyph.as_str(), " ");
        assert!(cell.style.is_empty());
        assert_eq!(cell.fore, sgr.color4().default.fore);
    }

    #[test]
    fn test_custom_defaults() {
        let sgr = Sgr::new();
        let black = sgr.color8().cube6[0][0][0];
        let defaults = CellDefaults {
            glyph: Glyph::lower_half_block(),
            fore: black.fore,
            back: black.back,
        };
        let grid = Grid::new(Dimensions::new(2, 2), &defaults).unwrap();
        let cell = grid.cell(0, 0).unwrap();
        assert_eq!(cell.glyph.as_str(), "▄");
        assert_eq!(cell.fore, black.fore);
    }
}
