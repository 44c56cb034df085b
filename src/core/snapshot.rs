//! Deterministic snapshot generation
//!
//! Snapshots capture the complete grid state in a serializable format for
//! testing and debugging. Colors are recorded by their escape text, so two
//! grids built from different registries compare equal when they would
//! render the same.

use serde::{Deserialize, Serialize};

use super::cell::{CellRef, Style};
use super::grid::Grid;

/// A complete snapshot of the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub columns: usize,
    /// Cell content (row-major)
    pub grid: Vec<Vec<CellSnapshot>>,
}

/// Snapshot of a single cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub glyph: String,
    /// Foreground escape sequence text
    pub fore: String,
    /// Background escape sequence text
    pub back: String,
    pub style: StyleSnapshot,
}

/// Snapshot of style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleSnapshot {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub faint: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub blink: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub invert: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub conceal: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strike: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub double_width: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl From<Style> for StyleSnapshot {
    fn from(style: Style) -> Self {
        StyleSnapshot {
            bold: style.contains(Style::BOLD),
            faint: style.contains(Style::FAINT),
            italic: style.contains(Style::ITALIC),
            underline: style.contains(Style::UNDERLINE),
            blink: style.contains(Style::BLINK),
            invert: style.contains(Style::INVERT),
            conceal: style.contains(Style::CONCEAL),
            strike: style.contains(Style::STRIKE),
            double_width: style.contains(Style::DOUBLE_WIDTH),
        }
    }
}

impl From<CellRef<'_>> for CellSnapshot {
    fn from(cell: CellRef<'_>) -> Self {
        CellSnapshot {
            glyph: cell.glyph.as_str().to_string(),
            fore: cell.fore.seq().as_str().to_string(),
            back: cell.back.seq().as_str().to_string(),
            style: StyleSnapshot::from(cell.style),
        }
    }
}

impl Snapshot {
    /// Create a snapshot from the current grid state
    pub fn from_grid(grid: &Grid) -> Self {
        let columns = grid.columns();
        let rows = grid.rows();
        let mut cells = Vec::with_capacity(rows);

        for row in 0..rows {
            let mut row_cells = Vec::with_capacity(columns);
            for column in 0..columns {
                let i = row * columns + column;
                row_cells.push(CellSnapshot::from(CellRef {
                    glyph: &grid.glyphs()[i],
                    fore: grid.fore()[i],
                    back: grid.back()[i],
                    style: grid.styles()[i],
                }));
            }
            cells.push(row_cells);
        }

        Snapshot {
            rows,
            columns,
            grid: cells,
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Glyphs only, one line per row (for debugging)
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        for row in &self.grid {
            let mut skip = false;
            for (column, cell) in row.iter().enumerate() {
                if skip {
                    skip = false;
                    continue;
                }
                if cell.style.double_width && column + 1 < row.len() {
                    skip = true;
                }
                result.push_str(&cell.glyph);
            }
            while result.ends_with(' ') {
                result.pop();
            }
            result.push('\n');
        }

        result
    }

    /// Compare two snapshots cell by cell
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        self.rows == other.rows && self.columns == other.columns && self.grid == other.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::Sgr;
    use crate::core::cell::{CellDefaults, Glyph};
    use crate::core::grid::Dimensions;

    fn grid(sgr: &Sgr, rows: usize, columns: usize) -> Grid {
        Grid::new(Dimensions::new(rows, columns), &CellDefaults::from_sgr(sgr)).unwrap()
    }

    #[test]
    fn test_snapshot_from_grid() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 3, 10);
        let i = g.index_of(0, 1).unwrap();
        g.glyphs_mut()[i] = Glyph::from_char('i');
        g.styles_mut()[i] = Style::BOLD;

        let snapshot = Snapshot::from_grid(&g);

        assert_eq!(snapshot.columns, 10);
        assert_eq!(snapshot.rows, 3);
        assert_eq!(snapshot.grid[0][1].glyph, "i");
        assert!(snapshot.grid[0][1].style.bold);
        assert_eq!(snapshot.grid[0][0].fore, "\x1b[39m");
        assert_eq!(snapshot.grid[0][0].back, "\x1b[49m");
    }

    #[test]
    fn test_snapshot_to_text() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 2, 4);
        for (column, c) in "AB".chars().enumerate() {
            let i = g.index_of(0, column as i64).unwrap();
            g.glyphs_mut()[i] = Glyph::from_char(c);
        }
        let i = g.index_of(1, 0).unwrap();
        g.glyphs_mut()[i] = Glyph::from_char('中');
        g.styles_mut()[i] = Style::DOUBLE_WIDTH;
        let i = g.index_of(1, 2).unwrap();
        g.glyphs_mut()[i] = Glyph::from_char('C');

        assert_eq!(Snapshot::from_grid(&g).to_text(), "AB\n中C\n");
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let sgr = Sgr::new();
        let mut g = grid(&sgr, 2, 5);
        let i = g.index_of(1, 4).unwrap();
        g.fore_mut()[i] = sgr.color8().cube6[5][0][0].fore;
        g.styles_mut()[i] = Style::ITALIC | Style::STRIKE;

        let snapshot = Snapshot::from_grid(&g);
        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::from_json(&json).unwrap();

        assert!(snapshot.content_equals(&restored));
        assert!(!json.contains("\"bold\""));
    }

    #[test]
    fn test_snapshots_ignore_registry_identity() {
        let a = Sgr::new();
        let b = Sgr::new();
        let ga = grid(&a, 2, 2);
        let gb = grid(&b, 2, 2);
        assert!(Snapshot::from_grid(&ga).content_equals(&Snapshot::from_grid(&gb)));
    }

    #[test]
    fn test_style_snapshot() {
        let snapshot = StyleSnapshot::from(Style::BOLD | Style::UNDERLINE);
        assert!(snapshot.bold);
        assert!(snapshot.underline);
        assert!(!snapshot.italic);
    }
}
