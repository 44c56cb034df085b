//! Grid Renderer
//!
//! Serializes a [`Grid`] into the byte stream that reproduces it on a real
//! terminal. The renderer remembers the last background, foreground and
//! style it emitted and only writes a sequence when the next cell differs,
//! so runs of identically styled cells cost one glyph each.
//!
//! Rendering only reads the grid and can be repeated once per frame.

use tracing::trace;

use crate::ansi::{EscapeSeq, SeqId, Sgr};
use crate::core::{Grid, Style};

/// Resolved bold/faint state; terminals share one "normal intensity" reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intensity {
    Normal,
    Bold,
    Faint,
}

impl Intensity {
    fn of(style: Style) -> Self {
        if style.contains(Style::BOLD) {
            Intensity::Bold
        } else if style.contains(Style::FAINT) {
            Intensity::Faint
        } else {
            Intensity::Normal
        }
    }
}

/// Output buffer for one frame
struct Frame<'o> {
    out: &'o mut Vec<u8>,
    escapes: usize,
}

impl Frame<'_> {
    fn emit(&mut self, seq: &EscapeSeq) {
        self.out.extend_from_slice(seq.as_bytes());
        self.escapes += 1;
    }

    fn text(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }
}

/// Turns grids into minimal escape-sequence streams
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    sgr: &'a Sgr,
    line_feed: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(sgr: &'a Sgr) -> Self {
        Self {
            sgr,
            line_feed: false,
        }
    }

    /// Also emit a line feed after each row separator.
    ///
    /// Rows are separated by a bare carriage return by default, which
    /// assumes the caller positions the cursor itself. A line feed is needed
    /// when the output is appended to a scrolling stream such as a pipe.
    pub fn with_line_feed(mut self, line_feed: bool) -> Self {
        self.line_feed = line_feed;
        self
    }

    /// Render the whole grid into a new buffer
    pub fn render(&self, grid: &Grid) -> Vec<u8> {
        let mut out = Vec::with_capacity(grid.len() * 4 + 16);
        self.render_into(grid, &mut out);
        out
    }

    /// Append the rendered grid to `out`
    pub fn render_into(&self, grid: &Grid, out: &mut Vec<u8>) {
        let start = out.len();
        let mut frame = Frame { out, escapes: 0 };

        frame.emit(self.sgr.reset());

        let mut last_back: Option<SeqId> = None;
        let mut last_fore: Option<SeqId> = None;
        let mut last_style: Option<Style> = None;

        let columns = grid.columns();
        let rows = if columns == 0 { 0 } else { grid.rows() };
        let glyphs = grid.glyphs();
        let fores = grid.fore();
        let backs = grid.back();
        let styles = grid.styles();

        for row in 0..rows {
            if row > 0 {
                frame.emit(self.sgr.cr());
                if self.line_feed {
                    frame.emit(self.sgr.lf());
                }
            }

            let base = row * columns;
            let mut column = 0;
            while column < columns {
                let i = base + column;

                let back = backs[i];
                if last_back != Some(back.id()) {
                    frame.emit(back.seq());
                    last_back = Some(back.id());
                }

                let fore = fores[i];
                if last_fore != Some(fore.id()) {
                    frame.emit(fore.seq());
                    last_fore = Some(fore.id());
                }

                let style = styles[i];
                let attrs = style.attributes();
                if last_style != Some(attrs) {
                    // the reset at the top of the frame cleared every attribute
                    self.emit_style(&mut frame, last_style.unwrap_or_default(), attrs);
                    last_style = Some(attrs);
                }

                if !style.is_double_width() {
                    frame.text(glyphs[i].as_bytes());
                    column += 1;
                } else if column + 1 == columns {
                    // a wide glyph cannot be split across the right edge
                    frame.text(b" ");
                    column += 1;
                } else {
                    frame.text(glyphs[i].as_bytes());
                    column += 2;
                }
            }
        }

        trace!(
            rows,
            columns,
            bytes = frame.out.len() - start,
            escapes = frame.escapes,
            "rendered frame"
        );
    }

    /// Emit the sequences that turn style `prev` into `next`.
    ///
    /// Bold and faint resolve to one intensity and only the resolved value is
    /// diffed. Going from bold straight to faint writes `2m` alone, without a
    /// `22m` first, so terminals that keep bold set through `2m` (xterm and
    /// most of its descendants) show both. This is intentional: the frame
    /// stays one sequence per changed attribute.
    fn emit_style(&self, frame: &mut Frame<'_>, prev: Style, next: Style) {
        let sgr = self.sgr;

        let intensity = Intensity::of(next);
        if Intensity::of(prev) != intensity {
            match intensity {
                Intensity::Bold => frame.emit(&sgr.bold().on),
                Intensity::Faint => frame.emit(&sgr.faint().on),
                Intensity::Normal => frame.emit(&sgr.bold().off),
            }
        }

        let changed = prev ^ next;
        let switches = [
            (Style::ITALIC, sgr.italic()),
            (Style::UNDERLINE, sgr.underline()),
            (Style::INVERT, sgr.invert()),
            (Style::CONCEAL, sgr.conceal()),
            (Style::STRIKE, sgr.strike()),
        ];
        for (flag, switch) in switches {
            if changed.contains(flag) {
                if next.contains(flag) {
                    frame.emit(&switch.on);
                } else {
                    frame.emit(&switch.off);
                }
            }
        }

        // blink has a single sequence, used for both transitions
        if changed.contains(Style::BLINK) {
            frame.emit(&sgr.slow_blink().on);
        }
    }
}
