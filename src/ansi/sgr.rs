//! SGR (Select Graphic Rendition) registry
//!
//! [`Sgr`] owns the identity allocator and builds every enumerable style and
//! color sequence exactly once. The tables are read-only after construction;
//! renderers and quantizers borrow them.
//!
//! 24-bit color is the one open-ended case: [`rgb`] and [`true_color`] build
//! sequences on demand with identities computed from the channel values, so
//! equal colors compare equal without interning.
//!
//! [Ansi Escape Code Wiki: SGR](https://en.wikipedia.org/wiki/ANSI_escape_code#SGR_(Select_Graphic_Rendition)_parameters)

use crate::ansi::seq::{
    BackColor, ColorPair, EscapeSeq, ForeColor, IdAllocator, SeqId, SeqKind, Switch,
};
use crate::error::{Axis, Error, Result};

/// Standard color indices into the 4-bit and 8-bit standard tables
pub const BLACK: usize = 0;
pub const RED: usize = 1;
pub const GREEN: usize = 2;
pub const YELLOW: usize = 3;
pub const BLUE: usize = 4;
pub const PURPLE: usize = 5;
pub const VIOLET: usize = PURPLE;
pub const CYAN: usize = 6;
pub const WHITE: usize = 7;

/// Number of selectable fonts (index 0 is the standard font)
pub const FONT_COUNT: usize = 11;

/// Levels in the 8-bit grayscale ramp
pub const GRAYSCALE_LEVELS: usize = 24;

/// 4-bit colors.
///
/// These are not "true" colors: the terminal maps them to its own palette.
#[derive(Debug, Clone)]
pub struct Color4 {
    pub normal: [ColorPair; 8],
    pub bright: [ColorPair; 8],
    pub default: ColorPair,
}

/// 8-bit colors
#[derive(Debug, Clone)]
pub struct Color8 {
    pub standard: [ColorPair; 8],
    pub high: [ColorPair; 8],
    /// 6x6x6 cube indexed `[red][green][blue]`, 0..5 each; `[0][0][0]` is
    /// black and `[5][5][5]` is white.
    pub cube6: Box<[[[ColorPair; 6]; 6]; 6]>,
    pub grayscale: [ColorPair; GRAYSCALE_LEVELS],
}

/// The escape sequence registry
#[derive(Debug)]
pub struct Sgr {
    ids: IdAllocator,
    reset: EscapeSeq,
    cr: EscapeSeq,
    lf: EscapeSeq,
    bold: Switch,
    faint: Switch,
    italic: Switch,
    underline: Switch,
    slow_blink: Switch,
    rapid_blink: Switch,
    invert: Switch,
    conceal: Switch,
    strike: Switch,
    framed: Switch,
    encircled: Switch,
    overlined: Switch,
    fonts: [EscapeSeq; FONT_COUNT],
    color4: Color4,
    color8: Color8,
}

fn control(ids: &IdAllocator, code: u8) -> EscapeSeq {
    EscapeSeq::sgr(SeqKind::Control, &[code], ids.next_id())
}

fn switch(ids: &IdAllocator, on: u8, off: u8) -> Switch {
    Switch {
        on: control(ids, on),
        off: control(ids, off),
    }
}

fn pair<const F: usize, const B: usize>(
    ids: &IdAllocator,
    fore: &[u8; F],
    back: &[u8; B],
) -> ColorPair {
    ColorPair {
        fore: ForeColor::from_seq(EscapeSeq::sgr(SeqKind::Foreground, fore, ids.next_id())),
        back: BackColor::from_seq(EscapeSeq::sgr(SeqKind::Background, back, ids.next_id())),
    }
}

fn indexed(ids: &IdAllocator, index: u8) -> ColorPair {
    pair(ids, &[38, 5, index], &[48, 5, index])
}

fn plain(ids: &IdAllocator, byte: u8) -> EscapeSeq {
    EscapeSeq::byte(SeqKind::Control, byte, ids.next_id())
}

impl Sgr {
    /// Build every enumerable sequence
    pub fn new() -> Self {
        let ids = IdAllocator::new();

        let reset = control(&ids, 0);
        let cr = plain(&ids, b'\r');
        let lf = plain(&ids, b'\n');

        let bold = switch(&ids, 1, 22);
        let faint = switch(&ids, 2, 22);
        let italic = switch(&ids, 3, 23);
        let underline = switch(&ids, 4, 24);
        let slow_blink = switch(&ids, 5, 25);
        let rapid_blink = switch(&ids, 6, 25);
        let invert = switch(&ids, 7, 27);
        let conceal = switch(&ids, 8, 28);
        let strike = switch(&ids, 9, 29);

        let fonts = std::array::from_fn(|n| control(&ids, 10 + n as u8));

        let framed = switch(&ids, 51, 54);
        let encircled = switch(&ids, 52, 54);
        let overlined = switch(&ids, 53, 55);

        let color4 = Color4 {
            normal: std::array::from_fn(|n| pair(&ids, &[30 + n as u8], &[40 + n as u8])),
            bright: std::array::from_fn(|n| pair(&ids, &[90 + n as u8], &[100 + n as u8])),
            default: pair(&ids, &[39], &[49]),
        };

        let color8 = Color8 {
            standard: std::array::from_fn(|n| indexed(&ids, n as u8)),
            high: std::array::from_fn(|n| indexed(&ids, 8 + n as u8)),
            cube6: Box::new(std::array::from_fn(|r| {
                std::array::from_fn(|g| {
                    std::array::from_fn(|b| indexed(&ids, (16 + 36 * r + 6 * g + b) as u8))
                })
            })),
            grayscale: std::array::from_fn(|n| indexed(&ids, 232 + n as u8)),
        };

        Self {
            ids,
            reset,
            cr,
            lf,
            bold,
            faint,
            italic,
            underline,
            slow_blink,
            rapid_blink,
            invert,
            conceal,
            strike,
            framed,
            encircled,
            overlined,
            fonts,
            color4,
            color8,
        }
    }

    /// Allocate a fresh identity from this registry
    pub fn next_id(&self) -> SeqId {
        self.ids.next_id()
    }

    /// Create a control sequence `ESC [ code`
    pub fn make_control(&self, code: &str, id: Option<SeqId>) -> Result<EscapeSeq> {
        EscapeSeq::csi(SeqKind::Control, code, id.unwrap_or_else(|| self.next_id()))
    }

    /// Create paired on/off sequences for a boolean attribute
    pub fn make_switch(&self, on: &str, off: &str) -> Result<Switch> {
        Ok(Switch {
            on: self.make_control(on, None)?,
            off: self.make_control(off, None)?,
        })
    }

    /// Create a foreground color sequence `ESC [ code`
    pub fn make_fore_color(&self, code: &str, id: Option<SeqId>) -> Result<ForeColor> {
        let id = id.unwrap_or_else(|| self.next_id());
        Ok(ForeColor::from_seq(EscapeSeq::csi(SeqKind::Foreground, code, id)?))
    }

    /// Create a background color sequence `ESC [ code`
    pub fn make_back_color(&self, code: &str, id: Option<SeqId>) -> Result<BackColor> {
        let id = id.unwrap_or_else(|| self.next_id());
        Ok(BackColor::from_seq(EscapeSeq::csi(SeqKind::Background, code, id)?))
    }

    /// Reset all attributes (`ESC[0m`)
    pub fn reset(&self) -> &EscapeSeq {
        &self.reset
    }

    /// Carriage return
    pub fn cr(&self) -> &EscapeSeq {
        &self.cr
    }

    /// Line feed
    pub fn lf(&self) -> &EscapeSeq {
        &self.lf
    }

    pub fn bold(&self) -> &Switch {
        &self.bold
    }

    pub fn faint(&self) -> &Switch {
        &self.faint
    }

    pub fn italic(&self) -> &Switch {
        &self.italic
    }

    pub fn underline(&self) -> &Switch {
        &self.underline
    }

    pub fn slow_blink(&self) -> &Switch {
        &self.slow_blink
    }

    pub fn rapid_blink(&self) -> &Switch {
        &self.rapid_blink
    }

    /// Also known as "reverse video"
    pub fn invert(&self) -> &Switch {
        &self.invert
    }

    pub fn conceal(&self) -> &Switch {
        &self.conceal
    }

    pub fn strike(&self) -> &Switch {
        &self.strike
    }

    pub fn framed(&self) -> &Switch {
        &self.framed
    }

    pub fn encircled(&self) -> &Switch {
        &self.encircled
    }

    pub fn overlined(&self) -> &Switch {
        &self.overlined
    }

    /// Font selection sequences; index 0 is the standard font
    pub fn fonts(&self) -> &[EscapeSeq; FONT_COUNT] {
        &self.fonts
    }

    pub fn color4(&self) -> &Color4 {
        &self.color4
    }

    pub fn color8(&self) -> &Color8 {
        &self.color8
    }

    /// Quantize to the nearest 6x6x6 cube entry
    pub fn rgb_to_cube6(&self, r: u8, g: u8, b: u8) -> ColorPair {
        self.color8.cube6[cube_step(r)][cube_step(g)][cube_step(b)]
    }

    /// Quantize to the 24-level 8-bit grayscale ramp
    pub fn rgb_to_grayscale8(&self, r: u8, g: u8, b: u8) -> ColorPair {
        let level = (luma(r, g, b) * GRAYSCALE_LEVELS as f64 / 256.0) as usize;
        self.color8.grayscale[level.min(GRAYSCALE_LEVELS - 1)]
    }
}

impl Default for Sgr {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a channel from 0..=255 onto 0..=5
fn cube_step(channel: u8) -> usize {
    usize::from(channel) * 6 / 256
}

/// NTSC luma
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
}

/// 24-bit color from channels already known to be in range
pub fn rgb(r: u8, g: u8, b: u8) -> ColorPair {
    ColorPair {
        fore: ForeColor::from_seq(EscapeSeq::sgr(
            SeqKind::Foreground,
            &[38, 2, r, g, b],
            SeqId::true_color(SeqKind::Foreground, r, g, b),
        )),
        back: BackColor::from_seq(EscapeSeq::sgr(
            SeqKind::Background,
            &[48, 2, r, g, b],
            SeqId::true_color(SeqKind::Background, r, g, b),
        )),
    }
}

/// 24-bit color from unchecked integers.
///
/// Each channel must be in `0..=255`; otherwise this fails with
/// [`Error::OutOfRange`] naming the first offending channel.
pub fn true_color(r: i64, g: i64, b: i64) -> Result<ColorPair> {
    Ok(rgb(
        channel(r, Axis::Red)?,
        channel(g, Axis::Green)?,
        channel(b, Axis::Blue)?,
    ))
}

fn channel(value: i64, axis: Axis) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::OutOfRange {
        axis,
        value,
        len: 256,
    })
}

/// Quantize to a 256-level true-color gray
pub fn rgb_to_grayscale24(r: u8, g: u8, b: u8) -> ColorPair {
    let level = luma(r, g, b).round().clamp(0.0, 255.0) as u8;
    rgb(level, level, level)
}
