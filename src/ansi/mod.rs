//! ANSI escape sequence registry
//!
//! - `seq`: interned escape sequence values and the identity allocator
//! - `sgr`: the registry of style switches and 4/8/24-bit colors
//! - `quantize`: RGB to terminal color mapping

mod quantize;
mod seq;
pub mod sgr;

pub use quantize::{ColorMode, Quantize, Quantizer};
pub use seq::{
    BackColor, ColorPair, EscapeSeq, ForeColor, IdAllocator, SeqId, SeqKind, Switch, ESC,
    SEQ_CAPACITY,
};
pub use sgr::{rgb, rgb_to_grayscale24, true_color, Color4, Color8, Sgr};
