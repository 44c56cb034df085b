//! Escape sequence values
//!
//! An [`EscapeSeq`] is an immutable, inline-stored byte sequence with an
//! identity token. Two sequences with the same identity render identically,
//! so the renderer compares ids instead of bytes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};

/// The escape character that starts every control sequence
pub const ESC: u8 = 0x1b;

/// Maximum number of bytes an escape sequence can hold
pub const SEQ_CAPACITY: usize = 24;

/// Numeric SGR parameters written by [`EscapeSeq::sgr`]
const MAX_SGR_PARAMS: usize = 5;

/// Compile-time bound on the parameter count of [`EscapeSeq::sgr`]
struct SgrParams<const N: usize>;

impl<const N: usize> SgrParams<N> {
    const FITS: () = assert!(N <= MAX_SGR_PARAMS, "too many SGR parameters");
}

/// Counter ids start above the deterministic 24-bit color range.
const COUNTER_BASE: u64 = 1 << 32;
const TRUE_FORE_BASE: u64 = 0x0100_0000;
const TRUE_BACK_BASE: u64 = 0x0200_0000;

/// Counter ids are handed out in blocks of `2^32`; the block number is the
/// high half of the id.
const BLOCK_BITS: u32 = 32;
const BLOCK_MASK: u64 = (1 << BLOCK_BITS) - 1;

/// Next unreserved block, shared by every allocator in the process.
/// Block 0 would overlap the color range, so numbering starts at 1.
static NEXT_BLOCK: AtomicU64 = AtomicU64::new(COUNTER_BASE >> BLOCK_BITS);

fn reserve_block() -> u64 {
    NEXT_BLOCK.fetch_add(1, Ordering::Relaxed) << BLOCK_BITS
}

/// Identity token of an escape sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeqId(u64);

impl SeqId {
    /// Raw token value
    pub fn value(self) -> u64 {
        self.0
    }

    /// Deterministic id for a 24-bit color in the given direction
    pub fn true_color(kind: SeqKind, r: u8, g: u8, b: u8) -> Self {
        let base = match kind {
            SeqKind::Background => TRUE_BACK_BASE,
            SeqKind::Foreground | SeqKind::Control => TRUE_FORE_BASE,
        };
        Self(base | (u64::from(r) << 16) | (u64::from(g) << 8) | u64::from(b))
    }
}

/// Monotonic identity source owned by a registry.
///
/// Each allocator draws from its own block of ids, so ids from different
/// registries never collide. A new block is reserved when one runs out.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(reserve_block()),
        }
    }

    /// Allocate a fresh, never-before-returned id
    pub fn next_id(&self) -> SeqId {
        let mut current = self.next.load(Ordering::Relaxed);
        loop {
            let following = if current & BLOCK_MASK == BLOCK_MASK {
                reserve_block()
            } else {
                current + 1
            };
            match self.next.compare_exchange_weak(
                current,
                following,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return SeqId(current),
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// What a sequence does when written to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqKind {
    /// Style switches, resets and plain control characters
    Control,
    /// Sets the foreground color
    Foreground,
    /// Sets the background color
    Background,
}

/// An interned escape sequence
#[derive(Clone, Copy)]
pub struct EscapeSeq {
    id: SeqId,
    kind: SeqKind,
    len: u8,
    buf: [u8; SEQ_CAPACITY],
}

impl EscapeSeq {
    /// Create a sequence from its literal text
    pub fn new(kind: SeqKind, text: &str, id: SeqId) -> Result<Self> {
        let bytes = text.as_bytes();
        if bytes.len() > SEQ_CAPACITY {
            return Err(Error::SequenceTooLong { len: bytes.len() });
        }
        let mut buf = [0u8; SEQ_CAPACITY];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            id,
            kind,
            len: bytes.len() as u8,
            buf,
        })
    }

    /// Create a Control Sequence Introducer sequence (`ESC [` + `params`)
    pub fn csi(kind: SeqKind, params: &str, id: SeqId) -> Result<Self> {
        let len = params.len() + 2;
        if len > SEQ_CAPACITY {
            return Err(Error::SequenceTooLong { len });
        }
        let mut buf = [0u8; SEQ_CAPACITY];
        buf[0] = ESC;
        buf[1] = b'[';
        buf[2..len].copy_from_slice(params.as_bytes());
        Ok(Self {
            id,
            kind,
            len: len as u8,
            buf,
        })
    }

    /// A single-byte sequence such as a carriage return
    pub(crate) fn byte(kind: SeqKind, byte: u8, id: SeqId) -> Self {
        let mut seq = Self {
            id,
            kind,
            len: 0,
            buf: [0u8; SEQ_CAPACITY],
        };
        seq.push(byte);
        seq
    }

    /// Build `ESC [ p1 ; p2 ; ... m` from numeric parameters.
    ///
    /// More than five parameters is a compile error; five always fit the
    /// inline buffer, so this never fails.
    pub(crate) fn sgr<const N: usize>(kind: SeqKind, params: &[u8; N], id: SeqId) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = SgrParams::<N>::FITS;
        let mut seq = Self {
            id,
            kind,
            len: 0,
            buf: [0u8; SEQ_CAPACITY],
        };
        seq.push(ESC);
        seq.push(b'[');
        for (i, &param) in params.iter().enumerate() {
            if i > 0 {
                seq.push(b';');
            }
            seq.push_u8(param);
        }
        seq.push(b'm');
        seq
    }

    fn push(&mut self, byte: u8) {
        self.buf[self.len as usize] = byte;
        self.len += 1;
    }

    fn push_u8(&mut self, mut n: u8) {
        if n >= 100 {
            self.push(b'0' + n / 100);
            n %= 100;
            self.push(b'0' + n / 10);
            self.push(b'0' + n % 10);
        } else if n >= 10 {
            self.push(b'0' + n / 10);
            self.push(b'0' + n % 10);
        } else {
            self.push(b'0' + n);
        }
    }

    /// Identity token
    pub fn id(&self) -> SeqId {
        self.id
    }

    pub fn kind(&self) -> SeqKind {
        self.kind
    }

    /// Binary form, ready to be written to the device
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Textual form
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl PartialEq for EscapeSeq {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EscapeSeq {}

impl Hash for EscapeSeq {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EscapeSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscapeSeq")
            .field("id", &self.id.0)
            .field("kind", &self.kind)
            .field("text", &self.as_str())
            .finish()
    }
}

impl fmt::Display for EscapeSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sequence that may only go into a foreground slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForeColor(EscapeSeq);

impl ForeColor {
    pub(crate) fn from_seq(seq: EscapeSeq) -> Self {
        debug_assert_eq!(seq.kind(), SeqKind::Foreground);
        Self(seq)
    }

    pub fn seq(&self) -> &EscapeSeq {
        &self.0
    }

    pub fn id(&self) -> SeqId {
        self.0.id()
    }
}

/// A sequence that may only go into a background slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackColor(EscapeSeq);

impl BackColor {
    pub(crate) fn from_seq(seq: EscapeSeq) -> Self {
        debug_assert_eq!(seq.kind(), SeqKind::Background);
        Self(seq)
    }

    pub fn seq(&self) -> &EscapeSeq {
        &self.0
    }

    pub fn id(&self) -> SeqId {
        self.0.id()
    }
}

/// Foreground and background forms of the same color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub fore: ForeColor,
    pub back: BackColor,
}

/// Paired on/off sequences for a boolean attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    pub on: EscapeSeq,
    pub off: EscapeSeq,
}
