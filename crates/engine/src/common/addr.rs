//! Trace address type.
//!
//! Traces carry plain 32-bit byte addresses. `Addr` wraps them so that
//! addresses are not confused with tags, set indices, or counters.

use std::fmt;

/// A 32-bit byte address read from a memory trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub u32);

impl Addr {
    /// Creates a new address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the byte offset of this address inside a block of `block_bytes`.
    ///
    /// `block_bytes` must be a power of two.
    #[inline]
    pub const fn block_offset(self, block_bytes: u32) -> u32 {
        self.0 & block_bytes.wrapping_sub(1)
    }
}

impl From<u32> for Addr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl From<Addr> for u32 {
    fn from(addr: Addr) -> Self {
        addr.0
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::LowerHex for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
