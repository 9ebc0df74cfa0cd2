//! Cache geometry and address decoding.
//!
//! A geometry fixes how a 32-bit byte address splits into fields:
//!
//! ```text
//!  31                                                  0
//! +-----------------------+---------------+-------------+
//! |          tag          |   set index   | byte offset |
//! +-----------------------+---------------+-------------+
//!                          set_index_bits  block_offset_bits
//! ```
//!
//! A fully associative cache has zero set index bits; a direct-mapped cache
//! has one line per set.

use crate::common::addr::Addr;
use crate::common::error::GeometryError;

/// Address split into its cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// High-order bits identifying the block within its set.
    pub tag: u32,
    /// Set the block maps to.
    pub set_index: usize,
    /// Byte offset inside the block.
    pub offset: u32,
}

/// Validated shape of a cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    size_bytes: usize,
    block_bytes: usize,
    ways: usize,
    num_sets: usize,
    block_offset_bits: u32,
    set_index_bits: u32,
}

impl CacheGeometry {
    /// Validates a cache shape and derives its set count and field widths.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total capacity in bytes.
    /// * `block_bytes` - Block (line) size in bytes.
    /// * `ways` - Associativity.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if any input is zero or not a power of
    /// two, if the block is larger than the cache, if `ways` does not divide
    /// the number of lines, or if the offset and index fields do not fit in
    /// 32 bits.
    pub fn new(size_bytes: usize, block_bytes: usize, ways: usize) -> Result<Self, GeometryError> {
        check_power_of_two("size_bytes", size_bytes)?;
        check_power_of_two("block_bytes", block_bytes)?;
        check_power_of_two("ways", ways)?;

        if block_bytes > size_bytes {
            return Err(GeometryError::BlockLargerThanCache {
                size_bytes,
                block_bytes,
            });
        }

        let num_lines = size_bytes / block_bytes;
        if ways > num_lines || num_lines % ways != 0 {
            return Err(GeometryError::WaysDoNotDivide {
                ways,
                lines: num_lines,
            });
        }

        let num_sets = num_lines / ways;
        let block_offset_bits = block_bytes.trailing_zeros();
        let set_index_bits = num_sets.trailing_zeros();
        let bits = block_offset_bits + set_index_bits;
        if bits > u32::BITS {
            return Err(GeometryError::AddressSpaceExceeded { bits });
        }

        Ok(Self {
            size_bytes,
            block_bytes,
            ways,
            num_sets,
            block_offset_bits,
            set_index_bits,
        })
    }

    /// Total capacity in bytes.
    #[inline]
    pub const fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Block size in bytes.
    #[inline]
    pub const fn block_bytes(&self) -> usize {
        self.block_bytes
    }

    /// Lines per set.
    #[inline]
    pub const fn associativity(&self) -> usize {
        self.ways
    }

    /// Total number of lines.
    #[inline]
    pub const fn num_lines(&self) -> usize {
        self.num_sets * self.ways
    }

    /// Number of sets.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// `log2(block_bytes)`.
    #[inline]
    pub const fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// `log2(num_sets)`.
    #[inline]
    pub const fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    /// True when every address maps to the single set.
    #[inline]
    pub const fn is_fully_associative(&self) -> bool {
        self.num_sets == 1
    }

    /// True when every set holds a single line.
    #[inline]
    pub const fn is_direct_mapped(&self) -> bool {
        self.ways == 1
    }

    /// Splits an address into tag, set index and byte offset.
    ///
    /// Every 32-bit value decodes; `set_index` is always below `num_sets`.
    #[inline]
    pub fn decode(&self, addr: u32) -> DecodedAddress {
        let addr = Addr::new(addr);
        let block = addr.val().checked_shr(self.block_offset_bits).unwrap_or(0);
        let set_index = (block as usize) & (self.num_sets - 1);
        let tag = addr
            .val()
            .checked_shr(self.block_offset_bits + self.set_index_bits)
            .unwrap_or(0);
        // block_bytes <= 2^32 is guaranteed by the field width check.
        let offset = if self.block_offset_bits >= u32::BITS {
            addr.val()
        } else {
            addr.block_offset(1 << self.block_offset_bits)
        };

        DecodedAddress {
            tag,
            set_index,
            offset,
        }
    }
}

fn check_power_of_two(field: &'static str, value: usize) -> Result<(), GeometryError> {
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(GeometryError::NotPowerOfTwo { field, value })
    }
}
