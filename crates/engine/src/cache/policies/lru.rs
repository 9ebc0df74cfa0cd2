//! Least Recently Used (LRU) Replacement Policy.
//!
//! Each line carries a recency counter. On every access to a set the touched
//! way is reset to zero and every other way is aged by one, so the line with
//! the largest counter is the one untouched for the longest time.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(W)
//! - **Space Complexity:** O(1) beyond the counters stored in the lines
//! - **Best Case:** Working sets that fit in a set, strong temporal locality
//! - **Worst Case:** Cyclic scans one line larger than the set (thrashing)

use super::ReplacementPolicy;
use crate::cache::set::CacheSet;

/// LRU Policy. Stateless; the counters live in the lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates a new LRU policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Resets `way` to the most recent position and ages every other way.
    ///
    /// Invalid ways are aged too; their counters never influence a victim
    /// choice because invalid ways are always taken first.
    fn update(&mut self, set: &mut CacheSet, way: usize) {
        for (i, line) in set.lines_mut().iter_mut().enumerate() {
            if i == way {
                line.recency = 0;
            } else {
                line.recency = line.recency.saturating_add(1);
            }
        }
    }

    /// Returns the lowest invalid way, or else the way with the strictly
    /// largest counter (lowest index wins ties).
    fn get_victim(&mut self, set: &CacheSet) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }

        let mut victim = 0;
        let mut oldest = 0;
        for (i, line) in set.lines().iter().enumerate() {
            if i == 0 || line.recency > oldest {
                victim = i;
                oldest = line.recency;
            }
        }
        victim
    }
}
