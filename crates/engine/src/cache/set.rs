//! Cache lines and sets.

/// Cache line entry containing tag, validity, and recency counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the resident block. Meaningless while `valid` is false.
    pub tag: u32,
    /// Whether the line holds a block.
    pub valid: bool,
    /// Accesses to the set since this way was last touched.
    pub recency: u64,
}

impl CacheLine {
    /// True if this line is valid and holds `tag`.
    #[inline]
    pub const fn matches(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }
}

/// One set of a set-associative cache: a fixed number of ways.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: Box<[CacheLine]>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways].into_boxed_slice(),
        }
    }

    /// Number of ways in this set.
    #[inline]
    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// All lines, indexed by way.
    #[inline]
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Mutable access to the lines, for replacement policies.
    #[inline]
    pub fn lines_mut(&mut self) -> &mut [CacheLine] {
        &mut self.lines
    }

    /// Returns the line in `way`, if it exists.
    #[inline]
    pub fn line(&self, way: usize) -> Option<&CacheLine> {
        self.lines.get(way)
    }

    /// Way holding a valid line with `tag`.
    pub fn find(&self, tag: u32) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(tag))
    }

    /// Lowest-numbered invalid way.
    pub fn first_invalid(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.valid)
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    /// Installs `tag` in `way`, replacing whatever was there.
    ///
    /// The new line starts valid with a recency of zero.
    ///
    /// # Panics
    ///
    /// Panics if `way` is not below [`ways`](Self::ways).
    pub fn fill(&mut self, way: usize, tag: u32) {
        self.lines[way] = CacheLine {
            tag,
            valid: true,
            recency: 0,
        };
    }
}
