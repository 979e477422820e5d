//! Position remapping across edits.
//!
//! Every step reports a [`StepMap`]: a single window `(pos, old_size,
//! new_size)` of the flat token stream that was replaced. A [`Mapping`]
//! chains the maps of a whole transaction so a position taken before the
//! transaction can be carried to the matching position after it.
//!
//! # Example
//!
//! ```rust
//! use richtext_core::{Bias, Mapping, StepMap};
//!
//! let insert = StepMap::new(5, 0, 3);
//! assert_eq!(insert.map(5, Bias::Left), 5);
//! assert_eq!(insert.map(5, Bias::Right), 8);
//!
//! let mut mapping = Mapping::new();
//! mapping.push(insert);
//! mapping.push(StepMap::new(0, 2, 0));
//! assert_eq!(mapping.map(10, Bias::Right), 11);
//! ```

/// Tie-break direction for positions inside a replaced window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// Stick to the start of the window.
    Left,
    /// Stick to the end of the replacement.
    Right,
}

/// One contiguous replaced window of the flat token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepMap {
    /// Start of the window.
    pub pos: usize,
    /// Tokens removed.
    pub old_size: usize,
    /// Tokens inserted.
    pub new_size: usize,
}

impl Default for StepMap {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl StepMap {
    /// The identity map.
    pub const EMPTY: StepMap = StepMap {
        pos: 0,
        old_size: 0,
        new_size: 0,
    };

    /// Create a window.
    pub const fn new(pos: usize, old_size: usize, new_size: usize) -> Self {
        Self {
            pos,
            old_size,
            new_size,
        }
    }

    /// Whether this map leaves every position unchanged.
    pub fn is_empty(&self) -> bool {
        self.old_size == 0 && self.new_size == 0
    }

    /// Map a position through the window.
    ///
    /// Positions before the window stay put and positions after it shift by
    /// the size change. A position strictly inside the window (or exactly at a
    /// pure insertion point) goes to the start of the window with
    /// [`Bias::Left`] and to the end of the replacement with [`Bias::Right`].
    pub fn map(&self, pos: usize, bias: Bias) -> usize {
        if pos < self.pos {
            return pos;
        }
        let end = self.pos + self.old_size;
        if pos > end || (pos == end && self.old_size > 0) {
            return pos - self.old_size + self.new_size;
        }
        match bias {
            Bias::Left => self.pos,
            Bias::Right => self.pos + self.new_size,
        }
    }

    /// The window that undoes this one.
    pub fn invert(&self) -> StepMap {
        StepMap::new(self.pos, self.new_size, self.old_size)
    }
}

/// Ordered composition of step maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    /// Create an empty (identity) mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a map; it applies after those already present.
    pub fn push(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    /// The maps in apply order.
    pub fn maps(&self) -> &[StepMap] {
        &self.maps
    }

    /// Number of maps.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Whether no maps were recorded.
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Thread `pos` through every map in order.
    pub fn map(&self, pos: usize, bias: Bias) -> usize {
        self.maps.iter().fold(pos, |pos, map| map.map(pos, bias))
    }
}

impl FromIterator<StepMap> for Mapping {
    fn from_iter<I: IntoIterator<Item = StepMap>>(iter: I) -> Self {
        Self {
            maps: iter.into_iter().collect(),
        }
    }
}

impl Extend<StepMap> for Mapping {
    fn extend<I: IntoIterator<Item = StepMap>>(&mut self, iter: I) {
        self.maps.extend(iter);
    }
}
