//! # Indexable Skip List
//!
//! A sorted multi-level linked structure that allows duplicate values. Each
//! level is a chain running from a head sentinel to a tail sentinel, sorted by
//! value. Level 1 (the bottom) holds every stored occurrence; each higher level
//! holds a random subset of the level below it. Every node also keeps a *skip*
//! distance: how many bottom-level positions lie between it and its successor
//! on the same level. Those distances let [`SkipList::get_at`] find the `i`-th
//! element without walking the bottom level.
//!
//! ```text
//! level 3:  H -------------------------> 30 ---------------> T
//! level 2:  H ---------> 10 -----------> 30 ------> 50 ----> T
//! level 1:  H --> 5 --> 10 --> 20 -----> 30 --> 40 --> 50 -> T
//! ```
//!
//! After every insert or remove the down links, bottom-level indices and
//! skip distances are recomputed in full, so any snapshot of the structure
//! satisfies them exactly.
//!
//! The list is single-threaded. Callers that share one across threads must
//! wrap it in their own lock.
//!
//! ```rust
//! use skipbag::cs::randomized::skip_list::SkipList;
//!
//! let mut list = SkipList::new();
//! for v in [5, 3, 3, 1, 4] {
//!     list.insert(v);
//! }
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 3, 4, 5]);
//! assert_eq!(list.get_at(2), Some(&3));
//! assert!(list.remove(&3));
//! assert!(list.contains(&3));
//! ```

mod horizontal;
mod iter;
mod level;
mod node;
mod search;
mod sync;

#[cfg(test)]
mod tests;

use std::fmt;

use log::{debug, trace};

use crate::error::{Error, Result};
use level::LevelGenerator;
use node::{Arena, NodeId};

pub use iter::{Entry, Iter, Level, LevelIter, Levels};

/// Default probability that an element is copied to the next level up.
const DEFAULT_PROBABILITY: f64 = 0.5;

/// Width of one bottom-level step in the [`Display`](fmt::Display) rendering.
const RENDER_STEP: usize = 5;

/// A sorted multiset of `T` stored in a skip list.
#[derive(Clone)]
pub struct SkipList<T> {
    arena: Arena<T>,
    /// Head sentinel of the highest level, `None` until the first insert.
    top: Option<NodeId>,
    levels: usize,
    len: usize,
    leveler: LevelGenerator,
}

/// Builder for a [`SkipList`] with a custom leveling policy.
///
/// ```rust
/// use skipbag::cs::randomized::skip_list::{SkipList, SkipListBuilder};
///
/// let list: SkipList<u32> = SkipListBuilder::new()
///     .seed(42)
///     .probability(0.25)
///     .max_level(16)
///     .build()
///     .unwrap();
/// assert!(list.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SkipListBuilder {
    seed: Option<u64>,
    probability: f64,
    max_level: Option<usize>,
}

impl Default for SkipListBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            probability: DEFAULT_PROBABILITY,
            max_level: None,
        }
    }
}

impl SkipListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the RNG seed so level draws are reproducible.
    /// Without it the generator is seeded from the OS.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Probability that an element is promoted one more level. Must be in `(0, 1)`.
    pub fn probability(mut self, p: f64) -> Self {
        self.probability = p;
        self
    }

    /// Caps how tall a single tower can be drawn. Unbounded by default.
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = Some(max_level);
        self
    }

    pub fn build<T>(self) -> Result<SkipList<T>> {
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(Error::InvalidProbability(self.probability));
        }
        if self.max_level == Some(0) {
            return Err(Error::InvalidMaxLevel);
        }
        Ok(SkipList::with_leveler(LevelGenerator::new(
            self.probability,
            self.max_level,
            self.seed,
        )))
    }
}

impl<T> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SkipList<T> {
    /// Creates an empty list with `p = 0.5`, no level cap and an OS-seeded RNG.
    pub fn new() -> Self {
        Self::with_leveler(LevelGenerator::new(DEFAULT_PROBABILITY, None, None))
    }

    /// An empty list sharing this one's leveling configuration.
    pub(crate) fn empty_like(&self) -> Self {
        Self::with_leveler(self.leveler.clone())
    }

    fn with_leveler(leveler: LevelGenerator) -> Self {
        Self {
            arena: Arena::default(),
            top: None,
            levels: 0,
            len: 0,
            leveler,
        }
    }

    /// Number of stored elements, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels built so far. Removals never lower it.
    pub fn level_count(&self) -> usize {
        self.levels
    }

    /// Promotion probability used for new towers.
    pub fn probability(&self) -> f64 {
        self.leveler.probability()
    }

    /// Level cap, if one was configured.
    pub fn max_level(&self) -> Option<usize> {
        self.leveler.max_level()
    }

    /// Drops every node and level. The leveling configuration and RNG state
    /// carry over.
    pub fn clear(&mut self) {
        debug!(
            "clearing skip list: {} elements, {} levels, {} nodes",
            self.len,
            self.levels,
            self.arena.live()
        );
        self.arena.clear();
        self.top = None;
        self.levels = 0;
        self.len = 0;
    }

    /// Iterates over the stored values in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Iterates over the levels from the top one down to the bottom one.
    pub fn levels(&self) -> Levels<'_, T> {
        Levels::new(self)
    }

    fn head_ids(&self) -> Vec<NodeId> {
        self.levels().map(|level| level.head).collect()
    }
}

impl<T: Ord + Clone> SkipList<T> {
    /// Inserts one occurrence of `value`.
    ///
    /// The value gets a random level `L` and is linked into the bottom `L`
    /// levels, growing the tower first if `L` exceeds the current height.
    pub fn insert(&mut self, value: T) {
        self.link_in(value);
        self.resync();
    }

    /// Splices `value` into every level of its tower without resynchronizing.
    fn link_in(&mut self, value: T) {
        let level = self.leveler.random_level();
        trace!("inserting at level {} of {}", level, self.levels);
        self.grow_to(level);

        let heads = self.head_ids();
        let (bottom, upper) = match heads[heads.len() - level..].split_last() {
            Some(split) => split,
            None => return,
        };

        let mut hint = None;
        for &head in upper {
            let pred = self.predecessor(self.start_from(hint, head), &value);
            self.splice_after(pred, value.clone());
            hint = self.arena[pred].down();
        }
        let pred = self.predecessor(self.start_from(hint, *bottom), &value);
        self.splice_after(pred, value);
        self.len += 1;
    }
}

impl<T: Ord> SkipList<T> {
    /// Removes one occurrence of `value` from every level it occupies.
    /// Returns `false`, leaving the list untouched, if `value` is absent.
    pub fn remove(&mut self, value: &T) -> bool {
        if !self.contains(value) {
            trace!("remove: value not present");
            return false;
        }

        let mut hint = None;
        for head in self.head_ids() {
            let pred = self.predecessor(self.start_from(hint, head), value);
            self.unlink_after(pred, value);
            hint = self.arena[pred].down();
        }
        self.len -= 1;
        trace!("removed one occurrence, {} elements left", self.len);
        self.resync();
        true
    }
}

impl<T: Ord + Clone> Extend<T> for SkipList<T> {
    /// Links every value in first and synchronizes the levels once at the end.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let before = self.len;
        for value in iter {
            self.link_in(value);
        }
        if self.len != before {
            self.resync();
        }
    }
}

impl<T: Ord + Clone> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// One line per level, top level first. Each element is drawn as `-> value`
/// with gaps proportional to the skip distance leading to it:
///
/// ```text
///  -     > 3 -          >
///  -> 1 -> 3 -> 4 -> 5 ->
/// ```
///
/// The format is meant for debugging and may change.
impl<T: fmt::Display> fmt::Display for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.levels().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let mut gap = level.head_skip();
            for entry in level.iter() {
                write_step(f, gap)?;
                write!(f, "{}", entry.value())?;
                gap = entry.skip();
            }
            write_step(f, gap)?;
        }
        Ok(())
    }
}

fn write_step(f: &mut fmt::Formatter<'_>, skip: usize) -> fmt::Result {
    let pad = RENDER_STEP * skip.saturating_sub(1);
    write!(f, " -{:pad$}> ", "", pad = pad)
}
