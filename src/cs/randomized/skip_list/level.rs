//! Random leveling and construction of new levels.
//!
//! A new element is copied to the next level up with probability `p`, so its
//! level is `1 + Geometric(p)`. With the default `p = 0.5` and no cap, the
//! draw is unbounded: the loop terminates with probability one but has no
//! hard upper limit.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::node::{Node, NodeId};
use super::SkipList;

/// Draws tower heights for newly inserted elements.
#[derive(Debug, Clone)]
pub(crate) struct LevelGenerator {
    p: f64,
    max_level: Option<usize>,
    rng: StdRng,
}

impl LevelGenerator {
    /// `p` must already be validated to lie in `(0, 1)` and `max_level`, if
    /// set, to be at least 1.
    pub(crate) fn new(p: f64, max_level: Option<usize>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { p, max_level, rng }
    }

    /// Returns a level of at least 1.
    pub(crate) fn random_level(&mut self) -> usize {
        let mut level = 1;
        while self.rng.gen::<f64>() < self.p {
            if self.max_level.is_some_and(|cap| level >= cap) {
                break;
            }
            level += 1;
        }
        level
    }

    pub(crate) fn probability(&self) -> f64 {
        self.p
    }

    pub(crate) fn max_level(&self) -> Option<usize> {
        self.max_level
    }
}

impl<T> SkipList<T> {
    /// Stacks empty levels on top of the tower until it is `level` high.
    ///
    /// On an empty list this builds the bottom level first. Each new head
    /// points down at the previous top head and each new tail at the previous
    /// top tail.
    pub(super) fn grow_to(&mut self, level: usize) {
        if level <= self.levels {
            return;
        }
        debug!("growing skip list from {} to {} levels", self.levels, level);

        let mut below_head = self.top;
        let mut below_tail = below_head.map(|head| self.tail_of(head));
        while self.levels < level {
            let tail = self.arena.alloc(Node::tail(below_tail));
            let head = self.arena.alloc(Node::head(tail, below_head));
            below_head = Some(head);
            below_tail = Some(tail);
            self.levels += 1;
        }
        self.top = below_head;
    }

    /// Tail sentinel of the level starting at `head`.
    pub(super) fn tail_of(&self, head: NodeId) -> NodeId {
        let mut cur = head;
        while let Some(next) = self.arena[cur].link() {
            cur = next;
        }
        cur
    }
}
