//! Membership, counting and positional lookup.

use std::cmp::Ordering;

use super::node::NodeId;
use super::SkipList;
use crate::error::{Error, Result};

impl<T: Ord> SkipList<T> {
    /// Returns `true` if at least one occurrence of `value` is stored.
    ///
    /// The walk starts on the highest level that holds any element, runs
    /// right while the next value is smaller than `value` and drops a level
    /// otherwise. Once it reaches the bottom, the remaining comparison is a
    /// linear scan of the bottom chain from the last predecessor found.
    pub fn contains(&self, value: &T) -> bool {
        self.bottom_predecessor(value)
            .and_then(|pred| self.arena[pred].link())
            .and_then(|next| self.arena[next].value())
            .is_some_and(|v| v.cmp(value) == Ordering::Equal)
    }

    /// Number of stored occurrences of `value`.
    pub fn count(&self, value: &T) -> usize {
        let Some(pred) = self.bottom_predecessor(value) else {
            return 0;
        };
        let mut count = 0;
        let mut cur = self.arena[pred].link();
        while let Some(id) = cur {
            match self.arena[id].value() {
                Some(v) if v.cmp(value) == Ordering::Equal => count += 1,
                _ => break,
            }
            cur = self.arena[id].link();
        }
        count
    }

    /// Bottom-level node right before the first occurrence of `value` (or
    /// before where it would go). `None` on an empty list.
    pub(super) fn bottom_predecessor(&self, value: &T) -> Option<NodeId> {
        let mut cur = self.top?;
        // Levels emptied by removals are never torn down; skip past them.
        while self.arena[cur].link().is_some_and(|next| self.arena[next].is_tail()) {
            cur = self.arena[cur].down()?;
        }
        loop {
            cur = self.predecessor(cur, value);
            match self.arena[cur].down() {
                Some(below) => cur = below,
                None => return Some(cur),
            }
        }
    }
}

impl<T> SkipList<T> {
    /// Returns the element at zero-based `position` in sorted order, or
    /// `None` if `position >= self.len()`.
    ///
    /// At each node the walk compares `index + skip` against the target:
    /// it moves right on an undershoot, drops a level on an overshoot and
    /// returns the successor on an exact hit.
    pub fn get_at(&self, position: usize) -> Option<&T> {
        if position >= self.len {
            return None;
        }
        // Work in ranks so the head sentinel sits at 0 instead of -1.
        let target = position + 1;
        let mut cur = self.top?;
        let mut rank = 0;
        loop {
            let node = &self.arena[cur];
            let reach = rank + node.skip();
            match reach.cmp(&target) {
                Ordering::Greater => cur = node.down()?,
                Ordering::Less => {
                    cur = node.link()?;
                    rank = reach;
                }
                Ordering::Equal => return self.arena[node.link()?].value(),
            }
        }
    }

    /// Like [`get_at`](Self::get_at) but reports an out-of-range position as
    /// an error.
    pub fn try_get_at(&self, position: usize) -> Result<&T> {
        self.get_at(position).ok_or(Error::IndexOutOfRange {
            index: position,
            len: self.len,
        })
    }
}
