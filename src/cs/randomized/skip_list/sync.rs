//! Level synchronization after a mutation.
//!
//! Down links, bottom-level indices and skip distances are all re-derived
//! from the horizontal chains after every insert or remove. Nothing here is
//! maintained incrementally.

use std::cmp::Ordering;

use super::node::{Node, NodeId};
use super::SkipList;

impl<T: Ord> SkipList<T> {
    /// Runs the three synchronization passes in dependency order: skips are
    /// measured against the indices, which need the down links.
    pub(super) fn resync(&mut self) {
        self.sync_down();
        self.reindex();
        self.fix_skips();
    }

    /// Points every node's down link at its counterpart one level below.
    fn sync_down(&mut self) {
        let heads = self.head_ids();
        for pair in heads.windows(2) {
            self.link_levels(pair[0], pair[1]);
        }
    }

    /// Matches the elements of `upper` against those of `lower` in one merge
    /// walk. Each upper element claims the next unclaimed equal element below
    /// it; if there is none it points at the lower tail. Tails point at tails.
    fn link_levels(&mut self, upper: NodeId, lower: NodeId) {
        let lower_tail = self.tail_of(lower);
        let mut below = self.arena[lower].link().unwrap_or(lower_tail);
        let mut cur = self.arena[upper].link();

        while let Some(id) = cur {
            let target = match &self.arena[id] {
                Node::Element { value, .. } => {
                    while let Some(v) = self.arena[below].value() {
                        if v.cmp(value) != Ordering::Less {
                            break;
                        }
                        below = self.arena[below].link().unwrap_or(lower_tail);
                    }
                    match self.arena[below].value() {
                        Some(v) if v.cmp(value) == Ordering::Equal => {
                            let matched = below;
                            below = self.arena[below].link().unwrap_or(lower_tail);
                            matched
                        }
                        _ => lower_tail,
                    }
                }
                Node::Tail { .. } | Node::Head { .. } => lower_tail,
            };
            self.arena[id].set_down(Some(target));
            cur = self.arena[id].link();
        }
    }

    /// Numbers the bottom-level elements 0, 1, 2, ... and gives the bottom
    /// tail the element count.
    fn reindex(&mut self) {
        let Some(bottom) = self.head_ids().last().copied() else {
            return;
        };
        let mut position = 0;
        let mut cur = self.arena[bottom].link();
        while let Some(id) = cur {
            let node = &mut self.arena[id];
            node.set_index(Some(position));
            if node.is_tail() {
                break;
            }
            position += 1;
            cur = node.link();
        }
        debug_assert_eq!(position, self.len);
    }

    /// Sets each head's and element's skip to the number of bottom-level
    /// steps between it and its successor on the same level.
    fn fix_skips(&mut self) {
        for head in self.head_ids() {
            let mut cur = head;
            while let Some(next) = self.arena[cur].link() {
                let skip = self.rank(next) - self.rank(cur);
                self.arena[cur].set_skip(skip);
                cur = next;
            }
        }
    }
}

impl<T> SkipList<T> {
    /// Bottom-level position of a node, counting the bottom head as 0, the
    /// first element as 1 and the bottom tail as `len + 1`.
    pub(super) fn rank(&self, id: NodeId) -> usize {
        let mut cur = id;
        while let Some(below) = self.arena[cur].down() {
            cur = below;
        }
        match &self.arena[cur] {
            Node::Head { .. } => 0,
            node => node.index().map_or(0, |i| i + 1),
        }
    }
}
