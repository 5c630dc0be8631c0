//! Single-level predecessor search and link splicing.

use std::cmp::Ordering;

use super::node::{Node, NodeId};
use super::SkipList;

impl<T: Ord> SkipList<T> {
    /// Walks right from `from` and returns the last node whose value is
    /// strictly less than `value`. `from` itself is returned when its
    /// successor already holds `value` or more, or is the tail sentinel.
    pub(super) fn predecessor(&self, from: NodeId, value: &T) -> NodeId {
        let mut cur = from;
        while let Some(next) = self.arena[cur].link() {
            match self.arena[next].value() {
                Some(v) if v.cmp(value) == Ordering::Less => cur = next,
                _ => break,
            }
        }
        cur
    }

    /// Links a new element holding `value` directly after `pred`.
    pub(super) fn splice_after(&mut self, pred: NodeId, value: T) -> NodeId {
        let next = match self.arena[pred].link() {
            Some(next) => next,
            None => panic!("cannot splice after a tail sentinel"),
        };
        let id = self.arena.alloc(Node::element(value, next));
        self.arena[pred].set_link(id);
        id
    }

    /// Unlinks and frees the successor of `pred` if it holds `value`.
    /// Returns whether a node was removed.
    pub(super) fn unlink_after(&mut self, pred: NodeId, value: &T) -> bool {
        let Some(target) = self.arena[pred].link() else {
            return false;
        };
        let after = match &self.arena[target] {
            Node::Element { value: v, link, .. } if v.cmp(value) == Ordering::Equal => *link,
            _ => return false,
        };
        self.arena[pred].set_link(after);
        self.arena.free(target);
        true
    }

    /// Starting point for the search on the next level down: the node the
    /// previous predecessor points down to, or the level's head when that
    /// link is missing or lands on a tail sentinel.
    pub(super) fn start_from(&self, hint: Option<NodeId>, head: NodeId) -> NodeId {
        match hint {
            Some(id) if !self.arena[id].is_tail() => id,
            _ => head,
        }
    }
}
