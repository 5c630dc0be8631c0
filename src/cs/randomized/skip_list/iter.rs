//! Iteration over levels and over the nodes of one level.
//!
//! Every traversal gets a fresh iterator; all of them are forward-only and
//! stop at the sentinel that ends their chain without yielding it.

use std::iter::FusedIterator;

use super::node::{Node, NodeId};
use super::SkipList;

/// Head sentinels from the top level down to the bottom one.
pub struct Levels<'a, T> {
    list: &'a SkipList<T>,
    next: Option<NodeId>,
}

impl<'a, T> Levels<'a, T> {
    pub(super) fn new(list: &'a SkipList<T>) -> Self {
        Self {
            list,
            next: list.top,
        }
    }
}

impl<'a, T> Iterator for Levels<'a, T> {
    type Item = Level<'a, T>;

    fn next(&mut self) -> Option<Level<'a, T>> {
        let head = self.next?;
        self.next = self.list.arena[head].down();
        Some(Level {
            list: self.list,
            head,
        })
    }
}

impl<T> FusedIterator for Levels<'_, T> {}

/// One level of the list, seen from its head sentinel.
pub struct Level<'a, T> {
    list: &'a SkipList<T>,
    pub(super) head: NodeId,
}

impl<'a, T> Level<'a, T> {
    /// Elements of this level, left to right.
    pub fn iter(&self) -> LevelIter<'a, T> {
        LevelIter {
            list: self.list,
            cur: self.list.arena[self.head].link(),
        }
    }

    /// Skip distance from the head sentinel to the first node of the level.
    pub fn head_skip(&self) -> usize {
        self.list.arena[self.head].skip()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn is_bottom(&self) -> bool {
        self.list.arena[self.head].down().is_none()
    }
}

/// An element node as seen through [`LevelIter`].
#[derive(Debug, PartialEq, Eq)]
pub struct Entry<'a, T> {
    value: &'a T,
    skip: usize,
    index: Option<usize>,
}

impl<T> Clone for Entry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Entry<'_, T> {}

impl<'a, T> Entry<'a, T> {
    pub fn value(&self) -> &'a T {
        self.value
    }

    /// Bottom-level distance to the next node on the same level.
    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Position among all elements; only set on the bottom level.
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

/// Element nodes of one level, left to right.
pub struct LevelIter<'a, T> {
    list: &'a SkipList<T>,
    cur: Option<NodeId>,
}

impl<'a, T> Iterator for LevelIter<'a, T> {
    type Item = Entry<'a, T>;

    fn next(&mut self) -> Option<Entry<'a, T>> {
        let id = self.cur?;
        let list = self.list;
        match &list.arena[id] {
            Node::Element {
                value,
                link,
                skip,
                index,
                ..
            } => {
                self.cur = Some(*link);
                Some(Entry {
                    value,
                    skip: *skip,
                    index: *index,
                })
            }
            Node::Tail { .. } | Node::Head { .. } => {
                self.cur = None;
                None
            }
        }
    }
}

impl<T> FusedIterator for LevelIter<'_, T> {}

/// Stored values in sorted order, duplicates included.
pub struct Iter<'a, T> {
    inner: Option<LevelIter<'a, T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(list: &'a SkipList<T>) -> Self {
        Self {
            inner: list.levels().last().map(|bottom| bottom.iter()),
            remaining: list.len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let entry = self.inner.as_mut()?.next()?;
        self.remaining -= 1;
        Some(entry.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
