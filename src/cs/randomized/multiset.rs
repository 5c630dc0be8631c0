//! # Multiset
//!
//! A bag of ordered values on top of [`SkipList`]. Membership and counting go
//! through the skip list's search; the set algebra (union, intersection,
//! difference) merges the two sorted element sequences and rebuilds a fresh
//! list from the result.
//!
//! Counts combine the usual way for multisets:
//!
//! | operation      | count of `v` in the result    |
//! |----------------|-------------------------------|
//! | `a \| b`       | `max(a.count(v), b.count(v))` |
//! | `a & b`        | `min(a.count(v), b.count(v))` |
//! | `a - b`        | `a.count(v) - b.count(v)`, at least 0 |
//!
//! ```rust
//! use skipbag::MultiSet;
//!
//! let a: MultiSet<i32> = [1, 2, 2, 3].into_iter().collect();
//! let b: MultiSet<i32> = [2, 3, 3].into_iter().collect();
//!
//! assert_eq!((&a | &b).to_string(), "MultiSet([1, 2, 2, 3, 3])");
//! assert_eq!((&a & &b).to_string(), "MultiSet([2, 3])");
//! assert_eq!((&a - &b).to_string(), "MultiSet([1, 2])");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::Peekable;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use super::skip_list::{Iter, SkipList, SkipListBuilder};
use crate::error::Result;

/// A multiset of `T` backed by a skip list.
#[derive(Clone)]
pub struct MultiSet<T> {
    list: SkipList<T>,
}

impl<T> Default for MultiSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MultiSet<T> {
    pub fn new() -> Self {
        Self {
            list: SkipList::new(),
        }
    }

    /// Creates an empty multiset whose skip list uses the given leveling
    /// configuration.
    pub fn with_builder(builder: SkipListBuilder) -> Result<Self> {
        Ok(Self {
            list: builder.build()?,
        })
    }

    /// Total number of occurrences stored.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Values in sorted order, each occurrence yielded separately.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Element at zero-based `position` in sorted order.
    pub fn get_at(&self, position: usize) -> Option<&T> {
        self.list.get_at(position)
    }

    pub fn try_get_at(&self, position: usize) -> Result<&T> {
        self.list.try_get_at(position)
    }

    /// The skip list holding the elements.
    pub fn as_skip_list(&self) -> &SkipList<T> {
        &self.list
    }
}

impl<T: Ord> MultiSet<T> {
    /// Removes one occurrence of `value`. Returns `false` if there was none.
    pub fn remove(&mut self, value: &T) -> bool {
        self.list.remove(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.list.contains(value)
    }

    /// Number of occurrences of `value`.
    pub fn count(&self, value: &T) -> usize {
        self.list.count(value)
    }

    /// True if no value occurs more often in `self` than in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        Runs::new(self.iter()).all(|(value, n)| other.count(value) >= n)
    }

    /// True if the two multisets share no value.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        Runs::new(self.iter()).all(|(value, _)| !other.contains(value))
    }
}

impl<T: Ord + Clone> MultiSet<T> {
    /// Adds one occurrence of `value`.
    pub fn insert(&mut self, value: T) {
        self.list.insert(value);
    }

    /// Occurrences of each value in either multiset, taking the larger count.
    pub fn union(&self, other: &Self) -> Self {
        self.combine(other, usize::max)
    }

    /// Occurrences common to both multisets, taking the smaller count.
    pub fn intersection(&self, other: &Self) -> Self {
        self.combine(other, usize::min)
    }

    /// `self` with one occurrence removed for each occurrence in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        self.combine(other, usize::saturating_sub)
    }

    /// Merges the runs of equal values from both sides and keeps
    /// `keep(self_count, other_count)` copies of each value.
    fn combine(&self, other: &Self, keep: fn(usize, usize) -> usize) -> Self {
        let mut left = Runs::new(self.iter());
        let mut right = Runs::new(other.iter());
        let mut a = left.next();
        let mut b = right.next();
        let mut merged = Vec::new();

        loop {
            let (value, in_self, in_other) = match (a, b) {
                (None, None) => break,
                (Some((va, na)), None) => {
                    a = left.next();
                    (va, na, 0)
                }
                (None, Some((vb, nb))) => {
                    b = right.next();
                    (vb, 0, nb)
                }
                (Some((va, na)), Some((vb, nb))) => match va.cmp(vb) {
                    Ordering::Less => {
                        a = left.next();
                        (va, na, 0)
                    }
                    Ordering::Greater => {
                        b = right.next();
                        (vb, 0, nb)
                    }
                    Ordering::Equal => {
                        a = left.next();
                        b = right.next();
                        (va, na, nb)
                    }
                },
            };
            let copies = keep(in_self, in_other);
            merged.extend(std::iter::repeat(value).take(copies).cloned());
        }

        let mut list = self.list.empty_like();
        list.extend(merged);
        Self { list }
    }
}

/// Groups a sorted sequence into `(value, occurrences)` pairs.
struct Runs<'a, T> {
    inner: Peekable<Iter<'a, T>>,
}

impl<'a, T> Runs<'a, T> {
    fn new(iter: Iter<'a, T>) -> Self {
        Self {
            inner: iter.peekable(),
        }
    }
}

impl<'a, T: Ord> Iterator for Runs<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<(&'a T, usize)> {
        let value = self.inner.next()?;
        let mut n = 1;
        while self.inner.next_if(|next| *next == value).is_some() {
            n += 1;
        }
        Some((value, n))
    }
}

impl<T: Ord> PartialEq for MultiSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for MultiSet<T> {}

impl<T: Ord + Clone> Sub<&MultiSet<T>> for &MultiSet<T> {
    type Output = MultiSet<T>;

    fn sub(self, rhs: &MultiSet<T>) -> MultiSet<T> {
        self.difference(rhs)
    }
}

impl<T: Ord + Clone> SubAssign<&MultiSet<T>> for MultiSet<T> {
    fn sub_assign(&mut self, rhs: &MultiSet<T>) {
        *self = self.difference(rhs);
    }
}

impl<T: Ord + Clone> BitOr<&MultiSet<T>> for &MultiSet<T> {
    type Output = MultiSet<T>;

    fn bitor(self, rhs: &MultiSet<T>) -> MultiSet<T> {
        self.union(rhs)
    }
}

impl<T: Ord + Clone> BitOrAssign<&MultiSet<T>> for MultiSet<T> {
    fn bitor_assign(&mut self, rhs: &MultiSet<T>) {
        *self = self.union(rhs);
    }
}

impl<T: Ord + Clone> BitAnd<&MultiSet<T>> for &MultiSet<T> {
    type Output = MultiSet<T>;

    fn bitand(self, rhs: &MultiSet<T>) -> MultiSet<T> {
        self.intersection(rhs)
    }
}

impl<T: Ord + Clone> BitAndAssign<&MultiSet<T>> for MultiSet<T> {
    fn bitand_assign(&mut self, rhs: &MultiSet<T>) {
        *self = self.intersection(rhs);
    }
}

impl<T: Ord + Clone> Extend<T> for MultiSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.list.extend(iter);
    }
}

impl<T: Ord + Clone> FromIterator<T> for MultiSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a MultiSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for MultiSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MultiSet").field(&self.list).finish()
    }
}

impl<T: fmt::Display> fmt::Display for MultiSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiSet([")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "])")
    }
}
