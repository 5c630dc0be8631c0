//! Node variants and the arena that owns them.
//!
//! Every node of every level lives in a single [`Arena`] and is addressed by a
//! [`NodeId`]. Horizontal (`link`) and vertical (`down`) neighbours are plain
//! handles into the same arena, so the whole node graph is released at once
//! when the arena is dropped.

use std::ops::{Index, IndexMut};

/// Stable handle to a node stored in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// One node of a level's horizontal chain.
#[derive(Debug, Clone)]
pub(crate) enum Node<T> {
    /// Left terminus of a level.
    Head {
        link: NodeId,
        down: Option<NodeId>,
        skip: usize,
    },
    /// One occurrence of a value at one level.
    Element {
        value: T,
        link: NodeId,
        down: Option<NodeId>,
        skip: usize,
        /// Position among the bottom-level elements; `None` above the bottom.
        index: Option<usize>,
    },
    /// Right terminus of a level.
    Tail {
        down: Option<NodeId>,
        /// Element count; only kept on the bottom level.
        index: Option<usize>,
    },
}

impl<T> Node<T> {
    pub(crate) fn head(link: NodeId, down: Option<NodeId>) -> Self {
        Node::Head {
            link,
            down,
            skip: 1,
        }
    }

    pub(crate) fn element(value: T, link: NodeId) -> Self {
        Node::Element {
            value,
            link,
            down: None,
            skip: 1,
            index: None,
        }
    }

    pub(crate) fn tail(down: Option<NodeId>) -> Self {
        Node::Tail { down, index: None }
    }

    /// Horizontal successor. Tail sentinels have none.
    pub(crate) fn link(&self) -> Option<NodeId> {
        match self {
            Node::Head { link, .. } | Node::Element { link, .. } => Some(*link),
            Node::Tail { .. } => None,
        }
    }

    pub(crate) fn set_link(&mut self, next: NodeId) {
        match self {
            Node::Head { link, .. } | Node::Element { link, .. } => *link = next,
            Node::Tail { .. } => panic!("tail sentinel has no horizontal link"),
        }
    }

    pub(crate) fn down(&self) -> Option<NodeId> {
        match self {
            Node::Head { down, .. } | Node::Element { down, .. } | Node::Tail { down, .. } => {
                *down
            }
        }
    }

    pub(crate) fn set_down(&mut self, below: Option<NodeId>) {
        match self {
            Node::Head { down, .. } | Node::Element { down, .. } | Node::Tail { down, .. } => {
                *down = below
            }
        }
    }

    /// Distance to the horizontal successor, counted in bottom-level positions.
    pub(crate) fn skip(&self) -> usize {
        match self {
            Node::Head { skip, .. } | Node::Element { skip, .. } => *skip,
            Node::Tail { .. } => 0,
        }
    }

    pub(crate) fn set_skip(&mut self, distance: usize) {
        match self {
            Node::Head { skip, .. } | Node::Element { skip, .. } => *skip = distance,
            Node::Tail { .. } => {}
        }
    }

    pub(crate) fn index(&self) -> Option<usize> {
        match self {
            Node::Head { .. } => None,
            Node::Element { index, .. } | Node::Tail { index, .. } => *index,
        }
    }

    pub(crate) fn set_index(&mut self, position: Option<usize>) {
        match self {
            Node::Head { .. } => {}
            Node::Element { index, .. } | Node::Tail { index, .. } => *index = position,
        }
    }

    pub(crate) fn value(&self) -> Option<&T> {
        match self {
            Node::Element { value, .. } => Some(value),
            Node::Head { .. } | Node::Tail { .. } => None,
        }
    }

    pub(crate) fn is_tail(&self) -> bool {
        matches!(self, Node::Tail { .. })
    }
}

/// Slot storage for nodes. Freed slots are recycled by later allocations.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Releases a slot and hands back the node that occupied it.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<Node<T>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id);
        Some(node)
    }

    /// Number of live nodes across all levels, sentinels included.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node handle {:?}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node handle {:?}", id),
        }
    }
}
