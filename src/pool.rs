//! Buffer recycling for the search.
//!
//! A multi-million-node search opens and closes a frame for every node it visits, and each
//! frame owns a queue of unexplored children. The pooled strategy hands those queues back
//! out instead of freeing them; the plain strategy lets them drop. Both feed the search the
//! same children in the same order.

use std::collections::VecDeque;

use crate::node::Node;

/// Values that can be emptied and handed out again.
pub trait Recycle {
    fn reset(&mut self);
}

impl<T> Recycle for VecDeque<T> {
    #[inline]
    fn reset(&mut self) {
        self.clear();
    }
}

impl<T> Recycle for Vec<T> {
    #[inline]
    fn reset(&mut self) {
        self.clear();
    }
}

/// Free list of reusable values, holding at most `limit` of them.
#[derive(Debug)]
pub struct Pool<T> {
    free: Vec<T>,
    limit: usize,
    created: u64,
    reused: u64,
}

impl<T: Default + Recycle> Pool<T> {
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            free: Vec::new(),
            limit,
            created: 0,
            reused: 0,
        }
    }

    /// Pop a recycled value, or create a fresh one when the pool is empty.
    pub fn take(&mut self) -> T {
        match self.free.pop() {
            Some(item) => {
                self.reused += 1;
                item
            }
            None => {
                self.created += 1;
                T::default()
            }
        }
    }

    /// Return a value for reuse. Past the limit it is dropped instead.
    pub fn recycle(&mut self, mut item: T) {
        if self.free.len() >= self.limit {
            return;
        }
        item.reset();
        self.free.push(item);
    }

    /// Number of values waiting to be reused.
    #[inline]
    pub fn size(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn created(&self) -> u64 {
        self.created
    }

    #[inline]
    pub fn reused(&self) -> u64 {
        self.reused
    }
}

impl<T: Default + Recycle> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a node's child queue comes from and where it goes once its frame resolves.
pub trait ChildAllocator {
    fn take(&mut self) -> VecDeque<Node>;

    fn recycle(&mut self, children: VecDeque<Node>);

    /// Queues currently held for reuse.
    fn pooled(&self) -> usize {
        0
    }
}

/// Fresh queue per node, dropped on resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainAllocator;

impl ChildAllocator for PlainAllocator {
    #[inline]
    fn take(&mut self) -> VecDeque<Node> {
        VecDeque::new()
    }

    #[inline]
    fn recycle(&mut self, _children: VecDeque<Node>) {}
}

/// Queues are recycled through a [`Pool`].
#[derive(Debug, Default)]
pub struct PooledAllocator {
    queues: Pool<VecDeque<Node>>,
}

impl PooledAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` idle queues. A search never holds more than one queue per open
    /// frame, so `max_depth + 1` is enough.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            queues: Pool::with_limit(limit),
        }
    }

    pub fn created(&self) -> u64 {
        self.queues.created()
    }

    pub fn reused(&self) -> u64 {
        self.queues.reused()
    }
}

impl ChildAllocator for PooledAllocator {
    #[inline]
    fn take(&mut self) -> VecDeque<Node> {
        self.queues.take()
    }

    #[inline]
    fn recycle(&mut self, children: VecDeque<Node>) {
        self.queues.recycle(children);
    }

    fn pooled(&self) -> usize {
        self.queues.size()
    }
}

/// Pick a strategy from the `use_pool` flag. A pool keeps at most `limit` idle queues.
pub fn allocator(use_pool: bool, limit: usize) -> Box<dyn ChildAllocator> {
    if use_pool {
        Box::new(PooledAllocator::with_limit(limit))
    } else {
        Box::new(PlainAllocator)
    }
}
