//! The heap of paired queues and its public operations.

use std::sync::Arc;

use tracing::debug;

use crate::priority::TreePriority;
use crate::tile::Tile;
use crate::tiling::LayerPair;

use super::heap;
use super::order::RasterOrderComparator;
use super::paired::PairedTilingSetQueue;

/// Produces raster work in priority order across a set of layer pairs.
///
/// A build is a snapshot: the tree priority mode and the set of pairs are
/// fixed until [`reset`](Self::reset). Raster workers drain the queue with
/// [`top`](Self::top)/[`pop`](Self::pop), or through the [`Iterator`] impl,
/// and every tile comes out exactly once even when both trees of a pair
/// reference it.
///
/// Internally the pairs sit in a binary max-heap keyed by each pair's
/// current top tile. The key changes whenever a pair advances, so `pop`
/// extracts the root, advances it, and reinserts it rather than mutating
/// the heap in place.
pub struct RasterTilePriorityQueue {
    paired_queues: Vec<Box<PairedTilingSetQueue>>,
    tree_priority: TreePriority,
}

impl RasterTilePriorityQueue {
    /// Builds the queue over the given layer pairs. O(n).
    pub fn build(pairs: &[LayerPair], tree_priority: TreePriority) -> Self {
        let mut paired_queues: Vec<Box<PairedTilingSetQueue>> = pairs
            .iter()
            .map(|pair| Box::new(PairedTilingSetQueue::new(pair, tree_priority)))
            .collect();

        let comparator = RasterOrderComparator::new(tree_priority);
        heap::make_heap(&mut paired_queues, |a, b| comparator.lower_priority(a, b));

        debug!(
            pairs = paired_queues.len(),
            ?tree_priority,
            "raster tile priority queue built"
        );
        Self {
            paired_queues,
            tree_priority,
        }
    }

    /// Drops every pair; the queue reports empty afterwards.
    pub fn reset(&mut self) {
        self.paired_queues.clear();
    }

    /// The tree priority mode this build was constructed under.
    pub fn tree_priority(&self) -> TreePriority {
        self.tree_priority
    }

    /// True when no pair has tiles left.
    ///
    /// Empty pairs sort below non-empty ones, so an empty heap root means
    /// every pair is drained.
    pub fn is_empty(&self) -> bool {
        self.paired_queues.first().map_or(true, |root| root.is_empty())
    }

    /// The highest-priority unemitted tile, or `None` when drained.
    /// Idempotent between mutations. O(1).
    pub fn top(&self) -> Option<&Arc<Tile>> {
        let root = self.paired_queues.first()?;
        if root.is_empty() {
            return None;
        }
        root.top(self.tree_priority)
    }

    /// Advances past the current top tile. O(log n) outer work.
    ///
    /// Calling this on an empty queue is a programming error; it is a
    /// no-op in release builds.
    pub fn pop(&mut self) {
        debug_assert!(!self.is_empty());
        let comparator = RasterOrderComparator::new(self.tree_priority);

        // The root's heap key is its top tile, which advancing changes:
        // take the root out, advance it, sift it back in.
        heap::pop_heap(&mut self.paired_queues, |a, b| comparator.lower_priority(a, b));
        if let Some(paired_queue) = self.paired_queues.last_mut() {
            paired_queue.pop(self.tree_priority);
        }
        heap::push_heap(&mut self.paired_queues, |a, b| comparator.lower_priority(a, b));
    }
}

impl Iterator for RasterTilePriorityQueue {
    type Item = Arc<Tile>;

    /// Emits the current top tile and advances past it.
    fn next(&mut self) -> Option<Self::Item> {
        let tile = self.top()?.clone();
        self.pop();
        Some(tile)
    }
}
