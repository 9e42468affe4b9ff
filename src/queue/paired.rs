//! A layer pair's two raster queues merged into one tile emitter.

#[cfg(debug_assertions)]
use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::priority::{PriorityBin, TreePriority, WhichTree};
use crate::tile::Tile;
#[cfg(debug_assertions)]
use crate::tile::TileId;
use crate::tiling::{LayerPair, TilingSetRasterQueue};

use super::order::higher_priority_tree;

/// Merges one layer pair's active and pending raster queues.
///
/// When both layers are present the same shared tile can surface on both
/// sides, and the spiral traversal means the "wrong" side may surface it
/// first. This queue guarantees each tile is emitted at most once by
/// dropping the copy on whichever side the tree arbitration does not award
/// the tile to. After every mutation the selected side's top is safe to
/// emit: either non-shared, or a shared tile this side rightfully owns.
#[derive(Debug)]
pub struct PairedTilingSetQueue {
    active_queue: Option<Box<dyn TilingSetRasterQueue>>,
    pending_queue: Option<Box<dyn TilingSetRasterQueue>>,
    has_both_layers: bool,
    /// Tiles already emitted, for double-emission assertions.
    #[cfg(debug_assertions)]
    returned_tiles: HashSet<TileId>,
}

impl PairedTilingSetQueue {
    /// Builds the merged queue for one layer pair.
    ///
    /// Each present layer contributes a fresh raster queue; low-resolution
    /// tiles are requested first while smoothness takes priority.
    pub fn new(pair: &LayerPair, tree_priority: TreePriority) -> Self {
        let prioritize_low_res = tree_priority == TreePriority::SmoothnessTakesPriority;
        let mut queue = Self {
            active_queue: pair
                .active
                .as_ref()
                .map(|layer| layer.create_raster_queue(prioritize_low_res)),
            pending_queue: pair
                .pending
                .as_ref()
                .map(|layer| layer.create_raster_queue(prioritize_low_res)),
            has_both_layers: pair.active.is_some() && pair.pending.is_some(),
            #[cfg(debug_assertions)]
            returned_tiles: HashSet::new(),
        };

        if queue.has_both_layers {
            queue.skip_tiles_returned_by_twin(tree_priority);
        }

        trace!(state = ?queue.snapshot(), "paired tiling set queue built");
        queue
    }

    /// True when both sides are absent or exhausted.
    pub fn is_empty(&self) -> bool {
        self.active_queue.as_ref().map_or(true, |q| q.is_empty())
            && self.pending_queue.as_ref().map_or(true, |q| q.is_empty())
    }

    /// The tile the selected side would emit next, or `None` when empty.
    pub fn top(&self, tree_priority: TreePriority) -> Option<&Arc<Tile>> {
        if self.is_empty() {
            return None;
        }
        let next_tree = self.next_tile_iterator_tree(tree_priority);
        let tile = self.queue(next_tree)?.top()?;
        #[cfg(debug_assertions)]
        debug_assert!(
            !self.returned_tiles.contains(&tile.id()),
            "{} already emitted by this pair",
            tile.id()
        );
        Some(tile)
    }

    /// Advances past the current tile.
    ///
    /// Calling this on an empty pair is a programming error.
    pub fn pop(&mut self, tree_priority: TreePriority) {
        debug_assert!(!self.is_empty());
        let next_tree = self.next_tile_iterator_tree(tree_priority);

        #[cfg(debug_assertions)]
        {
            let id = self
                .queue(next_tree)
                .and_then(|q| q.top())
                .map(|tile| tile.id());
            if let Some(id) = id {
                let newly_recorded = self.returned_tiles.insert(id);
                debug_assert!(newly_recorded, "{} already emitted by this pair", id);
            }
        }

        if let Some(queue) = self.queue_mut(next_tree) {
            queue.pop();
        }

        if self.has_both_layers {
            self.skip_tiles_returned_by_twin(tree_priority);
        }

        // The next top must be queryable again right away.
        debug_assert!(self.is_empty() || self.top(tree_priority).is_some());
    }

    /// Which side emits next: the only side with tiles, or the tree
    /// arbitration winner when both sides have tiles.
    pub fn next_tile_iterator_tree(&self, tree_priority: TreePriority) -> WhichTree {
        debug_assert!(!self.is_empty());
        let active_top = self.active_queue.as_ref().and_then(|q| q.top());
        let pending_top = self.pending_queue.as_ref().and_then(|q| q.top());
        match (active_top, pending_top) {
            (Some(active), Some(pending)) => {
                higher_priority_tree(tree_priority, active, pending)
            }
            (Some(_), None) => WhichTree::Active,
            (None, _) => WhichTree::Pending,
        }
    }

    /// Captures the per-side top-of-queue state. Diagnostic only; never
    /// consulted for scheduling.
    pub fn snapshot(&self) -> PairedQueueSnapshot {
        PairedQueueSnapshot {
            active_queue: Self::side_snapshot(self.active_queue.as_deref()),
            pending_queue: Self::side_snapshot(self.pending_queue.as_deref()),
        }
    }

    /// Drops shared tiles whose emission belongs to the twin side.
    ///
    /// Runs until the selected side's top is safe: non-shared, or a shared
    /// tile the tree arbitration awards to that side. Each iteration
    /// consumes one tile, so the loop is bounded by the pair's tile count.
    fn skip_tiles_returned_by_twin(&mut self, tree_priority: TreePriority) {
        while !self.is_empty() {
            let next_tree = self.next_tile_iterator_tree(tree_priority);
            let Some(tile) = self.queue(next_tree).and_then(|q| q.top()) else {
                debug_assert!(false, "selected side of a non-empty pair has no tile");
                return;
            };

            // Non-shared tiles are always safe to emit.
            if !tile.is_shared() {
                return;
            }
            // A shared tile is safe when this side is the tree that owns
            // its emission.
            if next_tree == higher_priority_tree(tree_priority, tile, tile) {
                return;
            }

            trace!(tile = %tile.id(), tree = ?next_tree, "skipping shared tile owned by twin");
            if let Some(queue) = self.queue_mut(next_tree) {
                queue.pop();
            }
        }
    }

    fn queue(&self, tree: WhichTree) -> Option<&dyn TilingSetRasterQueue> {
        match tree {
            WhichTree::Active => self.active_queue.as_deref(),
            WhichTree::Pending => self.pending_queue.as_deref(),
        }
    }

    fn queue_mut(&mut self, tree: WhichTree) -> Option<&mut (dyn TilingSetRasterQueue + '_)> {
        match tree {
            WhichTree::Active => match &mut self.active_queue {
                Some(boxed) => Some(&mut **boxed),
                None => None,
            },
            WhichTree::Pending => match &mut self.pending_queue {
                Some(boxed) => Some(&mut **boxed),
                None => None,
            },
        }
    }

    fn side_snapshot(queue: Option<&dyn TilingSetRasterQueue>) -> QueueSideSnapshot {
        let top = queue.and_then(|q| q.top());
        QueueSideSnapshot {
            has_tile: top.is_some(),
            active_priority_bin: top
                .map_or(PriorityBin::Eventually, |t| t.priority(WhichTree::Active).bin),
            pending_priority_bin: top
                .map_or(PriorityBin::Eventually, |t| t.priority(WhichTree::Pending).bin),
        }
    }
}

/// Point-in-time view of one side of a paired queue.
#[derive(Debug, Clone, Serialize)]
pub struct QueueSideSnapshot {
    /// Whether this side currently has a tile to offer.
    pub has_tile: bool,
    /// Active-tree bin of this side's top tile (`Eventually` when none).
    pub active_priority_bin: PriorityBin,
    /// Pending-tree bin of this side's top tile (`Eventually` when none).
    pub pending_priority_bin: PriorityBin,
}

/// Point-in-time view of a paired queue, for tracing and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct PairedQueueSnapshot {
    /// State of the active-tree side.
    pub active_queue: QueueSideSnapshot,
    /// State of the pending-tree side.
    pub pending_queue: QueueSideSnapshot,
}
