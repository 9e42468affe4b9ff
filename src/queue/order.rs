//! Raster ordering: tree arbitration and the pair comparator.

use crate::priority::{PriorityBin, TileResolution, TreePriority, WhichTree};
use crate::tile::Tile;

use super::paired::PairedTilingSetQueue;

/// Decides which tree should emit next, given the candidate tile on each
/// side.
///
/// For a shared tile the caller passes the same tile for both sides, asking
/// which tree rightfully owns its emission. Pure and total.
pub(crate) fn higher_priority_tree(
    tree_priority: TreePriority,
    active_tile: &Tile,
    pending_tile: &Tile,
) -> WhichTree {
    match tree_priority {
        TreePriority::SmoothnessTakesPriority => {
            let active = active_tile.priority(WhichTree::Active);
            let pending = pending_tile.priority(WhichTree::Pending);
            // Once the active tree is down to eventually-bin tiles, let the
            // pending tree run so tiles required for activation can be
            // initialized while the memory policy only allows prepaint.
            if active.bin == PriorityBin::Eventually && pending.bin == PriorityBin::Now {
                WhichTree::Pending
            } else {
                WhichTree::Active
            }
        }
        TreePriority::NewContentTakesPriority => WhichTree::Pending,
        TreePriority::SamePriorityForBothTrees => {
            let active = active_tile.priority(WhichTree::Active);
            let pending = pending_tile.priority(WhichTree::Pending);
            if active.is_higher_priority_than(&pending) {
                WhichTree::Active
            } else {
                WhichTree::Pending
            }
        }
    }
}

/// Strict weak "lower raster priority" ordering over paired queues.
///
/// Drives the max-heap of pairs: `lower_priority(a, b)` returns true if and
/// only if `a` should be scheduled strictly after `b`. Empty pairs sort
/// below everything, so an empty heap root means every pair is drained.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RasterOrderComparator {
    tree_priority: TreePriority,
}

impl RasterOrderComparator {
    pub(crate) fn new(tree_priority: TreePriority) -> Self {
        Self { tree_priority }
    }

    pub(crate) fn lower_priority(
        &self,
        a: &PairedTilingSetQueue,
        b: &PairedTilingSetQueue,
    ) -> bool {
        // Empty pairs are the lowest; two empty pairs are equivalent.
        if a.is_empty() || b.is_empty() {
            return a.is_empty() && !b.is_empty();
        }

        let (a_tile, b_tile) = match (a.top(self.tree_priority), b.top(self.tree_priority)) {
            (Some(a_tile), Some(b_tile)) => (a_tile, b_tile),
            // Unreachable for non-empty pairs; treat as equivalent.
            _ => return false,
        };

        let a_priority = a_tile.priority_for_tree_priority(self.tree_priority);
        let b_priority = b_tile.priority_for_tree_priority(self.tree_priority);
        let prioritize_low_res = self.tree_priority == TreePriority::SmoothnessTakesPriority;

        // In smoothness mode, pending NOW tiles must come back before
        // active EVENTUALLY tiles: when both sides are down to eventually
        // work, consult the pending-tree bins directly. Exactly one side
        // being pending-now decides; otherwise fall through.
        if prioritize_low_res
            && a_priority.bin == PriorityBin::Eventually
            && b_priority.bin == PriorityBin::Eventually
        {
            let a_is_pending_now =
                a_tile.priority(WhichTree::Pending).bin == PriorityBin::Now;
            let b_is_pending_now =
                b_tile.priority(WhichTree::Pending).bin == PriorityBin::Now;
            if a_is_pending_now != b_is_pending_now {
                return b_is_pending_now;
            }
        }

        // Same bin but different resolution: non-ideal always loses, and
        // the mode decides whether low or high resolution renders first.
        if a_priority.bin == b_priority.bin && a_priority.resolution != b_priority.resolution {
            if a_priority.resolution == TileResolution::NonIdeal {
                return true;
            }
            if b_priority.resolution == TileResolution::NonIdeal {
                return false;
            }
            return if prioritize_low_res {
                b_priority.resolution == TileResolution::Low
            } else {
                b_priority.resolution == TileResolution::High
            };
        }

        b_priority.is_higher_priority_than(&a_priority)
    }
}
