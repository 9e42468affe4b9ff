//! Tile model for raster scheduling.
//!
//! A tile is a unit of rasterization work covering a rectangular region of
//! a layer at some resolution. The raster queue treats tiles as read-only:
//! priorities are stamped onto a tile by the layer trees before a queue is
//! built, and a single tile may be referenced by both trees of a layer pair
//! at once (a "shared" tile). Shared tiles are the reason tiles are handed
//! around as `Arc<Tile>`: the active and pending iterators of one pair can
//! both surface the same allocation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::priority::{TilePriority, TreePriority, WhichTree};

/// Identity of a tile within the process.
///
/// Two queue handles refer to the same tile exactly when their IDs are
/// equal. The paired queue's double-emission assertions key on this, and
/// log lines use it to name tiles. IDs exist only as a by-product of
/// creating a [`Tile`] and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// A unit of rasterization work.
///
/// Carries one priority record per tree. A tile referenced by only one tree
/// holds [`TilePriority::lowest`] for the other, so comparisons made on
/// that tree naturally lose.
#[derive(Debug)]
pub struct Tile {
    id: TileId,
    active_priority: TilePriority,
    pending_priority: TilePriority,
    shared: bool,
}

impl Tile {
    /// Creates a tile with the given per-tree priorities.
    pub fn new(active_priority: TilePriority, pending_priority: TilePriority) -> Self {
        // The only place tiles are born, so identity assignment lives
        // here rather than on TileId.
        static NEXT_TILE_ID: AtomicU64 = AtomicU64::new(1);
        Self {
            id: TileId(NEXT_TILE_ID.fetch_add(1, Ordering::Relaxed)),
            active_priority,
            pending_priority,
            shared: false,
        }
    }

    /// Creates a tile referenced only by the active tree.
    pub fn with_active(priority: TilePriority) -> Self {
        Self::new(priority, TilePriority::lowest())
    }

    /// Creates a tile referenced only by the pending tree.
    pub fn with_pending(priority: TilePriority) -> Self {
        Self::new(TilePriority::lowest(), priority)
    }

    /// Marks the tile as referenced by both trees of its layer pair.
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    /// Returns this tile's identity.
    #[inline]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// True when both trees of the owning pair reference this tile.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Returns the tile's priority on the given tree.
    #[inline]
    pub fn priority(&self, tree: WhichTree) -> TilePriority {
        match tree {
            WhichTree::Active => self.active_priority,
            WhichTree::Pending => self.pending_priority,
        }
    }

    /// Returns the priority record that drives scheduling under the given
    /// mode: the pending tree's record when new content takes priority, the
    /// active tree's record otherwise.
    #[inline]
    pub fn priority_for_tree_priority(&self, tree_priority: TreePriority) -> TilePriority {
        match tree_priority {
            TreePriority::NewContentTakesPriority => self.pending_priority,
            TreePriority::SmoothnessTakesPriority
            | TreePriority::SamePriorityForBothTrees => self.active_priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::{PriorityBin, TileResolution};

    fn priority(bin: PriorityBin, distance: f32) -> TilePriority {
        TilePriority::new(bin, TileResolution::High, distance)
    }

    #[test]
    fn test_every_tile_gets_its_own_identity() {
        let p = priority(PriorityBin::Now, 0.0);
        let a = Tile::new(p, p);
        let b = Tile::new(p, p);
        let c = Tile::with_active(p);

        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_tile_id_display() {
        let id = TileId(42);
        assert_eq!(format!("{}", id), "tile#42");
    }

    #[test]
    fn test_per_tree_priorities() {
        let active = priority(PriorityBin::Now, 1.0);
        let pending = priority(PriorityBin::Soon, 2.0);
        let tile = Tile::new(active, pending);

        assert_eq!(tile.priority(WhichTree::Active), active);
        assert_eq!(tile.priority(WhichTree::Pending), pending);
        assert!(!tile.is_shared());
    }

    #[test]
    fn test_single_tree_tiles_hold_lowest_on_the_other() {
        let p = priority(PriorityBin::Now, 0.0);

        let active_only = Tile::with_active(p);
        assert_eq!(active_only.priority(WhichTree::Pending), TilePriority::lowest());

        let pending_only = Tile::with_pending(p);
        assert_eq!(pending_only.priority(WhichTree::Active), TilePriority::lowest());
    }

    #[test]
    fn test_shared_builder() {
        let tile = Tile::new(priority(PriorityBin::Now, 0.0), priority(PriorityBin::Now, 0.0))
            .shared();
        assert!(tile.is_shared());
    }

    #[test]
    fn test_priority_for_tree_priority_selects_per_mode() {
        let active = priority(PriorityBin::Now, 1.0);
        let pending = priority(PriorityBin::Soon, 2.0);
        let tile = Tile::new(active, pending);

        assert_eq!(
            tile.priority_for_tree_priority(TreePriority::SmoothnessTakesPriority),
            active
        );
        assert_eq!(
            tile.priority_for_tree_priority(TreePriority::SamePriorityForBothTrees),
            active
        );
        assert_eq!(
            tile.priority_for_tree_priority(TreePriority::NewContentTakesPriority),
            pending
        );
    }
}
