//! Priority type definitions

use serde::Serialize;

/// Global scheduler mode choosing which layer tree's needs drive raster
/// ordering.
///
/// The mode is sampled once when a raster queue is built and stays fixed for
/// the lifetime of that build; changing it means building a new queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreePriority {
    /// Keep the on-screen (active) tree smooth; pending content waits.
    SmoothnessTakesPriority,
    /// Get freshly committed (pending) content ready as fast as possible.
    NewContentTakesPriority,
    /// Weigh both trees by comparing their tile priorities directly.
    SamePriorityForBothTrees,
}

/// Identifies one of the two layer trees.
///
/// The active tree is on screen; the pending tree is being prepared for
/// activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhichTree {
    Active,
    Pending,
}

/// Coarse urgency class for a tile.
///
/// The derived ordering puts the most urgent bin first, so `a < b` reads
/// "a is needed sooner than b".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PriorityBin {
    /// Needed for the current frame.
    Now,
    /// Expected to be needed within a few frames.
    Soon,
    /// Prepaint work with no deadline.
    Eventually,
}

/// Rendering scale class of a tile.
///
/// `NonIdeal` always sorts below the other two. Whether `High` or `Low`
/// wins between themselves depends on the tree priority mode and is decided
/// by the raster order comparator, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TileResolution {
    High,
    Low,
    NonIdeal,
}

/// Scheduling priority of a tile on one tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePriority {
    /// Urgency class.
    pub bin: PriorityBin,
    /// Rendering scale class.
    pub resolution: TileResolution,
    /// Distance in layer pixels from the tile to the visible rect; zero for
    /// visible tiles. Must not be NaN.
    pub distance_to_visible: f32,
}

impl TilePriority {
    /// Creates a priority record.
    ///
    /// A NaN distance is a programming error: it would break the strict
    /// weak ordering the raster queue's heap relies on.
    pub fn new(bin: PriorityBin, resolution: TileResolution, distance_to_visible: f32) -> Self {
        debug_assert!(
            !distance_to_visible.is_nan(),
            "distance_to_visible must not be NaN"
        );
        Self {
            bin,
            resolution,
            distance_to_visible,
        }
    }

    /// The least urgent priority possible.
    ///
    /// Used for the tree a tile is not referenced by, so that single-tree
    /// tiles naturally lose any comparison made on the other tree.
    pub fn lowest() -> Self {
        Self {
            bin: PriorityBin::Eventually,
            resolution: TileResolution::NonIdeal,
            distance_to_visible: f32::INFINITY,
        }
    }

    /// Returns true if `self` should be rasterized strictly before `other`.
    ///
    /// Ordering is by bin, then by distance to the visible rect. Resolution
    /// deliberately does not participate: the raster order comparator
    /// applies the mode-dependent resolution rules itself.
    #[inline]
    pub fn is_higher_priority_than(&self, other: &TilePriority) -> bool {
        self.bin < other.bin
            || (self.bin == other.bin
                && self.distance_to_visible < other.distance_to_visible)
    }
}

impl Default for TilePriority {
    fn default() -> Self {
        Self::lowest()
    }
}
