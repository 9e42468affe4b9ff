//! Tiling-set iterator contract and ready-made implementations.
//!
//! A layer enumerates its rasterizable tiles through a
//! [`TilingSetRasterQueue`], one per tree, created fresh for every build of
//! the raster priority queue. The enumeration is only semi-ordered: a real
//! compositor walks tilings with spiral iterators that fan out from the
//! viewport, so a tile shared by both trees of a pair is *usually* but not
//! *always* surfaced by its higher-priority side first. The paired queue in
//! [`crate::queue`] compensates; nothing here needs to.

mod static_queue;

pub use static_queue::{StaticLayer, StaticTilingSetQueue};

use std::sync::Arc;

use crate::tile::Tile;

/// Iterator over the rasterizable tiles of one layer on one tree.
///
/// This is the seam between the raster queue core and whatever tiling data
/// a layer implementation keeps. Implementations decide the traversal
/// order; the core only requires that each tile is surfaced once.
pub trait TilingSetRasterQueue: std::fmt::Debug {
    /// Returns true when no tiles remain.
    fn is_empty(&self) -> bool;

    /// Returns the current tile, or `None` when exhausted.
    fn top(&self) -> Option<&Arc<Tile>>;

    /// Advances past the current tile.
    ///
    /// Calling this on an exhausted queue is a programming error;
    /// implementations may ignore it.
    fn pop(&mut self);
}

/// A layer that can enumerate its rasterizable tiles for one tree.
pub trait RasterQueueLayer {
    /// Creates a fresh raster queue over this layer's tiles.
    ///
    /// When `prioritize_low_res` is set the layer enumerates low-resolution
    /// tiles ahead of the others. This is requested while smoothness takes
    /// priority, where cheap low-res content beats checkerboarding.
    fn create_raster_queue(&self, prioritize_low_res: bool) -> Box<dyn TilingSetRasterQueue>;
}

/// An (active, pending) layer couple under one logical layer identity.
///
/// Either side may be absent: a layer freshly committed to the pending tree
/// has no active twin yet, and a layer about to be removed has no pending
/// twin anymore.
#[derive(Clone, Default)]
pub struct LayerPair {
    /// The on-screen layer, if any.
    pub active: Option<Arc<dyn RasterQueueLayer>>,
    /// The layer being prepared for activation, if any.
    pub pending: Option<Arc<dyn RasterQueueLayer>>,
}

impl LayerPair {
    /// Creates a pair from the two optional sides.
    pub fn new(
        active: Option<Arc<dyn RasterQueueLayer>>,
        pending: Option<Arc<dyn RasterQueueLayer>>,
    ) -> Self {
        Self { active, pending }
    }
}
