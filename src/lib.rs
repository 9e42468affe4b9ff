//! Raster tile scheduling for a tiled compositor.
//!
//! A compositor keeps two layer trees: the active tree is on screen while
//! the pending tree is prepared for activation. Each logical layer pairs an
//! active and a pending layer, and each side enumerates its rasterizable
//! tiles through an iterator. This crate merges all of those iterators into
//! one global priority order, deduplicating tiles shared between the two
//! trees of a pair, so raster workers can repeatedly take the single most
//! urgent tile and paint it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rasterq::priority::{PriorityBin, TilePriority, TileResolution, TreePriority, WhichTree};
//! use rasterq::queue::RasterTilePriorityQueue;
//! use rasterq::tile::Tile;
//! use rasterq::tiling::{LayerPair, RasterQueueLayer, StaticLayer};
//!
//! let tile = Arc::new(Tile::with_active(TilePriority::new(
//!     PriorityBin::Now,
//!     TileResolution::High,
//!     0.0,
//! )));
//! let layer: Arc<dyn RasterQueueLayer> =
//!     Arc::new(StaticLayer::new(WhichTree::Active, vec![tile]));
//! let pairs = [LayerPair::new(Some(layer), None)];
//!
//! let mut queue =
//!     RasterTilePriorityQueue::build(&pairs, TreePriority::SamePriorityForBothTrees);
//! while let Some(tile) = queue.top() {
//!     let tile = Arc::clone(tile);
//!     queue.pop();
//!     // hand `tile` to a raster worker
//!     drop(tile);
//! }
//! ```

pub mod dispatch;
pub mod logging;
pub mod priority;
pub mod queue;
pub mod tile;
pub mod tiling;

/// Version of the rasterq library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
