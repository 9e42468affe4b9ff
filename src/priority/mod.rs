//! Tile priority model
//!
//! Defines the urgency vocabulary shared by the layer trees and the raster
//! queue: the global tree priority mode, per-tree priority records, and the
//! total order between records on a single tree.

mod types;

pub use types::{PriorityBin, TilePriority, TileResolution, TreePriority, WhichTree};
