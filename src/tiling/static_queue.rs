//! Vector-backed tiling-set queue for fixed tile enumerations.
//!
//! Real compositors enumerate tiles by walking tiling data with spiral
//! iterators; this implementation serves embedders and tests that already
//! know the enumeration order. It still honors the `prioritize_low_res`
//! construction flag the same way a tiling-backed layer would: by
//! enumerating low-resolution tiles first.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::priority::{TileResolution, WhichTree};
use crate::tile::Tile;

use super::{RasterQueueLayer, TilingSetRasterQueue};

/// A layer whose rasterizable tiles are a fixed, pre-ordered list.
pub struct StaticLayer {
    /// Which tree this layer lives on. Decides which of a tile's two
    /// priority records describes it from this layer's point of view.
    tree: WhichTree,
    tiles: Vec<Arc<Tile>>,
}

impl StaticLayer {
    /// Creates a layer that enumerates `tiles` in the given order.
    pub fn new(tree: WhichTree, tiles: Vec<Arc<Tile>>) -> Self {
        Self { tree, tiles }
    }
}

impl RasterQueueLayer for StaticLayer {
    fn create_raster_queue(&self, prioritize_low_res: bool) -> Box<dyn TilingSetRasterQueue> {
        let tiles: Vec<Arc<Tile>> = if prioritize_low_res {
            // Stable partition: low-res tiles first, relative order
            // preserved within each class.
            let (low, rest): (Vec<_>, Vec<_>) =
                self.tiles.iter().cloned().partition(|tile| {
                    tile.priority(self.tree).resolution == TileResolution::Low
                });
            low.into_iter().chain(rest).collect()
        } else {
            self.tiles.clone()
        };
        Box::new(StaticTilingSetQueue::new(tiles))
    }
}

/// Raster queue over a fixed tile list.
#[derive(Debug)]
pub struct StaticTilingSetQueue {
    tiles: VecDeque<Arc<Tile>>,
}

impl StaticTilingSetQueue {
    /// Creates a queue that yields `tiles` front to back.
    pub fn new(tiles: Vec<Arc<Tile>>) -> Self {
        Self {
            tiles: tiles.into(),
        }
    }
}

impl TilingSetRasterQueue for StaticTilingSetQueue {
    fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn top(&self) -> Option<&Arc<Tile>> {
        self.tiles.front()
    }

    fn pop(&mut self) {
        self.tiles.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::{PriorityBin, TilePriority};

    fn tile(resolution: TileResolution, distance: f32) -> Arc<Tile> {
        Arc::new(Tile::with_active(TilePriority::new(
            PriorityBin::Now,
            resolution,
            distance,
        )))
    }

    #[test]
    fn test_queue_yields_tiles_in_order() {
        let tiles = vec![
            tile(TileResolution::High, 1.0),
            tile(TileResolution::High, 2.0),
        ];
        let ids: Vec<_> = tiles.iter().map(|t| t.id()).collect();
        let mut queue = StaticTilingSetQueue::new(tiles);

        assert!(!queue.is_empty());
        assert_eq!(queue.top().map(|t| t.id()), Some(ids[0]));
        queue.pop();
        assert_eq!(queue.top().map(|t| t.id()), Some(ids[1]));
        queue.pop();
        assert!(queue.is_empty());
        assert!(queue.top().is_none());
    }

    #[test]
    fn test_layer_preserves_order_without_low_res_flag() {
        let tiles = vec![
            tile(TileResolution::High, 1.0),
            tile(TileResolution::Low, 2.0),
            tile(TileResolution::High, 3.0),
        ];
        let ids: Vec<_> = tiles.iter().map(|t| t.id()).collect();
        let layer = StaticLayer::new(WhichTree::Active, tiles);

        let mut queue = layer.create_raster_queue(false);
        let mut seen = Vec::new();
        while let Some(t) = queue.top() {
            seen.push(t.id());
            queue.pop();
        }
        assert_eq!(seen, ids);
    }

    #[test]
    fn test_layer_enumerates_low_res_first_when_asked() {
        let tiles = vec![
            tile(TileResolution::High, 1.0),
            tile(TileResolution::Low, 2.0),
            tile(TileResolution::High, 3.0),
            tile(TileResolution::Low, 4.0),
        ];
        let ids: Vec<_> = tiles.iter().map(|t| t.id()).collect();
        let layer = StaticLayer::new(WhichTree::Active, tiles);

        let mut queue = layer.create_raster_queue(true);
        let mut seen = Vec::new();
        while let Some(t) = queue.top() {
            seen.push(t.id());
            queue.pop();
        }
        // Low-res tiles first, original order kept within each class.
        assert_eq!(seen, vec![ids[1], ids[3], ids[0], ids[2]]);
    }

    #[test]
    fn test_layer_partitions_by_its_own_tree() {
        // The tile is low-res on the pending tree only; an active-tree
        // layer must not move it forward.
        let mixed = Arc::new(Tile::new(
            TilePriority::new(PriorityBin::Now, TileResolution::High, 1.0),
            TilePriority::new(PriorityBin::Now, TileResolution::Low, 1.0),
        ));
        let low_on_active = tile(TileResolution::Low, 2.0);
        let ids = [mixed.id(), low_on_active.id()];

        let layer = StaticLayer::new(WhichTree::Active, vec![mixed, low_on_active]);
        let queue = layer.create_raster_queue(true);
        assert_eq!(queue.top().map(|t| t.id()), Some(ids[1]));
    }

    #[test]
    fn test_pop_on_empty_queue_is_ignored() {
        let mut queue = StaticTilingSetQueue::new(Vec::new());
        queue.pop();
        assert!(queue.is_empty());
    }
}
