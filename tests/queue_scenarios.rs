//! Integration tests for the raster tile priority queue.
//!
//! Each test pins down one end-to-end scheduling behavior across layer
//! pairs: merge order, tree arbitration, shared-tile deduplication, and
//! the resolution rules.
//!
//! Run with: `cargo test --test queue_scenarios`

use std::sync::Arc;

use rasterq::priority::{PriorityBin, TilePriority, TileResolution, TreePriority, WhichTree};
use rasterq::queue::RasterTilePriorityQueue;
use rasterq::tile::{Tile, TileId};
use rasterq::tiling::{LayerPair, RasterQueueLayer, StaticLayer};

fn pri(bin: PriorityBin, resolution: TileResolution, distance: f32) -> TilePriority {
    TilePriority::new(bin, resolution, distance)
}

fn layer(tree: WhichTree, tiles: Vec<Arc<Tile>>) -> Arc<dyn RasterQueueLayer> {
    Arc::new(StaticLayer::new(tree, tiles))
}

fn active_pair(tiles: Vec<Arc<Tile>>) -> LayerPair {
    LayerPair::new(Some(layer(WhichTree::Active, tiles)), None)
}

fn drain(queue: &mut RasterTilePriorityQueue) -> Vec<TileId> {
    let mut emitted = Vec::new();
    while let Some(tile) = queue.top() {
        emitted.push(tile.id());
        queue.pop();
    }
    emitted
}

#[test]
fn test_single_active_pair_emits_iterator_order() {
    let tiles: Vec<Arc<Tile>> = [1.0, 2.0, 3.0]
        .iter()
        .map(|&distance| {
            Arc::new(Tile::with_active(pri(
                PriorityBin::Now,
                TileResolution::High,
                distance,
            )))
        })
        .collect();
    let ids: Vec<_> = tiles.iter().map(|t| t.id()).collect();

    let mut queue = RasterTilePriorityQueue::build(
        &[active_pair(tiles)],
        TreePriority::SamePriorityForBothTrees,
    );

    assert_eq!(drain(&mut queue), ids);
    assert!(queue.is_empty());
    assert!(queue.top().is_none());
}

#[test]
fn test_smoothness_promotes_pending_now_within_a_pair() {
    // The active tree is down to eventually work while the pending tree
    // has a NOW tile: the pair must emit from the pending iterator first.
    let active_tile = Arc::new(Tile::with_active(pri(
        PriorityBin::Eventually,
        TileResolution::High,
        1.0,
    )));
    let pending_tile = Arc::new(Tile::with_pending(pri(
        PriorityBin::Now,
        TileResolution::High,
        1.0,
    )));

    let pair = LayerPair::new(
        Some(layer(WhichTree::Active, vec![Arc::clone(&active_tile)])),
        Some(layer(WhichTree::Pending, vec![Arc::clone(&pending_tile)])),
    );
    let mut queue =
        RasterTilePriorityQueue::build(&[pair], TreePriority::SmoothnessTakesPriority);

    assert_eq!(drain(&mut queue), vec![pending_tile.id(), active_tile.id()]);
}

#[test]
fn test_smoothness_pending_now_pair_outranks_eventually_pair() {
    // Pair 1 is down to eventually work on the active tree but has a NOW
    // tile pending; pair 2 only has eventually work (and sits closer to
    // the viewport). The pending-NOW pair must still come back first.
    let p1_pending = Arc::new(Tile::with_pending(pri(
        PriorityBin::Now,
        TileResolution::High,
        0.0,
    )));
    let p1_active = Arc::new(Tile::with_active(pri(
        PriorityBin::Eventually,
        TileResolution::High,
        5.0,
    )));
    let p2_active = Arc::new(Tile::with_active(pri(
        PriorityBin::Eventually,
        TileResolution::High,
        0.0,
    )));

    let pairs = [
        LayerPair::new(
            Some(layer(WhichTree::Active, vec![Arc::clone(&p1_active)])),
            Some(layer(WhichTree::Pending, vec![Arc::clone(&p1_pending)])),
        ),
        active_pair(vec![Arc::clone(&p2_active)]),
    ];
    let mut queue =
        RasterTilePriorityQueue::build(&pairs, TreePriority::SmoothnessTakesPriority);

    assert_eq!(
        drain(&mut queue),
        vec![p1_pending.id(), p2_active.id(), p1_active.id()]
    );
}

#[test]
fn test_shared_tile_is_emitted_once() {
    // Shared tile X tops both iterators of the pair. The active side wins
    // the arbitration on distance, so the pending copy must be skipped
    // and the pending iterator left parked past X.
    let x = Arc::new(
        Tile::new(
            pri(PriorityBin::Now, TileResolution::High, 1.0),
            pri(PriorityBin::Now, TileResolution::High, 2.0),
        )
        .shared(),
    );
    let y = Arc::new(Tile::with_pending(pri(
        PriorityBin::Soon,
        TileResolution::High,
        3.0,
    )));

    let pair = LayerPair::new(
        Some(layer(WhichTree::Active, vec![Arc::clone(&x)])),
        Some(layer(
            WhichTree::Pending,
            vec![Arc::clone(&x), Arc::clone(&y)],
        )),
    );
    let mut queue =
        RasterTilePriorityQueue::build(&[pair], TreePriority::SamePriorityForBothTrees);

    assert_eq!(queue.top().map(|t| t.id()), Some(x.id()));
    queue.pop();
    assert_eq!(drain(&mut queue), vec![y.id()]);
}

#[test]
fn test_smoothness_emits_low_resolution_first() {
    let low = Arc::new(Tile::with_active(pri(
        PriorityBin::Soon,
        TileResolution::Low,
        5.0,
    )));
    let high = Arc::new(Tile::with_active(pri(
        PriorityBin::Soon,
        TileResolution::High,
        1.0,
    )));

    let pairs = [
        active_pair(vec![Arc::clone(&high)]),
        active_pair(vec![Arc::clone(&low)]),
    ];
    let mut queue =
        RasterTilePriorityQueue::build(&pairs, TreePriority::SmoothnessTakesPriority);

    assert_eq!(drain(&mut queue), vec![low.id(), high.id()]);
}

#[test]
fn test_non_ideal_resolution_loses_under_every_mode() {
    for tree_priority in [
        TreePriority::SmoothnessTakesPriority,
        TreePriority::NewContentTakesPriority,
        TreePriority::SamePriorityForBothTrees,
    ] {
        // Identical records on both trees, so the combined priority is the
        // same whichever tree the mode selects.
        let non_ideal_priority = pri(PriorityBin::Now, TileResolution::NonIdeal, 0.1);
        let non_ideal = Arc::new(Tile::new(non_ideal_priority, non_ideal_priority));
        let high_priority = pri(PriorityBin::Now, TileResolution::High, 100.0);
        let high = Arc::new(Tile::new(high_priority, high_priority));

        let pairs = [
            active_pair(vec![Arc::clone(&non_ideal)]),
            active_pair(vec![Arc::clone(&high)]),
        ];
        let mut queue = RasterTilePriorityQueue::build(&pairs, tree_priority);

        assert_eq!(
            drain(&mut queue),
            vec![high.id(), non_ideal.id()],
            "high resolution must win under {:?}",
            tree_priority
        );
    }
}

#[test]
fn test_empty_pair_never_surfaces() {
    let p1_tiles: Vec<Arc<Tile>> = [1.0, 3.0]
        .iter()
        .map(|&d| Arc::new(Tile::with_active(pri(PriorityBin::Now, TileResolution::High, d))))
        .collect();
    let p3_tiles: Vec<Arc<Tile>> = [2.0, 4.0]
        .iter()
        .map(|&d| Arc::new(Tile::with_active(pri(PriorityBin::Now, TileResolution::High, d))))
        .collect();
    let expected = vec![
        p1_tiles[0].id(),
        p3_tiles[0].id(),
        p1_tiles[1].id(),
        p3_tiles[1].id(),
    ];

    // The middle pair has a layer but no tiles at build time.
    let pairs = [
        active_pair(p1_tiles),
        active_pair(Vec::new()),
        active_pair(p3_tiles),
    ];
    let mut queue =
        RasterTilePriorityQueue::build(&pairs, TreePriority::SamePriorityForBothTrees);

    let mut emitted = Vec::new();
    while !queue.is_empty() {
        let tile = queue.top().expect("non-empty queue must have a top");
        emitted.push(tile.id());
        queue.pop();
    }
    assert_eq!(emitted, expected);
    assert!(queue.top().is_none());
}
