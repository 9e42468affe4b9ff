//! Raster work dispatch loop.
//!
//! The priority queue decides *what* to rasterize next; this module owns
//! the loop that feeds those tiles to a painting backend: per-cycle tile
//! budgets (so one dispatch slice cannot monopolize the owner thread),
//! worker backpressure, and submission counters.
//!
//! A tile leaves the queue only after the worker accepts it, so
//! backpressure never loses work: the refused tile is still at the top of
//! the queue when the next cycle runs.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace};

use crate::queue::RasterTilePriorityQueue;
use crate::tile::{Tile, TileId};

/// Painting backend seam.
///
/// Implementations hand tiles to whatever actually rasterizes them (a
/// worker pool, a GPU upload path, a test recorder).
pub trait RasterWorker {
    /// Accepts one tile for painting.
    ///
    /// Returning [`SubmitError::Saturated`] applies backpressure: the
    /// dispatcher leaves the tile queued and ends the cycle.
    /// [`SubmitError::Shutdown`] is terminal for the worker.
    fn submit(&mut self, tile: Arc<Tile>) -> Result<(), SubmitError>;
}

/// Why a worker refused a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The worker cannot take more tiles right now; retry next cycle.
    #[error("raster worker is saturated")]
    Saturated,
    /// The worker has shut down and will never accept work again.
    #[error("raster worker has shut down")]
    Shutdown,
}

/// Errors from a dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The worker shut down mid-cycle. The named tile's submission failed
    /// and it is still at the top of the queue.
    #[error("raster worker shut down while submitting {tile}")]
    WorkerShutdown {
        /// The tile whose submission was refused.
        tile: TileId,
    },
}

/// Dispatch loop configuration.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum tiles submitted per cycle. Bounds the time one cooperative
    /// slice of the owner thread spends feeding the worker.
    pub max_tiles_per_cycle: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_tiles_per_cycle: 64,
        }
    }
}

/// How a dispatch cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The queue ran out of tiles.
    Drained,
    /// The per-cycle budget was spent; more tiles remain.
    BudgetExhausted,
    /// The worker refused further tiles this cycle; the refused tile is
    /// still at the top of the queue.
    Backpressure,
}

/// Counters accumulated across dispatch cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Tiles accepted by the worker.
    pub tiles_submitted: u64,
    /// Cycles run.
    pub cycles: u64,
    /// Cycles that ended in backpressure.
    pub backpressure_cycles: u64,
}

/// Drives tiles from a priority queue into a raster worker.
pub struct RasterDispatcher {
    config: DispatchConfig,
    stats: DispatchStats,
}

impl RasterDispatcher {
    /// Creates a dispatcher with the given configuration.
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            stats: DispatchStats::default(),
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Runs one dispatch cycle.
    ///
    /// Submits tiles in priority order until the queue drains, the cycle
    /// budget is spent, or the worker pushes back.
    pub fn dispatch_cycle(
        &mut self,
        queue: &mut RasterTilePriorityQueue,
        worker: &mut dyn RasterWorker,
    ) -> Result<CycleOutcome, DispatchError> {
        self.stats.cycles += 1;
        let mut submitted = 0;

        loop {
            if submitted >= self.config.max_tiles_per_cycle {
                debug!(submitted, "dispatch cycle budget exhausted");
                return Ok(CycleOutcome::BudgetExhausted);
            }

            let Some(tile) = queue.top() else {
                debug!(submitted, "raster queue drained");
                return Ok(CycleOutcome::Drained);
            };
            let tile = Arc::clone(tile);

            match worker.submit(Arc::clone(&tile)) {
                Ok(()) => {
                    queue.pop();
                    submitted += 1;
                    self.stats.tiles_submitted += 1;
                    trace!(tile = %tile.id(), "tile submitted for raster");
                }
                Err(SubmitError::Saturated) => {
                    self.stats.backpressure_cycles += 1;
                    debug!(submitted, tile = %tile.id(), "raster worker saturated");
                    return Ok(CycleOutcome::Backpressure);
                }
                Err(SubmitError::Shutdown) => {
                    return Err(DispatchError::WorkerShutdown { tile: tile.id() });
                }
            }
        }
    }
}
