//! # Fibonacci-Word Clock Core
//!
//! A clock face rendered as a fractal tree of nested regions: the
//! tree's structure encodes the Fibonacci word, and each region's
//! rotation and opacity cycle at a period set by its depth, locked to
//! wall-clock time. This crate is the model and scheduler only; a
//! presentation layer turns the emitted plans into visible motion.
//!
//! ## Pipeline
//!
//! 1. **Tree**: lazily expand the Fibonacci-word tree down to the
//!    configured depth
//! 2. **Phase**: reduce the current wall time to per-depth cycle phases
//! 3. **Plan**: per node, a catch-up transition plus infinite periodic
//!    rotation/opacity schedules
//! 4. **Commit**: release the whole batch against one shared begin
//!    instant so every region stays phase-locked
//!
//! ## Usage Example
//!
//! ```
//! use fibclock::ClockCore;
//!
//! let mut core = ClockCore::with_defaults();
//! let planned = core.refresh()?;
//! assert_eq!(planned, 231); // Fibonacci row sums for the 10-entry table
//! # Ok::<(), fibclock::ClockError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod partition; // Depth → cycle-period configuration
pub mod phase; // Wall-clock phase arithmetic
pub mod planner; // Catch-up + periodic schedule construction
pub mod sync; // Batch commit, pause, resume
pub mod word; // Lazy Fibonacci-word tree

// Re-exports for convenience
pub use partition::{Partition, TimePartitionTable, TimeUnit};
pub use phase::{CyclePhase, PhaseCalculator, SystemClock, WallClock, WallTime};
pub use planner::{AnimationPlan, AnimationPlanner, OpacitySchedule, RotationSchedule};
pub use sync::{ManualTimebase, MonotonicTimebase, PlanSample, SyncController, Timebase};
pub use word::{FibonacciTree, IndexPath, Letter, NodeId};

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the clock core
///
/// All are local, recoverable conditions; the core has no fatal
/// states and never substitutes a default for a rejected input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// An index path addressed a child that does not exist
    #[error("no node at index path {path}")]
    NotFound {
        /// The offending path, rendered as selectors
        path: String,
    },

    /// A depth beyond the configured partition table
    #[error("depth {depth} exceeds partition table (max depth {max})")]
    InvalidDepth {
        /// Requested depth
        depth: usize,
        /// Deepest configured depth
        max: usize,
    },

    /// A malformed table entry, wall time, or index path
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Orchestrates tree, planner and controller behind one refresh call
///
/// One external trigger per second drives [`ClockCore::refresh`]; the
/// core reads the wall clock once, replans the whole materialized
/// tree against that snapshot, and commits the batch atomically.
#[derive(Debug)]
pub struct ClockCore {
    tree: FibonacciTree,
    planner: AnimationPlanner,
    controller: SyncController,
    wall_clock: Arc<dyn WallClock>,
}

impl ClockCore {
    /// Wire a core from its parts
    pub fn new(
        table: TimePartitionTable,
        wall_clock: Arc<dyn WallClock>,
        timebase: Arc<dyn Timebase>,
    ) -> Self {
        ClockCore {
            tree: FibonacciTree::new(),
            planner: AnimationPlanner::new(table),
            controller: SyncController::new(timebase),
            wall_clock,
        }
    }

    /// Reference table, system wall clock, live monotonic timebase
    pub fn with_defaults() -> Self {
        ClockCore::new(
            TimePartitionTable::default(),
            Arc::new(SystemClock),
            Arc::new(MonotonicTimebase::new()),
        )
    }

    /// Replan every node against a fresh wall-clock snapshot
    ///
    /// Returns the number of plans committed. Prior plans are
    /// replaced wholesale; the new batch shares one begin instant.
    pub fn refresh(&mut self) -> Result<usize, ClockError> {
        let now = self.wall_clock.now();
        let plans = self.planner.plan_all(&mut self.tree, now)?;
        let count = plans.len();
        self.controller.commit_batch(plans);
        debug!(%now, count, "refreshed clock plans");
        Ok(count)
    }

    /// Freeze all motion, preserving local elapsed times
    pub fn pause(&self) {
        self.controller.pause_all();
    }

    /// Continue all motion exactly where it was frozen
    pub fn resume(&self) {
        self.controller.resume_all();
    }

    /// The materialized Fibonacci-word tree
    pub fn tree(&self) -> &FibonacciTree {
        &self.tree
    }

    /// Mutable tree access for materializing further nodes
    pub fn tree_mut(&mut self) -> &mut FibonacciTree {
        &mut self.tree
    }

    /// The planner this core schedules with
    pub fn planner(&self) -> &AnimationPlanner {
        &self.planner
    }

    /// The controller holding the running plans
    pub fn controller(&self) -> &SyncController {
        &self.controller
    }
}
