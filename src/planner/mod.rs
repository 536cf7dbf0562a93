//! Animation planning
//!
//! Turns a node's tree position and the current wall-clock phase into
//! a structured plan: a catch-up transition that brings the node to
//! its canonical cycle boundary, followed by infinite periodic motion
//! that stays phase-locked with the wall clock forever after.

mod schedule;

pub use schedule::{OpacitySchedule, RepeatingSegment, RotationSchedule, Segment};

use crate::partition::TimePartitionTable;
use crate::phase::{CyclePhase, PhaseCalculator, WallTime};
use crate::word::{FibonacciTree, IndexPath, Letter, NodeId};
use crate::ClockError;

/// Complete animation plan for one node
///
/// All offsets are seconds relative to the commit instant shared by
/// the whole batch. Rotation is absent for nodes whose parent is an
/// A-node (the sole child fills its parent's bounds, so only the
/// parent turns); opacity is absent at the deepest configured depth
/// (the finest unit stays fully visible).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnimationPlan {
    /// Address of the planned node
    pub path: IndexPath,
    /// Tree depth of the planned node
    pub depth: usize,
    /// Full cycle length at that depth, seconds
    pub period_seconds: u64,
    /// Seconds from commit until the current wall-clock cycle ends
    pub lead_in: f64,
    /// Rotation trajectory, when this node rotates
    pub rotation: Option<RotationSchedule>,
    /// Opacity trajectory, absent at the deepest depth
    pub opacity: Option<OpacitySchedule>,
}

impl AnimationPlan {
    /// Rotation angle in degrees at offset `t`, if this node rotates
    pub fn rotation_degrees_at(&self, t: f64) -> Option<f64> {
        self.rotation.as_ref().map(|r| r.degrees_at(t))
    }

    /// Opacity at offset `t`, if this node fades
    pub fn opacity_at(&self, t: f64) -> Option<f64> {
        self.opacity.as_ref().map(|o| o.value_at(t))
    }
}

/// Builds animation plans against a partition table
///
/// Stateless: a plan is a pure function of the node's tree position
/// and the wall-time snapshot passed in.
#[derive(Debug, Clone)]
pub struct AnimationPlanner {
    table: TimePartitionTable,
}

impl AnimationPlanner {
    /// Create a planner over a partition table
    pub fn new(table: TimePartitionTable) -> Self {
        AnimationPlanner { table }
    }

    /// The table this planner schedules against
    pub fn table(&self) -> &TimePartitionTable {
        &self.table
    }

    /// Plan one node as of `now`
    ///
    /// Fails with `InvalidDepth` when the node sits below the deepest
    /// configured partition.
    pub fn plan(
        &self,
        tree: &FibonacciTree,
        node: NodeId,
        now: WallTime,
    ) -> Result<AnimationPlan, ClockError> {
        let depth = tree.depth(node);
        let phase = PhaseCalculator::new(&self.table).phase(depth, now)?;
        let lead_in = (1.0 - phase.fraction) * phase.period_seconds as f64;

        let rotation = if tree.parent_letter(node) == Some(Letter::A) {
            // The sole child of an A-node rides its parent's rotation.
            None
        } else {
            Some(rotation_schedule(&phase, lead_in))
        };

        let opacity = if depth == self.table.max_depth() {
            None
        } else {
            Some(opacity_schedule(&phase, lead_in))
        };

        Ok(AnimationPlan {
            path: tree.path(node).clone(),
            depth,
            period_seconds: phase.period_seconds,
            lead_in,
            rotation,
            opacity,
        })
    }

    /// Plan every node of the materialized working tree as of `now`
    ///
    /// Walks each depth the table configures, materializing rows as
    /// needed, all against the single `now` snapshot so sibling and
    /// ancestor phases agree.
    pub fn plan_all(
        &self,
        tree: &mut FibonacciTree,
        now: WallTime,
    ) -> Result<Vec<AnimationPlan>, ClockError> {
        let root = tree.root();
        let mut plans = Vec::new();
        for depth in 0..=self.table.max_depth() {
            for node in tree.nodes_at_depth(root, depth) {
                plans.push(self.plan(tree, node, now)?);
            }
        }
        Ok(plans)
    }
}

/// Catch-up turn to 360°, then 90° per quarter period forever
fn rotation_schedule(phase: &CyclePhase, lead_in: f64) -> RotationSchedule {
    let period = phase.period_seconds as f64;
    RotationSchedule {
        catch_up: Segment {
            start: 0.0,
            duration: lead_in,
            from: phase.fraction * 360.0,
            to: 360.0,
        },
        spin: RepeatingSegment {
            start: lead_in,
            duration: 0.25 * period,
            from: 0.0,
            to: 90.0,
            autoreverse: false,
            cumulative: true,
        },
    }
}

/// Splice a mid-cycle start onto the triangle opacity wave
///
/// The wave is 0 at cycle boundaries and 1 at midpoints. Starting at
/// `phase` we may need a one-time fade-in (first half of the cycle),
/// always need a fade-out ending exactly at the cycle boundary, and
/// from that boundary on the plain autoreversing wave takes over.
/// The three pieces meet with no discontinuity.
fn opacity_schedule(phase: &CyclePhase, lead_in: f64) -> OpacitySchedule {
    let period = phase.period_seconds as f64;
    let half = 0.5 * period;

    let (fade_in, fade_out) = if phase.fraction < 0.5 {
        let fade_in = Segment {
            start: 0.0,
            duration: (0.5 - phase.fraction) * period,
            from: phase.fraction * 2.0,
            to: 1.0,
        };
        let fade_out = Segment {
            start: fade_in.duration,
            duration: half,
            from: 1.0,
            to: 0.0,
        };
        (Some(fade_in), fade_out)
    } else {
        // Already past the midpoint: descend straight to the boundary.
        let fade_out = Segment {
            start: 0.0,
            duration: lead_in,
            from: (1.0 - phase.fraction) * 2.0,
            to: 0.0,
        };
        (None, fade_out)
    };

    OpacitySchedule {
        fade_in,
        fade_out,
        breathing: RepeatingSegment {
            start: lead_in,
            duration: half,
            from: 0.0,
            to: 1.0,
            autoreverse: true,
            cumulative: false,
        },
    }
}
