//! Batch commit and pause/resume of running plans
//!
//! Planning a few hundred nodes takes nonzero time; if each plan
//! started its local clock when it was built, siblings would drift
//! apart by the per-node compute cost. The controller instead holds
//! every freshly installed plan suspended and releases the whole
//! batch against one shared begin instant, read once. Pause and
//! resume preserve each plan's local elapsed time exactly, so a
//! pause/resume round trip is invisible.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::debug;

use crate::planner::AnimationPlan;
use crate::word::IndexPath;

/// Monotonic media-clock, seconds
///
/// The controller never touches the wall clock; it only needs a
/// steadily advancing timeline to anchor begin instants on. Tests
/// inject a manual timebase to make pause/resume arithmetic exact.
pub trait Timebase: Send + Sync {
    /// Current offset on the monotonic timeline, seconds
    fn now(&self) -> f64;
}

/// Live timebase backed by `std::time::Instant`
#[derive(Debug)]
pub struct MonotonicTimebase {
    origin: Instant,
}

impl MonotonicTimebase {
    /// Timebase starting at zero now
    pub fn new() -> Self {
        MonotonicTimebase {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTimebase {
    fn default() -> Self {
        MonotonicTimebase::new()
    }
}

impl Timebase for MonotonicTimebase {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-advanced timebase for deterministic replay and tests
#[derive(Debug, Default)]
pub struct ManualTimebase {
    now: Mutex<f64>,
}

impl ManualTimebase {
    /// Timebase frozen at zero
    pub fn new() -> Self {
        ManualTimebase::default()
    }

    /// Advance the timeline by `seconds`
    pub fn advance(&self, seconds: f64) {
        *self.now.lock().expect("timebase lock poisoned") += seconds;
    }
}

impl Timebase for ManualTimebase {
    fn now(&self) -> f64 {
        *self.now.lock().expect("timebase lock poisoned")
    }
}

/// Run state of one installed plan
#[derive(Debug, Clone, Copy, PartialEq)]
enum RunState {
    /// Installed but not yet released
    Suspended,
    /// Running since `begin` on the shared timeline
    Running { begin: f64 },
    /// Frozen with `elapsed` seconds on its local clock
    Paused { elapsed: f64 },
}

#[derive(Debug)]
struct PlanState {
    plan: AnimationPlan,
    run: RunState,
}

/// Snapshot of one node's animated values at an instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSample {
    /// Seconds on the node's local animation clock
    pub local_time: f64,
    /// Rotation in degrees, when the node rotates
    pub rotation_degrees: Option<f64>,
    /// Opacity in `[0, 1]`, when the node fades
    pub opacity: Option<f64>,
}

/// Holds and releases plan batches atomically
///
/// The single mutex is the serialization point the concurrency model
/// requires: a resume can never interleave with a fresh commit, and
/// the presentation layer always observes a consistent run-state map.
pub struct SyncController {
    timebase: Arc<dyn Timebase>,
    states: Mutex<HashMap<IndexPath, PlanState>>,
}

impl std::fmt::Debug for SyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let states = self.states.lock().expect("controller lock poisoned");
        f.debug_struct("SyncController")
            .field("plans", &states.len())
            .finish()
    }
}

impl SyncController {
    /// Controller over the given timebase
    pub fn new(timebase: Arc<dyn Timebase>) -> Self {
        SyncController {
            timebase,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Controller over a live monotonic timebase
    pub fn with_monotonic_timebase() -> Self {
        SyncController::new(Arc::new(MonotonicTimebase::new()))
    }

    /// Install a batch of plans and release them together
    ///
    /// Any prior plan for the same path is cancelled and replaced
    /// before the new one is installed, so a node never carries two
    /// concurrent motions. Every plan in the batch starts against the
    /// same begin instant, read once after installation.
    pub fn commit_batch(&self, plans: Vec<AnimationPlan>) {
        let mut states = self.states.lock().expect("controller lock poisoned");

        let mut batch = Vec::with_capacity(plans.len());
        for plan in plans {
            let path = plan.path.clone();
            states.insert(
                path.clone(),
                PlanState {
                    plan,
                    run: RunState::Suspended,
                },
            );
            batch.push(path);
        }

        let begin = self.timebase.now();
        for path in &batch {
            if let Some(state) = states.get_mut(path) {
                state.run = RunState::Running { begin };
            }
        }
        debug!(plans = batch.len(), begin, "committed plan batch");
    }

    /// Freeze every running plan, keeping its local elapsed time
    pub fn pause_all(&self) {
        let now = self.timebase.now();
        let mut states = self.states.lock().expect("controller lock poisoned");
        for state in states.values_mut() {
            if let RunState::Running { begin } = state.run {
                state.run = RunState::Paused {
                    elapsed: now - begin,
                };
            }
        }
        debug!(at = now, "paused all plans");
    }

    /// Unfreeze every paused plan with its elapsed time intact
    ///
    /// Re-derives each begin instant so that `now - begin` equals the
    /// elapsed time recorded at pause; the motion continues exactly
    /// where it stopped.
    pub fn resume_all(&self) {
        let now = self.timebase.now();
        let mut states = self.states.lock().expect("controller lock poisoned");
        for state in states.values_mut() {
            if let RunState::Paused { elapsed } = state.run {
                state.run = RunState::Running {
                    begin: now - elapsed,
                };
            }
        }
        debug!(at = now, "resumed all plans");
    }

    /// Remove one node's plan, cancelling any running motion
    pub fn cancel(&self, path: &IndexPath) -> bool {
        let mut states = self.states.lock().expect("controller lock poisoned");
        states.remove(path).is_some()
    }

    /// Number of installed plans
    pub fn len(&self) -> usize {
        self.states.lock().expect("controller lock poisoned").len()
    }

    /// True when no plans are installed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the node's plan is currently running
    pub fn is_running(&self, path: &IndexPath) -> bool {
        let states = self.states.lock().expect("controller lock poisoned");
        matches!(
            states.get(path).map(|s| s.run),
            Some(RunState::Running { .. })
        )
    }

    /// Seconds on a node's local animation clock
    ///
    /// Zero while suspended, frozen while paused, advancing while
    /// running. `None` when no plan is installed for the path.
    pub fn local_time(&self, path: &IndexPath) -> Option<f64> {
        let states = self.states.lock().expect("controller lock poisoned");
        let state = states.get(path)?;
        Some(match state.run {
            RunState::Suspended => 0.0,
            RunState::Running { begin } => self.timebase.now() - begin,
            RunState::Paused { elapsed } => elapsed,
        })
    }

    /// Sample a node's current rotation and opacity
    pub fn sample(&self, path: &IndexPath) -> Option<PlanSample> {
        let states = self.states.lock().expect("controller lock poisoned");
        let state = states.get(path)?;
        let local_time = match state.run {
            RunState::Suspended => 0.0,
            RunState::Running { begin } => self.timebase.now() - begin,
            RunState::Paused { elapsed } => elapsed,
        };
        Some(PlanSample {
            local_time,
            rotation_degrees: state.plan.rotation_degrees_at(local_time),
            opacity: state.plan.opacity_at(local_time),
        })
    }
}
