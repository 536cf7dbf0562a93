//! Batch synchronization and pause/resume semantics

mod test_helpers;

use std::sync::Arc;

use fibclock::{
    AnimationPlanner, FibonacciTree, IndexPath, ManualTimebase, SyncController,
    TimePartitionTable, Timebase,
};
use test_helpers::{at, fixed_core};

fn committed_controller(
    h: u8,
    m: u8,
    s: u8,
) -> (Arc<ManualTimebase>, SyncController, Vec<IndexPath>) {
    let timebase = Arc::new(ManualTimebase::new());
    let controller = SyncController::new(Arc::clone(&timebase) as Arc<dyn Timebase>);

    let planner = AnimationPlanner::new(TimePartitionTable::default());
    let mut tree = FibonacciTree::new();
    let plans = planner.plan_all(&mut tree, at(h, m, s)).unwrap();
    let paths: Vec<IndexPath> = plans.iter().map(|p| p.path.clone()).collect();

    controller.commit_batch(plans);
    (timebase, controller, paths)
}

#[test]
fn batch_shares_one_begin_instant() {
    let (timebase, controller, paths) = committed_controller(14, 45, 30);

    // However long planning took, every node's local clock reads the
    // same offset after commit.
    timebase.advance(4.25);
    for path in &paths {
        assert_eq!(controller.local_time(path), Some(4.25), "node {path}");
    }
}

#[test]
fn pause_then_resume_is_undetectable() {
    let (timebase, controller, paths) = committed_controller(9, 30, 12);
    timebase.advance(13.5);

    let before: Vec<_> = paths
        .iter()
        .map(|p| controller.sample(p).unwrap())
        .collect();

    controller.pause_all();
    controller.resume_all();

    // No timebase time passed: every sampled value is unchanged.
    for (path, before) in paths.iter().zip(&before) {
        let after = controller.sample(path).unwrap();
        assert_eq!(&after, before, "node {path}");
    }
}

#[test]
fn paused_plans_hold_still_while_time_passes() {
    let (timebase, controller, paths) = committed_controller(9, 30, 12);
    timebase.advance(2.0);
    controller.pause_all();

    let frozen: Vec<_> = paths
        .iter()
        .map(|p| controller.sample(p).unwrap())
        .collect();

    timebase.advance(3600.0);
    for (path, frozen) in paths.iter().zip(&frozen) {
        assert_eq!(&controller.sample(path).unwrap(), frozen);
        assert!(!controller.is_running(path));
    }

    // Resuming picks up where the freeze happened, not where the
    // timebase has meanwhile advanced to.
    controller.resume_all();
    for path in &paths {
        assert_eq!(controller.local_time(path), Some(2.0));
        assert!(controller.is_running(path));
    }
}

#[test]
fn recommit_cancels_prior_motion() {
    let (timebase, controller, paths) = committed_controller(6, 0, 0);
    timebase.advance(30.0);

    let planner = AnimationPlanner::new(TimePartitionTable::default());
    let mut tree = FibonacciTree::new();
    let plans = planner.plan_all(&mut tree, at(6, 0, 30)).unwrap();
    controller.commit_batch(plans);

    // Same node set, fresh local clocks
    assert_eq!(controller.len(), paths.len());
    for path in &paths {
        assert_eq!(controller.local_time(path), Some(0.0));
    }
}

#[test]
fn core_refresh_commits_atomically() {
    let (timebase, mut core) = fixed_core(14, 45, 30);
    let count = core.refresh().unwrap();
    assert_eq!(count, core.controller().len());

    timebase.advance(1.0);
    core.pause();
    timebase.advance(10.0);
    core.resume();

    let root = IndexPath::root();
    assert_eq!(core.controller().local_time(&root), Some(1.0));
}

#[test]
fn sampled_rotation_respects_suppression() {
    let (_timebase, controller, paths) = committed_controller(12, 0, 0);

    // Path "10" is the sole B-child of the root's A-child: no rotation.
    let sole: IndexPath = "10".parse().unwrap();
    assert!(paths.contains(&sole));
    let sample = controller.sample(&sole).unwrap();
    assert!(sample.rotation_degrees.is_none());
    assert!(sample.opacity.is_some());

    // The root both rotates and fades.
    let root_sample = controller.sample(&IndexPath::root()).unwrap();
    assert!(root_sample.rotation_degrees.is_some());
    assert!(root_sample.opacity.is_some());
}
