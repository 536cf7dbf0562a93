//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use fibclock::{
    ClockCore, ManualTimebase, TimePartitionTable, Timebase, WallClock, WallTime,
};

/// Wall clock pinned to one snapshot
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub WallTime);

impl WallClock for FixedClock {
    fn now(&self) -> WallTime {
        self.0
    }
}

/// Shorthand for a validated wall time
pub fn at(hour: u8, minute: u8, second: u8) -> WallTime {
    WallTime::new(hour, minute, second).unwrap()
}

/// A core over the reference table, a fixed wall clock, and a manual
/// timebase the test can advance by hand
pub fn fixed_core(hour: u8, minute: u8, second: u8) -> (Arc<ManualTimebase>, ClockCore) {
    let timebase = Arc::new(ManualTimebase::new());
    let core = ClockCore::new(
        TimePartitionTable::default(),
        Arc::new(FixedClock(at(hour, minute, second))),
        Arc::clone(&timebase) as Arc<dyn Timebase>,
    );
    (timebase, core)
}
