//! Cycle phase from wall-clock time
//!
//! Reduces the current hour/minute/second to "how far through its
//! cycle is a node at this depth" using the partition table. Pure
//! arithmetic over a time snapshot; the live clock behind it is the
//! only ambient input the whole core consumes.

use std::fmt;

use chrono::Timelike;

use crate::partition::{TimePartitionTable, TimeUnit};
use crate::ClockError;

/// A wall-clock snapshot: hour, minute, second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    /// Build a snapshot, validating field ranges
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ClockError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(ClockError::InvalidConfig(format!(
                "invalid wall time {hour:02}:{minute:02}:{second:02}"
            )));
        }
        Ok(WallTime {
            hour,
            minute,
            second,
        })
    }

    /// Hour component, 0..=23
    #[inline]
    pub fn hour(&self) -> u64 {
        u64::from(self.hour)
    }

    /// Minute component, 0..=59
    #[inline]
    pub fn minute(&self) -> u64 {
        u64::from(self.minute)
    }

    /// Second component, 0..=59
    #[inline]
    pub fn second(&self) -> u64 {
        u64::from(self.second)
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Source of the current wall-clock time
///
/// The core reads this once per refresh so every node in a batch sees
/// the same snapshot.
pub trait WallClock: fmt::Debug + Send + Sync {
    /// Current local time components
    fn now(&self) -> WallTime;
}

/// Live clock backed by the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> WallTime {
        let now = chrono::Local::now();
        WallTime {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        }
    }
}

/// Progress through the current cycle at some depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePhase {
    /// Fraction completed, in `[0, 1)`
    pub fraction: f64,
    /// Whole seconds elapsed in the current cycle
    pub elapsed_seconds: u64,
    /// Full cycle length in seconds
    pub period_seconds: u64,
}

impl CyclePhase {
    /// Seconds until the current cycle ends
    #[inline]
    pub fn remaining_seconds(&self) -> u64 {
        self.period_seconds - self.elapsed_seconds
    }
}

/// Computes cycle phases against a partition table
#[derive(Debug, Clone, Copy)]
pub struct PhaseCalculator<'a> {
    table: &'a TimePartitionTable,
}

impl<'a> PhaseCalculator<'a> {
    /// Bind a calculator to a table
    pub fn new(table: &'a TimePartitionTable) -> Self {
        PhaseCalculator { table }
    }

    /// Phase of the cycle at `depth` as of `now`
    ///
    /// The elapsed seconds count only the time components at or below
    /// the partition's unit: hour-based partitions fold the hour in
    /// modulo the partition's span, minute-based partitions ignore the
    /// hour entirely (their cycles recur every hour), and second-based
    /// partitions see only the second hand.
    pub fn phase(&self, depth: usize, now: WallTime) -> Result<CyclePhase, ClockError> {
        let partition = self.table.get(depth)?;
        let period_seconds = partition.period_seconds();
        debug_assert!(period_seconds > 0, "table validation enforces size >= 1");

        let total = match partition.unit {
            TimeUnit::Hour => {
                (now.hour() % u64::from(partition.size)) * 3600 + now.minute() * 60 + now.second()
            }
            TimeUnit::Minute => now.minute() * 60 + now.second(),
            TimeUnit::Second => now.second(),
        };
        let elapsed_seconds = total % period_seconds;

        Ok(CyclePhase {
            fraction: elapsed_seconds as f64 / period_seconds as f64,
            elapsed_seconds,
            period_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u8, m: u8, s: u8) -> WallTime {
        WallTime::new(h, m, s).unwrap()
    }

    #[test]
    fn test_phase_zero_at_cycle_start() {
        let table = TimePartitionTable::default();
        let calc = PhaseCalculator::new(&table);
        let now = at(3, 0, 0);

        // depth 2 = (hour, 1): 3:00:00 is a cycle boundary
        let phase = calc.phase(2, now).unwrap();
        assert_eq!(phase.elapsed_seconds, 0);
        assert_eq!(phase.fraction, 0.0);

        // depth 9 = (second, 1): always at a boundary
        let phase = calc.phase(9, now).unwrap();
        assert_eq!(phase.fraction, 0.0);
    }

    #[test]
    fn test_phase_mid_afternoon() {
        let table = TimePartitionTable::default();
        let calc = PhaseCalculator::new(&table);
        let now = at(14, 45, 30);

        // depth 0 = (hour, 24): full day elapsed seconds
        let phase = calc.phase(0, now).unwrap();
        assert_eq!(phase.elapsed_seconds, 14 * 3600 + 45 * 60 + 30);
        assert!((phase.fraction - 53_130.0 / 86_400.0).abs() < 1e-12);

        // depth 6 = (minute, 1): half way through the minute
        let phase = calc.phase(6, now).unwrap();
        assert_eq!(phase.elapsed_seconds, 30);
        assert_eq!(phase.fraction, 0.5);
    }

    #[test]
    fn test_hour_folds_modulo_span() {
        let table = TimePartitionTable::default();
        let calc = PhaseCalculator::new(&table);

        // depth 1 = (hour, 12): 14:00:00 is 2h into the second half-day
        let phase = calc.phase(1, at(14, 0, 0)).unwrap();
        assert_eq!(phase.elapsed_seconds, 2 * 3600);
    }

    #[test]
    fn test_fraction_always_in_unit_interval() {
        let table = TimePartitionTable::default();
        let calc = PhaseCalculator::new(&table);
        for depth in 0..table.len() {
            for &(h, m, s) in &[(0, 0, 0), (23, 59, 59), (12, 30, 15), (6, 0, 1)] {
                let phase = calc.phase(depth, at(h, m, s)).unwrap();
                assert!(phase.fraction >= 0.0 && phase.fraction < 1.0);
                assert!(phase.elapsed_seconds < phase.period_seconds);
            }
        }
    }

    #[test]
    fn test_invalid_wall_time_rejected() {
        assert!(WallTime::new(24, 0, 0).is_err());
        assert!(WallTime::new(0, 60, 0).is_err());
        assert!(WallTime::new(0, 0, 60).is_err());
    }

    #[test]
    fn test_depth_past_table_fails() {
        let table = TimePartitionTable::default();
        let calc = PhaseCalculator::new(&table);
        assert!(matches!(
            calc.phase(10, at(1, 2, 3)),
            Err(ClockError::InvalidDepth { .. })
        ));
    }
}
