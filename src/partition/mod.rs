//! Time partition table
//!
//! Fixed configuration mapping each tree depth to a real-world cycle
//! period. Depth 0 is the coarsest partition (one full day in the
//! reference table) and the last entry the finest (one second); the
//! table's length bounds how deep the scheduler materializes the tree.

use std::fmt;

use crate::ClockError;

/// Calendar unit a partition is counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// 3600 seconds
    Hour,
    /// 60 seconds
    Minute,
    /// 1 second
    Second,
}

impl TimeUnit {
    /// Seconds in one unit
    #[inline]
    pub fn seconds(self) -> u64 {
        match self {
            TimeUnit::Hour => 3600,
            TimeUnit::Minute => 60,
            TimeUnit::Second => 1,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Hour => write!(f, "hour"),
            TimeUnit::Minute => write!(f, "minute"),
            TimeUnit::Second => write!(f, "second"),
        }
    }
}

/// One table entry: `size` counts of `unit` form a full cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Unit the cycle is counted in
    pub unit: TimeUnit,
    /// Positive number of units per cycle
    pub size: u32,
}

impl Partition {
    /// Convenience constructor
    pub fn new(unit: TimeUnit, size: u32) -> Self {
        Partition { unit, size }
    }

    /// Full cycle length in seconds
    #[inline]
    pub fn period_seconds(&self) -> u64 {
        self.unit.seconds() * u64::from(self.size)
    }
}

/// Ordered list of partitions, coarsest first
///
/// Validated once at construction; lookups never allocate.
#[derive(Debug, Clone)]
pub struct TimePartitionTable {
    entries: Vec<Partition>,
}

impl TimePartitionTable {
    /// Build a table, checking the partition invariants
    ///
    /// Fails with `InvalidConfig` when the table is empty, any entry
    /// has size 0, or periods are not strictly decreasing from depth
    /// 0 to the deepest entry.
    pub fn new(entries: Vec<Partition>) -> Result<Self, ClockError> {
        if entries.is_empty() {
            return Err(ClockError::InvalidConfig(
                "partition table must have at least one entry".to_string(),
            ));
        }
        for (depth, entry) in entries.iter().enumerate() {
            if entry.size == 0 {
                return Err(ClockError::InvalidConfig(format!(
                    "partition at depth {depth} has size 0"
                )));
            }
        }
        for (depth, pair) in entries.windows(2).enumerate() {
            if pair[1].period_seconds() >= pair[0].period_seconds() {
                return Err(ClockError::InvalidConfig(format!(
                    "partition at depth {} ({}s) is not finer than depth {} ({}s)",
                    depth + 1,
                    pair[1].period_seconds(),
                    depth,
                    pair[0].period_seconds()
                )));
            }
        }
        Ok(TimePartitionTable { entries })
    }

    /// Partition entry at `depth`
    pub fn get(&self, depth: usize) -> Result<Partition, ClockError> {
        self.entries
            .get(depth)
            .copied()
            .ok_or(ClockError::InvalidDepth {
                depth,
                max: self.max_depth(),
            })
    }

    /// Cycle length in seconds at `depth`
    pub fn period_seconds(&self, depth: usize) -> Result<u64, ClockError> {
        Ok(self.get(depth)?.period_seconds())
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Tables are never empty once constructed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deepest depth the scheduler will materialize
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.entries.len() - 1
    }

    /// Iterate entries coarsest first
    pub fn iter(&self) -> impl Iterator<Item = &Partition> {
        self.entries.iter()
    }
}

impl Default for TimePartitionTable {
    /// The reference ten-entry table: 24h, 12h, 1h, 30m, 15m, 5m,
    /// 1m, 30s, 10s, 1s
    fn default() -> Self {
        use TimeUnit::*;
        let entries = [
            (Hour, 24),
            (Hour, 12),
            (Hour, 1),
            (Minute, 30),
            (Minute, 15),
            (Minute, 5),
            (Minute, 1),
            (Second, 30),
            (Second, 10),
            (Second, 1),
        ];
        TimePartitionTable::new(
            entries
                .into_iter()
                .map(|(unit, size)| Partition::new(unit, size))
                .collect(),
        )
        .expect("reference table is valid")
    }
}
