//! Phase scenarios against the reference partition table

use fibclock::{PhaseCalculator, TimePartitionTable, WallTime};
use test_case::test_case;

fn at(h: u8, m: u8, s: u8) -> WallTime {
    WallTime::new(h, m, s).unwrap()
}

// 03:00:00 sits on a boundary of every hour-based cycle
#[test_case(0, 3, 0, 0, 10_800, 86_400 ; "three am against full day")]
#[test_case(1, 3, 0, 0, 10_800, 43_200 ; "three am against half day")]
#[test_case(2, 3, 0, 0, 0, 3_600 ; "three am against single hour")]
#[test_case(9, 3, 0, 0, 0, 1 ; "three am against single second")]
// 14:45:30 mid-afternoon
#[test_case(0, 14, 45, 30, 53_130, 86_400 ; "afternoon against full day")]
#[test_case(1, 14, 45, 30, 9_930, 43_200 ; "afternoon against half day")]
#[test_case(2, 14, 45, 30, 2_730, 3_600 ; "afternoon against single hour")]
#[test_case(3, 14, 45, 30, 930, 1_800 ; "afternoon against half hour")]
#[test_case(4, 14, 45, 30, 30, 900 ; "afternoon against quarter hour")]
#[test_case(5, 14, 45, 30, 30, 300 ; "afternoon against five minutes")]
#[test_case(6, 14, 45, 30, 30, 60 ; "afternoon against single minute")]
#[test_case(7, 14, 45, 30, 0, 30 ; "afternoon against thirty seconds")]
#[test_case(8, 14, 45, 30, 0, 10 ; "afternoon against ten seconds")]
#[test_case(9, 14, 45, 30, 0, 1 ; "afternoon against single second")]
fn scenario(depth: usize, h: u8, m: u8, s: u8, elapsed: u64, period: u64) {
    let table = TimePartitionTable::default();
    let phase = PhaseCalculator::new(&table).phase(depth, at(h, m, s)).unwrap();

    assert_eq!(phase.period_seconds, period);
    assert_eq!(phase.elapsed_seconds, elapsed);
    let expected = elapsed as f64 / period as f64;
    assert!((phase.fraction - expected).abs() < 1e-12);
    assert!(phase.fraction >= 0.0 && phase.fraction < 1.0);
}

#[test]
fn phase_advances_by_one_second_until_the_boundary() {
    let table = TimePartitionTable::default();
    let calc = PhaseCalculator::new(&table);

    // depth 7 = (second, 30): walk a full minute second by second
    let mut previous = calc.phase(7, at(8, 15, 0)).unwrap();
    assert_eq!(previous.elapsed_seconds, 0);

    for s in 1..60u8 {
        let phase = calc.phase(7, at(8, 15, s)).unwrap();
        if s % 30 == 0 {
            // Reset to zero exactly at the cycle boundary
            assert_eq!(phase.elapsed_seconds, 0);
        } else {
            assert_eq!(phase.elapsed_seconds, previous.elapsed_seconds + 1);
        }
        previous = phase;
    }
}

#[test]
fn midnight_is_a_boundary_for_every_depth() {
    let table = TimePartitionTable::default();
    let calc = PhaseCalculator::new(&table);
    for depth in 0..table.len() {
        let phase = calc.phase(depth, at(0, 0, 0)).unwrap();
        assert_eq!(phase.elapsed_seconds, 0, "depth {depth}");
        assert_eq!(phase.fraction, 0.0, "depth {depth}");
    }
}

#[test]
fn minute_partitions_ignore_the_hour() {
    let table = TimePartitionTable::default();
    let calc = PhaseCalculator::new(&table);
    // depth 3 = (minute, 30): identical at any hour
    let morning = calc.phase(3, at(1, 17, 42)).unwrap();
    let evening = calc.phase(3, at(22, 17, 42)).unwrap();
    assert_eq!(morning, evening);
}
