//! Fiscal quarter arithmetic

use chrono::{Datelike, NaiveDate};
use pt_models::Quarter;

/// Explicit successors within a fiscal year.
///
/// Any quarter without an entry wraps around to Q1 of the next year.
const SUCCESSORS: [(Quarter, Quarter); 4] = [
    (Quarter::Q1, Quarter::Q2),
    (Quarter::Q2, Quarter::Q3a),
    (Quarter::Q3a, Quarter::Q3b),
    (Quarter::Q3b, Quarter::Q4),
];

/// Period following `(quarter, year)`. The year saturates at `i32::MAX`.
pub fn next_period(quarter: Quarter, year: i32) -> (Quarter, i32) {
    SUCCESSORS
        .iter()
        .find(|(from, _)| *from == quarter)
        .map(|(_, to)| (*to, year))
        .unwrap_or((Quarter::Q1, year.saturating_add(1)))
}

/// Quarter a project starting in the given zero-based month reports in first.
///
/// Q3b is never an initial quarter; it is only reached by advancing from Q3a.
pub fn initial_quarter(month0: u32) -> Quarter {
    match month0 {
        3..=5 => Quarter::Q2,
        6..=8 => Quarter::Q3a,
        9..=11 => Quarter::Q4,
        _ => Quarter::Q1,
    }
}

/// First reporting period for a project start date
pub fn initial_period(start: NaiveDate) -> (Quarter, i32) {
    (initial_quarter(start.month0()), start.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_quarter_by_month() {
        for month0 in 0..=2 {
            assert_eq!(initial_quarter(month0), Quarter::Q1);
        }
        for month0 in 3..=5 {
            assert_eq!(initial_quarter(month0), Quarter::Q2);
        }
        for month0 in 6..=8 {
            assert_eq!(initial_quarter(month0), Quarter::Q3a);
        }
        for month0 in 9..=11 {
            assert_eq!(initial_quarter(month0), Quarter::Q4);
        }
    }

    #[test]
    fn test_initial_quarter_never_q3b() {
        assert!((0..12).all(|month0| initial_quarter(month0) != Quarter::Q3b));
    }

    #[test]
    fn test_initial_period_uses_calendar_year() {
        let start = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
        assert_eq!(initial_period(start), (Quarter::Q4, 2021));
    }

    #[test]
    fn test_next_period_table() {
        assert_eq!(next_period(Quarter::Q1, 2023), (Quarter::Q2, 2023));
        assert_eq!(next_period(Quarter::Q2, 2023), (Quarter::Q3a, 2023));
        assert_eq!(next_period(Quarter::Q3a, 2023), (Quarter::Q3b, 2023));
        assert_eq!(next_period(Quarter::Q3b, 2023), (Quarter::Q4, 2023));
        assert_eq!(next_period(Quarter::Q4, 2023), (Quarter::Q1, 2024));
    }

    #[test]
    fn test_quarters_without_successor_wrap_around() {
        for quarter in Quarter::ALL {
            if SUCCESSORS.iter().all(|(from, _)| *from != quarter) {
                assert_eq!(next_period(quarter, 1999), (Quarter::Q1, 2000));
            }
        }
    }

    #[test]
    fn test_wraparound_at_max_year_saturates() {
        assert_eq!(next_period(Quarter::Q4, i32::MAX), (Quarter::Q1, i32::MAX));
        assert_eq!(next_period(Quarter::Q3a, i32::MAX), (Quarter::Q3b, i32::MAX));
    }

    #[test]
    fn test_full_cycle_returns_to_q1() {
        let mut period = (Quarter::Q1, 2022);
        for _ in 0..Quarter::ALL.len() {
            period = next_period(period.0, period.1);
        }
        assert_eq!(period, (Quarter::Q1, 2023));
    }
}
