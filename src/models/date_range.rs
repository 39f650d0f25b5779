//! Inclusive calendar date ranges used for mandatory-home and wish-home windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SchedulerError, SchedulerResult};

/// A closed interval of calendar dates: both endpoints belong to the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting inverted endpoints.
    pub fn new(start: NaiveDate, end: NaiveDate) -> SchedulerResult<Self> {
        if end < start {
            return Err(SchedulerError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Single-day range.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Merge with an overlapping or directly adjacent range.
    /// Returns `None` when the ranges are separated by at least one day.
    pub fn merge(&self, other: &Self) -> Option<Self> {
        let adjacent = self.end.succ_opt() == Some(other.start)
            || other.end.succ_opt() == Some(self.start);
        if !self.overlaps(other) && !adjacent {
            return None;
        }
        Some(Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        })
    }

    /// Number of days covered, counting both endpoints.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Compress a sorted, deduplicated date list into maximal consecutive
    /// ranges. Gaps of one day or more begin a new range.
    pub fn from_sorted_dates(dates: &[NaiveDate]) -> Vec<Self> {
        let mut ranges = Vec::new();
        let mut dates = dates.iter().copied();
        let Some(first) = dates.next() else {
            return ranges;
        };
        let mut current = Self::single(first);
        for date in dates {
            if current.end.succ_opt() == Some(date) {
                current.end = date;
            } else {
                ranges.push(current);
                current = Self::single(date);
            }
        }
        ranges.push(current);
        ranges
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{} (1d)", self.start)
        } else {
            write!(f, "{} to {} ({}d)", self.start, self.end, self.len_days())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_endpoints() {
        let result = DateRange::new(date(2025, 1, 10), date(2025, 1, 5));
        assert!(matches!(
            result,
            Err(SchedulerError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::new(date(2025, 1, 5), date(2025, 1, 7)).unwrap();
        assert!(range.contains(date(2025, 1, 5)));
        assert!(range.contains(date(2025, 1, 6)));
        assert!(range.contains(date(2025, 1, 7)));
        assert!(!range.contains(date(2025, 1, 4)));
        assert!(!range.contains(date(2025, 1, 8)));
    }

    #[test]
    fn overlap_detection() {
        let a = DateRange::new(date(2025, 1, 1), date(2025, 1, 10)).unwrap();
        let b = DateRange::new(date(2025, 1, 10), date(2025, 1, 20)).unwrap();
        let c = DateRange::new(date(2025, 1, 12), date(2025, 1, 15)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn merge_overlapping_and_adjacent() {
        let a = DateRange::new(date(2025, 1, 1), date(2025, 1, 5)).unwrap();
        let b = DateRange::new(date(2025, 1, 6), date(2025, 1, 9)).unwrap();
        let merged = a.merge(&b).unwrap();
        assert_eq!(merged.start, date(2025, 1, 1));
        assert_eq!(merged.end, date(2025, 1, 9));

        let far = DateRange::single(date(2025, 2, 1));
        assert!(a.merge(&far).is_none());
    }

    #[test]
    fn compresses_consecutive_dates() {
        let dates = vec![
            date(2025, 1, 1),
            date(2025, 1, 2),
            date(2025, 1, 3),
            date(2025, 1, 7),
            date(2025, 1, 9),
            date(2025, 1, 10),
        ];
        let ranges = DateRange::from_sorted_dates(&dates);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0].len_days(), 3);
        assert_eq!(ranges[1], DateRange::single(date(2025, 1, 7)));
        assert_eq!(ranges[2].start, date(2025, 1, 9));
        assert_eq!(ranges[2].end, date(2025, 1, 10));
    }

    #[test]
    fn compresses_empty_list() {
        assert!(DateRange::from_sorted_dates(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn compression_round_trips(offsets in prop::collection::btree_set(0i64..120, 1..40)) {
            let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let dates: Vec<NaiveDate> =
                offsets.iter().map(|o| base + Duration::days(*o)).collect();

            let ranges = DateRange::from_sorted_dates(&dates);

            let mut expanded = Vec::new();
            for range in &ranges {
                let mut cursor = range.start;
                while cursor <= range.end {
                    expanded.push(cursor);
                    cursor = cursor.succ_opt().unwrap();
                }
            }
            prop_assert_eq!(&expanded, &dates);

            for pair in ranges.windows(2) {
                prop_assert!((pair[1].start - pair[0].end).num_days() >= 2);
            }
        }
    }
}
