use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Half-open time window `[start, end)`.
///
/// Single source of truth for overlap semantics. Every component compares
/// intervals through [`Interval::overlaps`] so the boundary rule cannot
/// drift between call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Validated constructor for intervals entering at the API boundary.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        if end <= start {
            return Err(EngineError::InvalidInput(format!(
                "interval end {} must be after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Strict on both sides: touching endpoints do not overlap, so
    /// back-to-back bookings on the same table are allowed.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Historical rows can carry `end <= start`. The availability scan skips
    /// (and logs) those instead of trusting them.
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 4, hour, min, 0).unwrap()
    }

    #[test]
    fn test_overlap_is_strict_at_boundaries() {
        let first = Interval::new(at(19, 0), at(21, 0)).unwrap();
        let back_to_back = Interval::new(at(21, 0), at(22, 30)).unwrap();
        let before = Interval::new(at(17, 30), at(19, 0)).unwrap();

        // Ending exactly when the other starts is not an overlap.
        assert!(!first.overlaps(&back_to_back));
        assert!(!back_to_back.overlaps(&first));
        assert!(!before.overlaps(&first));
    }

    #[test]
    fn test_overlap_detects_intersection() {
        let a = Interval::new(at(19, 0), at(21, 0)).unwrap();
        let b = Interval::new(at(20, 30), at(22, 0)).unwrap();
        let contained = Interval::new(at(19, 30), at(20, 0)).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps(&contained));
        assert!(contained.overlaps(&a));
    }

    #[test]
    fn test_new_rejects_inverted_and_empty() {
        assert!(Interval::new(at(21, 0), at(19, 0)).is_err());
        assert!(Interval::new(at(19, 0), at(19, 0)).is_err());
    }

    #[test]
    fn test_duration_minutes() {
        let a = Interval::new(at(18, 0), at(19, 30)).unwrap();
        assert_eq!(a.duration_minutes(), 90);
    }
}
