use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use crate::interval::Interval;
use crate::models::Slot;

/// Service-day schedule rules. Every knob here is configuration, not a
/// hard-coded constant; defaults match a 5pm-10pm dinner service.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_service_start_hour")]
    pub service_start_hour: u32,
    #[serde(default = "default_service_end_hour")]
    pub service_end_hour: u32,
    #[serde(default = "default_granularity_minutes")]
    pub granularity_minutes: i64,
    #[serde(default = "default_small_party_max_size")]
    pub small_party_max_size: i32,
    #[serde(default = "default_small_party_duration")]
    pub small_party_duration_minutes: i64,
    #[serde(default = "default_large_party_duration")]
    pub large_party_duration_minutes: i64,
    /// Business timezone as a fixed offset from UTC, in minutes. Slot labels
    /// are rendered in this offset; all comparisons stay on absolute instants.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_service_start_hour() -> u32 {
    17
}
fn default_service_end_hour() -> u32 {
    22
}
fn default_granularity_minutes() -> i64 {
    15
}
fn default_small_party_max_size() -> i32 {
    2
}
fn default_small_party_duration() -> i64 {
    90
}
fn default_large_party_duration() -> i64 {
    120
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            service_start_hour: default_service_start_hour(),
            service_end_hour: default_service_end_hour(),
            granularity_minutes: default_granularity_minutes(),
            small_party_max_size: default_small_party_max_size(),
            small_party_duration_minutes: default_small_party_duration(),
            large_party_duration_minutes: default_large_party_duration(),
            utc_offset_minutes: 0,
        }
    }
}

impl ScheduleConfig {
    /// Seating duration implied by party size.
    pub fn duration_for_party(&self, party_size: i32) -> i64 {
        if party_size <= self.small_party_max_size {
            self.small_party_duration_minutes
        } else {
            self.large_party_duration_minutes
        }
    }

    pub fn business_offset(&self) -> FixedOffset {
        // Offsets are clamped to the valid ±14h range before conversion, so
        // east_opt cannot fail here.
        let seconds = self.utc_offset_minutes.clamp(-14 * 60, 14 * 60) * 60;
        FixedOffset::east_opt(seconds).expect("offset within +/-14h")
    }

    /// The service window for `date`, anchored from business wall-clock time
    /// to absolute instants. None when the configured hours are unusable.
    pub fn service_window(&self, date: NaiveDate) -> Option<Interval> {
        let offset = self.business_offset();
        let start = date.and_hms_opt(self.service_start_hour, 0, 0)?;
        let end = date.and_hms_opt(self.service_end_hour, 0, 0)?;
        let start = offset
            .from_local_datetime(&start)
            .single()?
            .with_timezone(&Utc);
        let end = offset.from_local_datetime(&end).single()?.with_timezone(&Utc);
        (start < end).then_some(Interval { start, end })
    }

    /// Lazy, finite, restartable sequence of candidate start instants for one
    /// service day, evenly spaced by the granularity. Start times run
    /// strictly before service end, truncating a misaligned window rather
    /// than overflowing past it.
    pub fn slot_starts(&self, date: NaiveDate) -> SlotStarts {
        SlotStarts {
            cursor: self.service_window(date).map(|w| (w.start, w.end)),
            step: Duration::minutes(self.granularity_minutes.max(1)),
        }
    }

    /// Candidate slots for a party on `date`. A slot's end may fall past the
    /// service window (last-seating semantics); it is not dropped for that.
    pub fn slots_for_party(
        &self,
        date: NaiveDate,
        party_size: i32,
    ) -> impl Iterator<Item = Slot> {
        let duration_minutes = self.duration_for_party(party_size);
        self.slot_starts(date).map(move |starts_at| Slot {
            starts_at,
            duration_minutes,
        })
    }
}

pub struct SlotStarts {
    cursor: Option<(DateTime<Utc>, DateTime<Utc>)>,
    step: Duration,
}

impl Iterator for SlotStarts {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let (current, end) = self.cursor?;
        if current >= end {
            self.cursor = None;
            return None;
        }
        self.cursor = Some((current + self.step, end));
        Some(current)
    }
}
