use chrono::NaiveDate;
use mesa_core::{Interval, Reservation, ScheduleConfig, Slot, Table};
use uuid::Uuid;

use crate::inventory::eligible_tables;

/// Active reservations safe to compare against. Rows with `end <= start`
/// are skipped and logged; one corrupt record must not blind the whole
/// day's search.
fn usable(reservations: &[Reservation]) -> Vec<&Reservation> {
    reservations
        .iter()
        .filter(|r| r.is_active())
        .filter(|r| {
            if r.interval.is_well_formed() {
                true
            } else {
                tracing::warn!(
                    reservation_id = %r.id,
                    start = %r.interval.start,
                    end = %r.interval.end,
                    "ignoring reservation with malformed interval"
                );
                false
            }
        })
        .collect()
}

fn free_on(booked: &[&Reservation], table_id: Uuid, interval: &Interval) -> bool {
    booked
        .iter()
        .all(|r| r.table_id != Some(table_id) || !r.interval.overlaps(interval))
}

/// Candidate slots that can still seat `party_size` on `date`.
///
/// A slot is available iff at least one eligible table has no overlapping
/// active reservation for the slot's full interval. This is an existence
/// predicate, not an allocation: no table is assigned here. Concrete
/// assignment happens at commit time inside the store's atomic unit.
pub fn available_slots<'a>(
    schedule: &ScheduleConfig,
    tables: &[Table],
    reservations: &'a [Reservation],
    date: NaiveDate,
    party_size: i32,
) -> impl Iterator<Item = Slot> + 'a {
    let eligible = eligible_tables(tables, party_size);
    let booked = usable(reservations);

    schedule
        .slots_for_party(date, party_size)
        .filter(move |slot| {
            let interval = slot.interval();
            eligible.iter().any(|t| free_on(&booked, t.id, &interval))
        })
}

/// True when `table_id` has no overlapping active reservation for `interval`.
pub fn table_is_free(table_id: Uuid, reservations: &[Reservation], interval: &Interval) -> bool {
    free_on(&usable(reservations), table_id, interval)
}

/// Commit-time variant of the availability check, restricted to a single
/// interval: the first eligible free table in resolver order, so two writers
/// racing on the same snapshot converge on the same pick and the loser is
/// caught by the overlap re-check.
pub fn find_free_table(
    tables: &[Table],
    reservations: &[Reservation],
    interval: &Interval,
    party_size: i32,
) -> Option<Table> {
    let booked = usable(reservations);
    eligible_tables(tables, party_size)
        .into_iter()
        .find(|t| free_on(&booked, t.id, interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Timelike, Utc};
    use mesa_core::{ProposedReservation, ReservationStatus};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 4).unwrap()
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 4, hour, min, 0).unwrap()
    }

    fn table(number: i32, capacity: i32) -> Table {
        Table {
            id: Uuid::new_v4(),
            number,
            capacity,
        }
    }

    fn booking(table: &Table, start: DateTime<Utc>, end: DateTime<Utc>) -> Reservation {
        ProposedReservation {
            id: Uuid::new_v4(),
            table_id: Some(table.id),
            interval: Interval { start, end },
            party_size: 2,
            event_id: None,
        }
        .into_reservation(table.id)
    }

    /// Scenario: cap-4 table busy 7pm-9pm, cap-2 table free all evening.
    /// Every slot stays available for a party of two because availability is
    /// an existence predicate and the cap-2 table can always take them.
    #[test]
    fn test_small_party_rides_the_free_table() {
        let schedule = ScheduleConfig::default();
        let two_top = table(1, 2);
        let four_top = table(2, 4);
        let tables = vec![two_top.clone(), four_top.clone()];
        let reservations = vec![booking(&four_top, at(19, 0), at(21, 0))];

        let slots: Vec<Slot> =
            available_slots(&schedule, &tables, &reservations, date(), 2).collect();
        assert_eq!(slots.len(), 20);
    }

    /// Same evening, but the party of four only fits the booked table: slots
    /// whose 120m interval crosses 7pm-9pm disappear.
    #[test]
    fn test_large_party_blocked_by_overlap() {
        let schedule = ScheduleConfig::default();
        let two_top = table(1, 2);
        let four_top = table(2, 4);
        let tables = vec![two_top, four_top.clone()];
        let reservations = vec![booking(&four_top, at(19, 0), at(21, 0))];

        let slots: Vec<Slot> =
            available_slots(&schedule, &tables, &reservations, date(), 4).collect();

        // 17:00 (ends 19:00, touching is fine) and 21:00 onwards survive.
        let hours: Vec<(u32, u32)> = slots
            .iter()
            .map(|s| (s.starts_at.hour(), s.starts_at.minute()))
            .collect();
        assert_eq!(hours, vec![(17, 0), (21, 0), (21, 15), (21, 30), (21, 45)]);
    }

    #[test]
    fn test_no_eligible_table_means_empty_not_error() {
        let schedule = ScheduleConfig::default();
        let tables = vec![table(1, 2), table(2, 4)];

        let slots: Vec<Slot> = available_slots(&schedule, &tables, &[], date(), 9).collect();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_malformed_interval_is_isolated() {
        let schedule = ScheduleConfig::default();
        let only = table(1, 4);
        let tables = vec![only.clone()];

        // end before start: the record is ignored instead of poisoning the scan
        let corrupt = booking(&only, at(21, 0), at(19, 0));
        let reservations = vec![corrupt, booking(&only, at(17, 0), at(18, 30))];

        let slots: Vec<Slot> =
            available_slots(&schedule, &tables, &reservations, date(), 2).collect();

        // The well-formed 17:00-18:30 booking still blocks its slots.
        assert!(!slots.is_empty());
        assert!(slots.iter().all(|s| {
            !s.interval().overlaps(&Interval {
                start: at(17, 0),
                end: at(18, 30),
            })
        }));
    }

    #[test]
    fn test_cancelled_reservation_does_not_block() {
        let schedule = ScheduleConfig::default();
        let only = table(1, 4);
        let tables = vec![only.clone()];

        let mut cancelled = booking(&only, at(17, 0), at(22, 0));
        cancelled.status = ReservationStatus::Cancelled;

        let slots: Vec<Slot> =
            available_slots(&schedule, &tables, &[cancelled], date(), 4).collect();
        assert_eq!(slots.len(), 20);
    }

    #[test]
    fn test_find_free_table_prefers_smallest_fit() {
        let two_top = table(1, 2);
        let four_top = table(2, 4);
        let tables = vec![four_top.clone(), two_top.clone()];
        let interval = Interval {
            start: at(19, 0),
            end: at(20, 30),
        };

        let pick = find_free_table(&tables, &[], &interval, 2).unwrap();
        assert_eq!(pick.id, two_top.id);

        // With the two-top taken, the four-top absorbs the party.
        let reservations = vec![booking(&two_top, at(18, 30), at(20, 0))];
        let pick = find_free_table(&tables, &reservations, &interval, 2).unwrap();
        assert_eq!(pick.id, four_top.id);
    }

    #[test]
    fn test_back_to_back_is_not_a_conflict() {
        let only = table(1, 4);
        let tables = vec![only.clone()];
        let reservations = vec![booking(&only, at(19, 0), at(21, 0))];

        let interval = Interval {
            start: at(21, 0),
            end: at(22, 30),
        };
        assert!(table_is_free(only.id, &reservations, &interval));
        assert!(find_free_table(&tables, &reservations, &interval, 4).is_some());
    }
}
