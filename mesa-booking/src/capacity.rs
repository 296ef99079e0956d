use mesa_core::{EngineError, Event, Reservation};
use uuid::Uuid;

/// Sum-and-compare against the event's attendee ceiling.
///
/// `excluding` drops the reservation being edited so in-place resizes are
/// judged on the post-edit total. Advisory when run against a read snapshot;
/// authoritative only inside the store's atomic commit, where the sum and
/// the insert share one critical section.
pub fn check_event_capacity(
    event: &Event,
    reservations: &[Reservation],
    proposed_party_size: i32,
    excluding: Option<Uuid>,
) -> Result<(), EngineError> {
    // max_attendees == 0 means unlimited.
    if event.max_attendees <= 0 {
        return Ok(());
    }

    let current: i32 = reservations
        .iter()
        .filter(|r| r.is_active() && r.event_id == Some(event.id))
        .filter(|r| Some(r.id) != excluding)
        .map(|r| r.party_size)
        .sum();

    if current + proposed_party_size > event.max_attendees {
        return Err(EngineError::CapacityExceeded {
            requested: proposed_party_size,
            max_attendees: event.max_attendees,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mesa_core::{EventStatus, Interval, ProposedReservation, ReservationStatus};

    fn event(max_attendees: i32) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "wine dinner".to_string(),
            max_attendees,
            status: EventStatus::Active,
        }
    }

    fn rsvp(event_id: Uuid, party_size: i32) -> Reservation {
        let start = Utc.with_ymd_and_hms(2026, 9, 4, 19, 0, 0).unwrap();
        ProposedReservation {
            id: Uuid::new_v4(),
            table_id: None,
            interval: Interval {
                start,
                end: start + chrono::Duration::minutes(120),
            },
            party_size,
            event_id: Some(event_id),
        }
        .into_reservation(Uuid::new_v4())
    }

    /// Ceiling 10, existing RSVPs sum to 8, party of 3 pushes past it.
    #[test]
    fn test_overflow_reports_ceiling() {
        let event = event(10);
        let existing = vec![rsvp(event.id, 5), rsvp(event.id, 3)];

        let err = check_event_capacity(&event, &existing, 3, None).unwrap_err();
        match err {
            EngineError::CapacityExceeded {
                requested,
                max_attendees,
            } => {
                assert_eq!(requested, 3);
                assert_eq!(max_attendees, 10);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_fit_passes() {
        let event = event(10);
        let existing = vec![rsvp(event.id, 5), rsvp(event.id, 3)];
        assert!(check_event_capacity(&event, &existing, 2, None).is_ok());
    }

    #[test]
    fn test_zero_ceiling_is_unlimited() {
        let event = event(0);
        let existing = vec![rsvp(event.id, 50), rsvp(event.id, 50)];
        assert!(check_event_capacity(&event, &existing, 500, None).is_ok());
    }

    #[test]
    fn test_excluding_supports_in_place_resize() {
        let event = event(10);
        let mine = rsvp(event.id, 4);
        let existing = vec![mine.clone(), rsvp(event.id, 4)];

        // Growing my party of 4 to 6: counted without the old row, 4 + 6 = 10.
        assert!(check_event_capacity(&event, &existing, 6, Some(mine.id)).is_ok());
        // Without the exclusion the same resize would double-count me.
        assert!(check_event_capacity(&event, &existing, 6, None).is_err());
    }

    #[test]
    fn test_cancelled_rsvps_do_not_count() {
        let event = event(10);
        let mut gone = rsvp(event.id, 8);
        gone.status = ReservationStatus::Cancelled;
        let existing = vec![gone, rsvp(event.id, 4)];

        assert!(check_event_capacity(&event, &existing, 6, None).is_ok());
    }

    #[test]
    fn test_other_events_do_not_count() {
        let event = event(10);
        let existing = vec![rsvp(Uuid::new_v4(), 9)];
        assert!(check_event_capacity(&event, &existing, 10, None).is_ok());
    }
}
