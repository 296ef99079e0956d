use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct SlotsQuery {
    date: NaiveDate,
    party_size: i32,
}

#[derive(Debug, Serialize)]
struct SlotsResponse {
    slots: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/available-slots", get(available_slots))
}

async fn available_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let slots = state
        .engine
        .available_slots(query.date, query.party_size)
        .await?;

    // Labels are a display concern: the engine compares absolute instants,
    // the business offset only shapes what the guest sees.
    let offset = state.engine.schedule().business_offset();
    let slots = slots
        .iter()
        .map(|s| format_label(s.starts_at, offset))
        .collect();

    Ok(Json(SlotsResponse { slots }))
}

/// 12-hour label in the business timezone, e.g. "6:00pm".
fn format_label(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%-I:%M%P").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_label_uses_business_offset() {
        let instant = Utc.with_ymd_and_hms(2026, 9, 4, 23, 0, 0).unwrap();
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(format_label(instant, eastern), "6:00pm");
        assert_eq!(
            format_label(instant, FixedOffset::east_opt(0).unwrap()),
            "11:00pm"
        );
    }

    #[test]
    fn test_label_morning_has_no_leading_zero() {
        let instant = Utc.with_ymd_and_hms(2026, 9, 4, 9, 15, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_label(instant, utc), "9:15am");
    }
}
