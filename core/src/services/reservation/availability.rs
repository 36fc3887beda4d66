//! Stay date validation and overlap detection

use chrono::NaiveDate;

use crate::domain::entities::{Reservation, StayWindow};
use crate::errors::{DomainResult, ReservationError};

/// Reject stays that start in the past or do not span at least one night.
pub fn check_strange_date(
    today: NaiveDate,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> DomainResult<()> {
    if check_in < today {
        return Err(ReservationError::InvalidDateRange {
            check_in,
            check_out,
            reason: format!("check-in is before today ({})", today),
        }
        .into());
    }

    if check_out <= check_in {
        return Err(ReservationError::InvalidDateRange {
            check_in,
            check_out,
            reason: "check-out must be after check-in".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Fail with `ReservationConflict` naming the first existing reservation whose
/// `[check_in, check_out)` window overlaps the requested one.
pub fn check_available_date(
    existing: &[Reservation],
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> DomainResult<()> {
    let requested = StayWindow::new(check_in, check_out);

    match existing.iter().find(|r| r.window().overlaps(&requested)) {
        Some(conflict) => Err(ReservationError::ReservationConflict {
            room_id: conflict.room_id(),
            conflicting_id: conflict.id,
        }
        .into()),
        None => Ok(()),
    }
}
