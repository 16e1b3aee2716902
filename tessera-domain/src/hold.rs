use crate::seat::SeatId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a pending hold, unique for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoldId(pub u64);

impl fmt::Display for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a confirmed reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A time-boxed claim over a batch of seats for one requester.
///
/// The seats handed to the constructor must already have been transitioned
/// to `Held` by the venue; building a hold never touches venue state. A hold
/// lives in the booking service's pending registry until it is promoted
/// (gaining a reservation id and moving to the confirmed registry) or swept
/// after outliving the hold timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatHold {
    id: HoldId,
    requester: String,
    seats: Vec<SeatId>,
    created_at: DateTime<Utc>,
    reservation_id: Option<ReservationId>,
}

impl SeatHold {
    pub fn new(id: HoldId, requester: impl Into<String>, seats: Vec<SeatId>) -> Self {
        Self {
            id,
            requester: requester.into(),
            seats,
            created_at: Utc::now(),
            reservation_id: None,
        }
    }

    pub fn id(&self) -> HoldId {
        self.id
    }

    pub fn requester(&self) -> &str {
        &self.requester
    }

    /// The held seats, in the order they were claimed.
    pub fn seats(&self) -> &[SeatId] {
        &self.seats
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn reservation_id(&self) -> Option<ReservationId> {
        self.reservation_id
    }

    /// Stamp the reservation id after the venue has moved every seat in this
    /// hold to `Reserved`.
    ///
    /// # Panics
    ///
    /// Panics if the hold was already confirmed; a reservation id is set
    /// exactly once.
    pub fn confirm(&mut self, reservation_id: ReservationId) {
        assert!(
            self.reservation_id.is_none(),
            "hold {} confirmed twice",
            self.id
        );
        self.reservation_id = Some(reservation_id);
    }

    /// Age of this hold at `now`, for expiry checks.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hold() -> SeatHold {
        SeatHold::new(
            HoldId(7),
            "guest@example.com",
            vec![SeatId::new(0, 0), SeatId::new(0, 1)],
        )
    }

    #[test]
    fn test_new_hold_is_unconfirmed() {
        let hold = sample_hold();
        assert_eq!(hold.id(), HoldId(7));
        assert_eq!(hold.requester(), "guest@example.com");
        assert_eq!(hold.seats().len(), 2);
        assert!(hold.reservation_id().is_none());
    }

    #[test]
    fn test_confirm_sets_reservation_id() {
        let mut hold = sample_hold();
        hold.confirm(ReservationId(42));
        assert_eq!(hold.reservation_id(), Some(ReservationId(42)));
    }

    #[test]
    #[should_panic(expected = "confirmed twice")]
    fn test_confirm_twice_panics() {
        let mut hold = sample_hold();
        hold.confirm(ReservationId(1));
        hold.confirm(ReservationId(2));
    }

    #[test]
    fn test_age_grows_with_now() {
        let hold = sample_hold();
        let later = hold.created_at() + Duration::minutes(10);
        assert_eq!(hold.age_at(later), Duration::minutes(10));
    }
}
