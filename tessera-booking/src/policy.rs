use tessera_domain::{SeatId, Venue};

/// Strategy for picking the next best seat to claim.
///
/// Implementations must claim atomically through [`Venue::try_claim`] so two
/// concurrent selectors can never walk away with the same seat. A claimed
/// seat leaves the open pool immediately; the next call resumes past it.
pub trait SeatPolicy: Send + Sync {
    /// Claim and return the next best open seat, or `None` when the venue
    /// has nothing open.
    fn select(&self, venue: &Venue) -> Option<SeatId>;
}

/// Default policy: front row first, leftmost seat first.
///
/// Scans the grid in row-major order and claims the first open seat it
/// finds. Seat priority really depends on venue architecture; this stands in
/// until a richer policy is plugged in.
#[derive(Debug, Default)]
pub struct FrontRowFirst;

impl SeatPolicy for FrontRowFirst {
    fn select(&self, venue: &Venue) -> Option<SeatId> {
        if venue.open_seats() == 0 {
            return None;
        }
        for row in 0..venue.rows() {
            for col in 0..venue.columns() {
                let id = SeatId::new(row, col);
                if venue.try_claim(id) {
                    return Some(id);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_domain::SeatState;

    #[test]
    fn test_scans_row_major() {
        let venue = Venue::new(2, 2);
        let policy = FrontRowFirst;

        assert_eq!(policy.select(&venue), Some(SeatId::new(0, 0)));
        assert_eq!(policy.select(&venue), Some(SeatId::new(0, 1)));
        assert_eq!(policy.select(&venue), Some(SeatId::new(1, 0)));
        assert_eq!(policy.select(&venue), Some(SeatId::new(1, 1)));
        assert_eq!(policy.select(&venue), None);
    }

    #[test]
    fn test_claimed_seat_is_processing() {
        let venue = Venue::new(1, 1);
        let seat = FrontRowFirst.select(&venue).unwrap();
        assert_eq!(venue.seat_state(seat), Some(SeatState::Processing));
        assert_eq!(venue.open_seats(), 0);
    }

    #[test]
    fn test_skips_unavailable_seats() {
        let venue = Venue::new(1, 3);
        venue
            .transition(&[SeatId::new(0, 0), SeatId::new(0, 1)], SeatState::Held)
            .unwrap();

        assert_eq!(FrontRowFirst.select(&venue), Some(SeatId::new(0, 2)));
        assert_eq!(FrontRowFirst.select(&venue), None);
    }
}
