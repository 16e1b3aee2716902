use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Position of a seat in the venue grid, row-major.
///
/// The string form `"row-col"` is the stable key used in logs and lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId {
    pub row: u32,
    pub col: u32,
}

impl SeatId {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Lifecycle state of a single seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatState {
    /// Available for claiming or holding.
    Open,
    /// Claimed by exactly one pending hold.
    Held,
    /// Permanently booked.
    Reserved,
    /// Transient marker while the selection path claims the seat.
    Processing,
}

/// The atomic reservable entity.
///
/// Seats are created once, at venue construction, and only their state
/// mutates afterwards. The state setters are pure assignments; the
/// aggregate counters live in the venue, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    id: SeatId,
    state: SeatState,
}

impl Seat {
    pub fn new(row: u32, col: u32) -> Self {
        Self {
            id: SeatId::new(row, col),
            state: SeatState::Open,
        }
    }

    pub fn id(&self) -> SeatId {
        self.id
    }

    pub fn state(&self) -> SeatState {
        self.state
    }

    pub fn set_open(&mut self) {
        self.state = SeatState::Open;
    }

    pub fn set_held(&mut self) {
        self.state = SeatState::Held;
    }

    pub fn set_reserved(&mut self) {
        self.state = SeatState::Reserved;
    }

    pub fn set_processing(&mut self) {
        self.state = SeatState::Processing;
    }
}

// Identity is the grid position alone; two seats with the same position are
// the same seat no matter what state each copy carries.
impl PartialEq for Seat {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Seat {}

impl Hash for Seat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seat_is_open() {
        let seat = Seat::new(3, 7);
        assert_eq!(seat.state(), SeatState::Open);
        assert_eq!(seat.id(), SeatId::new(3, 7));
    }

    #[test]
    fn test_seat_id_key_format() {
        assert_eq!(SeatId::new(0, 0).to_string(), "0-0");
        assert_eq!(SeatId::new(12, 4).to_string(), "12-4");
    }

    #[test]
    fn test_state_setters() {
        let mut seat = Seat::new(0, 0);

        seat.set_processing();
        assert_eq!(seat.state(), SeatState::Processing);

        seat.set_held();
        assert_eq!(seat.state(), SeatState::Held);

        seat.set_reserved();
        assert_eq!(seat.state(), SeatState::Reserved);

        seat.set_open();
        assert_eq!(seat.state(), SeatState::Open);
    }

    #[test]
    fn test_equality_ignores_state() {
        let mut a = Seat::new(1, 1);
        let b = Seat::new(1, 1);
        a.set_held();
        assert_eq!(a, b);
        assert_ne!(Seat::new(1, 2), b);
    }
}
