use crate::seat::{Seat, SeatId, SeatState};
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

/// The venue owns every seat and the aggregate availability counters.
///
/// All mutation goes through [`Venue::transition`] (or the [`Venue::try_claim`]
/// check-and-swap), each of which applies under a single lock acquisition, so
/// a concurrent reader never observes a half-applied batch or counters out of
/// step with seat states. At rest the counters satisfy
/// `open + held + reserved == max_occupancy`; seats sitting in
/// [`SeatState::Processing`] are counted by none of the three.
#[derive(Debug)]
pub struct Venue {
    rows: u32,
    cols: u32,
    max_occupancy: usize,
    state: Mutex<VenueState>,
}

#[derive(Debug)]
struct VenueState {
    /// Flat row-major storage: index = row * cols + col.
    seats: Vec<Seat>,
    open: usize,
    held: usize,
    reserved: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum VenueError {
    #[error("unknown seat: {0}")]
    UnknownSeat(SeatId),

    #[error("no seats to release")]
    NothingToRelease,
}

impl Venue {
    /// Build a venue with fixed dimensions. Non-positive dimensions are
    /// clamped to 1, matching the smallest venue that can exist.
    pub fn new(rows: u32, cols: u32) -> Self {
        if rows == 0 || cols == 0 {
            warn!(rows, cols, "venue dimensions clamped to minimum of 1");
        }
        let rows = rows.max(1);
        let cols = cols.max(1);

        let mut seats = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                seats.push(Seat::new(row, col));
            }
        }

        let max_occupancy = seats.len();
        Self {
            rows,
            cols,
            max_occupancy,
            state: Mutex::new(VenueState {
                seats,
                open: max_occupancy,
                held: 0,
                reserved: 0,
            }),
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.cols
    }

    pub fn max_occupancy(&self) -> usize {
        self.max_occupancy
    }

    pub fn open_seats(&self) -> usize {
        self.lock().open
    }

    pub fn held_seats(&self) -> usize {
        self.lock().held
    }

    pub fn reserved_seats(&self) -> usize {
        self.lock().reserved
    }

    /// Bounds-checked lookup. Out-of-range positions yield `None`, never an
    /// error.
    pub fn seat_at(&self, row: u32, col: u32) -> Option<SeatId> {
        if row < self.rows && col < self.cols {
            Some(SeatId::new(row, col))
        } else {
            None
        }
    }

    /// Snapshot of one seat's current state.
    pub fn seat_state(&self, id: SeatId) -> Option<SeatState> {
        let index = self.index_of(id)?;
        Some(self.lock().seats[index].state())
    }

    /// Atomically claim a seat for assignment: `Open -> Processing` under the
    /// venue lock. Returns false when the seat is out of range or anything
    /// other than open, leaving it untouched. Two concurrent claimers can
    /// never both succeed on the same seat.
    pub fn try_claim(&self, id: SeatId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let mut state = self.lock();
        if state.seats[index].state() != SeatState::Open {
            return false;
        }
        state.seats[index].set_processing();
        state.open -= 1;
        true
    }

    /// Move a batch of seats to `target`, adjusting the counters to match.
    ///
    /// This is the sole mutation entry point. The whole batch is applied
    /// under one lock acquisition. A seat already in the target state is an
    /// idempotent skip, which tolerates a racing actor having advanced it
    /// first. `Processing` has no counter, so entering or leaving it only
    /// touches the counter on the other side of the move.
    ///
    /// # Panics
    ///
    /// Panics on an empty batch: internal callers always know which seats
    /// they are moving, so an empty batch is a caller bug, not a condition
    /// to recover from.
    pub fn transition(&self, seats: &[SeatId], target: SeatState) -> Result<(), VenueError> {
        assert!(!seats.is_empty(), "transition called with an empty batch");

        let mut state = self.lock();

        // Validate the whole batch up front so a bad id cannot leave the
        // batch half-applied.
        let mut indices = Vec::with_capacity(seats.len());
        for &id in seats {
            let index = self.index_of(id).ok_or(VenueError::UnknownSeat(id))?;
            indices.push(index);
        }

        for index in indices {
            let previous = state.seats[index].state();
            if previous == target {
                continue;
            }

            match target {
                SeatState::Open => {
                    state.seats[index].set_open();
                    state.open += 1;
                }
                SeatState::Held => {
                    state.seats[index].set_held();
                    state.held += 1;
                }
                SeatState::Reserved => {
                    state.seats[index].set_reserved();
                    state.reserved += 1;
                }
                SeatState::Processing => {
                    state.seats[index].set_processing();
                }
            }

            match previous {
                SeatState::Open => state.open -= 1,
                SeatState::Held => state.held -= 1,
                SeatState::Reserved => state.reserved -= 1,
                SeatState::Processing => {}
            }
        }

        Ok(())
    }

    /// Reopen a batch of seats. Unlike [`Venue::transition`] this is
    /// reachable from untrusted callers, so an empty batch is a domain
    /// error rather than a panic.
    pub fn release(&self, seats: &[SeatId]) -> Result<(), VenueError> {
        if seats.is_empty() {
            return Err(VenueError::NothingToRelease);
        }
        self.transition(seats, SeatState::Open)
    }

    fn index_of(&self, id: SeatId) -> Option<usize> {
        if id.row < self.rows && id.col < self.cols {
            Some((id.row * self.cols + id.col) as usize)
        } else {
            None
        }
    }

    fn lock(&self) -> MutexGuard<'_, VenueState> {
        self.state.lock().expect("venue lock poisoned")
    }
}
