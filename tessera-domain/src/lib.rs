//! Domain model for the tessera seat reservation engine.
//!
//! A [`Venue`] owns a fixed grid of seats and is the only place seat state
//! can change. A [`SeatHold`] groups seats claimed for one requester until
//! it is promoted into a reservation or expires back to open.

pub mod hold;
pub mod seat;
pub mod venue;

pub use hold::{HoldId, ReservationId, SeatHold};
pub use seat::{Seat, SeatId, SeatState};
pub use venue::{Venue, VenueError};
