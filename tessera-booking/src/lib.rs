//! Booking orchestration for the tessera seat reservation engine.
//!
//! [`BookingService`] drives the two-phase protocol on top of a
//! [`tessera_domain::Venue`]: claim the best open seats into a hold, then
//! either promote the hold into a reservation or let the expiry sweep
//! reopen its seats.

pub mod ids;
pub mod policy;
pub mod service;
pub mod validate;

pub use ids::IdSource;
pub use policy::{FrontRowFirst, SeatPolicy};
pub use service::{BookingService, DEFAULT_HOLD_TIMEOUT_MINUTES};
pub use validate::{EmailValidator, RequesterValidator};
