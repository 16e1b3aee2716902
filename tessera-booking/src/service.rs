use crate::ids::IdSource;
use crate::policy::{FrontRowFirst, SeatPolicy};
use crate::validate::{EmailValidator, RequesterValidator};
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tessera_domain::{HoldId, ReservationId, SeatHold, SeatId, SeatState, Venue};
use tracing::{info, warn};

/// Default hold timeout when construction passes none, in minutes.
pub const DEFAULT_HOLD_TIMEOUT_MINUTES: i64 = 5;

/// Orchestrates the two-phase booking protocol over one venue.
///
/// Owns the pending and confirmed hold registries and the two id sequences.
/// `find_and_hold`, `promote` and `sweep_expired` serialize against each
/// other through a single service-level lock, so a hold is either swept and
/// removed or promoted and moved, never both, and no two holds can
/// interleave their seat claims. Coarse, but correct; the venue is small
/// enough that throughput is not the concern here.
///
/// Lock order is always service registry first, venue second.
pub struct BookingService {
    venue: Arc<Venue>,
    registries: Mutex<Registries>,
    hold_ids: IdSource,
    reservation_ids: IdSource,
    hold_timeout: Duration,
    policy: Box<dyn SeatPolicy>,
    validator: Box<dyn RequesterValidator>,
}

#[derive(Default)]
struct Registries {
    pending: HashMap<HoldId, SeatHold>,
    confirmed: HashMap<ReservationId, SeatHold>,
}

impl BookingService {
    /// Service with the default hold timeout of
    /// [`DEFAULT_HOLD_TIMEOUT_MINUTES`] minutes.
    pub fn new(venue: Arc<Venue>) -> Self {
        Self::with_timeout(venue, Duration::minutes(DEFAULT_HOLD_TIMEOUT_MINUTES))
    }

    /// Service with an explicit hold timeout. A non-positive timeout counts
    /// as unset and falls back to the default.
    pub fn with_timeout(venue: Arc<Venue>, hold_timeout: Duration) -> Self {
        let hold_timeout = if hold_timeout > Duration::zero() {
            hold_timeout
        } else {
            warn!(
                requested = %hold_timeout,
                "non-positive hold timeout, using default of {DEFAULT_HOLD_TIMEOUT_MINUTES} minutes"
            );
            Duration::minutes(DEFAULT_HOLD_TIMEOUT_MINUTES)
        };

        Self {
            venue,
            registries: Mutex::new(Registries::default()),
            hold_ids: IdSource::new(),
            reservation_ids: IdSource::new(),
            hold_timeout,
            policy: Box::new(FrontRowFirst),
            validator: Box::new(EmailValidator),
        }
    }

    /// Swap in an alternative seat selection policy.
    pub fn with_policy(mut self, policy: Box<dyn SeatPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Swap in an alternative requester validator.
    pub fn with_validator(mut self, validator: Box<dyn RequesterValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Inject explicit id sources for the hold and reservation sequences.
    pub fn with_id_sources(mut self, hold_ids: IdSource, reservation_ids: IdSource) -> Self {
        self.hold_ids = hold_ids;
        self.reservation_ids = reservation_ids;
        self
    }

    pub fn hold_timeout(&self) -> Duration {
        self.hold_timeout
    }

    /// Number of seats currently open. No side effects.
    pub fn available_seats(&self) -> usize {
        self.venue.open_seats()
    }

    /// Number of holds waiting to be promoted or swept.
    pub fn pending_holds(&self) -> usize {
        self.lock().pending.len()
    }

    /// Snapshot of a pending hold.
    pub fn hold(&self, id: HoldId) -> Option<SeatHold> {
        self.lock().pending.get(&id).cloned()
    }

    /// Snapshot of a confirmed reservation.
    pub fn reservation(&self, id: ReservationId) -> Option<SeatHold> {
        self.lock().confirmed.get(&id).cloned()
    }

    /// Claim and return the next best open seat according to the configured
    /// policy, or `None` when nothing is open. The seat comes back in
    /// `Processing` and stays claimed until the caller holds or releases it.
    pub fn select_best_seat(&self) -> Option<SeatId> {
        self.policy.select(&self.venue)
    }

    /// Claim the `count` best open seats for `requester` and register a hold
    /// over them.
    ///
    /// All or nothing: if the venue cannot supply `count` seats, every seat
    /// claimed so far is reopened and `None` comes back. Also `None` when
    /// `count` is zero or exceeds availability, or when the requester fails
    /// validation.
    pub fn find_and_hold(&self, count: usize, requester: &str) -> Option<SeatHold> {
        let mut registries = self.lock();

        if count == 0 || count > self.venue.open_seats() {
            return None;
        }
        if !self.validator.is_valid(requester) {
            return None;
        }

        let mut claimed: Vec<SeatId> = Vec::with_capacity(count);
        for _ in 0..count {
            match self.policy.select(&self.venue) {
                Some(seat) => claimed.push(seat),
                None => {
                    // Ran dry mid-claim; put everything back.
                    self.reopen(&claimed, "hold assembly ran out of open seats");
                    return None;
                }
            }
        }

        if let Err(err) = self.venue.transition(&claimed, SeatState::Held) {
            warn!(error = %err, "failed to hold claimed seats, reopening them");
            self.reopen(&claimed, "rollback of failed hold");
            return None;
        }

        let id = HoldId(self.hold_ids.next_id());
        let hold = SeatHold::new(id, requester, claimed);
        registries.pending.insert(id, hold.clone());
        info!(hold_id = %id, seats = hold.seats().len(), "seats held");
        Some(hold)
    }

    /// Promote a pending hold into a confirmed reservation.
    ///
    /// `None` when the requester fails validation, the hold id is unknown
    /// (never issued, already promoted, or already swept), or the hold
    /// belongs to a different requester. On success the hold moves to the
    /// confirmed registry under the returned reservation id.
    pub fn promote(&self, hold_id: HoldId, requester: &str) -> Option<ReservationId> {
        if !self.validator.is_valid(requester) {
            return None;
        }

        let mut registries = self.lock();

        match registries.pending.get(&hold_id) {
            Some(hold) if hold.requester() == requester => {}
            _ => return None,
        }
        let mut hold = registries.pending.remove(&hold_id)?;

        if let Err(err) = self.venue.transition(hold.seats(), SeatState::Reserved) {
            warn!(
                error = %err,
                hold_id = %hold_id,
                "failed to reserve held seats, reopening them"
            );
            self.reopen(hold.seats(), "rollback of failed promotion");
            return None;
        }

        let reservation_id = ReservationId(self.reservation_ids.next_id());
        hold.confirm(reservation_id);
        registries.confirmed.insert(reservation_id, hold);
        info!(hold_id = %hold_id, reservation_id = %reservation_id, "hold promoted");
        Some(reservation_id)
    }

    /// Drop every pending hold that has outlived the hold timeout, reopening
    /// its seats. Returns how many holds were swept. Meant to be driven
    /// periodically by an external scheduler.
    pub fn sweep_expired(&self) -> usize {
        let mut registries = self.lock();
        let now = Utc::now();

        let expired: Vec<HoldId> = registries
            .pending
            .values()
            .filter(|hold| hold.age_at(now) >= self.hold_timeout)
            .map(|hold| hold.id())
            .collect();

        for id in &expired {
            if let Some(hold) = registries.pending.remove(id) {
                if let Err(err) = self.venue.release(hold.seats()) {
                    warn!(error = %err, hold_id = %id, "failed to reopen expired hold");
                }
                info!(hold_id = %id, seats = hold.seats().len(), "hold expired");
            }
        }

        expired.len()
    }

    /// Best-effort reopen. Failure here can strand seats outside the open
    /// pool, so it is always logged.
    fn reopen(&self, seats: &[SeatId], context: &str) {
        if seats.is_empty() {
            return;
        }
        if let Err(err) = self.venue.release(seats) {
            warn!(error = %err, context, "failed to reopen seats");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registries> {
        self.registries.lock().expect("booking service lock poisoned")
    }
}
