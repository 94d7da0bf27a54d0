//! The `Lift` struct and its state transitions.

use std::collections::VecDeque;

use lb_core::config::validate_threshold;
use lb_core::kinematics::lobby_round_trip;
use lb_core::{CoreError, CoreResult, KinematicModel, LiftId, Passenger, Tick};
use tracing::{debug, warn};

use crate::LiftState;

/// Boarding-queue length above which a congestion warning is logged.
pub const CONGESTION_QUEUE_LEN: usize = 10;

/// A boarded passenger kept waiting longer than this forces departure.
pub const MAX_BOARDED_WAIT_TICKS: u64 = 10;

/// One lift car serving the lobby.
///
/// Physical parameters and capacity are fixed at construction; the rest is
/// per-tick state driven by the simulation loop.  `in_transit` never holds
/// more than `capacity` passengers and is empty whenever the lift is `Idle`
/// and nobody has boarded yet.
#[derive(Clone, Debug)]
pub struct Lift {
    id:                  LiftId,
    kinematics:          KinematicModel,
    capacity:            usize,
    departure_threshold: f64,

    state:               LiftState,
    boarding_queue:      VecDeque<Passenger>,
    in_transit:          Vec<Passenger>,
    next_arrival_time:   Tick,
    round_trip_time:     Option<f64>,

    /// Boarding-queue length sampled once per tick.
    queue_history:       Vec<usize>,
    /// `(seconds, floor)` for every stop the lift has made, from `(0, 0)`.
    location_history:    Vec<(f64, u32)>,
}

impl Lift {
    /// Build an idle lift at the lobby.
    pub fn new(
        id:                  LiftId,
        capacity:            usize,
        departure_threshold: f64,
        kinematics:          KinematicModel,
    ) -> CoreResult<Self> {
        if capacity == 0 {
            return Err(CoreError::Config(format!("{id}: capacity must be at least 1")));
        }
        validate_threshold(departure_threshold)?;
        kinematics.validate()?;

        Ok(Self {
            id,
            kinematics,
            capacity,
            departure_threshold,
            state:             LiftState::Idle,
            boarding_queue:    VecDeque::new(),
            in_transit:        Vec::with_capacity(capacity),
            next_arrival_time: Tick::ZERO,
            round_trip_time:   None,
            queue_history:     Vec::new(),
            location_history:  vec![(0.0, 0)],
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> LiftId {
        self.id
    }

    #[inline]
    pub fn kinematics(&self) -> &KinematicModel {
        &self.kinematics
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn departure_threshold(&self) -> f64 {
        self.departure_threshold
    }

    /// Change the departure threshold; rejects values outside `[0, 1]`.
    pub fn set_departure_threshold(&mut self, threshold: f64) -> CoreResult<()> {
        validate_threshold(threshold)?;
        self.departure_threshold = threshold;
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> LiftState {
        self.state
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.boarding_queue.len()
    }

    #[inline]
    pub fn in_transit_len(&self) -> usize {
        self.in_transit.len()
    }

    /// Queued plus on-board passengers.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.in_transit.len() + self.boarding_queue.len()
    }

    pub fn boarding_queue(&self) -> impl Iterator<Item = &Passenger> {
        self.boarding_queue.iter()
    }

    pub fn in_transit(&self) -> &[Passenger] {
        &self.in_transit
    }

    /// Tick at which the lift is (or was last) back at the lobby.
    #[inline]
    pub fn next_arrival_time(&self) -> Tick {
        self.next_arrival_time
    }

    /// Round-trip seconds of the most recent departure.
    #[inline]
    pub fn round_trip_time(&self) -> Option<f64> {
        self.round_trip_time
    }

    pub fn queue_history(&self) -> &[usize] {
        &self.queue_history
    }

    pub fn location_history(&self) -> &[(f64, u32)] {
        &self.location_history
    }

    /// Pending passengers in service order: riders first, then the queue.
    pub(crate) fn running_order(&self) -> impl Iterator<Item = &Passenger> {
        self.in_transit.iter().chain(self.boarding_queue.iter())
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Append `passenger` to the boarding queue.  Allowed in any state.
    pub fn queue_passenger(&mut self, mut passenger: Passenger, now: Tick) {
        passenger.enters_boarding_queue = Some(now);
        passenger.lift = Some(self.id);
        self.boarding_queue.push_back(passenger);

        let waiting = self.boarding_queue.len();
        if waiting > CONGESTION_QUEUE_LEN {
            warn!(lift = self.id.0, waiting, tick = now.0, "boarding queue congested");
        }
    }

    /// Board the head of the queue if the lift is idle and has room.
    ///
    /// Returns `true` if a passenger boarded.
    pub fn board_one(&mut self, now: Tick) -> bool {
        if !self.is_available() || self.in_transit.len() >= self.capacity {
            return false;
        }
        let Some(mut passenger) = self.boarding_queue.pop_front() else {
            return false;
        };
        passenger.enters_lift = Some(now);
        self.in_transit.push(passenger);
        true
    }

    /// Per-tick loading step for an idle lift.
    ///
    /// Boards at most one passenger, then leaves if the lift is full with
    /// people still queued, if the on-board count reaches
    /// `departure_threshold · capacity`, or if someone on board has waited
    /// more than [`MAX_BOARDED_WAIT_TICKS`].  An empty lift never leaves.
    ///
    /// Returns `true` if the lift departed.
    pub fn check_departure(&mut self, now: Tick) -> bool {
        if !self.is_available() {
            return false;
        }

        if !self.boarding_queue.is_empty() && !self.board_one(now) {
            // Queue waiting but no room: go now.
            return self.depart(now);
        }

        if self.in_transit.is_empty() {
            return false;
        }

        let threshold = self.departure_threshold * self.capacity as f64;
        if self.in_transit.len() as f64 >= threshold {
            return self.depart(now);
        }

        let longest_wait = self
            .in_transit
            .iter()
            .filter_map(|p| p.enters_lift)
            .min()
            .map(|boarded| now.since(boarded));
        if longest_wait.is_some_and(|w| w > MAX_BOARDED_WAIT_TICKS) {
            return self.depart(now);
        }

        false
    }

    /// Leave the lobby with everyone on board.
    ///
    /// Riders are served in ascending floor order; each gets its
    /// `departure_time`, `travel_time`, and `travel_completed_time`.  The
    /// lift returns at `ceil(now + RTT)`.  A lift with nobody aboard has no
    /// trip to make; the call is ignored and returns `false`.
    pub fn depart(&mut self, now: Tick) -> bool {
        if !self.is_available() || self.in_transit.is_empty() {
            return false;
        }
        self.state = LiftState::Departed;

        self.in_transit.sort_by_key(|p| p.destination_floor);
        let destinations: Vec<u32> =
            self.in_transit.iter().map(|p| p.destination_floor).collect();
        let floors = lobby_round_trip(&destinations);
        let times = self.kinematics.compute_trip(&floors);

        let start = now.as_secs_f64();
        for (passenger, &elapsed) in self.in_transit.iter_mut().zip(&times[1..]) {
            passenger.departure_time = Some(now);
            passenger.travel_time = Some(elapsed);
            passenger.travel_completed_time = Some(start + elapsed);
        }
        self.location_history
            .extend(floors.iter().zip(&times).map(|(&floor, &t)| (start + t, floor)));

        let rtt = times.last().copied().unwrap_or(0.0);
        self.round_trip_time = Some(rtt);
        // A zero-second trip still occupies the tick it departs on.
        self.next_arrival_time = Tick::ceil_secs(start + rtt).max(now + 1);

        debug!(
            lift = self.id.0,
            tick = now.0,
            riders = self.in_transit.len(),
            rtt,
            eta = self.next_arrival_time.0,
            "lift departed"
        );
        true
    }

    /// Return the riders if the lift is back at the lobby on exactly `now`.
    ///
    /// Arrival is tick-equality: the loop must visit every tick.
    pub fn check_arrival(&mut self, now: Tick) -> Vec<Passenger> {
        if self.is_available() || now != self.next_arrival_time {
            return Vec::new();
        }
        for passenger in &mut self.in_transit {
            passenger.return_to_lobby_time = Some(now);
        }
        self.state = LiftState::Idle;
        debug!(lift = self.id.0, tick = now.0, riders = self.in_transit.len(), "lift back at lobby");
        std::mem::take(&mut self.in_transit)
    }

    /// Sample the boarding-queue length into `queue_history`.
    pub fn record_queue_length(&mut self) {
        self.queue_history.push(self.boarding_queue.len());
    }
}
