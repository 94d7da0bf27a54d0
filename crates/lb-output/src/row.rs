//! Plain data row types written by output backends.

use lb_core::Passenger;
use lb_sim::TickStats;

/// One completed passenger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerRow {
    pub passenger_id:          u32,
    pub lift_id:               u32,
    pub destination_floor:     u32,
    pub arrival_at_building:   u64,
    pub enters_boarding_queue: u64,
    pub enters_lift:           u64,
    pub departure_time:        u64,
    /// Seconds from departure to the destination floor.
    pub travel_time:           f64,
    pub travel_completed_time: f64,
    pub return_to_lobby_time:  u64,
}

impl PassengerRow {
    /// Flatten a passenger whose round trip is complete.
    ///
    /// Returns `None` if any lifecycle field is still unset.
    pub fn from_passenger(p: &Passenger) -> Option<Self> {
        Some(Self {
            passenger_id:          p.id.0,
            lift_id:               p.lift?.0,
            destination_floor:     p.destination_floor,
            arrival_at_building:   p.arrival_at_building.0,
            enters_boarding_queue: p.enters_boarding_queue?.0,
            enters_lift:           p.enters_lift?.0,
            departure_time:        p.departure_time?.0,
            travel_time:           p.travel_time?,
            travel_completed_time: p.travel_completed_time?,
            return_to_lobby_time:  p.return_to_lobby_time?.0,
        })
    }
}

/// Bank-wide counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub walk_ins:   u64,
    pub dispatched: u64,
    pub departures: u64,
    pub completed:  u64,
    pub holding:    u64,
    pub waiting:    u64,
    pub in_transit: u64,
}

impl From<&TickStats> for TickSummaryRow {
    fn from(s: &TickStats) -> Self {
        Self {
            tick:       s.tick.0,
            walk_ins:   s.walk_ins as u64,
            dispatched: s.dispatched as u64,
            departures: s.departures as u64,
            completed:  s.completed as u64,
            holding:    s.holding as u64,
            waiting:    s.waiting as u64,
            in_transit: s.in_transit as u64,
        }
    }
}
