//! Passenger records and the traffic trace they are created from.

use crate::{CoreError, CoreResult, LiftId, PassengerId, Tick};

// ── TrafficRecord ─────────────────────────────────────────────────────────────

/// One entry of an externally supplied traffic trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficRecord {
    /// Tick at which the passenger walks into the lobby.
    pub arrival_time:      Tick,
    /// Requested floor; the lobby is floor 0, so this is always `>= 1`.
    pub destination_floor: u32,
}

impl TrafficRecord {
    pub fn new(arrival_time: u64, destination_floor: u32) -> Self {
        Self { arrival_time: Tick(arrival_time), destination_floor }
    }

    /// Check a whole trace: every destination above the lobby, arrival times
    /// non-decreasing in the order supplied.
    pub fn validate_trace(trace: &[TrafficRecord]) -> CoreResult<()> {
        let mut prev = Tick::ZERO;
        for (index, record) in trace.iter().enumerate() {
            if record.destination_floor == 0 {
                return Err(CoreError::Traffic {
                    index,
                    reason: "destination floor must be at least 1".into(),
                });
            }
            if record.arrival_time < prev {
                return Err(CoreError::Traffic {
                    index,
                    reason: format!(
                        "arrival time {} precedes previous arrival {}",
                        record.arrival_time, prev
                    ),
                });
            }
            prev = record.arrival_time;
        }
        Ok(())
    }
}

// ── Passenger ─────────────────────────────────────────────────────────────────

/// A passenger travelling from the lobby to `destination_floor`.
///
/// Every timestamp exists from creation and is filled in as the passenger
/// moves through the bank.  For a passenger that reached the completed set:
///
/// ```text
/// arrival_at_building ≤ enters_boarding_queue ≤ enters_lift
///     ≤ departure_time ≤ travel_completed_time ≤ return_to_lobby_time
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    pub id:                    PassengerId,
    pub destination_floor:     u32,
    pub arrival_at_building:   Tick,
    /// Lift whose boarding queue the passenger was assigned to.
    pub lift:                  Option<LiftId>,
    pub enters_boarding_queue: Option<Tick>,
    pub enters_lift:           Option<Tick>,
    pub departure_time:        Option<Tick>,
    /// Seconds from departure until the doors open at `destination_floor`.
    pub travel_time:           Option<f64>,
    /// `departure_time + travel_time`, in (fractional) ticks.
    pub travel_completed_time: Option<f64>,
    pub return_to_lobby_time:  Option<Tick>,
}

impl Passenger {
    pub fn new(id: PassengerId, record: TrafficRecord) -> Self {
        Self {
            id,
            destination_floor:     record.destination_floor,
            arrival_at_building:   record.arrival_time,
            lift:                  None,
            enters_boarding_queue: None,
            enters_lift:           None,
            departure_time:        None,
            travel_time:           None,
            travel_completed_time: None,
            return_to_lobby_time:  None,
        }
    }

    /// `true` once the carrying lift is back at the lobby.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.return_to_lobby_time.is_some()
    }

    /// Ticks spent in the lobby before boarding.
    pub fn wait_ticks(&self) -> Option<u64> {
        self.enters_lift.map(|t| t.since(self.arrival_at_building))
    }

    /// Seconds from walking into the lobby to reaching the destination floor.
    pub fn journey_secs(&self) -> Option<f64> {
        self.travel_completed_time
            .map(|t| t - self.arrival_at_building.as_secs_f64())
    }

    /// `true` if every timestamp is set and they are in lifecycle order.
    pub fn has_ordered_timestamps(&self) -> bool {
        let (Some(queued), Some(boarded), Some(departed), Some(done), Some(back)) = (
            self.enters_boarding_queue,
            self.enters_lift,
            self.departure_time,
            self.travel_completed_time,
            self.return_to_lobby_time,
        ) else {
            return false;
        };
        self.arrival_at_building <= queued
            && queued <= boarded
            && boarded <= departed
            && departed.as_secs_f64() <= done
            && done <= back.as_secs_f64()
    }
}
