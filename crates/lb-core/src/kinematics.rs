//! Bang-coast-bang travel-time model for a lift car.
//!
//! A trip between two floors accelerates at `acceleration` up to
//! `max_velocity`, cruises, then decelerates symmetrically.  Short trips
//! never reach cruise speed and follow a triangular velocity profile.
//! Each leg also pays the door dwell twice (close at the origin, open at
//! the destination).
//!
//! ```text
//!   d = floor_height · |Δfloor|
//!   d_c = v² / 2a,  t_c = v / a
//!
//!   d >  2·d_c :  t = 2·t_c + (d − 2·d_c) / v + 2·t_door
//!   d <= 2·d_c :  t = 2·√(d / a)             + 2·t_door
//! ```
//!
//! The two branches meet at `d = 2·d_c`, so travel time is continuous and
//! non-decreasing in distance.

/// Physical parameters of a lift car plus the travel-time model over them.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicModel {
    /// Cruise speed, metres per second.
    pub max_velocity:    f64,
    /// Acceleration and deceleration, metres per second squared.
    pub acceleration:    f64,
    /// Seconds spent on each door cycle (one close + one open per leg).
    pub door_dwell_time: f64,
    /// Metres between adjacent floors.
    pub floor_height:    f64,
}

impl Default for KinematicModel {
    fn default() -> Self {
        Self {
            max_velocity:    5.0,
            acceleration:    1.0,
            door_dwell_time: 0.0,
            floor_height:    4.0,
        }
    }
}

impl KinematicModel {
    /// Construct and validate a model.
    pub fn new(
        max_velocity:    f64,
        acceleration:    f64,
        door_dwell_time: f64,
        floor_height:    f64,
    ) -> crate::CoreResult<Self> {
        let model = Self { max_velocity, acceleration, door_dwell_time, floor_height };
        model.validate()?;
        Ok(model)
    }

    /// Reject parameters for which the model is undefined.
    pub fn validate(&self) -> crate::CoreResult<()> {
        positive("max_velocity", self.max_velocity)?;
        positive("acceleration", self.acceleration)?;
        positive("floor_height", self.floor_height)?;
        if !self.door_dwell_time.is_finite() || self.door_dwell_time < 0.0 {
            return Err(crate::CoreError::Kinematics {
                name:   "door_dwell_time",
                value:  self.door_dwell_time,
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Distance needed to reach `max_velocity` from rest.
    #[inline]
    pub fn critical_distance(&self) -> f64 {
        self.max_velocity * self.max_velocity / (2.0 * self.acceleration)
    }

    /// Time needed to reach `max_velocity` from rest.
    #[inline]
    pub fn critical_time(&self) -> f64 {
        self.max_velocity / self.acceleration
    }

    /// Seconds to travel `floor_delta` floors, doors included.
    ///
    /// The sign of `floor_delta` is ignored; `travel_time(0)` is the bare
    /// door cycle `2 · door_dwell_time`.
    pub fn travel_time(&self, floor_delta: i64) -> f64 {
        let distance = self.floor_height * floor_delta.unsigned_abs() as f64;
        let doors = 2.0 * self.door_dwell_time;
        let ramp = 2.0 * self.critical_distance();

        if distance > ramp {
            2.0 * self.critical_time() + (distance - ramp) / self.max_velocity + doors
        } else {
            doors + 2.0 * (distance / self.acceleration).sqrt()
        }
    }

    /// Cumulative elapsed seconds at each stop of `floors`.
    ///
    /// `floors[0]` is the starting position, so the first entry is always
    /// `0.0`.  Floors are visited in the order given.  An empty input yields
    /// an empty output.
    pub fn compute_trip(&self, floors: &[u32]) -> Vec<f64> {
        let Some(&first) = floors.first() else {
            return Vec::new();
        };
        let mut times = Vec::with_capacity(floors.len());
        let mut elapsed = 0.0;
        let mut prev = first;
        times.push(elapsed);
        for &floor in &floors[1..] {
            elapsed += self.travel_time(i64::from(floor) - i64::from(prev));
            times.push(elapsed);
            prev = floor;
        }
        times
    }

    /// Round-trip seconds for a batch: lobby, every destination in ascending
    /// order, back to the lobby.
    pub fn round_trip_time(&self, destinations: &[u32]) -> f64 {
        let floors = lobby_round_trip(destinations);
        self.compute_trip(&floors).last().copied().unwrap_or(0.0)
    }
}

/// `[0, sorted destinations…, 0]`: the stop sequence of one lobby dispatch.
pub fn lobby_round_trip(destinations: &[u32]) -> Vec<u32> {
    let mut floors = Vec::with_capacity(destinations.len() + 2);
    floors.push(0);
    floors.extend_from_slice(destinations);
    floors[1..].sort_unstable();
    floors.push(0);
    floors
}

fn positive(name: &'static str, value: f64) -> crate::CoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(crate::CoreError::Kinematics {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}
