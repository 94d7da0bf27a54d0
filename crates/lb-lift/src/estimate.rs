//! Read-only estimators used by dispatch policies.
//!
//! All three reason about the lift's *running order*: riders already on
//! board followed by the boarding queue, split into capacity-sized batches.
//! Whole batches ahead of a newcomer are trips it must wait out; the
//! trailing partial batch (the remainder) is the group it would ride with.

use lb_core::Passenger;
use lb_core::kinematics::lobby_round_trip;

use crate::Lift;

impl Lift {
    /// Passengers a newly queued passenger would ride with: the remainder
    /// of the running order after removing whole capacity-sized batches.
    fn next_batch(&self) -> impl Iterator<Item = &Passenger> {
        let full = (self.pending_len() / self.capacity()) * self.capacity();
        self.running_order().skip(full)
    }

    /// Mean destination floor of the next batch, or `0.0` if that batch is
    /// empty (no pending passengers, or an exact multiple of capacity).
    pub fn average_pending_destination(&self) -> f64 {
        let (sum, count) = self
            .next_batch()
            .fold((0u64, 0usize), |(s, c), p| (s + u64::from(p.destination_floor), c + 1));
        if count == 0 { 0.0 } else { sum as f64 / count as f64 }
    }

    /// Seconds from the lobby to `candidate`'s floor if it joined the next
    /// batch, stopping on the way at every lower floor in that batch.
    ///
    /// Does not mutate the lift.
    pub fn estimated_trip_time(&self, candidate: &Passenger) -> f64 {
        let target = candidate.destination_floor;
        let mut floors: Vec<u32> = vec![0];
        floors.extend(
            self.next_batch()
                .map(|p| p.destination_floor)
                .filter(|&floor| floor < target),
        );
        floors[1..].sort_unstable();
        floors.push(target);

        self.kinematics().compute_trip(&floors).last().copied().unwrap_or(0.0)
    }

    /// Sum of the round-trip times of every complete batch ahead of the
    /// next one: roughly how long a newcomer waits before its trip starts.
    pub fn estimated_wait_time(&self) -> f64 {
        let capacity = self.capacity();
        let full = (self.pending_len() / capacity) * capacity;
        if full == 0 {
            return 0.0;
        }

        let ahead: Vec<u32> = self
            .running_order()
            .take(full)
            .map(|p| p.destination_floor)
            .collect();
        ahead
            .chunks(capacity)
            .map(|batch| {
                let floors = lobby_round_trip(batch);
                self.kinematics().compute_trip(&floors).last().copied().unwrap_or(0.0)
            })
            .sum()
    }
}
