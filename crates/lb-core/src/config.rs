//! Lift-bank configuration.

use crate::{CoreError, CoreResult, KinematicModel};

/// Everything needed to build a lift bank and drive a run.
///
/// Defaults reproduce the reference building: eight lifts of ten passengers
/// departing at 80 % load, one simulated hour, two to four dispatches per
/// tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BankConfig {
    /// Number of lifts in the bank.
    pub lift_count:          usize,

    /// Maximum simultaneous passengers per lift.
    pub capacity:            usize,

    /// Fraction of `capacity` on board that triggers departure, in `[0, 1]`.
    pub departure_threshold: f64,

    /// Physical parameters shared by every lift in the bank.
    pub kinematics:          KinematicModel,

    /// Tick budget for a full run.
    pub iterations:          u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed:                u64,

    /// Inclusive lower bound on holding-queue releases per tick.
    pub release_min:         u32,

    /// Inclusive upper bound on holding-queue releases per tick.
    pub release_max:         u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            lift_count:          8,
            capacity:            10,
            departure_threshold: 0.8,
            kinematics:          KinematicModel::default(),
            iterations:          60 * 60,
            seed:                0,
            release_min:         2,
            release_max:         4,
        }
    }
}

impl BankConfig {
    /// Validate every field; the first violation is returned.
    pub fn validate(&self) -> CoreResult<()> {
        if self.lift_count == 0 {
            return Err(CoreError::Config("lift_count must be at least 1".into()));
        }
        if self.capacity == 0 {
            return Err(CoreError::Config("capacity must be at least 1".into()));
        }
        validate_threshold(self.departure_threshold)?;
        self.kinematics.validate()?;
        if self.release_min > self.release_max {
            return Err(CoreError::Config(format!(
                "release range {}..={} is empty",
                self.release_min, self.release_max
            )));
        }
        Ok(())
    }
}

/// A departure threshold must be a finite fraction in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> CoreResult<()> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(CoreError::Threshold(threshold))
    }
}
