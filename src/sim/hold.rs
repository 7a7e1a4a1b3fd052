//! Hold-to-lift input tracking
//!
//! Turns the binary press/release stream into a hold duration, sampled on its
//! own cadence, and derives the lift it is worth.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Press state and the duration of the current hold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldState {
    holding: bool,
    pressed_at: Option<Duration>,
    duration: Duration,
}

impl HoldState {
    /// Begin (or restart) a hold at `now`
    pub fn press_start(&mut self, now: Duration) {
        self.holding = true;
        self.pressed_at = Some(now);
        self.duration = Duration::ZERO;
    }

    /// Release. Duration does not outlive the hold.
    pub fn press_end(&mut self) {
        self.holding = false;
        self.pressed_at = None;
        self.duration = Duration::ZERO;
    }

    /// Refresh the duration from the clock; no-op while released
    pub fn sample(&mut self, now: Duration) {
        if let Some(pressed_at) = self.pressed_at {
            self.duration = now.saturating_sub(pressed_at);
        }
    }

    #[inline]
    pub fn holding(&self) -> bool {
        self.holding
    }

    /// Last sampled duration, zero while released
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Lift for the current sample, zero while released
    pub fn lift(&self, tuning: &Tuning) -> f32 {
        if self.holding {
            lift_power(self.duration, tuning)
        } else {
            0.0
        }
    }
}

/// Upward acceleration for a hold of `duration`
///
/// Ramps from `base_lift` and saturates at [`Tuning::max_lift`] once the
/// multiplier reaches its cap.
pub fn lift_power(duration: Duration, tuning: &Tuning) -> f32 {
    let multiplier =
        (duration.as_secs_f32() * tuning.lift_build_up_rate).min(tuning.lift_cap_multiplier);
    tuning.base_lift + multiplier * tuning.lift_power_scale
}
