//! Data-driven game balance
//!
//! Every knob of the simulation lives here so a deployment can override the
//! reference values from JSON without recompiling. Missing fields fall back to
//! [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load or validate a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Cadences ===
    pub tick_interval_ms: u64,
    pub spawn_interval_ms: u64,
    pub hold_sample_interval_ms: u64,

    // === Physics ===
    pub gravity: f32,
    pub max_velocity: f32,

    // === Lift ===
    pub base_lift: f32,
    pub lift_build_up_rate: f32,
    pub lift_cap_multiplier: f32,
    pub lift_power_scale: f32,

    // === Character ===
    pub character_start_y: f32,
    pub character_x: f32,
    pub character_size: f32,

    // === Bounds ===
    pub top_margin: f32,
    pub bottom_margin: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_half_gap: f32,
    pub spawn_margin: f32,
    pub retire_x: f32,
    pub scroll_speed: f32,
    pub gap_y_min: f32,
    pub gap_y_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            hold_sample_interval_ms: HOLD_SAMPLE_INTERVAL_MS,

            gravity: GRAVITY,
            max_velocity: MAX_VELOCITY,

            base_lift: BASE_LIFT,
            lift_build_up_rate: LIFT_BUILD_UP_RATE,
            lift_cap_multiplier: LIFT_CAP_MULTIPLIER,
            lift_power_scale: LIFT_POWER_SCALE,

            character_start_y: CHARACTER_START_Y,
            character_x: CHARACTER_X,
            character_size: CHARACTER_SIZE,

            top_margin: TOP_MARGIN,
            bottom_margin: BOTTOM_MARGIN,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_half_gap: OBSTACLE_HALF_GAP,
            spawn_margin: OBSTACLE_SPAWN_MARGIN,
            retire_x: OBSTACLE_RETIRE_X,
            scroll_speed: SCROLL_SPEED,
            gap_y_min: GAP_Y_MIN,
            gap_y_max: GAP_Y_MAX,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let intervals = [
            ("tick_interval_ms", self.tick_interval_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("hold_sample_interval_ms", self.hold_sample_interval_ms),
        ];
        for (field, ms) in intervals {
            if ms == 0 {
                return Err(invalid(field, "interval must be at least 1 ms"));
            }
        }

        let positive = [
            ("max_velocity", self.max_velocity),
            ("character_size", self.character_size),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_half_gap", self.obstacle_half_gap),
            ("scroll_speed", self.scroll_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("base_lift", self.base_lift),
            ("lift_build_up_rate", self.lift_build_up_rate),
            ("lift_cap_multiplier", self.lift_cap_multiplier),
            ("lift_power_scale", self.lift_power_scale),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("spawn_margin", self.spawn_margin),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be non-negative, got {value}")));
            }
        }

        let finite = [
            ("character_start_y", self.character_start_y),
            ("character_x", self.character_x),
            ("retire_x", self.retire_x),
            ("gap_y_min", self.gap_y_min),
            ("gap_y_max", self.gap_y_max),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }

        if self.gap_y_min > self.gap_y_max {
            return Err(invalid(
                "gap_y_min",
                format!("{} exceeds gap_y_max {}", self.gap_y_min, self.gap_y_max),
            ));
        }

        Ok(())
    }

    /// Replace every value [`Tuning::validate`] would reject
    ///
    /// Out-of-range numbers fall back to their defaults and an inverted gap
    /// range is swapped, so the simulation can always run.
    pub fn sanitized(self) -> Self {
        if self.validate().is_ok() {
            return self;
        }
        let defaults = Self::default();
        let interval = |ms: u64, fallback: u64| if ms == 0 { fallback } else { ms };
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let non_negative =
            |v: f32, fallback: f32| if v.is_finite() && v >= 0.0 { v } else { fallback };
        let finite = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };

        let gap_a = finite(self.gap_y_min, defaults.gap_y_min);
        let gap_b = finite(self.gap_y_max, defaults.gap_y_max);

        let sanitized = Self {
            tick_interval_ms: interval(self.tick_interval_ms, defaults.tick_interval_ms),
            spawn_interval_ms: interval(self.spawn_interval_ms, defaults.spawn_interval_ms),
            hold_sample_interval_ms: interval(
                self.hold_sample_interval_ms,
                defaults.hold_sample_interval_ms,
            ),

            gravity: non_negative(self.gravity, defaults.gravity),
            max_velocity: positive(self.max_velocity, defaults.max_velocity),

            base_lift: non_negative(self.base_lift, defaults.base_lift),
            lift_build_up_rate: non_negative(self.lift_build_up_rate, defaults.lift_build_up_rate),
            lift_cap_multiplier: non_negative(
                self.lift_cap_multiplier,
                defaults.lift_cap_multiplier,
            ),
            lift_power_scale: non_negative(self.lift_power_scale, defaults.lift_power_scale),

            character_start_y: finite(self.character_start_y, defaults.character_start_y),
            character_x: finite(self.character_x, defaults.character_x),
            character_size: positive(self.character_size, defaults.character_size),

            top_margin: non_negative(self.top_margin, defaults.top_margin),
            bottom_margin: non_negative(self.bottom_margin, defaults.bottom_margin),

            obstacle_width: positive(self.obstacle_width, defaults.obstacle_width),
            obstacle_half_gap: positive(self.obstacle_half_gap, defaults.obstacle_half_gap),
            spawn_margin: non_negative(self.spawn_margin, defaults.spawn_margin),
            retire_x: finite(self.retire_x, defaults.retire_x),
            scroll_speed: positive(self.scroll_speed, defaults.scroll_speed),
            gap_y_min: gap_a.min(gap_b),
            gap_y_max: gap_a.max(gap_b),
        };
        log::warn!("Replaced invalid tuning values with defaults");
        sanitized
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn hold_sample_interval(&self) -> Duration {
        Duration::from_millis(self.hold_sample_interval_ms)
    }

    /// Upper bound of [`crate::sim::lift_power`]
    pub fn max_lift(&self) -> f32 {
        self.base_lift + self.lift_cap_multiplier * self.lift_power_scale
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}
