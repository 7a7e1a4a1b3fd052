//! Hold Flap - a hold-to-lift side-scrolling arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacles, collisions, session state machine)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input plumbing and UI chrome live outside this crate; they read
//! [`sim::Snapshot`] and feed press/release events into [`sim::Session`].

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Reference gameplay constants (the defaults behind [`Tuning`])
pub mod consts {
    /// Physics tick cadence in milliseconds (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Obstacle spawn cadence in milliseconds
    pub const SPAWN_INTERVAL_MS: u64 = 3000;
    /// Hold-duration sampling cadence in milliseconds
    pub const HOLD_SAMPLE_INTERVAL_MS: u64 = 50;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.3;
    /// Velocity clamp (both directions), units per tick
    pub const MAX_VELOCITY: f32 = 8.0;

    /// Lift applied on the first tick of a hold
    pub const BASE_LIFT: f32 = 0.8;
    /// Multiplier growth per second of hold
    pub const LIFT_BUILD_UP_RATE: f32 = 2.0;
    /// Cap on the hold multiplier
    pub const LIFT_CAP_MULTIPLIER: f32 = 3.0;
    /// Lift gained per unit of multiplier
    pub const LIFT_POWER_SCALE: f32 = 0.3;

    /// Character spawn height
    pub const CHARACTER_START_Y: f32 = 200.0;
    /// Fixed horizontal center of the character
    pub const CHARACTER_X: f32 = 132.0; // Hit box spans x 100..164
    /// Side length of the square hit box
    pub const CHARACTER_SIZE: f32 = 64.0;

    /// Playable vertical range: y must stay within [TOP_MARGIN, height - BOTTOM_MARGIN]
    pub const TOP_MARGIN: f32 = 10.0;
    pub const BOTTOM_MARGIN: f32 = 70.0;

    /// Obstacle geometry and motion
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HALF_GAP: f32 = 180.0;
    pub const OBSTACLE_SPAWN_MARGIN: f32 = 50.0;
    pub const OBSTACLE_RETIRE_X: f32 = -50.0;
    pub const SCROLL_SPEED: f32 = 2.5;
    pub const GAP_Y_MIN: f32 = 150.0;
    pub const GAP_Y_MAX: f32 = 400.0;

    /// Reference playfield (portrait phone)
    pub const DEFAULT_WIDTH: f32 = 390.0;
    pub const DEFAULT_HEIGHT: f32 = 844.0;
    /// Smallest accepted playfield dimension
    pub const MIN_DIMENSION: f32 = 1.0;
}
