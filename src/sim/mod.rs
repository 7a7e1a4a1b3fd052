//! Simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hold;
pub mod obstacles;
pub mod physics;
pub mod schedule;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Rect, barrier_rects, character_rect, first_hit};
pub use hold::{HoldState, lift_power};
pub use obstacles::ObstacleField;
pub use physics::integrate;
pub use schedule::{Scheduler, SerialScheduler, TaskHandle};
pub use session::{Session, SessionTask};
pub use state::{
    Character, EndReason, Obstacle, ObstacleView, Playfield, SessionEvent, SessionPhase, Snapshot,
};
pub use tick::tick;
