//! Session entities and render-facing types

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_DIMENSION};
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, never started
    #[default]
    Idle,
    /// Ticking
    Active,
    /// Terminal until restarted
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Character left the playable vertical range
    OutOfBounds,
    /// Character hit a barrier
    Collision,
    /// Stopped by the embedding application
    Stopped,
}

/// Notable things that happened during an update, drained by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Spawned { id: u32 },
    Scored { id: u32, score: u64 },
    Ended { reason: EndReason, score: u64 },
}

/// The player character. Only the vertical axis moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Vertical center (screen space, y grows downward)
    pub y: f32,
    /// Vertical velocity (units per tick, positive is downward)
    pub vel: f32,
    /// Fixed horizontal center
    pub x: f32,
    /// Side length of the square hit box
    pub size: f32,
}

impl Character {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            y: tuning.character_start_y,
            vel: 0.0,
            x: tuning.character_x,
            size: tuning.character_size,
        }
    }
}

/// A pair of barriers with a passable corridor between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Horizontal center, decreases every tick
    pub x: f32,
    /// Vertical center of the corridor
    pub gap_y: f32,
    /// Set once, when the obstacle retires
    pub scored: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, gap_y: f32) -> Self {
        Self {
            id,
            x,
            gap_y,
            scored: false,
        }
    }
}

/// Current screen size as reported by the embedding application
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    width: f32,
    height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Playfield {
    /// Build a playfield, clamping degenerate dimensions to [`MIN_DIMENSION`]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_dimension(width),
            height: sanitize_dimension(height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether a character center at `y` is inside the playable range
    pub fn contains_y(&self, y: f32, tuning: &Tuning) -> bool {
        !(y < tuning.top_margin || y > self.height - tuning.bottom_margin)
    }
}

fn sanitize_dimension(value: f32) -> f32 {
    // NaN and infinities land on the minimum too
    if value.is_finite() && value >= MIN_DIMENSION {
        value
    } else {
        if value != 0.0 {
            log::warn!("Clamping playfield dimension {value} to {MIN_DIMENSION}");
        }
        MIN_DIMENSION
    }
}

/// Obstacle as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub gap_y: f32,
}

/// Read-only per-frame view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub ticks: u64,
    pub character_y: f32,
    pub character_vel: f32,
    pub holding: bool,
    /// Hold duration in seconds, zero while released
    pub hold_secs: f32,
    /// Sorted by id (spawn order)
    pub obstacles: Vec<ObstacleView>,
    pub playfield: Playfield,
}
