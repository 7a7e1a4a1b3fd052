//! Session state machine
//!
//! A [`Session`] owns everything one run needs: character, hold state,
//! obstacles, score and the seeded RNG. The embedding application owns the
//! scheduler and routes fired tasks back through [`Session::dispatch`].

use std::collections::VecDeque;
use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::hold::HoldState;
use super::obstacles::ObstacleField;
use super::schedule::{Scheduler, TaskHandle};
use super::state::{
    Character, EndReason, Obstacle, ObstacleView, Playfield, SessionEvent, SessionPhase, Snapshot,
};
use super::tick::tick;
use crate::tuning::Tuning;

/// Oldest events are dropped past this many undrained entries
pub const MAX_PENDING_EVENTS: usize = 256;

/// Periodic work a session registers while active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    /// Physics, bounds, obstacles, collisions
    Tick,
    /// Add one obstacle
    Spawn,
    /// Refresh the hold duration
    SampleHold,
}

#[derive(Debug, Clone, Copy)]
struct SessionTimers {
    tick: TaskHandle,
    spawn: TaskHandle,
    sample_hold: TaskHandle,
}

/// One game, from start to collision
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) tuning: Tuning,
    pub(super) phase: SessionPhase,
    pub(super) score: u64,
    /// Ticks since the last start
    pub(super) ticks: u64,
    pub(super) character: Character,
    pub(super) hold: HoldState,
    pub(super) field: ObstacleField,
    pub(super) playfield: Playfield,
    events: VecDeque<SessionEvent>,
    seed: u64,
    rng: Pcg32,
    timers: Option<SessionTimers>,
}

impl Session {
    /// Create an idle session with the given seed
    ///
    /// Out-of-range tuning values are replaced (see [`Tuning::sanitized`]).
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            character: Character::new(&tuning),
            tuning,
            phase: SessionPhase::Idle,
            score: 0,
            ticks: 0,
            hold: HoldState::default(),
            field: ObstacleField::default(),
            playfield: Playfield::default(),
            events: VecDeque::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            timers: None,
        }
    }

    /// Start from Idle, or restart from Ended
    ///
    /// Resets the run and registers the tick, spawn and hold-sample tasks.
    /// Ignored while a run is already active.
    pub fn start<S: Scheduler<SessionTask>>(&mut self, scheduler: &mut S) {
        if self.phase == SessionPhase::Active {
            log::warn!("start() ignored: session already active");
            return;
        }
        let restart = self.phase == SessionPhase::Ended;

        self.score = 0;
        self.ticks = 0;
        self.character = Character::new(&self.tuning);
        self.hold = HoldState::default();
        self.field.clear();
        self.events.clear();
        self.phase = SessionPhase::Active;

        // The sampler runs for the whole run and idles while released, so the
        // first sample after a press lands 0-50 ms later, not exactly 50 ms.
        self.timers = Some(SessionTimers {
            tick: scheduler.schedule_repeating(self.tuning.tick_interval(), SessionTask::Tick),
            spawn: scheduler.schedule_repeating(self.tuning.spawn_interval(), SessionTask::Spawn),
            sample_hold: scheduler
                .schedule_repeating(self.tuning.hold_sample_interval(), SessionTask::SampleHold),
        });

        if restart {
            log::info!("Session restarted (seed {})", self.seed);
        } else {
            log::info!("Session started (seed {})", self.seed);
        }
    }

    /// Alias of [`Session::start`] for the game-over screen
    pub fn restart<S: Scheduler<SessionTask>>(&mut self, scheduler: &mut S) {
        self.start(scheduler);
    }

    /// End the run and cancel every timer it registered
    ///
    /// No-op unless active; the score is frozen at its current value.
    pub fn end<S: Scheduler<SessionTask>>(&mut self, reason: EndReason, scheduler: &mut S) {
        if self.phase != SessionPhase::Active {
            return;
        }
        if let Some(timers) = self.timers.take() {
            scheduler.cancel(timers.tick);
            scheduler.cancel(timers.spawn);
            scheduler.cancel(timers.sample_hold);
        }
        self.phase = SessionPhase::Ended;
        self.push_event(SessionEvent::Ended {
            reason,
            score: self.score,
        });
        log::info!(
            "Session ended ({reason:?}) after {} ticks, score {}",
            self.ticks,
            self.score
        );
    }

    /// Stop the run from outside (app backgrounded, window closed)
    pub fn stop<S: Scheduler<SessionTask>>(&mut self, scheduler: &mut S) {
        self.end(EndReason::Stopped, scheduler);
    }

    /// Route a fired task. Late firings after the run ended do nothing.
    pub fn dispatch<S: Scheduler<SessionTask>>(&mut self, task: SessionTask, scheduler: &mut S) {
        if self.phase != SessionPhase::Active {
            return;
        }
        match task {
            SessionTask::Tick => tick(self, scheduler),
            SessionTask::Spawn => self.spawn_obstacle(),
            SessionTask::SampleHold => self.hold.sample(scheduler.now()),
        }
    }

    /// Add one obstacle at the right edge (no-op unless active)
    pub fn spawn_obstacle(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        let id = self.field.spawn(&mut self.rng, &self.playfield, &self.tuning);
        self.push_event(SessionEvent::Spawned { id });
    }

    // === Input ===

    /// Input pressed at `now` (scheduler time)
    pub fn press_start(&mut self, now: Duration) {
        self.hold.press_start(now);
    }

    /// Input released
    pub fn press_end(&mut self) {
        self.hold.press_end();
    }

    /// Screen size changed; takes effect from the next tick or spawn
    pub fn set_playfield(&mut self, width: f32, height: f32) {
        self.playfield = Playfield::new(width, height);
    }

    // === Read surface ===

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn hold(&self) -> &HoldState {
        &self.hold
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Queue an event for the renderer, dropping the oldest past the cap
    pub(super) fn push_event(&mut self, event: SessionEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take the events queued since the last call
    ///
    /// Only the newest [`MAX_PENDING_EVENTS`] are kept between drains;
    /// `start()` discards whatever is left from the previous run.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            ticks: self.ticks,
            character_y: self.character.y,
            character_vel: self.character.vel,
            holding: self.hold.holding(),
            hold_secs: self.hold.duration().as_secs_f32(),
            obstacles: self
                .field
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.x,
                    gap_y: o.gap_y,
                })
                .collect(),
            playfield: self.playfield,
        }
    }
}
