//! Fixed timestep simulation tick
//!
//! One call advances the active session by exactly one physics step.

use super::collision::first_hit;
use super::physics::integrate;
use super::schedule::Scheduler;
use super::session::{Session, SessionTask};
use super::state::{EndReason, SessionEvent, SessionPhase};

/// Advance the session by one fixed step
///
/// Order: physics, bounds, obstacles (advance, retire, score), collisions.
/// Leaving the playfield or hitting a barrier ends the session on this tick
/// with nothing else mutated afterwards.
pub fn tick<S: Scheduler<SessionTask>>(session: &mut Session, scheduler: &mut S) {
    if session.phase != SessionPhase::Active {
        return;
    }
    session.ticks += 1;

    integrate(&mut session.character, &session.hold, &session.tuning);

    if !session
        .playfield
        .contains_y(session.character.y, &session.tuning)
    {
        session.end(EndReason::OutOfBounds, scheduler);
        return;
    }

    session.field.advance(&session.tuning);
    for id in session.field.retire(&session.tuning) {
        session.score += 1;
        session.push_event(SessionEvent::Scored {
            id,
            score: session.score,
        });
    }

    let hit = first_hit(
        &session.character,
        session.field.obstacles(),
        &session.playfield,
        &session.tuning,
    )
    .map(|obstacle| obstacle.id);
    if let Some(id) = hit {
        log::debug!("Collision with obstacle {id}");
        session.end(EndReason::Collision, scheduler);
    }
}
