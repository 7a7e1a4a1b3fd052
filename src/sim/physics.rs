//! Vertical integration of the character

use super::hold::HoldState;
use super::state::Character;
use crate::tuning::Tuning;

/// Advance the character by one tick under gravity and the current lift
///
/// Velocity ends inside `[-max_velocity, max_velocity]`. Position is left
/// unclamped; leaving the playfield is a session rule, not a physics one.
pub fn integrate(character: &mut Character, hold: &HoldState, tuning: &Tuning) {
    character.vel += tuning.gravity;
    character.vel -= hold.lift(tuning);
    character.vel = character.vel.clamp(-tuning.max_velocity, tuning.max_velocity);
    character.y += character.vel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;

    #[test]
    fn test_gravity_only_tick() {
        let tuning = Tuning::default();
        let mut character = Character::new(&tuning);
        integrate(&mut character, &HoldState::default(), &tuning);
        assert!((character.vel - 0.3).abs() < 1e-6);
        assert!((character.y - 200.3).abs() < 1e-4);
    }

    #[test]
    fn test_hold_lifts_character() {
        let tuning = Tuning::default();
        let mut character = Character::new(&tuning);
        let mut hold = HoldState::default();
        hold.press_start(Duration::ZERO);
        integrate(&mut character, &hold, &tuning);
        // 0.3 - 0.8
        assert!((character.vel + 0.5).abs() < 1e-6);
        assert!(character.y < 200.0);
    }

    #[test]
    fn test_velocity_clamped_downward() {
        let tuning = Tuning::default();
        let mut character = Character::new(&tuning);
        for _ in 0..100 {
            integrate(&mut character, &HoldState::default(), &tuning);
        }
        assert_eq!(character.vel, tuning.max_velocity);
    }

    #[test]
    fn test_velocity_clamped_upward() {
        let tuning = Tuning::default();
        let mut character = Character::new(&tuning);
        let mut hold = HoldState::default();
        hold.press_start(Duration::ZERO);
        hold.sample(Duration::from_secs(3));
        for _ in 0..100 {
            integrate(&mut character, &hold, &tuning);
        }
        assert_eq!(character.vel, -tuning.max_velocity);
    }

    proptest! {
        #[test]
        fn prop_velocity_stays_clamped(
            start_vel in -50.0f32..50.0,
            steps in proptest::collection::vec((any::<bool>(), 0u64..4000), 1..200),
        ) {
            let tuning = Tuning::default();
            let mut character = Character::new(&tuning);
            character.vel = start_vel;
            let mut hold = HoldState::default();
            for (pressed, held_ms) in steps {
                if pressed {
                    hold.press_start(Duration::ZERO);
                    hold.sample(Duration::from_millis(held_ms));
                } else {
                    hold.press_end();
                }
                integrate(&mut character, &hold, &tuning);
                prop_assert!(character.vel.abs() <= tuning.max_velocity);
            }
        }
    }
}
