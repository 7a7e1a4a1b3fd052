//! Obstacle spawning, scrolling and retirement

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Playfield};
use crate::tuning::Tuning;

/// Live obstacles, kept in spawn (= id) order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Next entity ID
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }
}

impl ObstacleField {
    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one obstacle just past the right edge with a random gap
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, playfield: &Playfield, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        let x = playfield.width() + tuning.spawn_margin;
        let gap_y = rng.random_range(tuning.gap_y_min..=tuning.gap_y_max);
        self.obstacles.push(Obstacle::new(id, x, gap_y));
        log::debug!("Spawned obstacle {id} at x={x:.1} gap_y={gap_y:.1}");
        id
    }

    /// Scroll every obstacle left by one tick
    pub fn advance(&mut self, tuning: &Tuning) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= tuning.scroll_speed;
        }
    }

    /// Remove obstacles that reached the retirement line
    ///
    /// Returns the IDs that scored on the way out. An obstacle is scored and
    /// removed in the same pass, so it can never be counted twice.
    pub fn retire(&mut self, tuning: &Tuning) -> Vec<u32> {
        let mut scored = Vec::new();
        self.obstacles.retain_mut(|obstacle| {
            if obstacle.x > tuning.retire_x {
                return true;
            }
            if !obstacle.scored {
                obstacle.scored = true;
                scored.push(obstacle.id);
            }
            log::debug!("Retired obstacle {}", obstacle.id);
            false
        });
        scored
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Drop every obstacle and restart ID allocation
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.next_id = self.next_id.max(obstacle.id + 1);
        self.obstacles.push(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_position_and_gap_range() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(390.0, 844.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::default();

        for expected_id in 1..=50 {
            let id = field.spawn(&mut rng, &playfield, &tuning);
            assert_eq!(id, expected_id);
        }
        for obstacle in field.obstacles() {
            assert_eq!(obstacle.x, 440.0);
            assert!((150.0..=400.0).contains(&obstacle.gap_y));
            assert!(!obstacle.scored);
        }
    }

    #[test]
    fn test_spawn_uses_current_width() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::default();
        field.spawn(&mut rng, &Playfield::new(300.0, 600.0), &tuning);
        field.spawn(&mut rng, &Playfield::new(800.0, 600.0), &tuning);
        assert_eq!(field.obstacles()[0].x, 350.0);
        assert_eq!(field.obstacles()[1].x, 850.0);
    }

    #[test]
    fn test_retires_after_expected_ticks() {
        let tuning = Tuning::default();
        for width in [390.0f32, 400.0, 401.0, 1024.0] {
            let mut rng = Pcg32::seed_from_u64(3);
            let mut field = ObstacleField::default();
            field.spawn(&mut rng, &Playfield::new(width, 844.0), &tuning);

            let expected = ((width + 100.0) / 2.5).ceil() as u32;
            let mut ticks = 0;
            while !field.is_empty() {
                field.advance(&tuning);
                field.retire(&tuning);
                ticks += 1;
                assert!(ticks <= expected, "width {width}: still alive after {ticks} ticks");
            }
            assert_eq!(ticks, expected, "width {width}");
        }
    }

    #[test]
    fn test_retire_scores_each_obstacle_once() {
        let tuning = Tuning::default();
        let mut field = ObstacleField::default();
        field.push(Obstacle::new(1, -60.0, 200.0));
        field.push(Obstacle::new(2, 100.0, 200.0));
        field.push(Obstacle {
            id: 3,
            x: -70.0,
            gap_y: 200.0,
            scored: true,
        });

        assert_eq!(field.retire(&tuning), vec![1]);
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles()[0].id, 2);
        assert!(field.retire(&tuning).is_empty());
    }

    #[test]
    fn test_advance_keeps_order() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = ObstacleField::default();
        let playfield = Playfield::default();
        field.spawn(&mut rng, &playfield, &tuning);
        field.advance(&tuning);
        field.spawn(&mut rng, &playfield, &tuning);
        field.advance(&tuning);

        let ids: Vec<u32> = field.obstacles().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(field.obstacles()[0].x < field.obstacles()[1].x);
    }

    #[test]
    fn test_clear_resets_ids() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = ObstacleField::default();
        field.spawn(&mut rng, &Playfield::default(), &tuning);
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.spawn(&mut rng, &Playfield::default(), &tuning), 1);
    }
}
