//! Collision detection between the character and obstacle barriers
//!
//! Everything is axis-aligned: the character is a square hit box and every
//! obstacle is two barrier rectangles framing its corridor.

use glam::Vec2;

use super::state::{Character, Obstacle, Playfield};
use crate::tuning::Tuning;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// A rectangle with no area (inverted or flat) never intersects anything
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Strict overlap; shared edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// The character's hit box
pub fn character_rect(character: &Character) -> Rect {
    Rect::from_center_size(
        Vec2::new(character.x, character.y),
        Vec2::splat(character.size),
    )
}

/// Upper and lower barrier of an obstacle
pub fn barrier_rects(obstacle: &Obstacle, playfield: &Playfield, tuning: &Tuning) -> [Rect; 2] {
    let half_width = tuning.obstacle_width / 2.0;
    let left = obstacle.x - half_width;
    let right = obstacle.x + half_width;

    let upper = Rect::from_min_max(
        Vec2::new(left, 0.0),
        Vec2::new(right, obstacle.gap_y - tuning.obstacle_half_gap),
    );
    let lower = Rect::from_min_max(
        Vec2::new(left, obstacle.gap_y + tuning.obstacle_half_gap),
        Vec2::new(right, playfield.height()),
    );
    [upper, lower]
}

/// First obstacle (in iteration order) whose barriers the character touches
pub fn first_hit<'a>(
    character: &Character,
    obstacles: &'a [Obstacle],
    playfield: &Playfield,
    tuning: &Tuning,
) -> Option<&'a Obstacle> {
    let hit_box = character_rect(character);
    obstacles.iter().find(|obstacle| {
        barrier_rects(obstacle, playfield, tuning)
            .iter()
            .any(|barrier| hit_box.intersects(barrier))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character_at(y: f32) -> Character {
        let mut character = Character::new(&Tuning::default());
        character.y = y;
        character
    }

    #[test]
    fn test_barrier_spans() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(390.0, 844.0);
        let [upper, lower] = barrier_rects(&Obstacle::new(1, 200.0, 300.0), &playfield, &tuning);

        assert_eq!(upper.min, Vec2::new(175.0, 0.0));
        assert_eq!(upper.max, Vec2::new(225.0, 120.0));
        assert_eq!(lower.min, Vec2::new(175.0, 480.0));
        assert_eq!(lower.max, Vec2::new(225.0, 844.0));
    }

    #[test]
    fn test_no_collision_inside_corridor() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(390.0, 844.0);
        // Obstacle right on top of the character horizontally
        let obstacles = [Obstacle::new(1, 132.0, 300.0)];

        // Hit box half size is 32, so centers in [152, 448] stay within [120, 480]
        for y in [152.0, 200.0, 300.0, 448.0] {
            assert!(first_hit(&character_at(y), &obstacles, &playfield, &tuning).is_none());
        }
    }

    #[test]
    fn test_collides_with_upper_and_lower() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(390.0, 844.0);
        let obstacles = [Obstacle::new(1, 132.0, 300.0)];

        assert!(first_hit(&character_at(151.0), &obstacles, &playfield, &tuning).is_some());
        assert!(first_hit(&character_at(449.0), &obstacles, &playfield, &tuning).is_some());
    }

    #[test]
    fn test_no_collision_without_horizontal_overlap() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(390.0, 844.0);
        // Barrier spans x 189..239, hit box ends at 164
        let obstacles = [Obstacle::new(1, 214.0, 300.0)];
        assert!(first_hit(&character_at(50.0), &obstacles, &playfield, &tuning).is_none());
        // Touching edges only: barrier 164..214
        let obstacles = [Obstacle::new(1, 189.0, 300.0)];
        assert!(first_hit(&character_at(50.0), &obstacles, &playfield, &tuning).is_none());
    }

    #[test]
    fn test_first_hit_in_iteration_order() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(390.0, 844.0);
        let obstacles = [
            Obstacle::new(1, 500.0, 300.0),
            Obstacle::new(2, 140.0, 300.0),
            Obstacle::new(3, 120.0, 300.0),
        ];
        let hit = first_hit(&character_at(100.0), &obstacles, &playfield, &tuning);
        assert_eq!(hit.map(|o| o.id), Some(2));
    }

    #[test]
    fn test_low_gap_leaves_empty_upper_barrier() {
        let tuning = Tuning::default();
        let playfield = Playfield::new(390.0, 844.0);
        let [upper, _] = barrier_rects(&Obstacle::new(1, 132.0, 150.0), &playfield, &tuning);
        assert!(upper.is_empty());
        assert!(!upper.intersects(&character_rect(&character_at(20.0))));
    }
}
