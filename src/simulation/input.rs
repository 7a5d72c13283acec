//! Steering requests from the input boundary

use crate::core::types::Direction;
use crate::world::state::WorldState;

/// Whether an actor travelling `current` may turn to `desired`
///
/// Only perpendicular turns are accepted; reversing onto the same axis (or
/// repeating the current direction) is ignored.
pub fn accepts_turn(current: Direction, desired: Direction) -> bool {
    current.is_perpendicular(desired)
}

/// Apply a steering request to every active actor; returns how many turned
pub fn steer_actors(world: &mut WorldState, desired: Direction) -> usize {
    let mut turned = 0;
    for (_, entity) in world.entities.iter_mut() {
        if !entity.active {
            continue;
        }
        if let Some(actor) = entity.as_actor_mut() {
            if accepts_turn(actor.direction, desired) {
                actor.direction = desired;
                turned += 1;
            }
        }
    }
    turned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::loader::load_level_from_str;

    #[test]
    fn test_reversal_rejected() {
        assert!(!accepts_turn(Direction::Right, Direction::Left));
        assert!(!accepts_turn(Direction::Up, Direction::Down));
        assert!(!accepts_turn(Direction::Up, Direction::Up));
        assert!(accepts_turn(Direction::Right, Direction::Up));
        assert!(accepts_turn(Direction::Down, Direction::Left));
    }

    #[test]
    fn test_steer_only_turns_actors() {
        let mut world = WorldState::default();
        load_level_from_str(&mut world, "P 0 0\nW 100 100\n");

        assert_eq!(steer_actors(&mut world, Direction::Left), 0);
        assert_eq!(world.actor().unwrap().direction, Direction::Right);

        assert_eq!(steer_actors(&mut world, Direction::Down), 1);
        assert_eq!(world.actor().unwrap().direction, Direction::Down);
    }
}
