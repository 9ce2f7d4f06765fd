//! Fixed-period simulation tick
//!
//! One tick: move ship, spawn, move rocks and cull, check collisions.
//! Drawing happens outside the sim, see `crate::driver`.

use super::collision::first_collision;
use super::geometry::RandomSource;
use super::spawn::spawn_rocks;
use super::state::{DirectionFlags, GameState, HaltReason, Ship, SimStatus};

/// Input for a single tick, snapshotted once before any movement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub directions: DirectionFlags,
}

/// Step the ship one pixel per held direction. No wall clamping.
pub fn move_ship(ship: &mut Ship) {
    ship.pos += ship.directions.step();
}

/// Advance every rock along its unit vector, then drop the ones that left
/// the canvas. Returns how many were culled.
pub fn move_rocks(state: &mut GameState) -> usize {
    let speed = state.rock_config.rock_speed;
    let canvas = state.canvas;
    let before = state.rocks.len();
    state.rocks.retain_mut(|rock| {
        rock.pos += rock.unit_vector * speed;
        canvas.contains(rock.pos)
    });
    let culled = before - state.rocks.len();
    if culled > 0 {
        log::debug!("Culled {} rocks", culled);
    }
    culled
}

/// Advance the game state by one tick.
///
/// A halted state is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl RandomSource) -> SimStatus {
    if !state.is_running() {
        return SimStatus::Halted;
    }

    state.time_ticks += 1;
    state.ship.directions = input.directions;

    move_ship(&mut state.ship);
    spawn_rocks(state, rng);
    move_rocks(state);

    if let Some(rock_id) = first_collision(state) {
        state.halt(HaltReason::Collision { rock_id });
    }

    state.phase
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::geometry::ScriptedRandom;
    use crate::sim::state::Rock;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn held(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            directions: DirectionFlags {
                up,
                down,
                left,
                right,
            },
        }
    }

    /// Config with no rocks so ship movement can be observed in isolation
    fn empty_sky() -> SimConfig {
        SimConfig {
            rocks_amount: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_ship_moves_one_unit_per_flag() {
        let mut state = GameState::new(&empty_sky());
        let mut rng = Pcg32::seed_from_u64(1);
        let start = state.ship.pos;

        tick(&mut state, &held(false, false, false, true), &mut rng);
        assert_eq!(state.ship.pos, start + Vec2::new(1.0, 0.0));

        tick(&mut state, &held(true, false, true, false), &mut rng);
        assert_eq!(state.ship.pos, start + Vec2::new(0.0, -1.0));

        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.ship.pos, start + Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_ship_can_leave_canvas() {
        let mut state = GameState::new(&empty_sky());
        let mut rng = Pcg32::seed_from_u64(1);
        state.ship.pos = Vec2::new(0.0, 0.0);
        tick(&mut state, &held(true, false, true, false), &mut rng);
        assert_eq!(state.ship.pos, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_move_rocks_culls_out_of_bounds() {
        let mut state = GameState::new(&empty_sky());
        state.rocks = vec![
            Rock {
                id: 1,
                pos: Vec2::new(1.0, 10.0),
                unit_vector: Vec2::new(-1.0, 0.0),
            },
            Rock {
                id: 2,
                pos: Vec2::new(2.0, 10.0),
                unit_vector: Vec2::new(-1.0, 0.0),
            },
            Rock {
                id: 3,
                pos: Vec2::new(899.0, 10.0),
                unit_vector: Vec2::new(1.0, 0.0),
            },
            Rock {
                id: 4,
                pos: Vec2::new(10.0, 899.0),
                unit_vector: Vec2::new(0.0, 1.0),
            },
        ];
        // Speed 2: rock 1 -> x = -1 (out), rock 2 -> x = 0 (in, inclusive),
        // rock 3 -> x = 901 (out), rock 4 -> y = 901 (out)
        assert_eq!(move_rocks(&mut state), 3);
        let ids: Vec<u32> = state.rocks.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(state.rocks[0].pos, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_culled_rock_replaced_with_new_identity() {
        let config = SimConfig {
            rocks_amount: 1,
            ..Default::default()
        };
        let mut state = GameState::new(&config);
        state.rocks = vec![Rock {
            id: 100,
            pos: Vec2::new(1.0, 1.0),
            unit_vector: Vec2::new(-1.0, 0.0),
        }];

        let mut rng = ScriptedRandom::new([1, 450, 1, 450]);
        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(state.rocks.is_empty(), "rock left the canvas this tick");

        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.rocks.len(), 1);
        assert_ne!(state.rocks[0].id, 100);
    }

    #[test]
    fn test_rock_count_stays_at_target() {
        let mut state = GameState::new(&SimConfig::default());
        let mut rng = Pcg32::seed_from_u64(2024);
        for _ in 0..200 {
            let live_before = state.rocks.len();
            if tick(&mut state, &TickInput::default(), &mut rng) == SimStatus::Halted {
                break;
            }
            assert!(live_before <= state.rock_config.rocks_amount);
            assert!(state.rocks.len() <= state.rock_config.rocks_amount);
        }
    }

    #[test]
    fn test_halted_state_is_frozen() {
        let mut state = GameState::new(&SimConfig::default());
        let mut rng = Pcg32::seed_from_u64(5);
        state.halt(HaltReason::Stopped);
        let ship = state.ship.clone();

        let status = tick(&mut state, &held(true, false, false, false), &mut rng);
        assert_eq!(status, SimStatus::Halted);
        assert_eq!(state.ship, ship);
        assert!(state.rocks.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_determinism() {
        let config = SimConfig::default();
        let mut state1 = GameState::new(&config);
        let mut state2 = GameState::new(&config);
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        let inputs = [
            held(true, false, false, false),
            held(false, false, true, false),
            TickInput::default(),
            held(false, true, false, true),
        ];
        for input in inputs.iter().cycle().take(40) {
            tick(&mut state1, input, &mut rng1);
            tick(&mut state2, input, &mut rng2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ship, state2.ship);
        assert_eq!(state1.rocks, state2.rocks);
        assert_eq!(state1.phase, state2.phase);
    }

    proptest! {
        #[test]
        fn prop_ship_displacement(
            up: bool,
            down: bool,
            left: bool,
            right: bool,
            ticks in 1usize..20,
        ) {
            let mut state = GameState::new(&empty_sky());
            let mut rng = Pcg32::seed_from_u64(0);
            let input = held(up, down, left, right);
            for _ in 0..ticks {
                let before = state.ship.pos;
                tick(&mut state, &input, &mut rng);
                let delta = state.ship.pos - before;
                prop_assert_eq!(delta.x, right as i32 as f32 - left as i32 as f32);
                prop_assert_eq!(delta.y, down as i32 as f32 - up as i32 as f32);
            }
        }

        #[test]
        fn prop_rocks_follow_fixed_unit_vector(seed: u64) {
            let mut state = GameState::new(&SimConfig::default());
            let mut rng = Pcg32::seed_from_u64(seed);
            spawn_rocks(&mut state, &mut rng);
            let before = state.rocks.clone();
            let speed = state.rock_config.rock_speed;

            move_rocks(&mut state);

            for rock in &state.rocks {
                let old = before.iter().find(|r| r.id == rock.id).unwrap();
                prop_assert_eq!(rock.unit_vector, old.unit_vector);
                prop_assert_eq!(rock.pos, old.pos + old.unit_vector * speed);
                prop_assert!(state.canvas.contains(rock.pos));
            }
        }
    }
}
