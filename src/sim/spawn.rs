//! Rock spawning
//!
//! Rocks enter from a random canvas edge and are aimed once, at the ship's
//! position at the moment they spawn.

use glam::Vec2;

use super::geometry::{RandomSource, unit_vector};
use super::state::{Canvas, GameState, Rock};

/// Canvas edge a rock enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Up,
    Down,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Up, Edge::Down, Edge::Left, Edge::Right];

    /// Uniformly pick one of the four edges
    pub fn random(rng: &mut impl RandomSource) -> Self {
        match rng.random_int(4) {
            1 => Edge::Up,
            2 => Edge::Down,
            3 => Edge::Left,
            _ => Edge::Right,
        }
    }
}

/// Random point on `edge`, with the free coordinate in `[1, dimension]`
pub fn spawn_point(edge: Edge, canvas: Canvas, rng: &mut impl RandomSource) -> Vec2 {
    let width = canvas.width as f32;
    let height = canvas.height as f32;
    match edge {
        Edge::Up => Vec2::new(rng.random_int(canvas.width) as f32, 0.0),
        Edge::Down => Vec2::new(rng.random_int(canvas.width) as f32, height),
        Edge::Left => Vec2::new(0.0, rng.random_int(canvas.height) as f32),
        Edge::Right => Vec2::new(width, rng.random_int(canvas.height) as f32),
    }
}

/// Create one rock aimed at the ship's current position
pub fn spawn_rock(state: &mut GameState, rng: &mut impl RandomSource) -> Rock {
    let edge = Edge::random(rng);
    let pos = spawn_point(edge, state.canvas, rng);
    let unit_vector = unit_vector(pos, state.ship.pos);
    if unit_vector == Vec2::ZERO {
        log::debug!("Rock spawned on top of the ship at {pos}, it will not move");
    }
    Rock {
        id: state.next_entity_id(),
        pos,
        unit_vector,
    }
}

/// Top the rock pool up to the configured target.
///
/// Adds exactly `target - live` rocks (none if already at or above target)
/// and returns how many were added.
pub fn spawn_rocks(state: &mut GameState, rng: &mut impl RandomSource) -> usize {
    let missing = state
        .rock_config
        .rocks_amount
        .saturating_sub(state.rocks.len());
    for _ in 0..missing {
        let rock = spawn_rock(state, rng);
        state.rocks.push(rock);
    }
    if missing > 0 {
        log::debug!("Spawned {} rocks (live: {})", missing, state.rocks.len());
    }
    missing
}
