//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Injected RNG only
//! - Stable iteration order (rock pool in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_collision};
pub use geometry::{RandomSource, ScriptedRandom, unit_vector};
pub use spawn::{Edge, spawn_point, spawn_rock, spawn_rocks};
pub use state::{
    Canvas, DirectionFlags, GameState, Halt, HaltReason, Rock, RockConfig, Ship, SimStatus,
};
pub use tick::{TickInput, move_rocks, move_ship, tick};
