//! Random integers and direction vectors
//!
//! Randomness is injected through [`RandomSource`] so spawning can be driven
//! by the seeded game RNG or by a scripted sequence in tests.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Integer in `[1, max]` inclusive. A `max` of 0 is treated as 1.
    fn random_int(&mut self, max: u32) -> u32;
}

impl RandomSource for Pcg32 {
    fn random_int(&mut self, max: u32) -> u32 {
        self.random_range(1..=max.max(1))
    }
}

/// Replays a fixed list of values, clamped into range.
///
/// Once the script runs dry every draw returns 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Values not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn random_int(&mut self, max: u32) -> u32 {
        self.values.pop_front().unwrap_or(1).clamp(1, max.max(1))
    }
}

/// Unit vector pointing from `from` toward `to`.
///
/// Coincident points have no direction; the result is then the zero vector
/// so nothing downstream ever sees NaN.
#[inline]
pub fn unit_vector(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
