//! Ship/rock overlap on the integer pixel grid
//!
//! Both boxes are floored to whole pixels before testing, so a box at
//! `(4.7, 2.2)` with size `5x5` covers cells `4..9` by `2..7`.

use glam::{IVec2, UVec2, Vec2};

use super::state::GameState;

/// Axis-aligned box covering `min .. min + size` (end exclusive) in pixel cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    pub min: IVec2,
    pub size: IVec2,
}

impl Aabb {
    /// Box with its top-left corner floored to the pixel grid.
    /// Coordinates and sizes beyond `i32` saturate.
    pub fn from_floored(pos: Vec2, size: UVec2) -> Self {
        Self {
            min: pos.floor().as_ivec2(),
            size: size.min(UVec2::splat(i32::MAX as u32)).as_ivec2(),
        }
    }

    /// Exclusive far corner, saturating at the edge of `i32`
    pub fn max(&self) -> IVec2 {
        self.min.saturating_add(self.size)
    }

    /// A box with no width or height covers no cells
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// True if any pixel cell is covered by both boxes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// ID of the first live rock (in pool order) overlapping the ship
pub fn first_collision(state: &GameState) -> Option<u32> {
    let ship = Aabb::from_floored(state.ship.pos, state.ship.size);
    let rock_size = state.rock_config.size;
    state
        .rocks
        .iter()
        .find(|rock| ship.overlaps(&Aabb::from_floored(rock.pos, rock_size)))
        .map(|rock| rock.id)
}
