//! Drawing surface abstraction
//!
//! The sim never draws. After each running tick the driver hands the state
//! to [`draw_frame`], which clears the canvas and fills one rectangle per
//! entity on whatever [`Surface`] is attached.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::sim::GameState;

/// Fill colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ship,
    Rock,
}

impl Color {
    /// CSS color string
    pub fn css(&self) -> &'static str {
        match self {
            Color::Ship => "red",
            Color::Rock => "green",
        }
    }
}

/// Something rectangles can be drawn on
pub trait Surface {
    /// Clear a region to the background
    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fill a solid rectangle
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
}

/// Draw only the ship, without clearing
pub fn draw_ship(state: &GameState, surface: &mut impl Surface) {
    let ship = &state.ship;
    surface.fill_rect(
        ship.pos.x,
        ship.pos.y,
        ship.size.x as f32,
        ship.size.y as f32,
        Color::Ship,
    );
}

/// Draw every live rock, without clearing
pub fn draw_rocks(state: &GameState, surface: &mut impl Surface) {
    let size = state.rock_config.size.as_vec2();
    for rock in &state.rocks {
        surface.fill_rect(rock.pos.x, rock.pos.y, size.x, size.y, Color::Rock);
    }
}

/// Full frame: clear the whole canvas, then ship, then rocks
pub fn draw_frame(state: &GameState, surface: &mut impl Surface) {
    surface.clear(
        0.0,
        0.0,
        state.canvas.width as f32,
        state.canvas.height as f32,
    );
    draw_ship(state, surface);
    draw_rocks(state, surface);
}
