//! Headless surface that records draw calls
//!
//! Every `clear` starts a new frame, so `commands` always holds the most
//! recent frame only.

use super::{Color, Surface};

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    /// Calls since the last clear, including that clear
    pub commands: Vec<DrawCommand>,
    /// Number of clears seen
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles of the given color in the current frame
    pub fn rects(&self, color: Color) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |cmd| {
                matches!(cmd, DrawCommand::FillRect { color: fill, .. } if *fill == color)
            })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_frame;
    use crate::settings::SimConfig;
    use crate::sim::{GameState, Rock};
    use glam::Vec2;

    #[test]
    fn test_frame_layout() {
        let mut state = GameState::new(&SimConfig::default());
        state.rocks = vec![
            Rock {
                id: 1,
                pos: Vec2::new(10.0, 20.0),
                unit_vector: Vec2::X,
            },
            Rock {
                id: 2,
                pos: Vec2::new(30.0, 40.0),
                unit_vector: Vec2::Y,
            },
        ];

        let mut surface = RecordingSurface::new();
        draw_frame(&state, &mut surface);

        assert_eq!(surface.frames, 1);
        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                x: 0.0,
                y: 0.0,
                width: 900.0,
                height: 900.0,
            }
        );
        assert_eq!(
            surface.commands[1],
            DrawCommand::FillRect {
                x: 447.5,
                y: 447.5,
                width: 5.0,
                height: 5.0,
                color: Color::Ship,
            }
        );
        assert_eq!(surface.rects(Color::Ship).count(), 1);
        assert_eq!(surface.rects(Color::Rock).count(), 2);
        assert_eq!(surface.commands.len(), 4);
    }

    #[test]
    fn test_clear_starts_new_frame() {
        let mut surface = RecordingSurface::new();
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, Color::Rock);
        surface.clear(0.0, 0.0, 10.0, 10.0);
        assert_eq!(surface.commands.len(), 1);
        assert_eq!(surface.rects(Color::Rock).count(), 0);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Color::Ship.css(), "red");
        assert_eq!(Color::Rock.css(), "green");
    }
}
