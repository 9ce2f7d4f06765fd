//! Simulation state and entity types

use std::time::Duration;

use glam::{UVec2, Vec2};

use crate::settings::SimConfig;

/// Whether the simulation is still ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimStatus {
    Running,
    /// Terminal. Nothing moves again.
    Halted,
}

/// Why the simulation halted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The ship overlapped a rock
    Collision { rock_id: u32 },
    /// External teardown
    Stopped,
}

/// Record of the terminal transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt {
    /// Tick counter value when the halt happened
    pub tick: u64,
    pub reason: HaltReason,
}

/// Fixed drawing area. Coordinates span `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Inclusive bounds check on both axes
    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width as f32).contains(&pos.x) && (0.0..=self.height as f32).contains(&pos.y)
    }

    /// Top-left position that centers a box of `size` on the canvas
    pub fn centered(&self, size: UVec2) -> Vec2 {
        Vec2::new(
            (self.width as f32 - size.x as f32) / 2.0,
            (self.height as f32 - size.y as f32) / 2.0,
        )
    }
}

/// Held direction keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionFlags {
    /// Net displacement for one tick. Opposite flags cancel.
    pub fn step(&self) -> Vec2 {
        Vec2::new(
            self.right as i8 as f32 - self.left as i8 as f32,
            self.down as i8 as f32 - self.up as i8 as f32,
        )
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Top-left corner. Not clamped to the canvas.
    pub pos: Vec2,
    pub size: UVec2,
    /// Tick period in milliseconds
    pub speed_ms: u32,
    /// Flags snapshot taken at the start of the current tick
    pub directions: DirectionFlags,
}

impl Ship {
    /// Interval between ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.speed_ms as u64)
    }
}

/// Spawn parameters shared by every rock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockConfig {
    /// Live rock count to top up to every tick
    pub rocks_amount: usize,
    /// Distance travelled per tick
    pub rock_speed: f32,
    pub size: UVec2,
}

/// An inbound rock
#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Fixed at spawn, aimed at where the ship was then
    pub unit_vector: Vec2,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub canvas: Canvas,
    pub ship: Ship,
    pub rock_config: RockConfig,
    /// Live rocks, in spawn order
    pub rocks: Vec<Rock>,
    pub phase: SimStatus,
    /// Set once, on the terminal transition
    pub halted_at: Option<Halt>,
    /// Running ticks completed
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Fresh state with the ship centered and no rocks
    pub fn new(config: &SimConfig) -> Self {
        let canvas = config.canvas();
        let ship_size = UVec2::new(config.ship_width, config.ship_height);
        Self {
            canvas,
            ship: Ship {
                pos: canvas.centered(ship_size),
                size: ship_size,
                speed_ms: config.ship_speed_ms,
                directions: DirectionFlags::default(),
            },
            rock_config: config.rock_config(),
            rocks: Vec::with_capacity(config.rocks_amount),
            phase: SimStatus::Running,
            halted_at: None,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimStatus::Running
    }

    /// Enter the terminal state. Later calls keep the first halt.
    pub fn halt(&mut self, reason: HaltReason) {
        if self.phase == SimStatus::Halted {
            return;
        }
        self.phase = SimStatus::Halted;
        self.halted_at = Some(Halt {
            tick: self.time_ticks,
            reason,
        });
        log::info!("Simulation halted at tick {}: {:?}", self.time_ticks, reason);
    }
}
