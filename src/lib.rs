//! Rock Dodge - steer a square through a storm of inbound rocks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, culling, collisions)
//! - `input`: Keyboard events to direction flags
//! - `renderer`: Drawing surface abstraction (canvas on web, recording headless)
//! - `settings`: Construction-time configuration
//! - `driver`: Simulation context driven by any periodic timer

pub mod driver;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::Simulation;
pub use input::{DirectionKey, InputMapper, KeyEvent, SharedInput};
pub use settings::{ConfigError, SimConfig};

/// Reference configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: u32 = 900;
    pub const CANVAS_HEIGHT: u32 = 900;

    /// Ship defaults
    pub const SHIP_WIDTH: u32 = 5;
    pub const SHIP_HEIGHT: u32 = 5;
    /// Tick period in milliseconds. A faster ship ticks more often.
    pub const SHIP_SPEED_MS: u32 = 10;

    /// Rock defaults
    pub const ROCKS_AMOUNT: usize = 50;
    pub const ROCK_SPEED: f32 = 2.0;
    pub const ROCK_WIDTH: u32 = 5;
    pub const ROCK_HEIGHT: u32 = 5;

    /// Default RNG seed when none is configured
    pub const DEFAULT_SEED: u64 = 0x5EED_0F_D0D6E;

    /// Largest canvas or box dimension. Keeps every coordinate exact in `f32`.
    pub const MAX_DIMENSION: u32 = 1 << 24;
    /// Largest tick period, bounded by the browser timer's `i32` delay
    pub const MAX_TICK_PERIOD_MS: u32 = i32::MAX as u32;
}
