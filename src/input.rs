//! Keyboard input to direction flags
//!
//! Key events may arrive at any time between ticks. They only ever write the
//! four flags; the tick reads a [`TickInput`] snapshot once before moving.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim::{DirectionFlags, TickInput};

/// The four steering keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionKey {
    Up,
    Down,
    Left,
    Right,
}

impl DirectionKey {
    /// Map a DOM `KeyboardEvent.code`. Other keys are ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(DirectionKey::Up),
            "ArrowDown" => Some(DirectionKey::Down),
            "ArrowLeft" => Some(DirectionKey::Left),
            "ArrowRight" => Some(DirectionKey::Right),
            _ => None,
        }
    }
}

/// A press or release of a steering key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(DirectionKey),
    Up(DirectionKey),
}

impl KeyEvent {
    pub fn key_down(code: &str) -> Option<Self> {
        DirectionKey::from_code(code).map(KeyEvent::Down)
    }

    pub fn key_up(code: &str) -> Option<Self> {
        DirectionKey::from_code(code).map(KeyEvent::Up)
    }
}

fn set_flag(flags: &mut DirectionFlags, key: DirectionKey, held: bool) {
    match key {
        DirectionKey::Up => flags.up = held,
        DirectionKey::Down => flags.down = held,
        DirectionKey::Left => flags.left = held,
        DirectionKey::Right => flags.right = held,
    }
}

/// Single-threaded flag set, owned next to the simulation
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    flags: DirectionFlags,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(key) => set_flag(&mut self.flags, key, true),
            KeyEvent::Up(key) => set_flag(&mut self.flags, key, false),
        }
    }

    pub fn flags(&self) -> DirectionFlags {
        self.flags
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            directions: self.flags,
        }
    }
}

/// Flag set that can be written from an input thread while another thread ticks
#[derive(Debug, Default)]
pub struct SharedInput {
    up: AtomicBool,
    down: AtomicBool,
    left: AtomicBool,
    right: AtomicBool,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, key: DirectionKey) -> &AtomicBool {
        match key {
            DirectionKey::Up => &self.up,
            DirectionKey::Down => &self.down,
            DirectionKey::Left => &self.left,
            DirectionKey::Right => &self.right,
        }
    }

    pub fn apply(&self, event: KeyEvent) {
        match event {
            KeyEvent::Down(key) => self.flag(key).store(true, Ordering::Relaxed),
            KeyEvent::Up(key) => self.flag(key).store(false, Ordering::Relaxed),
        }
    }

    /// Each flag is read once; the tick never sees a flag change mid-step
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            directions: DirectionFlags {
                up: self.up.load(Ordering::Relaxed),
                down: self.down.load(Ordering::Relaxed),
                left: self.left.load(Ordering::Relaxed),
                right: self.right.load(Ordering::Relaxed),
            },
        }
    }
}
