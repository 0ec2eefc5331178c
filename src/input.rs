//! Raw pointer/key events to simulation commands

use glam::Vec2;

use crate::sim::{self, GameState};

/// A simulation command raised by the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Pointer, click or touch at canvas coordinates
    TapAt { x: f32, y: f32 },
    /// Any key; accessibility shortcut for a tap
    KeyPress,
    /// Canvas resized to the given CSS pixel size
    ViewportResized { width: f32, height: f32 },
}

/// Converts client-space event positions to canvas coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputRouter {
    /// Canvas top-left corner in client coordinates
    pub canvas_origin: Vec2,
}

impl InputRouter {
    pub fn new(canvas_origin: Vec2) -> Self {
        Self { canvas_origin }
    }

    /// Mouse/touch at client coordinates
    pub fn pointer(&self, client_x: f32, client_y: f32) -> Command {
        let p = Vec2::new(client_x, client_y) - self.canvas_origin;
        Command::TapAt { x: p.x, y: p.y }
    }

    pub fn key(&self) -> Command {
        Command::KeyPress
    }

    pub fn resized(&self, width: f32, height: f32) -> Command {
        Command::ViewportResized { width, height }
    }
}

/// Apply a command to the simulation. Returns the tapped chicken, if any.
pub fn dispatch(state: &mut GameState, command: Command, now: f64) -> Option<u32> {
    match command {
        Command::TapAt { x, y } => sim::tap_at(state, Vec2::new(x, y), now),
        Command::KeyPress => sim::key_press(state, now),
        Command::ViewportResized { width, height } => {
            sim::resize(state, width, height);
            None
        }
    }
}
