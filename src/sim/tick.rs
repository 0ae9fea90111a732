//! Per-frame simulation tick
//!
//! Order within a frame: move, clamp, proximity check, echolocation, pulse growth.

use glam::Vec2;

use super::echo;
use super::state::{FindKind, GameState, SimConfig};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Where the sprite should be this frame (None until the device has spoken)
    pub target: Option<Vec2>,
    /// Echolocation button held
    pub action: bool,
}

/// Snap a position back onto the canvas
///
/// Past the inner bound (`size - 2 * sprite_size`) the coordinate jumps to the
/// far edge, below zero it pins to zero.
pub fn clamp_to_canvas(pos: Vec2, config: &SimConfig) -> Vec2 {
    Vec2::new(
        clamp_axis(pos.x, config.canvas_width, config.sprite_size),
        clamp_axis(pos.y, config.canvas_height, config.sprite_size),
    )
}

fn clamp_axis(v: f32, extent: f32, sprite_size: f32) -> f32 {
    if v > extent - 2.0 * sprite_size {
        extent
    } else if v < 0.0 {
        0.0
    } else {
        v
    }
}

/// Advance the game by one frame
///
/// Events land in `state.events`; hosts should call `drain_events` each
/// frame, otherwise only the newest `MAX_EVENTS` are kept.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if let Some(target) = input.target {
        state.sprite.pos = target;
    }
    state.sprite.pos = clamp_to_canvas(state.sprite.pos, &state.config);

    // Touching the food counts regardless of pulse state
    if state.sprite.pos.distance(state.food.pos) < state.config.touch_distance() {
        state.resolve_find(FindKind::Proximity);
        state.food.visible = false;
    }

    if input.action {
        echo::echolocate(state);
    }

    echo::advance(state);
}
