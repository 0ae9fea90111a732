//! Echolocation pulse
//!
//! Two states: idle (`!pulse.active`) and pulsing. A held action starts a
//! pulse and re-runs the scan every frame; the radius keeps growing and is
//! never reset by the re-trigger.

use glam::Vec2;

use super::state::{FindKind, GameEvent, GameState, SimConfig};

/// Start a pulse if idle and run the hit scan
///
/// Returns true if this call resolved a find.
pub fn echolocate(state: &mut GameState) -> bool {
    if !state.pulse.active {
        state.pulse.active = true;
        state.pulse.found = false;
        state.push_event(GameEvent::PulseStarted);
        log::debug!("Pulse started at ({:.0}, {:.0})", state.sprite.pos.x, state.sprite.pos.y);
    }

    // One find per pulse
    if state.pulse.found {
        return false;
    }

    if scan_hit(&state.config, state.sprite.pos, state.food.pos, state.pulse.radius).is_some() {
        state.pulse.found = true;
        state.resolve_find(FindKind::Echo);
        state.food.visible = false;
        return true;
    }
    false
}

/// Scan points `(i, 0)` for `i = 0, step, 2*step, ... < canvas_width`
///
/// Returns the first point within `radius` of both the sprite and the food.
pub fn scan_hit(config: &SimConfig, sprite: Vec2, food: Vec2, radius: f32) -> Option<Vec2> {
    if config.scan_step <= 0.0 {
        return None;
    }
    let mut i = 0.0;
    while i < config.canvas_width {
        let point = Vec2::new(i, 0.0);
        if point.distance(sprite) < radius && point.distance(food) < radius {
            return Some(point);
        }
        i += config.scan_step;
    }
    None
}

/// Grow an active pulse; once it passes the canvas edge, go idle and reveal food
pub fn advance(state: &mut GameState) {
    if !state.pulse.active {
        return;
    }
    state.pulse.radius += state.config.pulse_growth;
    if state.pulse.radius > state.config.canvas_width {
        state.pulse.active = false;
        state.pulse.radius = 0.0;
        state.pulse.found = false;
        state.food.visible = true;
        state.push_event(GameEvent::PulseFaded);
        log::debug!("Pulse faded, food revealed");
    }
}
