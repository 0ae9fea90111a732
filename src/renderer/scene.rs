//! Frame assembly
//!
//! Draw order: background, food (only while visible), sprite, pulse ring.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

/// Width of the pulse outline
pub const PULSE_STROKE: f32 = 2.0;
/// Where the score text is anchored
pub const SCORE_ANCHOR: Vec2 = Vec2::new(10.0, 20.0);

/// One frame's worth of draw data
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Triangle list in canvas coordinates
    pub vertices: Vec<Vertex>,
    /// HUD text and its anchor
    pub score_text: String,
    pub score_anchor: Vec2,
    pub score_color: [f32; 4],
}

/// Build the draw data for the current state
pub fn build_frame(state: &GameState) -> Frame {
    let c = &state.config;
    let mut vertices = shapes::rect(
        Vec2::ZERO,
        Vec2::new(c.canvas_width, c.canvas_height),
        colors::SAND,
    );

    if state.food.visible {
        let r = state.food.radius();
        vertices.extend(shapes::circle(state.food.pos, r, colors::FOOD, shapes::segments_for(r)));
    }

    let r = state.sprite.radius();
    vertices.extend(shapes::circle(state.sprite.pos, r, colors::SPRITE, shapes::segments_for(r)));

    // Diameter 2 * radius around the sprite
    if state.pulse.active {
        vertices.extend(shapes::outline(
            state.sprite.pos,
            state.pulse.radius,
            PULSE_STROKE,
            colors::PULSE,
        ));
    }

    Frame {
        vertices,
        score_text: format!("Score: {}", state.score),
        score_anchor: SCORE_ANCHOR,
        score_color: colors::SCORE_TEXT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimConfig;

    fn count(frame: &Frame, color: [f32; 4]) -> usize {
        frame.vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_hidden_food_not_drawn() {
        let mut state = GameState::with_seed(SimConfig::default(), 8);
        state.food.visible = false;
        assert_eq!(count(&build_frame(&state), colors::FOOD), 0);

        state.food.visible = true;
        assert!(count(&build_frame(&state), colors::FOOD) > 0);
    }

    #[test]
    fn test_pulse_ring_only_while_active() {
        let mut state = GameState::with_seed(SimConfig::default(), 9);
        assert_eq!(count(&build_frame(&state), colors::PULSE), 0);

        state.pulse.active = true;
        state.pulse.radius = 40.0;
        let frame = build_frame(&state);
        let ring: Vec<&Vertex> = frame.vertices.iter().filter(|v| v.color == colors::PULSE).collect();
        assert!(!ring.is_empty());
        for v in ring {
            let d = Vec2::from(v.position).distance(state.sprite.pos);
            assert!((d - 40.0).abs() <= PULSE_STROKE / 2.0 + 1e-3);
        }
    }

    #[test]
    fn test_frame_uses_only_palette_colors() {
        let mut state = GameState::with_seed(SimConfig::default(), 12);
        state.food.visible = true;
        state.pulse.active = true;
        state.pulse.radius = 100.0;
        let palette = [colors::SAND, colors::FOOD, colors::SPRITE, colors::PULSE];
        for v in &build_frame(&state).vertices {
            assert!(palette.contains(&v.color), "unexpected color {:?}", v.color);
        }
    }

    #[test]
    fn test_score_text() {
        let mut state = GameState::with_seed(SimConfig::default(), 10);
        state.score = 7;
        let frame = build_frame(&state);
        assert_eq!(frame.score_text, "Score: 7");
        assert_eq!(frame.score_anchor, Vec2::new(10.0, 20.0));
    }
}
