//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here; the host owns one `GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session-constant geometry and pacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Sprite diameter
    pub sprite_size: f32,
    /// Food diameter
    pub food_size: f32,
    /// Radius added to an active pulse each frame
    pub pulse_growth: f32,
    /// Spacing between scan points of the pulse hit test
    pub scan_step: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            sprite_size: SPRITE_SIZE,
            food_size: FOOD_SIZE,
            pulse_growth: PULSE_GROWTH,
            scan_step: SCAN_STEP,
        }
    }
}

impl SimConfig {
    /// Proximity threshold: half the summed diameters
    pub fn touch_distance(&self) -> f32 {
        (self.sprite_size + self.food_size) / 2.0
    }
}

/// The player's orca
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub pos: Vec2,
    pub size: f32,
}

impl Sprite {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// The hidden food item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Vec2,
    pub size: f32,
    /// Hidden between a find and the end of the pulse that follows it
    pub visible: bool,
}

impl Food {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// Echolocation pulse (expanding ring)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub active: bool,
    pub radius: f32,
    /// Set once this pulse's scan has resolved a find
    pub found: bool,
}

/// How a find was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindKind {
    /// Sprite touched the food
    Proximity,
    /// The pulse scan located it
    Echo,
}

/// Notable things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Idle -> Pulsing
    PulseStarted,
    /// Food found; `score` is the new total
    FoodFound { kind: FindKind, score: u32 },
    /// Pulsing -> Idle, food revealed
    PulseFaded,
}

/// Events kept between drains; older ones are dropped first
pub const MAX_EVENTS: usize = 256;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub sprite: Sprite,
    pub food: Food,
    pub pulse: Pulse,
    pub score: u32,
    /// Frame counter since last reset
    pub time_ticks: u64,
    /// Events recorded since the last drain, capped at `MAX_EVENTS`
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game seeded from the platform RNG
    pub fn new(config: SimConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Create a new game with a fixed seed
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        let mut state = Self {
            config,
            sprite: Sprite {
                pos: Vec2::ZERO,
                size: config.sprite_size,
            },
            food: Food {
                pos: Vec2::ZERO,
                size: config.food_size,
                visible: false,
            },
            pulse: Pulse::default(),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Start over: random sprite, fresh food, zero score
    ///
    /// Food stays hidden until the next pulse finishes.
    pub fn reset(&mut self) {
        let c = self.config;
        self.sprite.pos = self.random_pos(c.sprite_size);
        self.relocate_food();
        self.food.visible = false;
        self.pulse = Pulse::default();
        self.score = 0;
        self.time_ticks = 0;
        self.events.clear();
        log::info!("Game reset, sprite at ({:.0}, {:.0})", self.sprite.pos.x, self.sprite.pos.y);
    }

    /// Score a find and move the food; visibility is left to the caller
    pub fn resolve_find(&mut self, kind: FindKind) {
        self.score += 1;
        self.relocate_food();
        self.push_event(GameEvent::FoodFound {
            kind,
            score: self.score,
        });
        log::debug!(
            "Food found ({:?}), score {}, food moved to ({:.0}, {:.0})",
            kind,
            self.score,
            self.food.pos.x,
            self.food.pos.y
        );
    }

    /// Place food uniformly within the canvas, inset by its diameter
    pub fn relocate_food(&mut self) {
        self.food.pos = self.random_pos(self.config.food_size);
    }

    /// Record an event, discarding the oldest once `MAX_EVENTS` are pending
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Uniform point in `[margin, w - margin] x [margin, h - margin]`
    fn random_pos(&mut self, margin: f32) -> Vec2 {
        let c = self.config;
        let x = self.rng.random_range(margin..=(c.canvas_width - margin).max(margin));
        let y = self.rng.random_range(margin..=(c.canvas_height - margin).max(margin));
        Vec2::new(x, y)
    }
}
