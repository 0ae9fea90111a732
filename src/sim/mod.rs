//! Simulation module
//!
//! All gameplay logic lives here, with no rendering or platform dependencies:
//! - One `tick` per displayed frame
//! - State owned by the caller, randomness from the state's own RNG
//! - Side effects surface as `GameEvent`s for the host to drain

pub mod echo;
pub mod state;
pub mod tick;

pub use echo::{advance, echolocate, scan_hit};
pub use state::{FindKind, Food, GameEvent, GameState, MAX_EVENTS, Pulse, SimConfig, Sprite};
pub use tick::{TickInput, clamp_to_canvas, tick};
