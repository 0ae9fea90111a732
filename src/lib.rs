//! Orca Echo - an echolocation food hunt
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (sprite, food, echolocation pulse, score)
//! - `input`: Serial payload parsing and the canonical control signal
//! - `platform`: Device link (serial reader feeding a single-consumer queue)
//! - `renderer`: Vertex generation for the presentation layer
//! - `audio`: Ambient loop and pulse sound cues
//! - `settings`: Runtime configuration

pub mod audio;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 500.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Sprite (orca) diameter
    pub const SPRITE_SIZE: f32 = 20.0;
    /// Food diameter
    pub const FOOD_SIZE: f32 = 10.0;

    /// Pulse radius growth per frame
    pub const PULSE_GROWTH: f32 = 5.0;
    /// Spacing of the echolocation scan points along y = 0
    pub const SCAN_STEP: f32 = 10.0;

    /// Full-scale reading of the joystick ADC (10-bit)
    pub const ADC_MAX: f32 = 1023.0;
    /// Serial link speed
    pub const BAUD_RATE: u32 = 115_200;

    /// Frame rate of the animation loop
    pub const FRAME_RATE: u32 = 60;
    /// Maximum frames to catch up in one wakeup
    pub const MAX_SUBSTEPS: u32 = 4;
}

/// Re-map `value` from `[in_min, in_max]` onto `[out_min, out_max]` (no clamping)
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) / (in_max - in_min) * (out_max - out_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_endpoints() {
        assert_eq!(map_range(0.0, 0.0, 1023.0, 0.0, 500.0), 0.0);
        assert_eq!(map_range(1023.0, 0.0, 1023.0, 0.0, 500.0), 500.0);
    }

    #[test]
    fn test_map_range_inverted_output() {
        assert_eq!(map_range(0.0, 0.0, 1023.0, 500.0, 0.0), 500.0);
        assert_eq!(map_range(1023.0, 0.0, 1023.0, 500.0, 0.0), 0.0);
    }
}
