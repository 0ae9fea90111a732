//! Runtime configuration
//!
//! Read once at startup from an optional JSON file; missing keys take defaults.
//! Nothing is written back.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{BAUD_RATE, FRAME_RATE};
use crate::sim::SimConfig;

/// Device link options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Serial device node, e.g. `/dev/ttyACM0`
    pub device_path: Option<PathBuf>,
    pub baud_rate: u32,
    /// Open the configured device at startup without waiting for a click
    pub auto_connect: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            device_path: None,
            baud_rate: BAUD_RATE,
            auto_connect: true,
        }
    }
}

/// Volume levels (0.0 - 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sim: SimConfig,
    pub link: LinkSettings,
    pub audio: AudioSettings,
    /// Frames per second of the animation loop
    pub frame_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            link: LinkSettings::default(),
            audio: AudioSettings::default(),
            frame_rate: FRAME_RATE,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Frame duration in seconds (frame rate floored at 1)
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let json = r#"{
            "sim": { "canvas_width": 800 },
            "link": { "device_path": "/dev/ttyACM0" },
            "frame_rate": 30
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.sim.canvas_width, 800.0);
        assert_eq!(settings.sim.canvas_height, 500.0);
        assert_eq!(settings.link.device_path, Some(PathBuf::from("/dev/ttyACM0")));
        assert_eq!(settings.link.baud_rate, 115_200);
        assert_eq!(settings.frame_rate, 30);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("{ \"frame_rate\": \"fast\" }").is_err());
    }

    #[test]
    fn test_frame_dt_floors_rate() {
        let mut settings = Settings::default();
        settings.frame_rate = 0;
        assert_eq!(settings.frame_dt(), 1.0);
    }
}
