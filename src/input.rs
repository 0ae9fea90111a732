//! Input adapter
//!
//! Folds device events and pointer clicks into one control signal (target
//! position + action flag) and keeps the diagnostic status line.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::consts::ADC_MAX;
use crate::map_range;
use crate::platform::{DeviceEvent, LinkState};
use crate::sim::{SimConfig, TickInput};

/// Status text shown before any connection attempt
pub const STATUS_IDLE: &str = "Click anywhere on this page to open the serial connection dialog";
pub const STATUS_OPENED: &str = "Serial connection opened successfully";
pub const STATUS_CLOSED: &str = "Serial connection closed";

/// One `x,y,button` reading from the joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialPayload {
    pub x: i32,
    pub y: i32,
    pub button: i32,
}

/// Why a payload was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Not exactly three comma-separated fields
    FieldCount { found: usize },
    /// A field that is not an integer
    InvalidField { index: usize, value: String },
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::FieldCount { found } => {
                write!(f, "expected 3 fields, found {}", found)
            }
            PayloadError::InvalidField { index, value } => {
                write!(f, "field {} is not an integer: {:?}", index, value)
            }
        }
    }
}

impl std::error::Error for PayloadError {}

impl FromStr for SerialPayload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').collect();
        if fields.len() != 3 {
            return Err(PayloadError::FieldCount {
                found: fields.len(),
            });
        }
        let parse = |index: usize| -> Result<i32, PayloadError> {
            let raw = fields[index].trim();
            raw.parse().map_err(|_| PayloadError::InvalidField {
                index,
                value: raw.to_string(),
            })
        };
        Ok(Self {
            x: parse(0)?,
            y: parse(1)?,
            button: parse(2)?,
        })
    }
}

impl SerialPayload {
    /// Button reads 0 while held (active low)
    pub fn pressed(&self) -> bool {
        self.button == 0
    }

    /// Canvas position for this reading; the y axis is inverted
    pub fn to_canvas(&self, config: &SimConfig) -> Vec2 {
        Vec2::new(
            map_range(self.x as f32, 0.0, ADC_MAX, 0.0, config.canvas_width),
            map_range(self.y as f32, 0.0, ADC_MAX, config.canvas_height, 0.0),
        )
    }
}

/// Canonical control signal plus connection status
#[derive(Debug, Clone)]
pub struct InputAdapter {
    config: SimConfig,
    control: TickInput,
    status: String,
    /// Last accepted payload
    last_payload: Option<SerialPayload>,
    rejected: u64,
    /// Link lifecycle as seen through applied events and clicks
    link: LinkState,
}

impl InputAdapter {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            control: TickInput::default(),
            status: STATUS_IDLE.to_string(),
            last_payload: None,
            rejected: 0,
            link: LinkState::Closed,
        }
    }

    /// Apply one device event
    pub fn apply(&mut self, event: &DeviceEvent) {
        match event {
            DeviceEvent::Opened => {
                log::info!("Serial connection opened");
                self.link = LinkState::Open;
                self.status = STATUS_OPENED.to_string();
            }
            DeviceEvent::Closed => {
                log::info!("Serial connection closed");
                self.link = LinkState::Closed;
                self.status = STATUS_CLOSED.to_string();
            }
            DeviceEvent::Error(msg) => {
                log::warn!("Serial error: {}", msg);
                self.link = LinkState::Closed;
                self.status = msg.clone();
            }
            DeviceEvent::Data(line) => self.apply_payload(line),
        }
    }

    /// Apply a batch of events in order; the last payload wins
    pub fn apply_all(&mut self, events: &[DeviceEvent]) {
        for event in events {
            self.apply(event);
        }
    }

    fn apply_payload(&mut self, line: &str) {
        match line.parse::<SerialPayload>() {
            Ok(payload) => {
                self.control = TickInput {
                    target: Some(payload.to_canvas(&self.config)),
                    action: payload.pressed(),
                };
                self.status = format!(
                    "x: {}, y: {}, button: {}",
                    payload.x,
                    payload.y,
                    payload.pressed()
                );
                self.last_payload = Some(payload);
            }
            Err(e) => {
                // Keep the previous control signal
                self.rejected += 1;
                log::warn!("Ignoring serial payload {:?}: {}", line, e);
            }
        }
    }

    /// Pointer click: returns true if the host should open the device link
    ///
    /// Only a closed link asks for a connection; the request stays pending
    /// until an `Opened`, `Closed` or `Error` event settles it.
    pub fn click(&mut self) -> bool {
        if self.link != LinkState::Closed {
            return false;
        }
        self.link = LinkState::Connecting;
        true
    }

    pub fn link_state(&self) -> LinkState {
        self.link
    }

    /// Control signal for the coming frame
    pub fn tick_input(&self) -> TickInput {
        self.control
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_payload(&self) -> Option<SerialPayload> {
        self.last_payload
    }

    /// Count of malformed payloads dropped so far
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
