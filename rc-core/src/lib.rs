//! RC Core - Platform-agnostic Capture, Mapping and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, die Flanken-Zustandsautomaten und Pure Functions.

#![no_std]

pub mod actuation;
pub mod capture;
pub mod config;
pub mod mapping;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use actuation::Actuator;
pub use capture::{CaptureOutcome, ChannelArena, PwmChannel, SampleCell};
pub use config::{ConfigError, OutputRange, PinAssignment, PulseRange, RcConfig};
pub use mapping::{brightness_level, hue_from_pulse, hue_to_rgb, map_clamped, power_state};
pub use traits::{IndicatorOutput, IntensityOutput, OutputError, RgbOutput};
pub use types::{
    Actuation, CHANNEL_COUNT, ChannelId, ChannelReport, CycleReport, Edge, EdgeGuard, PowerState,
};
