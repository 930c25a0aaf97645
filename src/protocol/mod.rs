//! Wire protocol between the bridge and the autopilot.
//!
//! Inbound frames are binary actuator commands; outbound packets are
//! newline-framed JSON sensor state. Everything here is pure and allocation
//! light so it can run inside a host step.

pub mod codec;
pub mod types;

pub use codec::{decode_actuator_frame, encode_sensor_frame};
pub use types::{ACTUATOR_CHANNELS, ACTUATOR_FRAME_LEN, ACTUATOR_HEADER_LEN, ActuatorCommand, SensorFrame};
