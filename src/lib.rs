//! Software-in-the-loop bridge between a step-synchronous flight simulation
//! host and an autopilot speaking the JSON SITL protocol over UDP.
//!
//! Each host step the bridge polls for one binary actuator frame, answers its
//! sender with the current vehicle state as JSON, and hands the last decoded
//! actuator values back to the host.

pub mod bridge;
pub mod config;
pub mod error;
pub mod protocol;
pub mod transport;

pub use bridge::{HostBlock, SilBridge, StepOutcome};
pub use config::{BridgeConfig, Config, HostConfig};
pub use error::{BridgeError, DecodeError, TransportError};
