//! The bridge proper: port layout, actuator state, step controller and the
//! lifecycle a host drives.
//!
//! ## Module Organization
//!
//! - `ports`: input/output port widths and the width-checked input view
//! - `state`: last known actuator command
//! - `step`: per-step poll/decode/respond state machine
//! - `host`: `HostBlock` lifecycle and the owning `SilBridge`

pub mod host;
pub mod ports;
pub mod state;
pub mod step;

pub use host::{HostBlock, SilBridge};
pub use ports::{INPUT_PORT_WIDTHS, OUTPUT_PORT_WIDTH, StepInputs};
pub use state::ActuatorState;
pub use step::{MAX_DATAGRAM_LEN, StepController, StepOutcome, StepStats};
