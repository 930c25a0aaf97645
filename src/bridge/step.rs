//! Per-step exchange with the autopilot.
//!
//! One call to [`StepController::execute`] walks the step state machine:
//!
//! ```text
//! Idle -> Polled -> Decoded -> Responded -> Idle
//!                \-> NoData ------------> Idle
//! ```
//!
//! The controller polls the transport instead of blocking on it, so the host
//! can step much faster than the autopilot sends. On steps without a frame the
//! outputs simply repeat the last decoded command.

use log::{debug, trace, warn};
use std::net::SocketAddr;

use super::ports::{StepInputs, check_output_port};
use super::state::ActuatorState;
use crate::error::BridgeError;
use crate::protocol::{SensorFrame, decode_actuator_frame, encode_sensor_frame};
use crate::transport::Transport;

/// Default cap on a single inbound datagram.
pub const MAX_DATAGRAM_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepPhase {
    Idle,
    Polled,
    Decoded,
    NoData,
    Responded,
}

/// What happened on the network during a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing was queued; outputs repeat the last command.
    NoData,
    /// A frame was decoded and the sensor packet was sent to `peer`.
    Responded { peer: SocketAddr },
}

/// Running counters since the controller was created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepStats {
    pub steps: u64,
    pub frames_received: u64,
    pub packets_sent: u64,
    pub last_peer: Option<SocketAddr>,
}

pub struct StepController<T: Transport> {
    transport: T,
    actuators: ActuatorState,
    max_datagram_len: usize,
    stats: StepStats,
}

impl<T: Transport> StepController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_max_datagram_len(transport, MAX_DATAGRAM_LEN)
    }

    pub fn with_max_datagram_len(transport: T, max_datagram_len: usize) -> Self {
        Self {
            transport,
            actuators: ActuatorState::new(),
            max_datagram_len,
            stats: StepStats::default(),
        }
    }

    /// Run one step: poll, maybe decode and answer, then write the current
    /// actuator command into `outputs`.
    ///
    /// On error the step is abandoned: `outputs` is left as it was and the
    /// actuator state keeps its previous value.
    pub fn execute(&mut self, inputs: &StepInputs<'_>, outputs: &mut [f64]) -> Result<StepOutcome, BridgeError> {
        check_output_port(outputs)?;
        let frame = inputs.sensor_frame();
        self.stats.steps += 1;

        let pending = self.transport.pending_bytes()?;
        let phase = self.transition(StepPhase::Idle, StepPhase::Polled);

        let (outcome, phase) = if pending == 0 {
            (StepOutcome::NoData, self.transition(phase, StepPhase::NoData))
        } else {
            let (peer, phase) = self.exchange(phase, pending, &frame)?;
            (StepOutcome::Responded { peer }, phase)
        };

        self.actuators.snapshot().write_to(outputs);
        self.transition(phase, StepPhase::Idle);

        Ok(outcome)
    }

    /// Receive one frame, decode it, and answer its sender with `frame`.
    /// Starts from `phase` (`Polled`) and returns the phase it ended in.
    fn exchange(
        &mut self,
        phase: StepPhase,
        pending: usize,
        frame: &SensorFrame,
    ) -> Result<(SocketAddr, StepPhase), BridgeError> {
        if pending > self.max_datagram_len {
            warn!(
                "Inbound datagram exceeds {} bytes, reading only the first {}",
                self.max_datagram_len, self.max_datagram_len
            );
        }

        let (payload, peer) = self.transport.receive(pending.min(self.max_datagram_len))?;
        if self.stats.last_peer != Some(peer) {
            debug!("Autopilot frames now arriving from {}", peer);
            self.stats.last_peer = Some(peer);
        }

        let cmd = decode_actuator_frame(&payload)?;
        self.stats.frames_received += 1;
        if self.actuators.update(cmd) {
            debug!("Actuator command changed: {:?}", cmd.values());
        }
        let phase = self.transition(phase, StepPhase::Decoded);

        let packet = encode_sensor_frame(frame)?;
        self.transport.send(&packet, peer)?;
        self.stats.packets_sent += 1;

        Ok((peer, self.transition(phase, StepPhase::Responded)))
    }

    fn transition(&self, from: StepPhase, to: StepPhase) -> StepPhase {
        trace!("step {}: {:?} -> {:?}", self.stats.steps, from, to);
        to
    }

    pub fn actuators(&self) -> &ActuatorState {
        &self.actuators
    }

    pub fn stats(&self) -> &StepStats {
        &self.stats
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
