//! Lifecycle surface a simulation host drives.
//!
//! A host registers three capabilities against the bridge: `start` once before
//! the first step, `step` once per simulation step, `terminate` once at the
//! end. All state lives in the `SilBridge` value the host owns.

use log::info;
use std::net::SocketAddr;

use super::ports::StepInputs;
use super::step::{StepController, StepOutcome, StepStats};
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::transport::{OfflineTransport, Transport, UdpTransport};

/// Callbacks a step-synchronous host invokes.
pub trait HostBlock {
    /// Open resources and reset state. Called before the first step.
    fn start(&mut self) -> Result<(), BridgeError>;

    /// Run one step. `inputs` holds the six input ports; `outputs` is the
    /// 16-wide actuator port, written on success.
    fn step(&mut self, inputs: &[&[f64]], outputs: &mut [f64]) -> Result<StepOutcome, BridgeError>;

    /// Release resources. Safe to call when not started.
    fn terminate(&mut self) -> Result<(), BridgeError>;
}

/// Bridge between the host and the autopilot.
pub struct SilBridge {
    config: BridgeConfig,
    controller: Option<StepController<Box<dyn Transport>>>,
    local_addr: Option<SocketAddr>,
}

impl SilBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            controller: None,
            local_addr: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.controller.is_some()
    }

    /// Address the UDP socket is bound to; `None` when stopped or offline.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn stats(&self) -> Option<&StepStats> {
        self.controller.as_ref().map(StepController::stats)
    }

    fn open_transport(&mut self) -> Result<Box<dyn Transport>, BridgeError> {
        if self.config.offline {
            info!("Bridge running offline, no socket opened");
            return Ok(Box::new(OfflineTransport));
        }

        let transport = UdpTransport::bind(
            self.config.bind_addr(),
            self.config.receive_timeout(),
            self.config.max_datagram_len,
        )?;
        self.local_addr = transport.local_addr().ok();
        Ok(Box::new(transport))
    }
}

impl HostBlock for SilBridge {
    fn start(&mut self) -> Result<(), BridgeError> {
        // Restarting without terminate releases the old socket first.
        self.controller = None;
        self.local_addr = None;
        let transport = self.open_transport()?;
        self.controller = Some(StepController::with_max_datagram_len(transport, self.config.max_datagram_len));
        Ok(())
    }

    fn step(&mut self, inputs: &[&[f64]], outputs: &mut [f64]) -> Result<StepOutcome, BridgeError> {
        let controller = self.controller.as_mut().ok_or(BridgeError::NotStarted)?;
        let inputs = StepInputs::from_ports(inputs)?;
        controller.execute(&inputs, outputs)
    }

    fn terminate(&mut self) -> Result<(), BridgeError> {
        if let Some(controller) = self.controller.take() {
            let stats = controller.stats();
            info!(
                "Bridge terminated after {} steps ({} frames received, {} packets sent)",
                stats.steps, stats.frames_received, stats.packets_sent
            );
        }
        self.local_addr = None;
        Ok(())
    }
}

impl Drop for SilBridge {
    fn drop(&mut self) {
        let _ = self.terminate();
    }
}
