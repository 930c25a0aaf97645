//! Data carried across the wire in each direction.
//!
//! - `SensorFrame`: vehicle state sent to the autopilot once per answered step
//! - `ActuatorCommand`: the 16 servo/PWM channels decoded from the autopilot

use serde::Serialize;

/// Number of actuator channels in one command frame.
pub const ACTUATOR_CHANNELS: usize = 16;

/// Bytes at the start of an inbound frame that precede the channel values.
/// The region carries the peer's magic/frame-rate/frame-count fields, none of
/// which this layer interprets.
pub const ACTUATOR_HEADER_LEN: usize = 8;

/// Minimum inbound frame length: header plus 16 little-endian `u16` values.
pub const ACTUATOR_FRAME_LEN: usize = ACTUATOR_HEADER_LEN + ACTUATOR_CHANNELS * 2;

/// Vehicle state for one simulation step.
///
/// Built fresh from the host inputs every step and dropped when the step ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorFrame {
    /// Simulation time (s).
    pub timestamp: f64,
    /// Body angular rate (rad/s).
    pub angular_rate: [f64; 3],
    /// Body specific force (m/s²).
    pub linear_accel: [f64; 3],
    /// Position, north-east-down (m).
    pub position: [f64; 3],
    /// Roll, pitch, yaw (rad).
    pub attitude: [f64; 3],
    /// Velocity, north-east-down (m/s).
    pub velocity: [f64; 3],
}

/// Wire layout of the sensor packet. Field order is the JSON key order the
/// peer expects, so do not reorder.
#[derive(Serialize)]
pub(crate) struct SensorPacket<'a> {
    pub timestamp: f64,
    pub imu: ImuPacket<'a>,
    pub position: &'a [f64; 3],
    pub attitude: &'a [f64; 3],
    pub velocity: &'a [f64; 3],
}

#[derive(Serialize)]
pub(crate) struct ImuPacket<'a> {
    pub gyro: &'a [f64; 3],
    pub accel_body: &'a [f64; 3],
}

impl<'a> From<&'a SensorFrame> for SensorPacket<'a> {
    fn from(frame: &'a SensorFrame) -> Self {
        Self {
            timestamp: frame.timestamp,
            imu: ImuPacket {
                gyro: &frame.angular_rate,
                accel_body: &frame.linear_accel,
            },
            position: &frame.position,
            attitude: &frame.attitude,
            velocity: &frame.velocity,
        }
    }
}

/// One decoded actuator command: raw channel values widened to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorCommand([f64; ACTUATOR_CHANNELS]);

impl ActuatorCommand {
    /// All channels at zero, the state before any frame has been received.
    pub const fn zero() -> Self {
        Self([0.0; ACTUATOR_CHANNELS])
    }

    pub fn values(&self) -> &[f64; ACTUATOR_CHANNELS] {
        &self.0
    }

    /// Copy the channels into a host output port.
    ///
    /// The caller guarantees `out.len() == ACTUATOR_CHANNELS`.
    pub fn write_to(&self, out: &mut [f64]) {
        out.copy_from_slice(&self.0);
    }
}

impl Default for ActuatorCommand {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[u16; ACTUATOR_CHANNELS]> for ActuatorCommand {
    fn from(raw: [u16; ACTUATOR_CHANNELS]) -> Self {
        Self(raw.map(f64::from))
    }
}
