//! Host port layout.
//!
//! The host hands the bridge six input ports and one output port per step.
//! Widths are fixed for the whole run:
//!
//! | port | width | content                         |
//! |------|-------|---------------------------------|
//! | 0    | 1     | time (s)                        |
//! | 1    | 3     | body angular rate (rad/s)       |
//! | 2    | 3     | body acceleration (m/s²)        |
//! | 3    | 3     | position NED (m)                |
//! | 4    | 3     | roll/pitch/yaw (rad)            |
//! | 5    | 3     | velocity NED (m/s)              |
//! | out  | 16    | actuator channels               |

use crate::error::BridgeError;
use crate::protocol::{ACTUATOR_CHANNELS, SensorFrame};

pub const INPUT_PORT_COUNT: usize = 6;
pub const INPUT_PORT_WIDTHS: [usize; INPUT_PORT_COUNT] = [1, 3, 3, 3, 3, 3];
pub const OUTPUT_PORT_WIDTH: usize = ACTUATOR_CHANNELS;

/// Width-checked view over one step's input ports.
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    ports: [&'a [f64]; INPUT_PORT_COUNT],
}

impl<'a> StepInputs<'a> {
    /// Check the host's input ports against `INPUT_PORT_WIDTHS`.
    ///
    /// # Arguments
    /// * `ports` - The six input ports in declaration order
    ///
    /// # Returns
    /// * `Ok(StepInputs)` borrowing the ports
    /// * `Err(BridgeError::InputPortCount)` if there are not exactly six ports
    /// * `Err(BridgeError::InputPort)` naming the first port with a wrong width
    pub fn from_ports(ports: &[&'a [f64]]) -> Result<Self, BridgeError> {
        if ports.len() != INPUT_PORT_COUNT {
            return Err(BridgeError::InputPortCount {
                expected: INPUT_PORT_COUNT,
                actual: ports.len(),
            });
        }
        for (index, (port, expected)) in ports.iter().zip(INPUT_PORT_WIDTHS).enumerate() {
            if port.len() != expected {
                return Err(BridgeError::InputPort {
                    index,
                    expected,
                    actual: port.len(),
                });
            }
        }

        Ok(Self {
            ports: std::array::from_fn(|i| ports[i]),
        })
    }

    /// Copy the port values into a sensor frame.
    pub fn sensor_frame(&self) -> SensorFrame {
        SensorFrame {
            timestamp: self.ports[0][0],
            angular_rate: vec3(self.ports[1]),
            linear_accel: vec3(self.ports[2]),
            position: vec3(self.ports[3]),
            attitude: vec3(self.ports[4]),
            velocity: vec3(self.ports[5]),
        }
    }
}

fn vec3(port: &[f64]) -> [f64; 3] {
    [port[0], port[1], port[2]]
}

pub fn check_output_port(outputs: &[f64]) -> Result<(), BridgeError> {
    if outputs.len() != OUTPUT_PORT_WIDTH {
        return Err(BridgeError::OutputPort {
            expected: OUTPUT_PORT_WIDTH,
            actual: outputs.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_sensor_frame_from_ports() {
        let time = [1.5];
        let gyro = [0.1, 0.2, 0.3];
        let accel = [0.0, 0.0, 9.81];
        let pos = [1.0, 2.0, 3.0];
        let att = [0.01, 0.02, 0.03];
        let vel = [4.0, 5.0, 6.0];
        let inputs = StepInputs::from_ports(&[&time, &gyro, &accel, &pos, &att, &vel]).unwrap();

        let frame = inputs.sensor_frame();
        assert_eq!(frame.timestamp, 1.5);
        assert_eq!(frame.angular_rate, gyro);
        assert_eq!(frame.linear_accel, accel);
        assert_eq!(frame.position, pos);
        assert_eq!(frame.attitude, att);
        assert_eq!(frame.velocity, vel);
    }

    #[test]
    fn rejects_wrong_port_width() {
        let three = [0.0; 3];
        let err = StepInputs::from_ports(&[&three, &three, &three, &three, &three, &three]).unwrap_err();
        assert!(matches!(err, BridgeError::InputPort { index: 0, expected: 1, actual: 3 }));

        let time = [0.0];
        let two = [0.0; 2];
        let err = StepInputs::from_ports(&[&time, &three, &three, &three, &two, &three]).unwrap_err();
        assert!(matches!(err, BridgeError::InputPort { index: 4, expected: 3, actual: 2 }));
    }

    #[test]
    fn rejects_wrong_port_count() {
        let time = [0.0];
        let err = StepInputs::from_ports(&[&time]).unwrap_err();
        assert!(matches!(err, BridgeError::InputPortCount { expected: 6, actual: 1 }));
    }

    #[test]
    fn output_port_must_hold_every_channel() {
        assert!(check_output_port(&[0.0; OUTPUT_PORT_WIDTH]).is_ok());
        assert!(matches!(
            check_output_port(&[0.0; 8]),
            Err(BridgeError::OutputPort { expected: 16, actual: 8 })
        ));
    }
}
