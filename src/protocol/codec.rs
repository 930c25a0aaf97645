//! Pure byte-level transformations for both packet directions. No I/O.

use super::types::{ACTUATOR_CHANNELS, ACTUATOR_FRAME_LEN, ACTUATOR_HEADER_LEN, ActuatorCommand, SensorFrame, SensorPacket};
use crate::error::DecodeError;

/// Decode an inbound actuator frame.
///
/// Layout:
///
/// ```text
/// [0..8)   header, skipped without validation
/// [8..40)  16 x u16, little-endian, one per channel
/// [40..)   ignored
/// ```
///
/// The frame carries no checksum or magic check here; anything at least
/// `ACTUATOR_FRAME_LEN` bytes long decodes.
pub fn decode_actuator_frame(bytes: &[u8]) -> Result<ActuatorCommand, DecodeError> {
    if bytes.len() < ACTUATOR_FRAME_LEN {
        return Err(DecodeError::Truncated { len: bytes.len() });
    }

    let body = &bytes[ACTUATOR_HEADER_LEN..ACTUATOR_FRAME_LEN];
    let mut raw = [0u16; ACTUATOR_CHANNELS];
    for (slot, pair) in raw.iter_mut().zip(body.chunks_exact(2)) {
        *slot = u16::from_le_bytes([pair[0], pair[1]]);
    }

    Ok(ActuatorCommand::from(raw))
}

/// Encode a sensor frame as the newline-framed JSON packet the peer reads.
///
/// Output shape (compact, fixed key order):
///
/// ```text
/// \n{"timestamp":T,"imu":{"gyro":[..],"accel_body":[..]},"position":[..],"attitude":[..],"velocity":[..]}\n
/// ```
///
/// Non-finite values serialize as `null`.
pub fn encode_sensor_frame(frame: &SensorFrame) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::with_capacity(256);
    out.push(b'\n');
    serde_json::to_writer(&mut out, &SensorPacket::from(frame))?;
    out.push(b'\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn frame_from_raw(header: [u8; ACTUATOR_HEADER_LEN], raw: &[u16; ACTUATOR_CHANNELS]) -> Vec<u8> {
        let mut bytes = header.to_vec();
        for value in raw {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn decodes_random_channel_values() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let raw: [u16; ACTUATOR_CHANNELS] = std::array::from_fn(|_| rng.r#gen());
            let header: [u8; ACTUATOR_HEADER_LEN] = rng.r#gen();
            let cmd = decode_actuator_frame(&frame_from_raw(header, &raw)).unwrap();
            for (i, value) in cmd.values().iter().enumerate() {
                assert_eq!(*value, f64::from(raw[i]), "channel {i}");
            }
        }
    }

    #[test]
    fn channel_bytes_are_little_endian() {
        let mut bytes = vec![0u8; ACTUATOR_FRAME_LEN];
        bytes[8] = 0xE8;
        bytes[9] = 0x03;
        bytes[38] = 0xFF;
        bytes[39] = 0xFF;
        let cmd = decode_actuator_frame(&bytes).unwrap();
        assert_eq!(cmd.values()[0], 1000.0);
        assert_eq!(cmd.values()[15], 65535.0);
        assert!(cmd.values()[1..15].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn header_is_ignored() {
        let raw = [1500u16; ACTUATOR_CHANNELS];
        let a = decode_actuator_frame(&frame_from_raw([0; 8], &raw)).unwrap();
        let b = decode_actuator_frame(&frame_from_raw([0xAB; 8], &raw)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = frame_from_raw([0; 8], &[42u16; ACTUATOR_CHANNELS]);
        bytes.extend_from_slice(&[0xFF; 32]);
        let cmd = decode_actuator_frame(&bytes).unwrap();
        assert!(cmd.values().iter().all(|v| *v == 42.0));
    }

    #[test]
    fn short_payloads_are_truncated() {
        let bytes = vec![0x11u8; ACTUATOR_FRAME_LEN];
        for len in 0..ACTUATOR_FRAME_LEN {
            match decode_actuator_frame(&bytes[..len]) {
                Err(DecodeError::Truncated { len: reported }) => assert_eq!(reported, len),
                Ok(_) => panic!("decoded a {len}-byte payload"),
            }
        }
    }

    #[test]
    fn sensor_packet_shape_matches_reference() {
        let frame = SensorFrame {
            timestamp: 1.5,
            angular_rate: [0.0, 0.0, 0.0],
            linear_accel: [0.0, 0.0, 9.81],
            position: [1.0, 2.0, 3.0],
            attitude: [0.0, 0.0, 0.0],
            velocity: [0.0, 0.0, 0.0],
        };
        let bytes = encode_sensor_frame(&frame).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();

        assert!(text.starts_with("\n{"));
        assert!(text.ends_with("}\n"));
        assert_eq!(
            text.trim(),
            r#"{"timestamp":1.5,"imu":{"gyro":[0.0,0.0,0.0],"accel_body":[0.0,0.0,9.81]},"position":[1.0,2.0,3.0],"attitude":[0.0,0.0,0.0],"velocity":[0.0,0.0,0.0]}"#
        );

        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["timestamp"], 1.5);
        assert_eq!(value["imu"]["accel_body"][2], 9.81);
        assert_eq!(value["position"][1], 2.0);
    }

    #[test]
    fn sensor_packet_keeps_full_precision() {
        let frame = SensorFrame {
            timestamp: 0.1 + 0.2,
            attitude: [std::f64::consts::PI, -1e-12, 123456.789],
            ..Default::default()
        };
        let bytes = encode_sensor_frame(&frame).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes[1..bytes.len() - 1]).unwrap();
        assert_eq!(value["timestamp"].as_f64(), Some(0.1 + 0.2));
        assert_eq!(value["attitude"][0].as_f64(), Some(std::f64::consts::PI));
        assert_eq!(value["attitude"][1].as_f64(), Some(-1e-12));
        assert_eq!(value["attitude"][2].as_f64(), Some(123456.789));
    }
}
