//! Response encoders: identification, status, and origin payloads.
//!
//! All three encoders are pure bit packers over [`PadState`]. Field order
//! and widths are a wire contract with the console, so every layout is
//! written as explicit shifts and masks - never as a struct whose packing
//! the compiler decides.
//!
//! # Layouts
//!
//! Identification (2 bytes):
//!
//! ```text
//! byte 0: device class, 0x09 with a rumble motor fitted, 0x29 without
//! byte 1: always 0x00
//! ```
//!
//! Origin (10 bytes):
//!
//! ```text
//! buttons(2, MSB first) stick.x stick.y substick.x substick.y
//! trigger.l trigger.r pressure.a pressure.b
//! ```
//!
//! Status (8 bytes): buttons(2) stick.x stick.y, then a 4-byte block whose
//! layout depends on [`AnalogMode`]:
//!
//! ```text
//! mode 0: substick.x  substick.y  (l4 | r4)   (a4 | b4)
//! mode 1: (sx4 | sy4) trigger.l   trigger.r   (a4 | b4)
//! mode 2: (sx4 | sy4) (l4 | r4)   pressure.a  pressure.b
//! mode 3: substick.x  substick.y  trigger.l   trigger.r
//! mode 4: substick.x  substick.y  pressure.a  pressure.b
//! ```
//!
//! Nibble fields keep the high nibble of the 8-bit value; packed pairs put
//! the left-hand field in the high nibble.

use crate::command::AnalogMode;
use crate::types::PadState;

/// Identification response length in bits.
pub const ID_RESPONSE_BITS: usize = 16;

/// Status response length in bits, identical for every analog mode.
pub const STATUS_RESPONSE_BITS: usize = 64;

/// Origin response length in bits.
pub const ORIGIN_RESPONSE_BITS: usize = 80;

/// Device class byte advertising a rumble motor.
const ID_WITH_MOTOR: u8 = 0x09;

/// Device class byte without a motor (bit 5 set on top of the class tag).
const ID_WITHOUT_MOTOR: u8 = 0x29;

/// One encoded outbound response, ready for the bus port to transmit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Response {
    Id([u8; 2]),
    Status([u8; 8]),
    Origin([u8; 10]),
}

impl Response {
    /// The payload bytes in transmit order.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Id(bytes) => bytes,
            Self::Status(bytes) => bytes,
            Self::Origin(bytes) => bytes,
        }
    }

    /// Payload length in bits. The trailing stop bit is the bus port's
    /// concern, not part of the payload.
    #[inline]
    #[must_use]
    pub const fn bit_len(&self) -> usize {
        match self {
            Self::Id(_) => ID_RESPONSE_BITS,
            Self::Status(_) => STATUS_RESPONSE_BITS,
            Self::Origin(_) => ORIGIN_RESPONSE_BITS,
        }
    }
}

/// High nibble of an 8-bit analog value, used by the 4-bit status fields.
#[inline]
const fn hi(value: u8) -> u8 {
    value >> 4
}

/// Pack two analog values into one byte, `left` in the high nibble.
#[inline]
const fn nibbles(left: u8, right: u8) -> u8 {
    (hi(left) << 4) | hi(right)
}

/// Encode the identification response.
pub fn encode_id(has_motor: bool) -> Response {
    let class = if has_motor {
        ID_WITH_MOTOR
    } else {
        ID_WITHOUT_MOTOR
    };
    Response::Id([class, 0x00])
}

/// Encode the status response for the given analog mode.
pub fn encode_status(state: &PadState, mode: AnalogMode) -> Response {
    let buttons = state.buttons.wire_word().to_be_bytes();
    let mut bytes = [0u8; 8];
    bytes[0] = buttons[0];
    bytes[1] = buttons[1];
    bytes[2] = state.stick.x;
    bytes[3] = state.stick.y;

    let (sx, sy) = (state.substick.x, state.substick.y);
    let (l, r) = (state.trigger_l, state.trigger_r);
    let (a, b) = (state.pressure_a(), state.pressure_b());

    let block: [u8; 4] = match mode {
        AnalogMode::Mode0 => [sx, sy, nibbles(l, r), nibbles(a, b)],
        AnalogMode::Mode1 => [nibbles(sx, sy), l, r, nibbles(a, b)],
        AnalogMode::Mode2 => [nibbles(sx, sy), nibbles(l, r), a, b],
        AnalogMode::Mode3 => [sx, sy, l, r],
        AnalogMode::Mode4 => [sx, sy, a, b],
    };
    bytes[4..].copy_from_slice(&block);

    Response::Status(bytes)
}

/// Encode the origin response from the captured origin snapshot.
pub fn encode_origin(origin: &PadState) -> Response {
    let buttons = origin.buttons.wire_word().to_be_bytes();
    Response::Origin([
        buttons[0],
        buttons[1],
        origin.stick.x,
        origin.stick.y,
        origin.substick.x,
        origin.substick.y,
        origin.trigger_l,
        origin.trigger_r,
        origin.pressure_a(),
        origin.pressure_b(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::Buttons;
    use crate::types::{StickAxes, PRESSURE_PRESSED};

    fn sample_state() -> PadState {
        PadState {
            buttons: Buttons::A | Buttons::L,
            stick: StickAxes::new(0x12, 0x34),
            substick: StickAxes::new(0xAB, 0xCD),
            trigger_l: 0xE0,
            trigger_r: 0x50,
        }
    }

    #[test]
    fn test_id_boundary_values() {
        assert_eq!(encode_id(true).as_bytes(), &[0x09, 0x00]);
        assert_eq!(encode_id(false).as_bytes(), &[0x29, 0x00]);
        assert_eq!(encode_id(true).bit_len(), 16);
    }

    #[test]
    fn test_status_is_always_64_bits() {
        let state = sample_state();
        for mode in [
            AnalogMode::Mode0,
            AnalogMode::Mode1,
            AnalogMode::Mode2,
            AnalogMode::Mode3,
            AnalogMode::Mode4,
        ] {
            let response = encode_status(&state, mode);
            assert_eq!(response.bit_len(), 64);
            assert_eq!(response.as_bytes().len(), 8);
        }
    }

    #[test]
    fn test_status_common_prefix() {
        let state = sample_state();
        let response = encode_status(&state, AnalogMode::Mode0);
        let bytes = response.as_bytes();
        // A (0x8000) | L (0x0002) | markers (0x0701)
        assert_eq!(bytes[0], 0x87);
        assert_eq!(bytes[1], 0x03);
        assert_eq!(bytes[2], 0x12);
        assert_eq!(bytes[3], 0x34);
    }

    fn status_bytes(mode: AnalogMode) -> [u8; 8] {
        match encode_status(&sample_state(), mode) {
            Response::Status(bytes) => bytes,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_status_mode0_block() {
        let bytes = status_bytes(AnalogMode::Mode0);
        // Full substick, nibble triggers (l high), nibble pressures (a high).
        // A is held so pressure.a = 0xFF >> 4 = 0xF; B released = 0.
        assert_eq!(&bytes[4..], &[0xAB, 0xCD, 0xE5, 0xF0]);
    }

    #[test]
    fn test_status_mode1_block() {
        let bytes = status_bytes(AnalogMode::Mode1);
        // Nibble substick (x high), full triggers, nibble pressures.
        assert_eq!(&bytes[4..], &[0xAC, 0xE0, 0x50, 0xF0]);
    }

    #[test]
    fn test_status_mode2_block() {
        let bytes = status_bytes(AnalogMode::Mode2);
        // Nibble substick, nibble triggers, full pressures.
        assert_eq!(&bytes[4..], &[0xAC, 0xE5, PRESSURE_PRESSED, 0x00]);
    }

    #[test]
    fn test_status_mode3_block() {
        let bytes = status_bytes(AnalogMode::Mode3);
        // Full substick and triggers, no pressure bytes.
        assert_eq!(&bytes[4..], &[0xAB, 0xCD, 0xE0, 0x50]);
    }

    #[test]
    fn test_status_mode4_block() {
        let bytes = status_bytes(AnalogMode::Mode4);
        // Full substick and pressures, no trigger bytes.
        assert_eq!(&bytes[4..], &[0xAB, 0xCD, PRESSURE_PRESSED, 0x00]);
    }

    #[test]
    fn test_origin_layout() {
        let response = encode_origin(&sample_state());
        assert_eq!(response.bit_len(), 80);
        assert_eq!(
            response.as_bytes(),
            &[0x87, 0x03, 0x12, 0x34, 0xAB, 0xCD, 0xE0, 0x50, PRESSURE_PRESSED, 0x00]
        );
    }

    #[test]
    fn test_origin_of_centered_state() {
        let response = encode_origin(&PadState::centered());
        // Markers still present even with nothing pressed.
        assert_eq!(
            response.as_bytes(),
            &[0x07, 0x01, 128, 128, 128, 128, 0, 0, 0, 0]
        );
    }
}
