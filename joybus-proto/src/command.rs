//! Inbound command frames and their decoder.
//!
//! The bus port hands the engine one raw frame per poll cycle together with
//! its measured length in bits. Decoding never panics: a runt frame or an
//! unknown command byte is an error value the caller turns into "no response
//! this cycle".

/// Identify command byte.
pub const CMD_IDENTIFY: u8 = 0x00;
/// Status poll command byte.
pub const CMD_STATUS: u8 = 0x40;
/// Origin/calibration readback command byte.
pub const CMD_ORIGIN: u8 = 0x41;
/// Recalibrate command byte.
pub const CMD_RECALIBRATE: u8 = 0x42;
/// Long-format status command byte.
pub const CMD_STATUS_LONG: u8 = 0x43;
/// Bus reset command byte.
pub const CMD_RESET: u8 = 0xFF;

/// Smallest well-formed frame: one command byte plus the stop bit.
pub const MIN_FRAME_BITS: usize = 9;

/// Frame length of the three-byte status-class commands.
pub const STATUS_FRAME_BITS: usize = 25;

/// Receive buffer size for bus ports. Commands are at most 3 bytes; the
/// headroom absorbs line noise without overrunning.
pub const MAX_FRAME_BYTES: usize = 8;

/// One raw inbound frame: the received bytes and the measured bit count
/// (frames are byte-aligned plus a stop bit, so `bits = 8 * n + 1`).
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame<'a> {
    bytes: &'a [u8],
    bits: usize,
}

impl<'a> Frame<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8], bits: usize) -> Self {
        Self { bytes, bits }
    }

    /// Measured frame length in bits, including the stop bit.
    #[inline]
    #[must_use]
    pub const fn bits(&self) -> usize {
        self.bits
    }

    /// The received command bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// Analog precision mode requested by the console in status-class commands.
///
/// The mode selects the layout of the last four bytes of the status
/// response, trading substick resolution against trigger and A/B pressure
/// resolution. Out-of-range values fall back to [`Mode0`](Self::Mode0).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogMode {
    /// 8-bit substick, 4-bit triggers, 4-bit A/B pressure.
    #[default]
    Mode0,
    /// 4-bit substick, 8-bit triggers, 4-bit A/B pressure.
    Mode1,
    /// 4-bit substick, 4-bit triggers, 8-bit A/B pressure.
    Mode2,
    /// 8-bit substick and triggers, no A/B pressure.
    Mode3,
    /// 8-bit substick and A/B pressure, no triggers.
    Mode4,
}

impl AnalogMode {
    /// Decode the low 3 bits of the mode byte. Unknown values (5-7) behave
    /// as mode 0.
    #[must_use]
    pub const fn from_wire(byte: u8) -> Self {
        match byte & 0x07 {
            1 => Self::Mode1,
            2 => Self::Mode2,
            3 => Self::Mode3,
            4 => Self::Mode4,
            _ => Self::Mode0,
        }
    }
}

/// Rumble motor command carried in status-class frames.
///
/// Persisted between polls; the motor output treats everything except
/// [`Rumble`](Self::Rumble) as "actuator off".
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    #[default]
    Stop,
    Rumble,
    StopHard,
}

impl Motor {
    /// Decode the low 2 bits of the motor byte. The reserved value 3
    /// behaves as [`Stop`](Self::Stop).
    #[must_use]
    pub const fn from_wire(byte: u8) -> Self {
        match byte & 0x03 {
            1 => Self::Rumble,
            2 => Self::StopHard,
            _ => Self::Stop,
        }
    }

    /// Whether the actuator should be running.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Rumble)
    }
}

/// A decoded bus command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Command {
    /// `0xFF`: stop the motor, then answer as [`Identify`](Self::Identify).
    Reset,
    /// `0x00`: report device class and rumble capability.
    Identify,
    /// `0x40`: store mode/motor, answer with the 8-byte status response.
    Status { mode: AnalogMode, motor: Motor },
    /// `0x41`: recapture the origin, answer with the 10-byte origin response.
    Origin,
    /// `0x42`: store mode/motor, answer with the current origin.
    Recalibrate { mode: AnalogMode, motor: Motor },
    /// `0x43`: same handling as [`Recalibrate`](Self::Recalibrate).
    StatusLong { mode: AnalogMode, motor: Motor },
}

/// Decode failure. Both cases are handled by ignoring the frame; the
/// console times out and retries on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame shorter than the command requires.
    Truncated,
    /// Unrecognized command byte.
    Unknown,
}

/// Decode one inbound frame into a [`Command`].
///
/// Length checks are minimums, not exact matches: a frame at least as long
/// as its command requires decodes, anything shorter is
/// [`FrameError::Truncated`].
pub fn decode(frame: &Frame<'_>) -> Result<Command, FrameError> {
    if frame.bits() < MIN_FRAME_BITS || frame.bytes().is_empty() {
        return Err(FrameError::Truncated);
    }

    match frame.bytes()[0] {
        CMD_RESET => Ok(Command::Reset),
        CMD_IDENTIFY => Ok(Command::Identify),
        CMD_ORIGIN => Ok(Command::Origin),
        cmd @ (CMD_STATUS | CMD_RECALIBRATE | CMD_STATUS_LONG) => {
            if frame.bits() < STATUS_FRAME_BITS || frame.bytes().len() < 3 {
                return Err(FrameError::Truncated);
            }
            let mode = AnalogMode::from_wire(frame.bytes()[1]);
            let motor = Motor::from_wire(frame.bytes()[2]);
            Ok(match cmd {
                CMD_STATUS => Command::Status { mode, motor },
                CMD_RECALIBRATE => Command::Recalibrate { mode, motor },
                _ => Command::StatusLong { mode, motor },
            })
        }
        _ => Err(FrameError::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_identify() {
        let frame = Frame::new(&[CMD_IDENTIFY], 9);
        assert_eq!(decode(&frame), Ok(Command::Identify));
    }

    #[test]
    fn test_decode_reset() {
        let frame = Frame::new(&[CMD_RESET], 9);
        assert_eq!(decode(&frame), Ok(Command::Reset));
    }

    #[test]
    fn test_decode_status_with_mode_and_motor() {
        let frame = Frame::new(&[CMD_STATUS, 0x03, 0x01], 25);
        assert_eq!(
            decode(&frame),
            Ok(Command::Status {
                mode: AnalogMode::Mode3,
                motor: Motor::Rumble,
            })
        );
    }

    #[test]
    fn test_decode_masks_mode_and_motor_bytes() {
        // Only the low 3 / low 2 bits are meaningful.
        let frame = Frame::new(&[CMD_STATUS, 0xFA, 0xFE], 25);
        assert_eq!(
            decode(&frame),
            Ok(Command::Status {
                mode: AnalogMode::Mode2,
                motor: Motor::StopHard,
            })
        );
    }

    #[test]
    fn test_decode_truncated_status() {
        // A status frame must be 25 bits; 9 bits is a runt.
        let frame = Frame::new(&[CMD_STATUS], 9);
        assert_eq!(decode(&frame), Err(FrameError::Truncated));

        let frame = Frame::new(&[CMD_STATUS, 0x03], 17);
        assert_eq!(decode(&frame), Err(FrameError::Truncated));
    }

    #[test]
    fn test_decode_runt_frame() {
        let frame = Frame::new(&[CMD_IDENTIFY], 8);
        assert_eq!(decode(&frame), Err(FrameError::Truncated));

        let frame = Frame::new(&[], 0);
        assert_eq!(decode(&frame), Err(FrameError::Truncated));
    }

    #[test]
    fn test_decode_unknown_command() {
        let frame = Frame::new(&[0x12], 9);
        assert_eq!(decode(&frame), Err(FrameError::Unknown));
    }

    #[test]
    fn test_decode_recalibrate_and_long_status() {
        let frame = Frame::new(&[CMD_RECALIBRATE, 0x01, 0x00], 25);
        assert!(matches!(decode(&frame), Ok(Command::Recalibrate { .. })));

        let frame = Frame::new(&[CMD_STATUS_LONG, 0x01, 0x00], 25);
        assert!(matches!(decode(&frame), Ok(Command::StatusLong { .. })));
    }

    #[test]
    fn test_mode_fallback() {
        assert_eq!(AnalogMode::from_wire(0), AnalogMode::Mode0);
        assert_eq!(AnalogMode::from_wire(4), AnalogMode::Mode4);
        assert_eq!(AnalogMode::from_wire(5), AnalogMode::Mode0);
        assert_eq!(AnalogMode::from_wire(7), AnalogMode::Mode0);
    }

    #[test]
    fn test_motor_fallback() {
        assert_eq!(Motor::from_wire(0), Motor::Stop);
        assert_eq!(Motor::from_wire(1), Motor::Rumble);
        assert_eq!(Motor::from_wire(2), Motor::StopHard);
        assert_eq!(Motor::from_wire(3), Motor::Stop);
        assert!(!Motor::StopHard.is_active());
        assert!(Motor::Rumble.is_active());
    }
}
