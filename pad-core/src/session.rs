//! Persistent protocol state and the command dispatcher.

use joybus_proto::{
    decode, encode_id, encode_origin, encode_status, AnalogMode, Command, Frame, Motor, PadState,
    Response,
};

/// Everything the protocol persists between poll cycles.
///
/// One `Session` lives for the whole process: the analog mode and motor
/// mode last requested by the console, the origin snapshot used both as
/// the calibration payload and as each cycle's reset baseline, and the
/// rumble capability probed once at startup.
///
/// # Example
///
/// ```
/// use pad_core::{Frame, Motor, PadState, Session};
///
/// let mut session = Session::new(true);
/// let state = PadState::centered();
///
/// // A status poll asking for rumble.
/// let frame = Frame::new(&[0x40, 0x00, 0x01], 25);
/// let response = session.dispatch(&frame, &state).unwrap();
/// assert_eq!(response.bit_len(), 64);
/// assert_eq!(session.motor(), Motor::Rumble);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    mode: AnalogMode,
    motor: Motor,
    origin: PadState,
    origin_captured: bool,
    has_motor: bool,
}

impl Session {
    /// Fresh boot state: mode 0, motor stopped, origin centered.
    ///
    /// `has_motor` is the cached result of the rumble-pak probe; it is
    /// never re-probed during the session.
    #[must_use]
    pub fn new(has_motor: bool) -> Self {
        Self {
            mode: AnalogMode::default(),
            motor: Motor::Stop,
            origin: PadState::centered(),
            origin_captured: false,
            has_motor,
        }
    }

    /// The analog mode last requested by the console.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> AnalogMode {
        self.mode
    }

    /// The motor mode last requested by the console.
    #[inline]
    #[must_use]
    pub fn motor(&self) -> Motor {
        self.motor
    }

    /// The current origin snapshot, the reset baseline for every cycle.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &PadState {
        &self.origin
    }

    /// Whether the console has captured an origin since boot.
    #[inline]
    #[must_use]
    pub fn origin_captured(&self) -> bool {
        self.origin_captured
    }

    /// Rumble capability advertised in the identification response.
    #[inline]
    #[must_use]
    pub fn has_motor(&self) -> bool {
        self.has_motor
    }

    /// Handle one inbound frame against the current pad state.
    ///
    /// Returns the response to transmit, or `None` for runt or
    /// unrecognized frames - in that case nothing here is mutated and the
    /// console is left to time out and retry. Never blocks, never fails.
    pub fn dispatch(&mut self, frame: &Frame<'_>, state: &PadState) -> Option<Response> {
        let command = decode(frame).ok()?;
        let response = match command {
            Command::Reset => {
                self.motor = Motor::Stop;
                encode_id(self.has_motor)
            }
            Command::Identify => encode_id(self.has_motor),
            Command::Status { mode, motor } => {
                self.mode = mode;
                self.motor = motor;
                encode_status(state, self.mode)
            }
            Command::Origin => {
                self.origin = *state;
                self.origin_captured = true;
                encode_origin(&self.origin)
            }
            Command::Recalibrate { mode, motor } | Command::StatusLong { mode, motor } => {
                self.mode = mode;
                self.motor = motor;
                encode_origin(&self.origin)
            }
        };
        Some(response)
    }
}
