//! Emulated controller state: sticks, triggers, and the full pad snapshot.

use crate::buttons::Buttons;

/// Rest value for stick axes (mid-scale).
pub const STICK_CENTER: u8 = 128;

/// Axis value reported for a fully-deflected Left/Down press.
pub const STICK_LOW: u8 = 0;

/// Axis value reported for a fully-deflected Right/Up press.
pub const STICK_HIGH: u8 = 255;

/// Trigger value reported while a mapped L/R button is held.
pub const TRIGGER_PRESSED: u8 = 255;

/// A/B analog pressure reported while the button is held.
pub const PRESSURE_PRESSED: u8 = 255;

/// Analog stick with unsigned 8-bit X/Y axes, centered at 128.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickAxes {
    pub x: u8,
    pub y: u8,
}

impl StickAxes {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub const CENTER: Self = Self {
        x: STICK_CENTER,
        y: STICK_CENTER,
    };
}

impl Default for StickAxes {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Complete state of the emulated controller for one poll cycle.
///
/// This is what the response encoders serialize: the digital button word,
/// both sticks, and the two trigger pressures. A/B analog pressure is not
/// stored - it is derived from the A/B button bits at encode time, pressed
/// buttons reporting [`PRESSURE_PRESSED`].
///
/// # Example
///
/// ```
/// use joybus_proto::{Buttons, PadState};
///
/// let mut state = PadState::centered();
/// state.buttons |= Buttons::A;
/// assert_eq!(state.stick.x, 128);
/// assert_eq!(state.pressure_a(), joybus_proto::PRESSURE_PRESSED);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadState {
    pub buttons: Buttons,
    pub stick: StickAxes,
    pub substick: StickAxes,
    pub trigger_l: u8,
    pub trigger_r: u8,
}

impl PadState {
    /// All buttons released, both sticks at rest, triggers up.
    #[must_use]
    pub const fn centered() -> Self {
        Self {
            buttons: Buttons::NONE,
            stick: StickAxes::CENTER,
            substick: StickAxes::CENTER,
            trigger_l: 0,
            trigger_r: 0,
        }
    }

    /// A pressure derived from the A button bit.
    #[inline]
    #[must_use]
    pub const fn pressure_a(&self) -> u8 {
        if self.buttons.contains(Buttons::A) {
            PRESSURE_PRESSED
        } else {
            0
        }
    }

    /// B pressure derived from the B button bit.
    #[inline]
    #[must_use]
    pub const fn pressure_b(&self) -> u8 {
        if self.buttons.contains(Buttons::B) {
            PRESSURE_PRESSED
        } else {
            0
        }
    }
}

impl Default for PadState {
    fn default() -> Self {
        Self::centered()
    }
}
