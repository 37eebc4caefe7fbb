//! Rumble motor drive and the pak header the presence probe reads.

use embassy_rp::gpio::Output;
use pad_core::{Motor, MotorOutput, PAK_HEADER_LEN};

/// Flash offset of the pak image mapped through XIP.
const PAK_IMAGE_BASE: usize = 0x1010_0000;

/// The motor transistor on one GPIO: on while rumbling, off otherwise.
/// Both stop modes mean "off" here; there is no braking sequence.
pub struct RumbleMotor<'d> {
    pin: Output<'d>,
}

impl<'d> RumbleMotor<'d> {
    #[must_use]
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl MotorOutput for RumbleMotor<'_> {
    fn set(&mut self, motor: Motor) {
        if motor.is_active() {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}

/// The header of the pak image resident in flash.
///
/// Read once at startup to probe for a rumble motor; the image never
/// changes while the firmware runs.
#[must_use]
pub fn pak_header() -> &'static [u8] {
    // XIP flash is memory mapped and immutable at runtime.
    unsafe { core::slice::from_raw_parts(PAK_IMAGE_BASE as *const u8, PAK_HEADER_LEN) }
}
