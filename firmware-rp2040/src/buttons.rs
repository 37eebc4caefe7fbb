//! GPIO button sampler.

use embassy_rp::gpio::Input;
use pad_core::{ButtonSource, HostButtons};

/// Flag for each slot of the pin array, in wiring order.
const BUTTON_FLAGS: [HostButtons; 10] = [
    HostButtons::A,
    HostButtons::B,
    HostButtons::SELECT,
    HostButtons::START,
    HostButtons::RIGHT,
    HostButtons::LEFT,
    HostButtons::UP,
    HostButtons::DOWN,
    HostButtons::R,
    HostButtons::L,
];

/// The device's ten physical buttons on GPIO inputs.
///
/// Buttons switch to ground, so the inputs must be constructed with
/// `Pull::Up`; a pressed button reads low.
pub struct GpioButtons<'d> {
    pins: [Input<'d>; 10],
}

impl<'d> GpioButtons<'d> {
    /// Wiring order: A, B, Select, Start, Right, Left, Up, Down, R, L.
    #[must_use]
    pub fn new(pins: [Input<'d>; 10]) -> Self {
        Self { pins }
    }
}

impl ButtonSource for GpioButtons<'_> {
    fn sample(&mut self) -> HostButtons {
        let mut held = HostButtons::NONE;
        for (pin, &flag) in self.pins.iter().zip(BUTTON_FLAGS.iter()) {
            held.set(flag, pin.is_low());
        }
        held
    }
}
