//! GameCube controller emulator for RP2040.
//!
//! The firmware answers the console's controller polls with the state of
//! its own ten buttons, remapped through a compile-time table, and drives
//! a rumble motor when told to.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Buttons  | 0-9  | Active-low inputs: A, B, Select, Start, Right, Left, Up, Down, R, L |
//! | Joybus   | 10   | Bus data line (open collector, external pull-up to 3.3V) |
//! | Motor    | 15   | Rumble motor transistor |
//!
//! # Architecture
//!
//! One Embassy task runs the whole poll loop: the bus port blocks until
//! the console sends a command frame, the buttons are sampled, the pad
//! state is rebuilt from the origin snapshot, and the response goes back
//! out - all within the console's reply window. The protocol engine lives
//! in [`pad_core`]; this crate only implements its three hardware traits:
//!
//! - [`JoybusPort`]: PIO bit transfer on the bus data line
//! - [`GpioButtons`]: button sampling
//! - [`RumbleMotor`]: motor drive, plus the pak header the rumble probe
//!   reads
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`pad_core`] for
//! convenience, so the binary only needs to depend on this crate.

#![no_std]

// Re-export core types for convenience
pub use pad_core::{
    remap, rumble_pak_present, AnalogMode, Buttons, ButtonSource, BusError, BusPort, Frame,
    HostButtons, MapCommand, MappingSlot, MappingTable, Motor, MotorOutput, PadBridge, PadState,
    Response, Session, DEFAULT_MAPPING,
};

pub mod buttons;
pub mod joybus;
pub mod rumble;

pub use buttons::GpioButtons;
pub use joybus::{JoybusPort, JoybusPrograms};
pub use rumble::{pak_header, RumbleMotor};
