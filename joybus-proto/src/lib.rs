//! Joybus controller protocol: command decoding and response encoding.
//!
//! This crate implements the wire side of a standard-controller peripheral on
//! the GameCube's synchronous serial bus. The console polls the controller
//! with short command frames; the controller answers each one with a
//! bit-exact response within the bus timing window. Everything here is pure
//! data transformation - reading bits off the wire and putting bits back on
//! it belongs to the bus port, not to this crate.
//!
//! # Command frames
//!
//! A frame is N command bytes followed by a single stop bit, so valid frame
//! lengths are `8 * N + 1` bits:
//!
//! | Byte 0 | Command | Frame | Response |
//! |--------|---------|-------|----------|
//! | `0x00` | Identify | 9 bits | 2 bytes |
//! | `0x40` | Status | 25 bits | 8 bytes |
//! | `0x41` | Origin | 9 bits | 10 bytes |
//! | `0x42` | Recalibrate | 25 bits | 10 bytes |
//! | `0x43` | Status (long) | 25 bits | 10 bytes |
//! | `0xFF` | Reset | 9 bits | 2 bytes |
//!
//! 25-bit frames carry the requested analog mode in the low 3 bits of byte 1
//! and the requested motor mode in the low 2 bits of byte 2.
//!
//! # Example
//!
//! ```
//! use joybus_proto::{decode, Command, Frame, Motor};
//!
//! let frame = Frame::new(&[0x40, 0x03, 0x01], 25);
//! match decode(&frame) {
//!     Ok(Command::Status { motor, .. }) => assert_eq!(motor, Motor::Rumble),
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod buttons;
pub mod command;
pub mod encode;
pub mod types;

// Re-export types at crate root for convenience
pub use buttons::Buttons;
pub use command::{
    decode, AnalogMode, Command, Frame, FrameError, Motor, MAX_FRAME_BYTES, MIN_FRAME_BITS,
    STATUS_FRAME_BITS,
};
pub use encode::{
    encode_id, encode_origin, encode_status, Response, ID_RESPONSE_BITS, ORIGIN_RESPONSE_BITS,
    STATUS_RESPONSE_BITS,
};
pub use types::{
    PadState, StickAxes, PRESSURE_PRESSED, STICK_CENTER, STICK_HIGH, STICK_LOW, TRIGGER_PRESSED,
};
