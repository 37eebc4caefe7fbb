//! Platform-agnostic controller emulation engine.
//!
//! This crate turns the device's own physical buttons into the controller
//! the console expects to find on its serial bus. It holds everything that
//! is pure logic - remapping, the protocol session, the rumble-pak probe -
//! and abstracts the hardware behind small traits so the whole engine runs
//! in host tests.
//!
//! # Overview
//!
//! - [`input`]: physical button snapshot ([`HostButtons`]) and the
//!   [`ButtonSource`] sampling trait
//! - [`mapping`]: the mapping table and the [`remap`] engine
//! - [`session`]: persistent protocol state and the command dispatcher
//!   ([`Session`])
//! - [`rumble`]: rumble-pak presence probe ([`rumble_pak_present`])
//! - [`bus`]: the [`BusPort`] frame receive/respond trait
//! - [`output`]: the [`MotorOutput`] actuator trait
//! - [`bridge`]: the [`PadBridge`] poll loop tying the pieces together
//!
//! # Poll cycle
//!
//! Each cycle is one synchronous request/response transaction:
//!
//! 1. the bus port blocks until a complete command frame arrives;
//! 2. the physical buttons are sampled once;
//! 3. [`remap`] rebuilds the pad state from the origin snapshot and the
//!    mapping table;
//! 4. [`Session::dispatch`] decodes the frame and encodes the response
//!    (or nothing, for runt/unknown frames);
//! 5. the response, if any, goes back out the bus port;
//! 6. the motor output is driven from the persisted motor mode.
//!
//! There is exactly one logical thread of control; no state is shared
//! outside the bridge, so there is nothing to lock.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod bus;
pub mod input;
pub mod mapping;
pub mod output;
pub mod rumble;
pub mod session;

// Re-export main types at crate root
pub use bridge::PadBridge;
pub use bus::{BusError, BusPort};
pub use input::{ButtonSource, HostButtons};
pub use mapping::{
    remap, ButtonTarget, DirectionTarget, MapAction, MapCommand, MappingSlot, MappingTable,
    DEFAULT_MAPPING,
};
pub use output::MotorOutput;
pub use rumble::{rumble_pak_present, PAK_HEADER_LEN};
pub use session::Session;

// Re-export the wire types consumers need alongside the engine
pub use joybus_proto::{
    AnalogMode, Buttons, Frame, Motor, PadState, Response, StickAxes, MAX_FRAME_BYTES,
};
