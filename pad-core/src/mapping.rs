//! Button remapping: mapping table, map commands, and the remap engine.
//!
//! The mapping table is compile-time configuration. Each of the five
//! mappable buttons (A, B, L, R, Start) carries a [`MappingSlot`] holding
//! two alternative 8-bit [`MapCommand`]s - one for the plain layer and one
//! for the layer reached while the modifier is held. The Select button
//! either acts as that modifier or as a sixth ordinary mapped button,
//! depending on its own slot. A single direction command routes the four
//! direction buttons to the left stick, the C stick, or the D-pad.
//!
//! # Map command encoding
//!
//! One byte: kind in the high nibble, target in the low nibble.
//!
//! ```text
//! kind 0x0 (direction): target 0 = left stick, 1 = C stick, 2 = D-pad
//! kind 0x1 (button):    target 1..=8 = A B X Y L Z R Start
//! kind 0x2 (modifier):  target ignored
//! ```
//!
//! Anything else decodes to `None` and is silently inert - mapping data is
//! compiled in, not parsed from the wire, so there is nothing to report.

use crate::input::HostButtons;
use joybus_proto::{Buttons, PadState, StickAxes, STICK_HIGH, STICK_LOW, TRIGGER_PRESSED};

/// Virtual buttons a map command can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonTarget {
    A = 0x1,
    B = 0x2,
    X = 0x3,
    Y = 0x4,
    L = 0x5,
    Z = 0x6,
    R = 0x7,
    Start = 0x8,
}

/// Where the physical direction buttons are routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectionTarget {
    LeftStick = 0x0,
    CStick = 0x1,
    DPad = 0x2,
}

/// Decoded form of a [`MapCommand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapAction {
    Direction(DirectionTarget),
    Button(ButtonTarget),
    Modifier,
}

const KIND_DIRECTION: u8 = 0x0;
const KIND_BUTTON: u8 = 0x1;
const KIND_MODIFIER: u8 = 0x2;

/// One 8-bit mapping command: kind nibble plus target nibble.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MapCommand(pub u8);

impl MapCommand {
    /// A command that decodes to nothing and therefore does nothing.
    pub const NONE: Self = Self(0xFF);

    /// Build a button command.
    #[must_use]
    pub const fn button(target: ButtonTarget) -> Self {
        Self((KIND_BUTTON << 4) | target as u8)
    }

    /// Build a direction command.
    #[must_use]
    pub const fn direction(target: DirectionTarget) -> Self {
        Self((KIND_DIRECTION << 4) | target as u8)
    }

    /// Build the modifier command.
    #[must_use]
    pub const fn modifier() -> Self {
        Self(KIND_MODIFIER << 4)
    }

    /// Decode this command. Unrecognized kind/target combinations yield
    /// `None`; the engine treats them as no-ops.
    #[must_use]
    pub fn action(self) -> Option<MapAction> {
        let target = self.0 & 0x0F;
        match self.0 >> 4 {
            KIND_DIRECTION => match target {
                0x0 => Some(MapAction::Direction(DirectionTarget::LeftStick)),
                0x1 => Some(MapAction::Direction(DirectionTarget::CStick)),
                0x2 => Some(MapAction::Direction(DirectionTarget::DPad)),
                _ => None,
            },
            KIND_BUTTON => match target {
                0x1 => Some(MapAction::Button(ButtonTarget::A)),
                0x2 => Some(MapAction::Button(ButtonTarget::B)),
                0x3 => Some(MapAction::Button(ButtonTarget::X)),
                0x4 => Some(MapAction::Button(ButtonTarget::Y)),
                0x5 => Some(MapAction::Button(ButtonTarget::L)),
                0x6 => Some(MapAction::Button(ButtonTarget::Z)),
                0x7 => Some(MapAction::Button(ButtonTarget::R)),
                0x8 => Some(MapAction::Button(ButtonTarget::Start)),
                _ => None,
            },
            KIND_MODIFIER => Some(MapAction::Modifier),
            _ => None,
        }
    }
}

/// Two-layer mapping for one physical button: the plain command in the
/// high byte, the modifier-layer command in the low byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappingSlot(pub u16);

impl MappingSlot {
    #[must_use]
    pub const fn new(plain: MapCommand, shifted: MapCommand) -> Self {
        Self(((plain.0 as u16) << 8) | shifted.0 as u16)
    }

    /// Both layers issue the same command.
    #[must_use]
    pub const fn both(command: MapCommand) -> Self {
        Self::new(command, command)
    }

    /// The command active for the given modifier state.
    #[inline]
    #[must_use]
    pub const fn command(self, modifier_active: bool) -> MapCommand {
        if modifier_active {
            MapCommand((self.0 & 0x00FF) as u8)
        } else {
            MapCommand((self.0 >> 8) as u8)
        }
    }
}

/// Complete compile-time mapping configuration.
///
/// Customize at build time by defining your own const, the same way
/// [`DEFAULT_MAPPING`] is written.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappingTable {
    /// Routing for the four direction buttons, evaluated unconditionally
    /// (the modifier layer does not apply to directions).
    pub direction: MapCommand,
    pub a: MappingSlot,
    pub b: MappingSlot,
    pub l: MappingSlot,
    pub r: MappingSlot,
    pub start: MappingSlot,
    /// Select is either the modifier (kind modifier) or a sixth mapped
    /// button (kind button) - one or the other, never both.
    pub select: MappingSlot,
}

/// Stock layout: directions drive the left stick, the face and shoulder
/// buttons map to themselves, and holding Select shifts A/B to X/Y and the
/// shoulders to Z.
pub const DEFAULT_MAPPING: MappingTable = MappingTable {
    direction: MapCommand::direction(DirectionTarget::LeftStick),
    a: MappingSlot::new(
        MapCommand::button(ButtonTarget::A),
        MapCommand::button(ButtonTarget::X),
    ),
    b: MappingSlot::new(
        MapCommand::button(ButtonTarget::B),
        MapCommand::button(ButtonTarget::Y),
    ),
    l: MappingSlot::new(
        MapCommand::button(ButtonTarget::L),
        MapCommand::button(ButtonTarget::Z),
    ),
    r: MappingSlot::new(
        MapCommand::button(ButtonTarget::R),
        MapCommand::button(ButtonTarget::Z),
    ),
    start: MappingSlot::both(MapCommand::button(ButtonTarget::Start)),
    select: MappingSlot::both(MapCommand::modifier()),
};

/// Build one poll cycle's pad state from the physical buttons.
///
/// Pure function of its inputs. The state starts as a verbatim copy of the
/// origin snapshot; pressed buttons then overlay their mapped effects on
/// top. Released buttons write nothing - release is the next cycle's reset
/// from origin, not an explicit clear.
///
/// Evaluation order is fixed: Select (modifier latch) first, then the
/// direction command, then A, B, L, R, Start. Two buttons mapped to the
/// same boolean target OR together; for scalar targets the later writer in
/// that order wins.
#[must_use]
pub fn remap(physical: HostButtons, table: &MappingTable, origin: &PadState) -> PadState {
    let mut state = *origin;

    // Modifier latch, recomputed from scratch every cycle before any
    // button slot is read.
    let mut modifier = false;
    match table.select.command(false).action() {
        Some(MapAction::Modifier) => modifier = physical.pressed(HostButtons::SELECT),
        Some(MapAction::Button(target)) if physical.pressed(HostButtons::SELECT) => {
            apply_button(&mut state, target);
        }
        _ => {}
    }

    apply_direction(&mut state, physical, table.direction);

    let slots = [
        (HostButtons::A, table.a),
        (HostButtons::B, table.b),
        (HostButtons::L, table.l),
        (HostButtons::R, table.r),
        (HostButtons::START, table.start),
    ];
    for (button, slot) in slots {
        if !physical.pressed(button) {
            continue;
        }
        if let Some(MapAction::Button(target)) = slot.command(modifier).action() {
            apply_button(&mut state, target);
        }
    }

    state
}

fn apply_button(state: &mut PadState, target: ButtonTarget) {
    match target {
        ButtonTarget::A => state.buttons |= Buttons::A,
        ButtonTarget::B => state.buttons |= Buttons::B,
        ButtonTarget::X => state.buttons |= Buttons::X,
        ButtonTarget::Y => state.buttons |= Buttons::Y,
        ButtonTarget::Z => state.buttons |= Buttons::Z,
        ButtonTarget::Start => state.buttons |= Buttons::START,
        ButtonTarget::L => {
            state.buttons |= Buttons::L;
            state.trigger_l = TRIGGER_PRESSED;
        }
        ButtonTarget::R => {
            state.buttons |= Buttons::R;
            state.trigger_r = TRIGGER_PRESSED;
        }
    }
}

fn apply_direction(state: &mut PadState, physical: HostButtons, command: MapCommand) {
    let Some(MapAction::Direction(target)) = command.action() else {
        return;
    };
    match target {
        DirectionTarget::LeftStick => drive_axes(&mut state.stick, physical),
        DirectionTarget::CStick => drive_axes(&mut state.substick, physical),
        DirectionTarget::DPad => {
            if physical.pressed(HostButtons::RIGHT) {
                state.buttons |= Buttons::RIGHT;
            }
            if physical.pressed(HostButtons::LEFT) {
                state.buttons |= Buttons::LEFT;
            }
            if physical.pressed(HostButtons::UP) {
                state.buttons |= Buttons::UP;
            }
            if physical.pressed(HostButtons::DOWN) {
                state.buttons |= Buttons::DOWN;
            }
        }
    }
}

/// Deflect an axis pair to its extremes. Right beats Left and Up beats
/// Down when both are somehow held; unset directions leave the axis at the
/// origin-sourced value.
fn drive_axes(axes: &mut StickAxes, physical: HostButtons) {
    if physical.pressed(HostButtons::RIGHT) {
        axes.x = STICK_HIGH;
    } else if physical.pressed(HostButtons::LEFT) {
        axes.x = STICK_LOW;
    }
    if physical.pressed(HostButtons::UP) {
        axes.y = STICK_HIGH;
    } else if physical.pressed(HostButtons::DOWN) {
        axes.y = STICK_LOW;
    }
}
