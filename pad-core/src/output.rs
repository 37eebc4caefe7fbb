//! Motor output trait.

use joybus_proto::Motor;

/// Sink for the persisted motor mode, driven once per poll cycle.
///
/// The engine decides *what* the actuator should do; the implementation
/// owns the electrical side. Both [`Motor::Stop`] and [`Motor::StopHard`]
/// mean "actuator off", [`Motor::Rumble`] means "actuator on" - there is
/// no PWM or braking sequence at this level.
pub trait MotorOutput {
    /// Drive the actuator to match the given motor mode.
    fn set(&mut self, motor: Motor);
}
