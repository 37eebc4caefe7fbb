//! PadBridge: the per-cycle poll loop connecting buttons, bus, and motor.

use crate::bus::{BusError, BusPort};
use crate::input::ButtonSource;
use crate::mapping::{remap, MappingTable};
use crate::output::MotorOutput;
use crate::session::Session;
use joybus_proto::{Frame, PadState, MAX_FRAME_BYTES};

/// Runs the emulated controller against its three pieces of hardware.
///
/// Holds the only mutable state in the system - the session and the frame
/// buffer - and touches it from a single logical thread of control, once
/// per cycle, in a fixed order. Receiving a frame is the only point the
/// loop suspends.
pub struct PadBridge<B, P, M> {
    buttons: B,
    bus: P,
    motor: M,
    table: MappingTable,
    session: Session,
    frame_buf: [u8; MAX_FRAME_BYTES],
}

impl<B: ButtonSource, P: BusPort, M: MotorOutput> PadBridge<B, P, M> {
    /// Assemble a bridge from its hardware ends and configuration.
    pub fn new(buttons: B, bus: P, motor: M, table: MappingTable, session: Session) -> Self {
        Self {
            buttons,
            bus,
            motor,
            table,
            session,
            frame_buf: [0; MAX_FRAME_BYTES],
        }
    }

    /// Serve the bus indefinitely.
    ///
    /// Frame timeouts and transfer errors skip the cycle; the console
    /// retries on its own schedule.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.poll_once().await;
        }
    }

    /// Run one poll cycle: receive, sample, remap, dispatch, respond,
    /// drive the motor.
    ///
    /// Returns whether a response was transmitted, for testing purposes.
    pub async fn poll_once(&mut self) -> Result<bool, BusError> {
        let bits = self.bus.receive(&mut self.frame_buf).await?;

        let physical = self.buttons.sample();
        let state = remap(physical, &self.table, self.session.origin());

        let frame = Frame::new(&self.frame_buf, bits);
        let responded = match self.session.dispatch(&frame, &state) {
            Some(response) => {
                self.bus.respond(&response).await?;
                true
            }
            None => false,
        };

        self.motor.set(self.session.motor());
        Ok(responded)
    }

    /// The pad state the next dispatch would see, for diagnostics.
    pub fn current_state(&mut self) -> PadState {
        let physical = self.buttons.sample();
        remap(physical, &self.table, self.session.origin())
    }

    /// Get a reference to the protocol session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Decompose the bridge into its hardware ends.
    pub fn into_parts(self) -> (B, P, M) {
        (self.buttons, self.bus, self.motor)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::input::HostButtons;
    use crate::mapping::DEFAULT_MAPPING;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use joybus_proto::{Motor, Response};
    use std::vec;
    use std::vec::Vec;

    struct FixedButtons(HostButtons);

    impl ButtonSource for FixedButtons {
        fn sample(&mut self) -> HostButtons {
            self.0
        }
    }

    // Mock bus: replays queued frames, records responses.
    struct MockBus {
        frames: Vec<(Vec<u8>, usize)>,
        index: usize,
        responses: Vec<Response>,
    }

    impl MockBus {
        fn new(frames: Vec<(Vec<u8>, usize)>) -> Self {
            Self {
                frames,
                index: 0,
                responses: Vec::new(),
            }
        }
    }

    impl BusPort for MockBus {
        fn receive(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<usize, BusError>> {
            let result = if self.index < self.frames.len() {
                let (bytes, bits) = &self.frames[self.index];
                self.index += 1;
                buf[..bytes.len()].copy_from_slice(bytes);
                Ok(*bits)
            } else {
                Err(BusError::Timeout)
            };
            core::future::ready(result)
        }

        fn respond(&mut self, response: &Response) -> impl Future<Output = Result<(), BusError>> {
            self.responses.push(*response);
            core::future::ready(Ok(()))
        }
    }

    struct MockMotor {
        driven: Vec<Motor>,
    }

    impl MotorOutput for MockMotor {
        fn set(&mut self, motor: Motor) {
            self.driven.push(motor);
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    fn bridge_with(
        held: HostButtons,
        frames: Vec<(Vec<u8>, usize)>,
        has_motor: bool,
    ) -> PadBridge<FixedButtons, MockBus, MockMotor> {
        PadBridge::new(
            FixedButtons(held),
            MockBus::new(frames),
            MockMotor { driven: Vec::new() },
            DEFAULT_MAPPING,
            Session::new(has_motor),
        )
    }

    #[test]
    fn test_cycle_answers_status_and_drives_motor() {
        let mut bridge = bridge_with(
            HostButtons::A,
            vec![(vec![0x40, 0x00, 0x01], 25)],
            true,
        );

        let responded = block_on(bridge.poll_once()).unwrap();
        assert!(responded);

        let (_, bus, motor) = bridge.into_parts();
        assert_eq!(bus.responses.len(), 1);
        assert_eq!(bus.responses[0].bit_len(), 64);
        // Rumble was requested in the frame and reaches the motor.
        assert_eq!(motor.driven, vec![Motor::Rumble]);
    }

    #[test]
    fn test_malformed_frame_skips_cleanly() {
        let mut bridge = bridge_with(HostButtons::NONE, vec![(vec![0x40, 0x00], 17)], false);

        let responded = block_on(bridge.poll_once()).unwrap();
        assert!(!responded);

        let (_, bus, motor) = bridge.into_parts();
        assert!(bus.responses.is_empty());
        // Still a completed cycle: the motor gets its (unchanged) mode.
        assert_eq!(motor.driven, vec![Motor::Stop]);
    }

    #[test]
    fn test_reset_then_identify_scenario() {
        let mut bridge = bridge_with(
            HostButtons::NONE,
            vec![
                (vec![0x40, 0x00, 0x01], 25), // rumble on
                (vec![0xFF], 9),              // reset
                (vec![0x00], 9),              // identify
            ],
            true,
        );

        block_on(bridge.poll_once()).unwrap();
        assert_eq!(bridge.session().motor(), Motor::Rumble);

        block_on(bridge.poll_once()).unwrap();
        assert_eq!(bridge.session().motor(), Motor::Stop);

        block_on(bridge.poll_once()).unwrap();
        let (_, bus, _) = bridge.into_parts();
        assert_eq!(bus.responses[1].as_bytes(), &[0x09, 0x00]);
        assert_eq!(bus.responses[2].as_bytes(), &[0x09, 0x00]);
    }

    #[test]
    fn test_bus_timeout_is_propagated() {
        let mut bridge = bridge_with(HostButtons::NONE, vec![], false);
        assert_eq!(block_on(bridge.poll_once()), Err(BusError::Timeout));
    }

    #[test]
    fn test_current_state_reflects_mapping() {
        let mut bridge = bridge_with(HostButtons::RIGHT, vec![], false);
        let state = bridge.current_state();
        assert_eq!(state.stick.x, 255);
    }
}
