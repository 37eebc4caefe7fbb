//! PIO-based joybus port: the bit-level end of the console's serial bus.
//!
//! The bus is a single open-collector data line idling high. Every bit is
//! 4 us and leads with a low pulse: 1 us low for a "1", 3 us low for a
//! "0"; frames end with one extra "1" as a stop bit. The console masters
//! every transaction and expects the reply to start within tens of
//! microseconds.
//!
//! Two state machines share the pin:
//!
//! - the RX machine samples each bit 2 us after the falling edge and
//!   autopushes whole bytes; frame boundaries are detected in software by
//!   an inter-byte timeout, which also measures the length the command
//!   decoder validates;
//! - the TX machine plays response bytes out of its FIFO, appends the
//!   stop bit once the FIFO runs dry, and side-sets the pin *direction*
//!   so the line is only ever driven low, never high.

use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Level;
use embassy_rp::pio::{
    self, Common, Config, Direction, FifoJoin, Instance, LoadedProgram, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;
use embassy_time::{Duration, Timer};
use fixed::traits::ToFixed;
use pad_core::{BusError, BusPort, Response};

/// SM cycles per quarter bit; one bit is 4 * T1 cycles = 4 us.
const T1: u8 = 4;

/// Idle time on the line that closes a frame. A byte takes 32 us with no
/// gap inside a frame, so anything past one bit-time of silence is a
/// boundary; 40 us leaves the reply window comfortably open.
const FRAME_GAP: Duration = Duration::from_micros(40);

/// The RX and TX programs, loaded once and shared by every port on the
/// same PIO block.
pub struct JoybusPrograms<'d, PIO: Instance> {
    rx: LoadedProgram<'d, PIO>,
    tx: LoadedProgram<'d, PIO>,
}

impl<'d, PIO: Instance> JoybusPrograms<'d, PIO> {
    pub fn new(common: &mut Common<'d, PIO>) -> Self {
        Self {
            rx: common.load_program(&build_rx_program()),
            tx: common.load_program(&build_tx_program()),
        }
    }
}

/// Bit sampler. Waits out the falling edge, reads the line 2 us in (a "1"
/// has gone high again by then, a "0" is still low), then waits for the
/// line to release before arming for the next edge.
fn build_rx_program() -> pio::program::Program<32> {
    let mut a = pio::program::Assembler::<32>::new();

    let mut wrap_target = a.label();
    let mut wrap_source = a.label();

    a.bind(&mut wrap_target);

    // wait 0 pin 0 [7] ; falling edge, then 2us to the sample point
    a.wait_with_delay(0, pio::program::WaitSource::PIN, 0, false, 2 * T1 - 1);
    // in pins, 1
    a.r#in(pio::program::InSource::PINS, 1);
    // wait 1 pin 0 ; line back high before arming for the next bit
    a.wait(1, pio::program::WaitSource::PIN, 0, false);

    a.bind(&mut wrap_source);

    a.assemble_with_wrap(wrap_source, wrap_target)
}

/// Bit transmitter. Side-set drives the pin direction: 1 = output (line
/// pulled low), 0 = input (line released to the pull-up). Stalls on `out`
/// with the line released whenever there is nothing to send.
fn build_tx_program() -> pio::program::Program<32> {
    let mut a = pio::program::Assembler::<32>::new_with_side_set(pio::program::SideSet::new(
        true, 1, true,
    ));

    let mut wrap_target = a.label();
    let mut wrap_source = a.label();
    let mut send_data = a.label();
    let mut do_zero = a.label();
    let mut send_stop = a.label();

    a.bind(&mut wrap_target);
    a.bind(&mut send_data);

    // out x, 1 side 0 [T1 - 1] ; trailing high of the previous bit; idles here
    a.out_with_delay_and_side_set(pio::program::OutDestination::X, 1, T1 - 1, 0);
    // jmp !x do_zero side 1 [T1 - 1] ; every bit leads with 1us low
    a.jmp_with_delay_and_side_set(pio::program::JmpCondition::XIsZero, &mut do_zero, T1 - 1, 1);

    // do_one: release after 1us low, high for the rest of the bit
    a.jmp_with_delay_and_side_set(
        pio::program::JmpCondition::OutputShiftRegisterNotEmpty,
        &mut send_data,
        T1 * 2 - 1,
        0,
    );
    // jmp send_stop [T1 - 1]
    a.jmp_with_delay(pio::program::JmpCondition::Always, &mut send_stop, T1 - 1);

    a.bind(&mut do_zero);
    // jmp !OSRE send_data [T1 * 2 - 1] ; keep holding the line low
    a.jmp_with_delay(
        pio::program::JmpCondition::OutputShiftRegisterNotEmpty,
        &mut send_data,
        T1 * 2 - 1,
    );
    // jmp send_stop side 0 [T1 - 1]
    a.jmp_with_delay_and_side_set(pio::program::JmpCondition::Always, &mut send_stop, T1 - 1, 0);

    a.bind(&mut send_stop);
    // nop side 1 [T1 - 1] ; the stop bit is a "1"
    a.nop_with_delay_and_side_set(T1 - 1, 1);
    // nop side 0
    a.nop_with_side_set(0);

    a.bind(&mut wrap_source);

    a.assemble_with_wrap(wrap_source, wrap_target)
}

/// One joybus device port on a single data pin.
pub struct JoybusPort<'d, PIO: Instance, const RX: usize, const TX: usize> {
    rx_sm: StateMachine<'d, PIO, RX>,
    tx_sm: StateMachine<'d, PIO, TX>,
}

impl<'d, PIO: Instance, const RX: usize, const TX: usize> JoybusPort<'d, PIO, RX, TX> {
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut rx_sm: StateMachine<'d, PIO, RX>,
        mut tx_sm: StateMachine<'d, PIO, TX>,
        pin: Peri<'d, impl PioPin>,
        programs: &JoybusPrograms<'d, PIO>,
    ) -> Self {
        let pin = common.make_pio_pin(pin);

        // 4 SM cycles per microsecond: T1 cycles per bit quarter.
        let frequency = 1_000_000f32;
        let system_clock = 125_000_000f32; // 125 MHz for RP2040
        let clock_div = system_clock / (f32::from(T1) * frequency);

        let mut rx_cfg = Config::default();
        rx_cfg.use_program(&programs.rx, &[]);
        rx_cfg.set_in_pins(&[&pin]);
        rx_cfg.shift_in = ShiftConfig {
            auto_fill: true,
            direction: ShiftDirection::Left,
            threshold: 8,
        };
        rx_cfg.fifo_join = FifoJoin::RxOnly;
        rx_cfg.clock_divider = clock_div.to_fixed();
        rx_sm.set_config(&rx_cfg);

        let mut tx_cfg = Config::default();
        tx_cfg.use_program(&programs.tx, &[&pin]);
        tx_cfg.shift_out = ShiftConfig {
            auto_fill: true,
            direction: ShiftDirection::Left,
            threshold: 8,
        };
        tx_cfg.fifo_join = FifoJoin::TxOnly;
        tx_cfg.clock_divider = clock_div.to_fixed();
        tx_sm.set_config(&tx_cfg);

        // Open collector: output register pinned low, the side-set flips
        // the direction so the line is pulled low or released, never
        // driven high.
        tx_sm.set_pins(Level::Low, &[&pin]);
        tx_sm.set_pin_dirs(Direction::In, &[&pin]);

        rx_sm.set_enable(true);
        tx_sm.set_enable(true);

        Self { rx_sm, tx_sm }
    }
}

impl<PIO: Instance, const RX: usize, const TX: usize> BusPort for JoybusPort<'_, PIO, RX, TX> {
    async fn receive(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        // Drop whatever the sampler heard while we were transmitting or
        // processing, including the residual stop bit stuck in the ISR.
        self.rx_sm.restart();
        self.rx_sm.clear_fifos();

        // First byte: block for as long as the console takes to poll us.
        let word = self.rx_sm.rx().wait_pull().await;
        buf[0] = (word & 0xFF) as u8;
        let mut count = 1;

        // Remaining bytes follow back-to-back; silence closes the frame.
        loop {
            match select(self.rx_sm.rx().wait_pull(), Timer::after(FRAME_GAP)).await {
                Either::First(word) => {
                    if count == buf.len() {
                        return Err(BusError::Overrun);
                    }
                    buf[count] = (word & 0xFF) as u8;
                    count += 1;
                }
                Either::Second(()) => break,
            }
        }

        // The command bytes plus the stop bit the sampler saw.
        Ok(count * 8 + 1)
    }

    async fn respond(&mut self, response: &Response) -> Result<(), BusError> {
        for &byte in response.as_bytes() {
            self.tx_sm.tx().wait_push(u32::from(byte) << 24).await;
        }

        // The program appends the stop bit once the FIFO runs dry; wait
        // out the transfer so the next receive doesn't hear our own bits.
        let bits = response.bit_len() + 1;
        Timer::after(Duration::from_micros(4 * bits as u64 + 12)).await;
        Ok(())
    }
}
