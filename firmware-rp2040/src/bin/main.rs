#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio;
use joybus_pad_rp2040::{
    pak_header, rumble_pak_present, GpioButtons, JoybusPort, JoybusPrograms, PadBridge,
    RumbleMotor, Session, DEFAULT_MAPPING,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(embassy_rp::config::Config::default());

    info!("joybus pad starting...");

    // --- Bus port on PIN 10 ---
    let pio::Pio {
        mut common,
        sm0,
        sm1,
        ..
    } = pio::Pio::new(p.PIO0, Irqs);

    let programs = JoybusPrograms::new(&mut common);
    let port = JoybusPort::new(&mut common, sm0, sm1, p.PIN_10, &programs);

    // --- Buttons on PINs 0-9, active low ---
    let buttons = GpioButtons::new([
        Input::new(p.PIN_0, Pull::Up), // A
        Input::new(p.PIN_1, Pull::Up), // B
        Input::new(p.PIN_2, Pull::Up), // Select
        Input::new(p.PIN_3, Pull::Up), // Start
        Input::new(p.PIN_4, Pull::Up), // Right
        Input::new(p.PIN_5, Pull::Up), // Left
        Input::new(p.PIN_6, Pull::Up), // Up
        Input::new(p.PIN_7, Pull::Up), // Down
        Input::new(p.PIN_8, Pull::Up), // R
        Input::new(p.PIN_9, Pull::Up), // L
    ]);

    // --- Rumble motor on PIN 15 ---
    let motor = RumbleMotor::new(Output::new(p.PIN_15, Level::Low));

    // Probe the attached pak exactly once; the session caches the result.
    let has_motor = rumble_pak_present(pak_header());
    info!("rumble pak present: {}", has_motor);

    let mut bridge = PadBridge::new(
        buttons,
        port,
        motor,
        DEFAULT_MAPPING,
        Session::new(has_motor),
    );

    info!("serving controller polls on PIN 10");
    bridge.run().await
}
