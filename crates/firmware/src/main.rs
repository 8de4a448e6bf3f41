//! Keypad Calculator Firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32H743ZI.
//!
//! The foreground loop blocks on the keypad in thread mode. The display
//! refresh runs as an Embassy task on an interrupt executor so it preempts
//! the foreground at every tick.
//!
//! # Pin assignments
//!
//! | Signal                | MCU pins  | Notes                            |
//! |-----------------------|-----------|----------------------------------|
//! | Keypad drive 0..3     | PE2..PE5  | push-pull, idle high             |
//! | Keypad sense 0..3     | PF0..PF3  | input, internal pull-up          |
//! | Segments a..g, dp     | PD0..PD7  | high = lit                       |
//! | Digit select bit 0..2 | PG0..PG2  | to a 74HC138 3-to-8 decoder      |
//! | User button (B1)      | PC13      | acts as the `=` key              |

#![no_std]
#![no_main]

use calculator::symbol::key_for;
use calculator::{FrameCell, KeypadDecoder, Multiplexer, Symbol};
use cortex_m_rt::entry;
use embassy_executor::InterruptExecutor;
use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_time::{Delay, Ticker};
use platform::{config, WithAuxButton};

use firmware::{App, MatrixKeypad, PinButton, SegmentPort};

// Panic handler
use {defmt_rtt as _, panic_probe as _};

/// The display buffer shared by the foreground loop and the refresh task.
static FRAME: FrameCell = FrameCell::new();

static EXECUTOR_REFRESH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn UART4() {
    // SAFETY: UART4 is unused as a peripheral; its vector only runs this executor.
    unsafe { EXECUTOR_REFRESH.on_interrupt() }
}

type Segments = SegmentPort<Output<'static, AnyPin>>;

/// Light one display cell per tick, forever.
#[embassy_executor::task]
async fn refresh_task(mut mux: Multiplexer<Segments>) {
    let mut ticker = Ticker::every(config::refresh_period());
    loop {
        // GPIO writes on this HAL cannot fail.
        mux.on_tick(&FRAME).unwrap_or_else(|never| match never {});
        ticker.next().await;
    }
}

#[entry]
fn main() -> ! {
    defmt::info!("{=str} v{=str}", config::APP_NAME, config::APP_VERSION);
    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // -----------------------------------------------------------------------
    // Display: segment and digit-select lines, refresh task
    // -----------------------------------------------------------------------
    let segments = SegmentPort::new(
        [
            Output::new(p.PD0, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PD1, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PD2, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PD3, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PD4, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PD5, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PD6, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PD7, Level::Low, Speed::VeryHigh).degrade(),
        ],
        [
            Output::new(p.PG0, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PG1, Level::Low, Speed::VeryHigh).degrade(),
            Output::new(p.PG2, Level::Low, Speed::VeryHigh).degrade(),
        ],
    );

    interrupt::UART4.set_priority(Priority::P6);
    let spawner = EXECUTOR_REFRESH.start(interrupt::UART4);
    defmt::unwrap!(spawner.spawn(refresh_task(Multiplexer::new(segments))));
    defmt::info!(
        "Refresh task spawned: {=u64} Hz, {=usize} cells",
        config::REFRESH_HZ,
        config::DIGIT_COUNT
    );

    // -----------------------------------------------------------------------
    // Keypad: drive lines idle high, sense lines pulled up, B1 as '='
    // -----------------------------------------------------------------------
    let drive: [Output<'static, AnyPin>; 4] = [
        Output::new(p.PE2, Level::High, Speed::Low).degrade(),
        Output::new(p.PE3, Level::High, Speed::Low).degrade(),
        Output::new(p.PE4, Level::High, Speed::Low).degrade(),
        Output::new(p.PE5, Level::High, Speed::Low).degrade(),
    ];
    let sense: [Input<'static, AnyPin>; 4] = [
        Input::new(p.PF0, Pull::Up).degrade(),
        Input::new(p.PF1, Pull::Up).degrade(),
        Input::new(p.PF2, Pull::Up).degrade(),
        Input::new(p.PF3, Pull::Up).degrade(),
    ];
    let (equals, _) = defmt::unwrap!(key_for(Symbol::Equals));
    let button = PinButton::active_high(Input::new(p.PC13, Pull::Down));
    let keys = WithAuxButton::new(MatrixKeypad::new(drive, sense), button, equals);
    let decoder = KeypadDecoder::new(keys, Delay);

    defmt::info!("Entering foreground loop");
    let mut app = App::new(decoder, &FRAME);
    match app.run() {
        Ok(never) => match never {},
        Err(e) => {
            defmt::error!("Keypad scan failed: {}", defmt::Debug2Format(&e));
            cortex_m::peripheral::SCB::sys_reset()
        }
    }
}
