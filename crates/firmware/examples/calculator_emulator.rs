//! Keypad Calculator Emulator
//!
//! Runs the real decoder, calculator, and multiplexer on the desktop.
//! Type keypad legends on stdin (`0-9 A-F + - * / = M H`) and press Enter.
//!
//! Run with: cargo run --example calculator_emulator --features emulator
//! Log level: RUST_LOG=firmware=debug

use std::io::BufRead;
use std::time::Duration;

use calculator::{FrameCell, KeypadDecoder, Multiplexer};
use embassy_time::Delay;
use firmware::emulator::{ChannelKeypad, TerminalSegments};
use firmware::App;
use platform::{config, DigitIndex};
use tracing_subscriber::EnvFilter;

static FRAME: FrameCell = FrameCell::new();

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("{} - Emulator", config::app_title());
    println!("Keys: 0-9 A-F + - * / = M(ode) H(istory), Enter to send, Ctrl-D to quit\n");

    let (tx, rx) = tokio::sync::mpsc::channel::<char>(64);

    // stdin reader: one char per keypad press
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            for c in line.chars() {
                if tx.blocking_send(c).is_err() {
                    return;
                }
            }
        }
    });

    // Foreground loop: blocking, like thread mode on the board
    let foreground = tokio::task::spawn_blocking(move || {
        let decoder = KeypadDecoder::new(ChannelKeypad::new(rx), Delay);
        let mut app = App::new(decoder, &FRAME);
        match app.run() {
            Ok(never) => match never {},
            Err(e) => tracing::info!("{e}"),
        }
    });

    // Refresh task: one cell per tick
    let period = Duration::from_micros(config::refresh_period().as_micros());
    let mut ticker = tokio::time::interval(period);
    let mut mux = Multiplexer::new(TerminalSegments::new());
    let mut shown = None;
    let mut cycle_start = None;

    while !foreground.is_finished() {
        ticker.tick().await;
        mux.on_tick(&FRAME).unwrap_or_else(|never| match never {});

        // print after a full refresh cycle of one unchanged frame
        if mux.position() == DigitIndex::FIRST {
            let generation = Some(FRAME.generation());
            if generation == cycle_start && generation != shown {
                shown = generation;
                tracing::debug!(?generation, "frame");
                println!("{}\n", mux.driver_mut().render());
            }
            cycle_start = generation;
        }
    }

    foreground.await?;
    Ok(())
}
