use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, OnFailure};

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking firmware builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    cargo(
        "Hardware target (STM32H7)",
        &["check", "-p", "firmware", "--target", "thumbv7em-none-eabihf", "--features", "hardware"],
        OnFailure::Abort,
    )?;
    cargo(
        "Emulator target (host)",
        &["check", "-p", "firmware", "--features", "emulator", "--examples"],
        OnFailure::Abort,
    )?;
    // no_std engine crates must build for the MCU without std
    for krate in ["platform", "calculator"] {
        cargo(
            &format!("{krate} crate (no_std)"),
            &["check", "-p", krate, "--target", "thumbv7em-none-eabihf", "--no-default-features"],
            OnFailure::Abort,
        )?;
    }
    cargo(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;
    if cargo("Formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!("✓ All checks completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}
