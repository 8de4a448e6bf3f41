use anyhow::{Context, Result};
use colored::Colorize;
use platform::config;
use std::process::Command;

pub fn run(log: &str) -> Result<()> {
    println!();
    println!("{}", format!("🧮 {}", config::app_title()).cyan().bold());
    println!("   {}", "Type keypad legends and press Enter; Ctrl-D quits".dimmed());
    println!();

    let status = Command::new("cargo")
        .args([
            "run",
            "-p",
            "firmware",
            "--example",
            "calculator_emulator",
            "--features",
            "emulator",
        ])
        .env("RUST_LOG", log)
        .status()
        .context("Failed to start the emulator")?;

    if !status.success() {
        anyhow::bail!("Emulator exited with {status}");
    }
    Ok(())
}
