use anyhow::{Context, Result};
use colored::Colorize;
use platform::config;
use std::process::Command;
use std::time::Instant;

use crate::step::{cargo, OnFailure};

const TARGET: &str = "thumbv7em-none-eabihf";
const CHIP: &str = "STM32H743ZITx";

pub fn run(release: bool) -> Result<()> {
    let profile = if release { "release" } else { "debug" };

    println!();
    println!("{}", format!("🔨 Building firmware ({profile} mode)...").cyan().bold());
    println!();

    let mut args = vec!["build", "-p", "firmware", "--target", TARGET, "--features", "hardware"];
    if release {
        args.push("--release");
    }
    cargo("Firmware build", &args, OnFailure::Abort)?;

    let binary = format!("target/{TARGET}/{profile}/firmware");
    show_binary_size(&binary);

    println!("{}", "📡 Flashing to STM32H7...".cyan().bold());
    let start = Instant::now();
    // `probe-rs run` keeps streaming defmt RTT logs until Ctrl-C
    let status = Command::new("probe-rs")
        .args(["run", &binary, "--chip", CHIP, "--probe-index", "0"])
        .status()
        .context("Failed to run probe-rs. Is probe-rs installed? (cargo install probe-rs-tools)")?;

    if !status.success() {
        anyhow::bail!("Flash failed - check that the probe is connected and the device is powered");
    }

    println!(
        "{}",
        format!(
            "✓ {} session ended after {:.2}s",
            config::APP_NAME,
            start.elapsed().as_secs_f64()
        )
        .green()
    );
    Ok(())
}

fn show_binary_size(binary: &str) {
    let Ok(out) = Command::new("rust-size").args([binary, "-A"]).output() else {
        println!("   {}", "rust-size not found; skipping size report".dimmed());
        return;
    };
    if out.status.success() {
        println!("{}", "📊 Binary size:".cyan());
        for line in String::from_utf8_lossy(&out.stdout).lines() {
            println!("   {}", line.dimmed());
        }
        println!();
    }
}
