//! Feature audit tests.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
//! Checks the firmware manifest's feature lists against how each target
//! actually gets its dependencies.
//!
//! Run with: cargo test -p firmware --test feature_audit

const MANIFEST: &str = include_str!("../Cargo.toml");

/// The entries of `[features] name = [ ... ]`, unquoted, comments removed.
fn feature_entries(name: &str) -> Vec<&'static str> {
    let header = format!("{name} = [");
    let start = MANIFEST
        .find(&header)
        .unwrap_or_else(|| panic!("feature `{name}` missing from firmware/Cargo.toml"));
    let body = &MANIFEST[start + header.len()..];
    let body = &body[..body.find(']').unwrap()];
    body.lines()
        .map(|line| line.split('#').next().unwrap().trim().trim_end_matches(','))
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.trim_matches('"'))
        .collect()
}

/// On hardware the critical-section impl comes from
/// `cortex-m/critical-section-single-core`; the firmware never names the
/// crate itself.
#[test]
fn hardware_gets_critical_section_from_cortex_m() {
    let hardware = feature_entries("hardware");
    assert!(
        !hardware.contains(&"critical-section"),
        "hardware must not enable critical-section directly: {hardware:?}"
    );
    assert!(hardware.contains(&"cortex-m/critical-section-single-core"));
}

/// The emulator links FrameCell against critical-section's std impl.
#[test]
fn emulator_uses_std_critical_section() {
    let emulator = feature_entries("emulator");
    assert!(emulator.contains(&"critical-section/std"), "{emulator:?}");
}
