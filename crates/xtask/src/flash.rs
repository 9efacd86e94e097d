use anyhow::{Context, Result};
use std::process::Command;

use crate::constants::{app_elf, CHIP};

/// Build, optionally mass-erase, then download the firmware.
///
/// `--preverify` skips sectors that already match, so reflashing an
/// unchanged image is quick.
pub fn flash_firmware(
    features: Option<&str>,
    release: bool,
    force: bool,
) -> Result<()> {
    crate::build::build_firmware(features, release)?;

    if force {
        println!("Erasing chip...");
        let status = Command::new("probe-rs")
            .args(["erase", "--chip", CHIP, "--allow-erase-all"])
            .status()
            .context("Failed to erase chip")?;
        if !status.success() {
            anyhow::bail!("Failed to erase chip");
        }
    }

    println!("Flashing firmware...");
    let elf = app_elf(release);
    let status = Command::new("probe-rs")
        .args(["download", "--chip", CHIP, &elf, "--preverify"])
        .status()
        .context("Failed to flash firmware")?;
    if !status.success() {
        anyhow::bail!("Failed to flash {}", elf);
    }

    Ok(())
}
