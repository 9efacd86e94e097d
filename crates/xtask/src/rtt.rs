use anyhow::{Context, Result};
use std::process::Command;

use crate::constants::CHIP;

/// Attach to the running target and stream its defmt log.
pub fn run(elf_path: &str) -> Result<()> {
    let status = Command::new("probe-rs")
        .args(["attach", "--chip", CHIP, elf_path])
        .status()
        .context("Failed to attach probe-rs")?;

    if !status.success() {
        anyhow::bail!("probe-rs attach failed");
    }

    Ok(())
}
