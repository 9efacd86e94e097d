pub const TARGET: &str = "thumbv7em-none-eabihf";
pub const CHIP: &str = "nRF52840_xxAA";

pub const APP_MANIFEST: &str = "crates/ptt-app/Cargo.toml";
pub const APP_BINARY: &str = "ptt-app";

/// Path of the firmware ELF for a build profile.
pub fn app_elf(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/{APP_BINARY}")
}
