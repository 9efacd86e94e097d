mod build;
mod constants;
mod flash;
mod rtt;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

/// Build, flash and monitor the push-to-talk recorder firmware.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that compiles `ptt-app`.
#[derive(Args)]
struct FirmwareOpts {
    /// Extra cargo features for `ptt-app`
    #[arg(long)]
    features: Option<String>,

    /// Log over RTT (enables the `defmt` feature)
    #[arg(long)]
    log: bool,

    #[arg(long)]
    release: bool,
}

impl FirmwareOpts {
    /// The `--features` value handed to cargo, if any.
    fn features(&self) -> Option<String> {
        let log = self.log.then_some("defmt");
        match (self.features.as_deref(), log) {
            (Some(extra), Some(log)) => Some(format!("{extra},{log}")),
            (Some(extra), None) => Some(extra.to_owned()),
            (None, log) => log.map(str::to_owned),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the firmware
    Build(FirmwareOpts),
    /// Build and flash the firmware
    Flash {
        #[command(flatten)]
        firmware: FirmwareOpts,

        /// Mass-erase the chip before flashing
        #[arg(long)]
        force: bool,
    },
    /// Build, flash, and stream the RTT log (implies `--log`)
    Run(FirmwareOpts),
    /// Attach to target and show RTT logs
    Attach {
        #[arg(long)]
        release: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(firmware) => {
            println!("Building firmware...");
            build::build_firmware(
                firmware.features().as_deref(),
                firmware.release,
            )?;
            println!("Build complete!");
        }
        Commands::Flash { firmware, force } => {
            flash::flash_firmware(
                firmware.features().as_deref(),
                firmware.release,
                force,
            )?;
        }
        Commands::Run(mut firmware) => {
            // Without defmt there is nothing to attach to.
            firmware.log = true;
            flash::flash_firmware(
                firmware.features().as_deref(),
                firmware.release,
                false,
            )?;

            println!("Attaching RTT...");
            rtt::run(&constants::app_elf(firmware.release))?;
        }
        Commands::Attach { release } => {
            rtt::run(&constants::app_elf(release))?;
        }
    }

    Ok(())
}
