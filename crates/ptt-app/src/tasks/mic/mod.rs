pub(crate) mod capture;
pub(crate) mod config;

mod tasks; // Tasks module is private

pub use capture::*;
pub use config::*;
pub use tasks::*;

use crate::prelude::*;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

pub const MIC_CAP: usize = 8;
pub const MIC_BUF_SAMPLES: usize = 256;

pub type MicBlock = [i16; MIC_BUF_SAMPLES];

/// `true` asks the stream task to start sampling, `false` to stop.
pub(self) static MIC_RUN_SIG: Signal<CriticalSectionRawMutex, bool> =
    Signal::new();

/// PDM blocks from the stream task to the capture source.
pub(self) static MIC_STREAM_CH: Channel<
    CriticalSectionRawMutex,
    MicBlock,
    MIC_CAP,
> = Channel::new();
