use fixed::types::I7F1;
use ptt_bsp::mic::{self, SampleRate};

/// Microphone settings the firmware applies each time the stream starts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MicConfig {
    /// Gain in dB, rounded to the nearest 0.5 dB step.
    pub gain_db: f32,
}

impl Default for MicConfig {
    fn default() -> Self {
        Self { gain_db: 0.0 }
    }
}

/// Convert a `MicConfig` into the PDM driver `Config`.
pub fn to_driver_config(config: &MicConfig) -> mic::Config {
    mic::Config {
        gain_db: I7F1::saturating_from_num(config.gain_db),
        sample_rate: SampleRate::Rate16000,
        ..Default::default()
    }
}
