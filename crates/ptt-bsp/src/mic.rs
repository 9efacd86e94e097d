//! SPK0838HT4H PDM microphone.
//!
//! The microphone has no registers; everything is set up on the nRF52840's
//! PDM peripheral. [`Microphone`] fixes the clock/ratio pairs the part
//! supports and exposes the continuous double-buffered sampler.

use embassy_nrf::gpio::Pin;
use embassy_nrf::interrupt;
use embassy_nrf::pdm::{
    self, Edge, Frequency, OperationMode, Pdm, Ratio, SamplerState,
};
use embassy_nrf::Peri;
use fixed::types::I7F1;

pub use embassy_nrf::pdm::Error;

/// Which PDM clock edge carries the microphone's data, set by its SELECT pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// SELECT tied to GND, data on the falling edge.
    #[default]
    Left,
    /// SELECT tied to VDD, data on the rising edge.
    Right,
}

/// Output sample rates reachable with a PDM clock the part accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleRate {
    Rate12800,
    #[default]
    Rate16000,
    Rate20000,
}

impl SampleRate {
    fn clock(self) -> (Frequency, Ratio) {
        match self {
            Self::Rate12800 => (Frequency::DEFAULT, Ratio::RATIO80),
            Self::Rate16000 => (Frequency::_1280K, Ratio::RATIO80),
            Self::Rate20000 => (Frequency::_1280K, Ratio::RATIO64),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub channel: Channel,
    pub sample_rate: SampleRate,
    /// Gain in 0.5 dB steps, -20.0 to +20.0 dB.
    pub gain_db: I7F1,
}

impl Config {
    fn into_pdm_config(self) -> pdm::Config {
        let edge = match self.channel {
            Channel::Left => Edge::LeftFalling,
            Channel::Right => Edge::LeftRising,
        };
        let (frequency, ratio) = self.sample_rate.clock();

        pdm::Config {
            operation_mode: OperationMode::Mono,
            edge,
            frequency,
            ratio,
            gain_left: self.gain_db,
            gain_right: self.gain_db,
        }
    }
}

pub struct Microphone<'d> {
    pdm: Pdm<'d>,
}

impl<'d> Microphone<'d> {
    pub fn new<T: pdm::Instance>(
        pdm: Peri<'d, T>,
        irq: impl interrupt::typelevel::Binding<
                T::Interrupt,
                pdm::InterruptHandler<T>,
            > + 'd,
        clk: Peri<'d, impl Pin>,
        din: Peri<'d, impl Pin>,
        config: Config,
    ) -> Self {
        Self { pdm: Pdm::new(pdm, irq, clk, din, config.into_pdm_config()) }
    }

    /// Sample continuously into `bufs`, handing each filled block to
    /// `sampler` until it returns [`SamplerState::Stopped`].
    ///
    /// The PDM clock runs only for the duration of this call, so the
    /// microphone sleeps in between.
    pub async fn run_sampler<S, const N: usize>(
        &mut self,
        bufs: &mut [[i16; N]; 2],
        sampler: S,
    ) -> Result<(), Error>
    where
        S: FnMut(&[i16; N]) -> SamplerState,
    {
        self.pdm.run_task_sampler(bufs, sampler).await
    }
}
