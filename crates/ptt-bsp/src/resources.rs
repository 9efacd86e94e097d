use crate::board::{MicResources, SpeakerResources};
use crate::mic::{self, Microphone};
use embassy_nrf::i2s::{
    self, ApproxSampleRate, Channels, DoubleBuffering, MasterClock,
    OutputStream, SampleWidth,
};
use embassy_nrf::{bind_interrupts, pdm, peripherals};

bind_interrupts!(struct PdmIrqs {
    PDM => pdm::InterruptHandler<peripherals::PDM>;
});

bind_interrupts!(struct I2sIrqs {
    I2S => i2s::InterruptHandler<peripherals::I2S>;
});

/// Mono 16-bit output stream, `NS` samples per DMA buffer.
pub type SpeakerStream<'d, const NS: usize> = OutputStream<'d, i16, 2, NS>;

impl MicResources {
    pub fn configure<'a>(&'a mut self, config: mic::Config) -> Microphone<'a> {
        Microphone::new(
            self.pdm.reborrow(),
            PdmIrqs,
            self.clk.reborrow(),
            self.din.reborrow(),
            config,
        )
    }
}

impl SpeakerResources {
    /// Claim the I2S peripheral as a 16 kHz mono master.
    ///
    /// The stream is created stopped; `start` it once the first buffer holds
    /// samples.
    pub fn configure<const NS: usize>(self) -> SpeakerStream<'static, NS> {
        let master_clock: MasterClock = ApproxSampleRate::_16000.into();

        let mut config = i2s::Config::default();
        config.sample_width = SampleWidth::_16bit;
        config.channels = Channels::MonoLeft;

        i2s::I2S::new_master(
            self.i2s,
            I2sIrqs,
            self.mck,
            self.sck,
            self.lrck,
            master_clock,
            config,
        )
        .output(self.sdout, DoubleBuffering::<i16, NS>::new())
    }
}
