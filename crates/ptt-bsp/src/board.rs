use embassy_nrf::interrupt::Priority;
use embassy_nrf::peripherals::{self, P0_31, P1_05, WDT};
use embassy_nrf::Peri;

/// PDM microphone pins.
pub struct MicResources {
    pub pdm: Peri<'static, peripherals::PDM>,
    pub clk: Peri<'static, peripherals::P0_27>,
    pub din: Peri<'static, peripherals::P0_00>,
}

/// I2S amplifier pins. Output only; the amplifier has no data line back.
pub struct SpeakerResources {
    pub i2s: Peri<'static, peripherals::I2S>,
    /// Master clock.
    pub mck: Peri<'static, peripherals::P0_12>,
    /// Bit clock.
    pub sck: Peri<'static, peripherals::P1_03>,
    /// Word select.
    pub lrck: Peri<'static, peripherals::P1_06>,
    pub sdout: Peri<'static, peripherals::P0_03>,
}

/// Everything the recorder firmware needs from the nRF52840.
pub struct PttBoard {
    /// Push-to-talk button, shorts to ground when pressed.
    pub button: Peri<'static, P0_31>,
    /// Recording indicator LED, lit when driven high.
    pub led: Peri<'static, P1_05>,
    /// Microphone peripherals.
    pub mic: MicResources,
    /// Speaker peripherals.
    pub speaker: SpeakerResources,
    /// Watchdog Timer.
    pub wdt: Peri<'static, WDT>,
}

impl Default for PttBoard {
    fn default() -> Self {
        let mut config = embassy_nrf::config::Config::default();
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;
        Self::new(config)
    }
}

impl PttBoard {
    /// Create a new instance based on HAL configuration
    pub fn new(config: embassy_nrf::config::Config) -> Self {
        let p = embassy_nrf::init(config);

        Self {
            button: p.P0_31,
            led: p.P1_05,
            mic: MicResources { pdm: p.PDM, clk: p.P0_27, din: p.P0_00 },
            speaker: SpeakerResources {
                i2s: p.I2S,
                mck: p.P0_12,
                sck: p.P1_03,
                lrck: p.P1_06,
                sdout: p.P0_03,
            },
            wdt: p.WDT,
        }
    }
}
