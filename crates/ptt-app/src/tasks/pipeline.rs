use crate::prelude::*;
use embassy_nrf::gpio::{Input, Level, Output};
use embassy_time::Instant;
use voice_pipeline::{
    Clock, Controller, ImaAdpcmDecoder, ImaAdpcmEncoder, Indicator,
    TriggerInput,
};

/// Push-to-talk button, active low.
pub struct ButtonTrigger {
    button: Input<'static>,
}

impl ButtonTrigger {
    pub fn new(button: Input<'static>) -> Self {
        Self { button }
    }
}

impl TriggerInput for ButtonTrigger {
    fn is_active(&mut self) -> bool {
        self.button.is_low()
    }
}

pub struct LedIndicator {
    led: Output<'static>,
}

impl LedIndicator {
    pub fn new(led: Output<'static>) -> Self {
        Self { led }
    }
}

impl Indicator for LedIndicator {
    fn set_active(&mut self, on: bool) {
        self.led.set_level(Level::from(on));
    }
}

/// Embassy time driver.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn delay(&mut self, duration: Duration) {
        Timer::after(duration).await;
    }
}

pub type AppController = Controller<
    'static,
    ButtonTrigger,
    LedIndicator,
    PdmCapture,
    I2sPlayback,
    SystemClock,
    ImaAdpcmEncoder,
    ImaAdpcmDecoder,
    BUF_SAMPLES,
>;

#[embassy_executor::task]
pub async fn pipeline_task(controller: &'static mut AppController) {
    controller.run().await
}
