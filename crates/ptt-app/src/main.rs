#![no_std]
#![no_main]
extern crate alloc;

use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use static_cell::StaticCell;
use voice_pipeline::{
    CaptureBuffer, Controller, Devices, ImaAdpcmDecoder, ImaAdpcmEncoder,
};

#[cfg(feature = "defmt")]
use defmt_rtt as _;
#[cfg(feature = "defmt")]
use panic_probe as _;
#[cfg(not(feature = "defmt"))]
use panic_reset as _;

use ptt_app::prelude::*;

static CONTROLLER: StaticCell<AppController> = StaticCell::new();

// Application main entry point. The spawner can be used to start async tasks.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("In main! Firmware {}", FW_VERSION);
    // First we initialize our board.
    let board = PttBoard::default();

    // Initialize the allocator BEFORE you use it
    init_heap();
    let (raw, filtered) = alloc_clip_buffers();
    info!(
        "Clip of {} samples ({} s at {} Hz)",
        BUF_SAMPLES, RECORDING_SECONDS, SAMPLE_RATE_HZ
    );

    let trigger = ButtonTrigger::new(Input::new(board.button, Pull::Up));
    let indicator = LedIndicator::new(Output::new(
        board.led,
        Level::Low,
        OutputDrive::Standard,
    ));

    spawner.must_spawn(watchdog_task(board.wdt));

    // The mic stream runs above thread mode so PDM blocks keep flowing
    // while the pipeline conditions or plays a clip.
    let high_prio_spawner = init_executors();
    high_prio_spawner.must_spawn(mic_stream_task(board.mic, MicConfig::default()));

    let controller = CONTROLLER.init(Controller::new(
        pipeline_config(),
        CaptureBuffer::new(raw, filtered),
        Devices {
            trigger,
            indicator,
            capture: PdmCapture::new(),
            playback: I2sPlayback::new(board.speaker),
            clock: SystemClock,
        },
        ImaAdpcmEncoder::new(),
        ImaAdpcmDecoder::new(),
    ));
    spawner.must_spawn(pipeline_task(controller));
}
