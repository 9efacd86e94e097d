use super::*;
use crate::prelude::*;
use embassy_nrf::pdm::SamplerState;

#[embassy_executor::task]
pub async fn mic_stream_task(mic: MicResources, config: MicConfig) {
    let mut mic = mic;
    loop {
        // Sleep until a recording asks for samples.
        if !MIC_RUN_SIG.wait().await {
            continue;
        }

        let mut microphone = mic.configure(to_driver_config(&config));
        let mut bufs = [[0i16; MIC_BUF_SAMPLES]; 2];
        info!("Mic stream started");

        let run_result = microphone
            .run_sampler(&mut bufs, |buf| {
                if MIC_STREAM_CH.try_send(*buf).is_err() {
                    warn!("Failed to queue mic data! Capture reader back pressure!");
                }

                match MIC_RUN_SIG.try_take() {
                    Some(false) => SamplerState::Stopped,
                    _ => SamplerState::Sampled,
                }
            })
            .await;

        if let Err(e) = run_result {
            error!("Error sampling microphone: {:?}", e);
        }

        info!("Mic stream stopped");
    }
}
