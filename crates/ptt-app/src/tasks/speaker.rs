use crate::prelude::*;
use ptt_bsp::SpeakerStream;
use voice_pipeline::{PlaybackSink, FRAME_SAMPLES};

/// Playback sink on the I2S amplifier, one codec frame per DMA buffer.
pub struct I2sPlayback {
    stream: SpeakerStream<'static, FRAME_SAMPLES>,
}

impl I2sPlayback {
    pub fn new(speaker: SpeakerResources) -> Self {
        Self { stream: speaker.configure() }
    }
}

impl PlaybackSink for I2sPlayback {
    async fn start(&mut self) {
        self.stream.buffer().fill(0);
        if let Err(e) = self.stream.start().await {
            error!("Error starting I2S output: {:?}", e);
        }
    }

    async fn stop(&mut self) {
        // Leave silence in the DMA buffer, not the last frame.
        let _ = self.write(&[]).await;
        self.stream.stop().await;
    }

    async fn write(&mut self, samples: &[i16]) -> usize {
        let buffer = self.stream.buffer();
        let count = samples.len().min(buffer.len());
        buffer[..count].copy_from_slice(&samples[..count]);
        buffer[count..].fill(0);

        match self.stream.send().await {
            Ok(()) => count * core::mem::size_of::<i16>(),
            Err(e) => {
                error!("Error writing I2S frame: {:?}", e);
                0
            }
        }
    }
}
