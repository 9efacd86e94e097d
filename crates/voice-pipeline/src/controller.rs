//! The record → condition → encode/decode → play state machine.

use embassy_time::Instant;

use crate::capture::CaptureBuffer;
use crate::codec::{FrameDecoder, FrameEncoder, SpeechDecoder, SpeechEncoder};
use crate::config::PipelineConfig;
use crate::filter::VoiceFilters;
use crate::io::{CaptureSource, Clock, Indicator, PlaybackSink, TriggerInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Waiting for the trigger.
    Idle,
    /// Filling the capture buffer.
    Recording { started_at: Instant },
    /// A conditioned clip is waiting to be played.
    Playing,
}

/// Hardware handles the controller drives.
pub struct Devices<T, L, S, P, C> {
    pub trigger: T,
    pub indicator: L,
    pub capture: S,
    pub playback: P,
    pub clock: C,
}

/// Polling controller for one push-to-talk device.
///
/// Owns the only copy of the state, the clip buffers and the filter memory.
/// All work happens inside [`step`](Self::step), so nothing is ever touched
/// concurrently.
pub struct Controller<'b, T, L, S, P, C, E, D, const N: usize> {
    config: PipelineConfig,
    state: ControllerState,
    buffer: CaptureBuffer<'b, N>,
    filters: VoiceFilters,
    trigger: T,
    indicator: L,
    capture: S,
    playback: P,
    clock: C,
    encoder: FrameEncoder<E>,
    decoder: FrameDecoder<D>,
}

impl<'b, T, L, S, P, C, E, D, const N: usize> Controller<'b, T, L, S, P, C, E, D, N>
where
    T: TriggerInput,
    L: Indicator,
    S: CaptureSource,
    P: PlaybackSink,
    C: Clock,
    E: SpeechEncoder,
    D: SpeechDecoder,
{
    pub fn new(
        config: PipelineConfig,
        buffer: CaptureBuffer<'b, N>,
        devices: Devices<T, L, S, P, C>,
        encoder: E,
        decoder: D,
    ) -> Self {
        let Devices { trigger, mut indicator, capture, playback, clock } =
            devices;
        indicator.set_active(false);
        Self {
            config,
            state: ControllerState::Idle,
            buffer,
            filters: VoiceFilters::new(),
            trigger,
            indicator,
            capture,
            playback,
            clock,
            encoder: FrameEncoder::new(encoder),
            decoder: FrameDecoder::new(decoder),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn buffer(&self) -> &CaptureBuffer<'b, N> {
        &self.buffer
    }

    pub fn devices(&self) -> Devices<&T, &L, &S, &P, &C> {
        Devices {
            trigger: &self.trigger,
            indicator: &self.indicator,
            capture: &self.capture,
            playback: &self.playback,
            clock: &self.clock,
        }
    }

    pub fn devices_mut(&mut self) -> Devices<&mut T, &mut L, &mut S, &mut P, &mut C> {
        Devices {
            trigger: &mut self.trigger,
            indicator: &mut self.indicator,
            capture: &mut self.capture,
            playback: &mut self.playback,
            clock: &mut self.clock,
        }
    }

    /// Step forever, pausing `poll_interval` between steps.
    pub async fn run(&mut self) -> ! {
        info!("Ready");
        loop {
            self.step().await;
            self.clock.delay(self.config.poll_interval).await;
        }
    }

    /// Advance the state machine by one poll.
    ///
    /// Ending a recording (conditioning the clip and the settle pause) and
    /// playing a whole clip each complete within a single step.
    pub async fn step(&mut self) {
        match self.state {
            ControllerState::Idle => {
                if self.trigger.is_active() {
                    self.start_recording().await;
                }
            }
            ControllerState::Recording { started_at } => {
                self.record(started_at).await;
            }
            ControllerState::Playing => {
                self.play().await;
                self.state = ControllerState::Idle;
            }
        }
    }

    async fn start_recording(&mut self) {
        info!("Recording...");
        self.indicator.set_active(true);
        self.buffer.reset();
        let started_at = self.clock.now();
        self.state = ControllerState::Recording { started_at };
        self.capture.start().await;
    }

    async fn record(&mut self, started_at: Instant) {
        // Every poll. Samples are only filtered once the recording ends.
        self.filters.reset();

        if !self.buffer.is_full() {
            let delivered = self.capture.read(self.buffer.unfilled_mut()).await;
            self.buffer.commit(delivered);
        }

        let elapsed = self.clock.now().saturating_duration_since(started_at);
        let timed_out = elapsed > self.config.recording_ceiling;
        let released = !self.trigger.is_active();

        if released || timed_out {
            self.finish_recording(timed_out).await;
        }
    }

    async fn finish_recording(&mut self, timed_out: bool) {
        self.capture.stop().await;
        self.indicator.set_active(false);
        if timed_out {
            info!("End of recording (timeout): {} samples", self.buffer.cursor());
        } else {
            info!("End of recording: {} samples", self.buffer.cursor());
        }

        self.buffer.condition(&mut self.filters);

        self.clock.delay(self.config.settle_delay).await;
        self.buffer.rewind();
        self.state = ControllerState::Playing;
    }

    async fn play(&mut self) {
        info!("Encoding -> Decoding -> Playing...");
        self.playback.start().await;

        let mut frames = 0usize;
        while let Some(frame) = self.buffer.next_frame() {
            let decoder = &mut self.decoder;
            let playback = &mut self.playback;
            let written = self
                .encoder
                .encode(frame, move |packet| {
                    decoder.decode(packet, move |pcm| playback.write(pcm))
                })
                .await;
            trace!("Frame {}: {} bytes played", frames, written);
            frames += 1;
        }

        self.playback.stop().await;
        info!("Done: {} frames", frames);
    }
}
