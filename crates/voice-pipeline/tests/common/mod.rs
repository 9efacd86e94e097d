#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embassy_time::{Duration, Instant};
use voice_pipeline::{
    CaptureBuffer, CaptureSource, Clock, Controller, Devices, Indicator,
    PipelineConfig, PlaybackSink, SpeechDecoder, SpeechEncoder, TriggerInput,
    FRAME_SAMPLES, MAX_PACKET_BYTES,
};

// ---------------------------------------------------------------------------
// Call log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CaptureStart,
    CaptureStop,
    PlaybackStart,
    PlaybackStop,
    Encode(Vec<i16>),
    Decode,
    Play(Vec<i16>),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub fn encoded_frames(log: &CallLog) -> Vec<Vec<i16>> {
    log.borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Encode(frame) => Some(frame.clone()),
            _ => None,
        })
        .collect()
}

pub fn played_samples(log: &CallLog) -> Vec<i16> {
    log.borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Play(frame) => Some(frame.clone()),
            _ => None,
        })
        .flatten()
        .collect()
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Trigger whose level the test flips directly.
#[derive(Clone, Default)]
pub struct FakeTrigger {
    pub held: Rc<Cell<bool>>,
}

impl TriggerInput for FakeTrigger {
    fn is_active(&mut self) -> bool {
        self.held.get()
    }
}

/// Indicator that remembers every level it was driven to.
#[derive(Clone, Default)]
pub struct FakeIndicator {
    pub lit: Rc<Cell<bool>>,
    pub history: Rc<RefCell<Vec<bool>>>,
}

impl Indicator for FakeIndicator {
    fn set_active(&mut self, on: bool) {
        self.lit.set(on);
        self.history.borrow_mut().push(on);
    }
}

/// Capture source that hands out a fixed script, at most `chunk` samples
/// per read.
pub struct FakeCapture {
    pub samples: Vec<i32>,
    pub position: usize,
    pub chunk: usize,
    pub reads: Rc<Cell<usize>>,
    pub log: CallLog,
}

impl FakeCapture {
    pub fn new(samples: Vec<i32>, chunk: usize, log: CallLog) -> Self {
        Self { samples, position: 0, chunk, reads: Rc::default(), log }
    }
}

impl CaptureSource for FakeCapture {
    async fn start(&mut self) {
        self.log.borrow_mut().push(Call::CaptureStart);
    }

    async fn stop(&mut self) {
        self.log.borrow_mut().push(Call::CaptureStop);
    }

    async fn read(&mut self, dst: &mut [i32]) -> usize {
        self.reads.set(self.reads.get() + 1);
        let available = &self.samples[self.position..];
        let count = dst.len().min(self.chunk).min(available.len());
        dst[..count].copy_from_slice(&available[..count]);
        self.position += count;
        count
    }
}

pub struct FakePlayback {
    pub log: CallLog,
}

impl PlaybackSink for FakePlayback {
    async fn start(&mut self) {
        self.log.borrow_mut().push(Call::PlaybackStart);
    }

    async fn stop(&mut self) {
        self.log.borrow_mut().push(Call::PlaybackStop);
    }

    async fn write(&mut self, samples: &[i16]) -> usize {
        self.log.borrow_mut().push(Call::Play(samples.to_vec()));
        samples.len() * core::mem::size_of::<i16>()
    }
}

/// Manual clock: time only moves when the controller delays or the test
/// advances it.
#[derive(Clone, Default)]
pub struct FakeClock {
    pub ticks: Rc<Cell<u64>>,
    pub delays: Rc<RefCell<Vec<Duration>>>,
}

impl FakeClock {
    pub fn advance(&self, duration: Duration) {
        self.ticks.set(self.ticks.get() + duration.as_ticks());
    }

    pub fn instant(&self) -> Instant {
        Instant::from_ticks(self.ticks.get())
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.instant()
    }

    async fn delay(&mut self, duration: Duration) {
        self.delays.borrow_mut().push(duration);
        self.advance(duration);
    }
}

/// Lossless codec: the packet is the frame's little-endian bytes.
pub struct PassthroughEncoder {
    pub log: CallLog,
}

impl SpeechEncoder for PassthroughEncoder {
    fn encode(
        &mut self,
        pcm: &[i16; FRAME_SAMPLES],
        packet: &mut [u8; MAX_PACKET_BYTES],
    ) -> usize {
        self.log.borrow_mut().push(Call::Encode(pcm.to_vec()));
        for (bytes, sample) in packet.chunks_exact_mut(2).zip(pcm) {
            bytes.copy_from_slice(&sample.to_le_bytes());
        }
        FRAME_SAMPLES * 2
    }
}

pub struct PassthroughDecoder {
    pub log: CallLog,
}

impl SpeechDecoder for PassthroughDecoder {
    fn decode(
        &mut self,
        packet: &[u8],
        pcm: &mut [i16; FRAME_SAMPLES],
    ) -> usize {
        self.log.borrow_mut().push(Call::Decode);
        let mut produced = 0;
        for (sample, bytes) in pcm.iter_mut().zip(packet.chunks_exact(2)) {
            *sample = i16::from_le_bytes([bytes[0], bytes[1]]);
            produced += 1;
        }
        produced
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub type TestController<'b, const N: usize> = Controller<
    'b,
    FakeTrigger,
    FakeIndicator,
    FakeCapture,
    FakePlayback,
    FakeClock,
    PassthroughEncoder,
    PassthroughDecoder,
    N,
>;

/// Handles the test keeps after the fakes move into the controller.
pub struct Probes {
    pub held: Rc<Cell<bool>>,
    pub lit: Rc<Cell<bool>>,
    pub indicator_history: Rc<RefCell<Vec<bool>>>,
    pub reads: Rc<Cell<usize>>,
    pub clock: FakeClock,
    pub log: CallLog,
}

pub fn test_config() -> PipelineConfig {
    PipelineConfig {
        recording_ceiling: Duration::from_millis(100),
        settle_delay: Duration::from_millis(50),
        poll_interval: Duration::from_millis(10),
    }
}

pub fn build<'b, const N: usize>(
    config: PipelineConfig,
    raw: &'b mut [i32; N],
    filtered: &'b mut [i16; N],
    samples: Vec<i32>,
    chunk: usize,
) -> (TestController<'b, N>, Probes) {
    let log = CallLog::default();
    let trigger = FakeTrigger::default();
    let indicator = FakeIndicator::default();
    let capture = FakeCapture::new(samples, chunk, log.clone());
    let clock = FakeClock::default();

    let probes = Probes {
        held: trigger.held.clone(),
        lit: indicator.lit.clone(),
        indicator_history: indicator.history.clone(),
        reads: capture.reads.clone(),
        clock: clock.clone(),
        log: log.clone(),
    };

    let controller = Controller::new(
        config,
        CaptureBuffer::new(raw, filtered),
        Devices {
            trigger,
            indicator,
            capture,
            playback: FakePlayback { log: log.clone() },
            clock,
        },
        PassthroughEncoder { log: log.clone() },
        PassthroughDecoder { log },
    );
    (controller, probes)
}

/// A ramp with a DC offset and enough swing to survive the 16-bit reduction.
pub fn voice_like(len: usize, seed: i32) -> Vec<i32> {
    (0..len as i32)
        .map(|i| {
            let swing = ((i * 7919 + seed * 104_729) % 4001 - 2000) << 14;
            swing + (1 << 22)
        })
        .collect()
}
