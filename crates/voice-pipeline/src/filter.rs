//! Per-sample voice conditioning.
//!
//! Every filter consumes one wide sample and produces one wide sample,
//! keeping whatever history it needs between calls. All arithmetic is done
//! in `i64` and saturated back to `i32`, so full-scale 32-bit captures
//! cannot wrap.

use crate::SAMPLE_SHIFT;

/// A stateful one-sample-in, one-sample-out transform.
pub trait SampleFilter {
    fn process(&mut self, input: i32) -> i32;

    /// Forget all history, as if freshly constructed.
    fn reset(&mut self);
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Removes a slowly varying bias by subtracting a leaky running average.
#[derive(Debug, Clone, Default)]
pub struct DcBlock {
    /// Running bias estimate, scaled by `2^DcBlock::SHIFT`.
    bias: i64,
}

impl DcBlock {
    /// Time constant of the bias tracker, in samples, as a power of two.
    pub const SHIFT: u32 = 12;

    pub const fn new() -> Self {
        Self { bias: 0 }
    }

    /// The bias currently being removed.
    pub fn bias(&self) -> i32 {
        saturate(self.bias >> Self::SHIFT)
    }
}

impl SampleFilter for DcBlock {
    fn process(&mut self, input: i32) -> i32 {
        self.bias += input as i64 - (self.bias >> Self::SHIFT);
        saturate(input as i64 - (self.bias >> Self::SHIFT))
    }

    fn reset(&mut self) {
        self.bias = 0;
    }
}

/// First-order high-pass: `y[n] = a * (y[n-1] + x[n] - x[n-1])`.
///
/// `a` is a Q15 coefficient; `a = RC / (RC + dt)` for the wanted cutoff.
#[derive(Debug, Clone)]
pub struct OnePoleHighPass {
    alpha_q15: i32,
    prev_input: i32,
    prev_output: i32,
}

impl OnePoleHighPass {
    /// General speech high-pass, about 80 Hz at 16 kHz.
    pub const VOICE_ALPHA_Q15: i32 = 31_768;
    /// Wind-noise high-pass, about 150 Hz at 16 kHz.
    pub const WIND_ALPHA_Q15: i32 = 30_946;

    pub const fn new(alpha_q15: i32) -> Self {
        Self { alpha_q15, prev_input: 0, prev_output: 0 }
    }

    pub const fn voice() -> Self {
        Self::new(Self::VOICE_ALPHA_Q15)
    }

    pub const fn wind() -> Self {
        Self::new(Self::WIND_ALPHA_Q15)
    }
}

impl SampleFilter for OnePoleHighPass {
    fn process(&mut self, input: i32) -> i32 {
        let delta =
            self.prev_output as i64 + input as i64 - self.prev_input as i64;
        let output = saturate((self.alpha_q15 as i64 * delta) >> 15);
        self.prev_input = input;
        self.prev_output = output;
        output
    }

    fn reset(&mut self) {
        self.prev_input = 0;
        self.prev_output = 0;
    }
}

/// Saturate a wide value into the 16-bit range instead of wrapping.
pub fn limit_amplitude(sample: i32) -> i16 {
    sample.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// The voice filter bank owned by the controller.
#[derive(Debug, Clone)]
pub struct VoiceFilters {
    dc_block: DcBlock,
    high_pass: OnePoleHighPass,
    wind: OnePoleHighPass,
}

impl Default for VoiceFilters {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceFilters {
    pub const fn new() -> Self {
        Self {
            dc_block: DcBlock::new(),
            high_pass: OnePoleHighPass::voice(),
            wind: OnePoleHighPass::wind(),
        }
    }

    pub fn dc_block(&mut self, input: i32) -> i32 {
        self.dc_block.process(input)
    }

    pub fn high_pass(&mut self, input: i32) -> i32 {
        self.high_pass.process(input)
    }

    pub fn wind_highpass(&mut self, input: i32) -> i32 {
        self.wind.process(input)
    }

    /// Zero the memory of every stateful filter.
    pub fn reset(&mut self) {
        self.dc_block.reset();
        self.high_pass.reset();
        self.wind.reset();
    }

    /// Condition one raw capture sample into playback PCM.
    ///
    /// DC block, then wind high-pass, then the bit-depth reduction and
    /// finally the amplitude limiter. The order is fixed.
    pub fn condition(&mut self, raw: i32) -> i16 {
        let dc = self.dc_block(raw);
        let filtered = self.wind_highpass(dc);
        limit_amplitude(filtered >> SAMPLE_SHIFT)
    }
}
