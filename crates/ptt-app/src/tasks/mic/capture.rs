use super::*;
use crate::prelude::*;
use embassy_time::with_timeout;
use voice_pipeline::{CaptureSource, SAMPLE_SHIFT};

/// Longest a single `read` waits for the microphone.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Capture source fed by [`mic_stream_task`].
///
/// Blocks arrive as 16-bit PCM and are widened to the pipeline's capture
/// format. A block that does not fit in the caller's slice is kept and
/// handed out on the next read.
pub struct PdmCapture {
    pending: MicBlock,
    offset: usize,
}

impl PdmCapture {
    pub const fn new() -> Self {
        Self { pending: [0; MIC_BUF_SAMPLES], offset: MIC_BUF_SAMPLES }
    }

    fn has_pending(&self) -> bool {
        self.offset < MIC_BUF_SAMPLES
    }

    fn load(&mut self, block: MicBlock) {
        self.pending = block;
        self.offset = 0;
    }

    /// Copy as much of the pending block as fits, returning the count.
    fn drain_into(&mut self, dst: &mut [i32]) -> usize {
        let src = &self.pending[self.offset..];
        let count = src.len().min(dst.len());
        for (wide, &sample) in dst.iter_mut().zip(src) {
            *wide = i32::from(sample) << SAMPLE_SHIFT;
        }
        self.offset += count;
        count
    }
}

impl Default for PdmCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSource for PdmCapture {
    async fn start(&mut self) {
        // Anything still queued belongs to the previous clip.
        MIC_STREAM_CH.clear();
        self.offset = MIC_BUF_SAMPLES;
        MIC_RUN_SIG.signal(true);
    }

    async fn stop(&mut self) {
        MIC_RUN_SIG.signal(false);
    }

    async fn read(&mut self, dst: &mut [i32]) -> usize {
        if dst.is_empty() {
            return 0;
        }

        if !self.has_pending() {
            match with_timeout(READ_TIMEOUT, MIC_STREAM_CH.receive()).await {
                Ok(block) => self.load(block),
                Err(_) => {
                    warn!("No mic data within {} ms", READ_TIMEOUT.as_millis());
                    return 0;
                }
            }
        }

        let mut delivered = self.drain_into(dst);
        while delivered < dst.len() {
            match MIC_STREAM_CH.try_receive() {
                Ok(block) => {
                    self.load(block);
                    delivered += self.drain_into(&mut dst[delivered..]);
                }
                Err(_) => break,
            }
        }
        delivered
    }
}
