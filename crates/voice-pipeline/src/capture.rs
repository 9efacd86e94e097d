use crate::filter::VoiceFilters;
use crate::FRAME_SAMPLES;

/// Storage for one clip: the raw wide capture and its conditioned PCM.
///
/// Both stores are borrowed, pre-allocated arrays of exactly `N` samples;
/// nothing here grows. `N` must be a non-zero multiple of
/// [`FRAME_SAMPLES`], which is checked when the buffer is built.
///
/// The cursor counts captured samples while recording. Once the clip has
/// been conditioned it is rewound and reused as the playback read position.
pub struct CaptureBuffer<'a, const N: usize> {
    raw: &'a mut [i32; N],
    filtered: &'a mut [i16; N],
    cursor: usize,
}

impl<'a, const N: usize> CaptureBuffer<'a, N> {
    const FRAME_ALIGNED: () = assert!(
        N > 0 && N % FRAME_SAMPLES == 0,
        "capture buffer length must be a non-zero multiple of the frame length"
    );

    /// Number of frames in a full clip.
    pub const FRAMES: usize = N / FRAME_SAMPLES;

    pub fn new(raw: &'a mut [i32; N], filtered: &'a mut [i16; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FRAME_ALIGNED;
        Self { raw, filtered, cursor: 0 }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Samples captured so far, or the playback position after [`rewind`](Self::rewind).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Start a new capture.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn is_full(&self) -> bool {
        self.cursor >= N
    }

    pub fn remaining(&self) -> usize {
        N - self.cursor
    }

    /// The part of the raw store not yet written by this capture.
    pub fn unfilled_mut(&mut self) -> &mut [i32] {
        &mut self.raw[self.cursor..]
    }

    /// Account for `count` samples written into [`unfilled_mut`](Self::unfilled_mut).
    pub fn commit(&mut self, count: usize) {
        self.cursor += count.min(self.remaining());
    }

    pub fn raw(&self) -> &[i32] {
        &self.raw[..self.cursor]
    }

    pub fn filtered(&self) -> &[i16; N] {
        self.filtered
    }

    /// Condition every captured sample into the PCM store.
    ///
    /// The unfilled tail of a clip that ended early is silence.
    pub fn condition(&mut self, filters: &mut VoiceFilters) {
        let (captured, tail) = self.filtered.split_at_mut(self.cursor);
        for (out, &raw) in captured.iter_mut().zip(self.raw.iter()) {
            *out = filters.condition(raw);
        }
        tail.fill(0);
    }

    /// Reuse the cursor as the frame read position for playback.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// The frame at the cursor, advancing the cursor past it.
    ///
    /// Frames come out in order, without overlap or gaps, until the clip is
    /// exhausted.
    pub fn next_frame(&mut self) -> Option<&[i16; FRAME_SAMPLES]> {
        let start = self.cursor;
        let frame = self.filtered.get(start..start + FRAME_SAMPLES)?;
        self.cursor += FRAME_SAMPLES;
        frame.try_into().ok()
    }
}
