//! Seams between the controller and the outside world.

use embassy_time::{Duration, Instant};

/// The push-to-talk input.
pub trait TriggerInput {
    /// `true` while the trigger is held. Polarity is the implementor's concern.
    fn is_active(&mut self) -> bool;
}

/// Output that is lit while a recording is in progress.
pub trait Indicator {
    fn set_active(&mut self, on: bool);
}

/// Source of wide raw samples at a fixed rate, single channel.
pub trait CaptureSource {
    /// Power up the source ahead of a recording.
    async fn start(&mut self) {}

    /// Power the source down once a recording has ended.
    async fn stop(&mut self) {}

    /// Read up to `dst.len()` samples into the front of `dst`.
    ///
    /// Returns the number of samples delivered. Fewer than requested,
    /// including none, is normal. Implementations must return within a
    /// bounded time so the caller can keep polling its trigger.
    async fn read(&mut self, dst: &mut [i32]) -> usize;
}

/// Sink for 16-bit PCM at the capture rate.
pub trait PlaybackSink {
    /// Prepare the output ahead of the first frame of a clip.
    async fn start(&mut self) {}

    /// Release the output after the last frame of a clip.
    async fn stop(&mut self) {}

    /// Play `samples`, returning once they have been handed to the output.
    ///
    /// Returns the number of bytes written.
    async fn write(&mut self, samples: &[i16]) -> usize;
}

/// Monotonic time and delays.
pub trait Clock {
    fn now(&self) -> Instant;

    async fn delay(&mut self, duration: Duration);
}
