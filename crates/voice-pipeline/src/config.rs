use embassy_time::Duration;

/// Timing parameters of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PipelineConfig {
    /// Recording ends once more than this has elapsed since it started.
    pub recording_ceiling: Duration,
    /// Pause between the end of a recording and the start of playback,
    /// letting the button release settle.
    pub settle_delay: Duration,
    /// Delay between two controller steps in [`Controller::run`](crate::Controller::run).
    pub poll_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            recording_ceiling: Duration::from_secs(5),
            settle_delay: Duration::from_secs(1),
            poll_interval: Duration::from_millis(10),
        }
    }
}
