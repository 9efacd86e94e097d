#![no_std]
#![allow(async_fn_in_trait)]
//! Push-to-talk capture/filter/frame pipeline.
//!
//! A [`Controller`] polls a trigger, fills a fixed-capacity [`CaptureBuffer`]
//! from a [`CaptureSource`] while the trigger is held (bounded by a recording
//! ceiling), conditions every captured sample through the [`VoiceFilters`],
//! and then walks the conditioned clip frame by frame through a speech codec
//! (encode immediately followed by decode) into a [`PlaybackSink`].
//!
//! The hardware collaborators are traits so the state machine can be driven
//! by fakes on the host and by embassy drivers on the device.

// This must go first so the macros are visible to the other modules.
mod fmt;

pub mod adpcm;
pub mod capture;
pub mod codec;
pub mod config;
pub mod controller;
pub mod filter;
pub mod io;

pub use adpcm::{ImaAdpcmDecoder, ImaAdpcmEncoder};
pub use capture::CaptureBuffer;
pub use codec::{FrameDecoder, FrameEncoder, SpeechDecoder, SpeechEncoder};
pub use config::PipelineConfig;
pub use controller::{Controller, ControllerState, Devices};
pub use filter::{limit_amplitude, DcBlock, OnePoleHighPass, SampleFilter, VoiceFilters};
pub use io::{CaptureSource, Clock, Indicator, PlaybackSink, TriggerInput};

/// Number of PCM samples in one codec frame.
pub const FRAME_SAMPLES: usize = 320;

/// Upper bound on the size of one encoded packet.
pub const MAX_PACKET_BYTES: usize = 1276;

/// Right shift that reduces a wide capture sample to 16-bit PCM.
pub const SAMPLE_SHIFT: u32 = 11;
