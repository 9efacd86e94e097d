//! Frame-synchronous wrapper around a speech encoder/decoder pair.
//!
//! One call in, one callback out: [`FrameEncoder::encode`] hands the packet
//! for exactly one frame to its callback before returning, and
//! [`FrameDecoder::decode`] does the same with the reconstructed frame.
//! Nothing is queued, so at most one frame is ever in flight.

use crate::{FRAME_SAMPLES, MAX_PACKET_BYTES};

/// An encoder that has already been initialized.
///
/// Its state persists from one frame to the next for the life of the
/// process.
pub trait SpeechEncoder {
    /// Compress one frame into `packet`, returning the packet length.
    fn encode(
        &mut self,
        pcm: &[i16; FRAME_SAMPLES],
        packet: &mut [u8; MAX_PACKET_BYTES],
    ) -> usize;
}

/// A decoder that has already been initialized.
pub trait SpeechDecoder {
    /// Reconstruct one frame from `packet`, returning the number of samples
    /// produced.
    fn decode(&mut self, packet: &[u8], pcm: &mut [i16; FRAME_SAMPLES]) -> usize;
}

pub struct FrameEncoder<E> {
    encoder: E,
    packet: [u8; MAX_PACKET_BYTES],
}

impl<E: SpeechEncoder> FrameEncoder<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder, packet: [0; MAX_PACKET_BYTES] }
    }

    /// Encode `frame` and pass the resulting packet to `on_packet`.
    pub fn encode<'s, R>(
        &'s mut self,
        frame: &[i16; FRAME_SAMPLES],
        on_packet: impl FnOnce(&'s [u8]) -> R,
    ) -> R {
        let len = self.encoder.encode(frame, &mut self.packet);
        on_packet(&self.packet[..len.min(MAX_PACKET_BYTES)])
    }

    pub fn inner(&self) -> &E {
        &self.encoder
    }
}

pub struct FrameDecoder<D> {
    decoder: D,
    pcm: [i16; FRAME_SAMPLES],
}

impl<D: SpeechDecoder> FrameDecoder<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder, pcm: [0; FRAME_SAMPLES] }
    }

    /// Decode `packet` and pass the reconstructed frame to `write`.
    ///
    /// Samples the decoder did not produce are silence.
    pub fn decode<'s, R>(
        &'s mut self,
        packet: &[u8],
        write: impl FnOnce(&'s [i16; FRAME_SAMPLES]) -> R,
    ) -> R {
        let produced = self.decoder.decode(packet, &mut self.pcm);
        if produced < FRAME_SAMPLES {
            self.pcm[produced..].fill(0);
        }
        write(&self.pcm)
    }

    pub fn inner(&self) -> &D {
        &self.decoder
    }
}
