//! IMA ADPCM speech codec, 4 bits per sample.
//!
//! Packet layout for one frame:
//!
//! | bytes | contents |
//! |---|---|
//! | 0..2 | predictor before the frame, little-endian `i16` |
//! | 2 | step index before the frame |
//! | 3 | reserved, zero |
//! | 4.. | two codes per byte, first sample in the low nibble |
//!
//! The header makes every packet decodable on its own, so the encoder can
//! keep its state across frames and recordings while the decoder simply
//! re-seeds from each packet.

use audio_codec_algorithms::{decode_adpcm_ima, encode_adpcm_ima, AdpcmImaState};

use crate::codec::{SpeechDecoder, SpeechEncoder};
use crate::{FRAME_SAMPLES, MAX_PACKET_BYTES};

pub const HEADER_BYTES: usize = 4;

/// Size of the packet produced for one frame.
pub const PACKET_BYTES: usize = HEADER_BYTES + FRAME_SAMPLES / 2;

const _: () = assert!(PACKET_BYTES <= MAX_PACKET_BYTES);

pub struct ImaAdpcmEncoder {
    state: AdpcmImaState,
}

impl Default for ImaAdpcmEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImaAdpcmEncoder {
    pub fn new() -> Self {
        Self { state: AdpcmImaState::new() }
    }

    /// Snapshot of the state the next packet header will carry.
    pub fn decoder_state(&self) -> (i16, u8) {
        (self.state.predictor as i16, self.state.step_index as u8)
    }
}

impl SpeechEncoder for ImaAdpcmEncoder {
    fn encode(
        &mut self,
        pcm: &[i16; FRAME_SAMPLES],
        packet: &mut [u8; MAX_PACKET_BYTES],
    ) -> usize {
        let (predictor, step_index) = self.decoder_state();
        packet[..2].copy_from_slice(&predictor.to_le_bytes());
        packet[2] = step_index;
        packet[3] = 0;

        let codes = &mut packet[HEADER_BYTES..PACKET_BYTES];
        for (byte, pair) in codes.iter_mut().zip(pcm.chunks_exact(2)) {
            let lo = encode_adpcm_ima(pair[0], &mut self.state);
            let hi = encode_adpcm_ima(pair[1], &mut self.state);
            *byte = (hi << 4) | (lo & 0x0F);
        }
        PACKET_BYTES
    }
}

#[derive(Default)]
pub struct ImaAdpcmDecoder;

impl ImaAdpcmDecoder {
    pub const fn new() -> Self {
        Self
    }
}

impl SpeechDecoder for ImaAdpcmDecoder {
    fn decode(&mut self, packet: &[u8], pcm: &mut [i16; FRAME_SAMPLES]) -> usize {
        if packet.len() < HEADER_BYTES {
            return 0;
        }
        let mut state = AdpcmImaState::new();
        state.predictor = i16::from_le_bytes([packet[0], packet[1]]).into();
        state.step_index = packet[2].into();

        let mut produced = 0;
        for (&byte, pair) in packet[HEADER_BYTES..]
            .iter()
            .zip(pcm.chunks_exact_mut(2))
        {
            pair[0] = decode_adpcm_ima(byte & 0x0F, &mut state);
            pair[1] = decode_adpcm_ima(byte >> 4, &mut state);
            produced += 2;
        }
        produced
    }
}
