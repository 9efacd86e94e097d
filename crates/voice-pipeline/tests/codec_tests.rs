use voice_pipeline::adpcm::{HEADER_BYTES, PACKET_BYTES};
use voice_pipeline::{
    FrameDecoder, FrameEncoder, ImaAdpcmDecoder, ImaAdpcmEncoder, FRAME_SAMPLES,
};

fn tone(offset: usize) -> [i16; FRAME_SAMPLES] {
    let mut frame = [0i16; FRAME_SAMPLES];
    for (i, sample) in frame.iter_mut().enumerate() {
        // Triangle wave, period 64 samples, +-8000.
        let phase = ((i + offset) % 64) as i32;
        let tri = if phase < 32 { phase } else { 64 - phase };
        *sample = ((tri - 16) * 500) as i16;
    }
    frame
}

fn max_error(a: &[i16], b: &[i16]) -> i32 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x as i32 - y as i32).abs())
        .max()
        .unwrap_or(0)
}

#[test]
fn encode_hands_one_packet_to_callback() {
    let mut encoder = FrameEncoder::new(ImaAdpcmEncoder::new());
    let mut calls = 0;
    let len = encoder.encode(&tone(0), |packet| {
        calls += 1;
        packet.len()
    });
    assert_eq!(calls, 1);
    assert_eq!(len, PACKET_BYTES);
}

#[test]
fn packet_header_carries_state_before_frame() {
    let mut encoder = FrameEncoder::new(ImaAdpcmEncoder::new());
    encoder.encode(&tone(0), |_| ());

    let (predictor, step_index) = encoder.inner().decoder_state();
    let header = encoder.encode(&tone(FRAME_SAMPLES), |packet| {
        [packet[0], packet[1], packet[2], packet[3]]
    });

    assert_eq!(i16::from_le_bytes([header[0], header[1]]), predictor);
    assert_eq!(header[2], step_index);
    assert_eq!(header[3], 0);
}

#[test]
fn round_trip_tracks_the_signal() {
    let mut encoder = FrameEncoder::new(ImaAdpcmEncoder::new());
    let mut decoder = FrameDecoder::new(ImaAdpcmDecoder::new());

    // Let the step size adapt, then check a steady-state frame.
    for n in 0..3 {
        let frame = tone(n * FRAME_SAMPLES);
        let decoded = encoder
            .encode(&frame, |packet| decoder.decode(packet, |pcm| *pcm));
        if n == 2 {
            assert!(max_error(&frame, &decoded) < 2500);
        }
    }
}

#[test]
fn packets_decode_independently() {
    let mut encoder = FrameEncoder::new(ImaAdpcmEncoder::new());
    let mut packets = Vec::new();
    for n in 0..4 {
        encoder.encode(&tone(n * FRAME_SAMPLES), |packet| {
            packets.push(packet.to_vec())
        });
    }

    // Decoding only the last packet matches decoding the whole stream.
    let mut in_order = FrameDecoder::new(ImaAdpcmDecoder::new());
    let mut last = [0i16; FRAME_SAMPLES];
    for packet in &packets {
        last = in_order.decode(packet, |pcm| *pcm);
    }
    let mut alone = FrameDecoder::new(ImaAdpcmDecoder::new());
    let isolated = alone.decode(&packets[3], |pcm| *pcm);

    assert_eq!(last, isolated);
}

#[test]
fn short_packet_decodes_to_silence_tail() {
    let mut encoder = FrameEncoder::new(ImaAdpcmEncoder::new());
    let packet = encoder.encode(&tone(0), |packet| packet.to_vec());

    let mut decoder = FrameDecoder::new(ImaAdpcmDecoder::new());
    let truncated = &packet[..HEADER_BYTES + 10];
    let pcm = decoder.decode(truncated, |pcm| *pcm);
    assert!(pcm[20..].iter().all(|&s| s == 0));

    let pcm = decoder.decode(&packet[..2], |pcm| *pcm);
    assert!(pcm.iter().all(|&s| s == 0));
}

#[test]
fn silence_stays_silent() {
    let mut encoder = FrameEncoder::new(ImaAdpcmEncoder::new());
    let mut decoder = FrameDecoder::new(ImaAdpcmDecoder::new());
    let silence = [0i16; FRAME_SAMPLES];
    let decoded =
        encoder.encode(&silence, |packet| decoder.decode(packet, |pcm| *pcm));
    assert!(max_error(&silence, &decoded) <= 8);
}
