use voice_pipeline::{CaptureBuffer, VoiceFilters, FRAME_SAMPLES};

const N: usize = 4 * FRAME_SAMPLES;

#[test]
fn commit_never_exceeds_capacity() {
    let (mut raw, mut filtered) = ([0i32; N], [0i16; N]);
    let mut buffer = CaptureBuffer::new(&mut raw, &mut filtered);

    buffer.commit(N - 10);
    assert_eq!(buffer.remaining(), 10);
    assert_eq!(buffer.unfilled_mut().len(), 10);

    buffer.commit(25);
    assert!(buffer.is_full());
    assert_eq!(buffer.cursor(), N);
    assert!(buffer.unfilled_mut().is_empty());
}

#[test]
fn unfilled_region_starts_at_cursor() {
    let (mut raw, mut filtered) = ([0i32; N], [0i16; N]);
    let mut buffer = CaptureBuffer::new(&mut raw, &mut filtered);

    buffer.unfilled_mut()[..3].copy_from_slice(&[1, 2, 3]);
    buffer.commit(3);
    buffer.unfilled_mut()[..2].copy_from_slice(&[4, 5]);
    buffer.commit(2);

    assert_eq!(buffer.raw(), &[1, 2, 3, 4, 5]);
}

#[test]
fn condition_filters_captured_prefix_and_silences_tail() {
    let (mut raw, mut filtered) = ([0i32; N], [0i16; N]);
    filtered.fill(-1);
    let mut buffer = CaptureBuffer::new(&mut raw, &mut filtered);

    let captured: Vec<i32> = (0..100).map(|i| (i - 50) << 16).collect();
    buffer.unfilled_mut()[..100].copy_from_slice(&captured);
    buffer.commit(100);
    buffer.condition(&mut VoiceFilters::new());

    let mut filters = VoiceFilters::new();
    let expected: Vec<i16> = captured.iter().map(|&x| filters.condition(x)).collect();
    assert_eq!(&buffer.filtered()[..100], &expected[..]);
    assert!(buffer.filtered()[100..].iter().all(|&s| s == 0));
}

#[test]
fn frames_partition_the_clip() {
    let (mut raw, mut filtered) = ([0i32; N], [0i16; N]);
    let mut buffer = CaptureBuffer::new(&mut raw, &mut filtered);
    assert_eq!(CaptureBuffer::<N>::FRAMES, 4);

    buffer.commit(N);
    buffer.condition(&mut VoiceFilters::new());
    buffer.rewind();

    let mut starts = Vec::new();
    while let Some(frame) = buffer.next_frame() {
        assert_eq!(frame.len(), FRAME_SAMPLES);
        starts.push(buffer.cursor() - FRAME_SAMPLES);
    }
    assert_eq!(starts, vec![0, 320, 640, 960]);
    assert!(buffer.next_frame().is_none());
}

#[test]
fn reset_starts_a_new_capture() {
    let (mut raw, mut filtered) = ([0i32; N], [0i16; N]);
    let mut buffer = CaptureBuffer::new(&mut raw, &mut filtered);

    buffer.commit(500);
    buffer.reset();

    assert_eq!(buffer.cursor(), 0);
    assert_eq!(buffer.remaining(), N);
    assert!(buffer.raw().is_empty());
}
