use super::*;

#[test]
fn encode_scales_and_writes_little_endian() {
    let bytes = encode_pcm16(&[0.0, 0.5, -0.5]);
    assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x40, 0x00, 0xc0]);
}

#[test]
fn encode_clamps_out_of_range_samples() {
    let bytes = encode_pcm16(&[1.0, 2.5, -1.0, -3.0]);
    let values: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|p| i16::from_le_bytes([p[0], p[1]]))
        .collect();
    assert_eq!(values, vec![i16::MAX, i16::MAX, i16::MIN, i16::MIN]);
}

#[test]
fn decode_divides_by_32768() {
    let samples = decode_pcm16(&[0x00, 0x40, 0x00, 0x80]);
    assert_eq!(samples, vec![0.5, -1.0]);
}

#[test]
fn decode_ignores_trailing_odd_byte() {
    assert_eq!(decode_pcm16(&[0x00, 0x40, 0x7f]).len(), 1);
    assert!(decode_pcm16(&[]).is_empty());
}

#[test]
fn decode_inverts_encode_within_one_step() {
    let input = [0.25_f32, -0.75, 0.1];
    let output = decode_pcm16(&encode_pcm16(&input));
    for (a, b) in input.iter().zip(&output) {
        assert!((a - b).abs() <= 1.0 / 32_768.0);
    }
}

#[test]
fn level_threshold_marks_speaking() {
    let quiet = vec![0.01_f32; 4096];
    let loud = vec![-0.05_f32; 4096];
    assert!(voice_level(&quiet) < SPEAKING_THRESHOLD);
    assert!(!is_speaking(&quiet));
    assert!(is_speaking(&loud));
}

#[test]
fn duration_counts_two_bytes_per_sample() {
    assert!((pcm16_duration(48_000, 24_000) - 1.0).abs() < f64::EPSILON);
    assert!(pcm16_duration(100, 0).abs() < f64::EPSILON);
}
