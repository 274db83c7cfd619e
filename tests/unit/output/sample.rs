use super::*;
use crate::foundation::core::{Dimensions, Fps};

fn clips(counts: &[u64]) -> Vec<Clip> {
    counts
        .iter()
        .map(|&n| Clip::blank(Dimensions::new(2, 2), n, [0, 0, 0, 255], Fps::default()))
        .collect()
}

#[test]
fn samples_are_sorted_distinct_and_bounded() {
    let mut sampler = RandomFrameSampler::with_seed(7);
    let sample = sampler
        .sample(&clips(&[30_000, 25_010]), 100, 25_000, 25)
        .unwrap();

    assert_eq!(sample.len(), 25);
    let frames = sample.as_slice();
    assert!(frames.windows(2).all(|w| w[0] < w[1]));
    assert!(frames.iter().all(|&f| (100..25_000).contains(&f)));
}

#[test]
fn stop_is_clamped_before_the_last_frames() {
    let mut sampler = RandomFrameSampler::with_seed(1);
    let sample = sampler.sample_counts(&[20], 0, 1_000, 15).unwrap();
    assert_eq!(sample.as_slice(), (0..15).collect::<Vec<_>>().as_slice());

    let err = sampler.sample_counts(&[20], 0, 1_000, 16).unwrap_err();
    assert!(matches!(
        err,
        CompareError::SampleSizeTooLarge {
            count: 16,
            available: 15
        }
    ));
}

#[test]
fn start_past_shortest_clip_fails() {
    let mut sampler = RandomFrameSampler::with_seed(1);
    let err = sampler.sample_counts(&[500, 90], 100, 200, 1).unwrap_err();
    assert!(matches!(
        err,
        CompareError::StartOutOfBounds {
            start: 100,
            frame_count: 90
        }
    ));
}

#[test]
fn start_inside_guard_band_has_nothing_to_sample() {
    let mut sampler = RandomFrameSampler::with_seed(1);
    let err = sampler.sample_counts(&[90], 88, 200, 1).unwrap_err();
    assert!(matches!(
        err,
        CompareError::SampleSizeTooLarge {
            count: 1,
            available: 0
        }
    ));
    assert!(sampler.sample_counts(&[90], 88, 200, 0).unwrap().is_empty());
}

#[test]
fn no_clips_is_a_validation_error() {
    let mut sampler = RandomFrameSampler::with_seed(1);
    assert!(matches!(
        sampler.sample_counts(&[], 0, 10, 1),
        Err(CompareError::Validation(_))
    ));
}

#[test]
fn seeded_samplers_repeat() {
    let a = RandomFrameSampler::with_seed(42)
        .sample_counts(&[10_000], 0, 10_000, 10)
        .unwrap();
    let b = RandomFrameSampler::with_seed(42)
        .sample_counts(&[10_000], 0, 10_000, 10)
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn explicit_frames_are_sorted_and_deduplicated() {
    let sample = FrameSample::from_explicit(&[30, 10, 20, 10], 100).unwrap();
    assert_eq!(sample.into_vec(), vec![10, 20, 30]);
}

#[test]
fn explicit_frame_past_end_fails() {
    let err = FrameSample::from_explicit(&[10, 100], 100).unwrap_err();
    assert!(matches!(
        err,
        CompareError::FrameOutOfBounds {
            frame: 100,
            frame_count: 100
        }
    ));
}
