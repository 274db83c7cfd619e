use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn inclusive_range_includes_end_and_rejects_reversed() {
    let r = FrameRange::inclusive(10, 20).unwrap();
    assert_eq!(r.len_frames(), 11);
    assert!(r.contains(FrameIndex(20)));

    assert!(matches!(
        FrameRange::inclusive(20, 20),
        Err(CompareError::InvalidFrameRange { start: 20, end: 20 })
    ));
    assert!(FrameRange::inclusive(30, 20).is_err());
}

#[test]
fn inclusive_range_rejects_end_at_u64_max() {
    assert!(matches!(
        FrameRange::inclusive(0, u64::MAX),
        Err(CompareError::InvalidFrameRange {
            start: 0,
            end: u64::MAX
        })
    ));
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.as_f64() - 29.97).abs() < 0.001);
}

#[test]
fn aspect_comparison_is_exact() {
    assert!(Dimensions::new(1920, 1080).same_aspect(Dimensions::new(1280, 720)));
    assert!(Dimensions::new(3840, 1600).same_aspect(Dimensions::new(1920, 800)));
    assert!(!Dimensions::new(1920, 1080).same_aspect(Dimensions::new(1920, 1036)));
    assert_eq!(Dimensions::new(1920, 1080).to_string(), "1920x1080");
}

#[test]
fn rectangle_interior_rejects_exhausted_axes() {
    let frame = Dimensions::new(100, 50);
    assert_eq!(
        Rectangle::new(10, 5, 20, 5).interior(frame).unwrap(),
        Dimensions::new(70, 40)
    );
    assert!(matches!(
        Rectangle::new(50, 0, 50, 0).interior(frame),
        Err(CompareError::InvalidRegion(_))
    ));
    assert!(matches!(
        Rectangle::new(0, 25, 0, 30).interior(frame),
        Err(CompareError::InvalidRegion(_))
    ));
    assert!(Rectangle::new(u32::MAX, 0, u32::MAX, 0).interior(frame).is_err());
}

#[test]
fn rectangle_contains_is_exclusive_of_margins() {
    let frame = Dimensions::new(10, 10);
    let r = Rectangle::new(2, 3, 4, 1);
    assert!(r.contains(frame, 2, 3));
    assert!(r.contains(frame, 5, 8));
    assert!(!r.contains(frame, 1, 3));
    assert!(!r.contains(frame, 6, 3));
    assert!(!r.contains(frame, 2, 9));
    assert!(r.has_vertical() && r.has_horizontal());
    assert!(Rectangle::default().is_zero());
}
