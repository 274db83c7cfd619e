use super::*;
use crate::foundation::core::{Dimensions, Fps, FrameIndex};

#[test]
fn label_carries_title_and_frame_number() {
    let clip = Clip::blank(Dimensions::new(2, 2), 5, [9, 9, 9, 255], Fps::default());
    let out = LabelFrameInfo.annotate(&clip, "x264 crf18").unwrap();

    let f = out.get_frame(FrameIndex(3)).unwrap();
    assert_eq!(f.props.title.as_deref(), Some("x264 crf18"));
    assert_eq!(f.props.label.as_deref(), Some("Frame 3 of 5 | x264 crf18"));
    assert_eq!(f.pixel(1, 1), [9, 9, 9, 255]);
    assert_eq!(out.dimensions(), clip.dimensions());
    assert_eq!(out.frame_count(), 5);
}
