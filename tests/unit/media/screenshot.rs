use super::*;
use crate::clip::frame::FrameProps;
use crate::foundation::core::{Dimensions, Fps};
use crate::media::overlay::{FrameInfo, LabelFrameInfo};

fn read_png(path: &Path) -> (png::OutputInfo, Vec<u8>, Vec<(String, String)>) {
    let decoder = png::Decoder::new(std::fs::File::open(path).unwrap());
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    let text = reader
        .info()
        .uncompressed_latin1_text
        .iter()
        .map(|c| (c.keyword.clone(), c.text.clone()))
        .collect();
    (info, buf, text)
}

#[test]
fn files_are_named_frame_then_tag() {
    let dir = tempfile::tempdir().unwrap();
    let clip = Clip::blank(Dimensions::new(4, 2), 10, [1, 2, 3, 255], Fps::default());

    let written = PngScreenshotWriter
        .write(&clip, dir.path(), 'b', &[3, 7])
        .unwrap();
    assert_eq!(
        written,
        vec![dir.path().join("3b.png"), dir.path().join("7b.png")]
    );

    let (info, data, text) = read_png(&written[0]);
    assert_eq!((info.width, info.height), (4, 2));
    assert_eq!(info.color_type, png::ColorType::Rgba);
    assert_eq!(&data[..4], &[1, 2, 3, 255]);
    assert!(text.is_empty());
}

#[test]
fn titled_frames_get_text_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let clip = Clip::blank(Dimensions::new(2, 2), 4, [0, 0, 0, 255], Fps::default());
    let clip = LabelFrameInfo.annotate(&clip, "Source").unwrap();

    let written = PngScreenshotWriter.write(&clip, dir.path(), 'a', &[2]).unwrap();
    let (_, _, text) = read_png(&written[0]);
    assert!(text.contains(&("Title".to_string(), "Source".to_string())));
    assert!(text.contains(&("Frame".to_string(), "2".to_string())));
}

#[test]
fn existing_file_is_a_collision() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("0a.png"), b"keep").unwrap();
    let frame = Frame::new(1, 1, vec![0, 0, 0, 255], FrameProps::default()).unwrap();
    let clip = Clip::from_frames(vec![frame], Fps::default()).unwrap();

    let err = PngScreenshotWriter
        .write(&clip, dir.path(), 'a', &[0])
        .unwrap_err();
    assert!(matches!(err, CompareError::OutputCollision(_)));
    assert_eq!(std::fs::read(dir.path().join("0a.png")).unwrap(), b"keep");
}

#[test]
fn out_of_range_frame_fails() {
    let dir = tempfile::tempdir().unwrap();
    let clip = Clip::blank(Dimensions::new(2, 2), 2, [0, 0, 0, 255], Fps::default());
    let err = PngScreenshotWriter.write(&clip, dir.path(), 'a', &[5]).unwrap_err();
    assert!(matches!(err, CompareError::FrameOutOfBounds { frame: 5, .. }));
}
