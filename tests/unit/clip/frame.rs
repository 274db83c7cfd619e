use super::*;

fn numbered(width: u32, height: u32) -> Frame {
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[x as u8, y as u8, 0, 255]);
        }
    }
    Frame::new(width, height, data, FrameProps::default()).unwrap()
}

#[test]
fn new_rejects_wrong_buffer_length() {
    assert!(Frame::new(2, 2, vec![0; 15], FrameProps::default()).is_err());
    assert!(Frame::new(2, 2, vec![0; 16], FrameProps::default()).is_ok());
}

#[test]
fn crop_keeps_interior_pixels_and_props() {
    let mut f = numbered(6, 4);
    f.props.matrix = Some(MATRIX_BT2020_NCL);
    let c = f.crop(Rectangle::new(1, 1, 2, 0)).unwrap();
    assert_eq!((c.width, c.height), (3, 3));
    assert_eq!(c.pixel(0, 0), [1, 1, 0, 255]);
    assert_eq!(c.pixel(2, 2), [3, 3, 0, 255]);
    assert!(c.props.is_hdr());
}

#[test]
fn stacking_inverts_cropping() {
    let f = numbered(5, 3);
    let left = f.crop(Rectangle::new(0, 0, 3, 0)).unwrap();
    let right = f.crop(Rectangle::new(2, 0, 0, 0)).unwrap();
    assert_eq!(Frame::hstack(&[left, right]).unwrap(), f);

    let top = f.crop(Rectangle::new(0, 0, 0, 2)).unwrap();
    let bottom = f.crop(Rectangle::new(0, 1, 0, 0)).unwrap();
    assert_eq!(Frame::vstack(&[top, bottom]).unwrap(), f);
}

#[test]
fn stacking_rejects_mismatched_edges() {
    let a = Frame::filled(2, 2, [0, 0, 0, 255]);
    let b = Frame::filled(2, 3, [0, 0, 0, 255]);
    assert!(Frame::hstack(&[a.clone(), b.clone()]).is_err());
    assert!(Frame::vstack(&[a, Frame::filled(3, 2, [0; 4])]).is_err());
    assert!(Frame::hstack(&[]).is_err());
}

#[test]
fn image_roundtrip_preserves_pixels() {
    let f = numbered(3, 2);
    let img = f.clone().into_rgba_image().unwrap();
    assert_eq!(Frame::from_rgba_image(img, FrameProps::default()), f);
}
