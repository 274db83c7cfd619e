use super::*;
use crate::clip::frame::Frame;
use crate::clip::node::ClipInfo;
use crate::foundation::core::{Dimensions, Fps, FrameIndex};

fn coords_clip(width: u32, height: u32, frame_count: u64) -> Clip {
    let info = ClipInfo {
        dimensions: Dimensions::new(width, height),
        frame_count,
        fps: Fps::default(),
    };
    Clip::from_fn(info, move |idx| {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, idx.0 as u8, 255]);
            }
        }
        Frame::new(width, height, data, Default::default())
    })
}

fn invert(clip: Clip) -> CompareResult<Clip> {
    Ok(ops::map_frames(&clip, clip.dimensions(), |mut f, _| {
        for px in f.data.chunks_exact_mut(4) {
            px[0] = 255 - px[0];
            px[1] = 255 - px[1];
            px[2] = 255 - px[2];
        }
        Ok(f)
    }))
}

fn assert_masked(region: Rectangle) {
    let clip = coords_clip(12, 10, 2);
    let out = rekt(&clip, region, &invert).unwrap();
    assert_eq!(out.dimensions(), clip.dimensions());
    assert_eq!(out.frame_count(), clip.frame_count());

    let dims = clip.dimensions();
    for n in 0..2 {
        let src = clip.get_frame(FrameIndex(n)).unwrap();
        let got = out.get_frame(FrameIndex(n)).unwrap();
        for y in 0..dims.height {
            for x in 0..dims.width {
                let p = src.pixel(x, y);
                if region.contains(dims, x, y) {
                    assert_eq!(
                        got.pixel(x, y),
                        [255 - p[0], 255 - p[1], 255 - p[2], 255],
                        "inside ({x},{y}) for {region:?}"
                    );
                } else {
                    assert_eq!(got.pixel(x, y), p, "outside ({x},{y}) for {region:?}");
                }
            }
        }
    }
}

#[test]
fn only_the_region_is_transformed() {
    for region in [
        Rectangle::new(2, 0, 0, 0),
        Rectangle::new(0, 0, 3, 0),
        Rectangle::new(2, 0, 3, 0),
        Rectangle::new(0, 1, 0, 0),
        Rectangle::new(0, 0, 0, 4),
        Rectangle::new(0, 2, 0, 3),
        Rectangle::new(1, 2, 3, 4),
        Rectangle::new(11, 0, 0, 9),
        Rectangle::new(0, 9, 11, 0),
        Rectangle::new(5, 4, 6, 5),
    ] {
        assert_masked(region);
    }
}

#[test]
fn zero_margins_equal_the_plain_transform() {
    let clip = coords_clip(6, 4, 2);
    let masked = rekt(&clip, Rectangle::default(), &invert).unwrap();
    let direct = invert(clip).unwrap();
    for n in 0..2 {
        assert_eq!(
            masked.get_frame(FrameIndex(n)).unwrap(),
            direct.get_frame(FrameIndex(n)).unwrap()
        );
    }
}

#[test]
fn transform_sees_only_the_interior() {
    let clip = coords_clip(10, 8, 1);
    let seen = std::cell::Cell::new(Dimensions::new(0, 0));
    let probe = |c: Clip| -> CompareResult<Clip> {
        seen.set(c.dimensions());
        Ok(c)
    };
    rekt(&clip, Rectangle::new(1, 2, 3, 4), &probe).unwrap();
    assert_eq!(seen.get(), Dimensions::new(6, 2));
}

#[test]
fn hostile_transform_cannot_touch_the_border() {
    let clip = coords_clip(8, 8, 1);
    let flood = |c: Clip| -> CompareResult<Clip> {
        Ok(Clip::blank(
            c.dimensions(),
            c.frame_count(),
            [9, 9, 9, 9],
            c.fps(),
        ))
    };
    let region = Rectangle::new(2, 2, 2, 2);
    let out = rekt(&clip, region, &flood).unwrap();

    let src = clip.get_frame(FrameIndex(0)).unwrap();
    let got = out.get_frame(FrameIndex(0)).unwrap();
    for y in 0..8 {
        for x in 0..8 {
            if region.contains(clip.dimensions(), x, y) {
                assert_eq!(got.pixel(x, y), [9, 9, 9, 9]);
            } else {
                assert_eq!(got.pixel(x, y), src.pixel(x, y));
            }
        }
    }
}

#[test]
fn exhausted_regions_are_rejected() {
    let clip = coords_clip(8, 6, 1);
    for region in [
        Rectangle::new(4, 0, 4, 0),
        Rectangle::new(0, 3, 0, 3),
        Rectangle::new(9, 0, 0, 0),
    ] {
        assert!(matches!(
            rekt(&clip, region, &invert),
            Err(CompareError::InvalidRegion(_))
        ));
    }
}

#[test]
fn geometry_changing_transforms_are_rejected() {
    let clip = coords_clip(8, 6, 2);
    let shrink = |c: Clip| -> CompareResult<Clip> { ops::crop(&c, Rectangle::new(1, 0, 0, 0)) };
    assert!(matches!(
        rekt(&clip, Rectangle::new(2, 1, 2, 1), &shrink),
        Err(CompareError::TransformGeometry { .. })
    ));
    assert!(matches!(
        rekt(&clip, Rectangle::default(), &shrink),
        Err(CompareError::TransformGeometry { .. })
    ));

    let shorten = |c: Clip| -> CompareResult<Clip> {
        ops::trim(
            &c,
            crate::foundation::core::FrameRange::new(FrameIndex(0), FrameIndex(1))?,
        )
    };
    assert!(rekt(&clip, Rectangle::new(0, 1, 0, 1), &shorten).is_err());
}
