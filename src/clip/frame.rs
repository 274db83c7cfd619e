use crate::foundation::core::{Dimensions, Rectangle};
use crate::foundation::error::{CompareError, CompareResult};

/// ITU-T H.273 matrix coefficients code point for BT.2020 non-constant luminance.
pub const MATRIX_BT2020_NCL: u8 = 9;

/// Per-frame metadata carried alongside pixels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameProps {
    /// Matrix coefficients (ITU-T H.273 code point), if known.
    pub matrix: Option<u8>,
    /// Transfer characteristics (ITU-T H.273 code point), if known.
    pub transfer: Option<u8>,
    /// Rendition title, set by the frame-info overlay.
    pub title: Option<String>,
    /// Frame-info text stamped by an overlay collaborator.
    pub label: Option<String>,
}

impl FrameProps {
    /// Whether the frame reports a BT.2020 non-constant-luminance matrix.
    pub fn is_hdr(&self) -> bool {
        self.matrix == Some(MATRIX_BT2020_NCL)
    }
}

/// A decoded frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Metadata attached to this frame.
    pub props: FrameProps,
}

impl Frame {
    /// Wrap an RGBA8 buffer, checking that its length matches `width*height*4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>, props: FrameProps) -> CompareResult<Self> {
        let expected = rgba_len(width, height)?;
        if data.len() != expected {
            return Err(CompareError::validation(format!(
                "frame buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            props,
        })
    }

    /// A frame filled with one color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            data,
            props: FrameProps::default(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Copy out the pixels left inside `margins`. Props are kept.
    pub fn crop(&self, margins: Rectangle) -> CompareResult<Frame> {
        let out = margins.interior(self.dimensions())?;
        let x0 = margins.left as usize * 4;
        let x1 = x0 + out.width as usize * 4;

        let mut data = Vec::with_capacity(out.pixel_count() * 4);
        for y in margins.top..margins.top + out.height {
            data.extend_from_slice(&self.row(y)[x0..x1]);
        }
        Ok(Frame {
            width: out.width,
            height: out.height,
            data,
            props: self.props.clone(),
        })
    }

    /// Place frames side by side, left to right. Props come from the first frame.
    pub fn hstack(frames: &[Frame]) -> CompareResult<Frame> {
        let first = frames
            .first()
            .ok_or_else(|| CompareError::validation("hstack needs at least one frame"))?;
        let height = first.height;
        if frames.iter().any(|f| f.height != height) {
            return Err(CompareError::validation(
                "hstack expects frames of equal height",
            ));
        }
        let width = frames.iter().map(|f| f.width).sum::<u32>();

        let mut data = Vec::with_capacity(rgba_len(width, height)?);
        for y in 0..height {
            for f in frames {
                data.extend_from_slice(f.row(y));
            }
        }
        Ok(Frame {
            width,
            height,
            data,
            props: first.props.clone(),
        })
    }

    /// Place frames top to bottom. Props come from the first frame.
    pub fn vstack(frames: &[Frame]) -> CompareResult<Frame> {
        let first = frames
            .first()
            .ok_or_else(|| CompareError::validation("vstack needs at least one frame"))?;
        let width = first.width;
        if frames.iter().any(|f| f.width != width) {
            return Err(CompareError::validation("vstack expects frames of equal width"));
        }
        let height = frames.iter().map(|f| f.height).sum::<u32>();

        let mut data = Vec::with_capacity(rgba_len(width, height)?);
        for f in frames {
            data.extend_from_slice(&f.data);
        }
        Ok(Frame {
            width,
            height,
            data,
            props: first.props.clone(),
        })
    }

    /// Convert into an `image` buffer, dropping props.
    pub fn into_rgba_image(self) -> CompareResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| CompareError::validation("frame buffer does not match its dimensions"))
    }

    /// Wrap an `image` buffer with the given props.
    pub fn from_rgba_image(img: image::RgbaImage, props: FrameProps) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
            props,
        }
    }
}

fn rgba_len(width: u32, height: u32) -> CompareResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CompareError::validation("frame buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/clip/frame.rs"]
mod tests;
