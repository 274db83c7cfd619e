use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;

use crate::clip::frame::Frame;
use crate::clip::node::Clip;
use crate::clip::ops::map_frames;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{CompareError, CompareResult};

/// Resizes a clip to new dimensions.
pub trait Resizer: Send + Sync {
    /// Return `clip` scaled to `width`x`height`.
    fn resize(&self, clip: &Clip, width: u32, height: u32) -> CompareResult<Clip>;
}

/// Selectable resampling kernels.
///
/// Each kernel is its own [`Resizer`]. The resampling itself is delegated to `image`; kernels
/// without an exact `image` counterpart use the closest available filter (see [`Self::filter`]).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResizeKernel {
    /// Two-tap linear interpolation.
    Bilinear,
    /// Bicubic (Catmull-Rom).
    Bicubic,
    /// Nearest neighbour.
    Point,
    /// Three-lobe Lanczos.
    Lanczos,
    /// Four-tap spline.
    Spline16,
    /// Six-tap spline.
    #[default]
    Spline36,
    /// Eight-tap spline.
    Spline64,
}

impl ResizeKernel {
    /// Every kernel, in CLI listing order.
    pub const ALL: [Self; 7] = [
        Self::Bilinear,
        Self::Bicubic,
        Self::Point,
        Self::Lanczos,
        Self::Spline16,
        Self::Spline36,
        Self::Spline64,
    ];

    /// Lowercase name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
            Self::Point => "point",
            Self::Lanczos => "lanczos",
            Self::Spline16 => "spline16",
            Self::Spline36 => "spline36",
            Self::Spline64 => "spline64",
        }
    }

    /// `image` filter invoked for this kernel.
    ///
    /// Spline16 shares Catmull-Rom's support; Spline36 and Spline64 map to Lanczos3, the widest
    /// windowed filter `image` offers.
    pub fn filter(self) -> FilterType {
        match self {
            Self::Bilinear => FilterType::Triangle,
            Self::Bicubic | Self::Spline16 => FilterType::CatmullRom,
            Self::Point => FilterType::Nearest,
            Self::Lanczos | Self::Spline36 | Self::Spline64 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResizeKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeKernel {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| CompareError::UnknownKernel(s.to_string()))
    }
}

impl Resizer for ResizeKernel {
    fn resize(&self, clip: &Clip, width: u32, height: u32) -> CompareResult<Clip> {
        if width == 0 || height == 0 {
            return Err(CompareError::validation(format!(
                "cannot resize to {width}x{height}"
            )));
        }
        let target = Dimensions::new(width, height);
        if clip.dimensions() == target {
            return Ok(clip.clone());
        }

        let filter = self.filter();
        Ok(map_frames(clip, target, move |frame, _| {
            let props = frame.props.clone();
            let img = frame.into_rgba_image()?;
            let resized = image::imageops::resize(&img, width, height, filter);
            Ok(Frame::from_rgba_image(resized, props))
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/kernel.rs"]
mod tests;
