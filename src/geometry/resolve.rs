use std::fmt;

use crate::clip::node::Clip;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{CompareError, CompareResult};
use crate::geometry::kernel::{ResizeKernel, Resizer};

/// Width differences up to this many pixels are treated as crop differences, not scaling.
pub const WIDTH_DELTA_TOLERANCE: u32 = 600;

/// Ordered renditions of one title: the source first, then its encodes.
#[derive(Clone, Debug)]
pub struct RenditionSet {
    clips: Vec<Clip>,
}

impl RenditionSet {
    /// Build a set from `clips`, where `clips[0]` is the source.
    ///
    /// When more than one encode is present they must share one aspect ratio.
    pub fn new(clips: Vec<Clip>) -> CompareResult<Self> {
        if clips.is_empty() {
            return Err(CompareError::validation(
                "a rendition set needs at least a source clip",
            ));
        }
        let set = Self { clips };
        set.check_encode_aspect()?;
        Ok(set)
    }

    pub fn source(&self) -> &Clip {
        &self.clips[0]
    }

    pub fn encodes(&self) -> &[Clip] {
        &self.clips[1..]
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Swap in a new source, e.g. after resizing.
    pub fn replace_source(&mut self, source: Clip) {
        self.clips[0] = source;
    }

    pub fn into_clips(self) -> Vec<Clip> {
        self.clips
    }

    fn check_encode_aspect(&self) -> CompareResult<()> {
        let dims = self
            .encodes()
            .iter()
            .map(Clip::dimensions)
            .collect::<Vec<_>>();
        check_encode_aspect(&dims)
    }
}

/// Fail with [`CompareError::AspectRatioMismatch`] unless all encodes share one aspect ratio.
pub fn check_encode_aspect(encodes: &[Dimensions]) -> CompareResult<()> {
    let Some((&expected, rest)) = encodes.split_first() else {
        return Ok(());
    };
    match rest.iter().find(|d| !d.same_aspect(expected)) {
        Some(&found) => Err(CompareError::AspectRatioMismatch { expected, found }),
        None => Ok(()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ScaleDirection {
    Downscale,
    Upscale,
}

impl ScaleDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Downscale => "downscale",
            Self::Upscale => "upscale",
        }
    }
}

impl fmt::Display for ScaleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of geometry resolution for the source clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizePlan {
    /// Source already matches the encodes closely enough.
    Identity,
    /// Source must be scaled to a bucket resolution.
    Resize {
        target: Dimensions,
        kernel: ResizeKernel,
        direction: ScaleDirection,
    },
}

/// Decide whether `source` must be resized to line up with `encodes[0]`.
///
/// Integer width ratios are bucketed into canonical resolutions so that letterboxed or
/// column-cropped encodes still land on a standard size:
///
/// | direction | ratio | target    |
/// |-----------|-------|-----------|
/// | downscale | 2     | 1920x1080 |
/// | downscale | 1, 3  | 1280x720  |
/// | upscale   | 2, 3  | 3840x2160 |
/// | upscale   | 1     | 1920x1080 |
///
/// Any other ratio is [`CompareError::UnresolvedScaleRatio`].
pub fn plan_resize(
    source: Dimensions,
    encodes: &[Dimensions],
    kernel: ResizeKernel,
) -> CompareResult<ResizePlan> {
    check_encode_aspect(encodes)?;
    let enc = *encodes
        .first()
        .ok_or_else(|| CompareError::validation("geometry resolution needs at least one encode"))?;
    if source.width == 0 || enc.width == 0 {
        return Err(CompareError::validation("clip width must be non-zero"));
    }

    let downscale = source.width > enc.width.saturating_add(WIDTH_DELTA_TOLERANCE);
    let upscale = enc.width > source.width.saturating_add(WIDTH_DELTA_TOLERANCE);

    let (direction, ratio, target) = if downscale {
        let ratio = source.width / enc.width;
        let target = match ratio {
            2 => Dimensions::new(1920, 1080),
            1 | 3 => Dimensions::new(1280, 720),
            _ => {
                return Err(CompareError::UnresolvedScaleRatio {
                    direction: ScaleDirection::Downscale.as_str(),
                    ratio,
                    src: source,
                    enc,
                });
            }
        };
        (ScaleDirection::Downscale, ratio, target)
    } else if upscale {
        let ratio = enc.width / source.width;
        let target = match ratio {
            2 | 3 => Dimensions::new(3840, 2160),
            1 => Dimensions::new(1920, 1080),
            _ => {
                return Err(CompareError::UnresolvedScaleRatio {
                    direction: ScaleDirection::Upscale.as_str(),
                    ratio,
                    src: source,
                    enc,
                });
            }
        };
        (ScaleDirection::Upscale, ratio, target)
    } else {
        return Ok(ResizePlan::Identity);
    };

    tracing::debug!(%direction, ratio, %target, "bucketed source geometry");
    Ok(ResizePlan::Resize {
        target,
        kernel,
        direction,
    })
}

/// Resize the source of `set` if its geometry does not match the first encode.
///
/// Returns the source unchanged for an [`ResizePlan::Identity`] plan. Encodes are never resized.
pub fn verify_resize(set: &RenditionSet, kernel: ResizeKernel) -> CompareResult<Clip> {
    verify_resize_with(set, kernel, &kernel)
}

/// Like [`verify_resize`], with an explicit resizing strategy.
#[tracing::instrument(skip(set, resizer), fields(clips = set.len()))]
pub fn verify_resize_with(
    set: &RenditionSet,
    kernel: ResizeKernel,
    resizer: &dyn Resizer,
) -> CompareResult<Clip> {
    let source = set.source();
    let encodes = set
        .encodes()
        .iter()
        .map(Clip::dimensions)
        .collect::<Vec<_>>();

    match plan_resize(source.dimensions(), &encodes, kernel)? {
        ResizePlan::Identity => Ok(source.clone()),
        ResizePlan::Resize {
            target,
            kernel,
            direction,
        } => {
            tracing::info!(
                %direction,
                source = %source.dimensions(),
                encode = %encodes[0],
                %target,
                %kernel,
                "resizing source to match encodes"
            );
            resizer.resize(source, target.width, target.height)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolve.rs"]
mod tests;
