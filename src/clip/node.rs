use std::fmt;
use std::sync::Arc;

use crate::clip::frame::{Frame, FrameProps};
use crate::foundation::core::{Dimensions, Fps, FrameIndex};
use crate::foundation::error::{CompareError, CompareResult};

/// Static properties of a clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipInfo {
    /// Frame size shared by every frame.
    pub dimensions: Dimensions,
    /// Total number of frames.
    pub frame_count: u64,
    /// Nominal frame rate.
    pub fps: Fps,
}

/// Producer of frames for a [`Clip`].
///
/// Frames are pulled on demand. Implementations must return frames matching
/// [`FrameSource::info`] dimensions for every index below `frame_count`.
pub trait FrameSource: Send + Sync {
    /// Clip-wide properties.
    fn info(&self) -> &ClipInfo;

    /// Produce frame `idx`. Callers guarantee `idx < info().frame_count`.
    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame>;
}

/// Cheap-to-clone handle to a lazily evaluated frame sequence.
#[derive(Clone)]
pub struct Clip {
    source: Arc<dyn FrameSource>,
}

impl fmt::Debug for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clip")
            .field("info", self.source.info())
            .finish_non_exhaustive()
    }
}

impl Clip {
    /// Wrap a frame source.
    pub fn new(source: impl FrameSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// A clip backed by frames already in memory.
    pub fn from_frames(frames: Vec<Frame>, fps: Fps) -> CompareResult<Self> {
        let first = frames
            .first()
            .ok_or_else(|| CompareError::validation("a clip needs at least one frame"))?;
        let dimensions = first.dimensions();
        if frames.iter().any(|f| f.dimensions() != dimensions) {
            return Err(CompareError::validation(
                "all frames of a clip must share one size",
            ));
        }
        let info = ClipInfo {
            dimensions,
            frame_count: frames.len() as u64,
            fps,
        };
        Ok(Self::new(MemorySource { info, frames }))
    }

    /// A clip whose frames are computed by `f`.
    pub fn from_fn<F>(info: ClipInfo, f: F) -> Self
    where
        F: Fn(FrameIndex) -> CompareResult<Frame> + Send + Sync + 'static,
    {
        Self::new(FnSource {
            info,
            f: Box::new(f),
        })
    }

    /// A clip of `frame_count` identical single-color frames.
    pub fn blank(dimensions: Dimensions, frame_count: u64, rgba: [u8; 4], fps: Fps) -> Self {
        let info = ClipInfo {
            dimensions,
            frame_count,
            fps,
        };
        Self::from_fn(info, move |_| {
            Ok(Frame::filled(dimensions.width, dimensions.height, rgba))
        })
    }

    pub fn info(&self) -> &ClipInfo {
        self.source.info()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.info().dimensions
    }

    pub fn width(&self) -> u32 {
        self.info().dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.info().dimensions.height
    }

    pub fn frame_count(&self) -> u64 {
        self.info().frame_count
    }

    pub fn fps(&self) -> Fps {
        self.info().fps
    }

    /// Materialize frame `idx`.
    pub fn get_frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        let info = self.info();
        if idx.0 >= info.frame_count {
            return Err(CompareError::FrameOutOfBounds {
                frame: idx.0,
                frame_count: info.frame_count,
            });
        }
        let frame = self.source.frame(idx)?;
        if frame.dimensions() != info.dimensions {
            return Err(CompareError::media(format!(
                "frame {} is {}, clip reports {}",
                idx.0,
                frame.dimensions(),
                info.dimensions
            )));
        }
        Ok(frame)
    }

    /// Metadata of the first frame.
    pub fn first_frame_props(&self) -> CompareResult<FrameProps> {
        Ok(self.get_frame(FrameIndex(0))?.props)
    }

    /// Whether the first frame reports an HDR (BT.2020 NCL) matrix.
    pub fn is_hdr(&self) -> CompareResult<bool> {
        Ok(self.first_frame_props()?.is_hdr())
    }
}

struct MemorySource {
    info: ClipInfo,
    frames: Vec<Frame>,
}

impl FrameSource for MemorySource {
    fn info(&self) -> &ClipInfo {
        &self.info
    }

    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        self.frames
            .get(idx.0 as usize)
            .cloned()
            .ok_or(CompareError::FrameOutOfBounds {
                frame: idx.0,
                frame_count: self.info.frame_count,
            })
    }
}

type FrameFn = Box<dyn Fn(FrameIndex) -> CompareResult<Frame> + Send + Sync>;

struct FnSource {
    info: ClipInfo,
    f: FrameFn,
}

impl FrameSource for FnSource {
    fn info(&self) -> &ClipInfo {
        &self.info
    }

    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        (self.f)(idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/node.rs"]
mod tests;
