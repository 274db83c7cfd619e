//! Lazy clip operations.
//!
//! Each operation validates geometry up front and returns a new [`Clip`] whose frames are
//! derived from its inputs only when pulled. Inputs are never modified.

use std::sync::Arc;

use crate::clip::frame::Frame;
use crate::clip::node::{Clip, ClipInfo, FrameSource};
use crate::foundation::core::{Dimensions, FrameIndex, FrameRange, Rectangle};
use crate::foundation::error::{CompareError, CompareResult};

/// Remove `margins` from every frame of `clip`.
pub fn crop(clip: &Clip, margins: Rectangle) -> CompareResult<Clip> {
    let dimensions = margins.interior(clip.dimensions())?;
    if margins.is_zero() {
        return Ok(clip.clone());
    }
    let info = ClipInfo {
        dimensions,
        ..*clip.info()
    };
    Ok(Clip::new(CropNode {
        input: clip.clone(),
        margins,
        info,
    }))
}

struct CropNode {
    input: Clip,
    margins: Rectangle,
    info: ClipInfo,
}

impl FrameSource for CropNode {
    fn info(&self) -> &ClipInfo {
        &self.info
    }

    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        self.input.get_frame(idx)?.crop(self.margins)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Place clips side by side. Heights and frame counts must match.
pub fn stack_horizontal(clips: &[Clip]) -> CompareResult<Clip> {
    stack(clips, Axis::Horizontal)
}

/// Place clips top to bottom. Widths and frame counts must match.
pub fn stack_vertical(clips: &[Clip]) -> CompareResult<Clip> {
    stack(clips, Axis::Vertical)
}

fn stack(clips: &[Clip], axis: Axis) -> CompareResult<Clip> {
    let first = clips
        .first()
        .ok_or_else(|| CompareError::validation("cannot stack an empty clip list"))?;
    if clips.len() == 1 {
        return Ok(first.clone());
    }

    let frame_count = first.frame_count();
    if clips.iter().any(|c| c.frame_count() != frame_count) {
        return Err(CompareError::validation(
            "stacked clips must have the same number of frames",
        ));
    }

    let dimensions = match axis {
        Axis::Horizontal => {
            if clips.iter().any(|c| c.height() != first.height()) {
                return Err(CompareError::validation(
                    "horizontally stacked clips must share one height",
                ));
            }
            Dimensions::new(clips.iter().map(Clip::width).sum(), first.height())
        }
        Axis::Vertical => {
            if clips.iter().any(|c| c.width() != first.width()) {
                return Err(CompareError::validation(
                    "vertically stacked clips must share one width",
                ));
            }
            Dimensions::new(first.width(), clips.iter().map(Clip::height).sum())
        }
    };

    let info = ClipInfo {
        dimensions,
        ..*first.info()
    };
    Ok(Clip::new(StackNode {
        inputs: clips.to_vec(),
        axis,
        info,
    }))
}

struct StackNode {
    inputs: Vec<Clip>,
    axis: Axis,
    info: ClipInfo,
}

impl FrameSource for StackNode {
    fn info(&self) -> &ClipInfo {
        &self.info
    }

    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        let frames = self
            .inputs
            .iter()
            .map(|c| c.get_frame(idx))
            .collect::<CompareResult<Vec<_>>>()?;
        match self.axis {
            Axis::Horizontal => Frame::hstack(&frames),
            Axis::Vertical => Frame::vstack(&frames),
        }
    }
}

/// Keep only frames inside `range`.
pub fn trim(clip: &Clip, range: FrameRange) -> CompareResult<Clip> {
    if range.is_empty() {
        return Err(CompareError::validation("trim range is empty"));
    }
    if range.end.0 > clip.frame_count() {
        return Err(CompareError::FrameOutOfBounds {
            frame: range.end.0 - 1,
            frame_count: clip.frame_count(),
        });
    }
    let info = ClipInfo {
        frame_count: range.len_frames(),
        ..*clip.info()
    };
    Ok(Clip::new(TrimNode {
        input: clip.clone(),
        offset: range.start.0,
        info,
    }))
}

struct TrimNode {
    input: Clip,
    offset: u64,
    info: ClipInfo,
}

impl FrameSource for TrimNode {
    fn info(&self) -> &ClipInfo {
        &self.info
    }

    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        self.input.get_frame(FrameIndex(idx.0 + self.offset))
    }
}

/// Alternate frames of equally sized clips: `a0, b0, c0, a1, b1, c1, ...`.
///
/// The result is as long as the shortest input times the number of inputs.
pub fn interleave(clips: &[Clip]) -> CompareResult<Clip> {
    let first = clips
        .first()
        .ok_or_else(|| CompareError::validation("cannot interleave an empty clip list"))?;
    if clips.iter().any(|c| c.dimensions() != first.dimensions()) {
        return Err(CompareError::validation(
            "interleaved clips must share one frame size",
        ));
    }
    let shortest = clips.iter().map(Clip::frame_count).min().unwrap_or(0);
    let info = ClipInfo {
        frame_count: shortest * clips.len() as u64,
        ..*first.info()
    };
    Ok(Clip::new(InterleaveNode {
        inputs: clips.to_vec(),
        info,
    }))
}

struct InterleaveNode {
    inputs: Vec<Clip>,
    info: ClipInfo,
}

impl FrameSource for InterleaveNode {
    fn info(&self) -> &ClipInfo {
        &self.info
    }

    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        let n = self.inputs.len() as u64;
        let clip = &self.inputs[(idx.0 % n) as usize];
        clip.get_frame(FrameIndex(idx.0 / n))
    }
}

type FrameMapper = Arc<dyn Fn(Frame, FrameIndex) -> CompareResult<Frame> + Send + Sync>;

/// Apply `f` to every frame. `dimensions` is the size `f` produces.
pub fn map_frames<F>(clip: &Clip, dimensions: Dimensions, f: F) -> Clip
where
    F: Fn(Frame, FrameIndex) -> CompareResult<Frame> + Send + Sync + 'static,
{
    let info = ClipInfo {
        dimensions,
        ..*clip.info()
    };
    Clip::new(MapNode {
        input: clip.clone(),
        f: Arc::new(f),
        info,
    })
}

struct MapNode {
    input: Clip,
    f: FrameMapper,
    info: ClipInfo,
}

impl FrameSource for MapNode {
    fn info(&self) -> &ClipInfo {
        &self.info
    }

    fn frame(&self, idx: FrameIndex) -> CompareResult<Frame> {
        (self.f)(self.input.get_frame(idx)?, idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clip/ops.rs"]
mod tests;
