use std::fmt;

use crate::foundation::error::{CompareError, CompareResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> CompareResult<Self> {
        if start.0 > end.0 {
            return Err(CompareError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Build the range `[start, end]` from a user-facing inclusive pair.
    pub fn inclusive(start: u64, end: u64) -> CompareResult<Self> {
        let past_end = end
            .checked_add(1)
            .filter(|_| start < end)
            .ok_or(CompareError::InvalidFrameRange { start, end })?;
        Ok(Self {
            start: FrameIndex(start),
            end: FrameIndex(past_end),
        })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> CompareResult<Self> {
        if den == 0 {
            return Err(CompareError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CompareError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 24000, den: 1001 }
    }
}

/// Width and height of a frame in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Exact aspect-ratio equality, compared as rationals.
    pub fn same_aspect(self, other: Self) -> bool {
        u64::from(self.width) * u64::from(other.height)
            == u64::from(other.width) * u64::from(self.height)
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Margins measured inward from each edge of a frame.
///
/// A rectangle describes the region that remains once `left`, `top`, `right` and `bottom`
/// pixels are removed from the corresponding edges.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rectangle {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rectangle {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_zero(self) -> bool {
        self == Self::default()
    }

    pub fn has_horizontal(self) -> bool {
        self.left > 0 || self.right > 0
    }

    pub fn has_vertical(self) -> bool {
        self.top > 0 || self.bottom > 0
    }

    /// Dimensions of the region inside the margins.
    ///
    /// Fails with [`CompareError::InvalidRegion`] when `left+right >= width` or
    /// `top+bottom >= height`.
    pub fn interior(self, frame: Dimensions) -> CompareResult<Dimensions> {
        let horizontal = u64::from(self.left) + u64::from(self.right);
        let vertical = u64::from(self.top) + u64::from(self.bottom);
        if horizontal >= u64::from(frame.width) || vertical >= u64::from(frame.height) {
            return Err(CompareError::invalid_region(format!(
                "margins l={} t={} r={} b={} leave no pixels in a {frame} frame",
                self.left, self.top, self.right, self.bottom
            )));
        }
        Ok(Dimensions::new(
            frame.width - horizontal as u32,
            frame.height - vertical as u32,
        ))
    }

    /// Whether pixel `(x, y)` of a `frame`-sized image lies inside the region.
    pub fn contains(self, frame: Dimensions, x: u32, y: u32) -> bool {
        x >= self.left
            && y >= self.top
            && u64::from(x) + u64::from(self.right) < u64::from(frame.width)
            && u64::from(y) + u64::from(self.bottom) < u64::from(frame.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
