use std::path::PathBuf;

use crate::foundation::core::Dimensions;

/// Convenience result type used across vidcomp.
pub type CompareResult<T> = Result<T, CompareError>;

/// Top-level error taxonomy used by comparison APIs.
///
/// Every variant aborts the current invocation except [`CompareError::TitleCountMismatch`], which
/// callers downgrade to a warning.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// Encodes in a rendition set do not share a single aspect ratio.
    #[error("cannot process encodes with different aspect ratios ({expected} vs {found})")]
    AspectRatioMismatch {
        /// Dimensions of the first encode.
        expected: Dimensions,
        /// Dimensions of the first encode with a different ratio.
        found: Dimensions,
    },

    /// The integer width ratio between source and encode has no bucket.
    #[error("unable to determine {direction} ratio {ratio} for source {src} and encode {enc}")]
    UnresolvedScaleRatio {
        /// `downscale` or `upscale`.
        direction: &'static str,
        /// Integer width ratio that failed to classify.
        ratio: u32,
        /// Source dimensions.
        src: Dimensions,
        /// First encode dimensions.
        enc: Dimensions,
    },

    /// Margins or crop targets that leave no pixels, or exceed the frame.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// Random sampling start lies beyond the smallest clip.
    #[error("start frame {start} is greater than the smallest clip's frame count {frame_count}")]
    StartOutOfBounds {
        /// Requested start frame.
        start: u64,
        /// Smallest frame count across sampled clips.
        frame_count: u64,
    },

    /// More samples requested than frames available in the range.
    #[error("cannot sample {count} frames from a range of {available}")]
    SampleSizeTooLarge {
        /// Requested sample count.
        count: u64,
        /// Frames available in `[start, effective_stop)`.
        available: u64,
    },

    /// Preview resolution preset was not recognized.
    #[error("unknown resolution: {0}")]
    UnknownResolutionPreset(String),

    /// Resize kernel name was not recognized.
    #[error("unknown resize kernel: {0}")]
    UnknownKernel(String),

    /// Number of titles does not match number of clips. Soft failure.
    #[error("the number of titles ({titles}) does not match the number of clips ({clips})")]
    TitleCountMismatch {
        /// Titles provided.
        titles: usize,
        /// Clips loaded.
        clips: usize,
    },

    /// A masked transform returned a clip with different dimensions than it was given.
    #[error("masked transform changed region geometry from {expected} to {found}")]
    TransformGeometry {
        /// Region dimensions handed to the transform.
        expected: Dimensions,
        /// Dimensions the transform returned.
        found: Dimensions,
    },

    /// Tag arithmetic walked past the end of the alphabet.
    #[error("no screenshot tag left after '{last}' (shifted by {shift})")]
    TagSpaceExhausted {
        /// Character the shift started from.
        last: char,
        /// Shift that was applied.
        shift: usize,
    },

    /// A screenshot would overwrite an existing file.
    #[error("refusing to overwrite existing file '{}'", .0.display())]
    OutputCollision(PathBuf),

    /// An explicit frame lies beyond the smallest clip.
    #[error("frame {frame} is out of bounds for a clip of {frame_count} frames")]
    FrameOutOfBounds {
        /// Offending frame index.
        frame: u64,
        /// Smallest frame count across clips.
        frame_count: u64,
    },

    /// Frame range with start at or after its end, or an end with no successor.
    #[error("invalid frame range {start}..={end}: start of range must be less than end")]
    InvalidFrameRange {
        /// Range start.
        start: u64,
        /// Range end (inclusive).
        end: u64,
    },

    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures reported by media collaborators (decode, encode, write).
    #[error("media error: {0}")]
    Media(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CompareError {
    /// Build a [`CompareError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CompareError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`CompareError::InvalidRegion`] value.
    pub fn invalid_region(msg: impl Into<String>) -> Self {
        Self::InvalidRegion(msg.into())
    }

    /// Whether the failure is soft and processing may continue.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::TitleCountMismatch { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
