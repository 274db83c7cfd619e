//! Explicit run configuration.
//!
//! Every entry point takes one of these structs; nothing is read from process-wide state. The
//! CLI builds them from arguments, or loads one from a JSON file as a [`JobConfig`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::Dimensions;
use crate::foundation::error::{CompareError, CompareResult};
use crate::geometry::kernel::ResizeKernel;
use crate::geometry::preset::ResolutionPreset;

/// Where the renditions of a run come from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipSources {
    /// The source (reference) video.
    pub source: PathBuf,
    /// Explicit encode files. Takes precedence over `input_directory`.
    #[serde(default)]
    pub encodes: Vec<PathBuf>,
    /// Directory scanned for encodes when `encodes` is empty.
    #[serde(default)]
    pub input_directory: Option<PathBuf>,
}

/// Settings shared by every run that prepares clips.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    /// Crop every clip to this size; defaults to the first encode's dimensions.
    pub crop: Option<Dimensions>,
    /// One title per clip (source first), or one per encode.
    pub titles: Vec<String>,
    /// Kernel for resizing the source to the encodes' geometry.
    pub resize_kernel: ResizeKernel,
    /// Stamp frame information on every clip.
    pub frame_info: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            crop: None,
            titles: Vec::new(),
            resize_kernel: ResizeKernel::default(),
            frame_info: true,
        }
    }
}

/// `compare`: render an interleaved preview of the source and its encodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(flatten)]
    pub clips: ClipSources,
    #[serde(flatten)]
    pub prepare: PrepareOptions,
    /// Inclusive `[start, end]` frame range of the source to compare.
    #[serde(default)]
    pub frames: Option<(u64, u64)>,
    #[serde(default)]
    pub preview_resolution: ResolutionPreset,
    /// Preview file to write.
    pub out: PathBuf,
}

/// How screenshot frames are chosen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameSelection {
    /// These frame numbers.
    Explicit(Vec<u64>),
    /// `count` random frames in `[start, stop)`.
    Random { start: u64, stop: u64, count: u64 },
}

/// `screenshots`: write PNG stills of selected frames for every rendition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    #[serde(flatten)]
    pub clips: ClipSources,
    #[serde(flatten)]
    pub prepare: PrepareOptions,
    pub frames: FrameSelection,
    /// Added to the frame number for the source only.
    #[serde(default)]
    pub offset: i64,
    /// Output directory; a numbered `screens` directory next to the source when absent.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,
    /// Seed for random frame selection.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// `preview`: show a single input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Inputs given on the command line; the first one is previewed.
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub resolution: ResolutionPreset,
    #[serde(default)]
    pub resize_kernel: ResizeKernel,
    /// Preview file to write.
    pub out: PathBuf,
}

/// A complete run read from one JSON file, selected by its `command` field.
///
/// ```json
/// {"command": "screenshots", "source": "src.mkv", "frames": {"explicit": [100, 200]}}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum JobConfig {
    Compare(CompareConfig),
    Screenshots(ScreenshotConfig),
    Preview(PreviewConfig),
}

impl JobConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CompareResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CompareError::validation(format!("parse job JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CompareResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CompareError::validation(format!("open job JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
