//! vidcomp lines up a source video with its re-encodes for visual comparison.
//!
//! Given a source and one or more encodes it can render an interleaved preview, write matching
//! screenshot sets, or preview a single file.
//!
//! # Pipeline overview
//!
//! 1. **Load**: open every rendition through a [`Decoder`] as a lazy [`Clip`]
//! 2. **Align**: resize the source to the encodes' geometry when their widths differ by more than
//!    [`WIDTH_DELTA_TOLERANCE`] ([`plan_resize`], [`verify_resize`])
//! 3. **Prepare**: crop to modulus-aligned margins ([`crop_margins`]), tonemap HDR material and
//!    attach frame information ([`prepare_clips`])
//! 4. **Output**: hand the clips to a [`Viewer`], or allocate tags ([`allocate_tags`]), choose
//!    frames ([`RandomFrameSampler`]) and write them with a [`ScreenshotWriter`]
//!
//! Clips are pull-based: building crops, stacks and resizes is cheap, and pixels are only
//! produced when [`Clip::get_frame`] is called. [`rekt`] applies any [`ClipTransform`] to a
//! rectangle of a clip while every pixel outside it stays bit-identical.
//!
//! The ffmpeg-backed adapters ([`FfmpegDecoder`], [`FfmpegPreview`]) need `ffprobe`/`ffmpeg` on
//! `PATH` and the default `media-ffmpeg` feature.
#![forbid(unsafe_code)]

mod clip;
mod foundation;
mod geometry;
mod mask;
mod media;
mod output;
mod pipeline;

pub use clip::frame::{Frame, FrameProps, MATRIX_BT2020_NCL};
pub use clip::node::{Clip, ClipInfo, FrameSource};
pub use clip::ops::{crop, interleave, map_frames, stack_horizontal, stack_vertical, trim};
pub use foundation::core::{Dimensions, Fps, FrameIndex, FrameRange, Rectangle};
pub use foundation::error::{CompareError, CompareResult};
pub use geometry::crop::{CropPlan, DEFAULT_MODULUS, crop_margins, crop_to};
pub use geometry::kernel::{ResizeKernel, Resizer};
pub use geometry::preset::ResolutionPreset;
pub use geometry::resolve::{
    RenditionSet, ResizePlan, ScaleDirection, WIDTH_DELTA_TOLERANCE, check_encode_aspect,
    plan_resize, verify_resize, verify_resize_with,
};
pub use mask::levels::{LevelsMode, LevelsRange, Line, LineFix, rekt_levels};
pub use mask::rekt::{ClipTransform, rekt};
pub use media::decode::{
    Decoder, FfmpegDecoder, VideoProbe, decode_frame_rgba8, matrix_code, parse_rate, probe_video,
    seek_secs, transfer_code,
};
pub use media::ffmpeg::{
    FfmpegStream, FfmpegStreamOpts, ensure_parent_dir, is_ffmpeg_on_path, is_ffprobe_on_path,
};
pub use media::overlay::{FrameInfo, LabelFrameInfo};
pub use media::preview::{FfmpegPreview, Viewer, interleaved_preview};
pub use media::screenshot::{PngScreenshotWriter, ScreenshotWriter, screenshot_path};
pub use media::tonemap::Tonemapper;
pub use output::outdir::{SCREENS_MARKER, resolve_output_dir};
pub use output::sample::{END_GUARD_FRAMES, FrameSample, RandomFrameSampler};
pub use output::tags::{IMAGE_EXTENSIONS, allocate_tags, existing_tags, tags_for_directory};
pub use pipeline::compare::{CompareSummary, run_compare};
pub use pipeline::config::{
    ClipSources, CompareConfig, FrameSelection, JobConfig, PrepareOptions, PreviewConfig,
    ScreenshotConfig,
};
pub use pipeline::load::{ENCODE_SUFFIXES, LoadedClips, load_clips, rendition_paths, scan_encodes};
pub use pipeline::prepare::{Collaborators, align_renditions, prepare_clips};
pub use pipeline::preview::run_preview;
pub use pipeline::screenshots::{ScreenshotSummary, run_screenshots};
pub use pipeline::titles::{SOURCE_TITLE, resolve_titles};
