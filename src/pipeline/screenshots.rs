use std::path::PathBuf;

use crate::clip::node::Clip;
use crate::foundation::error::{CompareError, CompareResult};
use crate::media::screenshot::{ScreenshotWriter, screenshot_path};
use crate::output::outdir::resolve_output_dir;
use crate::output::sample::{FrameSample, RandomFrameSampler};
use crate::output::tags::tags_for_directory;
use crate::pipeline::config::{FrameSelection, ScreenshotConfig};
use crate::pipeline::load::load_clips;
use crate::pipeline::prepare::{Collaborators, align_renditions, prepare_clips};
use crate::pipeline::titles::resolve_titles;

/// What a screenshot run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenshotSummary {
    pub directory: PathBuf,
    /// One tag per rendition, source first.
    pub tags: Vec<char>,
    /// Frames taken from the encodes; the source uses these plus the offset.
    pub frames: FrameSample,
    pub written: Vec<PathBuf>,
}

/// Take screenshots of the same frames from the source and every encode.
///
/// Nothing is written unless every destination file is free.
#[tracing::instrument(skip_all, fields(source = %cfg.clips.source.display()))]
pub fn run_screenshots(
    cfg: &ScreenshotConfig,
    collab: &Collaborators<'_>,
    writer: &dyn ScreenshotWriter,
) -> CompareResult<ScreenshotSummary> {
    let loaded = load_clips(&cfg.clips, collab.decoder)?;
    let titles = resolve_titles(&cfg.prepare.titles, &loaded.paths);
    let frames = select_frames(&cfg.frames, &loaded.clips, cfg.seed)?;
    tracing::info!(frames = ?frames.as_slice(), "screenshot frames");

    let (clips, crop) = align_renditions(loaded.clips, &cfg.prepare)?;
    let clips = prepare_clips(&clips, crop, &titles, cfg.prepare.frame_info, collab)?;
    let source_frames = offset_frames(&frames, cfg.offset, clips[0].frame_count())?;

    let directory = resolve_output_dir(
        cfg.output_directory.as_deref(),
        &cfg.clips.source,
        cfg.offset,
    )?;
    let tags = tags_for_directory(&directory, clips.len())?;

    let jobs = clips
        .iter()
        .zip(&tags)
        .enumerate()
        .map(|(i, (clip, &tag))| {
            let frames = if i == 0 {
                source_frames.clone()
            } else {
                frames.as_slice().to_vec()
            };
            (clip, tag, frames)
        })
        .collect::<Vec<_>>();

    for (_, tag, frames) in &jobs {
        for &n in frames {
            let path = screenshot_path(&directory, n, *tag);
            if path.exists() {
                return Err(CompareError::OutputCollision(path));
            }
        }
    }

    let mut written = Vec::new();
    for (clip, tag, frames) in jobs {
        written.extend(writer.write(clip, &directory, tag, &frames)?);
    }
    tracing::info!(
        directory = %directory.display(),
        files = written.len(),
        "screenshots written"
    );

    Ok(ScreenshotSummary {
        directory,
        tags,
        frames,
        written,
    })
}

/// Resolve the configured selection into concrete frames.
///
/// Random frames are drawn against the encodes when there are any, else against the source.
fn select_frames(
    selection: &FrameSelection,
    clips: &[Clip],
    seed: Option<u64>,
) -> CompareResult<FrameSample> {
    match selection {
        FrameSelection::Explicit(frames) => {
            let frame_count = clips.iter().map(Clip::frame_count).min().unwrap_or(0);
            FrameSample::from_explicit(frames, frame_count)
        }
        FrameSelection::Random { start, stop, count } => {
            let pool = if clips.len() > 1 { &clips[1..] } else { clips };
            let mut sampler = match seed {
                Some(seed) => RandomFrameSampler::with_seed(seed),
                None => RandomFrameSampler::new(),
            };
            sampler.sample(pool, *start, *stop, *count)
        }
    }
}

/// Shift `frames` by `offset`, keeping every result inside the clip.
fn offset_frames(frames: &FrameSample, offset: i64, frame_count: u64) -> CompareResult<Vec<u64>> {
    frames
        .iter()
        .map(|n| {
            let shifted = i128::from(n) + i128::from(offset);
            u64::try_from(shifted)
                .ok()
                .filter(|&f| f < frame_count)
                .ok_or(CompareError::FrameOutOfBounds {
                    frame: shifted.max(0) as u64,
                    frame_count,
                })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/screenshots.rs"]
mod tests;
